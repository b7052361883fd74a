pub mod bowling;
pub mod events;
pub mod outcome;
pub mod scoreboard;
pub mod side;

pub use bowling::{BowlingLine, Delivery, SpeedLevel};
pub use events::{EventKind, EventLog, LogEntry};
pub use outcome::{BallOutcome, RunValue};
pub use scoreboard::{overs_notation, ScoreboardSnapshot};
pub use side::Side;
