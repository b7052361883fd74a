//! Interactive match over stdin/stdout.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use cricket_core::engine::{AutoplaySession, BallReport, DrawSource, MatchController, Pacer};
use cricket_core::{Delivery, OpponentInningsMode};

pub const HELP: &str = "\
Commands:
  new [overs]           start a new match
  toss                  toss the coin
  bat                   face the next ball
  bowl <speed> <line>   bowl to the AI (speed: slow|medium|fast, line: center|off|leg)
  score                 show the scoreboard
  log                   show the match log, newest first
  help                  show this help
  quit                  leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New(Option<u8>),
    Toss,
    Bat,
    Bowl(Delivery),
    Score,
    Log,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err("empty command".to_string());
        };
        let rest: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("new", []) => Command::New(None),
            ("new", [overs]) => Command::New(Some(
                overs.parse().map_err(|_| format!("not a number of overs: {overs}"))?,
            )),
            ("toss", []) => Command::Toss,
            ("bat", []) => Command::Bat,
            ("bowl", [speed, line]) => Command::Bowl(Delivery::new(speed.parse()?, line.parse()?)),
            ("bowl", _) => return Err("usage: bowl <slow|medium|fast> <center|off|leg>".into()),
            ("score", []) => Command::Score,
            ("log", []) => Command::Log,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", _) => Command::Quit,
            (other, _) => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(command)
    }
}

/// A controller plus the pacer used when the AI bats on its own.
pub struct PlaySession<D: DrawSource, P: Pacer> {
    controller: MatchController<D>,
    pacer: P,
}

impl<D: DrawSource, P: Pacer> PlaySession<D, P> {
    pub fn new(controller: MatchController<D>, pacer: P) -> Self {
        Self { controller, pacer }
    }

    #[cfg(test)]
    fn controller(&self) -> &MatchController<D> {
        &self.controller
    }

    #[cfg(test)]
    fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        writeln!(out, "Mini Cricket. Type 'toss' to start, 'help' for commands.")?;
        writeln!(out, "{}", self.controller.scoreboard())?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, out)?,
                Err(e) => writeln!(out, "! {e}")?,
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        let played = match command {
            Command::New(overs) => {
                let overs = overs.unwrap_or(self.controller.config().overs);
                match self.controller.new_match(overs) {
                    Ok(()) => {
                        writeln!(out, "New match: {overs} overs. Type 'toss'.")?;
                        writeln!(out, "{}", self.controller.scoreboard())?;
                    }
                    Err(e) => writeln!(out, "! {e}")?,
                }
                return Ok(());
            }
            Command::Score => {
                writeln!(out, "{}", self.controller.scoreboard())?;
                return Ok(());
            }
            Command::Log => {
                for entry in self.controller.log().newest_first() {
                    writeln!(out, "{entry}")?;
                }
                return Ok(());
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
            Command::Toss => self
                .controller
                .toss()
                .map(|toss| vec![toss.result_text(), self.controller.mode_text().to_string()]),
            Command::Bat => self.controller.human_bat().map(|ball| ball_lines(&ball)),
            Command::Bowl(delivery) => {
                self.controller.human_bowl(delivery).map(|ball| ball_lines(&ball))
            }
        };

        match played {
            Ok(lines) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
                self.autoplay_if_due(out)
            }
            Err(rejected) => {
                writeln!(out, "! {rejected}")?;
                Ok(())
            }
        }
    }

    /// Lets the AI bat out its innings when that is the configured mode.
    fn autoplay_if_due(&mut self, out: &mut impl Write) -> Result<()> {
        let state = self.controller.state();
        if self.controller.config().opponent_innings != OpponentInningsMode::Autoplay
            || state.is_match_over()
            || state.first_batting.is_none()
            || state.human_is_batting()
        {
            return Ok(());
        }

        let mut session = AutoplaySession::start(&mut self.controller)?;
        while !session.is_finished() {
            self.pacer.pause(session.next_delay());
            let step = session.step()?;
            for line in ball_lines(step.report()) {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }
        Ok(())
    }
}

fn ball_lines(ball: &BallReport) -> Vec<String> {
    let mut lines = vec![format!("{:<8} {}", ball.overlay, ball.scoreboard)];
    lines.extend(ball.announcement.clone());
    lines
}
