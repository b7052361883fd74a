//! Mini Cricket CLI
//!
//! `cricket play` runs an interactive match in the terminal,
//! `cricket simulate` plays one headless match and prints the result.

#[cfg(feature = "cli")]
mod play;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use cricket_core::engine::{NoPacing, RngDraws, ThreadSleepPacer};
#[cfg(feature = "cli")]
use cricket_core::{simulate_match, MatchConfig, MatchController, MatchRequest, MatchResponse};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Bat, bowl and chase against the computer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Play an interactive match
    Play {
        /// Overs per innings (must be one of the configured choices)
        #[arg(long)]
        overs: Option<u8>,

        /// Seed for a reproducible match
        #[arg(long)]
        seed: Option<u64>,

        /// Match config file (JSON or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run the AI's innings without pausing between balls
        #[arg(long, default_value = "false")]
        no_pacing: bool,
    },

    /// Simulate a whole match without input
    Simulate {
        /// Overs per innings (must be one of the configured choices)
        #[arg(long)]
        overs: Option<u8>,

        /// Seed for a reproducible match
        #[arg(long)]
        seed: Option<u64>,

        /// Match config file (JSON or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full JSON response
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { overs, seed, config, no_pacing } => {
            let config = load_config(config.as_deref(), overs)?;
            let draws = match seed {
                Some(seed) => RngDraws::seeded(seed),
                None => RngDraws::from_entropy(),
            };
            let controller = MatchController::new(config, draws)?;

            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            if no_pacing {
                play::PlaySession::new(controller, NoPacing).run(stdin.lock(), &mut stdout)?;
            } else {
                play::PlaySession::new(controller, ThreadSleepPacer)
                    .run(stdin.lock(), &mut stdout)?;
            }
        }

        Commands::Simulate { overs, seed, config, json } => {
            let config = load_config(config.as_deref(), overs)?;
            let seed = seed.unwrap_or_else(rand::random);
            log::debug!("Simulating with seed {seed}");

            let response = simulate_match(&MatchRequest::new(seed), config)
                .map_err(anyhow::Error::msg)
                .context("simulation failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_summary(&response);
            }
        }
    }

    Ok(())
}

/// Config from `path`, else from `CRICKET_CONFIG_PATH`, else defaults.
#[cfg(feature = "cli")]
fn load_config(path: Option<&Path>, overs: Option<u8>) -> Result<MatchConfig> {
    let mut config = match path {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MatchConfig::from_env().context("failed to load config from environment")?,
    };
    if let Some(overs) = overs {
        config.check_overs(overs)?;
        config.overs = overs;
    }
    Ok(config)
}

#[cfg(feature = "cli")]
fn print_summary(response: &MatchResponse) {
    println!("Match {} (seed {})", response.match_id, response.seed);
    match &response.toss {
        Some(toss) => println!("   Toss:     {}", toss.result_text()),
        None => println!("   Toss:     skipped"),
    }
    println!("   {} bat first, {} overs", response.batting_first.team_name(), response.overs);
    println!(
        "   You:      {}/{} ({} balls)",
        response.human.runs, response.human.wickets, response.human.balls
    );
    println!(
        "   AI:       {}/{} ({} balls)",
        response.opponent.runs, response.opponent.wickets, response.opponent.balls
    );
    println!("   Target:   {}", response.target);
    println!("\n{}", response.summary);
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("cricket CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_play_args() {
        let cli = Cli::try_parse_from(["cricket", "play", "--overs", "5", "--seed", "9", "--no-pacing"])
            .unwrap();
        match cli.command {
            Commands::Play { overs, seed, config, no_pacing } => {
                assert_eq!(overs, Some(5));
                assert_eq!(seed, Some(9));
                assert!(config.is_none());
                assert!(no_pacing);
            }
            Commands::Simulate { .. } => panic!("expected play"),
        }
    }

    #[test]
    fn test_parse_simulate_args() {
        let cli = Cli::try_parse_from(["cricket", "simulate", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Simulate { json: true, seed: None, .. }));
        assert!(Cli::try_parse_from(["cricket", "simulate", "--overs", "many"]).is_err());
    }

    #[test]
    fn test_load_config_from_file_with_overs_override() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "overs: 3\nwickets_per_innings: 5").unwrap();

        let config = load_config(Some(file.path()), None).unwrap();
        assert_eq!(config.overs, 3);
        assert_eq!(config.wickets_per_innings, 5);

        let config = load_config(Some(file.path()), Some(5)).unwrap();
        assert_eq!(config.overs, 5);

        assert!(load_config(Some(file.path()), Some(4)).is_err());
        assert!(load_config(Some(Path::new("/nonexistent/cricket.yaml")), None).is_err());
    }
}
