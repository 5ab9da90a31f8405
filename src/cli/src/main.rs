#![warn(clippy::pedantic)]

mod config;
mod repl;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{eyre::eyre, owo_colors::OwoColorize};
use config::{Config, FaceArg};
use cube_core::apply_all;
use env_logger::TimestampPrecision;
use log::{LevelFilter, debug};
use notation::{compile_notation, parse_algorithm};

/// Turns cubes with standard move notation
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The configuration file to use, in TOML format. Defaults to
    /// `cube-notation/config.toml` in the user configuration directory.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a move sequence to a solved cube and print the result
    Apply {
        /// The move sequence, e.g. "R U' 2Rw2 M x"
        notation: String,
        /// Side length of the cube
        #[arg(long, short)]
        size: Option<usize>,
        /// The face to turn to the front before applying the moves
        #[arg(long, short)]
        focus: Option<FaceArg>,
        /// Print the compiled actions as JSON instead of the cube
        #[arg(long)]
        json: bool,
    },
    /// Check whether a move sequence is valid notation
    Check {
        /// The move sequence to check
        notation: String,
    },
    /// Turn a cube interactively, one line of moves at a time
    Repl {
        /// Side length of the cube
        #[arg(long, short)]
        size: Option<usize>,
        /// The face to start with at the front
        #[arg(long, short)]
        focus: Option<FaceArg>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Apply {
            notation,
            size,
            focus,
            json,
        } => {
            let config = config.with_overrides(size, focus)?;
            let actions = compile_notation(&notation, config.size)
                .map_err(|err| eyre!("{}", err.diagnostic()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&actions)?);
                return Ok(());
            }

            let cube = repl::start_state(&config)?;
            debug!("Applying {} actions to {cube:?}", actions.len());

            let cube = apply_all(&cube, &actions)?;
            print!("{cube}");
        }
        Commands::Check { notation } => match parse_algorithm(&notation) {
            Ok(algorithm) => {
                println!("{} {} moves: {algorithm}", "Match".green(), algorithm.len());
            }
            Err(failure) => {
                eprintln!("{}", failure.rendered);
                return Err(eyre!("{} {}", "No match".red(), failure.description));
            }
        },
        Commands::Repl { size, focus } => {
            repl::run(config.with_overrides(size, focus)?)?;
        }
    }

    Ok(())
}
