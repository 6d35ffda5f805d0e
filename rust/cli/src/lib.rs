//! # headsup CLI Library
//!
//! Command-line front end for the heads-up betting engine.
//!
//! The entry point is [`run`], which parses arguments and dispatches to a
//! subcommand handler, writing to the given output streams.
//!
//! ```
//! use std::io;
//! let args = vec!["headsup", "deal", "--seed", "42"];
//! let code = headsup_cli::run(args, &mut io::sink(), &mut io::sink());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `sim`: play two policies against each other for N hands
//! - `deal`: start a single hand and show the table
//! - `cfg`: display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{COMMANDS, Commands, HeadsupCli};
use commands::{handle_cfg_command, handle_deal_command, handle_sim_command};

pub use error::CliError;

/// Parses `args` and runs the selected subcommand.
///
/// Returns [`exit_code::SUCCESS`] on success, including `--help` and
/// `--version`, and [`exit_code::ERROR`] for parse and runtime errors.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HeadsupCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e);
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Sim {
            hands,
            seed,
            output,
            player,
            opponent,
        } => handle_sim_command(hands, seed, output, &player, opponent, out),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, e: &clap::Error) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Heads-up Poker CLI")?;
    writeln!(err, "Usage: headsup <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: headsup --help")
}
