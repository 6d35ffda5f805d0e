//! Command handler modules.
//!
//! Each subcommand lives in its own file and exposes a
//! `handle_COMMAND_command` function that writes to the given output stream
//! and returns `Result<(), CliError>`.

pub mod cfg;
pub mod deal;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use sim::handle_sim_command;
