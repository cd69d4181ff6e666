//! CLI mode
//!
//! Delegates to the offline command implementations.

use crate::cli::Commands;
use crate::config::get_config;
use crate::errors::Result;

/// Run a non-server command
pub fn run_cli(command: Commands) -> Result<()> {
    let config = get_config();
    crate::interfaces::cli::run_command(&config, command)
}
