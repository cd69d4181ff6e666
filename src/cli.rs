//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// quicklink - a small URL shortener service
#[derive(Parser, Debug)]
#[command(name = "quicklink")]
#[command(version)]
#[command(about = "A small URL shortener service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// Everything except `serve` works on the data files directly, so it must
/// not be run while a server is using the same data directory.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Add a short link
    Add {
        /// Target URL
        url: String,

        /// Custom short code (3-20 chars: letters, digits, '-' and '_')
        #[arg(long)]
        code: Option<String>,
    },

    /// List all short links with their click counts
    List,

    /// Show total links and clicks
    Stats,

    /// Write a sample configuration file
    ConfigGen {
        /// Output path
        #[arg(long, short = 'o', default_value = "config.example.toml")]
        output: String,
    },
}
