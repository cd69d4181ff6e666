//! CLI interface module
//!
//! Offline commands that open the data files, act on them through the same
//! `LinkRegistry` the server uses, and exit.

use std::io::Write;
use std::sync::Arc;

use colored::Colorize;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::errors::{QuicklinkError, Result};
use crate::services::{LinkRegistry, PersistPolicy};
use crate::storage::{JsonFileStore, LinkStore};
use crate::utils::is_generated_code;

/// Run `command`, printing to stdout.
pub fn run_command(config: &StaticConfig, command: Commands) -> Result<()> {
    let mut stdout = std::io::stdout();
    execute(config, command, &mut stdout)
}

/// Run `command`, printing to `out`.
pub fn execute<W: Write>(config: &StaticConfig, command: Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Serve => Err(QuicklinkError::config(
            "serve is handled by the server runtime",
        )),
        Commands::Add { url, code } => {
            let registry = open_checked_registry(config, PersistPolicy::Escalate)?;
            let link = registry.create_short_link(&url, code.as_deref())?;
            writeln!(
                out,
                "{} {} -> {}",
                "Added".green().bold(),
                link.code.cyan(),
                link.target_url
            )?;
            Ok(())
        }
        Commands::List => {
            let registry = open_checked_registry(config, PersistPolicy::LogAndContinue)?;
            let links = registry.list();
            if links.is_empty() {
                writeln!(out, "{}", "No short links".yellow())?;
                return Ok(());
            }
            for link in links {
                let kind = if is_generated_code(&link.code) {
                    "auto"
                } else {
                    "custom"
                };
                writeln!(
                    out,
                    "{:<22} {:<6} {:>8}  {}",
                    link.code.cyan(),
                    kind.dimmed(),
                    link.click_count,
                    link.target_url
                )?;
            }
            Ok(())
        }
        Commands::Stats => {
            let registry = open_checked_registry(config, PersistPolicy::LogAndContinue)?;
            let stats = registry.stats();
            writeln!(out, "Total URLs:   {}", stats.total_urls)?;
            writeln!(out, "Total clicks: {}", stats.total_clicks)?;
            Ok(())
        }
        Commands::ConfigGen { output } => {
            StaticConfig::default().save_to_file(&output)?;
            writeln!(
                out,
                "{} {}",
                "Sample configuration written to".green(),
                output
            )?;
            Ok(())
        }
    }
}

// 命令行没有日志输出，读取失败直接报告给用户；损坏的数据文件不能被 add 覆盖
fn open_checked_registry(config: &StaticConfig, policy: PersistPolicy) -> Result<LinkRegistry> {
    let store = Arc::new(JsonFileStore::new(&config.storage.data_dir));
    let snapshot = store.load()?;
    Ok(LinkRegistry::new(store, snapshot, policy))
}
