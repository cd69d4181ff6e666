use clap::Parser;

use quicklink::cli::{Cli, Commands};
#[cfg(feature = "server")]
use quicklink::config::get_config;
use quicklink::config::{init_config, init_config_from};
#[cfg(feature = "server")]
use quicklink::runtime::modes;
#[cfg(feature = "server")]
use quicklink::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.config.as_deref() {
        Some(path) => init_config_from(path),
        None => init_config(),
    }

    match cli.command.unwrap_or(Commands::Serve) {
        #[cfg(feature = "server")]
        Commands::Serve => {
            let config = get_config();
            // guard 必须存活到进程结束，否则缓冲的日志会丢失
            let _guard = init_logging(&config);
            modes::run_server().await
        }
        #[cfg(not(feature = "server"))]
        Commands::Serve => anyhow::bail!("quicklink was built without the `server` feature"),
        #[cfg(feature = "cli")]
        command => {
            if let Err(e) = modes::run_cli(command) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        #[cfg(not(feature = "cli"))]
        command => anyhow::bail!(
            "quicklink was built without the `cli` feature; cannot run {:?}",
            command
        ),
    }
}
