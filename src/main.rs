//! static-finders CLI entry point
//!
//! Loads configuration and dispatches to subcommands.

use clap::Parser;
use console::style;
use static_finders::cli::{Cli, Commands};
use static_finders::config::{Config, ConfigManager};
use static_finders::error::{FinderError, FinderResult};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let FinderError::CompileFailed { stderr, .. } = &e {
                if !stderr.trim().is_empty() {
                    eprintln!("{}", stderr.trim_end());
                }
            }
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> FinderResult<()> {
    let cli = Cli::parse();

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| FinderError::io("getting current directory", e))?;
            ConfigManager::find_local_config(&cwd)
                .map(ConfigManager::with_path)
                .unwrap_or_else(|| ConfigManager::in_dir(&cwd))
        }
    };

    let config = manager.load().await?;
    init_logging(cli.verbose, &config);
    debug!("Using config {}", manager.path().display());

    match cli.command {
        Commands::Collect(args) => static_finders::cli::commands::collect(args, &config).await,
        Commands::Find(args) => static_finders::cli::commands::find(args, &config).await,
        Commands::List(args) => static_finders::cli::commands::list(args, &config).await,
        Commands::Cache(args) => static_finders::cli::commands::cache(args, &config).await,
        Commands::Config(args) => {
            static_finders::cli::commands::config(args, &config, &manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug. `RUST_LOG` overrides.
fn init_logging(verbose: u8, config: &Config) {
    let default = match verbose {
        0 => "static_finders=warn",
        1 => "static_finders=info",
        _ => "static_finders=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }
}
