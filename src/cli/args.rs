//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// static-finders - fetch vendored files and compile sources into a cache
///
/// Finds static files through the configured finders and collects them
/// into a single directory ready to be served.
#[derive(Parser, Debug)]
#[command(name = "static-finders")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STATIC_FINDERS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect every static file into the static root
    Collect(CollectArgs),

    /// Show where static paths are found
    Find(FindArgs),

    /// List the files each finder provides
    List(ListArgs),

    /// Inspect or clear the finder cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the collect command
#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Show what would be collected without copying
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Remove existing files in the static root first
    #[arg(long)]
    pub clear: bool,

    /// Additional patterns to ignore (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,
}

/// Arguments for the find command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// Static paths to look up
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Show every matching location, not only the first
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the cache directory
    Path,

    /// Remove every cached download and compiled file
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default static-finders.toml in the current directory
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_collect() {
        let cli = Cli::parse_from(["static-finders", "collect", "--dry-run", "-i", "*.map"]);
        match cli.command {
            Commands::Collect(args) => {
                assert!(args.dry_run);
                assert!(!args.clear);
                assert_eq!(args.ignore, vec!["*.map"]);
            }
            _ => panic!("expected Collect command"),
        }
    }

    #[test]
    fn cli_parses_find_all() {
        let cli = Cli::parse_from(["static-finders", "find", "--all", "js/app.js", "site.css"]);
        match cli.command {
            Commands::Find(args) => {
                assert!(args.all);
                assert_eq!(args.paths, vec!["js/app.js", "site.css"]);
            }
            _ => panic!("expected Find command"),
        }
    }

    #[test]
    fn cli_find_requires_path() {
        assert!(Cli::try_parse_from(["static-finders", "find"]).is_err());
    }

    #[test]
    fn cli_parses_cache_clear() {
        let cli = Cli::parse_from(["static-finders", "cache", "clear", "--yes"]);
        match cli.command {
            Commands::Cache(CacheArgs {
                action: CacheAction::Clear { yes },
            }) => assert!(yes),
            _ => panic!("expected cache clear"),
        }
    }

    #[test]
    fn cli_parses_config_init_force() {
        let cli = Cli::parse_from(["static-finders", "config", "init", "--force"]);
        match cli.command {
            Commands::Config(ConfigArgs {
                action: Some(ConfigAction::Init { force }),
            }) => assert!(force),
            _ => panic!("expected config init"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["static-finders", "list"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["static-finders", "-v", "list"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["static-finders", "-vv", "list"]);
        assert_eq!(cli.verbose, 2);
    }
}
