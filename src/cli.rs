use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deb")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bootstrap Docker environments for Express.js projects")]
#[command(long_about = "A CLI tool that analyzes Express.js projects and automatically generates Docker configurations, wiring in the backing services (MongoDB, Redis, RabbitMQ, and more) inferred from the project's environment files.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project and display detected facts and services
    Analyze {
        /// Path to the project directory to analyze
        #[arg(value_name = "PROJECT_PATH", default_value = ".")]
        path: PathBuf,

        /// Output analysis results in JSON format
        #[arg(short, long)]
        json: bool,

        /// Show every parsed variable and service URL
        #[arg(short, long, conflicts_with = "format")]
        detailed: bool,

        /// Display format for analysis results
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate Docker configuration files for a project
    Generate {
        /// Path to the project directory to analyze
        #[arg(value_name = "PROJECT_PATH", default_value = ".")]
        path: PathBuf,

        /// Output directory for generated files (defaults to the project directory)
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output: Option<PathBuf>,

        /// Generate Dockerfile
        #[arg(long)]
        dockerfile: bool,

        /// Generate Docker Compose file
        #[arg(long)]
        compose: bool,

        /// Generate all supported files (the default when no file flag is given)
        #[arg(long, conflicts_with_all = ["dockerfile", "compose"])]
        all: bool,

        /// Generate development-mode configuration
        #[arg(short, long)]
        dev: bool,

        /// Port the application listens on
        #[arg(short, long)]
        port: Option<u16>,

        /// Node.js base image tag (e.g. 18-alpine)
        #[arg(long, value_name = "VERSION")]
        node_version: Option<String>,

        /// Perform a dry run without creating files
        #[arg(long)]
        dry_run: bool,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Save the resolved generation settings to .devenvrc.json
        #[arg(long)]
        save_config: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Short line-oriented summary
    Simple,
    /// Property/value table
    Table,
    /// Machine-readable JSON
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from(["deb", "analyze", "/tmp/app", "--json"]).unwrap();
        match cli.command {
            Commands::Analyze { path, json, .. } => {
                assert_eq!(path, PathBuf::from("/tmp/app"));
                assert!(json);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "deb",
            "generate",
            "--dev",
            "--port",
            "8080",
            "--node-version",
            "20-alpine",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                path,
                dev,
                port,
                node_version,
                dry_run,
                ..
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert!(dev);
                assert_eq!(port, Some(8080));
                assert_eq!(node_version.as_deref(), Some("20-alpine"));
                assert!(dry_run);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_all_conflicts_with_file_flags() {
        let result = Cli::try_parse_from(["deb", "generate", "--all", "--dockerfile"]);
        assert!(result.is_err());
    }
}
