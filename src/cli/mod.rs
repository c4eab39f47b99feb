pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};

use crate::error::GaejeongError;

/// Korean statute amendment clause generator
#[derive(Parser, Debug)]
#[command(
    name = "gaejeong",
    about = "Generate Korean statute amendment clauses (개정문) and search statute text via law.go.kr",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    Text,
    /// JSON format
    Json,
    /// HTML fragment
    Html,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate amendment clauses replacing one word with another
    #[command(alias = "a")]
    Amend(args::AmendArgs),

    /// Search statute text for a keyword
    #[command(alias = "s")]
    Search(args::SearchArgs),

    /// Manage configuration
    #[command(alias = "c")]
    Config(args::ConfigArgs),

    /// Show version information
    Version,
}

impl Cli {
    /// Run the CLI application
    pub async fn run() -> crate::error::Result<()> {
        let cli = Self::parse();

        // Set up logging
        let default_filter = if cli.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .init();

        let result = match cli.command {
            Commands::Amend(args) => {
                commands::amend::execute(args, cli.format, cli.quiet, cli.verbose).await
            }
            Commands::Search(args) => {
                commands::search::execute(args, cli.format, cli.quiet, cli.verbose).await
            }
            Commands::Config(args) => commands::config::execute(args).await,
            Commands::Version => {
                commands::version::execute();
                Ok(())
            }
        };

        // Handle errors with better messaging
        if let Err(e) = &result {
            eprintln!("{}", e);
            match e {
                GaejeongError::ApiError { code, .. } if cli.verbose => {
                    eprintln!("Code: {}", code);
                }
                GaejeongError::Parse(_) if !cli.verbose => {
                    eprintln!("\nRun with --verbose for more details.");
                }
                _ => {}
            }
            if let Some(hint) = e.hint() {
                eprintln!("\n💡 {}", hint);
            }
        }
        result
    }
}
