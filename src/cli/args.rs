use clap::{Args, Subcommand};

/// Amendment command arguments
#[derive(Args, Debug)]
pub struct AmendArgs {
    /// Word to replace across statutes
    pub find: String,

    /// Replacement word
    pub replace: String,

    /// Statutes fetched at once (overrides law.concurrency)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

/// Keyword search command arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword to look up in statute text
    pub query: String,
}

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., law.key)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// Initialize configuration
    Init,
}
