use std::sync::Arc;

use crate::api::NlicClient;
use crate::cli::args::SearchArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::progress::{messages, ProgressManager, TaskProgress};
use crate::search::search_keyword;

/// Execute search command
pub async fn execute(args: SearchArgs, format: OutputFormat, quiet: bool, verbose: bool) -> Result<()> {
    let progress_manager = Arc::new(ProgressManager::new(quiet, verbose));

    let config = Config::load()?;
    let client = NlicClient::new(config.client_config()?)?;

    let progress = TaskProgress::new(progress_manager, &messages::searching_statutes(&args.query));
    let results = search_keyword(&client, &args.query).await;
    progress.finish_and_clear();
    let results = results?;

    let output = output::format_search_results(args.query.trim(), &results, format)?;
    println!("{}", output);

    Ok(())
}
