use log::info;
use std::sync::Arc;

use crate::amendment::Amender;
use crate::api::NlicClient;
use crate::cli::args::AmendArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::progress::{messages, ProgressManager, TaskProgress};

/// Execute amend command
pub async fn execute(args: AmendArgs, format: OutputFormat, quiet: bool, verbose: bool) -> Result<()> {
    let progress_manager = Arc::new(ProgressManager::new(quiet, verbose));

    let config = Config::load()?;
    let client = NlicClient::new(config.client_config()?)?;
    let concurrency = args.concurrency.unwrap_or_else(|| config.concurrency());
    info!("Generating amendments with concurrency {}", concurrency);

    let progress = TaskProgress::new(
        progress_manager.clone(),
        &messages::generating_amendments(&args.find, &args.replace),
    );
    let report = Amender::new(&client)
        .with_concurrency(concurrency)
        .report(&args.find, &args.replace)
        .await;
    progress.finish_and_clear();
    let report = report?;
    progress_manager.show_message(&messages::statutes_matched(
        report.sentences.len(),
        report.statutes_searched,
    ));

    let output = output::format_amendment_report(&report, format)?;
    println!("{}", output);

    Ok(())
}
