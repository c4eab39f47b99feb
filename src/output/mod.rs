pub mod formatter;

pub use formatter::Formatter;

use crate::amendment::AmendmentReport;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::search::StatuteExcerpts;

/// Format an amendment report based on the specified format
pub fn format_amendment_report(report: &AmendmentReport, format: OutputFormat) -> Result<String> {
    Formatter::new(format).format_amendment(report)
}

/// Format keyword search results based on the specified format
pub fn format_search_results(
    query: &str,
    results: &[StatuteExcerpts],
    format: OutputFormat,
) -> Result<String> {
    Formatter::new(format).format_search(query, results)
}
