use colored::*;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::amendment::AmendmentReport;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::search::{escape_html, unescape_html, StatuteExcerpts, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};

pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format an amendment report
    pub fn format_amendment(&self, report: &AmendmentReport) -> Result<String> {
        match self.format {
            OutputFormat::Text => self.format_amendment_text(report),
            OutputFormat::Json => self.format_amendment_json(report),
            OutputFormat::Html => self.format_amendment_html(report),
        }
    }

    /// Format keyword search results
    pub fn format_search(&self, query: &str, results: &[StatuteExcerpts]) -> Result<String> {
        match self.format {
            OutputFormat::Text => self.format_search_text(query, results),
            OutputFormat::Json => self.format_search_json(results),
            OutputFormat::Html => self.format_search_html(results),
        }
    }

    // Text formatting methods
    fn format_amendment_text(&self, report: &AmendmentReport) -> Result<String> {
        let mut result = String::new();

        result.push_str(&format!(
            "\n{} '{}' → '{}' | 검색 법령: {} | 개정 대상: {}\n\n",
            "📝".cyan(),
            report.find_word.bold(),
            report.replace_word.bold(),
            report.statutes_searched.to_string().yellow(),
            report.sentences.len().to_string().yellow()
        ));

        if report.sentences.is_empty() {
            result.push_str(&report.to_lines().join("\n"));
            result.push('\n');
            return Ok(result);
        }

        for sentence in &report.sentences {
            result.push_str(&sentence.header.bold().to_string());
            result.push('\n');
            for line in &sentence.clause_lines {
                result.push_str(line);
                result.push('\n');
            }
            result.push('\n');
        }

        Ok(result)
    }

    fn format_search_text(&self, query: &str, results: &[StatuteExcerpts]) -> Result<String> {
        let mut result = String::new();

        result.push_str(&format!(
            "\n{} '{}' | 검색된 법령: {}\n\n",
            "🔎".cyan(),
            query.bold(),
            results.len().to_string().yellow()
        ));

        if results.is_empty() {
            result.push_str("검색 결과가 없습니다.\n");
            return Ok(result);
        }

        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("번호").fg(Color::Cyan),
            Cell::new("법령명").fg(Color::Cyan),
            Cell::new("해당 조문").fg(Color::Cyan),
        ]);
        for (idx, statute) in results.iter().enumerate() {
            table.add_row(vec![
                Cell::new((idx + 1).to_string()),
                Cell::new(&statute.statute_name),
                Cell::new(statute.excerpts.len().to_string()).set_alignment(CellAlignment::Right),
            ]);
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);
        result.push_str(&table.to_string());
        result.push_str("\n\n");

        for statute in results {
            result.push_str(&format!("{} {}\n", "📜".cyan(), statute.statute_name.bold()));
            result.push_str(&"-".repeat(60));
            result.push('\n');
            for excerpt in &statute.excerpts {
                result.push_str(&html_to_terminal(excerpt));
                result.push_str("\n\n");
            }
        }

        Ok(result)
    }

    // JSON formatting methods
    fn format_amendment_json(&self, report: &AmendmentReport) -> Result<String> {
        let json = serde_json::json!({
            "find_word": report.find_word,
            "replace_word": report.replace_word,
            "statutes_searched": report.statutes_searched,
            "generated_at": report.generated_at,
            "sentences": report.sentences,
            "lines": report.to_lines(),
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_search_json(&self, results: &[StatuteExcerpts]) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }

    // HTML formatting methods
    fn format_amendment_html(&self, report: &AmendmentReport) -> Result<String> {
        let blocks: Vec<String> = report
            .to_lines()
            .iter()
            .map(|block| {
                block
                    .lines()
                    .map(escape_html)
                    .collect::<Vec<_>>()
                    .join("<br>")
            })
            .collect();
        Ok(blocks.join("<br><br>"))
    }

    fn format_search_html(&self, results: &[StatuteExcerpts]) -> Result<String> {
        let mut html = String::new();
        for statute in results {
            html.push_str(&format!("<h3>{}</h3>\n", escape_html(&statute.statute_name)));
            for excerpt in &statute.excerpts {
                html.push_str(&format!("<p>{}</p>\n", excerpt));
            }
        }
        Ok(html)
    }
}

/// Render an excerpt's HTML markup for a terminal, highlights in red
fn html_to_terminal(excerpt: &str) -> String {
    let plain = excerpt
        .replace("<br>", "\n")
        .replace("<div style='margin:0;padding:0'>", "")
        .replace("</div>", "")
        .replace("&nbsp;", " ");

    let mut result = String::new();
    let mut rest = plain.as_str();
    while let Some(start) = rest.find(HIGHLIGHT_OPEN) {
        result.push_str(&unescape_html(&rest[..start]));
        let after = &rest[start + HIGHLIGHT_OPEN.len()..];
        match after.find(HIGHLIGHT_CLOSE) {
            Some(end) => {
                result.push_str(&unescape_html(&after[..end]).red().bold().to_string());
                rest = &after[end + HIGHLIGHT_CLOSE.len()..];
            }
            None => {
                rest = after;
                break;
            }
        }
    }
    result.push_str(&unescape_html(rest));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amendment::AmendmentSentence;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn report(sentences: Vec<AmendmentSentence>) -> AmendmentReport {
        AmendmentReport {
            find_word: "정의".to_string(),
            replace_word: "개념".to_string(),
            statutes_searched: 3,
            sentences,
            generated_at: Utc::now(),
        }
    }

    fn sentence() -> AmendmentSentence {
        AmendmentSentence {
            statute_name: "테스트법".to_string(),
            header: "① 테스트법 일부를 다음과 같이 개정한다.".to_string(),
            clause_lines: vec!["제3조 중 \"정의\"를 \"개념\"으로 한다.".to_string()],
        }
    }

    #[test]
    fn test_amendment_text_lists_header_and_clauses() {
        colored::control::set_override(false);
        let output = Formatter::new(OutputFormat::Text)
            .format_amendment(&report(vec![sentence()]))
            .unwrap();

        assert!(output.contains("검색 법령: 3 | 개정 대상: 1"));
        assert!(output.contains("① 테스트법 일부를 다음과 같이 개정한다.\n제3조 중 \"정의\"를 \"개념\"으로 한다.\n"));
    }

    #[test]
    fn test_amendment_text_without_targets_shows_sentinel() {
        colored::control::set_override(false);
        let output = Formatter::new(OutputFormat::Text)
            .format_amendment(&report(vec![]))
            .unwrap();
        assert!(output.contains("⚠️ 개정 대상 조문이 없습니다."));
    }

    #[test]
    fn test_amendment_json_includes_rendered_lines() {
        let output = Formatter::new(OutputFormat::Json)
            .format_amendment(&report(vec![sentence()]))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["statutes_searched"], 3);
        assert_eq!(value["sentences"][0]["statute_name"], "테스트법");
        assert_eq!(
            value["lines"][0],
            "① 테스트법 일부를 다음과 같이 개정한다.\n제3조 중 \"정의\"를 \"개념\"으로 한다."
        );
    }

    #[test]
    fn test_amendment_html_escapes_and_breaks_lines() {
        let output = Formatter::new(OutputFormat::Html)
            .format_amendment(&report(vec![sentence()]))
            .unwrap();
        assert_eq!(
            output,
            "① 테스트법 일부를 다음과 같이 개정한다.<br>제3조 중 &quot;정의&quot;를 &quot;개념&quot;으로 한다."
        );
    }

    #[test]
    fn test_html_to_terminal_strips_markup() {
        colored::control::set_override(false);
        let excerpt = "제2조(<span style='color:red'>정의</span>)<br>&nbsp;&nbsp;1. &lt;별표&gt;";
        assert_eq!(html_to_terminal(excerpt), "제2조(정의)\n  1. <별표>");
    }

    #[test]
    fn test_html_to_terminal_restores_quotes() {
        colored::control::set_override(false);
        let excerpt = crate::search::highlight("\"정의\"란 '용어'", "정의");
        assert_eq!(html_to_terminal(&excerpt), "\"정의\"란 '용어'");
    }

    #[test]
    fn test_search_html_keeps_excerpt_markup() {
        let results = vec![StatuteExcerpts {
            statute_name: "A&B법".to_string(),
            excerpts: vec!["<span style='color:red'>정의</span>".to_string()],
        }];
        let output = Formatter::new(OutputFormat::Html)
            .format_search("정의", &results)
            .unwrap();
        assert_eq!(
            output,
            "<h3>A&amp;B법</h3>\n<p><span style='color:red'>정의</span></p>\n"
        );
    }
}
