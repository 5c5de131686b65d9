//! Console formatter for sanity results

use std::fmt::Write as _;

use crate::models::{ProbeResult, SanityReport};

/// Result formatter
pub struct ResultFormatter {
    colorize: bool,
}

impl ResultFormatter {
    pub fn new() -> Self {
        Self { colorize: true }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single probe result
    pub fn format_result(&self, result: &ProbeResult) -> String {
        let status_str = match (result.ok, self.colorize) {
            (true, true) => "\x1b[32m✓ PASS\x1b[0m",
            (false, true) => "\x1b[31m✗ FAIL\x1b[0m",
            (true, false) => "✓ PASS",
            (false, false) => "✗ FAIL",
        };
        let http = result
            .http_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut line = format!(
            "{:8} {} HTTP {:>3} [{:>6}ms] {}",
            result.name, status_str, http, result.duration_ms, result.url
        );
        if let Some(error) = &result.error {
            write!(line, "\n         {}", error.message).unwrap();
        }
        line
    }

    /// Format the whole report
    pub fn format_report(&self, report: &SanityReport) -> String {
        let mut output = String::new();
        writeln!(output, "Sanity checks - {}", report.gateway_url).unwrap();
        writeln!(output, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━").unwrap();
        for result in &report.tests {
            writeln!(output, "  {}", self.format_result(result)).unwrap();
        }
        writeln!(output, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━").unwrap();
        write!(
            output,
            "Total: {} | Pass: {} | Fail: {}",
            report.tests.len(),
            report.passed(),
            report.failed()
        )
        .unwrap();
        output
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Protocol;
    use serde_json::json;

    #[test]
    fn test_format_result_plain() {
        let result = ProbeResult::pass(Protocol::Rest, "http://gw/api/rest/echo", 200, json!({}))
            .with_duration(12);
        let line = ResultFormatter::new().no_color().format_result(&result);

        assert!(line.starts_with("REST     ✓ PASS HTTP 200"));
        assert!(line.contains("12ms"));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_format_failure_includes_message() {
        let err = anyhow::anyhow!("GraphQL status expected 200, got 404");
        let result = ProbeResult::fail(Protocol::GraphQl, "http://gw/graphql", &err);
        let line = ResultFormatter::new().format_result(&result);

        assert!(line.contains("\x1b[31m✗ FAIL\x1b[0m"));
        assert!(line.contains("HTTP   -"));
        assert!(line.contains("GraphQL status expected 200, got 404"));
    }

    #[test]
    fn test_format_report_totals() {
        let err = anyhow::anyhow!("boom");
        let report = SanityReport::new(
            "http://gw",
            vec![
                ProbeResult::pass(Protocol::Rest, "u", 200, json!({})),
                ProbeResult::fail(Protocol::Soap, "u", &err),
            ],
        );
        let text = ResultFormatter::new().no_color().format_report(&report);
        assert!(text.ends_with("Total: 2 | Pass: 1 | Fail: 1"));
    }
}
