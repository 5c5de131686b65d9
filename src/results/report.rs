//! Report generation for sanity runs
//!
//! Generate the JSON and HTML renderings of a `SanityReport`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use tracing::info;

use crate::models::{ProbeResult, SanityReport};

/// Longest detail cell rendered in the HTML report, in characters
pub const MAX_DETAIL_CHARS: usize = 4000;

/// Report output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Html,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ReportFormat::Json => "JSON",
            ReportFormat::Html => "HTML",
        }
    }
}

/// Report generator
pub struct ReportGenerator;

impl ReportGenerator {
    /// Render a report in the requested format
    pub fn render(report: &SanityReport, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report")
            }
            ReportFormat::Html => Ok(Self::format_html_report(report)),
        }
    }

    /// Render and write a report, creating parent directories as needed
    pub fn write(report: &SanityReport, format: ReportFormat, path: &Path) -> Result<()> {
        let content = Self::render(report, format)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content).with_context(|| {
            format!(
                "Failed to write {} report to {}",
                format.name(),
                path.display()
            )
        })?;

        info!("{} report saved to {}", format.name(), path.display());
        Ok(())
    }

    fn format_html_report(report: &SanityReport) -> String {
        let mut rows = String::new();
        for test in &report.tests {
            Self::format_html_row(&mut rows, test);
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sanity Report</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 24px; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ border: 1px solid #ddd; padding: 8px; vertical-align: top; text-align: left; }}
        th {{ background: #f5f5f5; }}
        code {{ background: #f0f0f0; padding: 2px 4px; }}
        pre {{ white-space: pre-wrap; margin: 0; }}
        .pass {{ color: #28a745; font-weight: bold; }}
        .fail {{ color: #dc3545; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Sanity Report</h1>
    <p><b>Generated:</b> {}</p>
    <p><b>Gateway:</b> <code>{}</code></p>
    <table>
        <thead>
            <tr><th>Test</th><th>Result</th><th>HTTP</th><th>URL</th><th>Details</th></tr>
        </thead>
        <tbody>
{}        </tbody>
    </table>
</body>
</html>
"#,
            html_escape(
                &report
                    .generated_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true)
            ),
            html_escape(&report.gateway_url),
            rows
        )
    }

    fn format_html_row(output: &mut String, test: &ProbeResult) {
        let (class, verdict) = if test.ok {
            ("pass", "PASS")
        } else {
            ("fail", "FAIL")
        };
        let status = test
            .http_status
            .map(|s| s.to_string())
            .unwrap_or_default();
        let detail = serde_json::to_string_pretty(&test.detail()).unwrap_or_default();

        writeln!(
            output,
            r#"            <tr><td>{}</td><td class="{}">{}</td><td>{}</td><td><code>{}</code></td><td><pre>{}</pre></td></tr>"#,
            html_escape(&test.name),
            class,
            verdict,
            status,
            html_escape(&test.url),
            html_escape(&truncate_chars(&detail, MAX_DETAIL_CHARS))
        )
        .unwrap();
    }
}

/// Escape text for interpolation into HTML
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Keep at most `max_chars` characters
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Protocol;
    use serde_json::{json, Value};

    fn sample_report() -> SanityReport {
        let err = anyhow::anyhow!("SOAP status expected 200, got 500");
        SanityReport::new(
            "https://gateway.local:8443",
            vec![
                ProbeResult::pass(
                    Protocol::Rest,
                    "https://gateway.local:8443/api/rest/echo",
                    200,
                    json!({"computedOutput": "processed(hello-rest)"}),
                ),
                ProbeResult::fail(Protocol::Soap, "https://gateway.local:8443/ws", &err),
            ],
        )
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
    }

    #[test]
    fn test_json_report_round_trips() {
        let json = ReportGenerator::render(&sample_report(), ReportFormat::Json).unwrap();
        assert!(json.contains("\n  \"generatedAt\""));

        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["gatewayUrl"], "https://gateway.local:8443");
        assert_eq!(parsed["tests"][0]["ok"], true);
        assert_eq!(parsed["tests"][1]["ok"], false);
        assert_eq!(
            parsed["tests"][1]["error"]["message"],
            "SOAP status expected 200, got 500"
        );
    }

    #[test]
    fn test_html_report_rows() {
        let html = ReportGenerator::render(&sample_report(), ReportFormat::Html).unwrap();

        assert!(html.contains("<title>Sanity Report</title>"));
        assert!(html.contains(r#"<td class="pass">PASS</td><td>200</td>"#));
        assert!(html.contains(r#"<td class="fail">FAIL</td><td></td>"#));
        assert!(html.contains("<code>https://gateway.local:8443/ws</code>"));
        assert!(html.contains("processed(hello-rest)"));
    }

    #[test]
    fn test_html_escapes_response_content() {
        let report = SanityReport::new(
            "http://gw/?a=1&b=<2>",
            vec![ProbeResult::pass(
                Protocol::Rest,
                "http://gw/api/rest/echo",
                200,
                json!({"computedOutput": "<script>alert('x')</script>"}),
            )],
        );
        let html = ReportGenerator::render(&report, ReportFormat::Html).unwrap();

        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("http://gw/?a=1&amp;b=&lt;2&gt;"));
    }

    #[test]
    fn test_html_detail_truncated() {
        let report = SanityReport::new(
            "http://gw",
            vec![ProbeResult::pass(
                Protocol::Rest,
                "http://gw/api/rest/echo",
                200,
                json!({"computedOutput": "x".repeat(10_000)}),
            )],
        );
        let html = ReportGenerator::render(&report, ReportFormat::Html).unwrap();

        let start = html.find("<pre>").unwrap() + "<pre>".len();
        let end = html.find("</pre>").unwrap();
        let cell = html[start..end].replace("&quot;", "\"");
        assert_eq!(cell.chars().count(), MAX_DETAIL_CHARS);
        assert!(cell.starts_with("{\n  \"computedOutput\""));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("reports/sanity-report.json");
        let html_path = dir.path().join("reports/sanity-report.html");

        let report = sample_report();
        ReportGenerator::write(&report, ReportFormat::Json, &json_path).unwrap();
        ReportGenerator::write(&report, ReportFormat::Html, &html_path).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["tests"].as_array().unwrap().len(), 2);
        assert!(std::fs::read_to_string(&html_path)
            .unwrap()
            .contains("Sanity Report"));
    }
}
