//! Probe results and the sanity report
//!
//! These are serialized verbatim into the JSON report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::Protocol;

/// Failure details for a probe that did not pass
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeError {
    pub message: String,
    pub trace: String,
}

impl ProbeError {
    /// Capture the message and the full cause chain of an error
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            message: format!("{err:#}"),
            trace: format!("{err:?}"),
        }
    }
}

/// Outcome of a single protocol probe
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub name: String,
    pub ok: bool,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, rename = "rawXml", skip_serializing_if = "Option::is_none")]
    pub raw_xml: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProbeError>,
}

impl ProbeResult {
    pub fn pass(protocol: Protocol, url: impl Into<String>, status: u16, response: Value) -> Self {
        Self {
            name: protocol.name().to_string(),
            ok: true,
            url: url.into(),
            http_status: Some(status),
            duration_ms: 0,
            response: Some(response),
            raw_xml: None,
            error: None,
        }
    }

    pub fn fail(protocol: Protocol, url: impl Into<String>, err: &anyhow::Error) -> Self {
        Self {
            name: protocol.name().to_string(),
            ok: false,
            url: url.into(),
            http_status: None,
            duration_ms: 0,
            response: None,
            raw_xml: None,
            error: Some(ProbeError::from_error(err)),
        }
    }

    pub fn with_raw_xml(mut self, raw: impl Into<String>) -> Self {
        self.raw_xml = Some(raw.into());
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Payload shown in report detail cells: the error when failed, else the response
    pub fn detail(&self) -> Value {
        match (&self.error, &self.response) {
            (Some(error), _) => serde_json::to_value(error).unwrap_or(Value::Null),
            (None, Some(response)) => response.clone(),
            (None, None) => Value::Null,
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.ok { "PASS" } else { "FAIL" };
        write!(f, "{} {} [{}ms]", self.name, verdict, self.duration_ms)?;
        if let Some(error) = &self.error {
            write!(f, " - {}", error.message)?;
        }
        Ok(())
    }
}

/// Aggregate result of one sanity run
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanityReport {
    pub generated_at: DateTime<Utc>,
    pub gateway_url: String,
    pub tests: Vec<ProbeResult>,
}

impl SanityReport {
    pub fn new(gateway_url: impl Into<String>, tests: Vec<ProbeResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            gateway_url: gateway_url.into(),
            tests,
        }
    }

    pub fn passed(&self) -> usize {
        self.tests.iter().filter(|t| t.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.tests.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.tests.iter().all(|t| t.ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pass_result_serialization() {
        let result = ProbeResult::pass(
            Protocol::Rest,
            "http://gw/api/rest/echo",
            200,
            json!({"computedOutput": "processed(x)"}),
        );
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["name"], "REST");
        assert_eq!(value["ok"], true);
        assert_eq!(value["httpStatus"], 200);
        assert_eq!(value["response"]["computedOutput"], "processed(x)");
        assert!(value.get("error").is_none());
        assert!(value.get("rawXml").is_none());
    }

    #[test]
    fn test_fail_result_carries_error() {
        let err = anyhow::anyhow!("connection refused").context("SOAP request failed");
        let result = ProbeResult::fail(Protocol::Soap, "http://gw/ws", &err);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["ok"], false);
        assert!(value.get("response").is_none());
        assert!(value.get("httpStatus").is_none());
        assert_eq!(
            value["error"]["message"],
            "SOAP request failed: connection refused"
        );
        assert!(value["error"]["trace"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
    }

    #[test]
    fn test_detail_prefers_error() {
        let err = anyhow::anyhow!("boom");
        let failed = ProbeResult::fail(Protocol::GraphQl, "http://gw/graphql", &err);
        assert_eq!(failed.detail()["message"], "boom");

        let passed = ProbeResult::pass(Protocol::Rest, "u", 200, json!({"a": 1}));
        assert_eq!(passed.detail(), json!({"a": 1}));
    }

    #[test]
    fn test_report_counts() {
        let err = anyhow::anyhow!("boom");
        let report = SanityReport::new(
            "http://gw",
            vec![
                ProbeResult::pass(Protocol::Rest, "u", 200, json!({})),
                ProbeResult::fail(Protocol::Soap, "u", &err),
                ProbeResult::pass(Protocol::GraphQl, "u", 200, json!({})),
            ],
        );

        assert_eq!(report.passed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["gatewayUrl"], "http://gw");
        assert!(value["generatedAt"].as_str().unwrap().ends_with('Z'));
        assert_eq!(value["tests"].as_array().unwrap().len(), 3);
    }
}
