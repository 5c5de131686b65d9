//! GraphQL probe: `POST /graphql` with a `process` query

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::assertions::{expect_status, AssertionFailure, IdentityEcho};
use super::json_headers;
use crate::http::HttpClient;
use crate::models::{ProbeResult, Protocol};

const PROTOCOL: Protocol = Protocol::GraphQl;

pub const PROCESS_QUERY: &str = r#"{ process(type: "GRAPHQL", message: "hello-graphql", amount: 456.0) {
    computedOutput
    clientCertificateSubject
    clientCertificateSerial
    receivedClientSubject
    receivedClientSerial
  } }"#;

#[derive(Clone, Debug)]
pub struct GraphqlProbe {
    pub url: String,
}

impl GraphqlProbe {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            url: PROTOCOL.url(gateway_url),
        }
    }

    pub fn request_body() -> Value {
        json!({ "query": PROCESS_QUERY })
    }

    pub async fn run(&self, client: &HttpClient) -> Result<ProbeResult> {
        info!("POST {}", self.url);
        let label = PROTOCOL.label();

        let body = serde_json::to_vec(&Self::request_body())?;
        let response = client
            .post(&self.url, body, json_headers())
            .await
            .with_context(|| format!("{label} request to {} failed", self.url))?;

        if !response.is_success() {
            debug!("{label} error body: {}", response.text());
        }
        expect_status(label, response.status_code)?;

        let data: Value = serde_json::from_slice(&response.body)
            .with_context(|| format!("{label} response is not valid JSON"))?;

        let process = process_payload(&data)?;
        let echo = IdentityEcho::from_json(process, label)?;
        echo.verify(label)?;

        Ok(ProbeResult::pass(
            PROTOCOL,
            &self.url,
            response.status_code,
            data,
        ))
    }
}

/// Locate `data.process`, surfacing the first GraphQL error when it is absent
fn process_payload(data: &Value) -> Result<&Value, AssertionFailure> {
    match data.pointer("/data/process") {
        Some(process) if !process.is_null() => Ok(process),
        _ => {
            let first_error = data
                .get("errors")
                .and_then(Value::as_array)
                .and_then(|errors| errors.first())
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str);

            Err(match first_error {
                Some(message) => AssertionFailure::GraphqlErrors(message.to_string()),
                None => AssertionFailure::MissingField {
                    label: PROTOCOL.label(),
                    field: "data.process",
                },
            })
        }
    }
}
