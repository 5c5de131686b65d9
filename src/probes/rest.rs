//! REST probe: `POST /api/rest/echo`

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::assertions::{expect_status, IdentityEcho};
use super::json_headers;
use crate::http::HttpClient;
use crate::models::{ProbeResult, Protocol};

const PROTOCOL: Protocol = Protocol::Rest;

#[derive(Clone, Debug)]
pub struct RestProbe {
    pub url: String,
}

impl RestProbe {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            url: PROTOCOL.url(gateway_url),
        }
    }

    pub fn request_body() -> Value {
        json!({"type": "REST", "message": "hello-rest", "amount": 123.0})
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

        let echo = IdentityEcho::from_json(&data, label)?;
        echo.verify(label)?;

        Ok(ProbeResult::pass(
            PROTOCOL,
            &self.url,
            response.status_code,
            data,
        ))
    }
}
