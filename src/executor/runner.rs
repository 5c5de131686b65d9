//! Sanity run assembler
//!
//! A failing probe never stops the ones after it.

use anyhow::Result;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::http::HttpClient;
use crate::models::{ProbeResult, Protocol, SanityReport};
use crate::probes;
use crate::utils::timer::Timer;

/// Runs the selected probes against one gateway
pub struct SanityRunner {
    client: HttpClient,
    protocols: Vec<Protocol>,
}

impl SanityRunner {
    /// Create a runner for all protocols
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = HttpClient::with_timeout(config.timeout_secs, config.insecure)?;
        Ok(Self {
            client,
            protocols: Protocol::all(),
        })
    }

    /// Restrict the run to a subset; execution order stays fixed
    pub fn with_protocols(mut self, selected: &[Protocol]) -> Self {
        if !selected.is_empty() {
            self.protocols = Protocol::all()
                .into_iter()
                .filter(|p| selected.contains(p))
                .collect();
        }
        self
    }

    #[cfg(test)]
    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    /// Run one probe, turning any error into a failing result
    pub async fn run_probe(&self, protocol: Protocol, gateway_url: &str) -> ProbeResult {
        info!("Running {} probe", protocol);
        let timer = Timer::start(protocol.name());

        let result = match probes::run_probe(protocol, gateway_url, &self.client).await {
            Ok(result) => result,
            Err(e) => {
                error!("{} probe failed: {:#}", protocol, e);
                ProbeResult::fail(protocol, protocol.url(gateway_url), &e)
            }
        };

        let result = result.with_duration(timer.stop().as_millis() as u64);
        info!("  {}", result);
        result
    }

    /// Run every selected probe in order
    pub async fn run_all(&self, gateway_url: &str) -> SanityReport {
        info!(
            "Starting sanity run against {} (timeout {}s)",
            gateway_url,
            self.client.timeout_secs()
        );

        let mut results = Vec::with_capacity(self.protocols.len());
        for protocol in &self.protocols {
            results.push(self.run_probe(*protocol, gateway_url).await);
        }

        let report = SanityReport::new(gateway_url, results);
        info!(
            "Sanity run completed - Pass: {}/{}",
            report.passed(),
            report.tests.len()
        );
        report
    }
}
