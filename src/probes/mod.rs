//! Protocol probes for the gateway
//!
//! Each probe sends one request through the gateway and checks that the
//! client certificate identity survived the round trip to the backend.
//!
//! ## Probes
//!
//! - REST: `POST /api/rest/echo`
//! - SOAP: `POST /ws`
//! - GraphQL: `POST /graphql`

mod assertions;
mod graphql;
mod rest;
mod soap;

#[cfg(test)]
pub(crate) mod mock_gateway;

pub use graphql::GraphqlProbe;
pub use rest::RestProbe;
pub use soap::SoapProbe;

use std::collections::HashMap;

use crate::http::HttpClient;
use crate::models::{ProbeResult, Protocol};
use anyhow::Result;

/// Run the probe for one protocol
pub async fn run_probe(
    protocol: Protocol,
    gateway_url: &str,
    client: &HttpClient,
) -> Result<ProbeResult> {
    match protocol {
        Protocol::Rest => RestProbe::new(gateway_url).run(client).await,
        Protocol::Soap => SoapProbe::new(gateway_url).run(client).await,
        Protocol::GraphQl => GraphqlProbe::new(gateway_url).run(client).await,
    }
}

fn json_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers
}
