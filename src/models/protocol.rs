//! Protocols exercised against the gateway
//!
//! Each protocol owns its display name, endpoint path and message label.

use std::fmt;

use crate::http::join_url;

/// The three protocol surfaces of the gateway
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    Rest,
    Soap,
    GraphQl,
}

impl Protocol {
    /// Display name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::Rest => "REST",
            Protocol::Soap => "SOAP",
            Protocol::GraphQl => "GRAPHQL",
        }
    }

    /// Prefix for assertion messages
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Rest => "REST",
            Protocol::Soap => "SOAP",
            Protocol::GraphQl => "GraphQL",
        }
    }

    /// Endpoint path relative to the gateway base URL
    pub fn path(&self) -> &'static str {
        match self {
            Protocol::Rest => "/api/rest/echo",
            Protocol::Soap => "/ws",
            Protocol::GraphQl => "/graphql",
        }
    }

    /// Full endpoint URL for a gateway
    pub fn url(&self, gateway_url: &str) -> String {
        join_url(gateway_url, self.path())
    }

    /// All protocols in execution order
    pub fn all() -> Vec<Protocol> {
        vec![Protocol::Rest, Protocol::Soap, Protocol::GraphQl]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rest" => Some(Protocol::Rest),
            "soap" => Some(Protocol::Soap),
            "graphql" | "gql" => Some(Protocol::GraphQl),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
