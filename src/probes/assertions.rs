//! Checks shared by every protocol probe
//!
//! The gateway echoes back the client certificate identity it received from
//! the TLS edge alongside the identity the backend saw. Both must match.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Status every probe expects from the gateway
pub const EXPECTED_STATUS: u16 = 200;

/// Marker the backend puts in its computed output
pub const PROCESSED_MARKER: &str = "processed(";

/// A deliberate check that did not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionFailure {
    #[error("{label} status expected {expected}, got {actual}")]
    UnexpectedStatus {
        label: &'static str,
        expected: u16,
        actual: u16,
    },

    #[error("{label} response missing {field}")]
    MissingField {
        label: &'static str,
        field: &'static str,
    },

    #[error("GraphQL response missing data.process: {0}")]
    GraphqlErrors(String),

    #[error("{label} missing {element}")]
    MissingElement {
        label: &'static str,
        element: &'static str,
    },

    #[error("{label} computedOutput does not look like backend output")]
    UnprocessedOutput { label: &'static str },

    #[error("{label} missing {field}")]
    EmptyIdentity {
        label: &'static str,
        field: &'static str,
    },

    #[error("{label} {received} != {sent} (mTLS header chain broken)")]
    IdentityMismatch {
        label: &'static str,
        received: &'static str,
        sent: &'static str,
    },
}

pub fn expect_status(label: &'static str, actual: u16) -> Result<(), AssertionFailure> {
    if actual == EXPECTED_STATUS {
        Ok(())
    } else {
        Err(AssertionFailure::UnexpectedStatus {
            label,
            expected: EXPECTED_STATUS,
            actual,
        })
    }
}

/// The five identity fields echoed by the gateway
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityEcho {
    pub computed_output: String,
    pub client_certificate_subject: String,
    pub client_certificate_serial: String,
    pub received_client_subject: String,
    pub received_client_serial: String,
    /// Exact received==sent comparison of the original JSON values, when parsed from JSON
    #[serde(skip)]
    pub(super) json_match: Option<EchoMatch>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct EchoMatch {
    subject: bool,
    serial: bool,
}

impl IdentityEcho {
    /// Read the fields from a JSON object; only `computedOutput` is mandatory
    pub fn from_json(value: &Value, label: &'static str) -> Result<Self, AssertionFailure> {
        let computed_output = value
            .get("computedOutput")
            .and_then(Value::as_str)
            .ok_or(AssertionFailure::MissingField {
                label,
                field: "computedOutput",
            })?;

        Ok(Self {
            computed_output: computed_output.to_string(),
            client_certificate_subject: field_text(value, "clientCertificateSubject"),
            client_certificate_serial: field_text(value, "clientCertificateSerial"),
            received_client_subject: field_text(value, "receivedClientSubject"),
            received_client_serial: field_text(value, "receivedClientSerial"),
            json_match: Some(EchoMatch {
                subject: value.get("receivedClientSubject")
                    == value.get("clientCertificateSubject"),
                serial: value.get("receivedClientSerial") == value.get("clientCertificateSerial"),
            }),
        })
    }

    fn subject_matches(&self) -> bool {
        match self.json_match {
            Some(m) => m.subject,
            None => self.received_client_subject == self.client_certificate_subject,
        }
    }

    fn serial_matches(&self) -> bool {
        match self.json_match {
            Some(m) => m.serial,
            None => self.received_client_serial == self.client_certificate_serial,
        }
    }

    /// Run the identity checks in order, stopping at the first failure
    pub fn verify(&self, label: &'static str) -> Result<(), AssertionFailure> {
        if !self.computed_output.contains(PROCESSED_MARKER) {
            return Err(AssertionFailure::UnprocessedOutput { label });
        }
        if self.client_certificate_subject.is_empty() {
            return Err(AssertionFailure::EmptyIdentity {
                label,
                field: "clientCertificateSubject",
            });
        }
        if self.client_certificate_serial.is_empty() {
            return Err(AssertionFailure::EmptyIdentity {
                label,
                field: "clientCertificateSerial",
            });
        }
        if !self.subject_matches() {
            return Err(AssertionFailure::IdentityMismatch {
                label,
                received: "receivedClientSubject",
                sent: "clientCertificateSubject",
            });
        }
        if !self.serial_matches() {
            return Err(AssertionFailure::IdentityMismatch {
                label,
                received: "receivedClientSerial",
                sent: "clientCertificateSerial",
            });
        }
        Ok(())
    }
}

// Strings pass through, numbers are rendered, anything else counts as absent.
fn field_text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
