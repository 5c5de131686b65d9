//! SOAP probe: `POST /ws` with a `ProcessRequest` envelope

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::collections::HashMap;
use tracing::{debug, info};

use super::assertions::{expect_status, AssertionFailure, IdentityEcho};
use crate::http::HttpClient;
use crate::models::{ProbeResult, Protocol};

const PROTOCOL: Protocol = Protocol::Soap;

/// Namespace of the process request/response schema
pub const PROCESS_NS: &str = "http://demo.netflixoss.com/userbff/process";

pub const PROCESS_ENVELOPE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
                  xmlns:pr="http://demo.netflixoss.com/userbff/process">
  <soapenv:Header/>
  <soapenv:Body>
    <pr:ProcessRequest>
      <pr:type>SOAP</pr:type>
      <pr:message>hello-soap</pr:message>
      <pr:amount>789.0</pr:amount>
    </pr:ProcessRequest>
  </soapenv:Body>
</soapenv:Envelope>
"#;

const IDENTITY_FIELDS: [&str; 5] = [
    "computedOutput",
    "clientCertificateSubject",
    "clientCertificateSerial",
    "receivedClientSubject",
    "receivedClientSerial",
];

#[derive(Clone, Debug)]
pub struct SoapProbe {
    pub url: String,
}

impl SoapProbe {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            url: PROTOCOL.url(gateway_url),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<ProbeResult> {
        info!("POST {}", self.url);
        let label = PROTOCOL.label();

        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "text/xml; charset=utf-8".to_string(),
        );
        headers.insert("Accept".to_string(), "text/xml".to_string());

        let response = client
            .post(&self.url, PROCESS_ENVELOPE.as_bytes().to_vec(), headers)
            .await
            .with_context(|| format!("{label} request to {} failed", self.url))?;

        if !response.is_success() {
            debug!("{label} error body: {}", response.text());
        }
        expect_status(label, response.status_code)?;

        if let Some(content_type) = response.get_header("content-type") {
            debug!("{label} response content type: {content_type}");
        }
        let raw = String::from_utf8(response.body)
            .with_context(|| format!("{label} response is not valid UTF-8"))?;

        let echo = parse_process_response(&raw)?.ok_or(AssertionFailure::MissingElement {
            label,
            element: "ProcessResponse",
        })?;
        echo.verify(label)?;

        let fields = serde_json::to_value(&echo)?;
        Ok(ProbeResult::pass(PROTOCOL, &self.url, response.status_code, fields).with_raw_xml(raw))
    }
}

/// Extract the identity fields of the first `ProcessResponse` element
///
/// Returns `None` when the document has no such element. Only direct children
/// in the process namespace count; absent children read as empty strings.
pub fn parse_process_response(xml: &str) -> Result<Option<IdentityEcho>> {
    let mut reader = NsReader::from_str(xml);
    let mut depth = 0usize;
    let mut response_depth: Option<usize> = None;
    let mut current: Option<&'static str> = None;
    let mut fields: HashMap<&'static str, String> = HashMap::new();

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .context("SOAP response is not well-formed XML")?;
        let in_process_ns =
            matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == PROCESS_NS.as_bytes());

        match event {
            Event::Start(e) => {
                depth += 1;
                match response_depth {
                    None if in_process_ns && e.local_name().as_ref() == b"ProcessResponse" => {
                        response_depth = Some(depth);
                    }
                    Some(d) if depth == d + 1 && in_process_ns => {
                        current = identity_field(e.local_name().as_ref())
                            .filter(|name| !fields.contains_key(name));
                        if let Some(name) = current {
                            fields.insert(name, String::new());
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => match response_depth {
                None if in_process_ns && e.local_name().as_ref() == b"ProcessResponse" => {
                    return Ok(Some(IdentityEcho::default()));
                }
                Some(d) if depth == d && in_process_ns => {
                    if let Some(name) = identity_field(e.local_name().as_ref()) {
                        fields.entry(name).or_default();
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if let (Some(name), Some(d)) = (current, response_depth) {
                    if depth == d + 1 {
                        let text = t.unescape().context("invalid escape in SOAP response")?;
                        fields.entry(name).or_default().push_str(&text);
                    }
                }
            }
            Event::CData(c) => {
                if let (Some(name), Some(d)) = (current, response_depth) {
                    if depth == d + 1 {
                        fields
                            .entry(name)
                            .or_default()
                            .push_str(&String::from_utf8_lossy(&c));
                    }
                }
            }
            Event::End(_) => {
                if response_depth == Some(depth) {
                    return Ok(Some(echo_from_fields(fields)));
                }
                if response_depth.map(|d| depth == d + 1).unwrap_or(false) {
                    current = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if response_depth.is_some() {
        bail!("SOAP response ended inside ProcessResponse");
    }
    Ok(None)
}

fn identity_field(local_name: &[u8]) -> Option<&'static str> {
    IDENTITY_FIELDS
        .iter()
        .copied()
        .find(|field| field.as_bytes() == local_name)
}

fn echo_from_fields(mut fields: HashMap<&'static str, String>) -> IdentityEcho {
    let mut take = |name: &str| fields.remove(name).unwrap_or_default();
    IdentityEcho {
        computed_output: take("computedOutput"),
        client_certificate_subject: take("clientCertificateSubject"),
        client_certificate_serial: take("clientCertificateSerial"),
        received_client_subject: take("receivedClientSubject"),
        received_client_serial: take("receivedClientSerial"),
        json_match: None,
    }
}
