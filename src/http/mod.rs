//! HTTP client module for gateway probes
//!
//! Provides the POST wrapper the protocol probes send their requests through.

mod client;

pub use client::{join_url, HttpClient, DEFAULT_TIMEOUT_SECS};
