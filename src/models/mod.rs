//! Data models for gateway sanity checks
//!
//! Protocols under test, per-probe results and the aggregate report.

mod protocol;
mod report;

pub use protocol::Protocol;
pub use report::{ProbeResult, SanityReport};
