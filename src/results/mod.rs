//! Report rendering module
//!
//! Renders the sanity report as JSON and as a standalone HTML page.

mod report;

pub use report::{ReportFormat, ReportGenerator};
