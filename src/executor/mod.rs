//! Probe execution engine
//!
//! Runs the protocol probes one after another and assembles the report.

mod runner;

pub use runner::SanityRunner;
