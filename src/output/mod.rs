//! Console output module
//!
//! Prints a short per-probe summary after the run.

mod formatter;

pub use formatter::ResultFormatter;
