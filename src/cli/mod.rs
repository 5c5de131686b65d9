//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::Parser;
use std::path::PathBuf;

/// End-to-end mTLS identity sanity checks for a multi-protocol API gateway
#[derive(Parser, Debug)]
#[command(name = "gateway-sanity")]
#[command(version)]
#[command(about = "Run REST, SOAP and GraphQL sanity probes against an API gateway")]
#[command(long_about = None)]
pub struct Args {
    /// Gateway base URL, e.g. https://gateway.local:8443
    #[arg(long)]
    pub gateway_url: String,

    /// Path of the JSON report
    #[arg(long)]
    pub out_json: PathBuf,

    /// Path of the HTML report
    #[arg(long)]
    pub out_html: PathBuf,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Accept an untrusted gateway server certificate
    #[arg(long)]
    pub insecure: bool,

    /// Only run the given protocol (rest, soap, graphql); repeatable
    #[arg(long = "only", value_name = "PROTOCOL")]
    pub only: Vec<String>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
