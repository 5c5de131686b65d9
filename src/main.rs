//! Gateway Sanity - mTLS identity round-trip checks for a multi-protocol API gateway
//!
//! Sends one REST, one SOAP and one GraphQL request through the gateway and
//! verifies that the client certificate subject and serial captured at the
//! TLS edge reach the backend unchanged.
//!
//! ## Usage
//!
//! ```bash
//! gateway-sanity \
//!     --gateway-url https://gateway.local:8443 \
//!     --out-json reports/sanity-report.json \
//!     --out-html reports/sanity-report.html
//!
//! # Only the SOAP probe, trusting a self-signed edge certificate
//! gateway-sanity --gateway-url https://localhost:8443 --insecure --only soap \
//!     --out-json r.json --out-html r.html
//! ```
//!
//! Exits with status 1 when any probe fails.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::debug;

mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod probes;
mod results;
mod utils;

use cli::Args;
use config::{AppConfig, EnvConfig};
use executor::SanityRunner;
use models::Protocol;
use output::ResultFormatter;
use results::{ReportFormat, ReportGenerator};
use utils::logger::{init_logger, LogLevel};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args, &EnvConfig::load())?;

    init_logger(LogLevel::resolve(args.verbose, &config.log_level));
    debug!("Effective configuration: {:?}", config);

    run(&args, &config).await
}

/// Run the selected probes, write both reports and map the outcome to an exit code
async fn run(args: &Args, config: &AppConfig) -> Result<ExitCode> {
    let protocols = parse_protocols(&args.only)?;
    let runner = SanityRunner::new(config)?.with_protocols(&protocols);
    let report = runner.run_all(&args.gateway_url).await;

    ReportGenerator::write(&report, ReportFormat::Json, &args.out_json)?;
    ReportGenerator::write(&report, ReportFormat::Html, &args.out_html)?;

    let formatter = if args.no_color {
        ResultFormatter::new().no_color()
    } else {
        ResultFormatter::new()
    };
    println!("{}", formatter.format_report(&report));

    let reports = format!("{} / {}", args.out_json.display(), args.out_html.display());
    if report.all_passed() {
        println!("Sanity checks PASSED. See {reports}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Sanity checks FAILED. See {reports}");
        Ok(ExitCode::FAILURE)
    }
}

/// Layer config file, environment and flags into the effective configuration
fn load_config(args: &Args, env: &EnvConfig) -> Result<AppConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| env.config_file.as_ref().map(PathBuf::from));

    let base = match path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    Ok(base.apply_env(env).apply_flags(args.timeout, args.insecure))
}

fn parse_protocols(names: &[String]) -> Result<Vec<Protocol>> {
    names
        .iter()
        .map(|name| {
            Protocol::from_str(name).ok_or_else(|| {
                anyhow!("Unknown protocol: {name} (expected rest, soap or graphql)")
            })
        })
        .collect()
}
