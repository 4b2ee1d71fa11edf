//! `sbom-checkr` — check SPDX SBOM files against an organizational
//! license/provenance policy.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the YAML policy ([`policy::load_policy`]).
//! 3. Load the SPDX 2.3 JSON SBOM ([`sbom::load_sbom`]).
//! 4. Run the enabled compliance checks ([`checker::ComplianceChecker`]);
//!    license expressions are evaluated by [`license::expr`] with alias
//!    normalization from [`license::normalize`].
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (compliant), `1` (violations found), or `2` (load failure).

mod checker;
mod cli;
mod license;
mod models;
mod policy;
mod report;
mod sbom;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use checker::ComplianceChecker;
use cli::{Cli, ReportFormat};

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(compliant) => std::process::exit(if compliant { 0 } else { 1 }),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    // Load failures abort the run before any checks execute.
    let policy = policy::load_policy(&cli.policy)?;
    let document = sbom::load_sbom(&cli.sbom)?;

    let result = ComplianceChecker::new().check_compliance(&document, &policy);

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&result, &cli.sbom, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(result.is_compliant())
}
