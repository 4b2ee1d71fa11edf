use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sbom-checkr",
    about = "Check SPDX SBOM files for compliance with organizational policies",
    version
)]
pub struct Cli {
    /// Path to the SBOM file (SPDX 2.3 JSON format)
    #[arg(short, long, value_name = "FILE")]
    pub sbom: PathBuf,

    /// Path to the policy file (YAML format)
    #[arg(short, long, value_name = "FILE")]
    pub policy: PathBuf,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Include run metadata in the terminal report
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
