use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::models::CheckResult;

/// Render a colored terminal report for one compliance run.
pub fn render(result: &CheckResult, sbom_path: &Path, verbose: bool, quiet: bool) -> Result<()> {
    if quiet {
        println!(
            "Violations: {}  Passed: {}  {}",
            result.violations.len().to_string().red(),
            result.passed_checks.len().to_string().green(),
            verdict_banner(result),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "sbom-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Checking: {}\n", sbom_path.display());

    if result.violations.is_empty() {
        println!(" {} No violations found", "✓".green());
    } else {
        println!(
            " {} Violations found ({}):",
            "✗".red().bold(),
            result.violations.len()
        );
        for violation in &result.violations {
            println!("   {} {}", "•".red(), violation);
        }
    }

    if !result.passed_checks.is_empty() {
        println!(
            "\n {} Passed checks ({}):",
            "✓".green().bold(),
            result.passed_checks.len()
        );
        for check in &result.passed_checks {
            println!("   {} {}", "•".green(), check);
        }
    }

    if verbose && !result.metadata.is_empty() {
        println!("\n {}\n", "Run metadata:".bold());
        render_metadata(result);
    }

    println!("\n {}", "─".repeat(50));
    println!(" Summary: {}", verdict_banner(result));
    println!(" {}\n", "─".repeat(50));

    Ok(())
}

fn verdict_banner(result: &CheckResult) -> ColoredString {
    if result.is_compliant() {
        "COMPLIANT".green().bold()
    } else {
        "NON-COMPLIANT".red().bold()
    }
}

fn render_metadata(result: &CheckResult) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

    for (key, value) in &result.metadata {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) if n.is_f64() => {
                format!("{:.3}s", n.as_f64().unwrap_or_default())
            }
            other => other.to_string(),
        };
        table.add_row(vec![Cell::new(key), Cell::new(rendered)]);
    }

    println!("{table}");
}
