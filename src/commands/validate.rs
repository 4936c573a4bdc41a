use crate::core::{
    colors::{get_overall_status_colored, get_validation_icon},
    command_init::WorkspaceCommandInit,
    error::Result,
    output::print_success,
    validation::{generate_validation_report, OverallStatus, ValidationSuite},
};
use colored::*;
use std::fs;
use std::path::PathBuf;

/// Run every validation check and print the results. Returns the overall status.
pub fn execute_validate(root: Option<PathBuf>, output: Option<PathBuf>) -> Result<OverallStatus> {
    let context = WorkspaceCommandInit::initialize(root)?;
    let mut suite = ValidationSuite::new(&context.root, context.config.clone());

    println!("\n{}\n", "Running system validation...".white());
    let health = suite.run_full_validation();

    for result in &health.results {
        println!(
            "  {} {}: {}",
            get_validation_icon(result.status),
            result.component.white(),
            result.message
        );
    }

    println!(
        "\nSystem health: {}  (pass rate {:.1}%)",
        get_overall_status_colored(health.overall_status),
        health.pass_rate * 100.0
    );
    for recommendation in &health.recommendations {
        println!("  {} {}", "-".bright_black(), recommendation.bright_black());
    }

    if let Some(path) = output {
        fs::write(&path, generate_validation_report(&health))?;
        print_success(&format!("Validation report saved to {}", path.display()));
    }
    println!();

    Ok(health.overall_status)
}
