//! List rules command implementation.

use standard_check_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nAll rules run by default. Disable one in standard-check.toml:");
    println!("  [rules.docstring-period]");
    println!("  enabled = false");
    println!("\nUse --rules to run a subset, e.g.:");
    println!("  standard-check check --rules function-docstring,return-annotation");
    println!("  standard-check check --rules SC004,SC007");
}
