//! Init command implementation.

use anyhow::{bail, Context, Result};
use standard_check_core::DEFAULT_IGNORE_FILE;
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# standard-check configuration

[analyzer]
# Root directory to check (default: current directory)
# root = "./src"

# Ignore file holding path globs and !identifier exclusions
ignore_file = ".standardignore"

# Extra glob patterns to exclude, merged with the ignore file
exclude = []

# Respect .gitignore files
respect_gitignore = false

# Worker threads (default: one per CPU)
# parallelism = 4

# Every rule is enabled unless turned off here.

[rules.camel-case-names]
# Permit one leading and one trailing underscore (`_cache`, `type_`)
allow_affix_underscore = true

# [rules.docstring-period]
# enabled = false
"#;

const DEFAULT_IGNORE: &str = "# Paths excluded from checking\n**/.*\n**/__pycache__\n**/venv\n**/build\n\n# Identifiers exempt from every rule\n# !setUp\n";

/// Runs the init command in `dir`.
///
/// Writes `standard-check.toml` and `.standardignore`, refusing to overwrite
/// either unless `force` is set.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(PROJECT_CONFIG_NAMES[0]);
    let ignore_path = dir.join(DEFAULT_IGNORE_FILE);

    if !force {
        for path in [&config_path, &ignore_path] {
            if path.exists() {
                bail!(
                    "{} already exists. Use --force to overwrite.",
                    path.display()
                );
            }
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    std::fs::write(&ignore_path, DEFAULT_IGNORE)
        .with_context(|| format!("Failed to write {}", ignore_path.display()))?;

    println!("Created {} and {}", config_path.display(), ignore_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to tune rules", PROJECT_CONFIG_NAMES[0]);
    println!("  2. Add paths or !identifiers to {DEFAULT_IGNORE_FILE}");
    println!("  3. Run: standard-check check");

    Ok(())
}
