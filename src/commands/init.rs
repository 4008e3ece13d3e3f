use anyhow::{bail, Result};
use std::path::Path;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::logging;

pub fn run(force: bool, input: &str, output: &str, domain: &str) -> Result<()> {
    logging::info("=== xgettext-turbo init ===\n");

    let config_path = Path::new(DEFAULT_CONFIG_FILE);

    // Check if config already exists
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    // Parse comma-separated values
    let input_patterns: Vec<String> = input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let config = serde_json::json!({
        "input": input_patterns,
        "ignore": [],
        "output": output,
        "defaultDomain": domain,
        "attachComment": true,
        "commentMarker": "///",
        "locations": true
    });

    let config_str = serde_json::to_string_pretty(&config)?;
    std::fs::write(config_path, format!("{}\n", config_str))?;

    logging::info(&format!(
        "Created configuration file: {}\n",
        config_path.display()
    ));
    logging::info("Configuration:");
    logging::info(&format!("  Input patterns: {:?}", input_patterns));
    logging::info(&format!("  Output: {}", output));
    logging::info(&format!("  Default domain: {}", domain));

    logging::info("\nNext steps:");
    logging::info("  1. Add an \"identifiers\" map to recognize functions beyond the gettext family");
    logging::info("  2. Run 'xgettext-turbo extract' to write the .pot templates");

    Ok(())
}
