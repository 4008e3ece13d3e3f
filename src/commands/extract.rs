use anyhow::{bail, Result};
use std::path::Path;

use crate::config::Config;
use crate::extractor;
use crate::logging;
use crate::po;

pub struct ExtractArgs {
    /// Output directory (overrides config)
    pub output: Option<String>,
    /// Default domain (overrides config)
    pub domain: Option<String>,
    pub no_location: bool,
    pub no_comments: bool,
    /// Extract and report, but write nothing
    pub dry_run: bool,
    /// Fail when input files could not be read
    pub fail_on_warnings: bool,
}

pub fn run(config: &Config, args: ExtractArgs) -> Result<()> {
    logging::info("=== xgettext-turbo extract ===\n");

    let mut config = config.clone();
    if let Some(domain) = args.domain {
        config.default_domain = domain;
    }
    if args.no_location {
        config.locations = false;
    }
    if args.no_comments {
        config.attach_comment = false;
    }

    // Determine output directory
    let output_dir = args.output.unwrap_or_else(|| config.output.clone());

    let mut functions: Vec<&String> = config.identifiers.keys().collect();
    functions.sort();

    logging::info("Configuration:");
    logging::info(&format!("  Input patterns: {:?}", config.input));
    logging::info(&format!("  Output: {}", output_dir));
    logging::info(&format!("  Default domain: {}", config.default_domain));
    logging::info(&format!("  Functions: {:?}", functions));
    logging::info("");

    let extraction = extractor::extract_from_glob(&config)?;

    // Report any errors encountered during extraction
    for error in &extraction.errors {
        logging::warn(&format!("{}: {}", error.file_path, error.message));
    }

    let templates = extraction.catalog.to_templates();

    logging::info(&format!("Files processed: {}", extraction.files_processed));
    if templates.is_empty() {
        logging::info("No translatable messages found.");
    }
    for template in &templates {
        logging::info(&format!(
            "  {} - {} message(s)",
            template.domain,
            template.items.len()
        ));
    }

    if args.dry_run {
        logging::info("\nDry run: no files written.");
    } else if !templates.is_empty() {
        logging::info("\nWriting templates...");
        for path in po::write_templates(&templates, Path::new(&output_dir))? {
            logging::info(&format!("  {}", path.display()));
        }
    }

    logging::info("\nDone!");

    if args.fail_on_warnings && !extraction.errors.is_empty() {
        bail!(
            "{} warning(s) encountered (--fail-on-warnings enabled)",
            extraction.errors.len()
        );
    }

    Ok(())
}
