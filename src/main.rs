use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xgettext_turbo::commands;
use xgettext_turbo::commands::extract::ExtractArgs;
use xgettext_turbo::config::Config;
use xgettext_turbo::logging::{self, LogLevel};

#[derive(Parser)]
#[command(name = "xgettext-turbo")]
#[command(author, version, about = "Extract gettext messages from JavaScript/TypeScript into .pot templates", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract translatable messages and write one .pot per domain
    Extract {
        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<String>,

        /// Default domain (overrides config)
        #[arg(long)]
        domain: Option<String>,

        /// Do not record line numbers in references
        #[arg(long)]
        no_location: bool,

        /// Do not attach translator comments
        #[arg(long)]
        no_comments: bool,

        /// Report what would be extracted without writing files
        #[arg(long)]
        dry_run: bool,

        /// Fail when some input files could not be read
        #[arg(long)]
        fail_on_warnings: bool,
    },

    /// Create a starter configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,

        /// Comma-separated input glob patterns
        #[arg(long, default_value = "src/**/*.js,src/**/*.ts")]
        input: String,

        /// Output directory for .pot files
        #[arg(short, long, default_value = "locales")]
        output: String,

        /// Default domain
        #[arg(long, default_value = "messages")]
        domain: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LogLevel::Error
    } else {
        LogLevel::parse(&cli.log_level)
            .ok_or_else(|| anyhow!("Unknown log level: {}", cli.log_level))?
    };
    logging::set_level(level);

    match cli.command {
        Commands::Extract {
            output,
            domain,
            no_location,
            no_comments,
            dry_run,
            fail_on_warnings,
        } => {
            let config = Config::load_or_default(cli.config.as_ref())?;
            commands::extract::run(
                &config,
                ExtractArgs {
                    output,
                    domain,
                    no_location,
                    no_comments,
                    dry_run,
                    fail_on_warnings,
                },
            )?;
        }
        Commands::Init {
            force,
            input,
            output,
            domain,
        } => {
            commands::init::run(force, &input, &output, &domain)?;
        }
    }

    Ok(())
}
