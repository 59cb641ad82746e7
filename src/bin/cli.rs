//! Leaderboard CLI
//!
//! Local execution entry point for batch leaderboards and single-profile lookups.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leaderboard::{
    error::{AppError, LookupError, Result},
    models::{Config, OutputFormat},
    pipeline::{self, ProfileLookup},
    services::IdentifierResolver,
};

/// Bulk coding-profile leaderboard
#[derive(Parser, Debug)]
#[command(
    name = "leaderboard",
    version,
    about = "Ranks a batch of coding profiles by problems solved"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "leaderboard.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a ranked leaderboard from a CSV of profile references
    Batch {
        /// CSV file with a header row
        input: PathBuf,

        /// Column holding profile references (default: input.column from config)
        #[arg(long)]
        column: Option<String>,

        /// Write the leaderboard here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json or csv
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Fetch full detail for a single profile
    Profile {
        /// Profile URL
        reference: String,
    },

    /// Print the identifier extracted from a profile reference
    Resolve {
        /// Profile URL
        reference: String,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(&cli.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    init_logging(cli.verbose, &config.logging.level);

    match loaded {
        Ok(_) => log::info!("Loaded configuration from {}", cli.config.display()),
        Err(e) => log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        ),
    }

    match cli.command {
        Command::Batch {
            input,
            column,
            output,
            format,
        } => {
            if let Some(column) = column {
                config.input.column = column;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            config.validate()?;
            pipeline::run_batch(&config, &input, output.as_deref()).await?;
        }

        Command::Profile { reference } => {
            config.validate()?;
            match pipeline::run_profile(&config, &reference).await? {
                ProfileLookup::Found(detail) => {
                    println!("{}", serde_json::to_string_pretty(&detail)?);
                }
                ProfileLookup::NotFound(identifier) => {
                    log::error!("Profile {} not found or private", identifier);
                    return Err(AppError::Lookup(LookupError::AccountNotFound));
                }
                ProfileLookup::InvalidReference => {
                    log::error!("Invalid profile URL: {}", reference);
                    return Err(AppError::validation(
                        "no identifier could be extracted from the reference",
                    ));
                }
            }
        }

        Command::Resolve { reference } => {
            let resolver = IdentifierResolver::new(&config.resolver);
            match resolver.resolve(&reference) {
                Some(identifier) => println!("{identifier}"),
                None => {
                    log::error!("No identifier found in {:?}", reference);
                    return Err(AppError::validation("unresolvable reference"));
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = pipeline::run_validate(&config) {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
