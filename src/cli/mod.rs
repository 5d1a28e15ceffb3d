//! # Command Line Interface
//!
//! `routeguard validate` lints HTTPRoute manifests with the same validator an
//! admission webhook would run; `routeguard config show` prints the
//! effective settings.

pub mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::FilterKind;
use crate::manifest::load_routes;
use crate::observability::{init_logging, log_config_info};
use crate::validation::RouteValidator;
use output::{render_reports, FileReport, OutputFormat, RouteReport};

#[derive(Parser)]
#[command(name = "routeguard")]
#[command(about = "Admission-time validation for HTTPRoute manifests")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate HTTPRoute manifests (YAML or JSON)
    Validate {
        /// Manifest files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: text, json or yaml
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Filter kind allowed to repeat; replaces the configured list
        #[arg(long = "repeatable-filter", value_name = "KIND")]
        repeatable_filters: Vec<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
}

/// Run CLI commands
pub fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    init_logging(&config.logging, cli.verbose);
    log_config_info(&config);

    run(cli.command, config)
}

/// Execute a parsed command with an already loaded configuration
pub fn run(command: Commands, mut config: AppConfig) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Validate {
            files,
            output,
            repeatable_filters,
        } => {
            let format = OutputFormat::from_str(&output)?;
            if !repeatable_filters.is_empty() {
                config.validation.repeatable_filters = parse_kinds(&repeatable_filters)?;
            }

            let validator = RouteValidator::from_settings(&config.validation);
            let reports = validate_files(&files, &validator);
            println!("{}", render_reports(&reports, format)?.trim_end());

            if reports.iter().any(FileReport::has_failures) {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let rendered = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration")?;
                println!("{}", rendered.trim_end());
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

/// Load and validate each file. Load failures are recorded on the report
/// and do not stop the remaining files.
pub fn validate_files(files: &[PathBuf], validator: &RouteValidator) -> Vec<FileReport> {
    files.iter().map(|path| validate_file(path, validator)).collect()
}

fn validate_file(path: &Path, validator: &RouteValidator) -> FileReport {
    let _span = crate::manifest_span!(path.display()).entered();
    let file = path.display().to_string();

    let routes = match load_routes(path) {
        Ok(routes) => routes,
        Err(error) => {
            // `{:#}` keeps the underlying decode or I/O cause in the message
            let message = format!("{:#}", anyhow::Error::from(error));
            warn!(error = %message, "Failed to load manifest");
            return FileReport {
                file,
                error: Some(message),
                routes: vec![],
            };
        }
    };

    let routes: Vec<RouteReport> = routes
        .iter()
        .map(|route| {
            let errors = validator.validate_route(route);
            RouteReport {
                name: route.qualified_name(),
                valid: errors.is_empty(),
                errors,
            }
        })
        .collect();

    info!(
        routes = routes.len(),
        rejected = routes.iter().filter(|route| !route.valid).count(),
        "Validated manifest"
    );
    FileReport {
        file,
        error: None,
        routes,
    }
}

fn parse_kinds(raw: &[String]) -> anyhow::Result<Vec<FilterKind>> {
    raw.iter()
        .map(|kind| kind.parse::<FilterKind>().map_err(anyhow::Error::msg))
        .collect()
}
