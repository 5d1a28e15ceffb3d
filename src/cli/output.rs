//! Output formatting for CLI reports
//!
//! Reports render as coloured text for terminals, or as JSON/YAML for
//! pipelines.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write as _;

use crate::validation::FieldErrorList;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!(
                "Unsupported output format: '{}'. Use 'text', 'json', or 'yaml'.",
                s
            ),
        }
    }
}

/// Validation outcome of one route
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub name: String,
    pub valid: bool,
    pub errors: FieldErrorList,
}

/// Validation outcome of one manifest file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub routes: Vec<RouteReport>,
}

impl FileReport {
    /// True when the file could not be loaded or any route was rejected
    pub fn has_failures(&self) -> bool {
        self.error.is_some() || self.routes.iter().any(|route| !route.valid)
    }
}

/// Render reports in the requested format
pub fn render_reports(reports: &[FileReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(reports);
            json.context("Failed to serialize to JSON")
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(reports);
            yaml.context("Failed to serialize to YAML")
        }
    }
}

fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    let mut failed = 0;
    let mut total = 0;

    for report in reports {
        if let Some(error) = &report.error {
            failed += 1;
            let _ = writeln!(out, "{} {}: {}", "ERROR".red(), report.file, error);
            continue;
        }

        for route in &report.routes {
            total += 1;
            if route.valid {
                let _ = writeln!(out, "{} {} ({})", "OK".green(), route.name, report.file);
            } else {
                failed += 1;
                let _ = writeln!(
                    out,
                    "{} {} ({}): {} error(s)",
                    "FAIL".red(),
                    route.name,
                    report.file,
                    route.errors.len()
                );
                for error in &route.errors {
                    let _ = writeln!(out, "  - {}", error);
                }
            }
        }
    }

    let _ = writeln!(out, "{} route(s) checked, {} failure(s)", total, failed);
    out
}
