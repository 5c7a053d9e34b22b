//! CLI execution context

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use datasnap_core::SignificanceLevel;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::output::{OutputFormat, OutputWriter};

/// Execution context for CLI commands
pub struct Context {
    /// Layered CLI configuration
    pub config: CliConfig,

    /// File the configuration is read from and saved to
    pub config_path: PathBuf,

    /// Effective significance level
    pub alpha: SignificanceLevel,

    /// Output format
    pub output_format: OutputFormat,

    /// Output writer
    pub output: OutputWriter,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config_path {
            Some(path) => path.clone(),
            None => CliConfig::default_path()?,
        };
        let config = CliConfig::load(&config_path)?;

        let output_format = match cli.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.settings.output_format, true)
                .map_err(anyhow::Error::msg)
                .with_context(|| {
                    format!("Invalid output_format '{}' in configuration", config.settings.output_format)
                })?,
        };
        let output = OutputWriter::new(output_format, cli.no_color || config.settings.no_color);

        let alpha = resolve_alpha(cli.alpha.unwrap_or(config.settings.default_alpha));

        Ok(Self {
            config,
            config_path,
            alpha,
            output_format,
            output,
        })
    }
}

/// Clamp a requested alpha into the interactive range, warning when it moves.
pub fn resolve_alpha(requested: f64) -> SignificanceLevel {
    let alpha = SignificanceLevel::clamped(requested);
    if alpha.value() != requested {
        tracing::warn!(
            requested,
            used = alpha.value(),
            "alpha outside [{}, {}], using {}",
            SignificanceLevel::MIN_INTERACTIVE,
            SignificanceLevel::MAX_INTERACTIVE,
            alpha
        );
    }
    alpha
}
