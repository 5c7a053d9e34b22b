//! Configuration commands

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use console::Term;

use crate::config::CliConfig;
use crate::context::Context;

/// Configuration management commands
#[derive(Debug, Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Show the configuration file path
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., settings.default_alpha)
        key: String,

        /// Value to set
        value: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Force reset without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Execute configuration commands
pub fn execute(ctx: &Context, cmd: ConfigCommands) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => show(ctx),
        ConfigSubcommand::Path => show_path(ctx),
        ConfigSubcommand::Set { key, value } => set(ctx, &key, &value),
        ConfigSubcommand::Reset { force } => reset(ctx, force),
    }
}

fn show(ctx: &Context) -> Result<()> {
    ctx.output.write(&ctx.config)
}

fn show_path(ctx: &Context) -> Result<()> {
    let status = if ctx.config_path.exists() { "✓".green() } else { "✗".red() };
    println!("{} {}", status, ctx.config_path.display());
    Ok(())
}

fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    // start from the file alone so environment overrides are not persisted
    let mut config = CliConfig::load_file(&ctx.config_path)?;
    config.set(key, value)?;

    config.save(&ctx.config_path).context("Failed to save configuration")?;
    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn reset(ctx: &Context, force: bool) -> Result<()> {
    if !force {
        let term = Term::stderr();
        if !term.is_term() {
            bail!("Refusing to reset configuration without --force in a non-interactive session");
        }
        term.write_str("Reset all configuration to defaults? [y/N] ")?;
        let answer = term.read_line().context("Failed to get confirmation")?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    CliConfig::default()
        .save(&ctx.config_path)
        .context("Failed to save configuration")?;

    ctx.output.success("Configuration reset to defaults");
    Ok(())
}
