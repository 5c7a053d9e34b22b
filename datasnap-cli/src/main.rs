//! `datasnap`: run statistical tests against CSV and JSON datasets.

use std::process::ExitCode;

use clap::Parser;
use datasnap_core::AnalysisError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod context;
mod input;
mod output;

use cli::{Cli, Commands};
use context::Context;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Bare analysis failures get their own prefix; anything wrapped in context
/// is reported with its full chain.
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AnalysisError>() {
        Some(analysis) if err.chain().count() == 1 => format!("Analysis Error: {}", analysis),
        _ => format!("Error: {:#}", err),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::new(&cli)?;
    tracing::debug!(
        config = %ctx.config_path.display(),
        alpha = ctx.alpha.value(),
        format = %ctx.output_format,
        "context ready"
    );

    match cli.command {
        Commands::Describe(args) => commands::describe::execute(&ctx, args),
        Commands::Test(cmd) => commands::test::execute(&ctx, cmd),
        Commands::Anomalies(args) => commands::anomalies::execute(&ctx, args),
        Commands::Config(cmd) => commands::config::execute(&ctx, cmd),
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose { "datasnap=debug" } else { "datasnap=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
