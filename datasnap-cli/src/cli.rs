//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{
    anomalies::AnomaliesArgs, config::ConfigCommands, describe::DescribeArgs, test::TestCommands,
};
use crate::input::InputFormat;
use crate::output::OutputFormat;

/// Statistical tests for tabular data
#[derive(Debug, Parser)]
#[command(name = "datasnap", version, about, long_about = None)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short = 'o', long = "format", global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Significance level, clamped to [0.001, 0.2]
    #[arg(short, long, global = true)]
    pub alpha: Option<f64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Path to the configuration file
    #[arg(long = "config", global = true, env = "DATASNAP_CONFIG")]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarise every column of a dataset
    Describe(DescribeArgs),

    /// Run a hypothesis test
    Test(TestCommands),

    /// Flag outliers in a numeric column using the IQR rule
    Anomalies(AnomaliesArgs),

    /// Manage configuration
    Config(ConfigCommands),
}

/// Dataset file shared by every analysis command
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// CSV, TSV or JSON file
    pub file: PathBuf,

    /// Input format (detected from the extension when omitted)
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,
}
