//! Outlier detection command

use anyhow::Result;
use clap::Args;
use datasnap_stats::detect_iqr;

use crate::cli::InputArgs;
use crate::context::Context;
use crate::input::load_dataset;

#[derive(Debug, Args)]
pub struct AnomaliesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Numeric column to scan
    #[arg(short, long)]
    pub column: String,

    /// IQR multiplier k (values outside [Q1 - k·IQR, Q3 + k·IQR] are flagged)
    #[arg(short = 'k', long)]
    pub threshold: Option<f64>,
}

pub fn execute(ctx: &Context, args: AnomaliesArgs) -> Result<()> {
    let dataset = load_dataset(&args.input.file, args.input.input_format)?;
    let threshold = args.threshold.unwrap_or(ctx.config.settings.anomaly_threshold);

    let report = detect_iqr(&dataset, &args.column, threshold)?;
    ctx.output.write(&report)
}
