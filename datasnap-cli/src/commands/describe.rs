//! Dataset description command

use anyhow::Result;
use clap::Args;
use datasnap_stats::{describe, extract_numeric, histogram};

use crate::cli::InputArgs;
use crate::context::Context;
use crate::input::load_dataset;
use crate::output::{print_section, OutputFormat};

#[derive(Debug, Args)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Most frequent values shown per categorical column
    #[arg(long)]
    pub top: Option<usize>,

    /// Also print a histogram of this numeric column
    #[arg(long, value_name = "COLUMN")]
    pub histogram: Option<String>,

    /// Number of histogram bins
    #[arg(long)]
    pub bins: Option<usize>,
}

pub fn execute(ctx: &Context, args: DescribeArgs) -> Result<()> {
    let dataset = load_dataset(&args.input.file, args.input.input_format)?;
    let top_n = args.top.unwrap_or(ctx.config.settings.top_values);

    ctx.output.write(&describe(&dataset, top_n))?;

    if let Some(column) = args.histogram {
        let bins = args.bins.unwrap_or(ctx.config.settings.histogram_bins);
        let values = extract_numeric(&dataset, &column)?;
        if ctx.output_format == OutputFormat::Table {
            print_section(&format!("Histogram of '{}'", column));
        }
        ctx.output.write(&histogram(&values, bins))?;
    }

    Ok(())
}
