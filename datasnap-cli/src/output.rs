//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use datasnap_core::{PValueMethod, TestResult};
use datasnap_stats::descriptive::{ColumnProfile, ColumnSummary};
use datasnap_stats::formatter::effect_magnitude;
use datasnap_stats::{narrative, AnomalyReport, DatasetSummary, Histogram, Narrative};
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Compact format (single line per item)
    Compact,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// Output writer that handles different formats
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format }
    }

    /// Write a single item
    pub fn write<T: Serialize + TableDisplay>(&self, item: &T) -> Result<()> {
        match self.format {
            OutputFormat::Table => item.display_single(),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(item)?),
            OutputFormat::Compact => item.display_compact(),
        }
        Ok(())
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        if self.format == OutputFormat::Table {
            println!("{} {}", "✓".green(), message);
        } else {
            println!("{}", message);
        }
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.format == OutputFormat::Table {
            println!("{} {}", "ℹ".blue(), message);
        } else {
            println!("{}", message);
        }
    }
}

/// Trait for displaying items in a table
pub trait TableDisplay {
    /// Display a single item in detail
    fn display_single(&self);

    /// Display in compact format
    fn display_compact(&self);
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

/// Print a key-value pair in detail format
pub fn print_field(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Format a p-value, switching to `< 0.0001` for very small values
pub fn format_p_value(p: f64) -> String {
    if p < 0.0001 {
        "< 0.0001".to_string()
    } else {
        format!("{:.4}", p)
    }
}

/// Format a float with fixed precision, keeping infinities readable
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_infinite() {
        let symbol = if value > 0.0 { "∞" } else { "-∞" };
        symbol.to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

fn significance_badge(significant: bool) -> String {
    if significant {
        "significant".green().bold().to_string()
    } else {
        "not significant".yellow().to_string()
    }
}

fn method_label(method: PValueMethod) -> &'static str {
    match method {
        PValueMethod::NormalApproximation => "normal approximation",
        PValueMethod::FStepApproximation => "F step approximation",
    }
}

impl TableDisplay for TestResult {
    fn display_single(&self) {
        print_section(&self.test_name);
        print_field("Statistic", &format_number(self.statistic, 4));
        if let Some(df) = self.degrees_of_freedom {
            print_field("Degrees of freedom", &format_number(df, 0));
        }
        print_field(
            "p-value",
            &format!("{} ({})", format_p_value(self.p_value), method_label(self.p_value_method)),
        );
        print_field("Alpha", &self.alpha.to_string());
        print_field("Result", &significance_badge(self.significant));
        print_field("Sample size", &self.sample_size.to_string());

        if let Some(effect) = self.effect_size {
            let magnitude = effect_magnitude(effect)
                .map(|m| format!(" ({})", m))
                .unwrap_or_default();
            print_field(
                "Effect size",
                &format!("{} = {:.3}{}", effect.kind.symbol(), effect.value, magnitude),
            );
        }

        if let Some(ci) = self.confidence_interval {
            print_field(
                &format!("{:.0}% CI", ci.level * 100.0),
                &format!("[{:.4}, {:.4}]", ci.lower, ci.upper),
            );
        }

        if let Some(summary) = &self.correlation {
            print_field("r", &format!("{:.3}", summary.r));
            print_field("R²", &format!("{:.3}", summary.r_squared));
            print_field("t", &format_number(summary.t_statistic, 4));
        }

        if !self.group_statistics.is_empty() {
            let mut table = new_table(&["Group", "n", "Mean", "Std Dev"]);
            for group in &self.group_statistics {
                table.add_row(vec![
                    Cell::new(&group.label),
                    Cell::new(group.n),
                    Cell::new(format!("{:.4}", group.mean)),
                    Cell::new(format!("{:.4}", group.std_dev)),
                ]);
            }
            println!("\n{table}");
        }

        if let Some(anova) = &self.anova_table {
            let mut table = new_table(&["Source", "SS", "df", "MS"]);
            table.add_row(vec![
                Cell::new("Between"),
                Cell::new(format!("{:.4}", anova.ss_between)),
                Cell::new(anova.df_between),
                Cell::new(format!("{:.4}", anova.ms_between)),
            ]);
            table.add_row(vec![
                Cell::new("Within"),
                Cell::new(format!("{:.4}", anova.ss_within)),
                Cell::new(anova.df_within),
                Cell::new(format!("{:.4}", anova.ms_within)),
            ]);
            println!("\n{table}");
        }

        print_section("Interpretation");
        println!("  {}", self.interpretation);
        println!("  {}", self.conclusion.bold());

        for note in &self.notes {
            println!("\n{} {}", "⚠".yellow(), note.dimmed());
        }
    }

    fn display_compact(&self) {
        println!(
            "{} statistic={} p={} n={} {}",
            self.test_name,
            format_number(self.statistic, 4),
            format_p_value(self.p_value),
            self.sample_size,
            if self.significant { "significant" } else { "not-significant" }
        );
    }
}

/// Test result together with the narrative told from it
#[derive(Debug, Serialize)]
pub struct TestReport<'a> {
    #[serde(flatten)]
    pub result: &'a TestResult,
    pub narrative: Narrative,
}

impl<'a> TestReport<'a> {
    pub fn new(result: &'a TestResult) -> Self {
        Self {
            result,
            narrative: narrative(result),
        }
    }
}

impl TableDisplay for TestReport<'_> {
    fn display_single(&self) {
        self.result.display_single();

        print_section(&self.narrative.title);
        println!("  {}", self.narrative.summary);
        if !self.narrative.recommendations.is_empty() {
            println!("\n{}", "Recommendations:".cyan());
            for recommendation in &self.narrative.recommendations {
                println!("  • {}", recommendation);
            }
        }
    }

    fn display_compact(&self) {
        self.result.display_compact();
    }
}

fn column_row(column: &ColumnSummary) -> Vec<Cell> {
    match &column.profile {
        ColumnProfile::Numeric(stats) => vec![
            Cell::new(&column.name),
            Cell::new("numeric"),
            Cell::new(stats.count),
            Cell::new(column.missing),
            Cell::new(format!("{:.4}", stats.mean)),
            Cell::new(format!("{:.4}", stats.std_dev)),
            Cell::new(format!("{:.4}", stats.min)),
            Cell::new(format!("{:.4}", stats.median)),
            Cell::new(format!("{:.4}", stats.max)),
        ],
        ColumnProfile::Categorical(stats) => {
            let top = stats
                .top_values
                .iter()
                .map(|vc| format!("{} ({})", vc.value, vc.count))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                Cell::new(&column.name),
                Cell::new("categorical"),
                Cell::new(stats.count),
                Cell::new(column.missing),
                Cell::new(format!("{} unique", stats.unique)),
                Cell::new(top),
            ]
        }
    }
}

impl TableDisplay for ColumnSummary {
    fn display_single(&self) {
        let mut table = if self.profile.is_numeric() {
            new_table(&[
                "Column", "Type", "Count", "Missing", "Mean", "Std Dev", "Min", "Median", "Max",
            ])
        } else {
            new_table(&["Column", "Type", "Count", "Missing", "Unique", "Top Values"])
        };
        table.add_row(column_row(self));
        println!("{table}");
    }

    fn display_compact(&self) {
        let kind = if self.profile.is_numeric() { "numeric" } else { "categorical" };
        println!("{} type={} missing={}", self.name, kind, self.missing);
    }
}

impl TableDisplay for DatasetSummary {
    fn display_single(&self) {
        print_section("Dataset Overview");
        print_field("Rows", &self.total_rows.to_string());
        print_field("Columns", &self.total_columns.to_string());
        print_field("Numeric columns", &self.numeric_columns.to_string());
        print_field("Categorical columns", &self.categorical_columns.to_string());
        print_field("Missing cells", &self.total_missing.to_string());

        let numeric: Vec<&ColumnSummary> =
            self.columns.iter().filter(|c| c.profile.is_numeric()).collect();
        if !numeric.is_empty() {
            print_section("Numeric Columns");
            let mut table = new_table(&[
                "Column", "Type", "Count", "Missing", "Mean", "Std Dev", "Min", "Median", "Max",
            ]);
            for column in numeric {
                table.add_row(column_row(column));
            }
            println!("{table}");
        }

        let categorical: Vec<&ColumnSummary> =
            self.columns.iter().filter(|c| !c.profile.is_numeric()).collect();
        if !categorical.is_empty() {
            print_section("Categorical Columns");
            let mut table = new_table(&["Column", "Type", "Count", "Missing", "Unique", "Top Values"]);
            for column in categorical {
                table.add_row(column_row(column));
            }
            println!("{table}");
        }
    }

    fn display_compact(&self) {
        println!(
            "rows={} columns={} numeric={} categorical={} missing={}",
            self.total_rows,
            self.total_columns,
            self.numeric_columns,
            self.categorical_columns,
            self.total_missing
        );
        for column in &self.columns {
            column.display_compact();
        }
    }
}

impl TableDisplay for Histogram {
    fn display_single(&self) {
        if self.bins.is_empty() {
            println!("{}", "No numeric values to plot.".dimmed());
            return;
        }

        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let mut table = new_table(&["Range", "Count", "Frequency", ""]);
        for bin in &self.bins {
            let bar = "█".repeat((bin.count * 30).div_ceil(peak));
            table.add_row(vec![
                Cell::new(format!("[{:.3}, {:.3}]", bin.lower_bound, bin.upper_bound)),
                Cell::new(bin.count),
                Cell::new(format!("{:.1}%", bin.frequency * 100.0)),
                Cell::new(bar).fg(Color::Green),
            ]);
        }
        println!("{table}");
    }

    fn display_compact(&self) {
        for bin in &self.bins {
            println!("{:.3}..{:.3} {}", bin.lower_bound, bin.upper_bound, bin.count);
        }
    }
}

impl TableDisplay for AnomalyReport {
    fn display_single(&self) {
        print_section(&format!("Anomalies in '{}'", self.column));
        print_field("Q1", &format!("{:.4}", self.q1));
        print_field("Q3", &format!("{:.4}", self.q3));
        print_field("IQR", &format!("{:.4}", self.iqr));
        print_field(
            "Bounds",
            &format!("[{:.4}, {:.4}] (k = {})", self.lower_bound, self.upper_bound, self.threshold),
        );

        if self.anomalies.is_empty() {
            println!("\n{} {}", "✓".green(), "No anomalies found.");
            return;
        }

        let mut table = new_table(&["Row", "Value"]);
        for anomaly in &self.anomalies {
            table.add_row(vec![
                Cell::new(anomaly.row + 1),
                Cell::new(anomaly.value).fg(Color::Red),
            ]);
        }
        println!("\n{table}");
        println!(
            "\n{} {} anomal{}",
            "Total:".bold(),
            self.anomaly_count().to_string().red(),
            if self.anomaly_count() == 1 { "y" } else { "ies" }
        );
    }

    fn display_compact(&self) {
        for anomaly in &self.anomalies {
            println!("{} row={} value={}", self.column, anomaly.row + 1, anomaly.value);
        }
    }
}
