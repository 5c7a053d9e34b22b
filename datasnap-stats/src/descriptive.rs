//! Per-column descriptive statistics and histogram data.

use datasnap_core::{CellValue, Dataset};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

pub const DEFAULT_TOP_VALUES: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub top_values: Vec<ValueCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnProfile {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnProfile {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnProfile::Numeric(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub missing: usize,
    pub profile: ColumnProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub total_missing: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistogramBin {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
    pub frequency: f64,
}

/// Summarise every column of `dataset`.
///
/// A column is numeric when at least one cell is present and every present
/// cell coerces to a finite number; anything else is categorical.
pub fn describe(dataset: &Dataset, top_n: usize) -> DatasetSummary {
    let columns: Vec<ColumnSummary> = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let cells: Vec<&CellValue> = dataset.rows().iter().map(|row| &row[index]).collect();
            summarize_column(name, &cells, top_n)
        })
        .collect();

    let numeric_columns = columns.iter().filter(|c| c.profile.is_numeric()).count();

    DatasetSummary {
        total_rows: dataset.row_count(),
        total_columns: dataset.column_count(),
        total_missing: columns.iter().map(|c| c.missing).sum(),
        numeric_columns,
        categorical_columns: columns.len() - numeric_columns,
        columns,
    }
}

fn summarize_column(name: &str, cells: &[&CellValue], top_n: usize) -> ColumnSummary {
    let present: Vec<&CellValue> = cells.iter().copied().filter(|c| !c.is_missing()).collect();
    let missing = cells.len() - present.len();

    let numeric: Option<Vec<f64>> = present.iter().map(|c| c.as_f64()).collect();
    let profile = match numeric.as_deref().and_then(summarize_numeric) {
        Some(summary) => ColumnProfile::Numeric(summary),
        None => ColumnProfile::Categorical(summarize_categorical(&present, top_n)),
    };

    ColumnSummary {
        name: name.to_string(),
        missing,
        profile,
    }
}

/// Count, moments and quartiles of `values`; `None` when empty.
pub fn summarize_numeric(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(NumericSummary {
        count: values.len(),
        mean: values.mean(),
        std_dev: if values.len() > 1 { values.std_dev() } else { 0.0 },
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

fn summarize_categorical(present: &[&CellValue], top_n: usize) -> CategoricalSummary {
    let mut counts: Vec<ValueCount> = Vec::new();
    for cell in present {
        let Some(label) = cell.label() else {
            continue;
        };
        match counts.iter_mut().find(|vc| vc.value == label) {
            Some(vc) => vc.count += 1,
            None => counts.push(ValueCount { value: label, count: 1 }),
        }
    }

    let unique = counts.len();
    // stable sort keeps first-appearance order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);

    CategoricalSummary {
        count: present.len(),
        unique,
        top_values: counts,
    }
}

/// Linear-interpolated quantile of already sorted values, `q` in `[0, 1]`.
pub fn quantile(sorted_values: &[f64], q: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }

    let position = q.clamp(0.0, 1.0) * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}

/// Equal-width histogram with `num_bins` bins over the value range.
pub fn histogram(values: &[f64], num_bins: usize) -> Histogram {
    if values.is_empty() || num_bins == 0 {
        return Histogram {
            bins: vec![],
            total_count: 0,
        };
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return Histogram {
            bins: vec![HistogramBin {
                lower_bound: min,
                upper_bound: max,
                count: values.len(),
                frequency: 1.0,
            }],
            total_count: values.len(),
        };
    }

    let bin_width = (max - min) / num_bins as f64;
    let mut bins = vec![0usize; num_bins];

    for &value in values {
        let bin_index = (((value - min) / bin_width).floor() as usize).min(num_bins - 1);
        bins[bin_index] += 1;
    }

    let total = values.len();
    let bins = bins
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower_bound = min + (i as f64 * bin_width);
            HistogramBin {
                lower_bound,
                upper_bound: lower_bound + bin_width,
                count,
                frequency: count as f64 / total as f64,
            }
        })
        .collect();

    Histogram {
        bins,
        total_count: total,
    }
}
