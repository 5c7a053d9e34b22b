//! IQR-based outlier detection for a single numeric column.

use datasnap_core::{AnalysisError, Dataset, Result};
use serde::{Deserialize, Serialize};

use crate::descriptive::quantile;
use crate::extract::extract_indexed;

pub const DEFAULT_IQR_THRESHOLD: f64 = 1.5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Anomaly {
    pub row: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnomalyReport {
    pub column: String,
    pub threshold: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub anomalies: Vec<Anomaly>,
}

impl AnomalyReport {
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }
}

/// Flag values outside `[q1 - k·IQR, q3 + k·IQR]`.
pub fn detect_iqr(dataset: &Dataset, column: &str, threshold: f64) -> Result<AnomalyReport> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(AnalysisError::Validation(format!(
            "IQR threshold must be a non-negative number, got {}",
            threshold
        )));
    }

    let indexed = extract_indexed(dataset, column)?;
    if indexed.len() < 4 {
        return Err(AnalysisError::InsufficientData(format!(
            "Need at least 4 values for IQR anomaly detection, got {}",
            indexed.len()
        )));
    }

    let mut sorted: Vec<f64> = indexed.iter().map(|&(_, v)| v).collect();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_bound = q1 - threshold * iqr;
    let upper_bound = q3 + threshold * iqr;

    let anomalies: Vec<Anomaly> = indexed
        .into_iter()
        .filter(|&(_, value)| value < lower_bound || value > upper_bound)
        .map(|(row, value)| Anomaly { row, value })
        .collect();

    tracing::debug!(column, count = anomalies.len(), "IQR anomaly detection finished");

    Ok(AnomalyReport {
        column: column.to_string(),
        threshold,
        q1,
        q3,
        iqr,
        lower_bound,
        upper_bound,
        anomalies,
    })
}
