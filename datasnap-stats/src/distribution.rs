//! Reference-distribution helpers shared by the calculators.
//!
//! p-values for t statistics come from the standard normal, not Student's t.
//! The approximation is noticeably optimistic below roughly 30 degrees of
//! freedom.

use datasnap_core::{AnalysisError, ConfidenceInterval, GroupStatistics, Result, SignificanceLevel};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::function::erf::erfc;
use statrs::statistics::Statistics;

/// Below this many degrees of freedom the normal approximation gets a note.
pub const NORMAL_APPROXIMATION_MIN_DF: f64 = 30.0;

/// Standard normal CDF.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Two-tailed p-value `2 * (1 - Φ(|z|))`.
pub fn two_tailed_normal_p(statistic: f64) -> f64 {
    if statistic.is_nan() {
        return 1.0;
    }
    if statistic.is_infinite() {
        return 0.0;
    }
    // erfc(|z|/√2) == 2 * (1 - Φ(|z|)) without the cancellation in the tail
    erfc(statistic.abs() / std::f64::consts::SQRT_2).clamp(0.0, 1.0)
}

/// Caveat attached to results whose normal-approximated p-value is unreliable.
pub fn normal_approximation_note(df: f64) -> Option<String> {
    if df < NORMAL_APPROXIMATION_MIN_DF {
        tracing::warn!(df, "p-value uses the normal approximation with few degrees of freedom");
        Some(format!(
            "p-value uses a normal approximation to Student's t; with df = {} (< {}) it is approximate",
            df, NORMAL_APPROXIMATION_MIN_DF
        ))
    } else {
        None
    }
}

/// Student-t critical value `t_{1-α/2, df}`.
pub fn t_critical(alpha: SignificanceLevel, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        AnalysisError::Validation(format!("Invalid degrees of freedom {}: {}", df, e))
    })?;
    Ok(dist.inverse_cdf(1.0 - alpha.value() / 2.0))
}

/// Confidence interval `estimate ± t_crit * standard_error` at level `1 - alpha`.
pub fn t_interval(
    estimate: f64,
    standard_error: f64,
    df: f64,
    alpha: SignificanceLevel,
) -> Result<ConfidenceInterval> {
    let margin = t_critical(alpha, df)? * standard_error;
    Ok(ConfidenceInterval {
        level: alpha.confidence_level(),
        lower: estimate - margin,
        upper: estimate + margin,
    })
}

/// n, mean and sample (n - 1) standard deviation of one sample.
pub fn group_statistics(label: impl Into<String>, values: &[f64]) -> GroupStatistics {
    GroupStatistics {
        label: label.into(),
        n: values.len(),
        mean: values.mean(),
        std_dev: if values.len() > 1 { values.std_dev() } else { 0.0 },
    }
}
