use datasnap_core::{
    AnalysisError, CorrelationDirection, CorrelationStrength, CorrelationSummary, EffectSize,
    EffectSizeKind, PValueMethod, Result, SignificanceLevel, StatisticalTest, TestResult,
};
use statrs::statistics::Statistics;

use crate::distribution::{normal_approximation_note, two_tailed_normal_p};
use crate::formatter;

pub const PEARSON_NAME: &str = "Pearson Correlation";

/// Pearson correlation over paired observations `x[i]`, `y[i]`.
///
/// `statistic` on the result is r itself; the derived t value
/// `r·√df / √(1 − r²)` is in the correlation summary and drives the p-value.
pub fn pearson(x: &[f64], y: &[f64], alpha: SignificanceLevel) -> Result<TestResult> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    let n = x.len();
    if n < 3 {
        return Err(AnalysisError::InsufficientData(format!(
            "Need at least 3 paired values for correlation, got {}",
            n
        )));
    }

    let mean_x = x.mean();
    let mean_y = y.mean();
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(AnalysisError::ZeroVariance(
            "one of the variables is constant, so the correlation is undefined".to_string(),
        ));
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let df = (n - 2) as f64;
    let unexplained = 1.0 - r * r;
    let t_stat = if unexplained <= 0.0 {
        r.signum() * f64::INFINITY
    } else {
        r * df.sqrt() / unexplained.sqrt()
    };
    let p_value = two_tailed_normal_p(t_stat);
    let r_squared = r * r;

    let summary = CorrelationSummary {
        r,
        r_squared,
        t_statistic: t_stat,
        strength: CorrelationStrength::classify(r),
        direction: CorrelationDirection::classify(r),
    };

    let mut result = TestResult::new(
        PEARSON_NAME,
        r,
        p_value,
        PValueMethod::NormalApproximation,
        n,
        alpha,
    )
    .with_degrees_of_freedom(df)
    .with_effect_size(EffectSize::new(EffectSizeKind::RSquared, r_squared))
    .with_correlation(summary);

    if let Some(note) = normal_approximation_note(df) {
        result = result.with_note(note);
    }

    Ok(formatter::annotate(result, "correlation"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PearsonCorrelation;

impl StatisticalTest for PearsonCorrelation {
    type Input<'a> = (&'a [f64], &'a [f64]);

    fn name(&self) -> &'static str {
        PEARSON_NAME
    }

    fn run(&self, input: Self::Input<'_>, alpha: SignificanceLevel) -> Result<TestResult> {
        pearson(input.0, input.1, alpha)
    }
}
