use datasnap_core::{
    AnalysisError, EffectSize, EffectSizeKind, PValueMethod, Result, SignificanceLevel,
    StatisticalTest, TestResult,
};
use statrs::statistics::Statistics;

use crate::distribution::{
    group_statistics, normal_approximation_note, t_interval, two_tailed_normal_p,
};
use crate::formatter;

pub const ONE_SAMPLE_NAME: &str = "One-Sample t-Test";
pub const INDEPENDENT_NAME: &str = "Independent Samples t-Test";
pub const PAIRED_NAME: &str = "Paired Samples t-Test";

/// A sample together with the label it is reported under.
#[derive(Debug, Clone, Copy)]
pub struct LabeledSample<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

impl<'a> LabeledSample<'a> {
    pub fn new(label: &'a str, values: &'a [f64]) -> Self {
        Self { label, values }
    }
}

/// Compare one sample's mean against a fixed value.
pub fn one_sample(sample: &[f64], test_value: f64, alpha: SignificanceLevel) -> Result<TestResult> {
    if !test_value.is_finite() {
        return Err(AnalysisError::Validation(format!(
            "Test value must be a finite number, got {}",
            test_value
        )));
    }

    let n = sample.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "Need at least 2 values for one-sample t-test, got {}",
            n
        )));
    }

    let n_f = n as f64;
    let mean = sample.mean();
    let std_dev = sample.std_dev();
    let standard_error = std_dev / n_f.sqrt();
    if standard_error == 0.0 {
        return Err(AnalysisError::ZeroVariance(
            "all sample values are identical, so the t statistic is undefined".to_string(),
        ));
    }

    let t_stat = (mean - test_value) / standard_error;
    let df = n_f - 1.0;
    let p_value = two_tailed_normal_p(t_stat);
    let interval = t_interval(mean - test_value, standard_error, df, alpha)?;

    let mut result = TestResult::new(
        ONE_SAMPLE_NAME,
        t_stat,
        p_value,
        PValueMethod::NormalApproximation,
        n,
        alpha,
    )
    .with_degrees_of_freedom(df)
    .with_confidence_interval(interval)
    .with_group_statistics(vec![group_statistics("sample", sample)]);

    if let Some(note) = normal_approximation_note(df) {
        result = result.with_note(note);
    }

    Ok(formatter::annotate(result, "one-sample t-test"))
}

/// Pooled-variance two-sample t-test with unlabeled samples.
pub fn independent(first: &[f64], second: &[f64], alpha: SignificanceLevel) -> Result<TestResult> {
    independent_samples(
        LabeledSample::new("sample 1", first),
        LabeledSample::new("sample 2", second),
        alpha,
    )
}

/// Pooled-variance two-sample t-test. Equal variances are assumed; there is
/// no Welch correction.
pub fn independent_samples(
    first: LabeledSample<'_>,
    second: LabeledSample<'_>,
    alpha: SignificanceLevel,
) -> Result<TestResult> {
    let (n1, n2) = (first.values.len(), second.values.len());
    if n1 < 2 || n2 < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "Need at least 2 values in each sample for independent t-test, got {} and {}",
            n1, n2
        )));
    }

    let mean1 = first.values.mean();
    let mean2 = second.values.mean();
    let var1 = first.values.variance();
    let var2 = second.values.variance();
    let (n1_f, n2_f) = (n1 as f64, n2 as f64);

    let df = n1_f + n2_f - 2.0;
    let pooled_var = ((n1_f - 1.0) * var1 + (n2_f - 1.0) * var2) / df;
    let standard_error = (pooled_var * (1.0 / n1_f + 1.0 / n2_f)).sqrt();
    if standard_error == 0.0 {
        return Err(AnalysisError::ZeroVariance(
            "both samples are constant, so the pooled standard error is zero".to_string(),
        ));
    }

    let mean_diff = mean1 - mean2;
    let t_stat = mean_diff / standard_error;
    let p_value = two_tailed_normal_p(t_stat);
    let cohens_d = mean_diff / pooled_var.sqrt();
    let interval = t_interval(mean_diff, standard_error, df, alpha)?;

    let mut result = TestResult::new(
        INDEPENDENT_NAME,
        t_stat,
        p_value,
        PValueMethod::NormalApproximation,
        n1 + n2,
        alpha,
    )
    .with_degrees_of_freedom(df)
    .with_effect_size(EffectSize::new(EffectSizeKind::CohensD, cohens_d))
    .with_confidence_interval(interval)
    .with_group_statistics(vec![
        group_statistics(first.label, first.values),
        group_statistics(second.label, second.values),
    ]);

    if let Some(note) = normal_approximation_note(df) {
        result = result.with_note(note);
    }

    Ok(formatter::annotate(result, "independent samples t-test"))
}

/// Paired t-test: a one-sample test of `first[i] - second[i]` against zero.
pub fn paired(first: &[f64], second: &[f64], alpha: SignificanceLevel) -> Result<TestResult> {
    if first.len() != second.len() {
        return Err(AnalysisError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }

    let n = first.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData(format!(
            "Need at least 2 complete pairs for paired t-test, got {}",
            n
        )));
    }

    let differences: Vec<f64> = first.iter().zip(second).map(|(a, b)| a - b).collect();
    let n_f = n as f64;
    let mean_diff = differences.as_slice().mean();
    let sd_diff = differences.as_slice().std_dev();
    let standard_error = sd_diff / n_f.sqrt();
    if standard_error == 0.0 {
        return Err(AnalysisError::ZeroVariance(
            "the paired differences are constant, so the t statistic is undefined".to_string(),
        ));
    }

    let t_stat = mean_diff / standard_error;
    let df = n_f - 1.0;
    let p_value = two_tailed_normal_p(t_stat);
    let interval = t_interval(mean_diff, standard_error, df, alpha)?;

    let mut result = TestResult::new(
        PAIRED_NAME,
        t_stat,
        p_value,
        PValueMethod::NormalApproximation,
        n,
        alpha,
    )
    .with_degrees_of_freedom(df)
    .with_effect_size(EffectSize::new(EffectSizeKind::CohensD, mean_diff / sd_diff))
    .with_confidence_interval(interval)
    .with_group_statistics(vec![
        group_statistics("first", first),
        group_statistics("second", second),
        group_statistics("difference", &differences),
    ]);

    if let Some(note) = normal_approximation_note(df) {
        result = result.with_note(note);
    }

    Ok(formatter::annotate(result, "paired samples t-test"))
}

#[derive(Debug, Clone, Copy)]
pub struct OneSampleTTest {
    pub test_value: f64,
}

impl OneSampleTTest {
    pub fn new(test_value: f64) -> Self {
        Self { test_value }
    }
}

impl StatisticalTest for OneSampleTTest {
    type Input<'a> = &'a [f64];

    fn name(&self) -> &'static str {
        ONE_SAMPLE_NAME
    }

    fn run(&self, input: Self::Input<'_>, alpha: SignificanceLevel) -> Result<TestResult> {
        one_sample(input, self.test_value, alpha)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentTTest;

impl StatisticalTest for IndependentTTest {
    type Input<'a> = (LabeledSample<'a>, LabeledSample<'a>);

    fn name(&self) -> &'static str {
        INDEPENDENT_NAME
    }

    fn run(&self, input: Self::Input<'_>, alpha: SignificanceLevel) -> Result<TestResult> {
        independent_samples(input.0, input.1, alpha)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PairedTTest;

impl StatisticalTest for PairedTTest {
    type Input<'a> = (&'a [f64], &'a [f64]);

    fn name(&self) -> &'static str {
        PAIRED_NAME
    }

    fn run(&self, input: Self::Input<'_>, alpha: SignificanceLevel) -> Result<TestResult> {
        paired(input.0, input.1, alpha)
    }
}
