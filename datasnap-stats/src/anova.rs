//! One-way ANOVA.
//!
//! The p-value is not read from the F distribution. It comes from a fixed
//! step function over the F statistic (see [`f_step_p_value`]) and is
//! flagged as such on every result.

use datasnap_core::{
    AnalysisError, AnovaTable, EffectSize, EffectSizeKind, PValueMethod, Result,
    SignificanceLevel, StatisticalTest, TestResult,
};
use statrs::statistics::Statistics;

use crate::distribution::group_statistics;
use crate::formatter;
use crate::grouping::GroupMap;

pub const ANOVA_NAME: &str = "One-Way ANOVA";

pub const F_STEP_NOTE: &str = "p-value is a coarse step approximation (F > 4: 0.001, F > 3: 0.01, \
F > 2: 0.05, otherwise 0.1), not an exact F-distribution p-value";

/// Bucketed stand-in for the F-distribution upper tail.
pub fn f_step_p_value(f_stat: f64) -> f64 {
    if f_stat > 4.0 {
        0.001
    } else if f_stat > 3.0 {
        0.01
    } else if f_stat > 2.0 {
        0.05
    } else {
        0.1
    }
}

pub fn one_way(groups: &GroupMap, alpha: SignificanceLevel) -> Result<TestResult> {
    let k = groups.len();
    if k < 2 {
        return Err(AnalysisError::InsufficientGroups(format!(
            "ANOVA requires at least 2 groups, found {}",
            k
        )));
    }

    if let Some(group) = groups.iter().find(|g| g.values.len() < 2) {
        return Err(AnalysisError::InsufficientData(format!(
            "Group '{}' has fewer than 2 values",
            group.label
        )));
    }

    let total_n = groups.total_len();
    let grand_mean = groups
        .iter()
        .flat_map(|g| g.values.iter())
        .sum::<f64>()
        / total_n as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups.iter() {
        let group_mean = group.values.as_slice().mean();
        ss_between += group.values.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += group
            .values
            .iter()
            .map(|x| (x - group_mean).powi(2))
            .sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (total_n - k) as f64;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;
    if ms_within == 0.0 {
        return Err(AnalysisError::ZeroVariance(
            "every group is constant, so the within-group mean square is zero".to_string(),
        ));
    }

    let f_stat = ms_between / ms_within;
    let p_value = f_step_p_value(f_stat);
    let eta_squared = ss_between / (ss_between + ss_within);

    tracing::debug!(groups = k, total_n, f_stat, "computed one-way ANOVA");

    let result = TestResult::new(
        ANOVA_NAME,
        f_stat,
        p_value,
        PValueMethod::FStepApproximation,
        total_n,
        alpha,
    )
    .with_degrees_of_freedom(df_between)
    .with_effect_size(EffectSize::new(EffectSizeKind::EtaSquared, eta_squared))
    .with_anova_table(AnovaTable {
        ss_between,
        ss_within,
        df_between,
        df_within,
        ms_between,
        ms_within,
    })
    .with_group_statistics(
        groups
            .iter()
            .map(|g| group_statistics(g.label.as_str(), &g.values))
            .collect(),
    )
    .with_note(F_STEP_NOTE);

    Ok(formatter::annotate(result, "one-way ANOVA"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OneWayAnova;

impl StatisticalTest for OneWayAnova {
    type Input<'a> = &'a GroupMap;

    fn name(&self) -> &'static str {
        ANOVA_NAME
    }

    fn run(&self, input: Self::Input<'_>, alpha: SignificanceLevel) -> Result<TestResult> {
        one_way(input, alpha)
    }
}
