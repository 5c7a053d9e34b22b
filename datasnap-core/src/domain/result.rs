use serde::{Deserialize, Serialize};
use std::fmt;

use super::significance::SignificanceLevel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EffectSizeKind {
    CohensD,
    EtaSquared,
    RSquared,
}

impl EffectSizeKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::CohensD => "d",
            Self::EtaSquared => "η²",
            Self::RSquared => "R²",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EffectSize {
    pub kind: EffectSizeKind,
    pub value: f64,
}

impl EffectSize {
    pub fn new(kind: EffectSizeKind, value: f64) -> Self {
        Self { kind, value }
    }
}

/// How the p-value of a result was obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PValueMethod {
    /// Two-tailed standard-normal CDF standing in for Student's t.
    NormalApproximation,
    /// Fixed buckets over the F statistic instead of the F distribution.
    FStepApproximation,
}

/// Model assumptions. These are assumed, never tested against the data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assumptions {
    pub normality: bool,
    pub equal_variances: bool,
    pub independence: bool,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            normality: true,
            equal_variances: true,
            independence: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupStatistics {
    pub label: String,
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnovaTable {
    pub ss_between: f64,
    pub ss_within: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub ms_between: f64,
    pub ms_within: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    pub fn classify(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude >= 0.7 {
            Self::Strong
        } else if magnitude >= 0.3 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
    None,
}

impl CorrelationDirection {
    pub fn classify(r: f64) -> Self {
        if r > 0.0 {
            Self::Positive
        } else if r < 0.0 {
            Self::Negative
        } else {
            Self::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::None => "no",
        }
    }
}

impl fmt::Display for CorrelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CorrelationSummary {
    pub r: f64,
    pub r_squared: f64,
    pub t_statistic: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

/// Outcome of one hypothesis test. Built once by a calculator and handed to
/// the rendering layer as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub test_name: String,
    pub statistic: f64,
    pub p_value: f64,
    pub p_value_method: PValueMethod,
    pub degrees_of_freedom: Option<f64>,
    pub effect_size: Option<EffectSize>,
    pub sample_size: usize,
    pub alpha: SignificanceLevel,
    pub significant: bool,
    pub interpretation: String,
    pub conclusion: String,
    pub assumptions: Assumptions,
    pub confidence_interval: Option<ConfidenceInterval>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_statistics: Vec<GroupStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anova_table: Option<AnovaTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl TestResult {
    pub fn new(
        test_name: impl Into<String>,
        statistic: f64,
        p_value: f64,
        p_value_method: PValueMethod,
        sample_size: usize,
        alpha: SignificanceLevel,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            statistic,
            p_value,
            p_value_method,
            degrees_of_freedom: None,
            effect_size: None,
            sample_size,
            alpha,
            significant: alpha.is_significant(p_value),
            interpretation: String::new(),
            conclusion: String::new(),
            assumptions: Assumptions::default(),
            confidence_interval: None,
            group_statistics: Vec::new(),
            anova_table: None,
            correlation: None,
            notes: Vec::new(),
        }
    }

    pub fn with_degrees_of_freedom(mut self, df: f64) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    pub fn with_effect_size(mut self, effect_size: EffectSize) -> Self {
        self.effect_size = Some(effect_size);
        self
    }

    pub fn with_confidence_interval(mut self, interval: ConfidenceInterval) -> Self {
        self.confidence_interval = Some(interval);
        self
    }

    pub fn with_group_statistics(mut self, groups: Vec<GroupStatistics>) -> Self {
        self.group_statistics = groups;
        self
    }

    pub fn with_anova_table(mut self, table: AnovaTable) -> Self {
        self.anova_table = Some(table);
        self
    }

    pub fn with_correlation(mut self, summary: CorrelationSummary) -> Self {
        self.correlation = Some(summary);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_text(mut self, interpretation: String, conclusion: String) -> Self {
        self.interpretation = interpretation;
        self.conclusion = conclusion;
        self
    }
}
