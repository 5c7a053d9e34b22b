//! Plain-English text for test results.

use datasnap_core::{
    CorrelationStrength, CorrelationSummary, EffectSize, EffectSizeKind, SignificanceLevel,
    TestResult,
};
use serde::{Deserialize, Serialize};

/// Short data story told from a finished test result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Narrative {
    pub title: String,
    pub summary: String,
    pub recommendations: Vec<String>,
}

/// Effect-size magnitude bucket, or `None` for kinds without conventional cut-offs.
pub fn effect_magnitude(effect: EffectSize) -> Option<&'static str> {
    let value = effect.value.abs();
    let (small, medium) = match effect.kind {
        EffectSizeKind::CohensD => (0.2, 0.8),
        EffectSizeKind::EtaSquared => (0.06, 0.14),
        EffectSizeKind::RSquared => return None,
    };

    Some(if value < small {
        "small"
    } else if value < medium {
        "medium"
    } else {
        "large"
    })
}

pub fn correlation_sentence(summary: &CorrelationSummary) -> String {
    format!(
        "There is a {} {} correlation (r = {:.3}).",
        summary.strength, summary.direction, summary.r
    )
}

pub fn significance_sentence(
    test_label: &str,
    p_value: f64,
    alpha: SignificanceLevel,
    significant: bool,
) -> String {
    format!(
        "The {} {} statistically significant at the α = {} level (p = {:.4}).",
        test_label,
        if significant { "is" } else { "is not" },
        alpha,
        p_value
    )
}

pub fn conclusion(p_value: f64, alpha: SignificanceLevel, significant: bool) -> String {
    if significant {
        format!(
            "Reject the null hypothesis (p = {:.4} < α = {}).",
            p_value, alpha
        )
    } else {
        format!(
            "Fail to reject the null hypothesis (p = {:.4} ≥ α = {}).",
            p_value, alpha
        )
    }
}

pub fn interpretation(result: &TestResult, test_label: &str) -> String {
    let mut parts = Vec::with_capacity(3);

    if let Some(summary) = &result.correlation {
        parts.push(correlation_sentence(summary));
    }

    parts.push(significance_sentence(
        test_label,
        result.p_value,
        result.alpha,
        result.significant,
    ));

    if result.significant {
        if let Some(effect) = result.effect_size {
            if let Some(magnitude) = effect_magnitude(effect) {
                parts.push(format!(
                    "The effect size is {} ({} = {:.3}).",
                    magnitude,
                    effect.kind.symbol(),
                    effect.value
                ));
            }
        }
    }

    parts.join(" ")
}

/// Attach interpretation and conclusion text, consuming the draft result.
pub fn annotate(result: TestResult, test_label: &str) -> TestResult {
    let interpretation = interpretation(&result, test_label);
    let conclusion = conclusion(result.p_value, result.alpha, result.significant);
    result.with_text(interpretation, conclusion)
}

fn p_clause(p_value: f64) -> String {
    if p_value < 0.0001 {
        "p < 0.0001".to_string()
    } else {
        format!("p = {:.4}", p_value)
    }
}

/// Large Cohen's d or η², or a strong correlation.
fn has_large_effect(result: &TestResult) -> bool {
    let large_effect = result
        .effect_size
        .and_then(effect_magnitude)
        .is_some_and(|magnitude| magnitude == "large");
    let strong_correlation = result
        .correlation
        .as_ref()
        .is_some_and(|summary| summary.strength == CorrelationStrength::Strong);
    large_effect || strong_correlation
}

pub fn narrative(result: &TestResult) -> Narrative {
    let title = format!("{} Analysis Results", result.test_name);

    let (summary, mut recommendations) = if result.significant {
        (
            format!("Statistically significant results found ({})", p_clause(result.p_value)),
            vec![
                "Validate results with additional data or replication studies".to_string(),
                "Consider practical significance alongside statistical significance".to_string(),
            ],
        )
    } else {
        (
            format!(
                "No statistically significant result at the α = {} level ({})",
                result.alpha,
                p_clause(result.p_value)
            ),
            vec![
                "Consider collecting more data to increase statistical power".to_string(),
                "Review study design and measurement methods".to_string(),
                "Examine whether observed trends have practical significance despite lack of \
                 statistical significance"
                    .to_string(),
            ],
        )
    };

    if result.significant && has_large_effect(result) {
        recommendations
            .push("The large effect size suggests practical importance for decision-making".to_string());
    }

    Narrative {
        title,
        summary,
        recommendations,
    }
}
