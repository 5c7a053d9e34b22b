use datasnap_core::{AnalysisError, Dataset, Result, SignificanceLevel, StatisticalTest, TestResult};
use serde::{Deserialize, Serialize};

use crate::anova::OneWayAnova;
use crate::correlation::PearsonCorrelation;
use crate::extract::{extract_numeric, extract_pairs};
use crate::grouping::group_numeric;
use crate::ttest::{IndependentTTest, LabeledSample, OneSampleTTest, PairedTTest};

/// Which test to run and on which columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum AnalysisRequest {
    OneSampleTTest {
        column: String,
        test_value: f64,
    },
    /// Two value columns, each treated as an independent sample.
    IndependentTTest {
        first_column: String,
        second_column: String,
    },
    /// One value column split by a grouping column with exactly two labels.
    GroupedTTest {
        column: String,
        group_column: String,
    },
    PairedTTest {
        first_column: String,
        second_column: String,
    },
    OneWayAnova {
        column: String,
        group_column: String,
    },
    Correlation {
        x_column: String,
        y_column: String,
    },
}

impl AnalysisRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OneSampleTTest { .. } => "one_sample_t_test",
            Self::IndependentTTest { .. } => "independent_t_test",
            Self::GroupedTTest { .. } => "grouped_t_test",
            Self::PairedTTest { .. } => "paired_t_test",
            Self::OneWayAnova { .. } => "one_way_anova",
            Self::Correlation { .. } => "correlation",
        }
    }

    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::OneSampleTTest { column, .. } => vec![column.as_str()],
            Self::IndependentTTest {
                first_column,
                second_column,
            }
            | Self::PairedTTest {
                first_column,
                second_column,
            } => vec![first_column.as_str(), second_column.as_str()],
            Self::GroupedTTest {
                column,
                group_column,
            }
            | Self::OneWayAnova {
                column,
                group_column,
            } => vec![column.as_str(), group_column.as_str()],
            Self::Correlation { x_column, y_column } => vec![x_column.as_str(), y_column.as_str()],
        }
    }
}

/// Dispatches an [`AnalysisRequest`] against a dataset snapshot.
///
/// Holds no state: every call extracts fresh vectors and builds a new result.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisEngine;

impl AnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn run(
        &self,
        dataset: &Dataset,
        request: &AnalysisRequest,
        alpha: SignificanceLevel,
    ) -> Result<TestResult> {
        if request.columns().iter().any(|c| c.trim().is_empty()) {
            return Err(AnalysisError::Validation(
                "No column selected for analysis".to_string(),
            ));
        }

        tracing::debug!(test = request.kind(), alpha = alpha.value(), "running analysis");

        match request {
            AnalysisRequest::OneSampleTTest { column, test_value } => {
                let sample = extract_numeric(dataset, column)?;
                run_test(&OneSampleTTest::new(*test_value), &sample[..], alpha)
            }
            AnalysisRequest::IndependentTTest {
                first_column,
                second_column,
            } => {
                let first = extract_numeric(dataset, first_column)?;
                let second = extract_numeric(dataset, second_column)?;
                run_test(
                    &IndependentTTest,
                    (
                        LabeledSample::new(first_column, &first),
                        LabeledSample::new(second_column, &second),
                    ),
                    alpha,
                )
            }
            AnalysisRequest::GroupedTTest {
                column,
                group_column,
            } => {
                let groups = group_numeric(dataset, column, group_column)?;
                let samples: Vec<_> = groups.iter().collect();
                let [first, second] = samples.as_slice() else {
                    return Err(AnalysisError::InsufficientGroups(format!(
                        "Independent t-test requires exactly 2 groups in '{}', found {}",
                        group_column,
                        groups.len()
                    )));
                };
                run_test(
                    &IndependentTTest,
                    (
                        LabeledSample::new(&first.label, &first.values),
                        LabeledSample::new(&second.label, &second.values),
                    ),
                    alpha,
                )
            }
            AnalysisRequest::PairedTTest {
                first_column,
                second_column,
            } => {
                let (first, second) = extract_pairs(dataset, first_column, second_column)?;
                run_test(&PairedTTest, (&first[..], &second[..]), alpha)
            }
            AnalysisRequest::OneWayAnova {
                column,
                group_column,
            } => {
                let groups = group_numeric(dataset, column, group_column)?;
                run_test(&OneWayAnova, &groups, alpha)
            }
            AnalysisRequest::Correlation { x_column, y_column } => {
                let (x, y) = extract_pairs(dataset, x_column, y_column)?;
                run_test(&PearsonCorrelation, (&x[..], &y[..]), alpha)
            }
        }
    }
}

fn run_test<T: StatisticalTest>(
    test: &T,
    input: T::Input<'_>,
    alpha: SignificanceLevel,
) -> Result<TestResult> {
    match test.run(input, alpha) {
        Ok(result) => {
            tracing::info!(
                test = test.name(),
                statistic = result.statistic,
                p_value = result.p_value,
                significant = result.significant,
                "analysis complete"
            );
            Ok(result)
        }
        Err(err) => {
            tracing::debug!(test = test.name(), error = %err, "analysis rejected");
            Err(err)
        }
    }
}
