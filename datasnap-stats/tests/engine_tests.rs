use approx::assert_relative_eq;
use datasnap_core::{AnalysisError, CellValue, Dataset, SignificanceLevel};
use datasnap_stats::engine::{AnalysisEngine, AnalysisRequest};
use pretty_assertions::assert_eq;
use test_case::test_case;

/// Small clinical-style table with gaps and junk cells.
fn trial() -> Dataset {
    let mut dataset = Dataset::new(["arm", "site", "before", "after", "dose", "response"]).unwrap();
    let rows: [[CellValue; 6]; 8] = [
        ["drug".into(), "north".into(), 120.0.into(), 112.0.into(), 5.0.into(), 2.1.into()],
        ["placebo".into(), "south".into(), 118.0.into(), 117.0.into(), 10.0.into(), 3.9.into()],
        ["drug".into(), "east".into(), 130.0.into(), 121.0.into(), 15.0.into(), 6.2.into()],
        ["placebo".into(), "north".into(), 125.0.into(), 124.5.into(), 20.0.into(), 8.1.into()],
        ["drug".into(), "south".into(), 128.0.into(), 119.0.into(), 25.0.into(), 9.8.into()],
        ["placebo".into(), "east".into(), 122.0.into(), "n/a".into(), 30.0.into(), 12.2.into()],
        [" ".into(), "north".into(), 119.0.into(), 118.0.into(), CellValue::Empty, 4.0.into()],
        ["placebo".into(), "south".into(), 121.0.into(), 121.5.into(), 35.0.into(), 13.9.into()],
    ];
    for row in rows {
        dataset.push_row(row).unwrap();
    }
    dataset
}

fn run(request: AnalysisRequest) -> datasnap_core::Result<datasnap_core::TestResult> {
    AnalysisEngine::new().run(&trial(), &request, SignificanceLevel::default())
}

#[test]
fn test_one_sample_request() {
    let result = run(AnalysisRequest::OneSampleTTest {
        column: "before".to_string(),
        test_value: 100.0,
    })
    .unwrap();

    assert_eq!(result.test_name, "One-Sample t-Test");
    assert_eq!(result.sample_size, 8);
    assert!(result.significant);
}

#[test]
fn test_independent_request_labels_by_column() {
    let result = run(AnalysisRequest::IndependentTTest {
        first_column: "before".to_string(),
        second_column: "after".to_string(),
    })
    .unwrap();

    assert_eq!(result.group_statistics[0].label, "before");
    assert_eq!(result.group_statistics[1].n, 7);
}

#[test]
fn test_grouped_request_skips_blank_labels() {
    let result = run(AnalysisRequest::GroupedTTest {
        column: "before".to_string(),
        group_column: "arm".to_string(),
    })
    .unwrap();

    let labels: Vec<&str> = result.group_statistics.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["drug", "placebo"]);
    assert_eq!(result.sample_size, 7);
}

#[test]
fn test_grouped_request_rejects_three_groups() {
    let err = run(AnalysisRequest::GroupedTTest {
        column: "before".to_string(),
        group_column: "site".to_string(),
    })
    .unwrap_err();

    assert_eq!(
        err,
        AnalysisError::InsufficientGroups(
            "Independent t-test requires exactly 2 groups in 'site', found 3".to_string()
        )
    );
}

#[test]
fn test_paired_request_uses_complete_rows() {
    let result = run(AnalysisRequest::PairedTTest {
        first_column: "before".to_string(),
        second_column: "after".to_string(),
    })
    .unwrap();

    assert_eq!(result.sample_size, 7);
    assert!(result.statistic > 0.0);
}

#[test]
fn test_anova_request() {
    let result = run(AnalysisRequest::OneWayAnova {
        column: "response".to_string(),
        group_column: "site".to_string(),
    })
    .unwrap();

    assert_eq!(result.group_statistics.len(), 3);
    assert_eq!(result.sample_size, 8);
    assert!(result.anova_table.is_some());
}

#[test]
fn test_correlation_request() {
    let result = run(AnalysisRequest::Correlation {
        x_column: "dose".to_string(),
        y_column: "response".to_string(),
    })
    .unwrap();

    assert_eq!(result.sample_size, 7);
    assert!(result.statistic > 0.9);
    assert_relative_eq!(
        result.effect_size.unwrap().value,
        result.statistic * result.statistic,
        epsilon = 1e-12
    );
}

#[test_case(AnalysisRequest::OneSampleTTest { column: "".to_string(), test_value: 0.0 } ; "one sample")]
#[test_case(AnalysisRequest::PairedTTest { first_column: "before".to_string(), second_column: "  ".to_string() } ; "paired")]
#[test_case(AnalysisRequest::OneWayAnova { column: "response".to_string(), group_column: "".to_string() } ; "anova")]
fn test_empty_column_name_is_validation_error(request: AnalysisRequest) {
    let err = run(request).unwrap_err();
    assert_eq!(err, AnalysisError::Validation("No column selected for analysis".to_string()));
}

#[test]
fn test_unknown_column() {
    let err = run(AnalysisRequest::Correlation {
        x_column: "dose".to_string(),
        y_column: "weight".to_string(),
    })
    .unwrap_err();

    assert_eq!(err, AnalysisError::ColumnNotFound("weight".to_string()));
}

#[test]
fn test_non_numeric_column_is_insufficient_data() {
    let err = run(AnalysisRequest::OneSampleTTest {
        column: "arm".to_string(),
        test_value: 0.0,
    })
    .unwrap_err();

    assert!(err.is_precondition());
    assert!(err.to_string().contains("got 0"));
}

#[test]
fn test_request_serde_uses_test_tag() {
    let request: AnalysisRequest = serde_json::from_value(serde_json::json!({
        "test": "one_way_anova",
        "column": "response",
        "group_column": "site",
    }))
    .unwrap();

    assert_eq!(request.kind(), "one_way_anova");
    assert_eq!(request.columns(), vec!["response", "site"]);

    let json = serde_json::to_value(&AnalysisRequest::Correlation {
        x_column: "x".to_string(),
        y_column: "y".to_string(),
    })
    .unwrap();
    assert_eq!(json["test"], "correlation");
}
