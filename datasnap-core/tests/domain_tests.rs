use datasnap_core::domain::*;
use datasnap_core::error::AnalysisError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use test_case::test_case;

// ===== CellValue Coercion Tests =====

#[rstest]
#[case(CellValue::Number(3.5), Some(3.5))]
#[case(CellValue::Text("12".to_string()), Some(12.0))]
#[case(CellValue::Text("  -4.25 ".to_string()), Some(-4.25))]
#[case(CellValue::Text("1e3".to_string()), Some(1000.0))]
#[case(CellValue::Text("".to_string()), None)]
#[case(CellValue::Text("   ".to_string()), None)]
#[case(CellValue::Text("abc".to_string()), None)]
#[case(CellValue::Text("12abc".to_string()), None)]
#[case(CellValue::Text("NaN".to_string()), None)]
#[case(CellValue::Text("inf".to_string()), None)]
#[case(CellValue::Number(f64::NAN), None)]
#[case(CellValue::Number(f64::INFINITY), None)]
#[case(CellValue::Empty, None)]
fn test_cell_numeric_coercion(#[case] cell: CellValue, #[case] expected: Option<f64>) {
    assert_eq!(cell.as_f64(), expected);
}

#[test]
fn test_cell_from_raw() {
    assert_eq!(CellValue::from_raw(""), CellValue::Empty);
    assert_eq!(CellValue::from_raw("x"), CellValue::Text("x".to_string()));
    assert_eq!(CellValue::from(None::<f64>), CellValue::Empty);
    assert_eq!(CellValue::from(Some(2.0)), CellValue::Number(2.0));
}

#[test_case(CellValue::Text("  A ".to_string()), Some("A") ; "trimmed text")]
#[test_case(CellValue::Text("   ".to_string()), None ; "blank text")]
#[test_case(CellValue::Number(3.0), Some("3") ; "integral number")]
#[test_case(CellValue::Number(2.5), Some("2.5") ; "fractional number")]
#[test_case(CellValue::Empty, None ; "empty cell")]
fn test_cell_label(cell: CellValue, expected: Option<&str>) {
    assert_eq!(cell.label().as_deref(), expected);
}

#[test]
fn test_cell_missing() {
    assert!(CellValue::Empty.is_missing());
    assert!(CellValue::Text(" ".to_string()).is_missing());
    assert!(!CellValue::Text("x".to_string()).is_missing());
    assert!(!CellValue::Number(0.0).is_missing());
}

#[test]
fn test_cell_deserialize_untagged() {
    let cells: Vec<CellValue> = serde_json::from_str(r#"[null, 1.5, "text", 7]"#).unwrap();
    assert_eq!(
        cells,
        vec![
            CellValue::Empty,
            CellValue::Number(1.5),
            CellValue::Text("text".to_string()),
            CellValue::Number(7.0),
        ]
    );
}

// ===== Dataset Tests =====

#[test]
fn test_dataset_push_rows() {
    let mut dataset = Dataset::new(["score", "group"]).unwrap();
    dataset.push_row(["10", "A"]).unwrap();
    dataset.push_row(["12", "B"]).unwrap();

    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.column_count(), 2);
    assert_eq!(dataset.columns(), &["score".to_string(), "group".to_string()]);
    assert_eq!(dataset.column_index("group"), Some(1));
    assert_eq!(dataset.column_index("missing"), None);
}

#[test]
fn test_dataset_rejects_wrong_width() {
    let mut dataset = Dataset::new(["a", "b"]).unwrap();
    let err = dataset.push_row(["1"]).unwrap_err();

    assert!(matches!(err, AnalysisError::Validation(_)));
    assert!(err.to_string().contains("1 values but dataset has 2 columns"));
}

#[test]
fn test_dataset_rejects_duplicate_columns() {
    let err = Dataset::new(["a", "a"]).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Validation("Duplicate column name 'a'".to_string())
    );
}

#[test]
fn test_dataset_from_records_unions_columns() {
    let records = vec![
        vec![("x", CellValue::Number(1.0)), ("y", CellValue::from("a"))],
        vec![("y", CellValue::from("b")), ("z", CellValue::Number(9.0))],
    ];
    let dataset = Dataset::from_records(records).unwrap();

    assert_eq!(dataset.columns(), &["x".to_string(), "y".to_string(), "z".to_string()]);
    assert_eq!(dataset.rows()[1][0], CellValue::Empty);
    assert_eq!(dataset.rows()[1][1], CellValue::Text("b".to_string()));
    assert_eq!(dataset.rows()[0][2], CellValue::Empty);
}

#[test]
fn test_dataset_column_values() {
    let mut dataset = Dataset::new(["v"]).unwrap();
    dataset.push_row([1.0]).unwrap();
    dataset.push_row([2.0]).unwrap();

    let values: Vec<_> = dataset.column_values("v").unwrap().cloned().collect();
    assert_eq!(values, vec![CellValue::Number(1.0), CellValue::Number(2.0)]);

    match dataset.column_values("nope") {
        Err(AnalysisError::ColumnNotFound(name)) => assert_eq!(name, "nope"),
        _ => panic!("Expected ColumnNotFound"),
    };
}

// ===== SignificanceLevel Tests =====

#[test]
fn test_significance_level_default() {
    assert_eq!(SignificanceLevel::default().value(), 0.05);
}

#[test_case(0.0 ; "zero")]
#[test_case(1.0 ; "one")]
#[test_case(-0.1 ; "negative")]
#[test_case(f64::NAN ; "nan")]
fn test_significance_level_rejects(alpha: f64) {
    assert!(matches!(
        SignificanceLevel::new(alpha),
        Err(AnalysisError::InvalidAlpha(_))
    ));
}

#[rstest]
#[case(0.0001, 0.001)]
#[case(0.05, 0.05)]
#[case(0.5, 0.2)]
fn test_significance_level_clamped(#[case] input: f64, #[case] expected: f64) {
    assert_eq!(SignificanceLevel::clamped(input).value(), expected);
}

#[test]
fn test_significance_decision_is_strict() {
    let alpha = SignificanceLevel::new(0.05).unwrap();
    assert!(alpha.is_significant(0.049));
    assert!(!alpha.is_significant(0.05));
}

#[test]
fn test_significance_level_serde() {
    let alpha: SignificanceLevel = serde_json::from_str("0.01").unwrap();
    assert_eq!(alpha.value(), 0.01);
    assert!(serde_json::from_str::<SignificanceLevel>("1.5").is_err());
}

// ===== Result Model Tests =====

#[rstest]
#[case(0.95, CorrelationStrength::Strong)]
#[case(-0.7, CorrelationStrength::Strong)]
#[case(0.5, CorrelationStrength::Moderate)]
#[case(-0.3, CorrelationStrength::Moderate)]
#[case(0.29, CorrelationStrength::Weak)]
fn test_correlation_strength(#[case] r: f64, #[case] expected: CorrelationStrength) {
    assert_eq!(CorrelationStrength::classify(r), expected);
}

#[test]
fn test_correlation_direction() {
    assert_eq!(CorrelationDirection::classify(0.2), CorrelationDirection::Positive);
    assert_eq!(CorrelationDirection::classify(-0.2), CorrelationDirection::Negative);
    assert_eq!(CorrelationDirection::classify(0.0).as_str(), "no");
}

#[test]
fn test_test_result_builder() {
    let alpha = SignificanceLevel::default();
    let result = TestResult::new("Demo", 2.5, 0.01, PValueMethod::NormalApproximation, 10, alpha)
        .with_degrees_of_freedom(9.0)
        .with_effect_size(EffectSize::new(EffectSizeKind::CohensD, 0.8))
        .with_note("approximate");

    assert!(result.significant);
    assert_eq!(result.degrees_of_freedom, Some(9.0));
    assert_eq!(result.effect_size.unwrap().kind, EffectSizeKind::CohensD);
    assert_eq!(result.assumptions, Assumptions::default());
    assert_eq!(result.notes, vec!["approximate".to_string()]);
}

#[test]
fn test_test_result_serialization_skips_empty_sections() {
    let result = TestResult::new(
        "Demo",
        1.0,
        0.3,
        PValueMethod::NormalApproximation,
        4,
        SignificanceLevel::default(),
    );
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["p_value_method"], "normal_approximation");
    assert_eq!(json["significant"], false);
    assert!(json.get("group_statistics").is_none());
    assert!(json.get("anova_table").is_none());

    let back: TestResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_confidence_interval_helpers() {
    let ci = ConfidenceInterval { level: 0.95, lower: 1.0, upper: 3.0 };
    assert!(ci.contains(2.0));
    assert!(!ci.contains(3.5));
    assert_eq!(ci.width(), 2.0);
}

// ===== Property-based Tests =====

proptest! {
    #[test]
    fn test_coercion_of_formatted_floats(value in -1.0e9f64..1.0e9f64) {
        let cell = CellValue::Text(value.to_string());
        prop_assert_eq!(cell.as_f64(), Some(value));
    }

    #[test]
    fn test_coercion_never_yields_non_finite(text in "\\PC{0,12}") {
        if let Some(v) = CellValue::Text(text).as_f64() {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn test_clamped_alpha_in_interactive_range(alpha in -10.0f64..10.0f64) {
        let level = SignificanceLevel::clamped(alpha).value();
        prop_assert!(level >= SignificanceLevel::MIN_INTERACTIVE);
        prop_assert!(level <= SignificanceLevel::MAX_INTERACTIVE);
    }
}
