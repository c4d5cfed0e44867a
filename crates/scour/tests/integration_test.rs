//! Integration tests for Scour.

use std::io::Write;
use tempfile::NamedTempFile;

use scour::{
    Cell, Column, ColumnKind, Finding, FindingKind, ImputationScope, NamedColumns, Outcome,
    RemediationConfig, RemediationStep, Scour, ScourConfig, ScourError, Table, analyze,
    remediate, summarize,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn make_table(columns: Vec<Column>) -> Table {
    Table::new(columns).expect("valid table")
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_analyze_basic_csv() {
    let content = "employee_id,name,age,joined\n\
                   1,Alice,30,2021-03-01\n\
                   2,Bob,25,2020-11-15\n\
                   3,Carol,28,2019-06-30\n";
    let file = create_test_file(content);

    let report = Scour::new().analyze(file.path()).expect("Analysis failed");
    let source = report.source.expect("file source");

    assert_eq!(source.row_count, 3);
    assert_eq!(source.column_count, 4);
    assert_eq!(source.format, "csv");
    assert!(report.findings.is_empty());

    let kinds: Vec<ColumnKind> = report.summary.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![ColumnKind::Numeric, ColumnKind::Text, ColumnKind::Numeric, ColumnKind::Temporal]
    );
}

#[test]
fn test_analyze_tsv_auto_detect() {
    let content = "sample_id\tcity\tscore\n\
                   S001\tParis\t1.5\n\
                   S002\tparis\t2.5\n";
    let file = create_test_file(content);

    let report = Scour::new().analyze(file.path()).expect("Analysis failed");

    assert_eq!(report.source.expect("file source").format, "tsv");
    assert!(report.findings.flags(FindingKind::CasingVariation, "city"));
}

#[test]
fn test_ragged_file_is_rejected() {
    let file = create_test_file("a,b,c\n1,2,3\n4,5\n");

    let err = Scour::new().analyze(file.path()).unwrap_err();
    assert!(matches!(err, ScourError::RaggedRow { row: 2, expected: 3, found: 2 }));
}

#[test]
fn test_custom_null_tokens_from_config() {
    let mut config = ScourConfig::default();
    config.parser.null_tokens = vec!["?".to_string()];
    let file = create_test_file("name,score\nAnn,?\nBob,NA\n");

    let report = Scour::with_config(config).analyze(file.path()).unwrap();

    assert_eq!(report.findings.missing_count("score"), 1);
    // "NA" is an ordinary text value now
    assert!(!report.findings.contains(FindingKind::WrongType));
}

// =============================================================================
// Detection properties
// =============================================================================

#[test]
fn test_iqr_boundary() {
    let table = make_table(vec![Column::numeric(
        "value",
        [1.0, 2.0, 3.0, 4.0, 5.0, 100.0].map(Some),
    )]);
    let findings = analyze(&table);

    let outliers = findings.get(FindingKind::Outlier);
    assert_eq!(outliers.len(), 1);
    match &outliers[0] {
        Finding::Outlier {
            count,
            examples,
            q1,
            q3,
            lower_bound,
            upper_bound,
            ..
        } => {
            assert_eq!(*count, 1);
            assert_eq!(examples, &vec![100.0]);
            assert!((q3 - q1 - 2.5).abs() < 1e-9);
            assert!((lower_bound - -1.5).abs() < 1e-9);
            assert!((upper_bound - 8.5).abs() < 1e-9);
        }
        other => panic!("expected outlier, got {:?}", other),
    }
}

#[test]
fn test_outlier_examples_capped() {
    let mut values: Vec<Option<f64>> = (1..=40).map(|i| Some(i as f64)).collect();
    values.extend((0..8).map(|i| Some(1000.0 + i as f64)));
    let table = make_table(vec![Column::numeric("value", values)]);

    match &analyze(&table).get(FindingKind::Outlier)[0] {
        Finding::Outlier { count, examples, .. } => {
            assert_eq!(*count, 8);
            assert_eq!(examples, &vec![1000.0, 1001.0, 1002.0, 1003.0, 1004.0]);
        }
        other => panic!("expected outlier, got {:?}", other),
    }
}

#[test]
fn test_column_in_several_kinds() {
    let table = make_table(vec![Column::text(
        "code",
        vec![Some("A1 "), Some("a1"), Some("7"), None],
    )]);
    let findings = analyze(&table);

    assert!(findings.flags(FindingKind::MissingValues, "code"));
    assert!(findings.flags(FindingKind::WhitespaceIssue, "code"));
    assert!(findings.flags(FindingKind::CasingVariation, "code"));
    assert!(findings.flags(FindingKind::WrongType, "code"));
}

#[test]
fn test_date_column_with_garbage() {
    let table = make_table(vec![Column::text(
        "visit",
        vec![Some("2024-01-15"), Some("01/20/2024"), Some("soon"), None],
    )]);
    let findings = analyze(&table);

    match &findings.get(FindingKind::DateFormatInconsistency)[..] {
        [Finding::DateFormatInconsistency { parsed, unparsed, .. }] => {
            assert_eq!((*parsed, *unparsed), (2, 1));
        }
        other => panic!("expected one date finding, got {:?}", other),
    }
}

// =============================================================================
// Remediation properties
// =============================================================================

#[test]
fn test_whitespace_remediation() {
    let table = make_table(vec![Column::text("name", vec![Some("a"), Some("a "), Some(" a")])]);
    let findings = analyze(&table);
    assert!(findings.contains(FindingKind::WhitespaceIssue));

    let cleaned = remediate(&table, &findings);
    assert_eq!(cleaned.table.column("name").unwrap().cells, vec![Cell::text("a"); 3]);

    let after = analyze(&cleaned.table);
    assert!(!after.contains(FindingKind::WhitespaceIssue));
    assert!(!after.contains(FindingKind::CasingVariation));
}

#[test]
fn test_casing_collapse() {
    let table = make_table(vec![Column::text(
        "gender",
        vec![Some("Male"), Some("male"), Some("Female")],
    )]);
    let findings = analyze(&table);

    match &findings.get(FindingKind::CasingVariation)[..] {
        [Finding::CasingVariation { distinct, normalized, .. }] => {
            assert_eq!((*distinct, *normalized), (3, 2));
        }
        other => panic!("expected casing finding, got {:?}", other),
    }

    let cleaned = remediate(&table, &findings);
    assert_eq!(
        cleaned.table.column("gender").unwrap().cells,
        vec![Cell::text("male"), Cell::text("male"), Cell::text("female")]
    );
}

#[test]
fn test_missing_value_imputation() {
    let table = make_table(vec![Column::numeric("score", vec![Some(10.0), None, Some(30.0)])]);
    let cleaned = remediate(&table, &analyze(&table));

    assert_eq!(cleaned.table.column("score").unwrap().numbers(), vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_uniqueness_remediation() {
    let table = make_table(vec![
        Column::numeric("employee_id", [1.0, 2.0, 2.0, 3.0].map(Some)),
        Column::text("name", vec![Some("a"), Some("b"), Some("c"), Some("d")]),
    ]);
    let findings = analyze(&table);

    match &findings.get(FindingKind::UniquenessViolation)[..] {
        [Finding::UniquenessViolation { count, examples, .. }] => {
            assert_eq!(*count, 1);
            assert_eq!(examples, &vec![Cell::Number(2.0)]);
        }
        other => panic!("expected uniqueness finding, got {:?}", other),
    }

    let cleaned = remediate(&table, &findings);
    assert_eq!(cleaned.table.row_count(), 3);
    assert_eq!(cleaned.table.column("name").unwrap().cells[1], Cell::text("b"));
}

#[test]
fn test_row_count_accounting() {
    let table = make_table(vec![
        Column::text("order_id", vec![Some("A"), Some("A"), Some("B"), Some("B"), Some("C")]),
        Column::numeric("qty", [1.0, 1.0, 2.0, 5.0, 3.0].map(Some)),
    ]);
    let findings = analyze(&table);
    let cleaned = remediate(&table, &findings);

    let duplicate_rows = findings.duplicate_rows().len();
    let unique_removed = cleaned.log.rows_removed_by(RemediationStep::EnforceUniqueness);

    assert_eq!(duplicate_rows, 1);
    assert_eq!(unique_removed, 1);
    assert_eq!(duplicate_rows + unique_removed, cleaned.log.rows_removed());
    assert_eq!(table.row_count() - cleaned.table.row_count(), cleaned.log.rows_removed());
}

#[test]
fn test_idempotence_on_cleaned_output() {
    let content = "customer_id,name,city,spend\n\
                   1,Ann , Paris,10\n\
                   2,Bob,paris,\n\
                   2,Cy,PARIS,30\n\
                   3,Dee,Rome,20\n\
                   3,Dee,Rome,20\n";
    let file = create_test_file(content);
    let scour = Scour::new();

    let first = scour.clean(file.path()).unwrap();
    let second = scour.analyze_table(&first.table);

    for kind in [
        FindingKind::DuplicateRows,
        FindingKind::WhitespaceIssue,
        FindingKind::CasingVariation,
        FindingKind::UniquenessViolation,
        FindingKind::MissingValues,
    ] {
        assert!(!second.findings.contains(kind), "{} remained", kind.label());
    }
}

#[test]
fn test_wrong_type_then_impute() {
    let table = make_table(vec![Column::text(
        "price",
        vec![Some("10"), Some("n/a-ish"), Some("30"), None],
    )]);
    let findings = analyze(&table);
    assert_eq!(findings.missing_count("price"), 1);

    let cleaned = remediate(&table, &findings);
    let price = cleaned.table.column("price").unwrap();
    assert_eq!(price.kind, ColumnKind::Numeric);
    assert_eq!(price.numbers(), vec![10.0, 20.0, 30.0, 20.0]);
}

#[test]
fn test_reported_scope_only_fills_reported_columns() {
    let table = make_table(vec![Column::text(
        "price",
        vec![Some("10"), Some("oops"), Some("30")],
    )]);
    let scour = Scour::with_config(ScourConfig {
        remediation: RemediationConfig {
            imputation_scope: ImputationScope::Reported,
            ..RemediationConfig::default()
        },
        ..ScourConfig::default()
    });

    let report = scour.clean_table(&table);
    let price = report.table.column("price").unwrap();
    assert_eq!(price.cells[1], Cell::Absent);
}

#[test]
fn test_report_only_kinds_are_logged_as_skipped() {
    let table = make_table(vec![
        Column::numeric("value", [1.0, 2.0, 3.0, 4.0, 5.0, 100.0].map(Some)),
        Column::text(
            "when",
            vec![Some("2024-01-01"), Some("x"), Some("2024-01-02"), Some("y"), Some("2024-01-03"), Some("z")],
        ),
    ]);
    let cleaned = remediate(&table, &analyze(&table));

    let skipped: Vec<RemediationStep> = cleaned.log.skipped().map(|a| a.step).collect();
    assert_eq!(
        skipped,
        vec![
            RemediationStep::ReportOnly(FindingKind::Outlier),
            RemediationStep::ReportOnly(FindingKind::DateFormatInconsistency),
        ]
    );
    assert!(cleaned
        .log
        .skipped()
        .all(|a| a.outcome == Outcome::Skipped { reason: "report only".to_string() }));
    assert_eq!(cleaned.table, table);
}

#[test]
fn test_input_table_never_mutated() {
    let table = make_table(vec![
        Column::text("name", vec![Some(" A"), Some("a"), Some(" A")]),
        Column::numeric("n", vec![Some(1.0), None, Some(1.0)]),
    ]);
    let snapshot = table.clone();

    let _ = remediate(&table, &analyze(&table));
    assert_eq!(table, snapshot);
}

// =============================================================================
// Identifier policy
// =============================================================================

#[test]
fn test_identifier_policy_override() {
    let table = make_table(vec![
        Column::text("valid", vec![Some("yes"), Some("yes")]),
        Column::text("sku", vec![Some("k1"), Some("k1")]),
        Column::numeric("n", vec![Some(1.0), Some(2.0)]),
    ]);

    let default = Scour::new().analyze_table(&table);
    assert_eq!(default.findings.columns(FindingKind::UniquenessViolation), vec!["valid"]);

    let strict = Scour::new()
        .with_identifier_policy(NamedColumns::new(["sku"]))
        .analyze_table(&table);
    assert_eq!(strict.findings.columns(FindingKind::UniquenessViolation), vec!["sku"]);
}

#[test]
fn test_closure_identifier_policy() {
    let table = make_table(vec![Column::text("ref", vec![Some("r"), Some("r")])]);
    let report = Scour::new()
        .with_identifier_policy(|c: &Column| c.name == "ref")
        .analyze_table(&table);

    assert!(report.findings.contains(FindingKind::UniquenessViolation));
}

// =============================================================================
// Summary and serialization
// =============================================================================

#[test]
fn test_summary_of_loaded_file() {
    let file = create_test_file("age,city\n10,Rome\n,Rome\n30,Oslo\n");
    let (table, _) = Scour::new().load(file.path()).unwrap();
    let summary = summarize(&table);

    let age = summary[0].numeric.as_ref().unwrap();
    assert_eq!(age.mean, Some(20.0));
    assert_eq!(summary[0].missing, 1);

    let city = summary[1].text.as_ref().unwrap();
    assert_eq!(city.unique, 2);
    assert_eq!(city.top_values[0].value, "Rome");
    assert_eq!(city.top_values[0].count, 2);
}

#[test]
fn test_report_serializes_to_json() {
    let file = create_test_file("id,name\n1,a \n1,a \n");
    let report = Scour::new().analyze(file.path()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["findings"]["duplicate_rows"][0]["count"], 1);
    assert_eq!(json["findings"]["whitespace_issue"][0]["column"], "name");
    assert_eq!(json["overview"]["by_kind"]["duplicate_rows"], 1);
    assert_eq!(json["source"]["format"], "csv");
}
