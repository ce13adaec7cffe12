//! End-to-end tests for the profiling pipeline.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Once;
use tablescope_profiling::{
    ColumnType, DataProfile, Dataset, ProfileConfig, Profiler, Row, Severity,
};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

fn dataset(columns: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
    let column_names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let records: Vec<Row> = rows
        .into_iter()
        .map(|cells| column_names.iter().cloned().zip(cells).collect())
        .collect();
    Dataset::new(column_names, records).unwrap()
}

fn profile(data: &Dataset) -> DataProfile {
    init_tracing();
    Profiler::default().profile(data)
}

#[test]
fn missing_counts_patterns_and_completeness() {
    let data = dataset(
        &["A", "B"],
        vec![
            vec![json!(1), Value::Null],
            vec![Value::Null, json!(2)],
            vec![json!(3), Value::Null],
            vec![json!(4), json!(4)],
        ],
    );
    let result = profile(&data);

    let a = &result.columns["A"];
    assert_eq!(a.missing, 1);
    assert_eq!(a.missing_percentage, 25.0);
    let b = &result.columns["B"];
    assert_eq!(b.missing, 2);
    assert_eq!(b.missing_percentage, 50.0);

    assert_eq!(result.missing_patterns.len(), 2);
    assert_eq!(result.missing_patterns[0].pattern, "B");
    assert_eq!(result.missing_patterns[0].count, 2);
    assert_eq!(result.missing_patterns[1].pattern, "A");
    assert_eq!(result.missing_patterns[1].count, 1);

    assert_eq!(result.overview.complete_rows, 1);
    assert_eq!(result.overview.completeness, 25.0);
}

#[test]
fn degenerate_missingness_pairs_are_excluded() {
    // "full" is never missing, "empty" is always missing: neither pair is
    // computable and the correlation map stays empty.
    let data = dataset(
        &["full", "empty", "half"],
        vec![
            vec![json!(1), Value::Null, json!(1)],
            vec![json!(2), Value::Null, Value::Null],
        ],
    );
    let result = profile(&data);

    assert!(!result.correlations.contains_key("full"));
    assert!(!result.correlations.contains_key("empty"));
    for nested in result.correlations.values() {
        for value in nested.values() {
            assert!((-1.0..=1.0).contains(value));
        }
    }
}

#[test]
fn identical_rows_count_as_duplicates() {
    let data = dataset(
        &["x", "y"],
        vec![
            vec![json!("a"), json!(1)],
            vec![json!("b"), json!(2)],
            vec![json!("a"), json!(1)],
        ],
    );
    assert_eq!(profile(&data).overview.duplicate_rows, 1);
}

#[test]
fn numeric_column_quartiles_and_outliers() {
    let data = dataset(
        &["n"],
        vec![
            vec![json!(1)],
            vec![json!(2)],
            vec![json!(3)],
            vec![json!(4)],
            vec![json!(100)],
        ],
    );
    let result = profile(&data);
    let column = &result.columns["n"];
    assert_eq!(column.column_type, ColumnType::Number);

    let stats = column.numeric.as_ref().unwrap();
    assert_eq!(stats.q1, 2.0);
    assert_eq!(stats.median, 3.0);
    assert_eq!(stats.q3, 4.0);
    assert_eq!(stats.outliers, vec![100.0]);

    // The outlier also surfaces as a quality issue: 1 of 5 values is 20%.
    assert!(result.data_quality.iter().any(|issue| {
        issue.column.as_deref() == Some("n") && issue.severity == Severity::High
    }));
}

#[test]
fn empty_dataset_profiles_without_error() {
    let result = profile(&Dataset::empty());
    assert_eq!(result.overview.total_rows, 0);
    assert_eq!(result.overview.completeness, 0.0);
    assert!(result.columns.is_empty());
    assert!(result.data_quality.is_empty());
    assert!(result.missing_patterns.is_empty());
    assert!(result.correlations.is_empty());
}

#[test]
fn per_column_accounting_invariants() {
    let data = dataset(
        &["a", "b", "c"],
        vec![
            vec![json!(1), json!(""), json!("x")],
            vec![Value::Null, json!("b"), json!("y")],
            vec![json!(3), json!("c"), Value::Null],
        ],
    );
    let result = profile(&data);

    for column in result.columns.values() {
        assert_eq!(column.count + column.missing, result.overview.total_rows);
        assert!((0.0..=100.0).contains(&column.missing_percentage));
        assert!((0.0..=100.0).contains(&column.unique_percentage));
    }
}

#[test]
fn pattern_percentages_sum_to_incompleteness() {
    let data = dataset(
        &["a", "b", "c"],
        vec![
            vec![Value::Null, json!(1), json!(2)],
            vec![Value::Null, Value::Null, json!(3)],
            vec![json!(1), json!(2), json!(3)],
            vec![json!(4), Value::Null, Value::Null],
            vec![Value::Null, json!(5), json!(6)],
        ],
    );
    init_tracing();
    let config = ProfileConfig::default();
    let result = Profiler::new(config.clone()).profile(&data);

    // Sum over the full pattern set, not just the retained top-N.
    let summary = tablescope_profiling::PatternMiner::new(config).mine_all(&data);
    let sum: f64 = summary.patterns.iter().map(|p| p.percentage).sum();
    assert!((sum - (100.0 - result.overview.completeness)).abs() < 1e-9);
}

#[test]
fn profiling_twice_is_idempotent() {
    let data = dataset(
        &["a", "b"],
        vec![
            vec![json!("x"), json!(1)],
            vec![Value::Null, json!(2)],
            vec![json!("x"), Value::Null],
        ],
    );
    init_tracing();
    let profiler = Profiler::default();
    let first = profiler.profile(&data);
    let second = profiler.profile(&data);
    assert!(first.same_content(&second));
}

#[test]
fn order_independent_statistics_survive_row_permutation() {
    let rows = vec![
        vec![json!(1), Value::Null],
        vec![json!(2), json!("x")],
        vec![json!(3), json!("y")],
        vec![json!(100), Value::Null],
    ];
    let mut reversed = rows.clone();
    reversed.reverse();

    let forward = profile(&dataset(&["n", "s"], rows));
    let backward = profile(&dataset(&["n", "s"], reversed));

    assert_eq!(forward.overview, backward.overview);
    let (f, b) = (&forward.columns["n"], &backward.columns["n"]);
    assert_eq!(f.missing, b.missing);
    let (fs, bs) = (
        f.numeric.as_ref().unwrap(),
        b.numeric.as_ref().unwrap(),
    );
    assert_eq!(fs.mean, bs.mean);
    assert_eq!(fs.std, bs.std);
    assert_eq!(fs.median, bs.median);
    assert_eq!(forward.correlations, backward.correlations);
}

#[test]
fn profile_json_round_trips() {
    let data = dataset(
        &["name", "age", "joined", "active"],
        vec![
            vec![json!("Ann"), json!(34), json!("2024-01-15"), json!(true)],
            vec![json!("Bob"), Value::Null, json!("2024-02-20"), json!(false)],
            vec![json!(""), json!(29), json!("2024-03-25"), json!(true)],
        ],
    );
    let result = profile(&data);

    let serialized = serde_json::to_string(&result).unwrap();
    let back: DataProfile = serde_json::from_str(&serialized).unwrap();
    assert_eq!(result, back);

    // Wire names are camelCase with a flat per-column layout.
    let tree: Value = serde_json::from_str(&serialized).unwrap();
    assert!(tree["overview"]["totalRows"].is_number());
    assert!(tree["generatedAt"].is_string());
    assert_eq!(tree["columns"]["age"]["type"], "number");
    assert!(tree["columns"]["age"]["mean"].is_number());
}

#[test]
fn inferred_types_across_representations() {
    let data = dataset(
        &["price", "flag", "when", "label"],
        vec![
            vec![json!("$1,200"), json!("yes"), json!("2024-01-15"), json!("a")],
            vec![json!("300"), json!("no"), json!("2024-02-02"), json!("b")],
            vec![json!("55"), json!("yes"), json!("2024-03-09"), json!("c")],
        ],
    );
    let result = profile(&data);
    assert_eq!(result.columns["price"].column_type, ColumnType::Number);
    assert_eq!(result.columns["flag"].column_type, ColumnType::Boolean);
    assert_eq!(result.columns["when"].column_type, ColumnType::Date);
    assert_eq!(result.columns["label"].column_type, ColumnType::String);
}

#[test]
fn contract_violations_surface_as_errors() {
    let duplicate = Dataset::new(
        vec!["a".to_string(), "a".to_string()],
        vec![],
    );
    assert!(duplicate.unwrap_err().is_contract_violation());

    let mut row: Row = HashMap::new();
    row.insert("a".to_string(), json!(1));
    let absent = Dataset::new(vec!["a".to_string(), "b".to_string()], vec![row]);
    let err = absent.unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
}

#[test]
fn error_markers_become_anomalies_not_failures() {
    let data = dataset(
        &["n"],
        vec![
            vec![json!(1)],
            vec![json!(2)],
            vec![json!(3)],
            vec![json!(4)],
            vec![json!(5)],
            vec![json!(6)],
            vec![json!(7)],
            vec![json!(8)],
            vec![json!(9)],
            vec![json!("ERROR")],
        ],
    );
    let result = profile(&data);
    let column = &result.columns["n"];
    assert_eq!(column.column_type, ColumnType::Number);
    assert_eq!(column.anomalies.len(), 1);
    assert!(column.anomalies[0].contains("ERROR"));
}
