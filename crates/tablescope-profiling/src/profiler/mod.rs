//! Dataset profiling engine.
//!
//! [`Profiler`] runs the full pipeline over an immutable [`Dataset`]:
//! per-column type inference and statistics, quality issue detection,
//! missing-data pattern mining and missingness correlation, merged into a
//! single [`DataProfile`]. The merge is pure bookkeeping; nothing is
//! recomputed and no state survives between runs, so profiling the same
//! dataset twice yields the same profile (modulo the creation timestamp).

pub(crate) mod statistics;
pub(crate) mod type_inference;

use chrono::Utc;
use serde_json::Value;
use static_assertions::assert_impl_all;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

use crate::config::ProfileConfig;
use crate::dataset::{Dataset, row_fingerprint};
use crate::missingness::{MissingnessCorrelator, PatternMiner};
use crate::quality::QualityIssueDetector;
use crate::types::{
    ColumnProfile, ColumnType, DataProfile, DatasetOverview, MissingnessCorrelation,
};

/// The profiling pipeline entry point.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfileConfig,
}

assert_impl_all!(Profiler: Send, Sync);
assert_impl_all!(DataProfile: Send, Sync);

impl Profiler {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Profile a dataset, inferring every column's type.
    pub fn profile(&self, dataset: &Dataset) -> DataProfile {
        self.profile_with_types(dataset, &HashMap::new())
    }

    /// Profile a dataset with pre-assigned column types.
    ///
    /// Types in `assigned` are taken as-is; the remaining columns go
    /// through inference. Unknown column names in the map are ignored.
    pub fn profile_with_types(
        &self,
        dataset: &Dataset,
        assigned: &HashMap<String, ColumnType>,
    ) -> DataProfile {
        info!(
            rows = dataset.total_rows(),
            columns = dataset.total_columns(),
            "Profiling dataset"
        );

        let mut profiled: Vec<(String, ColumnProfile)> =
            Vec::with_capacity(dataset.total_columns());
        for column in dataset.columns() {
            let values = dataset.column_values(column);
            let column_type = assigned
                .get(column)
                .copied()
                .unwrap_or_else(|| type_inference::infer_column_type(&values, &self.config));
            debug!(column = %column, r#type = %column_type, "Profiling column");
            let profile = statistics::profile_column(&values, column_type, &self.config);
            profiled.push((column.clone(), profile));
        }

        let duplicate_rows = count_duplicate_rows(dataset);

        let summary = PatternMiner::new(self.config.clone()).mine_all(dataset);
        let complete_rows = summary.complete_rows;
        let mut missing_patterns = summary.patterns;
        missing_patterns.truncate(self.config.max_patterns);

        let correlations =
            MissingnessCorrelator::new(self.config.clone()).correlate(dataset);

        let data_quality = QualityIssueDetector::new(self.config.clone()).detect(
            &profiled,
            dataset.total_rows(),
            duplicate_rows,
        );

        let total_rows = dataset.total_rows();
        let overview = DatasetOverview {
            total_rows,
            total_columns: dataset.total_columns(),
            memory_usage: estimate_memory_usage(dataset),
            duplicate_rows,
            complete_rows,
            completeness: if total_rows == 0 {
                0.0
            } else {
                complete_rows as f64 / total_rows as f64 * 100.0
            },
        };

        info!(
            issues = data_quality.len(),
            patterns = missing_patterns.len(),
            correlations = correlations.len(),
            "Profiling complete"
        );

        DataProfile {
            overview,
            columns: profiled.into_iter().collect(),
            data_quality,
            missing_patterns,
            correlations: correlation_map(&correlations),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Rows that exactly duplicate an earlier row across all declared columns.
fn count_duplicate_rows(dataset: &Dataset) -> usize {
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    for row in dataset.rows() {
        if !seen.insert(row_fingerprint(row, dataset.columns())) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Symmetric nested map view of the retained correlations.
fn correlation_map(
    correlations: &[MissingnessCorrelation],
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut map: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for entry in correlations {
        map.entry(entry.column1.clone())
            .or_default()
            .insert(entry.column2.clone(), entry.correlation);
        map.entry(entry.column2.clone())
            .or_default()
            .insert(entry.column1.clone(), entry.correlation);
    }
    map
}

/// Rough in-memory footprint of the dataset, for display only.
fn estimate_memory_usage(dataset: &Dataset) -> usize {
    let header: usize = dataset.columns().iter().map(|c| c.len()).sum();
    let cells: usize = dataset
        .rows()
        .iter()
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(|column| match row.get(column.as_str()) {
                    Some(Value::String(s)) => s.len() + 24,
                    Some(_) | None => 8,
                })
                .sum::<usize>()
        })
        .sum();
    header + cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;
    use serde_json::json;

    fn dataset(columns: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
        let column_names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let records: Vec<Row> = rows
            .into_iter()
            .map(|cells| column_names.iter().cloned().zip(cells).collect())
            .collect();
        Dataset::new(column_names, records).unwrap()
    }

    #[test]
    fn test_overview_counts() {
        let data = dataset(
            &["a", "b"],
            vec![
                vec![json!(1), json!("x")],
                vec![json!(1), json!("x")],
                vec![Value::Null, json!("y")],
            ],
        );
        let profile = Profiler::default().profile(&data);

        assert_eq!(profile.overview.total_rows, 3);
        assert_eq!(profile.overview.total_columns, 2);
        assert_eq!(profile.overview.duplicate_rows, 1);
        assert_eq!(profile.overview.complete_rows, 2);
        assert!((profile.overview.completeness - 66.666_666).abs() < 1e-3);
        assert!(profile.overview.memory_usage > 0);
    }

    #[test]
    fn test_per_column_accounting_invariant() {
        let data = dataset(
            &["a"],
            vec![vec![json!(1)], vec![Value::Null], vec![json!("")]],
        );
        let profile = Profiler::default().profile(&data);
        let column = &profile.columns["a"];
        assert_eq!(column.count + column.missing, profile.overview.total_rows);
    }

    #[test]
    fn test_assigned_types_override_inference() {
        let data = dataset(&["a"], vec![vec![json!("1")], vec![json!("2")]]);
        let assigned: HashMap<String, ColumnType> =
            [("a".to_string(), ColumnType::String)].into();
        let profile = Profiler::default().profile_with_types(&data, &assigned);
        assert_eq!(profile.columns["a"].column_type, ColumnType::String);
        assert!(profile.columns["a"].text.is_some());
    }

    #[test]
    fn test_empty_dataset_profile_is_zeroed() {
        let profile = Profiler::default().profile(&Dataset::empty());
        assert_eq!(profile.overview.total_rows, 0);
        assert_eq!(profile.overview.completeness, 0.0);
        assert!(profile.columns.is_empty());
        assert!(profile.data_quality.is_empty());
        assert!(profile.missing_patterns.is_empty());
        assert!(profile.correlations.is_empty());
    }

    #[test]
    fn test_profile_is_deterministic() {
        let data = dataset(
            &["a", "b"],
            vec![
                vec![json!(1), Value::Null],
                vec![json!(2), Value::Null],
                vec![Value::Null, json!("x")],
                vec![json!(4), json!("y")],
            ],
        );
        let profiler = Profiler::default();
        let first = profiler.profile(&data);
        let second = profiler.profile(&data);
        assert!(first.same_content(&second));
    }

    #[test]
    fn test_correlation_map_is_symmetric() {
        let data = dataset(
            &["a", "b", "c"],
            vec![
                vec![Value::Null, Value::Null, json!(1)],
                vec![Value::Null, Value::Null, json!(2)],
                vec![json!(1), json!(2), json!(3)],
                vec![json!(4), json!(5), Value::Null],
            ],
        );
        let profile = Profiler::default().profile(&data);
        assert_eq!(profile.correlations["a"]["b"], 1.0);
        assert_eq!(profile.correlations["b"]["a"], 1.0);
    }
}
