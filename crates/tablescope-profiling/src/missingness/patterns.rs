//! Mining of co-occurring missing-value patterns.
//!
//! Every incomplete row is reduced to a signature: the sorted names of its
//! missing columns, joined with `", "`. Rows sharing a signature form one
//! pattern; complete rows form no pattern at all. Because the signature
//! covers the whole row, every incomplete row lands in exactly one pattern,
//! so the pattern percentages over the full set sum to the dataset's
//! incompleteness.

use std::collections::HashMap;

use crate::config::ProfileConfig;
use crate::dataset::{Dataset, is_missing};
use crate::types::MissingDataPattern;

/// Full mining result, before any top-N truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingPatternSummary {
    /// All patterns, sorted by row count descending (first-seen ties).
    pub patterns: Vec<MissingDataPattern>,
    /// Rows with no missing values.
    pub complete_rows: usize,
}

/// Groups incomplete rows by their missing-column signature.
#[derive(Debug, Clone, Default)]
pub struct PatternMiner {
    config: ProfileConfig,
}

impl PatternMiner {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Mine every pattern in the dataset.
    pub fn mine_all(&self, dataset: &Dataset) -> MissingPatternSummary {
        let total_rows = dataset.total_rows();
        let mut complete_rows = 0usize;
        let mut counts: HashMap<String, usize> = HashMap::new();
        // Insertion order backs the first-seen tie-break.
        let mut order: Vec<(String, Vec<String>)> = Vec::new();

        for row in dataset.rows() {
            let mut missing_columns: Vec<String> = dataset
                .columns()
                .iter()
                .filter(|column| {
                    row.get(column.as_str())
                        .map(is_missing)
                        .unwrap_or(true)
                })
                .cloned()
                .collect();

            if missing_columns.is_empty() {
                complete_rows += 1;
                continue;
            }

            missing_columns.sort();
            let signature = missing_columns.join(", ");
            let entry = counts.entry(signature.clone()).or_insert(0);
            if *entry == 0 {
                order.push((signature, missing_columns));
            }
            *entry += 1;
        }

        let mut patterns: Vec<MissingDataPattern> = order
            .into_iter()
            .map(|(signature, columns)| {
                let count = counts[&signature];
                MissingDataPattern {
                    percentage: if total_rows == 0 {
                        0.0
                    } else {
                        count as f64 / total_rows as f64 * 100.0
                    },
                    description: describe(&columns, count),
                    pattern: signature,
                    count,
                    columns,
                }
            })
            .collect();
        patterns.sort_by(|a, b| b.count.cmp(&a.count));

        MissingPatternSummary {
            patterns,
            complete_rows,
        }
    }

    /// Top patterns by row count, capped at the configured limit.
    pub fn mine(&self, dataset: &Dataset) -> Vec<MissingDataPattern> {
        let mut patterns = self.mine_all(dataset).patterns;
        patterns.truncate(self.config.max_patterns);
        patterns
    }
}

fn describe(columns: &[String], count: usize) -> String {
    let rows = if count == 1 { "row" } else { "rows" };
    format!(
        "{} {} missing values in: {}",
        count,
        rows,
        columns.join(", ")
    )
}
