//! In-memory dataset consumed by the profiling engine.
//!
//! The dataset is produced by an external ingestion layer (CSV/Excel/JSON
//! readers) and treated as read-only for the entire profiling run. Cells
//! are dynamically typed [`serde_json::Value`]s so a single column may mix
//! representations (e.g. numbers stored as text); the engine, not the
//! container, decides what that means.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::error::{ProfilingError, Result};

/// One row record: column name to cell value.
pub type Row = HashMap<String, Value>;

/// The missingness predicate used everywhere in the engine.
///
/// A value is missing when it is JSON `null` or exactly the empty string.
/// This is literal equality: whitespace-only strings are present, not
/// missing. Callers with legitimately-empty-string domains (optional
/// free-text fields) should be aware that empty strings count as missing.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Ordered collection of row records with a declared column list.
///
/// Construction validates the caller contract: column names must be unique
/// and every row must carry every declared column (a missing value is a
/// `null` or empty-string marker, never an absent key). Keys outside the
/// declared column list are ignored.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, validating the ingestion contract.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::DuplicateColumn`] when the declared column
    /// list repeats a name, and [`ProfilingError::ColumnNotFound`] when a
    /// row omits a declared column entirely.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ProfilingError::DuplicateColumn(column.clone()));
            }
        }

        for (row_index, row) in rows.iter().enumerate() {
            for column in &columns {
                if !row.contains_key(column) {
                    return Err(ProfilingError::ColumnNotFound {
                        column: column.clone(),
                        row: row_index,
                    });
                }
            }
        }

        Ok(Self { columns, rows })
    }

    /// Dataset with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Declared column names, in profiling/iteration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row records in insertion order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn total_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// All values of one column, in row order.
    ///
    /// Returns an empty vector for an undeclared column name.
    pub fn column_values(&self, column: &str) -> Vec<&Value> {
        if !self.columns.iter().any(|c| c == column) {
            return Vec::new();
        }
        self.rows
            .iter()
            .map(|row| row.get(column).unwrap_or(&Value::Null))
            .collect()
    }

    /// Content hash over columns and cell values, for caller-managed
    /// profile caching: key the cache by this hash and invalidate
    /// wholesale on any change.
    ///
    /// Stable for a given dataset within a process; not a persistent
    /// fingerprint format.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.columns.hash(&mut hasher);
        for row in &self.rows {
            row_fingerprint(row, &self.columns).hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Canonical representation of a row restricted to the declared columns,
/// used for exact duplicate-row detection and content hashing.
pub(crate) fn row_fingerprint(row: &Row, columns: &[String]) -> String {
    let mut parts = Vec::with_capacity(columns.len());
    for column in columns {
        let value = row.get(column).unwrap_or(&Value::Null);
        parts.push(crate::utils::value_key(value));
    }
    parts.join("\u{1f}")
}
