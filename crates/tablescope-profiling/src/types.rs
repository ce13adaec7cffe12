//! Report data model for the profiling engine.
//!
//! These types form the exported JSON document: field names are camelCase
//! on the wire and the whole profile round-trips through serde_json
//! without loss.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Semantic type assigned to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text or categorical values.
    String,
    /// Numeric values (integer or float, including numeric-looking strings).
    Number,
    /// Date or datetime values.
    Date,
    /// Boolean values, including common string representations.
    Boolean,
}

impl ColumnType {
    /// Parse a type label leniently.
    ///
    /// Unrecognized or legacy labels fall back to [`ColumnType::String`].
    pub fn parse_lenient(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "number" | "numeric" | "int" | "integer" | "float" => Self::Number,
            "date" | "datetime" | "timestamp" => Self::Date,
            "boolean" | "bool" | "binary" => Self::Boolean,
            _ => Self::String,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
        };
        f.write_str(label)
    }
}

/// Severity of a data quality issue. Ordering is ascending, so sorting
/// descending puts high-severity issues first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Category of a data quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingValues,
    Duplicates,
    Outliers,
    InconsistentFormat,
    DataTypeMismatch,
    UnusualPatterns,
}

/// Statistics computed for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// First quartile (linear-interpolation quantile).
    pub q1: f64,
    /// Third quartile (linear-interpolation quantile).
    pub q3: f64,
    /// Third standardized moment.
    pub skewness: f64,
    /// Fourth standardized moment.
    pub kurtosis: f64,
    /// Values outside the IQR fences, in row order.
    pub outliers: Vec<f64>,
}

/// Statistics computed for string columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub avg_length: f64,
    pub min_length: usize,
    pub max_length: usize,
    /// Most frequent values, capped at the configured limit; ties resolved
    /// by first-seen order.
    pub top_values: Vec<TopValue>,
}

/// One entry in a string column's top-value list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopValue {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Per-column statistical profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Number of non-missing values.
    pub count: usize,
    pub missing: usize,
    pub missing_percentage: f64,
    pub unique: usize,
    pub unique_percentage: f64,
    pub duplicates: usize,
    /// Most frequent non-missing value regardless of type; ties resolved by
    /// first-seen order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
    #[serde(flatten)]
    pub numeric: Option<NumericStats>,
    #[serde(flatten)]
    pub text: Option<TextStats>,
    /// Detected format signatures (e.g. `email`, `date`).
    pub patterns: Vec<String>,
    /// Free-text flags for values that failed per-value parsing.
    pub anomalies: Vec<String>,
}

/// A single detected data quality issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Actionable remediation text.
    pub suggestion: String,
}

/// A group of rows sharing the same set of missing columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingDataPattern {
    /// Sorted, comma-joined missing column names (the signature).
    pub pattern: String,
    /// Rows sharing the signature.
    pub count: usize,
    /// Percentage of total rows (not of incomplete rows).
    pub percentage: f64,
    pub columns: Vec<String>,
    pub description: String,
}

/// Phi coefficient between two columns' missingness indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingnessCorrelation {
    pub column1: String,
    pub column2: String,
    /// Always within [-1, 1]; degenerate pairs are never recorded.
    pub correlation: f64,
}

/// Dataset-level overview metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetOverview {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Estimated in-memory byte size, for display purposes only.
    pub memory_usage: usize,
    /// Rows that are exact duplicates of an earlier row across all columns.
    pub duplicate_rows: usize,
    /// Rows with no missing values.
    pub complete_rows: usize,
    /// `completeRows / totalRows * 100`; 0 for an empty dataset.
    pub completeness: f64,
}

/// Aggregate profiling result, immutable once produced.
///
/// Re-running the pipeline on an unchanged dataset yields an identical
/// profile except for `generated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProfile {
    pub overview: DatasetOverview,
    pub columns: BTreeMap<String, ColumnProfile>,
    /// Detected issues, most severe first.
    pub data_quality: Vec<DataQualityIssue>,
    /// Top missing-data patterns by row count.
    pub missing_patterns: Vec<MissingDataPattern>,
    /// Symmetric column-to-column missingness correlation map.
    pub correlations: BTreeMap<String, BTreeMap<String, f64>>,
    /// RFC 3339 timestamp of profile creation.
    pub generated_at: String,
}

impl DataProfile {
    /// Compare two profiles ignoring the creation timestamp.
    pub fn same_content(&self, other: &DataProfile) -> bool {
        self.overview == other.overview
            && self.columns == other.columns
            && self.data_quality == other.data_quality
            && self.missing_patterns == other.missing_patterns
            && self.correlations == other.correlations
    }
}
