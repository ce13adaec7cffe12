//! Tabular Data Profiling Library
//!
//! An automated data-profiling and missing-data analysis engine for tabular
//! datasets.
//!
//! # Overview
//!
//! This library computes a complete statistical profile of a dataset in one
//! pass over an immutable input:
//!
//! - **Type Inference**: Sampled voting over cell values with a closed
//!   string/number/date/boolean type system
//! - **Column Statistics**: Counting stats for every column, moment and
//!   quantile statistics for numeric columns, length and top-value
//!   statistics for string columns
//! - **Quality Issues**: Severity-banded findings with actionable
//!   remediation suggestions
//! - **Missing-Data Patterns**: Grouping of incomplete rows by their
//!   missing-column signature
//! - **Missingness Correlation**: Phi coefficients revealing columns that
//!   go missing together
//!
//! The engine never mutates data and never fails on malformed values;
//! unparseable cells degrade into per-column anomalies.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tablescope_profiling::{Dataset, Profiler};
//!
//! // Rows come from your ingestion layer as column-name -> value maps.
//! let dataset = Dataset::new(columns, rows)?;
//!
//! let profile = Profiler::default().profile(&dataset);
//! println!("completeness: {:.1}%", profile.overview.completeness);
//! for issue in &profile.data_quality {
//!     println!("[{:?}] {}", issue.severity, issue.description);
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`ProfileConfig`] to customize thresholds:
//!
//! ```rust,ignore
//! use tablescope_profiling::{ProfileConfig, Profiler};
//!
//! let config = ProfileConfig::builder()
//!     .type_agreement_threshold(0.8)  // Looser type voting
//!     .missing_bands(40.0, 15.0)      // High/medium severity cut-offs
//!     .correlation_cutoff(0.2)        // Drop weak missingness pairs
//!     .max_patterns(5)
//!     .build()?;
//!
//! let profile = Profiler::new(config).profile(&dataset);
//! ```
//!
//! # Reports
//!
//! The resulting [`DataProfile`] serializes to camelCase JSON and
//! round-trips losslessly; [`reporting::ReportGenerator`] writes the
//! report file for downstream consumers.

pub mod config;
pub mod dataset;
pub mod error;
pub mod missingness;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ProfileConfig, ProfileConfigBuilder};
pub use dataset::{Dataset, Row, is_missing};
pub use error::{ProfilingError, Result as ProfilingResult, ResultExt};
pub use missingness::{MissingPatternSummary, MissingnessCorrelator, PatternMiner};
pub use profiler::Profiler;
pub use quality::QualityIssueDetector;
pub use reporting::ReportGenerator;
pub use types::{
    ColumnProfile, ColumnType, DataProfile, DataQualityIssue, DatasetOverview, IssueKind,
    MissingDataPattern, MissingnessCorrelation, NumericStats, Severity, TextStats, TopValue,
};
pub use utils::{
    clean_numeric_string, is_boolean_string, is_error_marker, is_numeric_string,
    parse_numeric_string,
};
