//! Rule-based detection of data quality issues.
//!
//! The detector reads finished column profiles and dataset-level counts;
//! it never touches raw values and never errors. Severity bands come from
//! [`ProfileConfig`], every issue carries actionable remediation text, and
//! the output is ordered most severe first. An empty result is a healthy
//! dataset, not a failure.

use crate::config::ProfileConfig;
use crate::types::{ColumnProfile, ColumnType, DataQualityIssue, IssueKind, Severity};

/// Detects quality issues from computed column profiles.
#[derive(Debug, Clone, Default)]
pub struct QualityIssueDetector {
    config: ProfileConfig,
}

impl QualityIssueDetector {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Run all rules over the profiled columns.
    ///
    /// `columns` must be in dataset column order; the stable severity sort
    /// then keeps equally-severe issues in that order.
    pub fn detect(
        &self,
        columns: &[(String, ColumnProfile)],
        total_rows: usize,
        duplicate_rows: usize,
    ) -> Vec<DataQualityIssue> {
        let mut issues = Vec::new();

        for (name, profile) in columns {
            self.check_missing_values(name, profile, &mut issues);
            self.check_outliers(name, profile, &mut issues);
            self.check_mixed_formats(name, profile, &mut issues);
            self.check_anomalies(name, profile, &mut issues);
        }
        self.check_duplicate_rows(total_rows, duplicate_rows, &mut issues);

        issues.sort_by(|a, b| b.severity.cmp(&a.severity));
        issues
    }

    fn check_missing_values(
        &self,
        name: &str,
        profile: &ColumnProfile,
        issues: &mut Vec<DataQualityIssue>,
    ) {
        if profile.missing == 0 {
            return;
        }
        let pct = profile.missing_percentage;
        let severity = if pct > self.config.missing_high_pct {
            Severity::High
        } else if pct > self.config.missing_medium_pct {
            Severity::Medium
        } else {
            Severity::Low
        };

        let suggestion = match profile.column_type {
            ColumnType::Number => {
                "Fill with median value (robust to outliers) or mean for normal distributions"
            }
            ColumnType::Date => "Fill with previous non-null value or interpolate between dates",
            _ => "Fill with most frequent value or a constant like 'Unknown'",
        };

        issues.push(DataQualityIssue {
            kind: IssueKind::MissingValues,
            severity,
            column: Some(name.to_string()),
            description: format!(
                "Column '{}' has {} missing values ({:.1}% of rows)",
                name, profile.missing, pct
            ),
            count: Some(profile.missing),
            suggestion: suggestion.to_string(),
        });
    }

    fn check_outliers(
        &self,
        name: &str,
        profile: &ColumnProfile,
        issues: &mut Vec<DataQualityIssue>,
    ) {
        let Some(stats) = &profile.numeric else {
            return;
        };
        if stats.outliers.is_empty() || profile.count == 0 {
            return;
        }

        let pct = stats.outliers.len() as f64 / profile.count as f64 * 100.0;
        let severity = if pct > self.config.outlier_high_pct {
            Severity::High
        } else if pct > self.config.outlier_medium_pct {
            Severity::Medium
        } else {
            Severity::Low
        };

        issues.push(DataQualityIssue {
            kind: IssueKind::Outliers,
            severity,
            column: Some(name.to_string()),
            description: format!(
                "Column '{}' has {} outliers outside the IQR fences ({:.1}% of values)",
                name,
                stats.outliers.len(),
                pct
            ),
            count: Some(stats.outliers.len()),
            suggestion:
                "Inspect extreme values; cap at percentiles or keep them if they carry signal"
                    .to_string(),
        });
    }

    fn check_mixed_formats(
        &self,
        name: &str,
        profile: &ColumnProfile,
        issues: &mut Vec<DataQualityIssue>,
    ) {
        if profile.patterns.iter().any(|p| p == "numeric") {
            issues.push(DataQualityIssue {
                kind: IssueKind::InconsistentFormat,
                severity: Severity::Medium,
                column: Some(name.to_string()),
                description: format!(
                    "Column '{}' mixes numeric-looking and free-text values",
                    name
                ),
                count: None,
                suggestion: "Normalize the column to a single representation before analysis"
                    .to_string(),
            });
        }
        if profile.patterns.iter().any(|p| p == "numeric-text") {
            issues.push(DataQualityIssue {
                kind: IssueKind::DataTypeMismatch,
                severity: Severity::Medium,
                column: Some(name.to_string()),
                description: format!(
                    "Numeric column '{}' contains numbers stored as text",
                    name
                ),
                count: None,
                suggestion: "Convert text-encoded numbers to native numeric values".to_string(),
            });
        }
    }

    fn check_anomalies(
        &self,
        name: &str,
        profile: &ColumnProfile,
        issues: &mut Vec<DataQualityIssue>,
    ) {
        if profile.anomalies.is_empty() {
            return;
        }
        issues.push(DataQualityIssue {
            kind: IssueKind::UnusualPatterns,
            severity: Severity::Low,
            column: Some(name.to_string()),
            description: format!(
                "Column '{}' has {} value(s) that do not parse as {}",
                name,
                profile.anomalies.len(),
                profile.column_type
            ),
            count: Some(profile.anomalies.len()),
            suggestion: "Review the flagged values; replace error markers with explicit nulls"
                .to_string(),
        });
    }

    fn check_duplicate_rows(
        &self,
        total_rows: usize,
        duplicate_rows: usize,
        issues: &mut Vec<DataQualityIssue>,
    ) {
        if duplicate_rows == 0 || total_rows == 0 {
            return;
        }
        let pct = duplicate_rows as f64 / total_rows as f64 * 100.0;
        let severity = if pct > self.config.duplicate_high_pct {
            Severity::High
        } else if pct > self.config.duplicate_medium_pct {
            Severity::Medium
        } else {
            Severity::Low
        };

        issues.push(DataQualityIssue {
            kind: IssueKind::Duplicates,
            severity,
            column: None,
            description: format!(
                "{} duplicate rows found ({:.1}% of the dataset)",
                duplicate_rows, pct
            ),
            count: Some(duplicate_rows),
            suggestion: "Drop exact duplicate rows unless repetition is expected".to_string(),
        });
    }
}
