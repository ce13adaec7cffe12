//! Data quality issue detection.

mod detector;

pub use detector::QualityIssueDetector;
