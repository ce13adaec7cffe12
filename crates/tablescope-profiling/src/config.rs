//! Configuration types for the profiling engine.
//!
//! All thresholds the engine consults live here as explicit parameters
//! rather than hidden constants, using the builder pattern for flexible
//! and ergonomic setup.

use serde::{Deserialize, Serialize};

/// Configuration for a profiling run.
///
/// Use [`ProfileConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use tablescope_profiling::ProfileConfig;
///
/// let config = ProfileConfig::builder()
///     .top_values_limit(5)
///     .correlation_cutoff(0.2)
///     .missing_bands(40.0, 15.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Minimum fraction of sampled non-missing values that must agree with
    /// the top candidate type; below this, inference falls back to string.
    /// Default: 0.9
    pub type_agreement_threshold: f64,

    /// Maximum number of non-missing values sampled for type inference.
    /// Columns larger than this are subsampled deterministically.
    /// Default: 200
    pub type_sample_size: usize,

    /// Maximum number of entries in a string column's `topValues` list.
    /// Default: 10
    pub top_values_limit: usize,

    /// Maximum number of missing-data patterns retained in the profile.
    /// Default: 10
    pub max_patterns: usize,

    /// Maximum number of missingness correlations retained in the profile.
    /// Default: 10
    pub max_correlations: usize,

    /// Minimum absolute phi coefficient for a correlation to be retained.
    /// Default: 0.1
    pub correlation_cutoff: f64,

    /// Missing-value percentage above which an issue is high severity.
    /// Default: 30.0
    pub missing_high_pct: f64,

    /// Missing-value percentage above which an issue is medium severity.
    /// Default: 10.0
    pub missing_medium_pct: f64,

    /// Duplicate-row percentage above which the issue is high severity.
    /// Default: 20.0
    pub duplicate_high_pct: f64,

    /// Duplicate-row percentage above which the issue is medium severity.
    /// Default: 5.0
    pub duplicate_medium_pct: f64,

    /// Outlier density (percent of non-missing values) above which the
    /// issue is high severity. Default: 10.0
    pub outlier_high_pct: f64,

    /// Outlier density above which the issue is medium severity.
    /// Default: 2.0
    pub outlier_medium_pct: f64,

    /// Multiplier applied to the IQR when computing outlier fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            type_agreement_threshold: 0.9,
            type_sample_size: 200,
            top_values_limit: 10,
            max_patterns: 10,
            max_correlations: 10,
            correlation_cutoff: 0.1,
            missing_high_pct: 30.0,
            missing_medium_pct: 10.0,
            duplicate_high_pct: 20.0,
            duplicate_medium_pct: 5.0,
            outlier_high_pct: 10.0,
            outlier_medium_pct: 2.0,
            iqr_multiplier: 1.5,
        }
    }
}

impl ProfileConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfileConfigBuilder {
        ProfileConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("type_agreement_threshold", self.type_agreement_threshold),
            ("correlation_cutoff", self.correlation_cutoff),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidRatio {
                    field: field.to_string(),
                    value,
                });
            }
        }

        for (field, value) in [
            ("missing_high_pct", self.missing_high_pct),
            ("missing_medium_pct", self.missing_medium_pct),
            ("duplicate_high_pct", self.duplicate_high_pct),
            ("duplicate_medium_pct", self.duplicate_medium_pct),
            ("outlier_high_pct", self.outlier_high_pct),
            ("outlier_medium_pct", self.outlier_medium_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigValidationError::InvalidPercentage {
                    field: field.to_string(),
                    value,
                });
            }
        }

        for (kind, high, medium) in [
            ("missing", self.missing_high_pct, self.missing_medium_pct),
            ("duplicate", self.duplicate_high_pct, self.duplicate_medium_pct),
            ("outlier", self.outlier_high_pct, self.outlier_medium_pct),
        ] {
            if high <= medium {
                return Err(ConfigValidationError::InvertedSeverityBand {
                    kind: kind.to_string(),
                    high,
                    medium,
                });
            }
        }

        if self.type_sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(
                self.type_sample_size,
            ));
        }

        if self.top_values_limit == 0 {
            return Err(ConfigValidationError::InvalidTopValuesLimit(
                self.top_values_limit,
            ));
        }

        if self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid ratio for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidRatio { field: String, value: f64 },

    #[error("Invalid percentage for '{field}': {value} (must be between 0.0 and 100.0)")]
    InvalidPercentage { field: String, value: f64 },

    #[error("Inverted {kind} severity band: high {high} must exceed medium {medium}")]
    InvertedSeverityBand {
        kind: String,
        high: f64,
        medium: f64,
    },

    #[error("Invalid type sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),

    #[error("Invalid top values limit: {0} (must be at least 1)")]
    InvalidTopValuesLimit(usize),

    #[error("Invalid IQR multiplier: {0} (must be positive)")]
    InvalidIqrMultiplier(f64),
}

/// Builder for [`ProfileConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfileConfigBuilder {
    type_agreement_threshold: Option<f64>,
    type_sample_size: Option<usize>,
    top_values_limit: Option<usize>,
    max_patterns: Option<usize>,
    max_correlations: Option<usize>,
    correlation_cutoff: Option<f64>,
    missing_bands: Option<(f64, f64)>,
    duplicate_bands: Option<(f64, f64)>,
    outlier_bands: Option<(f64, f64)>,
    iqr_multiplier: Option<f64>,
}

impl ProfileConfigBuilder {
    /// Set the minimum agreement ratio for type inference (0.0 - 1.0).
    pub fn type_agreement_threshold(mut self, threshold: f64) -> Self {
        self.type_agreement_threshold = Some(threshold);
        self
    }

    /// Set the sample size used for type inference.
    pub fn type_sample_size(mut self, size: usize) -> Self {
        self.type_sample_size = Some(size);
        self
    }

    /// Set the maximum number of top values recorded per string column.
    pub fn top_values_limit(mut self, limit: usize) -> Self {
        self.top_values_limit = Some(limit);
        self
    }

    /// Set the maximum number of missing-data patterns retained.
    pub fn max_patterns(mut self, limit: usize) -> Self {
        self.max_patterns = Some(limit);
        self
    }

    /// Set the maximum number of missingness correlations retained.
    pub fn max_correlations(mut self, limit: usize) -> Self {
        self.max_correlations = Some(limit);
        self
    }

    /// Set the minimum absolute correlation kept in the profile.
    pub fn correlation_cutoff(mut self, cutoff: f64) -> Self {
        self.correlation_cutoff = Some(cutoff);
        self
    }

    /// Set the high/medium severity bands for missing-value issues
    /// (percent of rows).
    pub fn missing_bands(mut self, high: f64, medium: f64) -> Self {
        self.missing_bands = Some((high, medium));
        self
    }

    /// Set the high/medium severity bands for duplicate-row issues
    /// (percent of rows).
    pub fn duplicate_bands(mut self, high: f64, medium: f64) -> Self {
        self.duplicate_bands = Some((high, medium));
        self
    }

    /// Set the high/medium severity bands for outlier issues
    /// (percent of non-missing values).
    pub fn outlier_bands(mut self, high: f64, medium: f64) -> Self {
        self.outlier_bands = Some((high, medium));
        self
    }

    /// Set the IQR multiplier used for outlier fences.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfileConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfileConfig, ConfigValidationError> {
        let defaults = ProfileConfig::default();
        let (missing_high, missing_medium) = self
            .missing_bands
            .unwrap_or((defaults.missing_high_pct, defaults.missing_medium_pct));
        let (duplicate_high, duplicate_medium) = self
            .duplicate_bands
            .unwrap_or((defaults.duplicate_high_pct, defaults.duplicate_medium_pct));
        let (outlier_high, outlier_medium) = self
            .outlier_bands
            .unwrap_or((defaults.outlier_high_pct, defaults.outlier_medium_pct));

        let config = ProfileConfig {
            type_agreement_threshold: self
                .type_agreement_threshold
                .unwrap_or(defaults.type_agreement_threshold),
            type_sample_size: self.type_sample_size.unwrap_or(defaults.type_sample_size),
            top_values_limit: self.top_values_limit.unwrap_or(defaults.top_values_limit),
            max_patterns: self.max_patterns.unwrap_or(defaults.max_patterns),
            max_correlations: self.max_correlations.unwrap_or(defaults.max_correlations),
            correlation_cutoff: self
                .correlation_cutoff
                .unwrap_or(defaults.correlation_cutoff),
            missing_high_pct: missing_high,
            missing_medium_pct: missing_medium,
            duplicate_high_pct: duplicate_high,
            duplicate_medium_pct: duplicate_medium,
            outlier_high_pct: outlier_high,
            outlier_medium_pct: outlier_medium,
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
        };

        config.validate()?;
        Ok(config)
    }
}
