//! Missing-data structure analysis: pattern mining and missingness
//! correlation.

mod correlation;
mod patterns;

pub use correlation::MissingnessCorrelator;
pub use patterns::{MissingPatternSummary, PatternMiner};
