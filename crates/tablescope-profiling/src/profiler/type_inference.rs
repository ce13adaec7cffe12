//! Column type inference.
//!
//! Types are decided by voting over a deterministic sample of non-missing
//! values. Candidate types are checked in priority order (boolean, then
//! number, then date); the first candidate whose agreement ratio reaches
//! the configured threshold wins, and everything else is a string column.
//! Inference never fails: an empty or unparseable column is simply `String`.

use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use regex::Regex;
use serde_json::Value;

use crate::config::ProfileConfig;
use crate::dataset::is_missing;
use crate::types::ColumnType;
use crate::utils::{is_boolean_string, is_error_marker, is_numeric_string};

// Date pattern regexes - compiled once at startup
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: MM-DD-YYYY"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}").expect("Invalid regex: datetime"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("Invalid regex: ISO"),
    ]
});

// Fixed seed keeps inference reproducible across runs on large columns.
const SAMPLE_SEED: u64 = 42;

/// Infer the semantic type of a column from its values.
pub(crate) fn infer_column_type(values: &[&Value], config: &ProfileConfig) -> ColumnType {
    let candidates: Vec<&Value> = values
        .iter()
        .copied()
        .filter(|v| !is_missing(v))
        .collect();
    if candidates.is_empty() {
        return ColumnType::String;
    }

    let sampled = sample_values(&candidates, config.type_sample_size);

    // Error markers carry no type signal and are excluded from the vote.
    let voters: Vec<&Value> = sampled
        .into_iter()
        .filter(|v| match v {
            Value::String(s) => !is_error_marker(s),
            _ => true,
        })
        .collect();
    if voters.is_empty() {
        return ColumnType::String;
    }

    let total = voters.len() as f64;
    let agreement = |count: usize| count as f64 / total >= config.type_agreement_threshold;

    let boolean_votes = voters.iter().filter(|v| is_boolean_value(v)).count();
    if agreement(boolean_votes) {
        return ColumnType::Boolean;
    }

    let number_votes = voters.iter().filter(|v| is_number_value(v)).count();
    if agreement(number_votes) {
        return ColumnType::Number;
    }

    let date_votes = voters.iter().filter(|v| is_date_value(v)).count();
    if agreement(date_votes) {
        return ColumnType::Date;
    }

    ColumnType::String
}

/// Deterministic sample of at most `limit` values.
fn sample_values<'a>(candidates: &[&'a Value], limit: usize) -> Vec<&'a Value> {
    if limit == 0 || candidates.len() <= limit {
        return candidates.to_vec();
    }
    let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
    let mut indices: Vec<usize> = sample(&mut rng, candidates.len(), limit).into_vec();
    indices.sort_unstable();
    indices.into_iter().map(|i| candidates[i]).collect()
}

/// Boolean literal or a common string representation (`yes`/`no`, `0`/`1`, ...).
fn is_boolean_value(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::String(s) => is_boolean_string(s),
        _ => false,
    }
}

/// Numeric literal or a numeric-looking string (currency and separators allowed).
fn is_number_value(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => is_numeric_string(s),
        _ => false,
    }
}

/// String matching one of the recognized date layouts. Numeric values never
/// count as dates, so epoch-like timestamp columns stay numeric.
pub(crate) fn is_date_value(value: &Value) -> bool {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            DATE_PATTERNS.iter().any(|p| p.is_match(trimmed))
        }
        _ => false,
    }
}
