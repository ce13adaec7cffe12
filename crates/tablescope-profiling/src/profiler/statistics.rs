//! Statistical analysis for column profiling.
//!
//! One pass per column produces the full [`ColumnProfile`]: counting stats
//! for every type, moment/quantile statistics for numeric columns, length
//! and top-value statistics for string columns. Individual values that fail
//! to parse for the column's type are recorded as anomalies, never errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use crate::config::ProfileConfig;
use crate::dataset::is_missing;
use crate::types::{ColumnProfile, ColumnType, NumericStats, TextStats, TopValue};
use crate::utils::{display_value, is_boolean_string, is_numeric_string, numeric_value, value_key};

use super::type_inference::is_date_value;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid regex: email")
});
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("Invalid regex: url"));
static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("Invalid regex: uuid")
});

/// Share of matching values required before a format signature is recorded.
const PATTERN_AGREEMENT: f64 = 0.5;
/// Share of numeric-looking strings that flags a string column as mixed numeric.
const MIXED_NUMERIC_RATIO: f64 = 0.3;

/// Compute the full statistical profile of one column.
pub(crate) fn profile_column(
    values: &[&Value],
    column_type: ColumnType,
    config: &ProfileConfig,
) -> ColumnProfile {
    let total = values.len();
    let present: Vec<&Value> = values.iter().copied().filter(|v| !is_missing(v)).collect();
    let count = present.len();
    let missing = total - count;

    let (unique, mode) = value_frequencies(&present);
    let duplicates = count - unique;

    let numeric = match column_type {
        ColumnType::Number => Some(numeric_stats(&present, config)),
        _ => None,
    };
    let text = match column_type {
        ColumnType::String => Some(text_stats(&present, config)),
        _ => None,
    };

    ColumnProfile {
        column_type,
        count,
        missing,
        missing_percentage: percentage(missing, total),
        unique,
        unique_percentage: percentage(unique, count),
        duplicates,
        mode,
        numeric,
        text,
        patterns: detect_patterns(&present, column_type),
        anomalies: detect_anomalies(&present, column_type),
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Unique count and mode over non-missing values, with exact-value equality
/// (the string `"1"` and the number `1` are distinct) and first-seen ties.
fn value_frequencies(present: &[&Value]) -> (usize, Option<Value>) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<(String, &Value)> = Vec::new();

    for value in present {
        let key = value_key(value);
        let entry = counts.entry(key.clone()).or_insert(0);
        if *entry == 0 {
            order.push((key, value));
        }
        *entry += 1;
    }

    // Walk in first-seen order so ties resolve to the earliest value.
    let best = order.iter().map(|(k, _)| counts[k]).max().unwrap_or(0);
    let mode = order
        .iter()
        .find(|(k, _)| counts[k] == best)
        .map(|(_, v)| (*v).clone());

    (order.len(), mode)
}

/// Moment and quantile statistics for a numeric column. Unparseable values
/// are skipped here and surface in the column's anomalies instead.
fn numeric_stats(present: &[&Value], config: &ProfileConfig) -> NumericStats {
    let numbers: Vec<f64> = present.iter().filter_map(|v| numeric_value(v)).collect();
    if numbers.is_empty() {
        return NumericStats {
            mean: 0.0,
            median: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            q3: 0.0,
            skewness: 0.0,
            kurtosis: 0.0,
            outliers: Vec::new(),
        };
    }

    let n = numbers.len() as f64;
    let mean = numbers.iter().sum::<f64>() / n;

    // Population variance; std is the population standard deviation.
    let variance = numbers.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    let mut sorted = numbers.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);

    let (skewness, kurtosis) = if std == 0.0 {
        (0.0, 0.0)
    } else {
        let m3 = numbers.iter().map(|x| ((x - mean) / std).powi(3)).sum::<f64>() / n;
        let m4 = numbers.iter().map(|x| ((x - mean) / std).powi(4)).sum::<f64>() / n;
        (m3, m4)
    };

    let iqr = q3 - q1;
    let lower = q1 - config.iqr_multiplier * iqr;
    let upper = q3 + config.iqr_multiplier * iqr;
    // Row order preserved: callers display outliers as encountered.
    let outliers: Vec<f64> = numbers
        .iter()
        .copied()
        .filter(|x| *x < lower || *x > upper)
        .collect();

    NumericStats {
        mean,
        median,
        std,
        min,
        max,
        q1,
        q3,
        skewness,
        kurtosis,
        outliers,
    }
}

/// Linear-interpolation quantile over an ascending-sorted slice.
///
/// The quantile position is `q * (n - 1)`; fractional positions interpolate
/// between the two neighboring values.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = pos - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}

/// Length and frequency statistics for a string column.
fn text_stats(present: &[&Value], config: &ProfileConfig) -> TextStats {
    if present.is_empty() {
        return TextStats {
            avg_length: 0.0,
            min_length: 0,
            max_length: 0,
            top_values: Vec::new(),
        };
    }

    let mut total_length = 0usize;
    let mut min_length = usize::MAX;
    let mut max_length = 0usize;
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for value in present {
        let display = display_value(value);
        let length = display.chars().count();
        total_length += length;
        min_length = min_length.min(length);
        max_length = max_length.max(length);

        let entry = counts.entry(display.clone()).or_insert(0);
        if *entry == 0 {
            order.push(display);
        }
        *entry += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    let mut ranked: Vec<(String, usize)> =
        order.into_iter().map(|v| (v.clone(), counts[&v])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(config.top_values_limit);

    let denominator = present.len();
    let top_values = ranked
        .into_iter()
        .map(|(value, count)| TopValue {
            value,
            count,
            percentage: percentage(count, denominator),
        })
        .collect();

    TextStats {
        avg_length: total_length as f64 / present.len() as f64,
        min_length,
        max_length,
        top_values,
    }
}

/// Detect format signatures over the non-missing values of a column.
fn detect_patterns(present: &[&Value], column_type: ColumnType) -> Vec<String> {
    let mut patterns = Vec::new();
    if present.is_empty() {
        return patterns;
    }

    match column_type {
        ColumnType::String => {
            let strings: Vec<&str> = present
                .iter()
                .filter_map(|v| v.as_str())
                .collect();
            if strings.is_empty() {
                return patterns;
            }
            let total = strings.len() as f64;
            let share = |count: usize| count as f64 / total;

            let signatures: [(&str, fn(&str) -> bool); 4] = [
                ("email", |s| EMAIL_PATTERN.is_match(s.trim())),
                ("url", |s| URL_PATTERN.is_match(s.trim())),
                ("uuid", |s| UUID_PATTERN.is_match(s.trim())),
                ("date", is_date_str),
            ];
            for (name, matcher) in signatures {
                let matches = strings.iter().filter(|s| matcher(s)).count();
                if share(matches) >= PATTERN_AGREEMENT {
                    patterns.push(name.to_string());
                }
            }

            // Numeric-looking strings below the type threshold still matter:
            // they drive the inconsistent-format quality rule.
            let numeric = strings.iter().filter(|s| is_numeric_string(s)).count();
            if share(numeric) >= MIXED_NUMERIC_RATIO && share(numeric) < 1.0 {
                patterns.push("numeric".to_string());
            }
        }
        ColumnType::Number => {
            // Numbers stored as text are worth surfacing for cleanup.
            if present.iter().any(|v| v.is_string()) {
                patterns.push("numeric-text".to_string());
            }
        }
        ColumnType::Date | ColumnType::Boolean => {}
    }

    patterns
}

fn is_date_str(s: &str) -> bool {
    is_date_value(&Value::String(s.to_string()))
}

/// Record values that fail per-value parsing for the column's type.
///
/// Each distinct offending value appears once; parsing problems degrade
/// into these flags instead of failing the profiling run.
fn detect_anomalies(present: &[&Value], column_type: ColumnType) -> Vec<String> {
    let mut anomalies = Vec::new();
    let mut seen: HashMap<String, ()> = HashMap::new();

    let mut record = |message: String| {
        if seen.insert(message.clone(), ()).is_none() {
            anomalies.push(message);
        }
    };

    match column_type {
        ColumnType::Number => {
            for value in present {
                if numeric_value(value).is_none() {
                    record(format!(
                        "Non-numeric value '{}' in numeric column",
                        display_value(value)
                    ));
                }
            }
        }
        ColumnType::Date => {
            for value in present {
                if !is_date_value(value) {
                    record(format!(
                        "Unrecognized date value '{}'",
                        display_value(value)
                    ));
                }
            }
        }
        ColumnType::Boolean => {
            for value in present {
                let ok = match value {
                    Value::Bool(_) => true,
                    Value::String(s) => is_boolean_string(s),
                    _ => false,
                };
                if !ok {
                    record(format!(
                        "Non-boolean value '{}' in boolean column",
                        display_value(value)
                    ));
                }
            }
        }
        ColumnType::String => {}
    }

    anomalies
}
