//! Missingness correlation between column pairs.
//!
//! Each column is reduced to a binary missingness indicator; for every
//! unordered pair the phi coefficient of the two indicators is computed.
//! A strong positive phi means the columns tend to be missing together,
//! a strong negative phi means one tends to be missing when the other is
//! present.
//!
//! Cost is O(columns² × rows); callers profiling very wide datasets should
//! raise the cutoff or cap the retained pair count accordingly.

use crate::config::ProfileConfig;
use crate::dataset::{Dataset, is_missing};
use crate::types::MissingnessCorrelation;

/// Computes phi coefficients over column missingness indicators.
#[derive(Debug, Clone, Default)]
pub struct MissingnessCorrelator {
    config: ProfileConfig,
}

impl MissingnessCorrelator {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Correlate every column pair, keeping pairs with
    /// `|phi| > correlation_cutoff`, strongest first, capped at
    /// `max_correlations`.
    ///
    /// Pairs where either column is always or never missing have no
    /// defined correlation and are skipped entirely, never stored as zero.
    pub fn correlate(&self, dataset: &Dataset) -> Vec<MissingnessCorrelation> {
        let columns = dataset.columns();
        if dataset.total_rows() == 0 || columns.len() < 2 {
            return Vec::new();
        }

        let indicators: Vec<Vec<bool>> = columns
            .iter()
            .map(|column| {
                dataset
                    .column_values(column)
                    .into_iter()
                    .map(is_missing)
                    .collect()
            })
            .collect();

        let mut correlations = Vec::new();
        for i in 0..columns.len() {
            for j in (i + 1)..columns.len() {
                if let Some(phi) = phi_coefficient(&indicators[i], &indicators[j]) {
                    if phi.abs() > self.config.correlation_cutoff {
                        correlations.push(MissingnessCorrelation {
                            column1: columns[i].clone(),
                            column2: columns[j].clone(),
                            correlation: phi,
                        });
                    }
                }
            }
        }

        // Stable sort keeps column order for equal-strength pairs.
        correlations.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
        correlations.truncate(self.config.max_correlations);
        correlations
    }
}

/// Phi coefficient of two binary indicator vectors, clamped to [-1, 1].
///
/// Returns `None` when either indicator has zero variance (all true or
/// all false), where the coefficient is undefined.
fn phi_coefficient(a: &[bool], b: &[bool]) -> Option<f64> {
    let n = a.len();
    if n == 0 || n != b.len() {
        return None;
    }

    let mut n11 = 0usize; // both missing
    let mut si = 0usize; // a missing
    let mut sj = 0usize; // b missing
    for (&x, &y) in a.iter().zip(b) {
        if x {
            si += 1;
        }
        if y {
            sj += 1;
        }
        if x && y {
            n11 += 1;
        }
    }

    let n = n as f64;
    let (n11, si, sj) = (n11 as f64, si as f64, sj as f64);
    let denom_sq = (n * si - si * si) * (n * sj - sj * sj);
    if denom_sq <= 0.0 {
        return None;
    }

    let phi = (n * n11 - si * sj) / denom_sq.sqrt();
    // Floating-point error can push a perfect association past the bound.
    Some(phi.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;
    use serde_json::{Value, json};

    fn dataset(columns: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
        let column_names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let records: Vec<Row> = rows
            .into_iter()
            .map(|cells| column_names.iter().cloned().zip(cells).collect())
            .collect();
        Dataset::new(column_names, records).unwrap()
    }

    fn correlator() -> MissingnessCorrelator {
        MissingnessCorrelator::new(ProfileConfig::default())
    }

    #[test]
    fn test_phi_perfect_positive() {
        let a = [true, true, false, false];
        let b = [true, true, false, false];
        assert_eq!(phi_coefficient(&a, &b), Some(1.0));
    }

    #[test]
    fn test_phi_perfect_negative() {
        let a = [true, true, false, false];
        let b = [false, false, true, true];
        assert_eq!(phi_coefficient(&a, &b), Some(-1.0));
    }

    #[test]
    fn test_phi_independent() {
        let a = [true, true, false, false];
        let b = [true, false, true, false];
        let phi = phi_coefficient(&a, &b).unwrap();
        assert!(phi.abs() < 1e-9);
    }

    #[test]
    fn test_phi_undefined_for_zero_variance() {
        assert_eq!(phi_coefficient(&[false, false], &[true, false]), None);
        assert_eq!(phi_coefficient(&[true, true], &[true, false]), None);
        assert_eq!(phi_coefficient(&[], &[]), None);
    }

    #[test]
    fn test_correlate_finds_co_missing_columns() {
        let data = dataset(
            &["a", "b", "c"],
            vec![
                vec![Value::Null, Value::Null, json!(1)],
                vec![Value::Null, Value::Null, json!(2)],
                vec![json!(1), json!(2), json!(3)],
                vec![json!(4), json!(5), Value::Null],
            ],
        );
        let correlations = correlator().correlate(&data);
        // a/b are perfectly co-missing; the weaker a/c and b/c pairs also
        // clear the default cutoff but rank below.
        assert_eq!(correlations.len(), 3);
        assert_eq!(correlations[0].column1, "a");
        assert_eq!(correlations[0].column2, "b");
        assert_eq!(correlations[0].correlation, 1.0);
        assert!(correlations[1].correlation.abs() < 1.0);
    }

    #[test]
    fn test_correlate_skips_never_missing_columns() {
        let data = dataset(
            &["a", "b"],
            vec![
                vec![Value::Null, json!(1)],
                vec![json!(2), json!(3)],
            ],
        );
        // "b" is never missing: the pair is undefined and absent.
        assert!(correlator().correlate(&data).is_empty());
    }

    #[test]
    fn test_correlate_sorted_by_strength_and_capped() {
        let config = ProfileConfig::builder().max_correlations(1).build().unwrap();
        let data = dataset(
            &["a", "b", "c"],
            vec![
                vec![Value::Null, Value::Null, Value::Null],
                vec![Value::Null, Value::Null, json!(1)],
                vec![json!(1), json!(2), Value::Null],
                vec![json!(3), json!(4), json!(5)],
            ],
        );
        let correlations = MissingnessCorrelator::new(config).correlate(&data);
        assert_eq!(correlations.len(), 1);
        // a/b are perfectly associated; a/c and b/c are weaker.
        assert_eq!(correlations[0].column1, "a");
        assert_eq!(correlations[0].column2, "b");
        assert_eq!(correlations[0].correlation, 1.0);
    }

    #[test]
    fn test_correlate_empty_dataset() {
        assert!(correlator().correlate(&Dataset::empty()).is_empty());
    }
}
