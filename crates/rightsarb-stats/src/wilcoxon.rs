//! Wilcoxon signed-rank test against a zero location.
//!
//! Zero differences are discarded before ranking and tied magnitudes receive
//! their average rank. The two-sided statistic is `T = min(R+, R-)`.
//!
//! The exact null distribution of `R+` is used when at most
//! [`EXACT_MAX_N`] non-zero differences remain and the sample had neither
//! zeros nor ties; otherwise the normal approximation with tie-corrected
//! variance (no continuity correction).

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Largest sample size for which the exact distribution is enumerated.
pub const EXACT_MAX_N: usize = 50;

/// How the p-value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WilcoxonMethod {
    /// Enumerated null distribution
    Exact,
    /// Normal approximation
    Approx,
}

/// Result of a signed-rank test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WilcoxonResult {
    /// `min(R+, R-)`
    pub statistic: f64,
    /// Two-sided p-value
    pub pvalue: f64,
    /// Number of non-zero differences ranked
    pub n: usize,
    /// Method used
    pub method: WilcoxonMethod,
}

/// Two-sided signed-rank test that the differences are centred on zero.
///
/// # Errors
/// Returns [`StatsError::InsufficientData`] for an empty sample and
/// [`StatsError::AllZeroDifferences`] when nothing is left to rank.
pub fn wilcoxon_signed_rank(values: &[f64]) -> Result<WilcoxonResult, StatsError> {
    if values.is_empty() {
        return Err(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let nonzero: Vec<f64> = values.iter().copied().filter(|&v| v != 0.0).collect();
    let n_zero = values.len() - nonzero.len();
    let n = nonzero.len();
    if n == 0 {
        return Err(StatsError::AllZeroDifferences);
    }

    let (ranks, tie_sizes) = average_ranks(&nonzero);
    let r_plus: f64 = nonzero
        .iter()
        .zip(&ranks)
        .filter(|(v, _)| **v > 0.0)
        .map(|(_, r)| r)
        .sum();
    let total = (n * (n + 1)) as f64 / 2.0;
    let r_minus = total - r_plus;
    let statistic = r_plus.min(r_minus);

    let has_ties = tie_sizes.iter().any(|&t| t > 1);
    let (pvalue, method) = if n <= EXACT_MAX_N && n_zero == 0 && !has_ties {
        (exact_pvalue(n, statistic), WilcoxonMethod::Exact)
    } else {
        (approx_pvalue(n, r_plus, &tie_sizes), WilcoxonMethod::Approx)
    };

    Ok(WilcoxonResult {
        statistic,
        pvalue,
        n,
        method,
    })
}

/// Average ranks of absolute values, plus the size of every tie group.
fn average_ranks(values: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| values[i].abs().total_cmp(&values[j].abs()));

    let mut ranks = vec![0.0; n];
    let mut tie_sizes = Vec::new();
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]].abs() == values[order[start]].abs() {
            end += 1;
        }
        // Ranks start + 1 ..= end share their mean.
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        tie_sizes.push(end - start);
        start = end;
    }

    (ranks, tie_sizes)
}

/// Two-sided exact p-value, `min(1, 2 P(R+ <= statistic))`.
fn exact_pvalue(n: usize, statistic: f64) -> f64 {
    let max_sum = n * (n + 1) / 2;
    // counts[s] = number of subsets of {1..n} whose ranks sum to s
    let mut counts = vec![0.0_f64; max_sum + 1];
    counts[0] = 1.0;
    for rank in 1..=n {
        for s in (rank..=max_sum).rev() {
            counts[s] += counts[s - rank];
        }
    }

    let total = 2.0_f64.powi(n as i32);
    let threshold = statistic.floor() as usize;
    let lower_tail: f64 = counts[..=threshold.min(max_sum)].iter().sum::<f64>() / total;
    (2.0 * lower_tail).min(1.0)
}

/// Two-sided p-value from the normal approximation.
fn approx_pvalue(n: usize, r_plus: f64, tie_sizes: &[usize]) -> f64 {
    let n = n as f64;
    let expected = n * (n + 1.0) / 4.0;
    let tie_term: f64 = tie_sizes
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * (t * t - 1.0)
        })
        .sum();
    let variance = (n * (n + 1.0) * (2.0 * n + 1.0) - 0.5 * tie_term) / 24.0;
    if variance <= 0.0 {
        return f64::NAN;
    }

    let z = (r_plus - expected) / variance.sqrt();
    match Normal::new(0.0, 1.0) {
        Ok(normal) => (2.0 * normal.sf(z.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_average_ranks_with_ties() {
        let (ranks, ties) = average_ranks(&[1.0, -2.0, 2.0, 3.0]);
        assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
        assert_eq!(ties, vec![1, 2, 1]);
    }

    #[test]
    fn test_exact_all_positive() {
        // R- = 0, P(R+ <= 0) = 1/2^5, two-sided = 1/16
        let result = wilcoxon_signed_rank(&[0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(result.method, WilcoxonMethod::Exact);
        assert_relative_eq!(result.statistic, 0.0);
        assert_relative_eq!(result.pvalue, 0.0625, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_mixed_signs() {
        // Ranks: 1(+) 2(-) 3(+) 4(+) 5(-) 6(+); R- = 7, R+ = 14.
        // P(R+ <= 7) for n = 6 is 18/64, two-sided 36/64.
        let result = wilcoxon_signed_rank(&[0.1, -0.2, 0.3, 0.4, -0.5, 0.6]).unwrap();
        assert_relative_eq!(result.statistic, 7.0);
        assert_relative_eq!(result.pvalue, 36.0 / 64.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zeros_force_approximation() {
        let result = wilcoxon_signed_rank(&[0.0, 0.1, 0.2, 0.3, -0.4, 0.5]).unwrap();
        assert_eq!(result.method, WilcoxonMethod::Approx);
        assert_eq!(result.n, 5);
        // R- = 4, R+ = 11, mean 7.5, var = 5*6*11/24 = 13.75
        let z: f64 = (11.0 - 7.5) / 13.75_f64.sqrt();
        let normal = Normal::new(0.0, 1.0).unwrap();
        assert_relative_eq!(result.pvalue, 2.0 * normal.sf(z), epsilon = 1e-12);
    }

    #[test]
    fn test_tied_magnitudes_correct_variance() {
        // |0.2| and |0.3| each tie twice: ranks 1, 2.5, 2.5, 4.5, 4.5, 6, 7.
        // R- = 8.5, R+ = 19.5, mean 14, var = (7*8*15 - 0.5*(6 + 6)) / 24.
        let result = wilcoxon_signed_rank(&[0.1, -0.2, 0.2, 0.3, 0.3, -0.4, 0.5]).unwrap();
        assert_eq!(result.method, WilcoxonMethod::Approx);
        assert_relative_eq!(result.statistic, 8.5);
        assert_relative_eq!(result.pvalue, 0.3508159294062425, epsilon = 1e-10);
    }

    #[test]
    fn test_large_sample_uses_approximation() {
        let values: Vec<f64> = (1..=60)
            .map(|i| if i % 3 == 0 { -(i as f64) } else { i as f64 })
            .collect();
        let result = wilcoxon_signed_rank(&values).unwrap();
        assert_eq!(result.method, WilcoxonMethod::Approx);
        assert!(result.pvalue > 0.0 && result.pvalue < 1.0);
    }

    #[test]
    fn test_undefined_samples() {
        assert_eq!(
            wilcoxon_signed_rank(&[0.0, 0.0, 0.0]),
            Err(StatsError::AllZeroDifferences)
        );
        assert!(matches!(
            wilcoxon_signed_rank(&[]),
            Err(StatsError::InsufficientData { .. })
        ));
    }
}
