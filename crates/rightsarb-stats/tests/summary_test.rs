//! Integration tests for the per-subsample summary.

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rightsarb_stats::{
    BootstrapConfig, Centering, Observation, StatsConfig, compute_subsample_stats,
    compute_subsample_stats_with, ttest_1samp,
};

fn synthetic_returns(n: usize, drift: f64, seed: u64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let noise: f64 = rng.gen_range(-0.05..0.05);
            let flag = if i % 10 == 9 { 1.0 } else { 0.0 };
            Observation::new(Some(drift + noise), Some(flag))
        })
        .collect()
}

#[test]
fn test_summary_matches_closed_form() {
    let sample = synthetic_returns(40, 0.01, 1);
    let summary = compute_subsample_stats(&sample, true, false);

    let kept: Vec<f64> = sample
        .iter()
        .filter(|o| o.is_regular())
        .filter_map(|o| o.value)
        .collect();
    assert_eq!(summary.n, 36);

    let n = kept.len() as f64;
    let mean = kept.iter().sum::<f64>() / n;
    let var = kept.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    assert_relative_eq!(summary.mean, mean, epsilon = 1e-12);
    assert_relative_eq!(summary.std, var.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(summary.t_pvalue, ttest_1samp(&kept, 0.0).pvalue, epsilon = 1e-12);
    assert!(summary.wilcoxon_pvalue > 0.0 && summary.wilcoxon_pvalue <= 1.0);
}

#[test]
fn test_strong_drift_is_significant() {
    let sample = synthetic_returns(60, 0.05, 2);
    let summary = compute_subsample_stats(&sample, false, true);
    assert!(summary.t_pvalue < 0.001);
    assert!(summary.wilcoxon_pvalue < 0.001);
}

#[test]
fn test_bootstrap_identical_across_runs() {
    let sample = synthetic_returns(30, 0.0, 3);
    let config = StatsConfig {
        exclude_outliers: false,
        bootstrap: Some(BootstrapConfig {
            centering: Centering::SampleMean,
            ..Default::default()
        }),
    };
    let first = compute_subsample_stats_with(&sample, &config);
    let second = compute_subsample_stats_with(&sample, &config);
    assert_eq!(first.ci_lower.to_bits(), second.ci_lower.to_bits());
    assert_eq!(first.ci_upper.to_bits(), second.ci_upper.to_bits());
    assert!(first.ci_lower < first.mean && first.mean < first.ci_upper);
}
