//! Integration tests for OLS fitting on synthetic factor data.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{Array1, Array2, s};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rightsarb_regress::{CovType, Formula, Ols};
use rstest::rstest;

const TRUE_PARAMS: [f64; 4] = [0.004, 0.9, 0.3, -0.2];

/// Approximately normal draw from the sum of twelve uniforms.
fn gaussian(rng: &mut StdRng) -> f64 {
    (0..12).map(|_| rng.r#gen::<f64>()).sum::<f64>() - 6.0
}

/// Monthly returns from a three-factor model with heteroskedastic noise.
fn synthetic_data(n: usize, seed: u64) -> (Array1<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Array2::<f64>::zeros((n, 3));
    let mut y = Array1::<f64>::zeros(n);

    for i in 0..n {
        let market = 0.05 * gaussian(&mut rng);
        let smb = 0.03 * gaussian(&mut rng);
        let hml = 0.03 * gaussian(&mut rng);
        // Noise scale grows with market exposure
        let noise = (0.005 + 0.2 * market.abs()) * gaussian(&mut rng);
        x[[i, 0]] = market;
        x[[i, 1]] = smb;
        x[[i, 2]] = hml;
        y[i] = TRUE_PARAMS[0]
            + TRUE_PARAMS[1] * market
            + TRUE_PARAMS[2] * smb
            + TRUE_PARAMS[3] * hml
            + noise;
    }

    (y, x)
}

fn three_factor(n: usize, seed: u64) -> Ols {
    let (y, x) = synthetic_data(n, seed);
    Ols::new(Formula::new("Total", &["IBEX35", "SMB", "HML"]), y, x).unwrap()
}

#[test]
fn test_recovers_true_coefficients() {
    let results = three_factor(2_000, 7).fit(CovType::HC1).unwrap();
    for (estimate, (truth, se)) in results
        .params
        .iter()
        .zip(TRUE_PARAMS.iter().zip(results.bse.iter()))
    {
        assert!(
            (estimate - truth).abs() < 5.0 * se,
            "estimate {estimate} too far from {truth} (se {se})"
        );
    }
}

#[test]
fn test_hc1_is_scaled_hc0() {
    let model = three_factor(250, 11);
    let hc0 = model.fit(CovType::HC0).unwrap();
    let hc1 = model.fit(CovType::HC1).unwrap();
    let scale = (250.0_f64 / (250.0 - 4.0)).sqrt();

    for (a, b) in hc0.bse.iter().zip(hc1.bse.iter()) {
        assert_relative_eq!(a * scale, *b, epsilon = 1e-12);
    }
    // Point estimates do not depend on the covariance type
    for (a, b) in hc0.params.iter().zip(hc1.params.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-15);
    }
}

#[test]
fn test_robust_errors_exceed_classical_under_heteroskedasticity() {
    let model = three_factor(2_000, 3);
    let classical = model.fit(CovType::NonRobust).unwrap();
    let robust = model.fit(CovType::HC1).unwrap();
    // Noise variance rises with |market|, so classical errors understate the slope's
    assert!(robust.bse[1] > classical.bse[1]);
}

#[test]
fn test_nested_models_increase_fit() {
    let (y, x) = synthetic_data(500, 5);
    let market_only = Ols::new(
        Formula::new("Total", &["IBEX35"]),
        y.clone(),
        x.slice(s![.., 0..1]).to_owned(),
    )
    .unwrap()
    .fit(CovType::HC1)
    .unwrap();
    let full = Ols::new(Formula::new("Total", &["IBEX35", "SMB", "HML"]), y, x)
        .unwrap()
        .fit(CovType::HC1)
        .unwrap();

    assert!(full.rsquared >= market_only.rsquared);
    assert_eq!(market_only.names, vec!["Intercept", "IBEX35"]);
    assert_relative_eq!(full.df_model, 3.0);
    assert_relative_eq!(full.df_resid, 496.0);
    assert!(full.f_pvalue < 1e-6);
}

#[test]
fn test_from_rows_matches_matrix_constructor() {
    let (y, x) = synthetic_data(60, 19);
    let rows: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
    let formula = Formula::new("Total", &["IBEX35", "SMB", "HML"]);

    let a = Ols::from_rows(formula.clone(), y.as_slice().unwrap(), &rows)
        .unwrap()
        .fit(CovType::HC1)
        .unwrap();
    let b = Ols::new(formula, y, x).unwrap().fit(CovType::HC1).unwrap();

    for (pa, pb) in a.params.iter().zip(b.params.iter()) {
        assert_relative_eq!(pa, pb, epsilon = 1e-14);
    }
}

/// Six months of one portfolio against one factor, small enough to solve by hand.
fn hand_sized() -> Ols {
    let x = Array2::from_shape_vec((6, 1), vec![0.5, 1.5, 2.0, 3.5, 4.0, 6.0]).unwrap();
    let y = Array1::from(vec![1.2, 1.1, 2.3, 2.9, 2.6, 4.4]);
    Ols::new(Formula::new("P", &["M"]), y, x).unwrap()
}

#[rstest]
#[case::nonrobust(CovType::NonRobust, [0.3254801330679, 0.0947844049533])]
#[case::hc0(CovType::HC0, [0.2515642980293, 0.0602649461241])]
#[case::hc1(CovType::HC1, [0.3081020838366, 0.0738091836902])]
#[case::hc2(CovType::HC2, [0.3068605823400, 0.0798317984171])]
#[case::hc3(CovType::HC3, [0.3847980773104, 0.1121752329729])]
fn test_standard_errors_match_closed_form(#[case] cov_type: CovType, #[case] expected: [f64; 2]) {
    let results = hand_sized().fit(cov_type).unwrap();
    assert_relative_eq!(results.params[0], 0.7135306553911204, epsilon = 1e-12);
    assert_relative_eq!(results.params[1], 0.5839323467230445, epsilon = 1e-12);
    for (se, want) in results.bse.iter().zip(expected) {
        assert_abs_diff_eq!(*se, want, epsilon = 1e-10);
    }
}
