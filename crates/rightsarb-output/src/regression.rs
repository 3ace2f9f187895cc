//! Text rendering of fitted OLS models.

use chrono::{DateTime, Utc};
use rightsarb_regress::OlsResults;

const WIDTH: usize = 78;

/// Render a fitted model in the "OLS Regression Results" layout, stamped
/// with the current time.
pub fn render_ols_summary(results: &OlsResults) -> String {
    render_ols_summary_at(results, Utc::now())
}

/// Render a fitted model with an explicit timestamp.
pub fn render_ols_summary_at(results: &OlsResults, at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let robust = results.cov_type.is_robust();

    out.push_str(&format!("{:^WIDTH$}\n", "OLS Regression Results"));
    out.push_str(&"=".repeat(WIDTH));
    out.push('\n');

    let header = [
        (
            ("Dep. Variable:", results.formula.response.clone()),
            ("R-squared:", format!("{:.3}", results.rsquared)),
        ),
        (
            ("Model:", "OLS".to_string()),
            ("Adj. R-squared:", format!("{:.3}", results.rsquared_adj)),
        ),
        (
            ("Method:", "Least Squares".to_string()),
            ("F-statistic:", format_number(results.fvalue)),
        ),
        (
            ("Date:", at.format("%a, %d %b %Y").to_string()),
            ("Prob (F-statistic):", format_number(results.f_pvalue)),
        ),
        (
            ("Time:", at.format("%H:%M:%S").to_string()),
            ("Log-Likelihood:", format_number(results.llf)),
        ),
        (
            ("No. Observations:", results.nobs.to_string()),
            ("AIC:", format_number(results.aic)),
        ),
        (
            ("Df Residuals:", format!("{:.0}", results.df_resid)),
            ("BIC:", format_number(results.bic)),
        ),
    ];
    for ((ll, lv), (rl, rv)) in &header {
        out.push_str(&pair(ll, lv, rl, rv));
    }
    out.push_str(&pair("Df Model:", &format!("{:.0}", results.df_model), "", ""));
    out.push_str(&pair("Covariance Type:", &results.cov_type.to_string(), "", ""));
    out.push_str(&"=".repeat(WIDTH));
    out.push('\n');

    let (stat, prob) = if robust { ("z", "P>|z|") } else { ("t", "P>|t|") };
    out.push_str(&format!(
        "{:<15}{:>10}{:>11}{:>10}{:>10}{:>11}{:>11}\n",
        "", "coef", "std err", stat, prob, "[0.025", "0.975]"
    ));
    out.push_str(&"-".repeat(WIDTH));
    out.push('\n');
    for c in results.coefficients() {
        out.push_str(&format!(
            "{:<15}{:>10.4}{:>11.3}{:>10.3}{:>10.3}{:>11.3}{:>11.3}\n",
            truncate(&c.name, 14),
            c.coef,
            c.std_err,
            c.statistic,
            c.pvalue,
            c.ci_lower,
            c.ci_upper
        ));
    }
    out.push_str(&"=".repeat(WIDTH));
    out.push('\n');

    let d = &results.diagnostics;
    out.push_str(&pair(
        "Omnibus:",
        &format!("{:.3}", d.omnibus),
        "Durbin-Watson:",
        &format!("{:.3}", d.durbin_watson),
    ));
    out.push_str(&pair(
        "Prob(Omnibus):",
        &format!("{:.3}", d.omnibus_pvalue),
        "Jarque-Bera (JB):",
        &format!("{:.3}", d.jarque_bera),
    ));
    out.push_str(&pair(
        "Skew:",
        &format!("{:.3}", d.skew),
        "Prob(JB):",
        &format_number(d.jb_pvalue),
    ));
    out.push_str(&pair(
        "Kurtosis:",
        &format!("{:.3}", d.kurtosis),
        "Cond. No.",
        &format_number(d.condition_number),
    ));
    out.push_str(&"=".repeat(WIDTH));
    out.push_str("\n\nNotes:\n");
    if robust {
        out.push_str(&format!(
            "[1] Standard Errors are heteroscedasticity robust ({})\n",
            results.cov_type
        ));
    } else {
        out.push_str(
            "[1] Standard Errors assume that the covariance matrix of the errors is correctly specified.\n",
        );
    }
    out
}

/// Two label/value columns of 37 and 38 characters.
fn pair(left_label: &str, left_value: &str, right_label: &str, right_value: &str) -> String {
    let left = format!("{left_label:<20}{left_value:>17}");
    if right_label.is_empty() {
        return format!("{}\n", left.trim_end());
    }
    format!("{left}   {right_label:<20}{right_value:>18}\n")
}

/// Four significant digits, switching to scientific notation for very
/// small or large magnitudes.
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e6).contains(&magnitude) {
        format!("{value:.2e}")
    } else if magnitude >= 1000.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.4}")
    }
}

fn truncate(name: &str, max: usize) -> &str {
    match name.char_indices().nth(max) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}
