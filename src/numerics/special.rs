//! Special functions needed to evaluate densities in log space.

use std::f64::consts::PI;

/// `ln Γ(x)` by the Lanczos approximation (g = 7, nine coefficients), with the reflection
/// formula below one half.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision, clippy::unreadable_literal)]
    const COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let series = COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(COEFFICIENTS[0], |sum, (i, &c)| sum + c / (x + i as f64));
    let t = x + G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

#[must_use]
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// `ln C(n, k)` for real-valued `n`, as needed by the binomial family and its negative twin.
#[must_use]
pub fn ln_choose(n: f64, k: f64) -> f64 {
    ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0)
}

/// `k ln p`, taking `0 ln 0` to be zero.
#[must_use]
pub fn xlogy(k: f64, p: f64) -> f64 {
    if k == 0.0 {
        0.0
    } else {
        k * p.ln()
    }
}
