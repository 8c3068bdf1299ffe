//! Special mathematical functions.
//!
//! `rand_distr` samples Student-t but does not evaluate its density, so
//! the log-gamma function needed for the density lives here.

/// Lanczos coefficients for g = 7, n = 9.
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEF: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function, ln Γ(z), for real `z > 0`.
///
/// # Algorithm
/// Lanczos approximation with g = 7 and 9 coefficients; the reflection
/// formula Γ(z)Γ(1−z) = π/sin(πz) handles z < 0.5.
///
/// Reference: Lanczos (1964), *A Precision Approximation of the Gamma
/// Function*, SIAM J. Numer. Anal. 1, 86–96.
///
/// # Accuracy
/// Relative error below 1e-13 over the positive reals.
pub fn ln_gamma(z: f64) -> f64 {
    if z.is_nan() || z <= 0.0 && z.fract() == 0.0 {
        return f64::NAN;
    }
    if z < 0.5 {
        // Reflection: ln Γ(z) = ln(π / sin(πz)) − ln Γ(1 − z)
        let sin_piz = (std::f64::consts::PI * z).sin();
        return (std::f64::consts::PI / sin_piz.abs()).ln() - ln_gamma(1.0 - z);
    }

    let z = z - 1.0;
    let mut x = LANCZOS_COEF[0];
    for (i, c) in LANCZOS_COEF.iter().enumerate().skip(1) {
        x += c / (z + i as f64);
    }
    let t = z + LANCZOS_G + 0.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (z + 0.5) * t.ln() - t + x.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln_gamma_integers() {
        // Γ(n) = (n-1)!
        assert!(ln_gamma(1.0).abs() < 1e-12);
        assert!(ln_gamma(2.0).abs() < 1e-12);
        assert!((ln_gamma(5.0) - 24.0f64.ln()).abs() < 1e-10);
        assert!((ln_gamma(10.0) - 362_880.0f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_ln_gamma_half() {
        // Γ(1/2) = √π
        let expected = std::f64::consts::PI.sqrt().ln();
        assert!((ln_gamma(0.5) - expected).abs() < 1e-12);
        // Γ(3/2) = √π / 2
        let expected = (std::f64::consts::PI.sqrt() / 2.0).ln();
        assert!((ln_gamma(1.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ln_gamma_recurrence() {
        // Γ(z+1) = z·Γ(z)
        for &z in &[0.7, 1.3, 2.9, 6.4] {
            let lhs = ln_gamma(z + 1.0);
            let rhs = z.ln() + ln_gamma(z);
            assert!((lhs - rhs).abs() < 1e-11, "recurrence failed at z={z}");
        }
    }
}
