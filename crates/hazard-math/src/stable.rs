//! Numerically stable exponential-difference kernels.
//!
//! The closed-form integrals of piecewise-exponential survival and discount
//! products reduce to expressions of the form `(e^x - 1)/x` and its first
//! derivative. Direct evaluation loses all significance as `x` approaches 0,
//! so both functions switch to a truncated Taylor series for small `|x|`.
//! The expansions agree with the direct forms to well below 1e-10 at the
//! switchover, keeping the functions continuous and smooth there.

/// Switchover point between the Taylor expansion and the direct form.
pub const SERIES_CUTOFF: f64 = 1e-5;

/// Computes `(e^x - 1)/x` stably for all `x`.
///
/// Equals 1 at `x = 0`.
#[must_use]
pub fn epsilon(x: f64) -> f64 {
    if x.abs() > SERIES_CUTOFF {
        return x.exp_m1() / x;
    }
    // Horner form of 1 + x/2 + x^2/6 + x^3/24 + x^4/120
    1.0 + x * (0.5 + x * (1.0 / 6.0 + x * (1.0 / 24.0 + x / 120.0)))
}

/// Computes the derivative of [`epsilon`], `((x - 1)(e^x - 1) + x)/x^2`,
/// stably for all `x`.
///
/// Equals 1/2 at `x = 0`. This is the kernel of the time-weighted integral
/// `\int_0^1 s e^{xs} ds` used by accrual-on-default.
#[must_use]
pub fn epsilon_p(x: f64) -> f64 {
    if x.abs() > SERIES_CUTOFF {
        return ((x - 1.0) * x.exp_m1() + x) / (x * x);
    }
    // Horner form of 1/2 + x/3 + x^2/8 + x^3/30 + x^4/144
    0.5 + x * (1.0 / 3.0 + x * (1.0 / 8.0 + x * (1.0 / 30.0 + x / 144.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_epsilon_at_zero() {
        assert_relative_eq!(epsilon(0.0), 1.0);
        assert_relative_eq!(epsilon_p(0.0), 0.5);
    }

    #[test]
    fn test_epsilon_direct_values() {
        // (e^1 - 1)/1
        assert_relative_eq!(epsilon(1.0), std::f64::consts::E - 1.0, epsilon = 1e-14);
        // (e^-1 - 1)/-1
        assert_relative_eq!(
            epsilon(-1.0),
            1.0 - std::f64::consts::E.recip(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_epsilon_p_direct_values() {
        let x: f64 = 0.7;
        let expected = ((x - 1.0) * x.exp_m1() + x) / (x * x);
        assert_relative_eq!(epsilon_p(x), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_continuity_at_switchover() {
        let delta = 1e-9;
        for sign in [-1.0, 1.0] {
            let below = sign * (SERIES_CUTOFF - delta);
            let above = sign * (SERIES_CUTOFF + delta);
            assert!((epsilon(below) - epsilon(above)).abs() < 1e-10);
            assert!((epsilon_p(below) - epsilon_p(above)).abs() < 1e-10);
        }
    }

    #[test]
    fn test_epsilon_p_is_derivative_of_epsilon() {
        let h = 1e-6;
        for x in [-2.0, -0.5, -0.01, 0.01, 0.5, 2.0] {
            let numerical = (epsilon(x + h) - epsilon(x - h)) / (2.0 * h);
            assert_relative_eq!(epsilon_p(x), numerical, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_epsilon_monotone_increasing() {
        // (e^x - 1)/x is strictly increasing
        let mut prev = epsilon(-5.0);
        let mut x = -5.0 + 0.1;
        while x < 5.0 {
            let current = epsilon(x);
            assert!(current > prev);
            prev = current;
            x += 0.1;
        }
    }

    proptest! {
        #[test]
        fn prop_epsilon_matches_expm1(x in -30.0..30.0f64) {
            // Away from zero the direct form is exact; near zero compare
            // against the high-precision identity via expm1
            prop_assume!(x.abs() > 1e-12);
            let direct = x.exp_m1() / x;
            prop_assert!((epsilon(x) - direct).abs() <= 1e-9 * direct.abs().max(1.0));
        }

        #[test]
        fn prop_epsilon_positive(x in -700.0..700.0f64) {
            // (e^x - 1) and x always share a sign
            prop_assert!(epsilon(x) > 0.0);
        }

        #[test]
        fn prop_epsilon_p_positive(x in -30.0..30.0f64) {
            prop_assert!(epsilon_p(x) > 0.0);
        }
    }
}
