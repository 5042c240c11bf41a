//! Root bracketing by geometric expansion.

use crate::error::{MathError, MathResult};

/// Default expansion ratio per bracketing step.
pub const DEFAULT_BRACKET_RATIO: f64 = 1.6;

/// Default maximum number of expansion steps.
pub const DEFAULT_BRACKET_STEPS: u32 = 50;

/// Configuration for [`bracket_root`].
#[derive(Debug, Clone, Copy)]
pub struct BracketConfig {
    /// Interval growth factor per expansion step.
    pub ratio: f64,
    /// Maximum number of expansion steps. A hard bound.
    pub max_steps: u32,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_BRACKET_RATIO,
            max_steps: DEFAULT_BRACKET_STEPS,
        }
    }
}

/// A sign-changing interval located by [`bracket_root`].
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    /// Lower end of the interval.
    pub a: f64,
    /// Upper end of the interval.
    pub b: f64,
    /// Function value at `a`.
    pub fa: f64,
    /// Function value at `b`.
    pub fb: f64,
}

/// Expands an initial interval outward until the function changes sign.
///
/// Starting from `[lower, upper]`, the end with the smaller absolute
/// function value is pushed outward by `ratio` times the current width,
/// clamped to `bounds`, until `f` has opposite signs at the two ends.
/// A zero at either end counts as a sign change.
///
/// # Arguments
///
/// * `f` - The function to bracket
/// * `lower` - Initial lower end
/// * `upper` - Initial upper end
/// * `bounds` - Hard `(min, max)` domain limits for the expansion
/// * `config` - Expansion ratio and step cap
///
/// # Errors
///
/// `MathError::InvalidInput` if the initial interval or bounds are
/// malformed, `MathError::BracketingFailed` if no sign change is found
/// within the step cap (with both endpoints clamped, further steps cannot
/// make progress and the cap is the only exit).
///
/// # Example
///
/// ```rust
/// use hazard_math::solvers::{bracket_root, BracketConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let bracket = bracket_root(f, 0.1, 0.2, (0.0, f64::MAX), &BracketConfig::default()).unwrap();
/// assert!(bracket.fa * bracket.fb <= 0.0);
/// assert!(bracket.a <= std::f64::consts::SQRT_2);
/// assert!(bracket.b >= std::f64::consts::SQRT_2);
/// ```
pub fn bracket_root<F>(
    f: F,
    lower: f64,
    upper: f64,
    bounds: (f64, f64),
    config: &BracketConfig,
) -> MathResult<Bracket>
where
    F: Fn(f64) -> f64,
{
    let (min_x, max_x) = bounds;
    if !(lower < upper) {
        return Err(MathError::invalid_input(format!(
            "bracket interval [{lower}, {upper}] is not ascending"
        )));
    }
    if lower < min_x || upper > max_x {
        return Err(MathError::invalid_input(format!(
            "interval [{lower}, {upper}] outside domain [{min_x}, {max_x}]"
        )));
    }

    let mut a = lower;
    let mut b = upper;
    let mut fa = f(a);
    let mut fb = f(b);

    for _ in 0..config.max_steps {
        if fa * fb <= 0.0 {
            return Ok(Bracket { a, b, fa, fb });
        }
        if fa.abs() < fb.abs() {
            a = (a + config.ratio * (a - b)).max(min_x);
            fa = f(a);
        } else {
            b = (b + config.ratio * (b - a)).min(max_x);
            fb = f(b);
        }
    }

    Err(MathError::BracketingFailed {
        a,
        b,
        fa,
        fb,
        steps: config.max_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_bracketed() {
        let f = |x: f64| x * x - 2.0;
        let bracket =
            bracket_root(f, 1.0, 2.0, (f64::MIN, f64::MAX), &BracketConfig::default()).unwrap();
        assert_eq!(bracket.a, 1.0);
        assert_eq!(bracket.b, 2.0);
    }

    #[test]
    fn test_expands_upward() {
        // Root at sqrt(2) is above the initial interval
        let f = |x: f64| x * x - 2.0;
        let bracket =
            bracket_root(f, 0.5, 0.6, (0.0, f64::MAX), &BracketConfig::default()).unwrap();
        assert!(bracket.fa * bracket.fb <= 0.0);
        assert!(bracket.b > std::f64::consts::SQRT_2);
    }

    #[test]
    fn test_expands_downward_with_clamp() {
        // Root at 0.01; start far above, domain floor at zero
        let f = |x: f64| x - 0.01;
        let bracket =
            bracket_root(f, 0.5, 0.7, (0.0, f64::MAX), &BracketConfig::default()).unwrap();
        assert!(bracket.fa * bracket.fb <= 0.0);
        assert!(bracket.a >= 0.0);
    }

    #[test]
    fn test_no_root_fails() {
        let f = |x: f64| x * x + 1.0;
        let result = bracket_root(f, 1.0, 2.0, (0.0, 100.0), &BracketConfig::default());
        assert!(matches!(result, Err(MathError::BracketingFailed { .. })));
    }

    #[test]
    fn test_rejects_bad_interval() {
        let f = |x: f64| x;
        assert!(bracket_root(f, 2.0, 1.0, (0.0, 10.0), &BracketConfig::default()).is_err());
        assert!(bracket_root(f, -1.0, 1.0, (0.0, 10.0), &BracketConfig::default()).is_err());
    }

    #[test]
    fn test_zero_at_endpoint_counts() {
        let f = |x: f64| x - 1.0;
        let bracket =
            bracket_root(f, 1.0, 2.0, (0.0, 10.0), &BracketConfig::default()).unwrap();
        assert_eq!(bracket.fa, 0.0);
    }
}
