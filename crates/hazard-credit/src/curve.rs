//! Piecewise hazard-rate credit curves with ISDA-compliant storage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CreditError, CreditResult};

/// Checks that curve knots are usable: equal-length, non-empty, finite,
/// strictly ascending times with the first knot after time zero.
pub(crate) fn validate_knots(times: &[f64], rates: &[f64]) -> CreditResult<()> {
    if times.is_empty() {
        return Err(CreditError::invalid_curve("curve must have at least one knot"));
    }
    if times.len() != rates.len() {
        return Err(CreditError::validation(format!(
            "knot times and rates must have same length: {} vs {}",
            times.len(),
            rates.len()
        )));
    }
    if times[0] <= 0.0 {
        return Err(CreditError::invalid_curve(format!(
            "first knot time must be positive, got {}",
            times[0]
        )));
    }
    for window in times.windows(2) {
        if window[1] <= window[0] {
            return Err(CreditError::invalid_curve(format!(
                "knot times must be strictly ascending, got {} then {}",
                window[0], window[1]
            )));
        }
    }
    if times.iter().chain(rates.iter()).any(|x| !x.is_finite()) {
        return Err(CreditError::validation("curve knots must be finite"));
    }
    Ok(())
}

/// Looks up `rt = rate × time` on ISDA-compliant knot storage.
///
/// The zero rate is constant before the first knot, `rt` is linear between
/// knots, and the forward rate is constant beyond the last knot. An exact
/// knot hit returns the cached `rt` without arithmetic.
pub(crate) fn interpolate_rt(times: &[f64], rates: &[f64], rt: &[f64], t: f64) -> f64 {
    let n = times.len();
    if t <= times[0] {
        return t * rates[0];
    }
    if t > times[n - 1] {
        return t * rates[n - 1];
    }
    let hi = times.partition_point(|&knot| knot < t);
    if times[hi] == t {
        return rt[hi];
    }
    let lo = hi - 1;
    let (t1, t2) = (times[lo], times[hi]);
    ((t2 - t) * rt[lo] + (t - t1) * rt[hi]) / (t2 - t1)
}

/// An immutable piecewise-constant-forward hazard-rate term structure.
///
/// Stores zero hazard rates at strictly ascending knot times together with
/// the cached cumulative hazard `rt_i = rate_i × time_i`. Survival
/// probabilities follow the ISDA standard model convention: the zero hazard
/// rate is flat before the first knot, cumulative hazard interpolates
/// linearly between knots, and the forward hazard is flat beyond the last
/// knot.
///
/// Curves are value objects. [`CreditCurve::with_rate`] produces a new curve
/// with one rate replaced and never mutates its receiver; the knot-time
/// array is structurally shared between parent and derived curves, which
/// keeps the calibration loop's per-iteration cost at a pair of O(knots)
/// array copies.
///
/// # Example
///
/// ```
/// use hazard_credit::CreditCurve;
///
/// let curve = CreditCurve::new(vec![1.0, 3.0, 5.0], vec![0.010, 0.012, 0.015])?;
/// let q = curve.survival(2.0);
/// assert!(q > 0.0 && q < 1.0);
/// # Ok::<(), hazard_credit::CreditError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CurveKnots", into = "CurveKnots")]
pub struct CreditCurve {
    times: Arc<[f64]>,
    rates: Vec<f64>,
    rt: Vec<f64>,
}

impl CreditCurve {
    /// Creates a credit curve from knot times and zero hazard rates.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] when the knots are empty, not
    /// strictly ascending, or start at or before time zero, and
    /// [`CreditError::Validation`] on length mismatch or non-finite values.
    pub fn new(times: Vec<f64>, rates: Vec<f64>) -> CreditResult<Self> {
        validate_knots(&times, &rates)?;
        let rt = times.iter().zip(&rates).map(|(t, r)| t * r).collect();
        Ok(Self {
            times: times.into(),
            rates,
            rt,
        })
    }

    /// Creates a single-knot curve with a flat hazard rate.
    pub fn flat(rate: f64) -> CreditResult<Self> {
        Self::new(vec![1.0], vec![rate])
    }

    /// Returns the cumulative hazard `∫₀ᵗ h(s) ds` at time `t`.
    #[must_use]
    pub fn rt(&self, t: f64) -> f64 {
        interpolate_rt(&self.times, &self.rates, &self.rt, t)
    }

    /// Returns the survival probability `exp(-rt(t))` at time `t`.
    #[must_use]
    pub fn survival(&self, t: f64) -> f64 {
        (-self.rt(t)).exp()
    }

    /// Returns a new curve with the rate at `index` replaced by `value`.
    ///
    /// Knot times are shared with the receiver; rates and cached cumulative
    /// hazards are copied.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn with_rate(&self, value: f64, index: usize) -> Self {
        let mut rates = self.rates.clone();
        let mut rt = self.rt.clone();
        rates[index] = value;
        rt[index] = self.times[index] * value;
        Self {
            times: Arc::clone(&self.times),
            rates,
            rt,
        }
    }

    /// Returns the knot times.
    #[must_use]
    pub fn knot_times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the zero hazard rates at the knots.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn num_knots(&self) -> usize {
        self.times.len()
    }

    /// Returns the zero hazard rate at knot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn rate_at(&self, index: usize) -> f64 {
        self.rates[index]
    }
}

/// Serialized form of a curve: the knots only, caches rebuilt on read.
#[derive(Serialize, Deserialize)]
pub(crate) struct CurveKnots {
    pub(crate) times: Vec<f64>,
    pub(crate) rates: Vec<f64>,
}

impl TryFrom<CurveKnots> for CreditCurve {
    type Error = CreditError;

    fn try_from(knots: CurveKnots) -> Result<Self, Self::Error> {
        Self::new(knots.times, knots.rates)
    }
}

impl From<CreditCurve> for CurveKnots {
    fn from(curve: CreditCurve) -> Self {
        Self {
            times: curve.times.to_vec(),
            rates: curve.rates,
        }
    }
}
