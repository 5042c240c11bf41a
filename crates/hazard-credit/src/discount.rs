//! Discounting term structures for CDS valuation.

use serde::{Deserialize, Serialize};

use crate::curve::{interpolate_rt, validate_knots, CurveKnots};
use crate::error::{CreditError, CreditResult};

/// A continuously compounded discounting term structure.
///
/// Pricing and calibration only need `rt(t)` (rate × time, the negative log
/// of the discount factor) and the times at which the curve's forward rate
/// can jump, so this is the seam for plugging in any discount curve source.
/// Implementors are immutable; `Send + Sync` lets pricers built over a curve
/// move freely across threads.
pub trait YieldCurve: Send + Sync {
    /// Returns `rate × time` at `t`, the negative log of the discount factor.
    fn rt(&self, t: f64) -> f64;

    /// Returns the discount factor `exp(-rt(t))` at `t`.
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.rt(t)).exp()
    }

    /// Returns the sorted knot times where the forward rate can jump.
    fn knot_times(&self) -> &[f64];
}

/// An ISDA-compliant piecewise zero curve for discounting.
///
/// Same storage convention as [`crate::CreditCurve`]: zero rates at strictly
/// ascending knot times with cached `rt_i = rate_i × time_i`, flat zero rate
/// before the first knot, `rt` linear between knots, flat forward rate
/// beyond the last knot.
///
/// # Example
///
/// ```
/// use hazard_credit::{DiscountCurve, YieldCurve};
///
/// let curve = DiscountCurve::flat(0.02)?;
/// let df = curve.discount_factor(5.0);
/// assert!((df - (-0.1f64).exp()).abs() < 1e-15);
/// # Ok::<(), hazard_credit::CreditError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CurveKnots", into = "CurveKnots")]
pub struct DiscountCurve {
    times: Vec<f64>,
    rates: Vec<f64>,
    rt: Vec<f64>,
}

impl DiscountCurve {
    /// Creates a discount curve from knot times and continuously
    /// compounded zero rates.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] when the knots are empty, not
    /// strictly ascending, or start at or before time zero, and
    /// [`CreditError::Validation`] on length mismatch or non-finite values.
    pub fn new(times: Vec<f64>, rates: Vec<f64>) -> CreditResult<Self> {
        validate_knots(&times, &rates)?;
        let rt = times.iter().zip(&rates).map(|(t, r)| t * r).collect();
        Ok(Self { times, rates, rt })
    }

    /// Creates a single-knot curve with a flat zero rate.
    pub fn flat(rate: f64) -> CreditResult<Self> {
        Self::new(vec![1.0], vec![rate])
    }

    /// Returns the zero rates at the knots.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn num_knots(&self) -> usize {
        self.times.len()
    }
}

impl YieldCurve for DiscountCurve {
    fn rt(&self, t: f64) -> f64 {
        interpolate_rt(&self.times, &self.rates, &self.rt, t)
    }

    fn knot_times(&self) -> &[f64] {
        &self.times
    }
}

impl TryFrom<CurveKnots> for DiscountCurve {
    type Error = CreditError;

    fn try_from(knots: CurveKnots) -> Result<Self, Self::Error> {
        Self::new(knots.times, knots.rates)
    }
}

impl From<DiscountCurve> for CurveKnots {
    fn from(curve: DiscountCurve) -> Self {
        Self {
            times: curve.times,
            rates: curve.rates,
        }
    }
}
