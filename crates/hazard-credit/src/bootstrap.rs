//! Sequential credit-curve calibration from CDS market quotes.
//!
//! Solves one hazard-rate knot per instrument, shortest maturity first.
//! Each knot is root-solved so the matching instrument's clean upfront
//! value is zero while every previously solved knot stays fixed, so the
//! calibrated curve reprices the whole basket and quote `i` only ever
//! moves knot `i`.

use log::{debug, trace};

use hazard_core::types::Date;
use hazard_math::solvers::{bracket_root, brent, BracketConfig, SolverConfig};

use crate::curve::CreditCurve;
use crate::discount::YieldCurve;
use crate::error::{CreditError, CreditResult};
use crate::pricer::{AccrualOnDefaultFormula, CdsPricer, PriceType};
use crate::schedule::{CdsSchedule, CdsScheduleBuilder};

/// Lower end of the initial hazard-rate bracket, as a multiple of the seed.
const BRACKET_LOWER_SCALE: f64 = 0.8;

/// Upper end of the initial hazard-rate bracket, as a multiple of the seed.
const BRACKET_UPPER_SCALE: f64 = 1.25;

/// Configuration for the credit-curve calibration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapConfig {
    /// Root refinement settings for the per-knot solve.
    pub solver: SolverConfig,
    /// Expansion settings for the initial hazard-rate bracket.
    pub bracket: BracketConfig,
    /// Accrual-on-default formula used by the calibration pricers.
    pub formula: AccrualOnDefaultFormula,
}

/// Sequential bootstrapper that builds a [`CreditCurve`] from CDS quotes.
///
/// The calibration proceeds shortest maturity first:
/// 1. Place one curve knot at each instrument's protection end.
/// 2. Seed every knot with the credit-triangle guess
///    `spread / (1 - recovery)`.
/// 3. For each instrument, bracket and root-solve the knot's hazard rate
///    so the instrument's clean upfront value is zero.
///
/// Solved knots are never revisited. Because the curve interpolates
/// locally, the objective for instrument `i` depends only on knots
/// `0..=i`, which makes the solved rates for short maturities independent
/// of the quotes beyond them.
///
/// # Example
///
/// ```rust,ignore
/// use hazard_credit::bootstrap::CreditCurveBootstrapper;
///
/// let curve = CreditCurveBootstrapper::new()
///     .calibrate(&schedules, &spreads, &discount_curve)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreditCurveBootstrapper {
    config: BootstrapConfig,
}

impl CreditCurveBootstrapper {
    /// Creates a bootstrapper with default solver settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full calibration configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the root-solver settings for the per-knot solve.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.config.solver = solver;
        self
    }

    /// Sets the bracket expansion settings.
    #[must_use]
    pub fn with_bracket(mut self, bracket: BracketConfig) -> Self {
        self.config.bracket = bracket;
        self
    }

    /// Sets the accrual-on-default formula used while calibrating.
    #[must_use]
    pub fn with_formula(mut self, formula: AccrualOnDefaultFormula) -> Self {
        self.config.formula = formula;
        self
    }

    /// Calibrates a credit curve that reprices every quote in the basket.
    ///
    /// `schedules[i]` and `spreads[i]` describe one CDS quote. The basket
    /// must share a single protection start and have strictly ascending
    /// protection ends. The returned curve has one knot per instrument, at
    /// that instrument's protection end.
    ///
    /// # Errors
    ///
    /// [`CreditError::Validation`] for an empty basket or mismatched slice
    /// lengths, [`CreditError::InvalidBasket`] for a bad instrument
    /// (non-positive spread, drifting protection start, out-of-order
    /// maturity), and [`CreditError::CalibrationFailed`] carrying the
    /// pillar index when bracketing or root refinement gives up.
    pub fn calibrate<Y>(
        &self,
        schedules: &[CdsSchedule],
        spreads: &[f64],
        yield_curve: &Y,
    ) -> CreditResult<CreditCurve>
    where
        Y: YieldCurve + ?Sized,
    {
        if schedules.is_empty() {
            return Err(CreditError::validation("calibration basket is empty"));
        }
        if schedules.len() != spreads.len() {
            return Err(CreditError::validation(format!(
                "basket has {} instruments but {} spreads",
                schedules.len(),
                spreads.len()
            )));
        }

        let protection_start = schedules[0].protection_start();
        let mut knot_times = Vec::with_capacity(schedules.len());
        let mut guesses = Vec::with_capacity(schedules.len());
        for (i, (schedule, &spread)) in schedules.iter().zip(spreads).enumerate() {
            if !spread.is_finite() || spread <= 0.0 {
                return Err(CreditError::invalid_basket(
                    i,
                    format!("spread must be positive and finite, got {spread}"),
                ));
            }
            if schedule.protection_start() != protection_start {
                return Err(CreditError::invalid_basket(
                    i,
                    "all instruments must share the same protection start",
                ));
            }
            if let Some(&prev) = knot_times.last() {
                if schedule.protection_end() <= prev {
                    return Err(CreditError::invalid_basket(
                        i,
                        "protection ends must be strictly ascending",
                    ));
                }
            }
            knot_times.push(schedule.protection_end());
            guesses.push(spread / (1.0 - schedule.recovery_rate()));
        }

        debug!(
            "calibrating credit curve: {} instruments, protection start {:.6}",
            schedules.len(),
            protection_start
        );

        let mut curve = CreditCurve::new(knot_times.clone(), guesses.clone())?;
        for (i, (schedule, &spread)) in schedules.iter().zip(spreads).enumerate() {
            let pricer = CdsPricer::new(schedule, yield_curve, &knot_times, spread)?
                .with_formula(self.config.formula);
            let objective =
                |rate: f64| pricer.price(&curve.with_rate(rate, i), PriceType::Clean);

            let guess = guesses[i];
            let bracket = bracket_root(
                &objective,
                BRACKET_LOWER_SCALE * guess,
                BRACKET_UPPER_SCALE * guess,
                (0.0, f64::INFINITY),
                &self.config.bracket,
            )
            .map_err(|source| CreditError::calibration_failed(i, source))?;
            let solved = brent(&objective, bracket.a, bracket.b, &self.config.solver)
                .map_err(|source| CreditError::calibration_failed(i, source))?;

            trace!(
                "pillar {i}: t = {:.6}, hazard = {:.8}, {} iterations",
                knot_times[i],
                solved.root,
                solved.iterations
            );
            curve = curve.with_rate(solved.root, i);
        }

        debug!("credit curve calibrated: {} knots", curve.num_knots());
        Ok(curve)
    }

    /// Calibrates from maturity dates and par spreads using the
    /// standard-contract schedule conventions.
    ///
    /// Builds one [`CdsSchedule`] per maturity off `trade_date` with the
    /// builder defaults and the given recovery rate, then delegates to
    /// [`CreditCurveBootstrapper::calibrate`]. Maturities must be strictly
    /// ascending.
    ///
    /// # Errors
    ///
    /// Schedule construction failures surface as the underlying schedule
    /// error; basket and solver failures as in
    /// [`CreditCurveBootstrapper::calibrate`].
    pub fn calibrate_from_dates<Y>(
        &self,
        trade_date: Date,
        maturities: &[Date],
        spreads: &[f64],
        recovery_rate: f64,
        yield_curve: &Y,
    ) -> CreditResult<CreditCurve>
    where
        Y: YieldCurve + ?Sized,
    {
        if maturities.len() != spreads.len() {
            return Err(CreditError::validation(format!(
                "basket has {} maturities but {} spreads",
                maturities.len(),
                spreads.len()
            )));
        }
        let schedules = maturities
            .iter()
            .map(|&maturity| {
                CdsScheduleBuilder::new(trade_date, maturity)
                    .recovery_rate(recovery_rate)
                    .build()
            })
            .collect::<CreditResult<Vec<_>>>()?;
        self.calibrate(&schedules, spreads, yield_curve)
    }
}
