//! CDS valuation: protection leg, premium annuity, PV and par spread.
//!
//! [`CdsPricer`] resolves one contract against a discount curve up front:
//! integration grids, discount factors and accrual rates are computed once
//! at construction, and every pricing call then takes the credit curve as a
//! parameter. A calibration root search can therefore re-price the same
//! contract against hundreds of candidate curves without touching the
//! discount curve again.
//!
//! Between consecutive grid nodes both curves are log-linear, which makes
//! the protection and accrual-on-default integrals exact per interval; the
//! small-exponent limits go through the series expansions in
//! `hazard_math::stable` instead of dividing near-cancelling differences.

use hazard_math::stable::{epsilon, epsilon_p, SERIES_CUTOFF};

use crate::curve::CreditCurve;
use crate::discount::YieldCurve;
use crate::error::{CreditError, CreditResult};
use crate::grid::{integration_nodes, truncate_inclusive};
use crate::schedule::{CdsSchedule, CURVE_ONE_DAY};

/// The reference model measures accrual-period time with half a day added.
const HALF_DAY: f64 = 1.0 / 730.0;

/// Whether a PV includes the premium accrued at step-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceType {
    /// PV net of accrued premium, the market quotation convention.
    #[default]
    Clean,
    /// Full PV including accrued premium.
    Dirty,
}

/// Selects the accrual-on-default integration formula.
///
/// The ISDA C code distributes a formula with a half-day offset in the
/// period-time variable; Markit later published a corrected version. Both
/// are kept so calibrated curves can match either reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccrualOnDefaultFormula {
    /// Matches the ISDA C reference code, half-day offset included.
    #[default]
    OriginalIsda,
    /// The corrected formula from the Markit fix.
    MarkitFix,
}

/// One premium payment with its precomputed discounting data.
#[derive(Debug, Clone)]
struct PremiumPeriod {
    accrual_fraction: f64,
    payment_df: f64,
    observation_time: f64,
    accrual: Option<AccrualGrid>,
}

/// Per-period accrual-on-default integration grid with discount samples.
#[derive(Debug, Clone)]
struct AccrualGrid {
    nodes: Vec<f64>,
    yc_rt: Vec<f64>,
    df: Vec<f64>,
    dt: Vec<f64>,
    rate: f64,
    start: f64,
}

/// A CDS pricer bound to one contract and one discount curve.
///
/// The credit curve is a per-call parameter: construct the pricer once and
/// evaluate [`CdsPricer::price`] (or the other legs) against as many
/// candidate curves as needed. All monetary results are in units of the
/// contract notional's currency and are discounted to the cash-settle date.
pub struct CdsPricer {
    spread: f64,
    notional: f64,
    accrued_fraction: f64,
    valuation_df: f64,
    lgd_df: f64,
    formula: AccrualOnDefaultFormula,

    protection_nodes: Vec<f64>,
    protection_yc_rt: Vec<f64>,
    protection_df: Vec<f64>,

    premium: Vec<PremiumPeriod>,
}

impl CdsPricer {
    /// Prepares a pricer for `schedule` against `yield_curve`.
    ///
    /// `credit_knot_times` are the knots of the credit curves that will be
    /// passed to the pricing calls; they are folded into the integration
    /// grids so the piecewise integrals stay exact. `market_spread` is the
    /// running spread used by [`CdsPricer::price`].
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] when the schedule has no
    /// remaining payments or either curve has no knots, and
    /// [`CreditError::Validation`] for a non-finite spread.
    pub fn new<Y>(
        schedule: &CdsSchedule,
        yield_curve: &Y,
        credit_knot_times: &[f64],
        market_spread: f64,
    ) -> CreditResult<Self>
    where
        Y: YieldCurve + ?Sized,
    {
        if schedule.num_payments() == 0 {
            return Err(CreditError::invalid_curve(
                "schedule has no remaining premium payments",
            ));
        }
        if yield_curve.knot_times().is_empty() {
            return Err(CreditError::invalid_curve("discount curve has no knots"));
        }
        if credit_knot_times.is_empty() {
            return Err(CreditError::invalid_curve("credit curve has no knots"));
        }
        if !market_spread.is_finite() {
            return Err(CreditError::validation(format!(
                "market spread must be finite, got {market_spread}"
            )));
        }

        let protection_nodes = integration_nodes(
            schedule.protection_start(),
            schedule.protection_end(),
            yield_curve.knot_times(),
            credit_knot_times,
        );
        let protection_yc_rt: Vec<f64> =
            protection_nodes.iter().map(|&t| yield_curve.rt(t)).collect();
        let protection_df: Vec<f64> = protection_yc_rt.iter().map(|&rt| (-rt).exp()).collect();

        let valuation_df = yield_curve.discount_factor(schedule.valuation_time());
        let lgd_df = schedule.lgd() / valuation_df;

        let periods = schedule.periods();
        let offset = if schedule.protection_from_start_of_day() {
            -CURVE_ONE_DAY
        } else {
            0.0
        };
        let offset_step_in = schedule.step_in_time() + offset;

        let full_grid = if schedule.pay_accrual_on_default() {
            let first = periods[0].accrual_start;
            let last = periods[periods.len() - 1].accrual_end;
            integration_nodes(first, last, yield_curve.knot_times(), credit_knot_times)
        } else {
            Vec::new()
        };

        let premium = periods
            .iter()
            .map(|period| {
                let accrual = if schedule.pay_accrual_on_default() {
                    let offset_acc_start = period.accrual_start + offset;
                    let offset_acc_end = period.accrual_end + offset;
                    let start = offset_acc_start.max(offset_step_in);
                    if start >= offset_acc_end {
                        // period fully accrued before step-in
                        None
                    } else {
                        let nodes = truncate_inclusive(start, offset_acc_end, &full_grid);
                        let yc_rt: Vec<f64> =
                            nodes.iter().map(|&t| yield_curve.rt(t)).collect();
                        let df: Vec<f64> = yc_rt.iter().map(|&v| (-v).exp()).collect();
                        let dt: Vec<f64> = nodes.windows(2).map(|w| w[1] - w[0]).collect();
                        Some(AccrualGrid {
                            nodes,
                            yc_rt,
                            df,
                            dt,
                            rate: period.accrual_fraction / (offset_acc_end - offset_acc_start),
                            start: offset_acc_start,
                        })
                    }
                } else {
                    None
                };
                PremiumPeriod {
                    accrual_fraction: period.accrual_fraction,
                    payment_df: yield_curve.discount_factor(period.payment_time),
                    observation_time: period.observation_time,
                    accrual,
                }
            })
            .collect();

        Ok(Self {
            spread: market_spread,
            notional: schedule.notional(),
            accrued_fraction: schedule.accrued_fraction(),
            valuation_df,
            lgd_df,
            formula: AccrualOnDefaultFormula::default(),
            protection_nodes,
            protection_yc_rt,
            protection_df,
            premium,
        })
    }

    /// Prepares a pricer for valuation at an explicit coupon, with no
    /// market spread attached.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CdsPricer::new`].
    pub fn for_valuation<Y>(
        schedule: &CdsSchedule,
        yield_curve: &Y,
        credit_knot_times: &[f64],
    ) -> CreditResult<Self>
    where
        Y: YieldCurve + ?Sized,
    {
        Self::new(schedule, yield_curve, credit_knot_times, 0.0)
    }

    /// Selects the accrual-on-default formula (default: original ISDA).
    #[must_use]
    pub fn with_formula(mut self, formula: AccrualOnDefaultFormula) -> Self {
        self.formula = formula;
        self
    }

    /// Returns the expected loss payout, discounted to cash settle.
    ///
    /// Integrates `lgd × df(s) × (-dQ(s))` over the protection window
    /// interval by interval; each interval is exact because both curves are
    /// log-linear between grid nodes.
    #[must_use]
    pub fn protection_leg(&self, credit_curve: &CreditCurve) -> f64 {
        let mut ht0 = credit_curve.rt(self.protection_nodes[0]);
        let mut rt0 = self.protection_yc_rt[0];
        let mut b0 = self.protection_df[0] * (-ht0).exp();

        let mut pv = 0.0;
        for i in 1..self.protection_nodes.len() {
            let ht1 = credit_curve.rt(self.protection_nodes[i]);
            let rt1 = self.protection_yc_rt[i];
            let b1 = self.protection_df[i] * (-ht1).exp();
            let dht = ht1 - ht0;
            let drt = rt1 - rt0;
            let dhrt = dht + drt;

            let d_pv = if dhrt.abs() < SERIES_CUTOFF {
                dht * b0 * epsilon(-dhrt)
            } else {
                (b0 - b1) * dht / dhrt
            };
            pv += d_pv;
            ht0 = ht1;
            rt0 = rt1;
            b0 = b1;
        }
        pv * self.lgd_df
    }

    /// Returns the premium leg PV per unit of coupon, scaled by notional.
    ///
    /// Sums the surviving coupon payments plus, when the contract pays
    /// accrual on default, each period's accrual-on-default integral.
    /// [`PriceType::Clean`] nets off the premium accrued at step-in.
    #[must_use]
    pub fn rpv01(&self, credit_curve: &CreditCurve, price_type: PriceType) -> f64 {
        let mut pv = 0.0;
        for period in &self.premium {
            let q = credit_curve.survival(period.observation_time);
            pv += period.accrual_fraction * period.payment_df * q;
        }

        for period in &self.premium {
            if let Some(accrual) = &period.accrual {
                pv += self.accrual_on_default(accrual, credit_curve);
            }
        }

        pv /= self.valuation_df;
        if price_type == PriceType::Clean {
            pv -= self.accrued_fraction;
        }
        pv * self.notional
    }

    /// Returns the PV of the contract at its market spread.
    ///
    /// This is the calibration objective: zero exactly when `credit_curve`
    /// reprices the instrument to its market spread.
    #[must_use]
    pub fn price(&self, credit_curve: &CreditCurve, price_type: PriceType) -> f64 {
        self.protection_leg(credit_curve) - self.spread * self.rpv01(credit_curve, price_type)
    }

    /// Returns the PV of the contract at an explicit running coupon.
    #[must_use]
    pub fn pv(&self, credit_curve: &CreditCurve, coupon: f64, price_type: PriceType) -> f64 {
        self.protection_leg(credit_curve) - coupon * self.rpv01(credit_curve, price_type)
    }

    /// Returns the spread at which the contract PVs to zero.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidCurve`] when the clean annuity is
    /// zero, as for an expired contract.
    pub fn par_spread(&self, credit_curve: &CreditCurve) -> CreditResult<f64> {
        let annuity = self.rpv01(credit_curve, PriceType::Clean);
        if annuity == 0.0 {
            return Err(CreditError::invalid_curve(
                "zero clean annuity: nothing left to pay premium on",
            ));
        }
        Ok(self.protection_leg(credit_curve) / annuity)
    }

    fn accrual_on_default(&self, accrual: &AccrualGrid, credit_curve: &CreditCurve) -> f64 {
        match self.formula {
            AccrualOnDefaultFormula::OriginalIsda => {
                Self::accrual_original_isda(accrual, credit_curve)
            }
            AccrualOnDefaultFormula::MarkitFix => Self::accrual_markit_fix(accrual, credit_curve),
        }
    }

    /// Accrual-on-default per the ISDA C reference: period time carries a
    /// half-day offset.
    fn accrual_original_isda(accrual: &AccrualGrid, credit_curve: &CreditCurve) -> f64 {
        let mut t = accrual.nodes[0];
        let mut ht0 = credit_curve.rt(t);
        let mut rt0 = accrual.yc_rt[0];
        let mut b0 = accrual.df[0] * (-ht0).exp();
        let mut t0 = t - accrual.start + HALF_DAY;

        let mut pv = 0.0;
        for k in 1..accrual.nodes.len() {
            t = accrual.nodes[k];
            let ht1 = credit_curve.rt(t);
            let rt1 = accrual.yc_rt[k];
            let b1 = accrual.df[k] * (-ht1).exp();
            let dt = accrual.dt[k - 1];

            let dht = ht1 - ht0;
            let drt = rt1 - rt0;
            // the tiny shift matches the ISDA C code
            let dhrt = dht + drt + 1e-50;

            let t1 = t - accrual.start + HALF_DAY;
            let t_pv = if dhrt.abs() < SERIES_CUTOFF {
                dht * b0 * (t0 * epsilon(-dhrt) + dt * epsilon_p(-dhrt))
            } else {
                dht / dhrt * (t0 * b0 - t1 * b1 + dt / dhrt * (b0 - b1))
            };
            t0 = t1;
            pv += t_pv;
            ht0 = ht1;
            rt0 = rt1;
            b0 = b1;
        }
        accrual.rate * pv
    }

    /// Accrual-on-default per the corrected Markit formula.
    fn accrual_markit_fix(accrual: &AccrualGrid, credit_curve: &CreditCurve) -> f64 {
        let mut ht0 = credit_curve.rt(accrual.nodes[0]);
        let mut rt0 = accrual.yc_rt[0];
        let mut b0 = accrual.df[0] * (-ht0).exp();

        let mut pv = 0.0;
        for k in 1..accrual.nodes.len() {
            let ht1 = credit_curve.rt(accrual.nodes[k]);
            let rt1 = accrual.yc_rt[k];
            let b1 = accrual.df[k] * (-ht1).exp();
            let dt = accrual.dt[k - 1];

            let dht = ht1 - ht0;
            let drt = rt1 - rt0;
            // the tiny shift matches the ISDA C code
            let dhrt = dht + drt + 1e-50;

            let t_pv = if dhrt.abs() < SERIES_CUTOFF {
                dht * dt * b0 * epsilon_p(-dhrt)
            } else {
                dht * dt / dhrt * ((b0 - b1) / dhrt - b1)
            };
            pv += t_pv;
            ht0 = ht1;
            rt0 = rt1;
            b0 = b1;
        }
        accrual.rate * pv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::DiscountCurve;
    use crate::schedule::CdsScheduleBuilder;
    use approx::assert_relative_eq;
    use hazard_core::types::Date;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn standard_schedule() -> CdsSchedule {
        CdsScheduleBuilder::new(date(2025, 3, 18), date(2030, 6, 20))
            .build()
            .unwrap()
    }

    #[test]
    fn test_protection_leg_matches_flat_closed_form() {
        // protection start is exactly the trade date, and discounting to
        // the trade date makes the valuation discount factor one
        let schedule = CdsScheduleBuilder::new(date(2025, 3, 18), date(2030, 6, 20))
            .cash_settle_date(date(2025, 3, 18))
            .build()
            .unwrap();
        let rate = 0.05;
        let hazard = 0.02;
        let yc = DiscountCurve::flat(rate).unwrap();
        let cc = CreditCurve::flat(hazard).unwrap();

        let pricer = CdsPricer::for_valuation(&schedule, &yc, cc.knot_times()).unwrap();
        let leg = pricer.protection_leg(&cc);

        let t_end = schedule.protection_end();
        let expected = schedule.lgd() * hazard / (hazard + rate)
            * (1.0 - (-(hazard + rate) * t_end).exp());
        assert_relative_eq!(leg, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_rpv01_clean_dirty_differ_by_accrued() {
        let schedule = standard_schedule();
        let yc = DiscountCurve::flat(0.02).unwrap();
        let cc = CreditCurve::flat(0.015).unwrap();
        let pricer = CdsPricer::for_valuation(&schedule, &yc, cc.knot_times()).unwrap();

        let clean = pricer.rpv01(&cc, PriceType::Clean);
        let dirty = pricer.rpv01(&cc, PriceType::Dirty);
        assert!(clean > 0.0);
        assert_relative_eq!(
            dirty - clean,
            schedule.accrued_fraction() * schedule.notional(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_accrual_formulas_are_close_but_distinct() {
        let schedule = standard_schedule();
        let yc = DiscountCurve::flat(0.02).unwrap();
        let cc = CreditCurve::flat(0.05).unwrap();

        let original = CdsPricer::for_valuation(&schedule, &yc, cc.knot_times()).unwrap();
        let fixed = CdsPricer::for_valuation(&schedule, &yc, cc.knot_times())
            .unwrap()
            .with_formula(AccrualOnDefaultFormula::MarkitFix);

        let a = original.rpv01(&cc, PriceType::Dirty);
        let b = fixed.rpv01(&cc, PriceType::Dirty);
        assert!(a != b, "half-day offset must show up in the annuity");
        assert_relative_eq!(a, b, max_relative = 1e-3);
    }

    #[test]
    fn test_accrual_on_default_matches_hand_computed_values() {
        // Hand-checkable single-period contract: trade Fri 2025-06-20,
        // maturity Fri 2025-09-19, accrual from the trade date, cash settled
        // on the trade date so the valuation discount factor is one. Curve
        // knots sit at t = 1, past maturity, so every integration grid is a
        // single interval. Times from the trade date: payment and
        // observation 91/365, accrual end 92/365 (unadjusted maturity plus
        // the protect-start day), accrual fraction 92/360.
        let base = CdsScheduleBuilder::new(date(2025, 6, 20), date(2025, 9, 19))
            .accrual_start_date(date(2025, 6, 20))
            .cash_settle_date(date(2025, 6, 20));
        let yc = DiscountCurve::flat(0.05).unwrap();
        let cc = CreditCurve::flat(0.10).unwrap();

        let schedule = base.clone().build().unwrap();
        let no_acc = base.pay_accrual_on_default(false).build().unwrap();
        assert_eq!(schedule.num_payments(), 1);

        let coupon_only = CdsPricer::for_valuation(&no_acc, &yc, cc.knot_times())
            .unwrap()
            .rpv01(&cc, PriceType::Dirty);
        let original = CdsPricer::for_valuation(&schedule, &yc, cc.knot_times())
            .unwrap()
            .rpv01(&cc, PriceType::Dirty);
        let markit = CdsPricer::for_valuation(&schedule, &yc, cc.knot_times())
            .unwrap()
            .with_formula(AccrualOnDefaultFormula::MarkitFix)
            .rpv01(&cc, PriceType::Dirty);

        // surviving coupon alone: (92/360) exp(-0.05*91/365) exp(-0.10*91/365)
        assert_relative_eq!(coupon_only, 0.246_174_975_178_959_62, max_relative = 1e-13);
        // the half-day-offset formula adds 3.1756e-3 of accrual on default
        assert_relative_eq!(original, 0.249_350_533_480_865_08, max_relative = 1e-13);
        // the Markit fix adds 3.0736e-3
        assert_relative_eq!(markit, 0.249_248_570_650_684_68, max_relative = 1e-13);
    }

    #[test]
    fn test_par_spread_near_credit_triangle() {
        // par spread ≈ hazard × (1 − recovery) for flat curves
        let schedule = standard_schedule();
        let yc = DiscountCurve::flat(0.02).unwrap();
        let hazard = 1.0 / 60.0;
        let cc = CreditCurve::flat(hazard).unwrap();
        let pricer = CdsPricer::for_valuation(&schedule, &yc, cc.knot_times()).unwrap();

        let par = pricer.par_spread(&cc).unwrap();
        assert_relative_eq!(par, hazard * 0.6, max_relative = 0.02);
    }

    #[test]
    fn test_price_equals_pv_at_market_spread() {
        let schedule = standard_schedule();
        let yc = DiscountCurve::flat(0.02).unwrap();
        let cc = CreditCurve::flat(0.01).unwrap();
        let spread = 0.0075;

        let pricer = CdsPricer::new(&schedule, &yc, cc.knot_times(), spread).unwrap();
        assert_relative_eq!(
            pricer.price(&cc, PriceType::Clean),
            pricer.pv(&cc, spread, PriceType::Clean),
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_protection_scales_with_lgd() {
        let yc = DiscountCurve::flat(0.02).unwrap();
        let cc = CreditCurve::flat(0.01).unwrap();
        let base = CdsScheduleBuilder::new(date(2025, 3, 18), date(2030, 6, 20));

        let low = base.clone().recovery_rate(0.40).build().unwrap();
        let high = base.recovery_rate(0.80).build().unwrap();
        let leg_low = CdsPricer::for_valuation(&low, &yc, cc.knot_times())
            .unwrap()
            .protection_leg(&cc);
        let leg_high = CdsPricer::for_valuation(&high, &yc, cc.knot_times())
            .unwrap()
            .protection_leg(&cc);

        assert_relative_eq!(leg_high / leg_low, 0.2 / 0.6, max_relative = 1e-12);
    }

    #[test]
    fn test_par_spread_is_notional_invariant() {
        let yc = DiscountCurve::flat(0.02).unwrap();
        let cc = CreditCurve::flat(0.012).unwrap();
        let base = CdsScheduleBuilder::new(date(2025, 3, 18), date(2030, 6, 20));

        let unit = base.clone().notional(1.0).build().unwrap();
        let block = base.notional(10_000_000.0).build().unwrap();
        let par_unit = CdsPricer::for_valuation(&unit, &yc, cc.knot_times())
            .unwrap()
            .par_spread(&cc)
            .unwrap();
        let par_block = CdsPricer::for_valuation(&block, &yc, cc.knot_times())
            .unwrap()
            .par_spread(&cc)
            .unwrap();

        assert_relative_eq!(par_unit, par_block, max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        let schedule = standard_schedule();
        let yc = DiscountCurve::flat(0.02).unwrap();

        let no_knots = CdsPricer::for_valuation(&schedule, &yc, &[]);
        assert!(matches!(no_knots, Err(CreditError::InvalidCurve { .. })));

        let bad_spread = CdsPricer::new(&schedule, &yc, &[5.0], f64::NAN);
        assert!(matches!(bad_spread, Err(CreditError::Validation { .. })));
    }

    #[test]
    fn test_no_accrual_on_default_lowers_annuity() {
        let yc = DiscountCurve::flat(0.02).unwrap();
        let cc = CreditCurve::flat(0.04).unwrap();
        let base = CdsScheduleBuilder::new(date(2025, 3, 18), date(2030, 6, 20));

        let with_acc = base.clone().build().unwrap();
        let without_acc = base.pay_accrual_on_default(false).build().unwrap();
        let rpv_with = CdsPricer::for_valuation(&with_acc, &yc, cc.knot_times())
            .unwrap()
            .rpv01(&cc, PriceType::Dirty);
        let rpv_without = CdsPricer::for_valuation(&without_acc, &yc, cc.knot_times())
            .unwrap()
            .rpv01(&cc, PriceType::Dirty);

        assert!(rpv_with > rpv_without);
    }
}
