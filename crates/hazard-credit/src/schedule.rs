//! CDS contract schedules: premium periods, protection window, accrued.
//!
//! A [`CdsSchedule`] resolves one contract's date logic into the curve-time
//! quantities the pricer works with: accrual periods with ACT/360 fractions
//! and payment/observation times, the protection window, step-in and
//! cash-settle times, and the premium accrued at step-in. All times are
//! ACT/365F year fractions from the trade date.

use std::fmt;
use std::sync::Arc;

use hazard_core::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
use hazard_core::daycounts::{DayCount, DayCountConvention};
use hazard_core::imm::prev_imm_date;
use hazard_core::types::{Date, Tenor};
use serde::{Deserialize, Serialize};

use crate::error::{CreditError, CreditResult};

/// One calendar day under the ACT/365F curve time convention.
pub const CURVE_ONE_DAY: f64 = 1.0 / 365.0;

/// Placement of the irregular period when the payment interval does not
/// divide the contract term evenly.
///
/// Standard CDS contracts roll backward from maturity with a short front
/// stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StubConvention {
    /// A short first period absorbs the remainder.
    #[default]
    FrontShort,
    /// The remainder merges into a long first period.
    FrontLong,
}

/// One premium accrual period, resolved to curve times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualPeriod {
    /// Accrual start time; negative when the period began before the
    /// trade date.
    pub accrual_start: f64,
    /// Accrual end time.
    pub accrual_end: f64,
    /// Coupon fraction accruing over the period, in the accrual day count.
    pub accrual_fraction: f64,
    /// Discounting time of the premium payment.
    pub payment_time: f64,
    /// Survival observation time for the premium payment.
    pub observation_time: f64,
}

/// A CDS contract resolved to the curve-time quantities used in pricing.
///
/// Immutable once built; construct through [`CdsScheduleBuilder`].
#[derive(Debug, Clone)]
pub struct CdsSchedule {
    periods: Vec<AccrualPeriod>,
    step_in_time: f64,
    valuation_time: f64,
    protection_start: f64,
    protection_end: f64,
    pay_accrual_on_default: bool,
    protection_from_start_of_day: bool,
    accrued_fraction: f64,
    accrued_days: i64,
    notional: f64,
    recovery_rate: f64,
    lgd: f64,
}

impl CdsSchedule {
    /// Returns the premium accrual periods remaining after step-in.
    #[must_use]
    pub fn periods(&self) -> &[AccrualPeriod] {
        &self.periods
    }

    /// Returns the number of remaining premium payments.
    #[must_use]
    pub fn num_payments(&self) -> usize {
        self.periods.len()
    }

    /// Returns the step-in (effective protection) time.
    #[must_use]
    pub fn step_in_time(&self) -> f64 {
        self.step_in_time
    }

    /// Returns the cash-settle time PVs are discounted to.
    #[must_use]
    pub fn valuation_time(&self) -> f64 {
        self.valuation_time
    }

    /// Returns the start of the protection window.
    #[must_use]
    pub fn protection_start(&self) -> f64 {
        self.protection_start
    }

    /// Returns the end of the protection window.
    #[must_use]
    pub fn protection_end(&self) -> f64 {
        self.protection_end
    }

    /// Returns whether premium accrued to default is paid on a credit event.
    #[must_use]
    pub fn pay_accrual_on_default(&self) -> bool {
        self.pay_accrual_on_default
    }

    /// Returns whether protection covers the full first and last days.
    #[must_use]
    pub fn protection_from_start_of_day(&self) -> bool {
        self.protection_from_start_of_day
    }

    /// Returns the contract notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the assumed recovery rate.
    #[must_use]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Returns the loss given default, `notional × (1 − recovery)`.
    #[must_use]
    pub fn lgd(&self) -> f64 {
        self.lgd
    }

    /// Returns the accrual days elapsed at step-in within the current period.
    #[must_use]
    pub fn accrued_days(&self) -> i64 {
        self.accrued_days
    }

    /// Returns the coupon fraction accrued at step-in, per unit coupon.
    #[must_use]
    pub fn accrued_fraction(&self) -> f64 {
        self.accrued_fraction
    }

    /// Returns the premium amount accrued at step-in for a running coupon.
    #[must_use]
    pub fn accrued_premium(&self, coupon: f64) -> f64 {
        self.accrued_fraction * coupon * self.notional
    }
}

/// Builder for [`CdsSchedule`] from trade static data.
///
/// Defaults follow the standard contract: step-in the calendar day after
/// trade, cash settlement three business days after trade, accrual from the
/// business-day adjusted prior IMM roll, quarterly payments with a short
/// front stub, accrual paid on default, protection from start of day, 40%
/// recovery, unit notional, weekend calendar with the Following convention,
/// ACT/360 accrual and ACT/365F curve times.
///
/// # Example
///
/// ```
/// use hazard_core::types::Date;
/// use hazard_credit::CdsScheduleBuilder;
///
/// let trade = Date::from_ymd(2025, 3, 18)?;
/// let maturity = Date::from_ymd(2030, 6, 20)?;
/// let schedule = CdsScheduleBuilder::new(trade, maturity)
///     .notional(10_000_000.0)
///     .recovery_rate(0.40)
///     .build()?;
/// assert!(schedule.protection_end() > 5.0);
/// # Ok::<(), hazard_credit::CreditError>(())
/// ```
#[derive(Clone)]
pub struct CdsScheduleBuilder {
    trade_date: Date,
    maturity: Date,
    step_in_date: Option<Date>,
    cash_settle_date: Option<Date>,
    accrual_start_date: Option<Date>,
    payment_interval: Tenor,
    stub: StubConvention,
    pay_accrual_on_default: bool,
    protection_from_start_of_day: bool,
    recovery_rate: f64,
    notional: f64,
    convention: BusinessDayConvention,
    calendar: Arc<dyn Calendar>,
    accrual_day_count: DayCountConvention,
    curve_day_count: DayCountConvention,
}

impl CdsScheduleBuilder {
    /// Creates a builder for a contract traded on `trade_date` protecting
    /// to `maturity`.
    #[must_use]
    pub fn new(trade_date: Date, maturity: Date) -> Self {
        Self {
            trade_date,
            maturity,
            step_in_date: None,
            cash_settle_date: None,
            accrual_start_date: None,
            payment_interval: Tenor::months(3),
            stub: StubConvention::default(),
            pay_accrual_on_default: true,
            protection_from_start_of_day: true,
            recovery_rate: 0.40,
            notional: 1.0,
            convention: BusinessDayConvention::Following,
            calendar: Arc::new(WeekendCalendar),
            accrual_day_count: DayCountConvention::Act360,
            curve_day_count: DayCountConvention::Act365Fixed,
        }
    }

    /// Sets the step-in date (default: trade date + 1 calendar day).
    #[must_use]
    pub fn step_in_date(mut self, date: Date) -> Self {
        self.step_in_date = Some(date);
        self
    }

    /// Sets the cash-settle date (default: trade date + 3 business days).
    #[must_use]
    pub fn cash_settle_date(mut self, date: Date) -> Self {
        self.cash_settle_date = Some(date);
        self
    }

    /// Sets the accrual start date (default: adjusted prior IMM roll).
    #[must_use]
    pub fn accrual_start_date(mut self, date: Date) -> Self {
        self.accrual_start_date = Some(date);
        self
    }

    /// Sets the premium payment interval (default: 3M).
    #[must_use]
    pub fn payment_interval(mut self, interval: Tenor) -> Self {
        self.payment_interval = interval;
        self
    }

    /// Sets the stub convention (default: front short).
    #[must_use]
    pub fn stub(mut self, stub: StubConvention) -> Self {
        self.stub = stub;
        self
    }

    /// Sets whether accrued premium is paid on default (default: true).
    #[must_use]
    pub fn pay_accrual_on_default(mut self, pay: bool) -> Self {
        self.pay_accrual_on_default = pay;
        self
    }

    /// Sets whether protection runs from the start of day (default: true).
    #[must_use]
    pub fn protection_from_start_of_day(mut self, protect: bool) -> Self {
        self.protection_from_start_of_day = protect;
        self
    }

    /// Sets the assumed recovery rate (default: 0.40).
    #[must_use]
    pub fn recovery_rate(mut self, recovery: f64) -> Self {
        self.recovery_rate = recovery;
        self
    }

    /// Sets the contract notional (default: 1.0).
    #[must_use]
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the business day convention (default: Following).
    #[must_use]
    pub fn business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the holiday calendar (default: weekends only).
    #[must_use]
    pub fn calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the accrual day count (default: ACT/360).
    #[must_use]
    pub fn accrual_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.accrual_day_count = day_count;
        self
    }

    /// Sets the curve time day count (default: ACT/365F).
    #[must_use]
    pub fn curve_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.curve_day_count = day_count;
        self
    }

    /// Resolves the contract dates into a [`CdsSchedule`].
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::Validation`] for recovery outside `[0, 1)` or
    /// a non-positive notional, and [`CreditError::InvalidSchedule`] for
    /// non-chronological dates, a zero payment interval, or a zero-length
    /// protection window.
    pub fn build(&self) -> CreditResult<CdsSchedule> {
        if !(0.0..1.0).contains(&self.recovery_rate) {
            return Err(CreditError::validation(format!(
                "recovery rate must be in [0, 1), got {}",
                self.recovery_rate
            )));
        }
        if !self.notional.is_finite() || self.notional <= 0.0 {
            return Err(CreditError::validation(format!(
                "notional must be positive and finite, got {}",
                self.notional
            )));
        }
        if self.payment_interval.num_months() == 0 {
            return Err(CreditError::invalid_schedule(
                "payment interval must be at least one month",
            ));
        }

        let trade = self.trade_date;
        let step_in = self.step_in_date.unwrap_or_else(|| trade.add_days(1));
        let cash_settle = self
            .cash_settle_date
            .unwrap_or_else(|| self.calendar.add_business_days(trade, 3));
        let accrual_start = match self.accrual_start_date {
            Some(date) => date,
            None => self
                .calendar
                .adjust(prev_imm_date(trade), self.convention),
        };

        if step_in < trade {
            return Err(CreditError::invalid_schedule(format!(
                "step-in date {step_in} before trade date {trade}"
            )));
        }
        if cash_settle < trade {
            return Err(CreditError::invalid_schedule(format!(
                "cash-settle date {cash_settle} before trade date {trade}"
            )));
        }
        if self.maturity <= accrual_start {
            return Err(CreditError::invalid_schedule(format!(
                "maturity {} on or before accrual start {accrual_start}",
                self.maturity
            )));
        }

        let curve_dc = self.curve_day_count;
        let accrual_dc = self.accrual_day_count;

        // Protection window. Protection from start of day moves the
        // effective start one day earlier.
        let mut effective_start = step_in.max(accrual_start);
        if self.protection_from_start_of_day {
            effective_start = effective_start.add_days(-1);
        }
        let protection_start = curve_dc.year_fraction(trade, effective_start);
        let protection_end = curve_dc.year_fraction(trade, self.maturity);
        if protection_start >= protection_end {
            return Err(CreditError::invalid_schedule(
                "protection window is empty: start at or after end",
            ));
        }

        let rolls = self.unadjusted_roll_dates(accrual_start)?;
        let num_full = rolls.len() - 1;

        // Resolve each period, dropping those wholly before step-in. The
        // final accrual end stays on the unadjusted maturity and gains one
        // day when protection runs from the start of day.
        let mut periods = Vec::with_capacity(num_full);
        let mut first_kept_start: Option<Date> = None;
        for i in 0..num_full {
            let acc_start = self.calendar.adjust(rolls[i], self.convention);
            let pay_date = self.calendar.adjust(rolls[i + 1], self.convention);
            let acc_end = if i == num_full - 1 {
                if self.protection_from_start_of_day {
                    self.maturity.add_days(1)
                } else {
                    self.maturity
                }
            } else {
                pay_date
            };
            if acc_end <= step_in {
                continue;
            }
            if first_kept_start.is_none() {
                first_kept_start = Some(acc_start);
            }
            let obs_date = if self.protection_from_start_of_day {
                acc_end.add_days(-1)
            } else {
                acc_end
            };
            periods.push(AccrualPeriod {
                accrual_start: curve_dc.year_fraction(trade, acc_start),
                accrual_end: curve_dc.year_fraction(trade, acc_end),
                accrual_fraction: accrual_dc.year_fraction(acc_start, acc_end),
                payment_time: curve_dc.year_fraction(trade, pay_date),
                observation_time: curve_dc.year_fraction(trade, obs_date),
            });
        }

        let (accrued_fraction, accrued_days) = match first_kept_start {
            Some(start) if start < step_in => (
                accrual_dc.year_fraction(start, step_in),
                start.days_between(&step_in),
            ),
            _ => (0.0, 0),
        };

        Ok(CdsSchedule {
            periods,
            step_in_time: curve_dc.year_fraction(trade, step_in),
            valuation_time: curve_dc.year_fraction(trade, cash_settle),
            protection_start,
            protection_end,
            pay_accrual_on_default: self.pay_accrual_on_default,
            protection_from_start_of_day: self.protection_from_start_of_day,
            accrued_fraction,
            accrued_days,
            notional: self.notional,
            recovery_rate: self.recovery_rate,
            lgd: self.notional * (1.0 - self.recovery_rate),
        })
    }

    /// Rolls unadjusted period boundaries backward from maturity.
    ///
    /// Each boundary is anchored as `maturity − k × interval` rather than
    /// stepped iteratively, so month-end clamping cannot drift.
    fn unadjusted_roll_dates(&self, accrual_start: Date) -> CreditResult<Vec<Date>> {
        let step = i32::try_from(self.payment_interval.num_months()).map_err(|_| {
            CreditError::invalid_schedule("payment interval too large")
        })?;

        let mut dates = Vec::new();
        let mut k = 0;
        let mut date = self.maturity;
        while date > accrual_start {
            dates.push(date);
            k += 1;
            date = self.maturity.add_months(-k * step)?;
        }

        // A long front stub merges the partial period into the earliest
        // regular one; with no regular period left the stub stands alone.
        if self.stub == StubConvention::FrontLong && date < accrual_start && dates.len() > 1 {
            dates.pop();
        }
        dates.push(accrual_start);
        dates.reverse();
        Ok(dates)
    }
}

impl fmt::Debug for CdsScheduleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdsScheduleBuilder")
            .field("trade_date", &self.trade_date)
            .field("maturity", &self.maturity)
            .field("payment_interval", &self.payment_interval)
            .field("stub", &self.stub)
            .field("recovery_rate", &self.recovery_rate)
            .field("notional", &self.notional)
            .field("calendar", &self.calendar.name())
            .finish_non_exhaustive()
    }
}
