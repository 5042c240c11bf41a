//! # Hazard Credit
//!
//! Credit default swap valuation and credit-curve calibration in the ISDA
//! standard model.
//!
//! This crate provides:
//!
//! - **Schedules**: [`schedule::CdsScheduleBuilder`] turns contract dates
//!   and conventions into the premium periods and year fractions the
//!   pricer consumes
//! - **Curves**: piecewise-constant hazard-rate ([`curve::CreditCurve`])
//!   and zero-rate ([`discount::DiscountCurve`]) term structures with the
//!   ISDA log-linear discount interpolation
//! - **Pricing**: [`pricer::CdsPricer`] computes protection legs, risky
//!   annuities, upfront values and par spreads with closed-form piecewise
//!   integrals
//! - **Calibration**: [`bootstrap::CreditCurveBootstrapper`] solves one
//!   hazard-rate knot per market quote, shortest maturity first
//!
//! ## Example
//!
//! ```rust
//! use hazard_core::Date;
//! use hazard_credit::prelude::*;
//!
//! # fn main() -> Result<(), hazard_credit::CreditError> {
//! let trade_date = Date::from_ymd(2025, 3, 18)?;
//! let discount = DiscountCurve::flat(0.02)?;
//!
//! // Quoted par spreads for the 1Y/3Y/5Y pillars.
//! let maturities = [
//!     Date::from_ymd(2026, 6, 20)?,
//!     Date::from_ymd(2028, 6, 20)?,
//!     Date::from_ymd(2030, 6, 20)?,
//! ];
//! let spreads = [0.0060, 0.0090, 0.0125];
//!
//! let curve = CreditCurveBootstrapper::new()
//!     .calibrate_from_dates(trade_date, &maturities, &spreads, 0.40, &discount)?;
//!
//! // The calibrated curve reprices the 5Y quote.
//! let schedule = CdsScheduleBuilder::new(trade_date, maturities[2]).build()?;
//! let pricer = CdsPricer::new(&schedule, &discount, curve.knot_times(), spreads[2])?;
//! assert!(pricer.price(&curve, PriceType::Clean).abs() < 1e-8);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod bootstrap;
pub mod curve;
pub mod discount;
pub mod error;
pub mod grid;
pub mod pricer;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapConfig, CreditCurveBootstrapper};
    pub use crate::curve::CreditCurve;
    pub use crate::discount::{DiscountCurve, YieldCurve};
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::pricer::{AccrualOnDefaultFormula, CdsPricer, PriceType};
    pub use crate::schedule::{AccrualPeriod, CdsSchedule, CdsScheduleBuilder, StubConvention};
}

// Re-export commonly used types at crate root
pub use bootstrap::CreditCurveBootstrapper;
pub use curve::CreditCurve;
pub use discount::{DiscountCurve, YieldCurve};
pub use error::{CreditError, CreditResult};
pub use pricer::{CdsPricer, PriceType};
pub use schedule::{CdsSchedule, CdsScheduleBuilder};
