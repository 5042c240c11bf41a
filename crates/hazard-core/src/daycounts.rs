//! Day count conventions.
//!
//! Day count conventions determine accrual fractions by specifying how to
//! count days between two dates and the year basis. Standard CDS contracts
//! accrue premium on ACT/360 and measure curve time on ACT/365 Fixed.
//!
//! # Usage
//!
//! ```rust
//! use hazard_core::daycounts::{Act360, DayCount};
//! use hazard_core::types::Date;
//!
//! let start = Date::from_ymd(2013, 3, 20).unwrap();
//! let end = Date::from_ymd(2013, 6, 20).unwrap();
//! let frac = Act360.year_fraction(start, end);
//! assert!((frac - 92.0 / 360.0).abs() < 1e-15);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DateError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction between two dates according
/// to a specific market convention. Implementations must be thread-safe.
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention (e.g., "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative when `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Actual/360 day count convention.
///
/// Actual calendar days over a 360-day year basis. The accrual convention
/// for standard CDS premium legs and money market instruments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed day count convention.
///
/// Actual calendar days over a fixed 365-day year basis. The curve time
/// convention of the ISDA CDS model: all times handed to the curves are
/// ACT/365F year fractions from the trade date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        start.days_between(&end) as f64 / 365.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// 30E/360 (Eurobond) day count convention.
///
/// Both day components are capped at 30; months count as 30 days over a
/// 360-day year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = start.day().min(30) as i64;
        let d2 = end.day().min(30) as i64;
        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (d2 - d1)
    }
}

/// Enumeration of the supported day count conventions.
///
/// A `Copy` runtime selector that implements [`DayCount`] by delegation,
/// so schedule builders can carry a convention by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360.
    Act360,
    /// Actual/365 Fixed.
    Act365Fixed,
    /// 30E/360 Eurobond.
    Thirty360E,
}

impl DayCount for DayCountConvention {
    fn name(&self) -> &'static str {
        match self {
            Self::Act360 => Act360.name(),
            Self::Act365Fixed => Act365Fixed.name(),
            Self::Thirty360E => Thirty360E.name(),
        }
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            Self::Act360 => Act360.year_fraction(start, end),
            Self::Act365Fixed => Act365Fixed.year_fraction(start, end),
            Self::Thirty360E => Thirty360E.year_fraction(start, end),
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            Self::Act360 => Act360.day_count(start, end),
            Self::Act365Fixed => Act365Fixed.day_count(start, end),
            Self::Thirty360E => Thirty360E.day_count(start, end),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACT/360" | "ACTUAL/360" => Ok(Self::Act360),
            "ACT/365F" | "ACT/365 FIXED" | "ACT/365" => Ok(Self::Act365Fixed),
            "30E/360" | "EUROBOND" => Ok(Self::Thirty360E),
            _ => Err(DateError::unknown_day_count(s)),
        }
    }
}
