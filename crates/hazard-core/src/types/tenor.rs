//! Tenor type for maturity offsets and payment intervals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DateError, DateResult};
use crate::types::Date;

/// A month-based tenor such as `6M` or `5Y`.
///
/// Tenors describe CDS maturity offsets and premium payment intervals.
/// Standard contracts only ever use whole-month periods, so the
/// representation is a month count.
///
/// # Example
///
/// ```rust
/// use hazard_core::types::{Date, Tenor};
///
/// let five_years: Tenor = "5Y".parse().unwrap();
/// assert_eq!(five_years.num_months(), 60);
///
/// let start = Date::from_ymd(2013, 3, 20).unwrap();
/// let end = five_years.add_to(start).unwrap();
/// assert_eq!(end, Date::from_ymd(2018, 3, 20).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tenor {
    months: u32,
}

impl Tenor {
    /// Creates a tenor of the given number of months.
    #[must_use]
    pub fn months(n: u32) -> Self {
        Self { months: n }
    }

    /// Creates a tenor of the given number of years.
    #[must_use]
    pub fn years(n: u32) -> Self {
        Self { months: n * 12 }
    }

    /// Returns the tenor length in months.
    #[must_use]
    pub fn num_months(&self) -> u32 {
        self.months
    }

    /// Adds the tenor to a date.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` if the result is out of range.
    pub fn add_to(&self, date: Date) -> DateResult<Date> {
        date.add_months(self.months as i32)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months > 0 && self.months % 12 == 0 {
            write!(f, "{}Y", self.months / 12)
        } else {
            write!(f, "{}M", self.months)
        }
    }
}

impl FromStr for Tenor {
    type Err = DateError;

    /// Parses tenor strings like `"3M"`, `"6m"`, `"5Y"`, `"10y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Byte-offset splits panic when the last char is multi-byte.
        let mut chars = s.trim().chars();
        let unit = chars.next_back().ok_or_else(|| DateError::invalid_tenor(s))?;
        let count: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| DateError::invalid_tenor(s))?;
        if count == 0 {
            return Err(DateError::invalid_tenor(s));
        }
        match unit {
            'M' | 'm' => Ok(Tenor::months(count)),
            'Y' | 'y' => Ok(Tenor::years(count)),
            _ => Err(DateError::invalid_tenor(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Tenor::months(6).num_months(), 6);
        assert_eq!(Tenor::years(5).num_months(), 60);
    }

    #[test]
    fn test_parse() {
        assert_eq!("3M".parse::<Tenor>().unwrap(), Tenor::months(3));
        assert_eq!("6m".parse::<Tenor>().unwrap(), Tenor::months(6));
        assert_eq!("5Y".parse::<Tenor>().unwrap(), Tenor::years(5));
        assert_eq!("10y".parse::<Tenor>().unwrap(), Tenor::years(10));
        assert_eq!("18M".parse::<Tenor>().unwrap(), Tenor::months(18));

        assert!("".parse::<Tenor>().is_err());
        assert!("M".parse::<Tenor>().is_err());
        assert!("0Y".parse::<Tenor>().is_err());
        assert!("5Q".parse::<Tenor>().is_err());
        assert!("-3M".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_parse_multibyte_input_is_rejected() {
        // Unit or digits ending in a multi-byte char must error, not panic.
        assert!("5年".parse::<Tenor>().is_err());
        assert!("½Y".parse::<Tenor>().is_err());
        assert!("年".parse::<Tenor>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tenor::months(3).to_string(), "3M");
        assert_eq!(Tenor::months(18).to_string(), "18M");
        assert_eq!(Tenor::years(5).to_string(), "5Y");
        assert_eq!(Tenor::months(12).to_string(), "1Y");
    }

    #[test]
    fn test_add_to_date() {
        let start = Date::from_ymd(2013, 3, 20).unwrap();
        assert_eq!(
            Tenor::months(6).add_to(start).unwrap(),
            Date::from_ymd(2013, 9, 20).unwrap()
        );
        assert_eq!(
            Tenor::years(10).add_to(start).unwrap(),
            Date::from_ymd(2023, 3, 20).unwrap()
        );
    }

    #[test]
    fn test_ordering() {
        assert!(Tenor::months(6) < Tenor::years(1));
        assert!(Tenor::years(5) < Tenor::years(10));
    }
}
