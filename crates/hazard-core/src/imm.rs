//! IMM date logic for standard CDS contracts.
//!
//! Standard CDS contracts roll on IMM dates: the 20th of March, June,
//! September and December. Maturity pillars are generated by rolling the
//! step-in date to the next IMM date and adding each quoted tenor.

use crate::error::{DateError, DateResult};
use crate::types::{Date, Tenor};

/// Day of month of every IMM date.
const IMM_DAY: u32 = 20;

/// Checks whether a date is an IMM date (20th of Mar/Jun/Sep/Dec).
#[must_use]
pub fn is_imm_date(date: Date) -> bool {
    date.day() == IMM_DAY && date.month() % 3 == 0
}

/// Returns the next IMM date strictly after the given date.
///
/// If `date` is itself an IMM date the result is the IMM date three
/// months on, not `date`.
#[must_use]
pub fn next_imm_date(date: Date) -> Date {
    let year = date.year();
    let month = date.month();
    let day = date.day();

    if is_imm_date(date) {
        if month != 12 {
            imm_date(year, month + 3)
        } else {
            imm_date(year + 1, 3)
        }
    } else if month % 3 == 0 {
        // IMM month, off the 20th
        if day < IMM_DAY {
            imm_date(year, month)
        } else if month != 12 {
            imm_date(year, month + 3)
        } else {
            imm_date(year + 1, 3)
        }
    } else {
        // First IMM month after a non-IMM month
        imm_date(year, month + (3 - month % 3))
    }
}

/// Returns the previous IMM date strictly before the given date.
///
/// If `date` is itself an IMM date the result is the IMM date three
/// months earlier, not `date`.
#[must_use]
pub fn prev_imm_date(date: Date) -> Date {
    let year = date.year();
    let month = date.month();
    let day = date.day();

    if is_imm_date(date) {
        if month != 3 {
            imm_date(year, month - 3)
        } else {
            imm_date(year - 1, 12)
        }
    } else if month % 3 == 0 {
        // IMM month, off the 20th
        if day > IMM_DAY {
            imm_date(year, month)
        } else if month != 3 {
            imm_date(year, month - 3)
        } else {
            imm_date(year - 1, 12)
        }
    } else {
        // Last IMM month before a non-IMM month
        let m = month - month % 3;
        if m == 0 {
            imm_date(year - 1, 12)
        } else {
            imm_date(year, m)
        }
    }
}

/// Generates one pillar maturity per tenor.
///
/// The step-in date (normally trade date plus one day) is first rolled
/// forward with [`next_imm_date`], even when it already is an IMM date,
/// and each tenor is added to that anchor.
///
/// # Errors
///
/// Returns `DateError::InvalidDate` if a tenor addition leaves the
/// supported date range.
pub fn imm_date_set(stepin: Date, tenors: &[Tenor]) -> DateResult<Vec<Date>> {
    let anchor = next_imm_date(stepin);
    tenors.iter().map(|tenor| tenor.add_to(anchor)).collect()
}

/// Generates `count` consecutive IMM dates starting at `start`.
///
/// # Errors
///
/// Returns `DateError::InvalidDate` if `start` is not an IMM date.
pub fn imm_date_sequence(start: Date, count: usize) -> DateResult<Vec<Date>> {
    if !is_imm_date(start) {
        return Err(DateError::invalid_date(format!(
            "{start} is not an IMM date"
        )));
    }
    let mut dates = Vec::with_capacity(count);
    if count == 0 {
        return Ok(dates);
    }
    dates.push(start);
    for i in 1..count {
        let prev = dates[i - 1];
        let next = if prev.month() != 12 {
            imm_date(prev.year(), prev.month() + 3)
        } else {
            imm_date(prev.year() + 1, 3)
        };
        dates.push(next);
    }
    Ok(dates)
}

/// Builds the IMM date in the given year and month.
fn imm_date(year: i32, month: u32) -> Date {
    Date::from_ymd(year, month, IMM_DAY).expect("the 20th exists in every month")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> Date {
        Date::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn test_is_imm_date() {
        assert!(is_imm_date(date(2013, 3, 20)));
        assert!(is_imm_date(date(2013, 6, 20)));
        assert!(is_imm_date(date(2013, 9, 20)));
        assert!(is_imm_date(date(2013, 12, 20)));

        assert!(!is_imm_date(date(2013, 3, 21)));
        assert!(!is_imm_date(date(2013, 4, 20)));
        assert!(!is_imm_date(date(2013, 1, 20)));
    }

    #[test]
    fn test_next_from_non_imm_month() {
        assert_eq!(next_imm_date(date(2013, 1, 5)), date(2013, 3, 20));
        assert_eq!(next_imm_date(date(2013, 4, 25)), date(2013, 6, 20));
        assert_eq!(next_imm_date(date(2013, 8, 1)), date(2013, 9, 20));
        assert_eq!(next_imm_date(date(2013, 11, 30)), date(2013, 12, 20));
    }

    #[test]
    fn test_next_within_imm_month() {
        // Before the 20th: same month
        assert_eq!(next_imm_date(date(2013, 6, 19)), date(2013, 6, 20));
        // After the 20th: next IMM month
        assert_eq!(next_imm_date(date(2013, 6, 21)), date(2013, 9, 20));
        // December past the 20th wraps the year
        assert_eq!(next_imm_date(date(2013, 12, 21)), date(2014, 3, 20));
    }

    #[test]
    fn test_next_is_strict_on_imm_dates() {
        // An IMM date rolls to the following one, not itself
        assert_eq!(next_imm_date(date(2013, 9, 20)), date(2013, 12, 20));
        assert_eq!(next_imm_date(date(2013, 12, 20)), date(2014, 3, 20));
    }

    #[test]
    fn test_prev_from_non_imm_month() {
        assert_eq!(prev_imm_date(date(2013, 5, 10)), date(2013, 3, 20));
        assert_eq!(prev_imm_date(date(2013, 7, 1)), date(2013, 6, 20));
        assert_eq!(prev_imm_date(date(2013, 10, 31)), date(2013, 9, 20));
        // January and February wrap to the prior December
        assert_eq!(prev_imm_date(date(2013, 2, 1)), date(2012, 12, 20));
    }

    #[test]
    fn test_prev_within_imm_month() {
        assert_eq!(prev_imm_date(date(2013, 6, 21)), date(2013, 6, 20));
        assert_eq!(prev_imm_date(date(2013, 6, 19)), date(2013, 3, 20));
        // March on or before the 20th wraps the year
        assert_eq!(prev_imm_date(date(2013, 3, 20)), date(2012, 12, 20));
        assert_eq!(prev_imm_date(date(2013, 3, 1)), date(2012, 12, 20));
    }

    #[test]
    fn test_next_prev_round_trip() {
        for day in [1, 10, 19, 20, 21, 28] {
            for month in 1..=12 {
                let d = date(2013, month, day);
                let next = next_imm_date(d);
                assert!(is_imm_date(next));
                assert!(next > d);
                // prev of next is at or before d
                assert!(prev_imm_date(next) <= d);
                // next is exactly one IMM step after its predecessor
                assert_eq!(next_imm_date(prev_imm_date(next)), next);
            }
        }
    }

    #[test]
    fn test_next_of_next_is_three_months_on() {
        let d = date(2013, 5, 7);
        let first = next_imm_date(d);
        let second = next_imm_date(first);
        assert_eq!(first.add_months(3).unwrap(), second);
    }

    #[test]
    fn test_imm_date_set_rolls_even_from_imm_stepin() {
        let tenors: Vec<Tenor> = ["6M", "1Y", "5Y"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        // Step-in on an IMM date still anchors at the NEXT IMM date
        let pillars = imm_date_set(date(2013, 3, 20), &tenors).unwrap();
        assert_eq!(pillars[0], date(2013, 12, 20));
        assert_eq!(pillars[1], date(2014, 6, 20));
        assert_eq!(pillars[2], date(2018, 6, 20));
        for p in &pillars {
            assert!(is_imm_date(*p));
        }
    }

    #[test]
    fn test_imm_date_set_plain_stepin() {
        let tenors: Vec<Tenor> = ["1Y", "3Y"].iter().map(|s| s.parse().unwrap()).collect();

        let pillars = imm_date_set(date(2011, 6, 14), &tenors).unwrap();
        assert_eq!(pillars[0], date(2012, 6, 20));
        assert_eq!(pillars[1], date(2014, 6, 20));
    }

    #[test]
    fn test_imm_date_sequence() {
        let seq = imm_date_sequence(date(2013, 9, 20), 5).unwrap();
        assert_eq!(
            seq,
            vec![
                date(2013, 9, 20),
                date(2013, 12, 20),
                date(2014, 3, 20),
                date(2014, 6, 20),
                date(2014, 9, 20),
            ]
        );
    }

    #[test]
    fn test_imm_date_sequence_rejects_non_imm_start() {
        assert!(imm_date_sequence(date(2013, 9, 19), 3).is_err());
        assert_eq!(imm_date_sequence(date(2013, 9, 20), 0).unwrap(), vec![]);
    }
}
