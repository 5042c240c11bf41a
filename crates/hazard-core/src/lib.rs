//! # Hazard Core
//!
//! Core types and conventions for the Hazard credit analytics library.
//!
//! This crate provides the foundational building blocks used throughout
//! Hazard:
//!
//! - **Types**: [`types::Date`] and [`types::Tenor`]
//! - **IMM Dates**: roll-date arithmetic for standard CDS contracts
//! - **Day Count Conventions**: ACT/360, ACT/365F, 30E/360
//! - **Calendars**: business day calendars and adjustment conventions
//!
//! ## Example
//!
//! ```rust
//! use hazard_core::prelude::*;
//!
//! let trade_date = Date::from_ymd(2011, 6, 13).unwrap();
//! let stepin = trade_date.add_days(1);
//!
//! // Standard contracts mature on IMM dates
//! let pillars = imm::imm_date_set(stepin, &[Tenor::years(5)]).unwrap();
//! assert!(imm::is_imm_date(pillars[0]));
//!
//! // Premium accrues on ACT/360
//! let frac = Act360.year_fraction(trade_date, pillars[0]);
//! assert!(frac > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::doc_markdown)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod imm;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
    pub use crate::daycounts::{Act360, Act365Fixed, DayCount, DayCountConvention, Thirty360E};
    pub use crate::error::{DateError, DateResult};
    pub use crate::imm;
    pub use crate::types::{Date, Tenor};
}

// Re-export commonly used types at crate root
pub use error::{DateError, DateResult};
pub use types::{Date, Tenor};
