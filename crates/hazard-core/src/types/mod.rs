//! Domain types for credit analytics.

mod date;
mod tenor;

pub use date::Date;
pub use tenor::Tenor;
