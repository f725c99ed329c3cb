//! Display formatting for chart labels, headers and tooltips.
//!
//! Everything here is pure: no state, no I/O.

pub mod num;
pub mod time;

pub use num::{format_change, format_price, format_price_short};
pub use time::{format_timestamp, format_timestamp_in};
