//! The Hebrew lunisolar calendar.
//!
//! Months are numbered from Nissan (1) through Elul (6) and Tishrei (7)
//! through Adar (12), with Adar II (13) in leap years. The year number
//! changes at Tishrei.

pub mod date;
pub mod format;

pub use date::{HebrewMonth, JewishDate};
pub use format::{hebrew_number, Formatter, Script};
