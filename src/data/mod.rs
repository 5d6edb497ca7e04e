// src/data/mod.rs

//! The `data` module is the per-line data handling: decoding raw lines
//! into [`LogRecord`]s, parsing RFC3339 datetimes, and sanitizing message
//! content for terminal output.
//!
//! All of it is pure: a function of one line, no I/O, no cross-line state.
//!
//! [`LogRecord`]: crate::data::record::LogRecord

pub mod datetime;
pub mod record;
pub mod sanitize;
