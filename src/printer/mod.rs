// src/printer/mod.rs

//! The `printer` module is for printing user-facing lines: formatted
//! [`LogRecord`]s with various text effects (color, bold, dim) and
//! passthrough lines byte-for-byte.
//!
//! [`LogRecord`]: crate::data::record::LogRecord

pub mod printers;
