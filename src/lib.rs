// src/lib.rs

//! _jlflib_ formats JSON log lines into human-readable, optionally
//! colorized, single lines of text.
//!
//! A line of input is either a _JSON log record_ — a JSON mapping carrying
//! the sentinel key [`KEY_SENTINEL`] — or it is not. Records are decoded,
//! their [RFC3339] `time` is parsed and rendered as a local time-of-day,
//! their `msg` is sanitized for safe single-line terminal printing, and the
//! whole is reassembled with colors. Everything else passes through
//! byte-for-byte. One bad line never stops the stream.
//!
//! The driver program _jlf_ is a thin wrapper; other programs may call
//! [`fmt_lines`] or [`fmt_to_stdout`] with their own source of lines.
//!
//! [`KEY_SENTINEL`]: crate::data::record::KEY_SENTINEL
//! [`fmt_lines`]: crate::printer::printers::fmt_lines
//! [`fmt_to_stdout`]: crate::printer::printers::fmt_to_stdout
//! [RFC3339]: https://tools.ietf.org/html/rfc3339#section-5.6

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
#[cfg(test)]
pub mod tests;
