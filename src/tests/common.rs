// src/tests/common.rs

//! Common helpers for test files: fixed timezone offsets and record lines.

use crate::data::datetime::FixedOffset;

use ::lazy_static::lazy_static;

lazy_static! {
    /// offset zero, equivalent to `Z`
    pub static ref FO_0: FixedOffset = FixedOffset::east_opt(0).unwrap();
    /// offset +04:00
    pub static ref FO_P4: FixedOffset = FixedOffset::east_opt(4 * 3600).unwrap();
    /// offset -04:00
    pub static ref FO_M4: FixedOffset = FixedOffset::west_opt(4 * 3600).unwrap();
    /// offset -04:30
    pub static ref FO_M430: FixedOffset = FixedOffset::west_opt(4 * 3600 + 30 * 60).unwrap();
}

/// a complete well-formed record line, level `fatal`, no extra arguments,
/// no error (same data as the last `--test` preset line)
pub const LINE_FATAL: &str = r#"{"file":"main.go","func":"configure()","line":"53","process":"example-service","msgTemplate":"test is over!","level":"fatal","time":"2019-03-27T15:36:54.481765984-04:00","msg":"test is over!"}"#;

/// a record line with extra arguments and an `error` field, the `error`
/// key declared *before* the `arg_` keys
pub const LINE_ERROR_AND_ARGS: &str = r#"{"file":"main.go","func":"configure()","line":"53","process":"example-service","msgTemplate":"weird","level":"error","error":"Another error message","time":"2019-03-27T15:36:53.481765984-04:00","msg":"weird","arg_name":"arg value"}"#;
