// src/tests/printers_tests.rs

//! tests for `printers.rs` functions
//!
//! [`fmt_lines`] is driven end-to-end with a [`termcolor::Buffer`] sink;
//! `Buffer::no_color()` pins exact uncolored output, `Buffer::ansi()`
//! checks colored output without pinning exact escape bytes.

#![allow(non_snake_case)]

use crate::data::datetime::FixedOffset;
use crate::printer::printers::fmt_lines;
use crate::tests::common::{
    FO_M4,
    LINE_ERROR_AND_ARGS,
    LINE_FATAL,
};

use ::termcolor::Buffer;
use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// helper; format `lines` with no color, offset -04:00, and return the
/// output as a `String`
fn fmt_no_color(
    lines: &[&[u8]],
    quiet: bool,
) -> String {
    let mut buffer = Buffer::no_color();
    let tz: FixedOffset = *FO_M4;
    fmt_lines(lines.iter(), &mut buffer, quiet, tz).unwrap();

    String::from_utf8(buffer.as_slice().to_vec()).unwrap()
}

/// the exact uncolored default-mode line for a record with no extra
/// arguments and no error
#[test]
fn test_fmt_lines_fatal_record_exact() {
    assert_eq!(
        "15:36:54.481765: fatal: example-service: main.go:53 configure(): test is over!\n",
        fmt_no_color(&[LINE_FATAL.as_bytes()], false),
    );
}

/// quiet mode never shows `process`, `file`, `line`, `func`
#[test]
fn test_fmt_lines_fatal_record_quiet_exact() {
    let rendered = fmt_no_color(&[LINE_FATAL.as_bytes()], true);
    assert_eq!("15:36:54.481765: fatal: test is over!\n", rendered);
    for field in ["example-service", "main.go", "53", "configure()"] {
        assert!(!rendered.contains(field), "quiet output contains {:?}: {:?}", field, rendered);
    }
}

/// levels shorter than 5 characters are right-justified
#[test]
fn test_fmt_lines_level_right_justified() {
    let data = r#"{"msgTemplate":"m","level":"info","time":"2019-03-27T23:36:51+04:00","msg":"test is running","file":"f","func":"fn","line":"1","process":"p"}"#;
    assert_eq!(
        "15:36:51.000000:  info: test is running\n",
        fmt_no_color(&[data.as_bytes()], true),
    );
}

/// the extra-arguments suffix precedes the error suffix regardless of key
/// declaration order in the source record
#[test]
fn test_fmt_lines_error_after_extra_args() {
    assert_eq!(
        "15:36:53.481765: error: example-service: main.go:53 configure(): weird {\"name\":\"arg value\"} error: Another error message\n",
        fmt_no_color(&[LINE_ERROR_AND_ARGS.as_bytes()], false),
    );
}

/// an error with no extra arguments gets no extra-arguments suffix at all
#[test]
fn test_fmt_lines_error_without_extra_args() {
    let data = r#"{"msgTemplate":"m","level":"warn","time":"2019-03-27T19:36:52.48Z","msg":"error with no args","file":"f","func":"fn","line":"1","process":"p","error":"Error message"}"#;
    assert_eq!(
        "15:36:52.480000:  warn: error with no args error: Error message\n",
        fmt_no_color(&[data.as_bytes()], true),
    );
}

/// multiple extra arguments keep their source-line order
#[test]
fn test_fmt_lines_extra_args_order() {
    let data = r#"{"msgTemplate":"m","level":"info","time":"2019-03-27T23:36:51+04:00","msg":"m","file":"f","func":"fn","line":"1","process":"p","arg_a":"a","arg_b":"b","arg_c":"hello","arg_d":"1,2"}"#;
    assert_eq!(
        "15:36:51.000000:  info: m {\"a\":\"a\",\"b\":\"b\",\"c\":\"hello\",\"d\":\"1,2\"}\n",
        fmt_no_color(&[data.as_bytes()], true),
    );
}

// non-matching lines pass through byte-for-byte, terminator included
// (or not included, if the line had none)
#[test_case(b"hello world\n"; "plain text")]
#[test_case(b"[1, 2, 3]\n"; "json array")]
#[test_case(b"{\"level\":\"info\",\"msg\":\"hi\"}\n"; "mapping without sentinel")]
#[test_case(b"no terminator at all"; "no terminator")]
#[test_case(b"\r\n"; "bare crlf")]
#[test_case(b"\xff\xfenot utf-8\n"; "invalid utf8")]
fn test_fmt_lines_passthrough(raw: &[u8]) {
    let mut buffer = Buffer::no_color();
    fmt_lines([raw], &mut buffer, false, *FO_M4).unwrap();
    assert_eq!(raw, buffer.as_slice(), "passthrough changed the line");
}

/// a record with a schema violation degrades to passthrough
#[test]
fn test_fmt_lines_malformed_record_passthrough() {
    let data = b"{\"msgTemplate\":\"m\",\"level\":\"LOUD\",\"msg\":\"hi\"}\n";
    let mut buffer = Buffer::no_color();
    fmt_lines([data.as_slice()], &mut buffer, false, *FO_M4).unwrap();
    assert_eq!(data.as_slice(), buffer.as_slice());
}

/// a record with an unparseable `time` degrades to passthrough
#[test]
fn test_fmt_lines_bad_time_passthrough() {
    let data = r#"{"msgTemplate":"m","level":"info","time":"yesterday-ish","msg":"m","file":"f","func":"fn","line":"1","process":"p"}"#;
    let mut buffer = Buffer::no_color();
    fmt_lines([data.as_bytes()], &mut buffer, false, *FO_M4).unwrap();
    assert_eq!(data.as_bytes(), buffer.as_slice());
}

/// `trace` and `debug` messages are not sanitized; other levels are
#[test]
fn test_fmt_lines_trace_verbatim_info_sanitized() {
    let trace = r#"{"msgTemplate":"m","level":"trace","time":"2019-03-27T23:36:51+04:00","msg":"raw\nnewline","file":"f","func":"fn","line":"1","process":"p"}"#;
    let info = r#"{"msgTemplate":"m","level":"info","time":"2019-03-27T23:36:51+04:00","msg":"raw\nnewline","file":"f","func":"fn","line":"1","process":"p"}"#;
    assert_eq!(
        "15:36:51.000000: trace: raw\nnewline\n",
        fmt_no_color(&[trace.as_bytes()], true),
    );
    assert_eq!(
        "15:36:51.000000:  info: raw\\nnewline\n",
        fmt_no_color(&[info.as_bytes()], true),
    );
}

/// output order equals input order, matching and non-matching lines mixed
#[test]
fn test_fmt_lines_order_preserved() {
    let lines: [&[u8]; 3] = [
        b"starting up...\n",
        LINE_FATAL.as_bytes(),
        b"shutting down...\n",
    ];
    assert_eq!(
        "starting up...\n\
         15:36:54.481765: fatal: example-service: main.go:53 configure(): test is over!\n\
         shutting down...\n",
        fmt_no_color(&lines, false),
    );
}

/// with a color-capable sink the line carries escape sequences but the
/// field text is intact; a passthrough line stays escape-free
#[test]
fn test_fmt_lines_colored() {
    let mut buffer = Buffer::ansi();
    let lines: [&[u8]; 2] = [LINE_FATAL.as_bytes(), b"plain passthrough\n"];
    fmt_lines(lines, &mut buffer, false, *FO_M4).unwrap();
    let rendered = String::from_utf8(buffer.as_slice().to_vec()).unwrap();
    assert!(rendered.contains("\x1b["), "no escape sequences in {:?}", rendered);
    assert!(rendered.contains("fatal"));
    assert!(rendered.contains("test is over!"));
    let passthrough = rendered.split('\n').nth(1).unwrap();
    assert!(
        !passthrough.contains("\x1b["),
        "passthrough line gained escape sequences: {:?}",
        passthrough
    );
}

/// the returned count is the total bytes printed
#[test]
fn test_fmt_lines_printed_count() {
    let mut buffer = Buffer::no_color();
    let printed = fmt_lines([b"12345\n".as_slice()], &mut buffer, false, *FO_M4).unwrap();
    assert_eq!(6, printed);
}
