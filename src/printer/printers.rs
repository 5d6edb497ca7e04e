// src/printer/printers.rs

//! Specialized printer struct [`PrinterLogRecord`] and the line-formatting
//! driver functions [`fmt_lines`] and [`fmt_to_stdout`].
//!
//! [`PrinterLogRecord`] is the only component with external I/O. It holds
//! no cross-line state; each line is processed in complete isolation, so
//! out-of-order or interleaved input cannot corrupt adjacent lines.

use crate::common::{ColorSetting, NL};
use crate::data::datetime::{
    datetime_parse_rfc3339,
    datetime_to_string_hms_w_tz,
    local_offset,
    DateTimeL,
    FixedOffset,
};
use crate::data::record::{decode_line, DecodeResult, Level, LogRecord};
use crate::data::sanitize::sanitize_message;
use crate::debug::printers::{de_err, de_wrn};

use std::io::{
    IsTerminal,
    Result,
    Write, // for `flush`
};

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for the identifying fields `process`, `file`, `line`, `func`,
/// regardless of level.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_FIELDS: Color = Color::Magenta;

/// printed width of the right-justified level field
const LEVEL_WIDTH: usize = 5;

/// Build the [`ColorSpec`] for printing `level` and its `error: …` suffix.
/// One distinct style per level; lookup of an unrecognized level already
/// failed during decoding, never here.
pub fn color_spec_level(level: Level) -> ColorSpec {
    let mut color_spec = ColorSpec::new();
    match level {
        Level::Trace => {
            color_spec.set_dimmed(true);
        }
        Level::Debug => {
            color_spec.set_fg(Some(Color::Red));
        }
        Level::Info => {
            color_spec.set_fg(Some(Color::Cyan));
        }
        Level::Warn => {
            color_spec.set_fg(Some(Color::Yellow));
        }
        Level::Error => {
            color_spec.set_bold(true);
            color_spec.set_fg(Some(Color::Red));
        }
        Level::Fatal => {
            color_spec.set_bold(true);
            color_spec.set_bg(Some(Color::Red));
        }
    }

    color_spec
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterLogRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Result`] returned by various [`PrinterLogRecord`] functions; the
/// count of printed bytes.
///
/// [`Result`]: std::io::Result
pub type PrinterLogRecordResult = Result<usize>;

/// Macro to write to the given sink. If there is an error then
/// `return PrinterLogRecordResult::Err`.
macro_rules! write_or_return {
    ($out:expr, $slice_:expr, $printed:expr) => {
        match $out.write_all($slice_) {
            Ok(_) => {
                $printed += $slice_.len();
            }
            Err(err) => {
                // XXX: this will print when this program stdout is truncated, like when piping
                //      to `head`, e.g. `jlf < file.log | head`
                //          Broken pipe (os error 32)
                de_err!("write (len {}) error {}", $slice_.len(), err);
                match $out.flush() {
                    Ok(_) => {}
                    Err(_) => {}
                }
                return PrinterLogRecordResult::Err(err);
            }
        }
    };
}

/// Macro that sets output color, only changed if needed.
///
/// Unnecessary changes to `set_color` may cause errant formatting bytes to
/// print to the terminal.
macro_rules! setcolor_or_return {
    ($out:expr, $color_spec:expr, $color_spec_last:expr) => {
        if $color_spec != $color_spec_last {
            if let Err(err) = $out.set_color(&$color_spec) {
                de_err!("set_color({:?}) returned error {}", $color_spec, err);
                return PrinterLogRecordResult::Err(err);
            };
            $color_spec_last = $color_spec.clone();
        }
    };
}

/// A printer specialized for [`LogRecord`]s and passthrough lines.
///
/// Generic over the [`WriteColor`] sink: the `jlf` binary passes a
/// [`StandardStream`] on stdout; tests pass a [`Buffer`].
///
/// [`Buffer`]: https://docs.rs/termcolor/1.4.1/termcolor/struct.Buffer.html
pub struct PrinterLogRecord<W: WriteColor> {
    /// the output sink
    out: W,
    /// should printing be in color? decided once from `out.supports_color()`
    do_color: bool,
    /// omit `process`, `file`, `line`, `func`?
    quiet: bool,
    /// timezone offset the record `time` renders in
    /// (the local system offset, in the `jlf` binary)
    time_offset: FixedOffset,
    /// color settings for plain text
    color_spec_default: ColorSpec,
    /// color settings for the identifying fields
    color_spec_fields: ColorSpec,
    /// color settings for the record time
    color_spec_time: ColorSpec,
    /// last value passed to `self.out.set_color()`
    ///
    /// used by macro `setcolor_or_return`
    color_spec_last: ColorSpec,
}

impl<W: WriteColor> PrinterLogRecord<W> {
    /// Create a new `PrinterLogRecord`.
    pub fn new(
        out: W,
        quiet: bool,
        time_offset: FixedOffset,
    ) -> PrinterLogRecord<W> {
        let do_color: bool = out.supports_color();
        let color_spec_default = ColorSpec::new();
        let mut color_spec_fields = ColorSpec::new();
        color_spec_fields.set_fg(Some(COLOR_FIELDS));
        let mut color_spec_time = ColorSpec::new();
        color_spec_time.set_dimmed(true);
        let color_spec_last = color_spec_default.clone();

        PrinterLogRecord {
            out,
            do_color,
            quiet,
            time_offset,
            color_spec_default,
            color_spec_fields,
            color_spec_time,
            color_spec_last,
        }
    }

    /// Print a non-matching line byte-for-byte, original terminator
    /// included. No newline is appended and no color is set.
    pub fn print_passthrough(
        &mut self,
        raw: &[u8],
    ) -> PrinterLogRecordResult {
        let mut printed: usize = 0;
        write_or_return!(self.out, raw, printed);

        PrinterLogRecordResult::Ok(printed)
    }

    /// Print one [`LogRecord`] in the display format, one newline appended.
    ///
    /// `dt` is the record's already-parsed `time`; the caller parses it
    /// first so an unparseable time can degrade to passthrough before any
    /// byte is written.
    ///
    /// Default layout
    /// `time: level: process: file:line func: message` plus the optional
    /// suffixes; under `quiet`, `time: level: message` plus the optional
    /// suffixes.
    pub fn print_record(
        &mut self,
        record: &LogRecord,
        dt: &DateTimeL,
    ) -> PrinterLogRecordResult {
        let mut printed: usize = 0;
        let color_spec_level_: ColorSpec = color_spec_level(record.level);

        // time, faded
        let time_s: String = datetime_to_string_hms_w_tz(dt, &self.time_offset);
        if self.do_color {
            setcolor_or_return!(self.out, self.color_spec_time, self.color_spec_last);
        }
        write_or_return!(self.out, time_s.as_bytes(), printed);
        if self.do_color {
            setcolor_or_return!(self.out, self.color_spec_default, self.color_spec_last);
        }
        write_or_return!(self.out, b": ", printed);

        // level, right-justified, one style per level
        let level_s: String = format!("{:>width$}", record.level.as_str(), width = LEVEL_WIDTH);
        if self.do_color {
            setcolor_or_return!(self.out, color_spec_level_, self.color_spec_last);
        }
        write_or_return!(self.out, level_s.as_bytes(), printed);
        if self.do_color {
            setcolor_or_return!(self.out, self.color_spec_default, self.color_spec_last);
        }
        write_or_return!(self.out, b": ", printed);

        // process: file:line func:
        if !self.quiet {
            let parts: [(&str, &[u8]); 4] = [
                (record.process.as_str(), b": "),
                (record.file.as_str(), b":"),
                (record.line.as_str(), b" "),
                (record.func.as_str(), b": "),
            ];
            for (val, sep) in parts.into_iter() {
                if self.do_color {
                    setcolor_or_return!(self.out, self.color_spec_fields, self.color_spec_last);
                }
                write_or_return!(self.out, val.as_bytes(), printed);
                if self.do_color {
                    setcolor_or_return!(self.out, self.color_spec_default, self.color_spec_last);
                }
                write_or_return!(self.out, sep, printed);
            }
        }

        // message; `trace` and `debug` keep theirs verbatim
        match record.level.is_verbatim() {
            true => {
                write_or_return!(self.out, record.message.as_bytes(), printed);
            }
            false => {
                let sanitized = sanitize_message(&record.message);
                write_or_return!(self.out, sanitized.as_bytes(), printed);
            }
        }

        // extra arguments as one compact JSON mapping, uncolored
        if !record.extra_args.is_empty() {
            let args_s: String = ::serde_json::to_string(&record.extra_args)
                .unwrap_or_else(|_| String::from("{}"));
            write_or_return!(self.out, b" ", printed);
            write_or_return!(self.out, args_s.as_bytes(), printed);
        }

        // error suffix, same style as the level, after any extra arguments
        if let Some(error) = &record.error {
            write_or_return!(self.out, b" ", printed);
            if self.do_color {
                setcolor_or_return!(self.out, color_spec_level_, self.color_spec_last);
            }
            write_or_return!(self.out, b"error: ", printed);
            write_or_return!(self.out, error.as_bytes(), printed);
            if self.do_color {
                setcolor_or_return!(self.out, self.color_spec_default, self.color_spec_last);
            }
        }

        write_or_return!(self.out, &[NL], printed);

        // flush immediately so colored output interleaves correctly with
        // concurrently-written uncolored streams
        if self.do_color {
            self.out.flush()?;
        }

        PrinterLogRecordResult::Ok(printed)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// line-formatting drivers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Format every line of `lines` onto `out`. Returns the count of printed
/// bytes.
///
/// Per line: lines that decode to a [`LogRecord`] with a parseable `time`
/// are printed in the display format; everything else — non-JSON,
/// non-mapping JSON, mappings without the sentinel key, schema-violating
/// records, records with an unparseable `time` — passes through unchanged
/// (the degraded cases also print a warning in debug builds).
///
/// Only I/O errors on `out` end processing early; they propagate to the
/// caller.
pub fn fmt_lines<I, W>(
    lines: I,
    out: W,
    quiet: bool,
    time_offset: FixedOffset,
) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
    W: WriteColor,
{
    let mut printer: PrinterLogRecord<W> = PrinterLogRecord::new(out, quiet, time_offset);
    let mut printed: usize = 0;
    for line in lines.into_iter() {
        let raw: &[u8] = line.as_ref();
        printed += match decode_line(raw) {
            DecodeResult::Record(record) => match datetime_parse_rfc3339(&record.time) {
                Some(dt) => printer.print_record(&record, &dt)?,
                None => {
                    de_wrn!("unparseable time {:?}; passing the line through", record.time);
                    printer.print_passthrough(raw)?
                }
            },
            DecodeResult::NoMatch => printer.print_passthrough(raw)?,
            DecodeResult::Malformed(_reason) => {
                de_wrn!("malformed log record ({}); passing the line through", _reason);
                printer.print_passthrough(raw)?
            }
        };
    }

    Ok(printed)
}

/// Format every line of `lines` onto stdout, resolving the tri-state
/// `color` setting once ([`ColorSetting::Auto`] tests whether stdout is a
/// terminal) and rendering record times in the local system timezone.
///
/// This function can be called from other programs that already own a
/// source of lines; the `jlf` binary is a thin wrapper around it.
pub fn fmt_to_stdout<I>(
    lines: I,
    color: ColorSetting,
    quiet: bool,
) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let color_choice: ColorChoice = match color {
        ColorSetting::Always => ColorChoice::Always,
        ColorSetting::Never => ColorChoice::Never,
        ColorSetting::Auto => match std::io::stdout().is_terminal() {
            true => ColorChoice::Auto,
            false => ColorChoice::Never,
        },
    };
    let stdout_color = StandardStream::stdout(color_choice);
    let time_offset: FixedOffset = local_offset();

    fmt_lines(lines, stdout_color, quiet, time_offset)
}
