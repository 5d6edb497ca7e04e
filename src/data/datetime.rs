// src/data/datetime.rs

//! Functions to parse [RFC3339] datetime strings and render them as a
//! time-of-day.
//!
//! This is a hand-built parser because common library parsers only accept
//! 3, 6, or 9 decimal digits in the fractional seconds, while RFC3339
//! allows _any_ number of digits (the RFC itself gives an example with 2).
//! The logging library whose records are being formatted emits 9.
//!
//! [RFC3339]: https://tools.ietf.org/html/rfc3339#section-5.6

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    FixedOffset,
    Local,
    NaiveDate,
    TimeZone,
};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::Regex;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// types and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A _L_og record _DateTime_ — a datetime with a fixed UTC offset, as
/// parsed from the `time` field of a log record.
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// a regular expression capture group pattern, as a `str`
pub type CaptureGroupPattern = str;

pub const CGP_YEAR: &CaptureGroupPattern = r"(?P<year>\d{4})";
pub const CGP_MONTH: &CaptureGroupPattern = r"(?P<month>\d{2})";
pub const CGP_DAY: &CaptureGroupPattern = r"(?P<day>\d{2})";
pub const CGP_HOUR: &CaptureGroupPattern = r"(?P<hour>\d{2})";
pub const CGP_MINUTE: &CaptureGroupPattern = r"(?P<minute>\d{2})";
pub const CGP_SECOND: &CaptureGroupPattern = r"(?P<second>\d{2})";
/// fractions of a second; any number of digits
pub const CGP_FRACTIONAL: &CaptureGroupPattern = r"(?:\.(?P<fractional>\d+))?";
/// `Z` or a signed numeric offset; `Z` means `+00:00`
pub const CGP_TZ: &CaptureGroupPattern = r"(?:Z|(?P<tzsign>[+-])(?P<tzhour>\d{2}):(?P<tzminute>\d{2}))";

/// The entire RFC3339 grammar accepted by [`datetime_parse_rfc3339`],
/// `YYYY-MM-DDTHH:MM:SS[.fraction](Z|±HH:MM)`, anchored at both ends.
pub const RFC3339_PATTERN: &str = concatcp!(
    "^",
    CGP_YEAR, "-", CGP_MONTH, "-", CGP_DAY,
    "T",
    CGP_HOUR, ":", CGP_MINUTE, ":", CGP_SECOND,
    CGP_FRACTIONAL,
    CGP_TZ,
    "$",
);

lazy_static! {
    /// compiled [`RFC3339_PATTERN`]
    static ref RFC3339_REGEX: Regex = Regex::new(RFC3339_PATTERN).unwrap();
}

/// number of fractional-second digits held in one microsecond value
const FRACTIONAL_DIGITS_MICRO: usize = 6;

/// `strftime`-style pattern for the printed time-of-day; 24-hour,
/// microsecond precision, no date, no timezone indicator
pub const DATETIME_FORMAT_HMS_MICRO: &str = "%H:%M:%S%.6f";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// parsing and rendering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Interpret a fractional-second digit string as microseconds, truncated
/// (not rounded) to microsecond resolution.
/// e.g. `"5"` is 500000, `"123456789"` is 123456.
fn fractional_to_micros(digits: &str) -> u32 {
    let digits_: &str = &digits[..digits
        .len()
        .min(FRACTIONAL_DIGITS_MICRO)];
    // `digits_` is 1 to 6 ASCII digits (the regex guarantees it) so this
    // parse cannot fail and cannot overflow `u32`
    let mut micros: u32 = digits_.parse::<u32>().unwrap_or(0);
    for _ in digits_.len()..FRACTIONAL_DIGITS_MICRO {
        micros *= 10;
    }

    micros
}

/// Parse an RFC3339 datetime string to a [`DateTimeL`].
///
/// Returns `None` for any string not matching [`RFC3339_PATTERN`] and for
/// matching strings with impossible calendar values (month `13`,
/// second `60`, …).
pub fn datetime_parse_rfc3339(data: &str) -> DateTimeLOpt {
    let captures = RFC3339_REGEX.captures(data)?;

    let year = captures.name("year")?.as_str().parse::<i32>().ok()?;
    let month = captures.name("month")?.as_str().parse::<u32>().ok()?;
    let day = captures.name("day")?.as_str().parse::<u32>().ok()?;
    let hour = captures.name("hour")?.as_str().parse::<u32>().ok()?;
    let minute = captures.name("minute")?.as_str().parse::<u32>().ok()?;
    let second = captures.name("second")?.as_str().parse::<u32>().ok()?;

    let micros: u32 = match captures.name("fractional") {
        Some(fractional) => fractional_to_micros(fractional.as_str()),
        None => 0,
    };

    // no "tzsign" capture means the offset was the literal `Z`, i.e. +00:00
    let offset_seconds: i32 = match captures.name("tzsign") {
        Some(tzsign) => {
            let tzhour = captures.name("tzhour")?.as_str().parse::<i32>().ok()?;
            let tzminute = captures.name("tzminute")?.as_str().parse::<i32>().ok()?;
            // the sign applies to the whole HH:MM quantity
            let seconds = tzhour * 3600 + tzminute * 60;
            match tzsign.as_str() {
                "-" => -seconds,
                _ => seconds,
            }
        }
        None => 0,
    };
    let offset: FixedOffset = FixedOffset::east_opt(offset_seconds)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_micro_opt(hour, minute, second, micros)?;

    offset
        .from_local_datetime(&naive)
        .single()
}

/// Render `dt` in timezone offset `tz` as `HH:MM:SS.ffffff`.
pub fn datetime_to_string_hms_w_tz(
    dt: &DateTimeL,
    tz: &FixedOffset,
) -> String {
    dt.with_timezone(tz)
        .format(DATETIME_FORMAT_HMS_MICRO)
        .to_string()
}

/// The local system timezone offset, as a [`FixedOffset`].
///
/// Callers should capture this once per process; records render in it.
pub fn local_offset() -> FixedOffset {
    *Local::now().offset()
}
