// src/data/record.rs

//! [`LogRecord`] and the decoding of raw input lines.
//!
//! A raw line is a log record _if and only if_ it parses as a JSON mapping
//! **and** that mapping carries the sentinel key [`KEY_SENTINEL`]. That
//! check is the sole discriminator between "format and print nicely" and
//! "pass through verbatim", and it must never fail loudly: every decode
//! problem before the sentinel check is classified [`DecodeResult::NoMatch`].

use ::serde_json::{Map, Value};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// schema constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// key whose presence marks a JSON mapping as one of our log records
pub const KEY_SENTINEL: &str = "msgTemplate";
/// key prefix marking dynamically-named extra arguments;
/// stripped before display
pub const KEY_EXTRA_ARG_PREFIX: &str = "arg_";

pub const KEY_LEVEL: &str = "level";
pub const KEY_MESSAGE: &str = "msg";
pub const KEY_TIME: &str = "time";
pub const KEY_FILE: &str = "file";
pub const KEY_FUNC: &str = "func";
pub const KEY_LINE: &str = "line";
pub const KEY_PROCESS: &str = "process";
pub const KEY_ERROR: &str = "error";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Level
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Log severity level; the fixed set of accepted values of JSON field
/// `"level"`. Lookup is an exact lowercase string match; anything else is
/// a schema violation, not silently defaulted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// `Level` for the JSON field value `key`, or `None` if unrecognized.
    pub fn from_key(key: &str) -> Option<Level> {
        match key {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            _ => None,
        }
    }

    /// the JSON field value this `Level` was decoded from
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// `trace` and `debug` messages print verbatim; sanitizing is skipped
    /// for those two levels so debug output is preserved exactly.
    pub const fn is_verbatim(self) -> bool {
        matches!(self, Level::Trace | Level::Debug)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One decoded log record. All fields are owned; the raw line may be
/// discarded after decoding (unless it must be passed through).
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    /// free-text message; may contain anything, which is exactly what
    /// [`sanitize_message`] exists to handle
    ///
    /// [`sanitize_message`]: crate::data::sanitize::sanitize_message
    pub message: String,
    /// the RFC3339 `time` field, not yet parsed
    pub time: String,
    pub file: String,
    pub func: String,
    pub line: String,
    pub process: String,
    /// optional associated error; presence adds a colored `error: …` suffix
    pub error: Option<String>,
    /// extra arguments in their source-line order,
    /// names stripped of [`KEY_EXTRA_ARG_PREFIX`]
    pub extra_args: Map<String, Value>,
}

/// Result of decoding one raw line.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeResult {
    /// the line is a well-formed log record
    Record(LogRecord),
    /// not our JSON log; the line should pass through unchanged
    NoMatch,
    /// carries the sentinel key but violates the schema (required field
    /// missing or ill-typed, unrecognized level); contains the reason.
    /// Callers degrade these to passthrough.
    Malformed(String),
}

/// `&str` value of `fields[key]`, or `None` if absent or not a string
fn str_field<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Macro helper for `decode_line`; a required string field or
/// early-return `DecodeResult::Malformed`.
macro_rules! field_or_malformed {
    ($fields:expr, $key:expr) => {
        match str_field($fields, $key) {
            Some(val) => val,
            None => {
                return DecodeResult::Malformed(format!("missing or non-string field {:?}", $key))
            }
        }
    };
}

/// Attempt to decode one raw line (bytes as read, any trailing line
/// terminator included; JSON parsing treats it as trailing whitespace).
///
/// Two-stage decode: a generic structural parse (may fail) then explicit
/// field presence and type checks. Failure at the first stage, a non-mapping
/// value, or a missing sentinel key are all [`DecodeResult::NoMatch`] —
/// many causes collapsed into one outcome by design.
pub fn decode_line(raw: &[u8]) -> DecodeResult {
    let value: Value = match ::serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(_) => return DecodeResult::NoMatch,
    };
    let fields: &Map<String, Value> = match value.as_object() {
        Some(fields) => fields,
        None => return DecodeResult::NoMatch,
    };
    if !fields.contains_key(KEY_SENTINEL) {
        return DecodeResult::NoMatch;
    }

    let level_key: &str = field_or_malformed!(fields, KEY_LEVEL);
    let level: Level = match Level::from_key(level_key) {
        Some(level) => level,
        None => return DecodeResult::Malformed(format!("unrecognized level {:?}", level_key)),
    };
    let message: &str = field_or_malformed!(fields, KEY_MESSAGE);
    let time: &str = field_or_malformed!(fields, KEY_TIME);
    let file: &str = field_or_malformed!(fields, KEY_FILE);
    let func: &str = field_or_malformed!(fields, KEY_FUNC);
    let process: &str = field_or_malformed!(fields, KEY_PROCESS);
    // `line` is a line number; emitting loggers disagree on whether it is
    // a JSON string or a JSON number, so accept both
    let line: String = match fields.get(KEY_LINE) {
        Some(Value::String(line)) => line.clone(),
        Some(Value::Number(line)) => line.to_string(),
        Some(_) | None => {
            return DecodeResult::Malformed(format!(
                "missing or non-string field {:?}",
                KEY_LINE
            ))
        }
    };
    let error: Option<String> = match fields.get(KEY_ERROR) {
        Some(Value::String(error)) => Some(error.clone()),
        Some(_) => {
            return DecodeResult::Malformed(format!("non-string field {:?}", KEY_ERROR))
        }
        None => None,
    };

    let mut extra_args: Map<String, Value> = Map::new();
    for (key, val) in fields.iter() {
        if let Some(name) = key.strip_prefix(KEY_EXTRA_ARG_PREFIX) {
            extra_args.insert(name.to_string(), val.clone());
        }
    }

    DecodeResult::Record(LogRecord {
        level,
        message: message.to_string(),
        time: time.to_string(),
        file: file.to_string(),
        func: func.to_string(),
        line,
        process: process.to_string(),
        error,
        extra_args,
    })
}
