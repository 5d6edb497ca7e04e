// src/bin/jlf.rs

//! Driver program _jlf_ drives the [_jlflib_].
//!
//! Processes user-passed command-line arguments, resolves the color
//! setting once, then formats lines read from STDIN onto STDOUT using
//! [`fmt_to_stdout`]. With `--test`, a preset list of records is formatted
//! instead of reading STDIN.
//!
//! `jlf` is meant to sit at the end of a log-producing pipeline, e.g.
//!
//! ```text
//!   ./some-service 2>&1 | jlf
//! ```
//!
//! [_jlflib_]: jlflib
//! [`fmt_to_stdout`]: jlflib::printer::printers::fmt_to_stdout

#![allow(non_camel_case_types)]

use std::io::{BufRead, ErrorKind};
use std::process::ExitCode;

use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::jlflib::common::ColorSetting;
use ::jlflib::data::record::{KEY_MESSAGE, KEY_SENTINEL};
use ::jlflib::debug::printers::e_err;
use ::jlflib::printer::printers::fmt_to_stdout;
use ::serde_json::{json, Map, Value};
use ::si_trace_print::{defn, defx};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const CLI_HELP_AFTER: &str = "\
DateTime fields are printed as a local time-of-day, HH:MM:SS.ffffff.

Lines that are not JSON log records (non-JSON lines, JSON that is not a
mapping, mappings without the expected fields) are printed as-is.";

/// CLI enum for the `--color` option
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

/// Parsed command-line arguments.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "jlf",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(JSON Log Formatter)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Print using colors. "auto", the default, tests if stdout is a
    /// terminal.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Omit process, file, line, func.
    #[clap(
        required = false,
        short = 'q',
        long = "quiet",
    )]
    quiet: bool,

    /// Instead of reading from STDIN, format a preset list of lines to
    /// test this program's formatting functionality, then exit.
    #[clap(
        required = false,
        long = "test",
    )]
    test: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// input sources
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Iterator of STDIN lines, as bytes. Each line keeps its original
/// terminator so non-matching lines can pass through byte-for-byte
/// (the last line of input may have no terminator at all).
struct StdinLines {
    stdin: std::io::Stdin,
}

impl StdinLines {
    fn new() -> StdinLines {
        StdinLines {
            stdin: std::io::stdin(),
        }
    }
}

impl Iterator for StdinLines {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let mut buf: Vec<u8> = Vec::new();
        match self
            .stdin
            .lock()
            .read_until(b'\n', &mut buf)
        {
            Ok(0) => None,
            Ok(_) => Some(buf),
            Err(err) => {
                // an unreadable input source is a process-level error
                e_err!("reading stdin: {}", err);
                std::process::exit(1);
            }
        }
    }
}

/// Preset list of lines for CLI option `--test`: one record per level,
/// exercising extra arguments, the `error: …` suffix, sanitized message
/// content, and several RFC3339 offset and fraction forms.
fn test_lines() -> Vec<Vec<u8>> {
    // these fields are the same on every line
    let base: [(&str, Value); 4] = [
        ("file", json!("main.go")),
        ("func", json!("configure()")),
        ("line", json!("53")),
        ("process", json!("example-service")),
    ];
    // these fields are different on every line
    let presets: [Value; 6] = [
        json!({"level":"trace","time":"2019-03-27T15:36:49.481765984-04:00","msg":"starting test output"}),
        json!({"level":"debug","time":"2019-03-27T15:36:50.000000000-04:00","msg":"is this thing on?","arg_name":"value"}),
        json!({"level":"info","time":"2019-03-27T23:36:51+04:00","msg":"test is running","arg_a":"a","arg_b":"b","arg_c":"hello","arg_d":"1,2"}),
        json!({"level":"warn","time":"2019-03-27T19:36:52.48Z","msg":"error with no args","error":"Error message"}),
        json!({"level":"error","time":"2019-03-27T15:36:53.481765984-04:00","msg":"weird characters in message \n '\" \\ {}","arg_name":"arg value","error":"Another error message"}),
        json!({"level":"fatal","time":"2019-03-27T15:36:54.481765984-04:00","msg":"test is over!"}),
    ];

    let mut lines: Vec<Vec<u8>> = Vec::with_capacity(presets.len());
    for preset in presets.into_iter() {
        let mut fields: Map<String, Value> = Map::new();
        for (key, val) in base.iter() {
            fields.insert(key.to_string(), val.clone());
        }
        fields.insert(
            KEY_SENTINEL.to_string(),
            preset[KEY_MESSAGE].clone(),
        );
        if let Some(preset_fields) = preset.as_object() {
            for (key, val) in preset_fields.iter() {
                fields.insert(key.clone(), val.clone());
            }
        }
        match ::serde_json::to_vec(&Value::Object(fields)) {
            Ok(line) => lines.push(line),
            Err(err) => {
                e_err!("serializing test line: {}", err);
            }
        }
    }

    lines
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// main
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// set a process signal handler; an interrupt is a clean exit, with
/// already-printed output intact and no stack trace or secondary error
fn set_signal_handler() -> anyhow::Result<(), ctrlc::Error> {
    defn!();

    ctrlc::set_handler(move || {
        // all output written so far is already on stdout; nothing to clean up
        std::process::exit(0);
    })?;

    defx!();

    Ok(())
}

fn main() -> ExitCode {
    let args = CLI_Args::parse();
    defn!("args {:?}", args);

    if let Err(err) = set_signal_handler() {
        e_err!("set_signal_handler: {}", err);
        return ExitCode::FAILURE;
    }

    let color: ColorSetting = match args.color_choice {
        CLI_Color_Choice::always => ColorSetting::Always,
        CLI_Color_Choice::auto => ColorSetting::Auto,
        CLI_Color_Choice::never => ColorSetting::Never,
    };

    let result = match args.test {
        true => fmt_to_stdout(test_lines(), color, args.quiet),
        false => fmt_to_stdout(StdinLines::new(), color, args.quiet),
    };

    let exitcode: ExitCode = match result {
        Ok(_printed) => ExitCode::SUCCESS,
        // a closed reader, e.g. `jlf < file.log | head`, is not an error
        Err(err) if err.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(err) => {
            e_err!("{}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
