// src/debug/mod.rs

//! The `debug` module is error and warning printing macros for
//! user-facing messages and for test and debug builds.

pub mod printers;
