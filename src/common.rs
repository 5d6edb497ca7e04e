// src/common.rs
//
// common type aliases and other globals (avoids circular imports)

/// Single newline byte. Appended to every formatted record; never appended
/// to a passthrough line (those keep whatever terminator they arrived with).
pub const NL: u8 = b'\n';

/// User-facing tri-state setting for when to print with colors,
/// the value of CLI option `--color`.
///
/// The `Auto` decision (is stdout an interactive terminal?) is made once
/// per process, not per line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorSetting {
    /// force colors on
    Always,
    /// force colors off
    Never,
    /// colors on only if stdout is a terminal
    #[default]
    Auto,
}
