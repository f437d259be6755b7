//! Log levels
//!
//! Levels are ordered by increasing verbosity. A record is emitted when its
//! level is not `None` and is less than or equal to the threshold in effect
//! for its tag.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseLevelError;

const COLOR_RED: &str = "\x1b[0;31m";
const COLOR_BROWN: &str = "\x1b[0;33m";
const COLOR_GREEN: &str = "\x1b[0;32m";

/// ANSI sequence appended after every colored line.
pub const RESET_COLOR: &str = "\x1b[0m";

/// Log severity, from silent to most chatty.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// No log output
    None = 0,
    /// Critical errors, the module cannot recover on its own
    Error = 1,
    /// Error conditions from which recovery measures have been taken
    Warn = 2,
    /// Messages describing the normal flow of events
    Info = 3,
    /// Extra information not needed for normal use (values, pointers, sizes)
    Debug = 4,
    /// Large or frequent messages that may flood the output
    Verbose = 5,
}

impl Level {
    /// Every level, least verbose first.
    pub const ALL: [Level; 6] = [
        Level::None,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Verbose,
    ];

    /// Converts a raw value, saturating anything above `Verbose`.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::None,
            1 => Level::Error,
            2 => Level::Warn,
            3 => Level::Info,
            4 => Level::Debug,
            _ => Level::Verbose,
        }
    }

    /// The less verbose of two levels, usable in const context.
    pub const fn min(self, other: Level) -> Level {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }

    /// Returns true when a record at `self` passes `threshold`.
    #[inline(always)]
    pub const fn passes(self, threshold: Level) -> bool {
        !matches!(self, Level::None) && (self as u8) <= (threshold as u8)
    }

    /// Single letter placed at the start of a rendered line.
    pub const fn letter(&self) -> char {
        match self {
            Level::None => 'N',
            Level::Error => 'E',
            Level::Warn => 'W',
            Level::Info => 'I',
            Level::Debug => 'D',
            Level::Verbose => 'V',
        }
    }

    /// Upper-case level name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::None => "NONE",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Verbose => "VERBOSE",
        }
    }

    /// ANSI color prefix; debug and verbose lines are uncolored.
    pub const fn color_code(&self) -> &'static str {
        match self {
            Level::Error => COLOR_RED,
            Level::Warn => COLOR_BROWN,
            Level::Info => COLOR_GREEN,
            Level::None | Level::Debug | Level::Verbose => "",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts level names case-insensitively, `warning` and `trace` aliases,
    /// and the single-letter forms used in rendered lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let level = if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("off") {
            Level::None
        } else if s.eq_ignore_ascii_case("error") || s.eq_ignore_ascii_case("e") {
            Level::Error
        } else if s.eq_ignore_ascii_case("warn")
            || s.eq_ignore_ascii_case("warning")
            || s.eq_ignore_ascii_case("w")
        {
            Level::Warn
        } else if s.eq_ignore_ascii_case("info") || s.eq_ignore_ascii_case("i") {
            Level::Info
        } else if s.eq_ignore_ascii_case("debug") || s.eq_ignore_ascii_case("d") {
            Level::Debug
        } else if s.eq_ignore_ascii_case("verbose")
            || s.eq_ignore_ascii_case("trace")
            || s.eq_ignore_ascii_case("v")
        {
            Level::Verbose
        } else {
            return Err(ParseLevelError);
        };
        Ok(level)
    }
}
