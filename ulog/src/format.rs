//! Record formatting
//!
//! Every emitted line has the layout
//!
//! ```text
//! <color><letter> (<timestamp>) <tag>: <message><reset>\n
//! ```
//!
//! The buffer dump operations cut their input into rows of
//! [`BYTES_PER_LINE`] bytes and render each row into a [`FixedBuf`] on the
//! caller's stack, which then becomes the message of one line.

use core::fmt::{self, Write};

use crate::config::BYTES_PER_LINE;
use crate::level::{Level, RESET_COLOR};
use crate::platform::WallClock;

/// Capacity of a hex row: `"xx "` per byte.
pub const HEX_ROW_CAPACITY: usize = 3 * BYTES_PER_LINE;
/// Capacity of a character row. Bytes above 0x7f take two UTF-8 bytes.
pub const CHAR_ROW_CAPACITY: usize = 4 * BYTES_PER_LINE;
/// Capacity of a hexdump row: address, two hex groups, ASCII column.
pub const HEXDUMP_ROW_CAPACITY: usize = 96;

/// Stack buffer that keeps what fits and silently drops the rest.
pub struct FixedBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> FixedBuf<N> {
    /// An empty buffer.
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Forgets the contents.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffered text.
    pub fn as_str(&self) -> &str {
        // 截断只发生在字符边界，见 write_str
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl<const N: usize> Default for FixedBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Write for FixedBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = N - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Content of the timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Milliseconds since boot
    Millis(u32),
    /// Wall-clock rendering
    Clock(WallClock),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Millis(ms) => write!(f, "{ms}"),
            Timestamp::Clock(clock) => f.write_str(clock.as_str()),
        }
    }
}

/// One log line, rendered lazily through [`fmt::Display`].
pub struct Line<'a> {
    /// Severity; selects the letter and the color
    pub level: Level,
    /// Timestamp field
    pub timestamp: Timestamp,
    /// Tag field
    pub tag: &'a str,
    /// Caller's message
    pub message: fmt::Arguments<'a>,
    /// Whether ANSI colors wrap the line
    pub colors: bool,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.colors {
            f.write_str(self.level.color_code())?;
        }
        write!(
            f,
            "{} ({}) {}: {}",
            self.level.letter(),
            self.timestamp,
            self.tag,
            self.message
        )?;
        if self.colors {
            f.write_str(RESET_COLOR)?;
        }
        f.write_char('\n')
    }
}

/// Splits `bytes` into dump rows. Only the last row may be short.
pub fn rows(bytes: &[u8]) -> core::slice::Chunks<'_, u8> {
    bytes.chunks(BYTES_PER_LINE)
}

/// `"%02x "` for every byte of the row.
pub fn render_hex_row<W: Write>(out: &mut W, row: &[u8]) -> fmt::Result {
    for byte in row {
        write!(out, "{byte:02x} ")?;
    }
    Ok(())
}

/// The row's bytes taken as characters, unescaped.
pub fn render_char_row<W: Write>(out: &mut W, row: &[u8]) -> fmt::Result {
    for &byte in row {
        out.write_char(char::from(byte))?;
    }
    Ok(())
}

/// `0x...  xx xx .. xx  xx .. xx  |ascii|`
///
/// Missing bytes of a short row leave blank hex fields; the ASCII column only
/// covers the bytes present.
pub fn render_hexdump_row<W: Write>(out: &mut W, address: usize, row: &[u8]) -> fmt::Result {
    write!(out, "{address:#010x} ")?;
    for i in 0..BYTES_PER_LINE {
        if i % 8 == 0 {
            out.write_char(' ')?;
        }
        match row.get(i) {
            Some(byte) => write!(out, " {byte:02x}")?,
            None => out.write_str("   ")?,
        }
    }
    out.write_str("  |")?;
    for &byte in row {
        let shown = if (0x20..=0x7e).contains(&byte) {
            char::from(byte)
        } else {
            '.'
        };
        out.write_char(shown)?;
    }
    out.write_char('|')
}
