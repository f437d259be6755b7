//! Output sinks
//!
//! A sink receives one fully rendered line per call, newline included, and
//! returns the number of bytes written or a negative value on failure, the
//! same contract as `vprintf`. Sinks may be entered from several execution
//! contexts and must not rely on private unsynchronized state.

use core::fmt::{self, Write};

use spin::RwLock;

/// Line writer installed into a [`SinkRegistry`].
pub type Sink = fn(fmt::Arguments<'_>) -> i32;

/// Holds the installed sink.
pub struct SinkRegistry {
    current: RwLock<Sink>,
}

impl SinkRegistry {
    /// Creates a registry with `sink` installed.
    pub const fn new(sink: Sink) -> Self {
        Self {
            current: RwLock::new(sink),
        }
    }

    /// Installs `sink` and returns the one it replaced.
    pub fn install(&self, sink: Sink) -> Sink {
        core::mem::replace(&mut *self.current.write(), sink)
    }

    /// The installed sink.
    #[inline]
    pub fn current(&self) -> Sink {
        *self.current.read()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new(default_sink())
    }
}

/// Sink used before any installation: stderr when `std` is available,
/// otherwise [`discard_sink`].
pub fn default_sink() -> Sink {
    #[cfg(feature = "std")]
    {
        stderr_sink
    }
    #[cfg(not(feature = "std"))]
    {
        discard_sink
    }
}

/// Renders nothing, but reports how many bytes the line would have taken.
pub fn discard_sink(args: fmt::Arguments<'_>) -> i32 {
    let mut counter = ByteCounter(0);
    match counter.write_fmt(args) {
        Ok(()) => clamp_count(counter.0),
        Err(_) => -1,
    }
}

/// Writes the line to the process's standard error stream.
#[cfg(feature = "std")]
pub fn stderr_sink(args: fmt::Arguments<'_>) -> i32 {
    use std::io::Write as _;

    let mut out = CountingWriter {
        inner: std::io::stderr().lock(),
        written: 0,
    };
    match out.write_fmt(args) {
        Ok(()) => clamp_count(out.written),
        Err(_) => -1,
    }
}

fn clamp_count(bytes: usize) -> i32 {
    i32::try_from(bytes).unwrap_or(i32::MAX)
}

struct ByteCounter(usize);

impl Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

#[cfg(feature = "std")]
struct CountingWriter<W> {
    inner: W,
    written: usize,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> std::io::Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
