//! Logging macros
//!
//! Call-site entry points in the style of `ULOGE` / `ULOGW` / ... for easy
//! tagged logging at different levels.
//!
//! # Usage
//!
//! ```rust
//! const TAG: &str = "wifi";
//!
//! ulog::ulog_info!(TAG, "connected to {}", "home");
//! ulog::ulog_err!(TAG, "auth failed: {}", -3);
//! ulog::ulog_buffer_hex!(TAG, &[0xde, 0xad, 0xbe, 0xef]);
//! ```
//!
//! # Macro List
//!
//! - `ulog_err!` / `ulog_warn!` / `ulog_info!` / `ulog_debug!` / `ulog_verbose!`
//! - `ulog!` - level chosen at runtime
//! - `ulog_isr!` - bounded lock wait, for contexts that must not block
//! - `ulog_early_err!` ... `ulog_early_verbose!` - before the scheduler starts
//! - `ulog_buffer_hex!` / `ulog_buffer_char!` / `ulog_buffer_hexdump!`
//!
//! # Performance
//!
//! Levels above [`MAXIMUM_LEVEL`](crate::config::MAXIMUM_LEVEL) fold away at
//! compile time. The runtime tag check runs before the format arguments are
//! evaluated, so disabled records cost one registry lookup.

/// Internal implementation macro with level filtering
///
/// Checks the compile-time cap and the tag's runtime level before the
/// arguments are formatted.
#[doc(hidden)]
#[macro_export]
macro_rules! __ulog_impl_filtered {
    ($level:expr, $tag:expr, $args:expr) => {{
        let level: $crate::Level = $level;
        let tag: &str = $tag;
        if $crate::config::level_compiled_in(level) && $crate::is_enabled(level, tag) {
            $crate::write(level, tag, $args);
        }
    }};
}

/// Logs a message at a level chosen at runtime.
///
/// # Examples
///
/// ```rust
/// let level = ulog::Level::Warn;
/// ulog::ulog!(level, "app", "retry {}", 3);
/// ```
#[macro_export]
macro_rules! ulog {
    ($level:expr, $tag:expr, $($arg:tt)+) => {
        $crate::__ulog_impl_filtered!($level, $tag, format_args!($($arg)+))
    };
}

/// Logs a message at the ERROR level
///
/// Critical errors: the software module cannot recover on its own.
///
/// # Examples
///
/// ```rust
/// ulog::ulog_err!("nvs", "partition missing");
/// ```
#[macro_export]
macro_rules! ulog_err {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_impl_filtered!($crate::Level::Error, $tag, format_args!($($arg)+))
    };
}

/// Logs a message at the WARN level
///
/// Error conditions from which recovery measures have been taken.
#[macro_export]
macro_rules! ulog_warn {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_impl_filtered!($crate::Level::Warn, $tag, format_args!($($arg)+))
    };
}

/// Logs a message at the INFO level
#[macro_export]
macro_rules! ulog_info {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_impl_filtered!($crate::Level::Info, $tag, format_args!($($arg)+))
    };
}

/// Logs a message at the DEBUG level
///
/// Extra information not needed for normal use: values, pointers, sizes.
#[macro_export]
macro_rules! ulog_debug {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_impl_filtered!($crate::Level::Debug, $tag, format_args!($($arg)+))
    };
}

/// Logs a message at the VERBOSE level
#[macro_export]
macro_rules! ulog_verbose {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_impl_filtered!($crate::Level::Verbose, $tag, format_args!($($arg)+))
    };
}

/// Logs through the bounded-wait path and evaluates to `false` when the
/// line was dropped because the lock stayed busy.
///
/// # Examples
///
/// ```rust
/// let sent = ulog::ulog_isr!(ulog::Level::Error, "uart", "rx overrun");
/// assert!(sent);
/// ```
#[macro_export]
macro_rules! ulog_isr {
    ($level:expr, $tag:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        if $crate::config::level_compiled_in(level) {
            $crate::try_write(level, $tag, format_args!($($arg)+))
        } else {
            true
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ulog_early_impl {
    ($level:expr, $tag:expr, $args:expr) => {{
        let level: $crate::Level = $level;
        if $crate::config::level_compiled_in(level) {
            $crate::early_write(level, $tag, $args);
        }
    }};
}

/// Early-boot ERROR log: no tag lookup, no lock.
#[macro_export]
macro_rules! ulog_early_err {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_early_impl!($crate::Level::Error, $tag, format_args!($($arg)+))
    };
}

/// Early-boot WARN log.
#[macro_export]
macro_rules! ulog_early_warn {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_early_impl!($crate::Level::Warn, $tag, format_args!($($arg)+))
    };
}

/// Early-boot INFO log.
#[macro_export]
macro_rules! ulog_early_info {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_early_impl!($crate::Level::Info, $tag, format_args!($($arg)+))
    };
}

/// Early-boot DEBUG log.
#[macro_export]
macro_rules! ulog_early_debug {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_early_impl!($crate::Level::Debug, $tag, format_args!($($arg)+))
    };
}

/// Early-boot VERBOSE log.
#[macro_export]
macro_rules! ulog_early_verbose {
    ($tag:expr, $($arg:tt)+) => {
        $crate::__ulog_early_impl!($crate::Level::Verbose, $tag, format_args!($($arg)+))
    };
}

/// Dumps a byte slice as hex rows, at INFO unless a level is given.
///
/// # Examples
///
/// ```rust
/// let frame = [0x01u8, 0x02, 0x03];
/// ulog::ulog_buffer_hex!("spi", &frame);
/// ulog::ulog_buffer_hex!("spi", &frame, ulog::Level::Debug);
/// ```
#[macro_export]
macro_rules! ulog_buffer_hex {
    ($tag:expr, $buffer:expr) => {
        $crate::ulog_buffer_hex!($tag, $buffer, $crate::Level::Info)
    };
    ($tag:expr, $buffer:expr, $level:expr) => {{
        let level: $crate::Level = $level;
        if $crate::config::level_compiled_in(level) {
            $crate::buffer_hex($tag, $buffer, level);
        }
    }};
}

/// Dumps a byte slice as character rows, at INFO unless a level is given.
#[macro_export]
macro_rules! ulog_buffer_char {
    ($tag:expr, $buffer:expr) => {
        $crate::ulog_buffer_char!($tag, $buffer, $crate::Level::Info)
    };
    ($tag:expr, $buffer:expr, $level:expr) => {{
        let level: $crate::Level = $level;
        if $crate::config::level_compiled_in(level) {
            $crate::buffer_char($tag, $buffer, level);
        }
    }};
}

/// Dumps a byte slice as addressed hex rows with an ASCII column.
#[macro_export]
macro_rules! ulog_buffer_hexdump {
    ($tag:expr, $buffer:expr) => {
        $crate::ulog_buffer_hexdump!($tag, $buffer, $crate::Level::Info)
    };
    ($tag:expr, $buffer:expr, $level:expr) => {{
        let level: $crate::Level = $level;
        if $crate::config::level_compiled_in(level) {
            $crate::buffer_hexdump($tag, $buffer, level);
        }
    }};
}
