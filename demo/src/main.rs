//! Walks through the logger the way an application would: levels, per-tag
//! filtering, buffer dumps, a sink swap and the `log` facade.

use std::fmt;
use std::thread;
use std::time::Duration;

use ulog::{Level, ulog_debug, ulog_err, ulog_info, ulog_verbose, ulog_warn};

const TAG: &str = "main";

/// Routes lines to stdout instead of stderr.
fn stdout_sink(args: fmt::Arguments<'_>) -> i32 {
    use std::io::Write;

    let line = args.to_string();
    match std::io::stdout().lock().write_all(line.as_bytes()) {
        Ok(()) => i32::try_from(line.len()).unwrap_or(i32::MAX),
        Err(_) => -1,
    }
}

fn main() {
    ulog::ulog_early_info!(TAG, "early clock {} ms", ulog::early_timestamp());

    ulog_debug!(TAG, "{}", line!());
    thread::sleep(Duration::from_secs(1));
    ulog_info!(TAG, "{}", line!());
    ulog_verbose!(TAG, "{}", line!());
    ulog_warn!(TAG, "{}", line!());
    ulog_err!(TAG, "{}", line!());

    let packet: Vec<u8> = (0u8..40).collect();
    ulog::ulog_buffer_hex!("dump", &packet);
    ulog::ulog_buffer_char!("dump", b"plain text split into sixteen byte rows");
    ulog::ulog_buffer_hexdump!("dump", &packet, Level::Warn);

    // 只保留 main 的调试输出
    if let Err(err) = ulog::level_set("*", Level::Warn) {
        ulog_err!(TAG, "level_set failed: {}", err);
    }
    if let Err(err) = ulog::level_set(TAG, Level::Debug) {
        ulog_err!(TAG, "level_set failed: {}", err);
    }
    ulog_info!("dump", "hidden");
    ulog_debug!(TAG, "visible");

    let previous = ulog::set_sink(stdout_sink);
    ulog_info!(TAG, "now on stdout at {}", ulog::system_timestamp());
    ulog::set_sink(previous);

    match ulog::init_log_bridge() {
        Ok(()) => log::warn!(target: TAG, "through the log facade"),
        Err(err) => ulog_err!(TAG, "log bridge: {}", err),
    }

    if !ulog::ulog_isr!(Level::Error, TAG, "bounded wait") {
        eprintln!("dropped {} lines", ulog::dropped_count());
    }
}
