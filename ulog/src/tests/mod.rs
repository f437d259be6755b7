// ulog/src/tests/mod.rs

use core::cell::RefCell;
use core::fmt;
use std::string::String;
use std::vec::Vec;

use crate::config::{LogConfig, TimestampSource};
use crate::level::Level;
use crate::log_core::LogCore;
use crate::platform::noos::NoOsPlatform;

// ========== 测试辅助宏 ==========

/// 测试专用日志宏
///
/// 模拟生产宏的行为，但操作独立的 LogCore 实例
macro_rules! test_log {
    ($logger:expr, $level:expr, $tag:expr, $($arg:tt)*) => {
        $logger.write($level, $tag, format_args!($($arg)*))
    };
}

// ========== 捕获 sink ==========

thread_local! {
    static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// 记录到当前线程的缓冲区，测试线程之间互不干扰
fn capture_sink(args: fmt::Arguments<'_>) -> i32 {
    let line = std::fmt::format(args);
    let written = line.len() as i32;
    CAPTURED.with(|lines| lines.borrow_mut().push(line));
    written
}

/// 与 capture_sink 不同的另一个 sink，用于替换测试
fn second_sink(args: fmt::Arguments<'_>) -> i32 {
    let line = format!("[2] {args}");
    let written = line.len() as i32;
    CAPTURED.with(|lines| lines.borrow_mut().push(line));
    written
}

/// 总是报告失败
fn failing_sink(_args: fmt::Arguments<'_>) -> i32 {
    -1
}

/// 取出并清空当前线程捕获的行
fn take_lines() -> Vec<String> {
    CAPTURED.with(|lines| core::mem::take(&mut *lines.borrow_mut()))
}

// ========== 测试实例 ==========

type TestCore = LogCore<NoOsPlatform>;

/// 无颜色、毫秒时间戳、所有级别开放
fn plain_config() -> LogConfig {
    LogConfig::DEFAULT
        .with_max_level(Level::Verbose)
        .with_default_level(Level::Verbose)
        .with_colors(false)
        .with_timestamp(TimestampSource::Ticks)
}

fn test_core() -> TestCore {
    TestCore::with_sink(plain_config(), capture_sink)
}

fn test_core_with(config: LogConfig) -> TestCore {
    TestCore::with_sink(config, capture_sink)
}

// ========== 子模块 ==========
mod basic;
mod filter;
