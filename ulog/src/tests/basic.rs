// ulog/src/tests/basic.rs

use super::*;

#[test]
fn test_write_reaches_sink() {
    let log = test_core();

    test_log!(log, Level::Info, "app", "test message");

    assert_eq!(take_lines(), ["I (0) app: test message\n"]);
}

#[test]
fn test_format_arguments() {
    let log = test_core();

    test_log!(log, Level::Info, "app", "value: {}", 42);
    test_log!(log, Level::Debug, "app", "hex: {:#x}", 0xDEAD);

    let lines = take_lines();
    assert_eq!(lines[0], "I (0) app: value: 42\n");
    assert_eq!(lines[1], "D (0) app: hex: 0xdead\n");
}

#[test]
fn test_call_order_preserved() {
    let log = test_core();

    for i in 0..5 {
        test_log!(log, Level::Verbose, "seq", "message {}", i);
    }

    let lines = take_lines();
    assert_eq!(lines.len(), 5);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("seq: message {i}\n")));
    }
}

#[test]
fn test_same_record_renders_identically() {
    let log = test_core();

    test_log!(log, Level::Warn, "net", "link {} down", 2);
    test_log!(log, Level::Warn, "net", "link {} down", 2);

    let lines = take_lines();
    assert_eq!(lines[0], lines[1]);
}

#[test]
fn test_none_level_never_emitted() {
    let log = test_core();

    test_log!(log, Level::None, "app", "silent");

    assert!(take_lines().is_empty());
}

#[test]
fn test_early_write_uses_default_level_only() {
    let log = test_core_with(plain_config().with_default_level(Level::Info));
    log.level_set("boot", Level::Verbose).unwrap();

    // 早期日志不查询标签表
    log.early_write(Level::Debug, "boot", format_args!("skipped"));
    log.early_write(Level::Info, "boot", format_args!("clock {}", 80));

    assert_eq!(take_lines(), ["I (0) boot: clock 80\n"]);
}

#[test]
fn test_early_write_ignores_timestamp_source() {
    let log = test_core_with(plain_config().with_timestamp(TimestampSource::System));

    log.early_write(Level::Error, "boot", format_args!("early"));
    test_log!(log, Level::Error, "boot", "late");

    let lines = take_lines();
    assert_eq!(lines[0], "E (0) boot: early\n");
    assert_eq!(lines[1], "E (00:00:00.000) boot: late\n");
}

#[test]
fn test_try_write_without_contention() {
    let log = test_core();

    assert!(log.try_write(Level::Error, "isr", format_args!("overrun")));
    // 被过滤的记录不算丢失
    assert!(log.try_write(Level::None, "isr", format_args!("ignored")));

    assert_eq!(take_lines(), ["E (0) isr: overrun\n"]);
    assert_eq!(log.dropped_count(), 0);
}

#[test]
fn test_reset_restores_initial_state() {
    let log = test_core_with(plain_config().with_default_level(Level::Warn));
    log.level_set("app", Level::Verbose).unwrap();
    log.level_set("*", Level::None).unwrap();
    log.set_sink(failing_sink);
    test_log!(log, Level::Debug, "app", "lost");
    assert_eq!(log.dropped_count(), 1);

    log.reset();

    assert_eq!(log.level_get("app"), Level::Warn);
    assert_eq!(log.default_level(), Level::Warn);
    assert_eq!(log.dropped_count(), 0);
    assert!(core::ptr::fn_addr_eq(
        log.sink(),
        crate::sink::default_sink()
    ));
}

// ========== 持锁期间重入 ==========

thread_local! {
    static NESTED: core::cell::Cell<bool> = const { core::cell::Cell::new(false) };
    static NESTED_TRY: core::cell::Cell<Option<bool>> = const { core::cell::Cell::new(None) };
}

lazy_static::lazy_static! {
    static ref REENTRANT: TestCore = TestCore::with_sink(plain_config(), reentrant_sink);
}

/// 第一次进入时模拟中断：在外层 write 持锁期间再次记录
fn reentrant_sink(args: fmt::Arguments<'_>) -> i32 {
    let written = capture_sink(args);
    if !NESTED.with(|nested| nested.replace(true)) {
        let accepted = REENTRANT.try_write(Level::Error, "isr", format_args!("nested"));
        NESTED_TRY.with(|result| result.set(Some(accepted)));
        REENTRANT.write(Level::Warn, "isr", format_args!("blocking nested"));
        REENTRANT.buffer_hex("isr", b"\x01\x02", Level::Info);
    }
    written
}

#[test]
fn test_nested_write_while_lock_held() {
    REENTRANT.write(Level::Info, "main", format_args!("outer"));

    assert_eq!(
        take_lines(),
        [
            "I (0) main: outer\n",
            "E (0) isr: nested\n",
            "W (0) isr: blocking nested\n",
            "I (0) isr: 01 02 \n",
        ]
    );
    assert_eq!(NESTED_TRY.with(|result| result.get()), Some(true));
    assert_eq!(REENTRANT.dropped_count(), 0);
}
