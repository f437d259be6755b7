// ulog/src/tests/filter.rs

use super::*;

#[test]
fn test_default_level_filtering() {
    let log = test_core_with(plain_config().with_default_level(Level::Warn));

    test_log!(log, Level::Error, "app", "error"); // 1 <= 2
    test_log!(log, Level::Warn, "app", "warn"); // 2 <= 2
    test_log!(log, Level::Info, "app", "info"); // 3 > 2, filtered
    test_log!(log, Level::Verbose, "app", "verbose"); // 5 > 2, filtered

    let lines = take_lines();
    assert_eq!(lines, ["E (0) app: error\n", "W (0) app: warn\n"]);
}

#[test]
fn test_wildcard_scenario() {
    let log = test_core();
    log.level_set("*", Level::Info).unwrap();

    test_log!(log, Level::Debug, "net", "x");
    assert!(take_lines().is_empty(), "no sink call for a filtered record");

    test_log!(log, Level::Error, "net", "boom");
    let lines = take_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("net: boom\n"));
}

#[test]
fn test_explicit_entry_survives_wildcard() {
    let log = test_core();
    log.level_set("wifi", Level::Debug).unwrap();
    log.level_set("*", Level::Error).unwrap();

    assert_eq!(log.level_get("wifi"), Level::Debug);
    assert_eq!(log.level_get("uart"), Level::Error);

    test_log!(log, Level::Debug, "wifi", "scan");
    test_log!(log, Level::Debug, "uart", "rx");
    assert_eq!(take_lines(), ["D (0) wifi: scan\n"]);
}

#[test]
fn test_set_then_get_for_every_level() {
    let log = test_core_with(plain_config().with_default_level(Level::Info));

    for level in Level::ALL {
        log.level_set("tag", level).unwrap();
        assert_eq!(log.level_get("tag"), level);
    }
}

#[test]
fn test_threshold_is_monotonic() {
    let log = test_core();

    for threshold in Level::ALL {
        log.level_set("mono", threshold).unwrap();
        for level in Level::ALL {
            let expected = level != Level::None && level <= threshold;
            assert_eq!(
                log.is_enabled(level, "mono"),
                expected,
                "level {level} under threshold {threshold}"
            );
        }
    }
}

#[test]
fn test_dynamic_level_change() {
    let log = test_core_with(plain_config().with_default_level(Level::Info));

    test_log!(log, Level::Debug, "app", "before");
    assert!(take_lines().is_empty());

    log.level_set("app", Level::Debug).unwrap();
    test_log!(log, Level::Debug, "app", "after");
    assert_eq!(take_lines().len(), 1);

    log.level_set("app", Level::None).unwrap();
    test_log!(log, Level::Error, "app", "muted");
    assert!(take_lines().is_empty());
}

#[test]
fn test_max_level_clamps_and_filters() {
    let log = test_core_with(plain_config().with_max_level(Level::Info));

    assert_eq!(log.default_level(), Level::Info);
    log.level_set("app", Level::Verbose).unwrap();
    assert_eq!(log.level_get("app"), Level::Info);

    test_log!(log, Level::Debug, "app", "capped");
    assert!(take_lines().is_empty());
}

#[test]
fn test_tags_are_case_sensitive() {
    let log = test_core_with(plain_config().with_default_level(Level::Error));
    log.level_set("Net", Level::Verbose).unwrap();

    test_log!(log, Level::Info, "net", "lower");
    test_log!(log, Level::Info, "Net", "upper");

    assert_eq!(take_lines(), ["I (0) Net: upper\n"]);
}

#[test]
fn test_registry_capacity_reported() {
    let log = test_core_with(plain_config().with_registry_capacity(1));
    log.level_set("a", Level::Error).unwrap();

    assert_eq!(
        log.level_set("b", Level::Error),
        Err(crate::LevelError::CapacityExceeded { capacity: 1 })
    );
    assert_eq!(log.level_set("", Level::Error), Err(crate::LevelError::EmptyTag));
    assert_eq!(log.level_get("a"), Level::Error);
    assert_eq!(log.level_get("b"), Level::Verbose);
}
