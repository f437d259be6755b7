//! Per-tag level registry
//!
//! Resolves the effective level for a tag: its explicit entry when one
//! exists, the default level otherwise. The wildcard tag `"*"` replaces the
//! default level and leaves explicit entries alone.
//!
//! Lookups take no lock while the registry holds no explicit entries, so the
//! common case stays a single atomic load and works before a heap exists.

use alloc::string::String;
use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use hashbrown::HashMap;
use spin::RwLock;

use crate::error::LevelError;
use crate::level::Level;

/// Tag that addresses the default level.
pub const WILDCARD: &str = "*";

/// Level thresholds keyed by tag.
pub struct LevelRegistry {
    /// Level for tags without an entry
    default_level: AtomicU8,
    /// Clamp applied to every stored level
    max_level: Level,
    /// Bound on explicit entries
    capacity: usize,
    /// Mirror of `entries.len()`; zero lets `get` skip the map
    explicit: AtomicUsize,
    entries: RwLock<HashMap<String, Level>>,
}

impl LevelRegistry {
    /// Creates an empty registry. `default_level` is clamped to `max_level`.
    pub fn new(default_level: Level, max_level: Level, capacity: usize) -> Self {
        Self {
            default_level: AtomicU8::new(default_level.min(max_level) as u8),
            max_level,
            capacity,
            explicit: AtomicUsize::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Sets the level for `tag`, or the default level when `tag` is `"*"`.
    ///
    /// Levels above the clamp are silently lowered to it. Overwriting an
    /// existing tag always succeeds; a new tag is rejected once the registry
    /// holds `capacity` entries, and no existing entry is touched.
    pub fn set(&self, tag: &str, level: Level) -> Result<(), LevelError> {
        if tag.is_empty() {
            return Err(LevelError::EmptyTag);
        }
        let level = level.min(self.max_level);

        if tag == WILDCARD {
            self.default_level.store(level as u8, Ordering::Release);
            return Ok(());
        }

        let mut entries = self.entries.write();
        if let Some(slot) = entries.get_mut(tag) {
            *slot = level;
            return Ok(());
        }
        if entries.len() >= self.capacity {
            return Err(LevelError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        entries.insert(String::from(tag), level);
        self.explicit.store(entries.len(), Ordering::Release);
        Ok(())
    }

    /// Effective level for `tag`.
    #[inline]
    pub fn get(&self, tag: &str) -> Level {
        if self.explicit.load(Ordering::Acquire) != 0 {
            if let Some(level) = self.entries.read().get(tag) {
                return *level;
            }
        }
        self.default_level()
    }

    /// Current default level.
    #[inline]
    pub fn default_level(&self) -> Level {
        Level::from_u8(self.default_level.load(Ordering::Acquire))
    }

    /// The clamp applied by [`set`](Self::set).
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.explicit.load(Ordering::Acquire)
    }

    /// True when no tag has an explicit entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every explicit entry and reinstates `default_level`.
    pub fn clear(&self, default_level: Level) {
        let mut entries = self.entries.write();
        entries.clear();
        self.explicit.store(0, Ordering::Release);
        self.default_level
            .store(default_level.min(self.max_level) as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_entry_overrides_default() {
        let registry = LevelRegistry::new(Level::Info, Level::Verbose, 4);
        assert_eq!(registry.get("wifi"), Level::Info);

        registry.set("wifi", Level::Error).unwrap();
        assert_eq!(registry.get("wifi"), Level::Error);
        assert_eq!(registry.get("WIFI"), Level::Info, "lookup is case-sensitive");
    }

    #[test]
    fn test_wildcard_keeps_explicit_entries() {
        let registry = LevelRegistry::new(Level::Info, Level::Verbose, 4);
        registry.set("uart", Level::Debug).unwrap();
        registry.set(WILDCARD, Level::Warn).unwrap();

        assert_eq!(registry.default_level(), Level::Warn);
        assert_eq!(registry.get("uart"), Level::Debug);
        assert_eq!(registry.get("spi"), Level::Warn);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clamp_to_max_level() {
        let registry = LevelRegistry::new(Level::Verbose, Level::Info, 4);
        assert_eq!(registry.default_level(), Level::Info);

        registry.set("gpio", Level::Verbose).unwrap();
        assert_eq!(registry.get("gpio"), Level::Info);
    }

    #[test]
    fn test_capacity_rejects_new_tags_only() {
        let registry = LevelRegistry::new(Level::Info, Level::Verbose, 2);
        registry.set("a", Level::Error).unwrap();
        registry.set("b", Level::Warn).unwrap();

        assert_eq!(
            registry.set("c", Level::Debug),
            Err(LevelError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(registry.get("c"), Level::Info);
        assert_eq!(registry.get("a"), Level::Error);

        // 覆盖已有条目不受容量限制
        registry.set("b", Level::Verbose).unwrap();
        assert_eq!(registry.get("b"), Level::Verbose);
        // 通配符同样不占用条目
        registry.set(WILDCARD, Level::Error).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_tag_rejected() {
        let registry = LevelRegistry::new(Level::Info, Level::Verbose, 2);
        assert_eq!(registry.set("", Level::Debug), Err(LevelError::EmptyTag));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_restores_default() {
        let registry = LevelRegistry::new(Level::Info, Level::Verbose, 2);
        registry.set("a", Level::Error).unwrap();
        registry.set(WILDCARD, Level::None).unwrap();

        registry.clear(Level::Debug);
        assert!(registry.is_empty());
        assert_eq!(registry.get("a"), Level::Debug);
    }
}
