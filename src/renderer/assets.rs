//! Symbolic name → image handle lookup
//!
//! Populated by an external (possibly async) loader before the first frame.

use std::collections::{HashMap, HashSet};

/// Opaque handle to an image owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Every image name the scene asks for
pub const ASSET_NAMES: &[&str] = &[
    "background",
    "intro",
    "player",
    "projectile",
    "enemy-cauliflower",
    "enemy-cabbage",
    "enemy-pumpkin",
    "enemy-turnip",
    "slow-icon",
    "remove-icon",
    "bonus-icon",
];

#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    images: HashMap<String, ImageHandle>,
    failed: HashSet<String>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successfully loaded image
    pub fn insert(&mut self, name: impl Into<String>, handle: ImageHandle) {
        let name = name.into();
        log::debug!("{} loaded successfully", name);
        self.failed.remove(&name);
        self.images.insert(name, handle);
    }

    /// Note a load failure; draws that need `name` will be skipped
    pub fn record_failure(&mut self, name: &str, reason: &str) {
        if self.failed.insert(name.to_string()) {
            log::error!("Failed to load image {}: {}", name, reason);
        }
    }

    pub fn get(&self, name: &str) -> Option<ImageHandle> {
        self.images.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Names that failed to load
    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.failed.iter().map(String::as_str)
    }

    /// Known names that have neither loaded nor failed yet
    pub fn pending(&self) -> Vec<&'static str> {
        ASSET_NAMES
            .iter()
            .copied()
            .filter(|name| !self.images.contains_key(*name) && !self.failed.contains(*name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_failure() {
        let mut assets = AssetTable::new();
        assets.insert("player", ImageHandle(1));
        assets.record_failure("projectile", "404");
        assets.record_failure("projectile", "404");

        assert_eq!(assets.get("player"), Some(ImageHandle(1)));
        assert_eq!(assets.get("projectile"), None);
        assert_eq!(assets.failed().collect::<Vec<_>>(), vec!["projectile"]);
        assert!(!assets.pending().contains(&"player"));
        assert!(!assets.pending().contains(&"projectile"));
        assert!(assets.pending().contains(&"background"));
    }

    #[test]
    fn test_late_load_clears_failure() {
        let mut assets = AssetTable::new();
        assets.record_failure("intro", "timeout");
        assets.insert("intro", ImageHandle(9));
        assert_eq!(assets.failed().count(), 0);
        assert_eq!(assets.len(), 1);
    }
}
