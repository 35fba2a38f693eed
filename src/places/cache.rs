//! File-based place-details cache at ~/.placekit/cache.json.
//!
//! TTL: 30 days. Keys are provider place ids, stored verbatim.
//! Unreadable or malformed files degrade to an empty cache.

use super::types::AddressComponent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const CACHE_TTL_MS: i64 = 30 * 24 * 3600 * 1000; // 30 days in ms

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    components: Vec<AddressComponent>,
    timestamp: i64,
}

/// The place-details cache.
pub struct PlaceCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl PlaceCache {
    /// Load the cache from the default location (~/.placekit/cache.json).
    pub fn load() -> Self {
        let path = Self::default_path();
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    /// Load the cache from a specific path (for testing).
    pub fn load_from(path: PathBuf) -> Self {
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".placekit")
            .join("cache.json")
    }

    fn read_file(path: &PathBuf) -> Option<HashMap<String, CacheEntry>> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Look up a place id. Returns None if missing or expired.
    pub fn get(&self, place_id: &str) -> Option<Vec<AddressComponent>> {
        let entry = self.entries.get(place_id)?;

        let now = chrono::Utc::now().timestamp_millis();
        if now - entry.timestamp > CACHE_TTL_MS {
            return None; // expired
        }

        Some(entry.components.clone())
    }

    /// Store fetched components and persist to disk.
    pub fn put(&mut self, place_id: &str, components: &[AddressComponent]) {
        let entry = CacheEntry {
            components: components.to_vec(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        self.entries.insert(place_id.to_string(), entry);
        self.persist();
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(&self.entries) {
            let _ = fs::write(&self.path, json);
        }
    }

    /// Number of entries (for testing).
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_cache() -> (PlaceCache, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        (PlaceCache::load_from(path), dir)
    }

    fn sample_components() -> Vec<AddressComponent> {
        vec![
            AddressComponent {
                long_name: "Brooklyn".into(),
                short_name: "Brooklyn".into(),
                types: vec!["sublocality_level_1".into(), "sublocality".into()],
            },
            AddressComponent {
                long_name: "11206".into(),
                short_name: "11206".into(),
                types: vec!["postal_code".into()],
            },
        ]
    }

    #[test]
    fn test_cache_put_get() {
        let (mut cache, _dir) = test_cache();
        cache.put("place-123", &sample_components());

        let components = cache.get("place-123").unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].long_name, "Brooklyn");
        assert_eq!(components[1].types, vec!["postal_code".to_string()]);
    }

    #[test]
    fn test_cache_miss() {
        let (cache, _dir) = test_cache();
        assert!(cache.get("nonexistent").is_none());
    }

    #[test]
    fn test_cache_keys_are_exact() {
        // Place ids are opaque and case-sensitive; no normalization.
        let (mut cache, _dir) = test_cache();
        cache.put("ChIJabc", &sample_components());
        assert!(cache.get("chijabc").is_none());
        assert!(cache.get("ChIJabc").is_some());
    }

    #[test]
    fn test_cache_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");

        // Write
        {
            let mut cache = PlaceCache::load_from(path.clone());
            cache.put("place-tokyo", &sample_components());
        }

        // Read back
        let cache2 = PlaceCache::load_from(path);
        let components = cache2.get("place-tokyo").unwrap();
        assert_eq!(components[0].long_name, "Brooklyn");
        assert_eq!(cache2.len(), 1);
    }

    #[test]
    fn test_cache_expired_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let stale = r#"{
            "place-old": {
                "components": [
                    {"long_name": "Oslo", "short_name": "Oslo", "types": ["locality"]}
                ],
                "timestamp": 0
            }
        }"#;
        fs::write(&path, stale).unwrap();

        let cache = PlaceCache::load_from(path);
        assert!(cache.get("place-old").is_none());
        assert_eq!(cache.len(), 1); // still on disk, just not served
    }

    #[test]
    fn test_cache_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();

        let cache = PlaceCache::load_from(path);
        assert_eq!(cache.len(), 0);
    }
}
