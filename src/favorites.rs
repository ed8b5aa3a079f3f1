// src/favorites.rs

//! Favourite-field persistence. A two-channel [`StateStore`] keeps keyed
//! values as plain files in a primary directory with a fallback directory
//! behind it; callers never branch on which channel served a read. The
//! favourites value is a deduplicated comma-delimited id list, with a JSON
//! array accepted on read for back compatibility. All storage failures are
//! logged and swallowed; the in-memory set stays usable either way.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::log_warn;

pub const FAVOURITES_KEY: &str = "fav_fields";
pub const PRESETS_KEY: &str = "presets";
pub const BOARD_OPEN_KEY: &str = "board_open";

/// Keyed file persistence over a primary and a fallback directory. Reads
/// try the primary first; writes go to both, best effort each.
#[derive(Debug, Clone)]
pub struct StateStore {
    primary: PathBuf,
    fallback: PathBuf,
}

impl StateStore {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    pub fn read(&self, key: &str) -> Option<String> {
        for dir in [&self.primary, &self.fallback] {
            match fs::read_to_string(dir.join(key)) {
                Ok(value) => return Some(value),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    log_warn!("Failed reading {} from {}: {}", key, dir.display(), e);
                }
            }
        }
        None
    }

    pub fn write(&self, key: &str, value: &str) {
        for dir in [&self.primary, &self.fallback] {
            let result = fs::create_dir_all(dir).and_then(|_| fs::write(dir.join(key), value));
            if let Err(e) = result {
                log_warn!("Failed writing {} to {}: {}", key, dir.display(), e);
            }
        }
    }

    /// Reads a `"1"`/`"0"` flag. Anything unexpected reads as absent.
    pub fn read_flag(&self, key: &str) -> Option<bool> {
        match self.read(key)?.trim() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        }
    }

    pub fn write_flag(&self, key: &str, value: bool) {
        self.write(key, if value { "1" } else { "0" });
    }
}

/// The persisted favourite-field set, cached in memory for the session.
#[derive(Debug)]
pub struct FavoritesStore {
    store: StateStore,
    favourites: HashSet<String>,
}

impl FavoritesStore {
    /// Loads the favourites set. Missing or corrupt data reads as empty.
    pub fn load(store: StateStore) -> Self {
        let favourites = match store.read(FAVOURITES_KEY) {
            Some(raw) => parse_id_list(&raw).into_iter().collect(),
            None => HashSet::new(),
        };
        Self { store, favourites }
    }

    pub fn favourites(&self) -> &HashSet<String> {
        &self.favourites
    }

    pub fn is_favourite(&self, id: &str) -> bool {
        self.favourites.contains(id)
    }

    pub fn len(&self) -> usize {
        self.favourites.len()
    }

    /// Flips membership for `id`, persists, and returns the new membership.
    /// The in-memory flip happens regardless of whether the write succeeds.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favourite = if self.favourites.remove(id) {
            false
        } else {
            self.favourites.insert(id.to_string());
            true
        };
        self.persist();
        now_favourite
    }

    fn persist(&self) {
        let mut ids: Vec<&str> = self.favourites.iter().map(String::as_str).collect();
        // order is irrelevant on read; sorting keeps the file stable
        ids.sort_unstable();
        self.store.write(FAVOURITES_KEY, &ids.join(","));
    }
}

/// Parses a persisted id list: CSV normally, a JSON array when the value
/// starts with `[`. Blank entries and duplicates are dropped; a corrupt
/// JSON payload reads as empty.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[') {
        return match serde_json::from_str::<Vec<String>>(trimmed) {
            Ok(ids) => dedup_ordered(ids),
            Err(e) => {
                log_warn!("Corrupt favourites payload, treating as empty: {}", e);
                Vec::new()
            }
        };
    }
    dedup_ordered(trimmed.split(',').map(str::trim).map(str::to_string))
}

fn dedup_ordered(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, StateStore) {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state"), dir.path().join("fallback"));
        (dir, store)
    }

    #[test]
    fn csv_and_json_encodings_read_identically() {
        assert_eq!(parse_id_list("a,b"), vec!["a", "b"]);
        assert_eq!(parse_id_list(r#"["a","b"]"#), vec!["a", "b"]);
    }

    #[test]
    fn parse_drops_blanks_and_duplicates() {
        assert_eq!(parse_id_list(" a , b ,, a ,"), vec!["a", "b"]);
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list("  ").is_empty());
    }

    #[test]
    fn corrupt_json_reads_as_empty() {
        assert!(parse_id_list("[not json").is_empty());
    }

    #[test]
    fn toggle_round_trips_to_the_original_set() {
        let (_dir, store) = temp_store();
        let mut favs = FavoritesStore::load(store.clone());
        let before = favs.favourites().clone();

        assert!(favs.toggle("claim_id"));
        assert!(favs.is_favourite("claim_id"));
        assert!(!favs.toggle("claim_id"));
        assert_eq!(favs.favourites(), &before);
    }

    #[test]
    fn favourites_survive_a_reload() {
        let (_dir, store) = temp_store();
        let mut favs = FavoritesStore::load(store.clone());
        favs.toggle("region");
        favs.toggle("city");

        let reloaded = FavoritesStore::load(store);
        assert!(reloaded.is_favourite("region"));
        assert!(reloaded.is_favourite("city"));
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn reads_fall_back_to_the_second_channel() {
        let (dir, store) = temp_store();
        let fallback = dir.path().join("fallback");
        fs::create_dir_all(&fallback).unwrap();
        fs::write(fallback.join(FAVOURITES_KEY), "ssn,vin").unwrap();

        let favs = FavoritesStore::load(store);
        assert!(favs.is_favourite("ssn"));
        assert!(favs.is_favourite("vin"));
    }

    #[test]
    fn write_failure_on_one_channel_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // a file where the primary directory should be makes that channel fail
        let blocked = dir.path().join("state");
        fs::write(&blocked, "in the way").unwrap();
        let store = StateStore::new(&blocked, dir.path().join("fallback"));

        let mut favs = FavoritesStore::load(store.clone());
        favs.toggle("zip_code");
        assert!(favs.is_favourite("zip_code"), "memory stays usable");

        // the fallback channel still took the write
        let reloaded = FavoritesStore::load(store);
        assert!(reloaded.is_favourite("zip_code"));
    }

    #[test]
    fn flags_round_trip() {
        let (_dir, store) = temp_store();
        assert_eq!(store.read_flag(BOARD_OPEN_KEY), None);
        store.write_flag(BOARD_OPEN_KEY, true);
        assert_eq!(store.read_flag(BOARD_OPEN_KEY), Some(true));
        store.write_flag(BOARD_OPEN_KEY, false);
        assert_eq!(store.read_flag(BOARD_OPEN_KEY), Some(false));
    }
}
