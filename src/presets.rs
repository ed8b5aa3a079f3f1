// src/presets.rs

//! Named field-sets with usage metadata, persisted as JSON through the
//! state store. Presets drive the form purely through its activation
//! surface; they never reach into column internals, so placement follows
//! the same first-fit rules as a hand toggle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::favorites::{StateStore, PRESETS_KEY};
use crate::form::FormManager;
use crate::{log_info, log_warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub field_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_count: u32,
}

pub struct PresetManager {
    store: StateStore,
    presets: Vec<Preset>,
}

impl PresetManager {
    /// Loads saved presets. A missing value starts empty; a corrupt payload
    /// is logged and discarded rather than blocking startup.
    pub fn load(store: StateStore) -> Self {
        let presets = match store.read(PRESETS_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(presets) => presets,
                Err(e) => {
                    log_warn!("Discarding corrupt presets payload: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self { store, presets }
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    /// Snapshots the currently placed fields as a new preset. An empty form
    /// captures nothing.
    pub fn capture(&mut self, name: &str, category: &str, form: &FormManager) -> Option<&Preset> {
        let field_ids = form.active_field_ids();
        if field_ids.is_empty() {
            log_warn!("Refusing to capture a preset with no active fields");
            return None;
        }
        let name = name.trim();
        let preset = Preset {
            id: Uuid::new_v4(),
            name: if name.is_empty() { "untitled" } else { name }.to_string(),
            category: category.trim().to_string(),
            field_ids,
            created_at: Utc::now(),
            last_used: None,
            usage_count: 0,
        };
        log_info!("Captured preset {} ({} fields)", preset.name, preset.field_ids.len());
        self.presets.push(preset);
        self.persist();
        self.presets.last()
    }

    /// Applies the preset at `index`: afterwards exactly its known ids are
    /// active. Ids missing from the catalog are skipped with a warning.
    /// Bumps the usage metadata on success.
    pub fn apply(&mut self, index: usize, form: &mut FormManager) -> bool {
        let Some(preset) = self.presets.get_mut(index) else {
            return false;
        };
        for id in form.active_field_ids() {
            if !preset.field_ids.contains(&id) {
                form.deactivate_field(&id);
            }
        }
        for id in &preset.field_ids {
            if form.entry(id).is_none() {
                log_warn!("Preset {} references unknown field {}", preset.name, id);
                continue;
            }
            form.activate_field(id);
        }
        preset.usage_count += 1;
        preset.last_used = Some(Utc::now());
        self.persist();
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<Preset> {
        if index >= self.presets.len() {
            return None;
        }
        let removed = self.presets.remove(index);
        self.persist();
        Some(removed)
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.presets) {
            Ok(json) => self.store.write(PRESETS_KEY, &json),
            Err(e) => log_warn!("Failed to serialize presets: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldDescriptor, FieldKind};
    use crate::config::FieldboardConfig;
    use crate::favorites::FavoritesStore;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> StateStore {
        StateStore::new(dir.path().join("a"), dir.path().join("b"))
    }

    fn form(dir: &TempDir, ids: &[&str]) -> FormManager {
        let catalog = ids
            .iter()
            .map(|id| FieldDescriptor::new(id, id, FieldKind::Text))
            .collect();
        let config = FieldboardConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        FormManager::new(catalog, FavoritesStore::load(store(dir)), &config)
    }

    #[test]
    fn capture_snapshots_active_fields_in_order() {
        let dir = TempDir::new().unwrap();
        let mut form = form(&dir, &["alpha", "beta", "gamma"]);
        form.activate_field("gamma");
        form.activate_field("alpha");

        let mut presets = PresetManager::load(store(&dir));
        let preset = presets.capture("Claims", "insurance", &form).unwrap();
        assert_eq!(preset.field_ids, vec!["gamma", "alpha"]);
        assert_eq!(preset.usage_count, 0);
        assert!(preset.last_used.is_none());
    }

    #[test]
    fn capture_with_empty_form_is_refused() {
        let dir = TempDir::new().unwrap();
        let form = form(&dir, &["alpha"]);
        let mut presets = PresetManager::load(store(&dir));
        assert!(presets.capture("Empty", "", &form).is_none());
        assert!(presets.is_empty());
    }

    #[test]
    fn apply_activates_exactly_the_preset_fields() {
        let dir = TempDir::new().unwrap();
        let mut form = form(&dir, &["alpha", "beta", "gamma"]);
        form.activate_field("alpha");
        form.activate_field("beta");

        let mut presets = PresetManager::load(store(&dir));
        presets.capture("Pair", "", &form).unwrap();

        // change the form, then restore it from the preset
        form.deactivate_field("alpha");
        form.activate_field("gamma");
        form.on_tick();
        assert_eq!(form.active_field_ids(), vec!["beta", "gamma"]);

        assert!(presets.apply(0, &mut form));
        form.on_tick();
        let mut active = form.active_field_ids();
        active.sort();
        assert_eq!(active, vec!["alpha", "beta"]);
        assert_eq!(presets.get(0).unwrap().usage_count, 1);
        assert!(presets.get(0).unwrap().last_used.is_some());
    }

    #[test]
    fn apply_skips_unknown_ids() {
        let dir = TempDir::new().unwrap();
        let mut form = form(&dir, &["alpha"]);
        form.activate_field("alpha");

        let mut presets = PresetManager::load(store(&dir));
        presets.capture("One", "", &form).unwrap();
        presets.presets[0].field_ids.push("ghost".to_string());

        assert!(presets.apply(0, &mut form));
        assert_eq!(form.active_field_ids(), vec!["alpha"]);
    }

    #[test]
    fn apply_out_of_range_is_refused() {
        let dir = TempDir::new().unwrap();
        let mut form = form(&dir, &["alpha"]);
        let mut presets = PresetManager::load(store(&dir));
        assert!(!presets.apply(0, &mut form));
    }

    #[test]
    fn presets_round_trip_through_the_store() {
        let dir = TempDir::new().unwrap();
        let mut form = form(&dir, &["alpha", "beta"]);
        form.activate_field("beta");

        let mut presets = PresetManager::load(store(&dir));
        let id = presets.capture("Saved", "ops", &form).unwrap().id;

        let reloaded = PresetManager::load(store(&dir));
        assert_eq!(reloaded.len(), 1);
        let preset = reloaded.get(0).unwrap();
        assert_eq!(preset.id, id);
        assert_eq!(preset.name, "Saved");
        assert_eq!(preset.category, "ops");
        assert_eq!(preset.field_ids, vec!["beta"]);
    }

    #[test]
    fn remove_deletes_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut form = form(&dir, &["alpha"]);
        form.activate_field("alpha");

        let mut presets = PresetManager::load(store(&dir));
        presets.capture("A", "", &form).unwrap();
        presets.capture("B", "", &form).unwrap();
        let removed = presets.remove(0).unwrap();
        assert_eq!(removed.name, "A");

        let reloaded = PresetManager::load(store(&dir));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(0).unwrap().name, "B");
        assert!(presets.remove(5).is_none());
    }

    #[test]
    fn corrupt_payload_starts_empty() {
        let dir = TempDir::new().unwrap();
        store(&dir).write(PRESETS_KEY, "{not json");
        let presets = PresetManager::load(store(&dir));
        assert!(presets.is_empty());
    }
}
