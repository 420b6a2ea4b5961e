//! Workout catalog - process-wide store of workout templates

pub mod seed;

use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::db::Storage;
use crate::workouts::{MuscleGroup, Workout};

pub use seed::seed_catalog;

/// Storage key of the catalog record, shared by every user
pub const CATALOG_KEY: &str = "treinofit_workouts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Authoritative list of workouts. Every mutation rewrites the whole record.
pub struct CatalogStore {
    storage: Rc<dyn Storage>,
    workouts: Vec<Workout>,
}

impl CatalogStore {
    /// Load the persisted catalog, or the seed when absent or unreadable
    pub fn load(storage: Rc<dyn Storage>) -> Self {
        let workouts = match storage.get(CATALOG_KEY) {
            Some(json) => match serde_json::from_str::<Vec<Workout>>(&json) {
                Ok(workouts) => workouts,
                Err(e) => {
                    warn!("stored catalog unreadable, using seed: {}", e);
                    seed_catalog()
                }
            },
            None => seed_catalog(),
        };
        info!("catalog loaded with {} workouts", workouts.len());
        Self { storage, workouts }
    }

    pub fn list(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Workouts whose group is in `groups`. An empty set matches everything.
    pub fn filter(&self, groups: &BTreeSet<MuscleGroup>) -> Vec<&Workout> {
        self.workouts
            .iter()
            .filter(|w| groups.is_empty() || groups.contains(&w.muscle_group))
            .collect()
    }

    /// Insert or replace by id. A blank id gets a fresh one.
    pub fn save(&mut self, workout: Workout) -> SaveOutcome {
        self.save_at(workout, Utc::now().timestamp_millis())
    }

    pub(crate) fn save_at(&mut self, mut workout: Workout, now_ms: i64) -> SaveOutcome {
        if workout.id.trim().is_empty() {
            workout.id = self.mint_id(workout.muscle_group, now_ms);
        }

        let outcome = match self.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(existing) => {
                *existing = workout;
                SaveOutcome::Updated
            }
            None => {
                self.workouts.push(workout);
                SaveOutcome::Created
            }
        };
        info!("catalog save: {:?}", outcome);
        self.persist();
        outcome
    }

    /// Remove by id. Scheduled copies in any plan are left alone.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        let removed = self.workouts.len() != before;
        if removed {
            info!("catalog delete: {}", id);
            self.persist();
        } else {
            debug!("catalog delete: {} not found", id);
        }
        removed
    }

    fn mint_id(&self, group: MuscleGroup, now_ms: i64) -> String {
        let mut stamp = now_ms;
        loop {
            let id = format!("{}-{}", group.slug(), stamp);
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }

    fn persist(&self) {
        match serde_json::to_string(&self.workouts) {
            Ok(json) => self.storage.set(CATALOG_KEY, &json),
            Err(e) => warn!("failed to serialize catalog: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::workouts::Exercise;

    fn store() -> CatalogStore {
        CatalogStore::load(Rc::new(MemoryStorage::new()))
    }

    fn create_workout(id: &str, group: MuscleGroup) -> Workout {
        Workout {
            id: id.to_string(),
            name: format!("Treino {}", id),
            muscle_group: group,
            description: String::new(),
            duration: "30 min".to_string(),
            exercises: vec![Exercise::new("Prancha", "3x30s")],
            media_url: None,
        }
    }

    #[test]
    fn test_load_falls_back_to_seed() {
        let catalog = store();
        assert_eq!(catalog.list(), seed_catalog().as_slice());
    }

    #[test]
    fn test_load_corrupt_record_falls_back_to_seed() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(CATALOG_KEY, "{not json");
        let catalog = CatalogStore::load(storage);
        assert_eq!(catalog.list().len(), seed_catalog().len());
    }

    #[test]
    fn test_load_normalizes_missing_group() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(CATALOG_KEY, r#"[{"id":"old","name":"Antigo","description":"","duration":"","exercises":[]}]"#);
        let catalog = CatalogStore::load(storage);
        assert_eq!(catalog.list().len(), 1);
        assert_eq!(catalog.list()[0].muscle_group, MuscleGroup::Custom);
    }

    #[test]
    fn test_load_keeps_records_with_empty_group() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(
            CATALOG_KEY,
            r#"[{"id":"mine","name":"Meu","muscleGroup":""},{"id":"other","name":"Outro","muscleGroup":"Ombros & Abs"}]"#,
        );
        let catalog = CatalogStore::load(storage);
        let ids: Vec<&str> = catalog.list().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["mine", "other"]);
        assert_eq!(catalog.get("mine").unwrap().muscle_group, MuscleGroup::Custom);
        assert_eq!(catalog.get("other").unwrap().muscle_group, MuscleGroup::ShouldersAbs);
    }

    #[test]
    fn test_delete_missing_does_not_write() {
        let storage = Rc::new(MemoryStorage::new());
        let mut catalog = CatalogStore::load(storage.clone());
        assert!(!catalog.delete("ghost"));
        assert_eq!(storage.get(CATALOG_KEY), None);

        assert!(catalog.delete("back-bi"));
        assert!(storage.get(CATALOG_KEY).is_some());
    }

    #[test]
    fn test_save_existing_id_replaces_in_place() {
        let mut catalog = store();
        let before: Vec<String> = catalog.list().iter().map(|w| w.id.clone()).collect();

        let mut edited = catalog.get("back-bi").unwrap().clone();
        edited.name = "Costas Largas".to_string();
        assert_eq!(catalog.save(edited), SaveOutcome::Updated);

        let after: Vec<String> = catalog.list().iter().map(|w| w.id.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(catalog.get("back-bi").unwrap().name, "Costas Largas");
    }

    #[test]
    fn test_save_new_id_appends() {
        let mut catalog = store();
        let len = catalog.list().len();
        assert_eq!(catalog.save(create_workout("abs-1", MuscleGroup::ShouldersAbs)), SaveOutcome::Created);
        assert_eq!(catalog.list().len(), len + 1);
        assert_eq!(catalog.list().last().unwrap().id, "abs-1");
    }

    #[test]
    fn test_save_blank_id_is_synthesized_unique() {
        let mut catalog = store();
        catalog.save_at(create_workout("", MuscleGroup::Custom), 1000);
        catalog.save_at(create_workout("", MuscleGroup::Custom), 1000);

        let ids: Vec<&str> = catalog.list().iter().rev().take(2).map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["custom-1001", "custom-1000"]);
    }

    #[test]
    fn test_save_persists_whole_catalog() {
        let storage = Rc::new(MemoryStorage::new());
        let mut catalog = CatalogStore::load(storage.clone());
        catalog.save(create_workout("abs-1", MuscleGroup::ShouldersAbs));

        let reloaded = CatalogStore::load(storage);
        assert_eq!(reloaded.list(), catalog.list());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut catalog = store();
        let len = catalog.list().len();
        assert!(!catalog.delete("ghost"));
        assert_eq!(catalog.list().len(), len);
        assert!(catalog.delete("legs-glute"));
        assert!(catalog.get("legs-glute").is_none());
    }

    #[test]
    fn test_filter_empty_set_returns_all() {
        let catalog = store();
        assert_eq!(catalog.filter(&BTreeSet::new()).len(), catalog.list().len());
    }

    #[test]
    fn test_filter_single_group_keeps_order() {
        let mut catalog = store();
        catalog.save(create_workout("legs-2", MuscleGroup::LegsGlutes));
        catalog.save(create_workout("chest-2", MuscleGroup::ChestTriceps));

        let groups = BTreeSet::from([MuscleGroup::LegsGlutes]);
        let ids: Vec<&str> = catalog.filter(&groups).iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["legs-glute", "legs-2"]);
    }
}
