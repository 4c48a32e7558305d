//! Exercise catalog
//!
//! Provides:
//! - Catalog management (add, update, delete, lookup)
//! - Filtered view over search text, muscle groups, equipment and difficulty
//! - Reseeding from the static catalog when the stored list is empty

use crate::error::StoreResult;
use crate::storage::{Slot, SlotKey, SlotNamespace};
use iron_progress_shared::catalog::seed_exercises;
use iron_progress_shared::types::{ExerciseFilters, ExerciseUpdate, FilterUpdate};
use iron_progress_shared::Exercise;
use tracing::{debug, info};

/// Store for the user-extensible exercise catalog
pub struct ExerciseStore {
    slot: Slot<Vec<Exercise>>,
    exercises: Vec<Exercise>,
    filters: ExerciseFilters,
}

impl ExerciseStore {
    pub fn new(slots: &SlotNamespace) -> StoreResult<Self> {
        let mut store = Self {
            slot: slots.slot(SlotKey::Exercises, seed_exercises),
            exercises: Vec::new(),
            filters: ExerciseFilters::default(),
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read the catalog, reseeding it if the stored list is empty
    pub fn load(&mut self) -> StoreResult<()> {
        self.exercises = self.slot.read();
        if self.exercises.is_empty() {
            self.exercises = seed_exercises();
            info!(count = self.exercises.len(), "Reseeded empty exercise catalog");
            self.persist()?;
        }
        Ok(())
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Catalog entries matching every active filter
    pub fn filtered_exercises(&self) -> Vec<&Exercise> {
        if self.filters.is_empty() {
            return self.exercises.iter().collect();
        }
        self.exercises
            .iter()
            .filter(|exercise| self.filters.matches(exercise))
            .collect()
    }

    pub fn filters(&self) -> &ExerciseFilters {
        &self.filters
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search_query = query.into();
    }

    pub fn set_filters(&mut self, update: FilterUpdate) {
        update.apply_to(&mut self.filters);
    }

    pub fn clear_filters(&mut self) {
        self.filters = ExerciseFilters::default();
    }

    pub fn get_exercise_by_id(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Add an exercise under its own id
    ///
    /// Returns `false` without writing if the id is already taken.
    pub fn add_exercise(&mut self, exercise: Exercise) -> StoreResult<bool> {
        if self.get_exercise_by_id(&exercise.id).is_some() {
            debug!(id = %exercise.id, "Exercise id already exists");
            return Ok(false);
        }
        self.exercises.push(exercise);
        self.persist()?;
        Ok(true)
    }

    pub fn update_exercise(&mut self, id: &str, update: ExerciseUpdate) -> StoreResult<bool> {
        let Some(exercise) = self.exercises.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        update.apply_to(exercise);
        self.persist()?;
        Ok(true)
    }

    pub fn delete_exercise(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != id);
        self.persist()?;
        Ok(self.exercises.len() != before)
    }

    fn persist(&self) -> StoreResult<()> {
        self.slot.write(&self.exercises)
    }
}
