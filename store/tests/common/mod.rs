//! Common test utilities for integration tests
//!
//! Builds an `AppState` over in-memory storage and a pinned clock.

#![allow(dead_code)]

use chrono::NaiveDate;
use iron_progress_shared::types::NewWorkout;
use iron_progress_shared::WorkoutExercise;
use iron_progress_store::clock::FixedClock;
use iron_progress_store::config::AppConfig;
use iron_progress_store::state::AppState;
use iron_progress_store::storage::MemoryStorage;
use std::rc::Rc;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
    pub storage: Rc<MemoryStorage>,
    pub clock: Rc<FixedClock>,
}

impl TestApp {
    /// Fresh installation on Wednesday 2024-06-12
    pub fn new() -> Self {
        Self::on(date(2024, 6, 12))
    }

    pub fn on(today: NaiveDate) -> Self {
        let storage = Rc::new(MemoryStorage::new());
        let clock = Rc::new(FixedClock::on(today));
        let state = AppState::new(storage.clone(), clock.clone(), &test_config())
            .expect("Failed to build state");
        Self {
            state,
            storage,
            clock,
        }
    }

    /// A second state over the same storage, as after a restart
    pub fn reopen(&self) -> AppState {
        AppState::new(self.storage.clone(), self.clock.clone(), &test_config())
            .expect("Failed to reopen state")
    }

    pub fn log_workout(&self, input: NewWorkout) -> String {
        self.state
            .workouts
            .borrow_mut()
            .add_workout(input)
            .expect("Failed to add workout")
            .id
    }

    pub fn total_volume(&self) -> f64 {
        self.state.users.borrow().stats().total_volume
    }

    pub fn total_workouts(&self) -> u32 {
        self.state.users.borrow().stats().total_workouts
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::default()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn lift(exercise_id: &str, weight: Option<f64>, reps: u32, sets: u32) -> WorkoutExercise {
    WorkoutExercise {
        exercise_id: exercise_id.to_string(),
        sets,
        reps,
        weight,
        duration: None,
        rest_time: None,
        completed: None,
    }
}

pub fn session(on: NaiveDate, completed: bool, exercises: Vec<WorkoutExercise>) -> NewWorkout {
    NewWorkout {
        date: on,
        exercises,
        duration: 60,
        completed,
        notes: None,
        workout_type: None,
    }
}
