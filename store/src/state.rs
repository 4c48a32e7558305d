//! Application state
//!
//! Builds every store over one storage backend in dependency order:
//! users, exercises, workouts (writes user stats), nutrition, then goals
//! (reads workouts and user stats).

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::error::StoreResult;
use crate::services::{
    shared, ExerciseStore, GoalStore, NutritionStore, Shared, UserStore, WorkoutStore,
};
use crate::storage::{SlotNamespace, Storage};
use iron_progress_shared::types::{WeekSummary, WorkoutImport};
use iron_progress_shared::{DailyNutrition, Goal, UnitSystem, User, UserStats, WeightUnit, Workout};
use serde::Serialize;
use std::rc::Rc;
use tracing::info;

/// All stores of one installation
pub struct AppState {
    pub users: Shared<UserStore>,
    pub exercises: ExerciseStore,
    pub workouts: Shared<WorkoutStore>,
    pub nutrition: NutritionStore,
    pub goals: GoalStore,
    clock: Rc<dyn Clock>,
}

/// Point-in-time overview across all stores
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user: User,
    pub stats: UserStats,
    /// Total volume in `weight_unit`
    pub display_volume: f64,
    pub weight_unit: WeightUnit,
    pub units: UnitSystem,
    pub today_workout: Option<Workout>,
    pub nearest_workout: Option<Workout>,
    pub week: WeekSummary,
    pub today_nutrition: DailyNutrition,
    pub active_goals: Vec<Goal>,
    pub completed_goals: Vec<Goal>,
}

impl AppState {
    pub fn new(storage: Rc<dyn Storage>, clock: Rc<dyn Clock>, config: &AppConfig) -> StoreResult<Self> {
        let slots = SlotNamespace::new(storage, config.storage.key_prefix.clone());

        let users = shared(UserStore::new(&slots));
        let exercises = ExerciseStore::new(&slots)?;
        let workouts = shared(WorkoutStore::new(
            &slots,
            users.clone(),
            clock.clone(),
            config.calendar.week_start,
        )?);
        let nutrition = NutritionStore::new(&slots, clock.clone())?;
        let goals = GoalStore::new(&slots, workouts.clone(), users.clone(), clock.clone())?;

        info!(
            exercises = exercises.exercises().len(),
            workouts = workouts.borrow().workouts().len(),
            goals = goals.goals().len(),
            "Stores loaded"
        );

        Ok(Self {
            users,
            exercises,
            workouts,
            nutrition,
            goals,
            clock,
        })
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Sweep goal progress after workout or stats changes
    pub fn refresh_goals(&mut self) -> StoreResult<()> {
        self.goals.update_goal_progress(None)
    }

    /// Import a workout snapshot and bring goals up to date
    pub fn import_workouts(&mut self, data: WorkoutImport) -> StoreResult<()> {
        self.workouts.borrow_mut().import_data(data)?;
        self.refresh_goals()
    }

    pub fn dashboard(&self) -> Dashboard {
        let users = self.users.borrow();
        let workouts = self.workouts.borrow();
        let stats = users.stats().clone();
        let units = users.preferences().units;

        Dashboard {
            user: users.user().clone(),
            display_volume: units.weight_unit().from_kg(stats.total_volume),
            weight_unit: units.weight_unit(),
            stats,
            units,
            today_workout: workouts.today_workout().cloned(),
            nearest_workout: workouts.nearest_workout().cloned(),
            week: workouts.week_summary(),
            today_nutrition: self.nutrition.today_nutrition(),
            active_goals: self.goals.active_goals().into_iter().cloned().collect(),
            completed_goals: self.goals.completed_goals().into_iter().cloned().collect(),
        }
    }
}
