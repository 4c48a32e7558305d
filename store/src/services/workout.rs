//! Workout sessions and plans
//!
//! Provides:
//! - Workout logging (add, update, complete, delete)
//! - Derived views: today's workout, nearest upcoming, completed, this week
//! - Weekly summaries
//! - Export/import snapshots
//!
//! Every workout mutation recomputes the user's statistics before returning.

use super::{new_id, Shared, UserStore};
use crate::clock::Clock;
use crate::error::StoreResult;
use crate::storage::{Slot, SlotKey, SlotNamespace};
use chrono::NaiveDate;
use iron_progress_shared::calendar::{week_range, DateRange, WeekStart};
use iron_progress_shared::training::{completed_in_range, completed_volume};
use iron_progress_shared::types::{
    NewWorkout, NewWorkoutPlan, StatsUpdate, WeekSummary, WorkoutExport, WorkoutImport,
    WorkoutUpdate,
};
use iron_progress_shared::{Workout, WorkoutPlan};
use std::rc::Rc;
use tracing::{debug, info};

/// Store for workout sessions and workout plans
pub struct WorkoutStore {
    workouts_slot: Slot<Vec<Workout>>,
    plans_slot: Slot<Vec<WorkoutPlan>>,
    workouts: Vec<Workout>,
    plans: Vec<WorkoutPlan>,
    users: Shared<UserStore>,
    clock: Rc<dyn Clock>,
    week_start: WeekStart,
}

impl WorkoutStore {
    pub fn new(
        slots: &SlotNamespace,
        users: Shared<UserStore>,
        clock: Rc<dyn Clock>,
        week_start: WeekStart,
    ) -> StoreResult<Self> {
        let mut store = Self {
            workouts_slot: slots.slot(SlotKey::Workouts, Vec::new),
            plans_slot: slots.slot(SlotKey::Plans, Vec::new),
            workouts: Vec::new(),
            plans: Vec::new(),
            users,
            clock,
            week_start,
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read both slots and recompute statistics
    pub fn load(&mut self) -> StoreResult<()> {
        self.workouts = self.workouts_slot.read();
        self.plans = self.plans_slot.read();
        self.recompute_stats()
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn plans(&self) -> &[WorkoutPlan] {
        &self.plans
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// The workout dated today, if any
    pub fn today_workout(&self) -> Option<&Workout> {
        let today = self.clock.today();
        self.workouts.iter().find(|w| w.date == today)
    }

    /// Earliest incomplete workout dated today or later
    ///
    /// Among workouts on the same date the first one logged wins.
    pub fn nearest_workout(&self) -> Option<&Workout> {
        let today = self.clock.today();
        self.workouts
            .iter()
            .filter(|w| !w.completed && w.date >= today)
            .min_by_key(|w| w.date)
    }

    pub fn completed_workouts(&self) -> Vec<&Workout> {
        self.workouts.iter().filter(|w| w.completed).collect()
    }

    /// Current calendar week, per the configured week start
    pub fn current_week(&self) -> DateRange {
        week_range(self.clock.today(), self.week_start)
    }

    pub fn this_week_workouts(&self) -> Vec<&Workout> {
        self.workouts_in_range(self.current_week())
    }

    pub fn workouts_in_range(&self, range: DateRange) -> Vec<&Workout> {
        self.workouts
            .iter()
            .filter(|w| range.contains(w.date))
            .collect()
    }

    /// Number of completed workouts dated inside `range`
    pub fn completed_count_in(&self, range: DateRange) -> usize {
        completed_in_range(&self.workouts, range).count()
    }

    /// Training volume of completed workouts dated inside `range`
    pub fn completed_volume_in(&self, range: DateRange) -> f64 {
        completed_volume(completed_in_range(&self.workouts, range))
    }

    pub fn get_workout_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn workouts_by_date(&self, date: NaiveDate) -> Vec<&Workout> {
        self.workouts.iter().filter(|w| w.date == date).collect()
    }

    /// Get weekly summary for the current week
    ///
    /// Totals cover every workout in the week; volume only completed ones.
    pub fn week_summary(&self) -> WeekSummary {
        let week = self.current_week();
        let workouts = self.workouts_in_range(week);

        WeekSummary {
            week,
            total_workouts: workouts.len(),
            completed_workouts: workouts.iter().filter(|w| w.completed).count(),
            total_duration_minutes: workouts.iter().map(|w| w.duration).sum(),
            completed_volume: completed_volume(workouts.iter().copied()),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn add_workout(&mut self, input: NewWorkout) -> StoreResult<Workout> {
        let workout = input.into_workout(new_id("workout"));
        debug!(id = %workout.id, date = %workout.date, "Adding workout");
        self.workouts.push(workout.clone());
        self.persist_workouts()?;
        self.recompute_stats()?;
        Ok(workout)
    }

    /// Merge `update` into the workout with `id`
    ///
    /// Returns `false` and changes nothing when the id is unknown.
    pub fn update_workout(&mut self, id: &str, update: WorkoutUpdate) -> StoreResult<bool> {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id == id) else {
            return Ok(false);
        };
        update.apply_to(workout);
        self.persist_workouts()?;
        self.recompute_stats()?;
        Ok(true)
    }

    pub fn complete_workout(&mut self, id: &str) -> StoreResult<bool> {
        self.update_workout(id, WorkoutUpdate::completed())
    }

    pub fn delete_workout(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        self.persist_workouts()?;
        self.recompute_stats()?;
        Ok(self.workouts.len() != before)
    }

    pub fn add_plan(&mut self, input: NewWorkoutPlan) -> StoreResult<WorkoutPlan> {
        let plan = WorkoutPlan {
            id: new_id("workout-plan"),
            name: input.name,
            workouts: input.workouts,
            start_date: input.start_date,
            end_date: input.end_date,
        };
        self.plans.push(plan.clone());
        self.plans_slot.write(&self.plans)?;
        Ok(plan)
    }

    pub fn delete_plan(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        self.plans_slot.write(&self.plans)?;
        Ok(self.plans.len() != before)
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn export_data(&self) -> WorkoutExport {
        WorkoutExport {
            workouts: self.workouts.clone(),
            plans: self.plans.clone(),
            export_date: self.clock.now(),
        }
    }

    /// Replace whichever collections are present, then recompute statistics
    pub fn import_data(&mut self, data: WorkoutImport) -> StoreResult<()> {
        if let Some(workouts) = data.workouts {
            self.workouts = workouts;
            self.persist_workouts()?;
        }
        if let Some(plans) = data.plans {
            self.plans = plans;
            self.plans_slot.write(&self.plans)?;
        }
        info!(
            workouts = self.workouts.len(),
            plans = self.plans.len(),
            "Imported workout data"
        );
        self.recompute_stats()
    }

    /// Recompute totals over completed workouts and write them to the user store
    pub fn recompute_stats(&self) -> StoreResult<()> {
        let total_workouts = self.workouts.iter().filter(|w| w.completed).count();
        let total_volume = completed_volume(&self.workouts);

        self.users.borrow_mut().update_stats(StatsUpdate {
            total_workouts: Some(u32::try_from(total_workouts).unwrap_or(u32::MAX)),
            total_volume: Some(total_volume),
            ..StatsUpdate::default()
        })
    }

    fn persist_workouts(&self) -> StoreResult<()> {
        self.workouts_slot.write(&self.workouts)
    }
}
