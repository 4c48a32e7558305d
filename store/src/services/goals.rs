//! Goal tracking
//!
//! Goal progress is derived from workout history and user stats:
//! - workouts_per_month: completed workouts in the current calendar month
//! - workouts_per_week: completed workouts in the current calendar week
//! - volume_per_month: training volume of this month's completed workouts
//! - streak_days: the streak recorded in user stats
//!
//! A goal is completed when `current >= target`.

use super::{new_id, Shared, UserStore, WorkoutStore};
use crate::clock::Clock;
use crate::error::StoreResult;
use crate::storage::{Slot, SlotKey, SlotNamespace};
use iron_progress_shared::calendar::month_range;
use iron_progress_shared::types::{GoalUpdate, NewGoal};
use iron_progress_shared::{Goal, GoalType};
use std::rc::Rc;
use tracing::{debug, warn};

/// Store for progress goals
pub struct GoalStore {
    slot: Slot<Vec<Goal>>,
    goals: Vec<Goal>,
    workouts: Shared<WorkoutStore>,
    users: Shared<UserStore>,
    clock: Rc<dyn Clock>,
}

impl GoalStore {
    pub fn new(
        slots: &SlotNamespace,
        workouts: Shared<WorkoutStore>,
        users: Shared<UserStore>,
        clock: Rc<dyn Clock>,
    ) -> StoreResult<Self> {
        let mut store = Self {
            slot: slots.slot(SlotKey::Goals, Vec::new),
            goals: Vec::new(),
            workouts,
            users,
            clock,
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read goals and recompute progress for all of them
    pub fn load(&mut self) -> StoreResult<()> {
        self.goals = self.slot.read();
        self.update_goal_progress(None)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get_goal_by_id(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn active_goals(&self) -> Vec<&Goal> {
        self.goals.iter().filter(|g| !g.completed).collect()
    }

    pub fn completed_goals(&self) -> Vec<&Goal> {
        self.goals.iter().filter(|g| g.completed).collect()
    }

    /// Create a goal with zero progress, then compute its progress
    pub fn add_goal(&mut self, input: NewGoal) -> StoreResult<Goal> {
        let mut goal = Goal {
            id: new_id("goal"),
            period: input.goal_type.period(),
            goal_type: input.goal_type,
            target: input.target,
            current: 0.0,
            created_at: self.clock.now(),
            deadline: input.deadline,
            completed: false,
        };
        let current = self.compute_progress(&goal.goal_type);
        record_progress(&mut goal, current);

        self.goals.push(goal.clone());
        self.slot.write(&self.goals)?;
        Ok(goal)
    }

    /// Merge editable fields and recompute progress
    ///
    /// Changing the type also changes the reporting period.
    pub fn update_goal(&mut self, id: &str, update: GoalUpdate) -> StoreResult<bool> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };
        if let Some(goal_type) = update.goal_type {
            goal.period = goal_type.period();
            goal.goal_type = goal_type;
        }
        if let Some(target) = update.target {
            goal.target = target;
        }
        if let Some(deadline) = update.deadline {
            goal.deadline = deadline;
        }
        self.update_goal_progress(Some(id))?;
        Ok(true)
    }

    pub fn delete_goal(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.slot.write(&self.goals)?;
        Ok(self.goals.len() != before)
    }

    /// Recompute `current` and `completed` for one goal, or all when `None`
    ///
    /// Goals of an unrecognized type are left as they are.
    pub fn update_goal_progress(&mut self, goal_id: Option<&str>) -> StoreResult<()> {
        let mut updated = 0usize;
        for index in 0..self.goals.len() {
            if goal_id.is_some_and(|id| self.goals[index].id != id) {
                continue;
            }
            let current = self.compute_progress(&self.goals[index].goal_type);
            if record_progress(&mut self.goals[index], current) {
                updated += 1;
            }
        }

        debug!(updated, total = self.goals.len(), "Goal progress recomputed");
        self.slot.write(&self.goals)
    }

    fn compute_progress(&self, goal_type: &GoalType) -> Option<f64> {
        let today = self.clock.today();
        let workouts = self.workouts.borrow();

        let current = match goal_type {
            GoalType::WorkoutsPerMonth => workouts.completed_count_in(month_range(today)) as f64,
            GoalType::WorkoutsPerWeek => workouts.completed_count_in(workouts.current_week()) as f64,
            GoalType::VolumePerMonth => workouts.completed_volume_in(month_range(today)),
            GoalType::StreakDays => f64::from(self.users.borrow().stats().streak_days),
            GoalType::Unknown(_) => return None,
        };
        Some(current)
    }
}

/// Store computed progress on `goal`; `None` leaves it untouched
fn record_progress(goal: &mut Goal, current: Option<f64>) -> bool {
    let Some(current) = current else {
        warn!(
            id = %goal.id,
            goal_type = goal.goal_type.as_str(),
            "Goal has an unrecognized type, progress left unchanged"
        );
        return false;
    };
    goal.current = current;
    goal.completed = current >= goal.target;
    true
}
