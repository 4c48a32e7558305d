//! Stores
//!
//! Each store owns one or more persisted slots, keeps the current collection
//! in memory and writes it back after every mutation. Stores that depend on
//! others receive them at construction as [`Shared`] handles.

pub mod exercise;
pub mod goals;
pub mod nutrition;
pub mod user;
pub mod workout;

pub use exercise::ExerciseStore;
pub use goals::GoalStore;
pub use nutrition::NutritionStore;
pub use user::UserStore;
pub use workout::WorkoutStore;

use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Single-threaded shared handle to a store
pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Fresh record id, e.g. `workout-5f0c...`
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
