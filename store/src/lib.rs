//! Iron Progress Store Library
//!
//! Persisted stores for workouts, exercises, nutrition, goals and the user
//! profile, plus the wiring that connects them.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{StoreError, StoreResult};
