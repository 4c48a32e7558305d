//! Data models for the Iron Progress application
//!
//! Field names serialize in camelCase so persisted slots and exported
//! snapshots keep the shape the web client has always written.

use crate::errors::DomainError;
use crate::nutrition::NutritionGoal;
use crate::units::UnitSystem;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// User
// ============================================================================

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub units: UnitSystem,
    pub notifications: bool,
    pub sound_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_goal: Option<NutritionGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<u32>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            units: UnitSystem::Metric,
            notifications: true,
            sound_enabled: true,
            nutrition_goal: None,
            target_calories: None,
        }
    }
}

/// The single local user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Body weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in cm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: "user-1".to_string(),
            name: "Athlete".to_string(),
            email: None,
            avatar: None,
            weight: None,
            height: None,
            goals: Some(Vec::new()),
            preferences: Some(UserPreferences::default()),
        }
    }
}

/// Cumulative training statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_workouts: u32,
    /// Sum of weight x reps x sets over completed workouts, in kg
    pub total_volume: f64,
    #[serde(default)]
    pub personal_records: BTreeMap<String, f64>,
    #[serde(default)]
    pub streak_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_workout_date: Option<NaiveDate>,
}

// ============================================================================
// Exercise catalog
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Core,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Bodyweight,
    Kettlebell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Exercise definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_group: Vec<MuscleGroup>,
    pub equipment: Vec<Equipment>,
    pub difficulty: Difficulty,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// ============================================================================
// Workouts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Flexibility,
}

/// One exercise inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub exercise_id: String,
    pub sets: u32,
    pub reps: u32,
    /// Working weight in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Duration in seconds, for cardio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Rest between sets in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub date: NaiveDate,
    pub exercises: Vec<WorkoutExercise>,
    /// Total duration in minutes
    pub duration: u32,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<WorkoutType>,
}

/// Named sequence of workouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    pub workouts: Vec<Workout>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

// ============================================================================
// Goals
// ============================================================================

/// Goal type
///
/// Serialized as its snake_case tag. A tag this version does not recognize
/// is kept verbatim in `Unknown` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GoalType {
    WorkoutsPerMonth,
    WorkoutsPerWeek,
    VolumePerMonth,
    StreakDays,
    /// Unrecognized tag, as stored
    Unknown(String),
}

impl GoalType {
    /// Reporting period implied by the goal type
    pub fn period(&self) -> GoalPeriod {
        match self {
            GoalType::WorkoutsPerMonth | GoalType::VolumePerMonth => GoalPeriod::Month,
            GoalType::WorkoutsPerWeek => GoalPeriod::Week,
            GoalType::StreakDays | GoalType::Unknown(_) => GoalPeriod::All,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GoalType::WorkoutsPerMonth => "workouts_per_month",
            GoalType::WorkoutsPerWeek => "workouts_per_week",
            GoalType::VolumePerMonth => "volume_per_month",
            GoalType::StreakDays => "streak_days",
            GoalType::Unknown(tag) => tag,
        }
    }
}

/// Parses recognized tags only
impl std::str::FromStr for GoalType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workouts_per_month" => Ok(GoalType::WorkoutsPerMonth),
            "workouts_per_week" => Ok(GoalType::WorkoutsPerWeek),
            "volume_per_month" => Ok(GoalType::VolumePerMonth),
            "streak_days" => Ok(GoalType::StreakDays),
            _ => Err(DomainError::unknown("goal type", s)),
        }
    }
}

impl From<String> for GoalType {
    fn from(tag: String) -> Self {
        tag.parse().unwrap_or(GoalType::Unknown(tag))
    }
}

impl From<GoalType> for String {
    fn from(goal_type: GoalType) -> Self {
        match goal_type {
            GoalType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Month,
    Week,
    All,
}

/// Progress goal. `current` and `completed` are derived, never authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target: f64,
    pub current: f64,
    pub period: GoalPeriod,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub completed: bool,
}
