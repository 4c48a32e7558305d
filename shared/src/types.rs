//! Store input types: partial updates, new-record payloads, filters and
//! export snapshots

use crate::calendar::DateRange;
use crate::models::{
    Difficulty, Equipment, Exercise, GoalType, MuscleGroup, Theme, User, UserPreferences,
    UserStats, Workout, WorkoutExercise, WorkoutPlan, WorkoutType,
};
use crate::nutrition::{MealItem, MealTemplate, MealType, NutritionGoal, ProductCategory};
use crate::units::UnitSystem;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Reads a present field, `null` included, as `Some`
///
/// Paired with `#[serde(default)]`, an absent field stays `None` while an
/// explicit `null` becomes `Some(None)` and clears the target.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// User and stats
// ============================================================================

/// Partial update of the user profile. `None` leaves a field untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl UserUpdate {
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if self.email.is_some() {
            user.email = self.email;
        }
        if self.avatar.is_some() {
            user.avatar = self.avatar;
        }
        if self.weight.is_some() {
            user.weight = self.weight;
        }
        if self.height.is_some() {
            user.height = self.height;
        }
        if self.goals.is_some() {
            user.goals = self.goals;
        }
        if self.preferences.is_some() {
            user.preferences = self.preferences;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_goal: Option<NutritionGoal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<u32>,
}

impl PreferencesUpdate {
    pub fn apply_to(self, prefs: &mut UserPreferences) {
        if let Some(theme) = self.theme {
            prefs.theme = theme;
        }
        if let Some(units) = self.units {
            prefs.units = units;
        }
        if let Some(notifications) = self.notifications {
            prefs.notifications = notifications;
        }
        if let Some(sound_enabled) = self.sound_enabled {
            prefs.sound_enabled = sound_enabled;
        }
        if self.nutrition_goal.is_some() {
            prefs.nutrition_goal = self.nutrition_goal;
        }
        if self.target_calories.is_some() {
            prefs.target_calories = self.target_calories;
        }
    }
}

/// Partial update of the statistics record
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_workouts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_records: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_workout_date: Option<NaiveDate>,
}

impl StatsUpdate {
    pub fn apply_to(self, stats: &mut UserStats) {
        if let Some(total_workouts) = self.total_workouts {
            stats.total_workouts = total_workouts;
        }
        if let Some(total_volume) = self.total_volume {
            stats.total_volume = total_volume;
        }
        if let Some(personal_records) = self.personal_records {
            stats.personal_records = personal_records;
        }
        if let Some(streak_days) = self.streak_days {
            stats.streak_days = streak_days;
        }
        if self.last_workout_date.is_some() {
            stats.last_workout_date = self.last_workout_date;
        }
    }
}

// ============================================================================
// Exercises
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<Vec<MuscleGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<Equipment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ExerciseUpdate {
    pub fn apply_to(self, exercise: &mut Exercise) {
        if let Some(name) = self.name {
            exercise.name = name;
        }
        if let Some(muscle_group) = self.muscle_group {
            exercise.muscle_group = muscle_group;
        }
        if let Some(equipment) = self.equipment {
            exercise.equipment = equipment;
        }
        if let Some(difficulty) = self.difficulty {
            exercise.difficulty = difficulty;
        }
        if let Some(description) = self.description {
            exercise.description = description;
        }
        if self.image_url.is_some() {
            exercise.image_url = self.image_url;
        }
    }
}

/// Active exercise catalog filters
///
/// Empty selections (and `None` difficulty) do not filter. Active predicates
/// combine with AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseFilters {
    pub search_query: String,
    pub muscle_groups: Vec<MuscleGroup>,
    pub equipment: Vec<Equipment>,
    pub difficulty: Option<Difficulty>,
}

impl ExerciseFilters {
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.muscle_groups.is_empty()
            && self.equipment.is_empty()
            && self.difficulty.is_none()
    }

    pub fn matches(&self, exercise: &Exercise) -> bool {
        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            if !exercise.name.to_lowercase().contains(&query)
                && !exercise.description.to_lowercase().contains(&query)
            {
                return false;
            }
        }

        if !self.muscle_groups.is_empty()
            && !exercise
                .muscle_group
                .iter()
                .any(|group| self.muscle_groups.contains(group))
        {
            return false;
        }

        if !self.equipment.is_empty()
            && !exercise
                .equipment
                .iter()
                .any(|eq| self.equipment.contains(eq))
        {
            return false;
        }

        match self.difficulty {
            Some(difficulty) => exercise.difficulty == difficulty,
            None => true,
        }
    }
}

/// Filter change; each present field replaces the current selection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_groups: Option<Vec<MuscleGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<Equipment>>,
    /// `Some(None)` clears the difficulty selection
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Option<Difficulty>>,
}

impl FilterUpdate {
    pub fn apply_to(self, filters: &mut ExerciseFilters) {
        if let Some(muscle_groups) = self.muscle_groups {
            filters.muscle_groups = muscle_groups;
        }
        if let Some(equipment) = self.equipment {
            filters.equipment = equipment;
        }
        if let Some(difficulty) = self.difficulty {
            filters.difficulty = difficulty;
        }
    }
}

// ============================================================================
// Workouts
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub exercises: Vec<WorkoutExercise>,
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<WorkoutType>,
}

impl NewWorkout {
    pub fn into_workout(self, id: String) -> Workout {
        Workout {
            id,
            date: self.date,
            exercises: self.exercises,
            duration: self.duration,
            completed: self.completed,
            notes: self.notes,
            workout_type: self.workout_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<WorkoutExercise>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// `Some(None)` removes the notes
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub workout_type: Option<Option<WorkoutType>>,
}

impl WorkoutUpdate {
    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }

    pub fn apply_to(self, workout: &mut Workout) {
        if let Some(date) = self.date {
            workout.date = date;
        }
        if let Some(exercises) = self.exercises {
            workout.exercises = exercises;
        }
        if let Some(duration) = self.duration {
            workout.duration = duration;
        }
        if let Some(completed) = self.completed {
            workout.completed = completed;
        }
        if let Some(notes) = self.notes {
            workout.notes = notes;
        }
        if let Some(workout_type) = self.workout_type {
            workout.workout_type = workout_type;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutPlan {
    pub name: String,
    pub workouts: Vec<Workout>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Full snapshot of workouts and plans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExport {
    pub workouts: Vec<Workout>,
    pub plans: Vec<WorkoutPlan>,
    pub export_date: DateTime<Utc>,
}

/// Import payload; each present collection replaces the stored one
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutImport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workouts: Option<Vec<Workout>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<WorkoutPlan>>,
}

impl From<WorkoutExport> for WorkoutImport {
    fn from(export: WorkoutExport) -> Self {
        Self {
            workouts: Some(export.workouts),
            plans: Some(export.plans),
        }
    }
}

/// Summary of the current calendar week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub week: DateRange,
    pub total_workouts: usize,
    pub completed_workouts: usize,
    pub total_duration_minutes: u32,
    pub completed_volume: f64,
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// Editable goal fields. Progress is always recomputed, never set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<GoalType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    /// `Some(None)` removes the deadline
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<NaiveDate>>,
}

// ============================================================================
// Nutrition
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub category: ProductCategory,
    pub calories: Decimal,
    pub protein: Decimal,
    pub fat: Decimal,
    pub carbs: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    pub items: Vec<MealItem>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealPlan {
    pub name: String,
    pub goal: NutritionGoal,
    pub meals: Vec<MealTemplate>,
    #[serde(default)]
    pub is_recommended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn exercise(
        name: &str,
        description: &str,
        muscle_group: Vec<MuscleGroup>,
        equipment: Vec<Equipment>,
        difficulty: Difficulty,
    ) -> Exercise {
        Exercise {
            id: name.to_lowercase(),
            name: name.to_string(),
            muscle_group,
            equipment,
            difficulty,
            description: description.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_search_matches_name_or_description_case_insensitive() {
        let press = exercise(
            "Bench Press",
            "Compound chest movement",
            vec![MuscleGroup::Chest],
            vec![Equipment::Barbell],
            Difficulty::Intermediate,
        );
        let filters = |q: &str| ExerciseFilters {
            search_query: q.to_string(),
            ..ExerciseFilters::default()
        };
        assert!(filters("bench").matches(&press));
        assert!(filters("CHEST").matches(&press));
        assert!(!filters("squat").matches(&press));
    }

    #[test]
    fn test_membership_needs_one_shared_group() {
        let deadlift = exercise(
            "Deadlift",
            "",
            vec![MuscleGroup::Back, MuscleGroup::Legs],
            vec![Equipment::Barbell],
            Difficulty::Advanced,
        );
        let filters = ExerciseFilters {
            muscle_groups: vec![MuscleGroup::Legs, MuscleGroup::Arms],
            ..ExerciseFilters::default()
        };
        assert!(filters.matches(&deadlift));

        let filters = ExerciseFilters {
            muscle_groups: vec![MuscleGroup::Legs],
            equipment: vec![Equipment::Dumbbell],
            ..ExerciseFilters::default()
        };
        assert!(!filters.matches(&deadlift));
    }

    #[test]
    fn test_filter_update_clears_difficulty() {
        let mut filters = ExerciseFilters {
            difficulty: Some(Difficulty::Beginner),
            equipment: vec![Equipment::Machine],
            ..ExerciseFilters::default()
        };
        FilterUpdate {
            difficulty: Some(None),
            ..FilterUpdate::default()
        }
        .apply_to(&mut filters);
        assert_eq!(filters.difficulty, None);
        assert_eq!(filters.equipment, vec![Equipment::Machine]);
    }

    #[test]
    fn test_workout_update_merges_fields() {
        let mut workout = NewWorkout {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            exercises: vec![],
            duration: 30,
            completed: false,
            notes: Some("legs".to_string()),
            workout_type: None,
        }
        .into_workout("workout-1".to_string());

        WorkoutUpdate::completed().apply_to(&mut workout);
        assert!(workout.completed);
        assert_eq!(workout.duration, 30);
        assert_eq!(workout.notes.as_deref(), Some("legs"));
    }

    #[test]
    fn test_null_clears_optional_fields() {
        let mut workout = NewWorkout {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            exercises: vec![],
            duration: 30,
            completed: false,
            notes: Some("legs".to_string()),
            workout_type: Some(WorkoutType::Strength),
        }
        .into_workout("workout-1".to_string());

        let untouched: WorkoutUpdate = serde_json::from_value(serde_json::json!({
            "duration": 40
        }))
        .unwrap();
        assert!(untouched.notes.is_none());
        untouched.apply_to(&mut workout);
        assert_eq!(workout.notes.as_deref(), Some("legs"));

        let cleared: WorkoutUpdate = serde_json::from_value(serde_json::json!({
            "notes": null,
            "type": null
        }))
        .unwrap();
        cleared.apply_to(&mut workout);
        assert_eq!(workout.notes, None);
        assert_eq!(workout.workout_type, None);
        assert_eq!(workout.duration, 40);

        let filters: FilterUpdate =
            serde_json::from_value(serde_json::json!({ "difficulty": null })).unwrap();
        assert_eq!(filters.difficulty, Some(None));

        let goal: GoalUpdate = serde_json::from_value(serde_json::json!({ "target": 5 })).unwrap();
        assert_eq!(goal.deadline, None);
    }

    #[test]
    fn test_import_ignores_export_date() {
        let import: WorkoutImport = serde_json::from_value(serde_json::json!({
            "workouts": [],
            "exportDate": "2024-06-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(import.workouts.map(|w| w.len()), Some(0));
        assert!(import.plans.is_none());
    }

    fn muscle_strategy() -> impl Strategy<Value = MuscleGroup> {
        prop_oneof![
            Just(MuscleGroup::Chest),
            Just(MuscleGroup::Back),
            Just(MuscleGroup::Legs),
            Just(MuscleGroup::Arms),
            Just(MuscleGroup::Shoulders),
            Just(MuscleGroup::Core),
        ]
    }

    fn equipment_strategy() -> impl Strategy<Value = Equipment> {
        prop_oneof![
            Just(Equipment::Barbell),
            Just(Equipment::Dumbbell),
            Just(Equipment::Machine),
            Just(Equipment::Bodyweight),
            Just(Equipment::Kettlebell),
        ]
    }

    fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Beginner),
            Just(Difficulty::Intermediate),
            Just(Difficulty::Advanced),
        ]
    }

    fn exercise_strategy() -> impl Strategy<Value = Exercise> {
        (
            "[a-zA-Z ]{1,12}",
            "[a-zA-Z ]{0,20}",
            proptest::collection::vec(muscle_strategy(), 1..3),
            proptest::collection::vec(equipment_strategy(), 1..3),
            difficulty_strategy(),
        )
            .prop_map(|(name, description, muscles, equipment, difficulty)| {
                exercise(&name, &description, muscles, equipment, difficulty)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The filter is exactly the conjunction of each active predicate
        #[test]
        fn prop_filter_is_conjunction(
            catalog in proptest::collection::vec(exercise_strategy(), 0..20),
            query in "[a-z]{0,2}",
            muscles in proptest::collection::vec(muscle_strategy(), 0..3),
            equipment in proptest::collection::vec(equipment_strategy(), 0..3),
            difficulty in proptest::option::of(difficulty_strategy()),
        ) {
            let filters = ExerciseFilters {
                search_query: query.clone(),
                muscle_groups: muscles.clone(),
                equipment: equipment.clone(),
                difficulty,
            };

            for ex in &catalog {
                let text_ok = query.is_empty()
                    || ex.name.to_lowercase().contains(&query)
                    || ex.description.to_lowercase().contains(&query);
                let muscle_ok = muscles.is_empty()
                    || ex.muscle_group.iter().any(|m| muscles.contains(m));
                let equipment_ok = equipment.is_empty()
                    || ex.equipment.iter().any(|e| equipment.contains(e));
                let difficulty_ok = difficulty.map_or(true, |d| ex.difficulty == d);

                prop_assert_eq!(
                    filters.matches(ex),
                    text_ok && muscle_ok && equipment_ok && difficulty_ok
                );
            }

            prop_assert!(catalog.iter().all(|ex| ExerciseFilters::default().matches(ex)));
        }
    }
}
