//! Training volume and workout aggregation
//!
//! Volume is weight x reps x sets. An exercise without a weight adds zero.

use crate::calendar::DateRange;
use crate::models::{Workout, WorkoutExercise};

/// Volume of a single exercise entry, in kg
pub fn exercise_volume(exercise: &WorkoutExercise) -> f64 {
    exercise.weight.unwrap_or(0.0) * f64::from(exercise.reps) * f64::from(exercise.sets)
}

/// Volume of one workout regardless of completion
pub fn workout_volume(workout: &Workout) -> f64 {
    workout.exercises.iter().map(exercise_volume).sum()
}

/// Completed workouts among `workouts`
pub fn completed<'a>(workouts: &'a [Workout]) -> impl Iterator<Item = &'a Workout> + 'a {
    workouts.iter().filter(|w| w.completed)
}

/// Total volume over completed workouts
pub fn completed_volume<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> f64 {
    workouts
        .into_iter()
        .filter(|w| w.completed)
        .map(workout_volume)
        .sum()
}

/// Completed workouts dated inside `range`
pub fn completed_in_range<'a>(
    workouts: &'a [Workout],
    range: DateRange,
) -> impl Iterator<Item = &'a Workout> + 'a {
    completed(workouts).filter(move |w| range.contains(w.date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn entry(weight: Option<f64>, reps: u32, sets: u32) -> WorkoutExercise {
        WorkoutExercise {
            exercise_id: "ex1".to_string(),
            sets,
            reps,
            weight,
            duration: None,
            rest_time: None,
            completed: None,
        }
    }

    fn workout(completed: bool, exercises: Vec<WorkoutExercise>) -> Workout {
        Workout {
            id: "w".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            exercises,
            duration: 60,
            completed,
            notes: None,
            workout_type: None,
        }
    }

    #[test]
    fn test_missing_weight_counts_as_zero() {
        assert_eq!(exercise_volume(&entry(None, 10, 3)), 0.0);
        assert_eq!(exercise_volume(&entry(Some(60.0), 10, 3)), 1800.0);
    }

    #[test]
    fn test_only_completed_workouts_count() {
        let workouts = vec![
            workout(true, vec![entry(Some(100.0), 5, 5), entry(Some(20.0), 12, 3)]),
            workout(false, vec![entry(Some(200.0), 5, 5)]),
        ];
        assert_eq!(completed_volume(&workouts), 2500.0 + 720.0);
        assert_eq!(completed(&workouts).count(), 1);
    }

    fn entry_strategy() -> impl Strategy<Value = WorkoutExercise> {
        (proptest::option::of(0u32..300), 0u32..30, 0u32..10)
            .prop_map(|(weight, reps, sets)| entry(weight.map(f64::from), reps, sets))
    }

    fn workout_strategy() -> impl Strategy<Value = Workout> {
        (any::<bool>(), proptest::collection::vec(entry_strategy(), 0..6))
            .prop_map(|(done, exercises)| workout(done, exercises))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_volume_equals_manual_sum(
            workouts in proptest::collection::vec(workout_strategy(), 0..20)
        ) {
            let mut expected = 0.0;
            for w in workouts.iter().filter(|w| w.completed) {
                for ex in &w.exercises {
                    expected += ex.weight.unwrap_or(0.0) * ex.reps as f64 * ex.sets as f64;
                }
            }
            let actual = completed_volume(&workouts);
            // Integral inputs keep the sum exact
            prop_assert_eq!(actual, expected);
        }
    }
}
