//! Integration tests for workout statistics and snapshots

mod common;

use common::{date, lift, session, TestApp};
use iron_progress_shared::types::{WorkoutImport, WorkoutUpdate};
use iron_progress_shared::Workout;
use iron_progress_store::clock::Clock;
use iron_progress_store::state::AppState;
use proptest::prelude::*;

fn expected_volume(workouts: &[Workout]) -> f64 {
    workouts
        .iter()
        .filter(|w| w.completed)
        .flat_map(|w| w.exercises.iter())
        .map(|e| e.weight.unwrap_or(0.0) * e.reps as f64 * e.sets as f64)
        .sum()
}

#[test]
fn test_stats_survive_restart() {
    let app = TestApp::new();
    app.log_workout(session(date(2024, 6, 10), true, vec![lift("ex9", Some(100.0), 5, 5)]));
    app.log_workout(session(date(2024, 6, 11), false, vec![lift("ex1", Some(60.0), 8, 3)]));

    let reopened = app.reopen();
    let stats = reopened.users.borrow().stats().clone();
    assert_eq!(stats.total_workouts, 1);
    assert_eq!(stats.total_volume, 2500.0);
    assert_eq!(reopened.workouts.borrow().workouts().len(), 2);
}

#[test]
fn test_export_import_round_trip() {
    let app = TestApp::new();
    app.log_workout(session(date(2024, 6, 3), true, vec![lift("ex5", Some(140.0), 5, 3)]));
    app.log_workout(session(date(2024, 6, 5), true, vec![lift("ex6", None, 10, 4)]));
    app.log_workout(session(date(2024, 6, 14), false, vec![lift("ex9", Some(90.0), 5, 5)]));

    let snapshot = app.state.workouts.borrow().export_data();
    assert_eq!(snapshot.export_date, app.clock.now());

    // Through JSON, the way the binary writes and reads snapshots
    let raw = serde_json::to_string(&snapshot).unwrap();
    let import: WorkoutImport = serde_json::from_str(&raw).unwrap();

    let fresh = TestApp::on(date(2024, 6, 12));
    let mut state: AppState = fresh.state;
    state.import_workouts(import).unwrap();

    let workouts = state.workouts.borrow();
    assert_eq!(workouts.workouts(), snapshot.workouts.as_slice());
    assert_eq!(workouts.plans(), snapshot.plans.as_slice());

    let stats = state.users.borrow().stats().clone();
    assert_eq!(stats.total_workouts, 2);
    assert_eq!(stats.total_volume, expected_volume(workouts.workouts()));
    assert_eq!(stats.total_volume, 2100.0);
}

#[test]
fn test_snapshot_uses_camel_case_shape() {
    let app = TestApp::new();
    app.log_workout(session(date(2024, 6, 3), true, vec![lift("ex5", Some(140.0), 5, 3)]));

    let value = serde_json::to_value(app.state.workouts.borrow().export_data()).unwrap();
    assert!(value.get("exportDate").is_some());
    assert_eq!(value["workouts"][0]["exercises"][0]["exerciseId"], "ex5");
    assert_eq!(value["plans"], serde_json::json!([]));
}

#[derive(Debug, Clone)]
enum Mutation {
    Add { completed: bool, weight: Option<u32>, reps: u32, sets: u32 },
    Complete(usize),
    Reopen(usize),
    Delete(usize),
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (any::<bool>(), proptest::option::of(0u32..200), 1u32..20, 1u32..6).prop_map(
            |(completed, weight, reps, sets)| Mutation::Add { completed, weight, reps, sets }
        ),
        (0usize..10).prop_map(Mutation::Complete),
        (0usize..10).prop_map(Mutation::Reopen),
        (0usize..10).prop_map(Mutation::Delete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Stats equal the volume over completed workouts after every mutation
    #[test]
    fn prop_stats_track_completed_volume(
        mutations in proptest::collection::vec(mutation_strategy(), 1..25)
    ) {
        let app = TestApp::new();

        for mutation in mutations {
            let ids: Vec<String> = app
                .state
                .workouts
                .borrow()
                .workouts()
                .iter()
                .map(|w| w.id.clone())
                .collect();
            let pick = |i: usize| ids.get(i % ids.len().max(1)).cloned();

            let mut workouts = app.state.workouts.borrow_mut();
            match mutation {
                Mutation::Add { completed, weight, reps, sets } => {
                    workouts
                        .add_workout(session(
                            date(2024, 6, 12),
                            completed,
                            vec![lift("ex1", weight.map(f64::from), reps, sets)],
                        ))
                        .unwrap();
                }
                Mutation::Complete(i) => {
                    if let Some(id) = pick(i) {
                        workouts.complete_workout(&id).unwrap();
                    }
                }
                Mutation::Reopen(i) => {
                    if let Some(id) = pick(i) {
                        let update = WorkoutUpdate { completed: Some(false), ..WorkoutUpdate::default() };
                        workouts.update_workout(&id, update).unwrap();
                    }
                }
                Mutation::Delete(i) => {
                    if let Some(id) = pick(i) {
                        workouts.delete_workout(&id).unwrap();
                    }
                }
            }

            let expected = expected_volume(workouts.workouts());
            let completed = workouts.workouts().iter().filter(|w| w.completed).count() as u32;
            drop(workouts);

            prop_assert_eq!(app.total_volume(), expected);
            prop_assert_eq!(app.total_workouts(), completed);
        }

        // Recomputing again changes nothing
        let before = app.state.users.borrow().stats().clone();
        app.state.workouts.borrow().recompute_stats().unwrap();
        let users = app.state.users.borrow();
        prop_assert_eq!(users.stats(), &before);
    }
}
