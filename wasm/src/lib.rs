//! Iron Progress WASM Module
//!
//! WebAssembly bindings for the calculations the browser UI runs locally:
//! meal macro totals, training volume and weight unit conversion.
//! Structured inputs cross the boundary as JSON in the shared crate's
//! camelCase shape.

use iron_progress_shared::nutrition;
use iron_progress_shared::training::exercise_volume;
use iron_progress_shared::{MealItem, Product, UnitSystem, WorkoutExercise};
use wasm_bindgen::prelude::*;

/// Rounded macro totals for meal items against a product table
///
/// Returns `{"calories", "protein", "fat", "carbs"}` as JSON.
#[wasm_bindgen]
pub fn calculate_meal_macros(items_json: &str, products_json: &str) -> Result<String, JsValue> {
    meal_macros_json(items_json, products_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Training volume of parallel weight/reps/sets columns, in kg
///
/// A weight of zero stands for a bodyweight entry. Extra trailing values in
/// a longer column are ignored.
#[wasm_bindgen]
pub fn workout_volume(weights: &[f64], reps: &[u32], sets: &[u32]) -> f64 {
    weights
        .iter()
        .zip(reps)
        .zip(sets)
        .map(|((&weight, &reps), &sets)| {
            exercise_volume(&WorkoutExercise {
                exercise_id: String::new(),
                sets,
                reps,
                weight: Some(weight),
                duration: None,
                rest_time: None,
                completed: None,
            })
        })
        .sum()
}

/// Convert a kilogram value for display
#[wasm_bindgen]
pub fn convert_weight_from_kg(kg: f64, imperial: bool) -> f64 {
    let units = if imperial {
        UnitSystem::Imperial
    } else {
        UnitSystem::Metric
    };
    units.weight_unit().from_kg(kg)
}

fn meal_macros_json(items_json: &str, products_json: &str) -> serde_json::Result<String> {
    let items: Vec<MealItem> = serde_json::from_str(items_json)?;
    let products: Vec<Product> = serde_json::from_str(products_json)?;
    serde_json::to_string(&nutrition::calculate_meal_macros(&items, &products))
}
