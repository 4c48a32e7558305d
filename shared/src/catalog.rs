//! Static seed data: exercise catalog, food products and recommended meal
//! plan templates
//!
//! Used as slot defaults when the corresponding collection is empty.

use crate::models::{Difficulty, Equipment, Exercise, MuscleGroup};
use crate::nutrition::{MealItem, MealTemplate, MealType, NutritionGoal, Product, ProductCategory};
use rust_decimal::Decimal;

// ============================================================================
// Exercises
// ============================================================================

type ExerciseRow = (
    &'static str,
    &'static str,
    &'static [MuscleGroup],
    &'static [Equipment],
    Difficulty,
    &'static str,
);

const EXERCISES: &[ExerciseRow] = {
    use Difficulty::*;
    use Equipment::*;
    use MuscleGroup::*;
    &[
        ("ex1", "Barbell Bench Press", &[Chest], &[Barbell], Intermediate,
            "Foundational movement for chest development"),
        ("ex2", "Dumbbell Bench Press", &[Chest], &[Dumbbell], Beginner,
            "Bench press alternative with a longer range of motion"),
        ("ex3", "Push-ups", &[Chest, Arms], &[Bodyweight], Beginner,
            "Classic floor push-ups"),
        ("ex4", "Dumbbell Fly", &[Chest], &[Dumbbell], Intermediate,
            "Isolation movement that stretches the chest"),
        ("ex5", "Deadlift", &[Back, Legs], &[Barbell], Advanced,
            "Compound lift for the whole posterior chain"),
        ("ex6", "Pull-ups", &[Back, Arms], &[Bodyweight], Intermediate,
            "Bodyweight pull for back width"),
        ("ex7", "Bent-over Barbell Row", &[Back], &[Barbell], Intermediate,
            "Horizontal pull for back thickness"),
        ("ex8", "One-arm Dumbbell Row", &[Back], &[Dumbbell], Beginner,
            "Unilateral row braced on a bench"),
        ("ex9", "Barbell Squat", &[Legs], &[Barbell], Intermediate,
            "Primary lower-body strength movement"),
        ("ex10", "Lunges", &[Legs], &[Bodyweight], Beginner,
            "Alternating forward lunges for legs and glutes"),
        ("ex11", "Leg Press", &[Legs], &[Machine], Beginner,
            "Machine press for quads and glutes"),
        ("ex12", "Romanian Deadlift", &[Legs, Back], &[Barbell], Intermediate,
            "Hip hinge targeting hamstrings and glutes"),
        ("ex13", "Barbell Curl", &[Arms], &[Barbell], Beginner,
            "Standing curl for biceps"),
        ("ex14", "French Press", &[Arms], &[Dumbbell], Intermediate,
            "Overhead extension for triceps"),
        ("ex15", "Hammer Curls", &[Arms], &[Dumbbell], Beginner,
            "Neutral-grip curl for biceps and forearms"),
        ("ex16", "Overhead Press", &[Shoulders], &[Barbell], Intermediate,
            "Standing barbell press for shoulders"),
        ("ex17", "Lateral Raises", &[Shoulders], &[Dumbbell], Beginner,
            "Isolation raise for the side delts"),
        ("ex18", "Upright Row", &[Shoulders], &[Barbell], Intermediate,
            "Vertical pull for delts and traps"),
        ("ex19", "Plank", &[Core], &[Bodyweight], Beginner,
            "Static hold for core stability"),
        ("ex20", "Crunches", &[Core], &[Bodyweight], Beginner,
            "Classic abdominal crunch"),
        ("ex21", "Hanging Leg Raises", &[Core], &[Bodyweight], Intermediate,
            "Leg raises for the lower abs"),
    ]
};

/// Default exercise catalog
pub fn seed_exercises() -> Vec<Exercise> {
    EXERCISES
        .iter()
        .map(|(id, name, muscles, equipment, difficulty, description)| Exercise {
            id: (*id).to_string(),
            name: (*name).to_string(),
            muscle_group: muscles.to_vec(),
            equipment: equipment.to_vec(),
            difficulty: *difficulty,
            description: (*description).to_string(),
            image_url: None,
        })
        .collect()
}

// ============================================================================
// Products
// ============================================================================

/// id, name, category, then calories/protein/fat/carbs in tenths per 100 g
type ProductRow = (&'static str, &'static str, ProductCategory, [i64; 4]);

const PRODUCTS: &[ProductRow] = {
    use ProductCategory::*;
    &[
        ("rice-1", "White rice", Grains, [3650, 70, 5, 800]),
        ("buckwheat-1", "Buckwheat", Grains, [3430, 130, 34, 720]),
        ("oatmeal-1", "Oatmeal", Grains, [3890, 170, 70, 660]),
        ("bread-1", "White bread", Grains, [2660, 80, 30, 510]),
        ("bread-whole-1", "Whole grain bread", Grains, [2470, 130, 40, 410]),
        ("pasta-1", "Pasta", Grains, [3710, 100, 10, 750]),
        ("apple-1", "Apple", Fruits, [520, 3, 2, 140]),
        ("banana-1", "Banana", Fruits, [890, 10, 3, 230]),
        ("orange-1", "Orange", Fruits, [470, 9, 1, 120]),
        ("berries-1", "Berries (strawberry, raspberry)", Fruits, [320, 7, 3, 80]),
        ("broccoli-1", "Broccoli", Vegetables, [340, 28, 4, 70]),
        ("carrot-1", "Carrot", Vegetables, [410, 9, 2, 100]),
        ("cucumber-1", "Cucumber", Vegetables, [160, 7, 1, 40]),
        ("tomato-1", "Tomato", Vegetables, [180, 9, 2, 40]),
        ("chicken-1", "Chicken breast", Protein, [1650, 310, 36, 0]),
        ("beef-1", "Beef", Protein, [2500, 260, 150, 0]),
        ("eggs-1", "Eggs", Protein, [1550, 130, 110, 10]),
        ("fish-1", "Fish (salmon)", Protein, [2080, 200, 130, 0]),
        ("tofu-1", "Tofu", Protein, [760, 80, 48, 19]),
        ("milk-1", "Milk", Dairy, [610, 32, 32, 47]),
        ("yogurt-1", "Yogurt", Dairy, [590, 100, 4, 40]),
        ("cheese-1", "Cheese", Dairy, [3630, 250, 270, 20]),
        ("cottage-cheese-1", "Cottage cheese", Dairy, [980, 110, 40, 30]),
        ("almonds-1", "Almonds", Nuts, [5790, 210, 500, 220]),
        ("peanuts-1", "Peanuts", Nuts, [5670, 260, 490, 160]),
        ("walnuts-1", "Walnuts", Nuts, [6540, 150, 650, 140]),
    ]
};

fn tenths(value: i64) -> Decimal {
    Decimal::new(value, 1).normalize()
}

/// Default product table
pub fn seed_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|(id, name, category, [calories, protein, fat, carbs])| Product {
            id: (*id).to_string(),
            name: (*name).to_string(),
            name_en: None,
            category: *category,
            calories: tenths(*calories),
            protein: tenths(*protein),
            fat: tenths(*fat),
            carbs: tenths(*carbs),
            image: None,
            description: None,
        })
        .collect()
}

// ============================================================================
// Recommended meal plans
// ============================================================================

/// Recommended plan before ids and totals are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTemplate {
    pub name: &'static str,
    pub goal: NutritionGoal,
    pub meals: Vec<MealTemplate>,
}

type MealRow = (MealType, &'static [(&'static str, i64)]);

fn meals(rows: &[MealRow]) -> Vec<MealTemplate> {
    rows.iter()
        .map(|(meal_type, items)| MealTemplate {
            meal_type: *meal_type,
            name: meal_name(*meal_type).to_string(),
            items: items
                .iter()
                .map(|(product_id, grams)| MealItem::new(*product_id, Decimal::from(*grams)))
                .collect(),
        })
        .collect()
}

fn meal_name(meal_type: MealType) -> &'static str {
    match meal_type {
        MealType::Breakfast => "Breakfast",
        MealType::Lunch => "Lunch",
        MealType::Dinner => "Dinner",
        MealType::Snack => "Snack",
    }
}

/// The three seeded plans, one per nutrition goal
pub fn recommended_plan_templates() -> Vec<PlanTemplate> {
    use MealType::*;
    vec![
        PlanTemplate {
            name: "Weight gain plan",
            goal: NutritionGoal::Gain,
            meals: meals(&[
                (Breakfast, &[("oatmeal-1", 100), ("banana-1", 150), ("eggs-1", 200)]),
                (Lunch, &[("rice-1", 150), ("chicken-1", 200), ("broccoli-1", 150)]),
                (Dinner, &[("pasta-1", 150), ("beef-1", 150), ("tomato-1", 100)]),
                (Snack, &[("almonds-1", 50), ("yogurt-1", 200)]),
            ]),
        },
        PlanTemplate {
            name: "Weight loss plan",
            goal: NutritionGoal::Lose,
            meals: meals(&[
                (Breakfast, &[("cottage-cheese-1", 150), ("apple-1", 150), ("almonds-1", 30)]),
                (
                    Lunch,
                    &[("buckwheat-1", 100), ("chicken-1", 150), ("cucumber-1", 150), ("tomato-1", 100)],
                ),
                (Dinner, &[("fish-1", 150), ("broccoli-1", 200), ("carrot-1", 100)]),
                (Snack, &[("berries-1", 150), ("yogurt-1", 100)]),
            ]),
        },
        PlanTemplate {
            name: "Maintenance plan",
            goal: NutritionGoal::Maintain,
            meals: meals(&[
                (Breakfast, &[("oatmeal-1", 80), ("banana-1", 100), ("milk-1", 200)]),
                (Lunch, &[("rice-1", 120), ("chicken-1", 150), ("tomato-1", 150)]),
                (Dinner, &[("buckwheat-1", 100), ("fish-1", 150), ("broccoli-1", 150)]),
                (Snack, &[("apple-1", 150), ("walnuts-1", 30)]),
            ]),
        },
    ]
}

/// Lowercase, dash-separated form of a display name for use in ids
pub fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{combined_plan_macros, find_product};
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let exercises = seed_exercises();
        let ids: HashSet<_> = exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), exercises.len());
        assert_eq!(exercises.len(), 21);

        let products = seed_products();
        let ids: HashSet<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_exercises_have_groups_and_equipment() {
        for exercise in seed_exercises() {
            assert!(!exercise.muscle_group.is_empty(), "{}", exercise.id);
            assert!(!exercise.equipment.is_empty(), "{}", exercise.id);
        }
    }

    #[test]
    fn test_plan_items_reference_seeded_products() {
        let products = seed_products();
        for plan in recommended_plan_templates() {
            for meal in &plan.meals {
                for item in &meal.items {
                    assert!(
                        find_product(&products, &item.product_id).is_some(),
                        "{} references {}",
                        plan.name,
                        item.product_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_product_values_scale() {
        let products = seed_products();
        let rice = find_product(&products, "rice-1").unwrap();
        assert_eq!(rice.calories, Decimal::from(365));
        assert_eq!(rice.fat, Decimal::new(5, 1));
    }

    #[test]
    fn test_maintenance_plan_totals() {
        // oatmeal 80g 311.2, banana 100g 89, milk 200g 122,
        // rice 120g 438, chicken 150g 247.5, tomato 150g 27,
        // buckwheat 100g 343, fish 150g 312, broccoli 150g 51,
        // apple 150g 78, walnuts 30g 196.2
        let plans = recommended_plan_templates();
        let maintain = plans
            .iter()
            .find(|p| p.goal == NutritionGoal::Maintain)
            .unwrap();
        let totals = combined_plan_macros(&maintain.meals, &seed_products());
        assert_eq!(totals.calories, Decimal::from(2215));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Weight gain plan"), "weight-gain-plan");
        assert_eq!(slug("  Cut / Phase 2 "), "cut-phase-2");
    }
}
