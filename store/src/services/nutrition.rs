//! Nutrition tracking
//!
//! Provides:
//! - Product table (seeded, user-extensible) with search and category lookup
//! - Meal logging with snapshot macro totals
//! - Meal plans, including the seeded recommended plans
//! - Daily summaries against the configured goal and calorie target
//!
//! Meal and plan totals are computed once, from the products present at
//! creation time, and never refreshed afterwards.

use super::new_id;
use crate::clock::Clock;
use crate::error::StoreResult;
use crate::storage::{Slot, SlotKey, SlotNamespace};
use chrono::NaiveDate;
use iron_progress_shared::catalog::{recommended_plan_templates, seed_products, slug};
use iron_progress_shared::nutrition::{
    calculate_meal_macros, combined_plan_macros, find_product, plan_macros, MacroTotals,
};
use iron_progress_shared::types::{NewMeal, NewMealPlan, NewProduct};
use iron_progress_shared::{
    DailyNutrition, Meal, MealItem, MealPlan, NutritionGoal, NutritionPreferences, Product,
    ProductCategory,
};
use std::rc::Rc;
use tracing::{debug, info};

/// Calorie target reported when none (or zero) is configured
pub const DEFAULT_TARGET_CALORIES: u32 = 2000;

/// Store for products, meals, meal plans and nutrition preferences
pub struct NutritionStore {
    products_slot: Slot<Vec<Product>>,
    meals_slot: Slot<Vec<Meal>>,
    plans_slot: Slot<Vec<MealPlan>>,
    preferences_slot: Slot<NutritionPreferences>,
    products: Vec<Product>,
    meals: Vec<Meal>,
    meal_plans: Vec<MealPlan>,
    preferences: NutritionPreferences,
    clock: Rc<dyn Clock>,
}

impl NutritionStore {
    pub fn new(slots: &SlotNamespace, clock: Rc<dyn Clock>) -> StoreResult<Self> {
        let mut store = Self {
            products_slot: slots.slot(SlotKey::Products, seed_products),
            meals_slot: slots.slot(SlotKey::Meals, Vec::new),
            plans_slot: slots.slot(SlotKey::MealPlans, Vec::new),
            preferences_slot: slots.slot(SlotKey::NutritionPreferences, NutritionPreferences::default),
            products: Vec::new(),
            meals: Vec::new(),
            meal_plans: Vec::new(),
            preferences: NutritionPreferences::default(),
            clock,
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read all four slots and seed recommended plans if needed
    pub fn load(&mut self) -> StoreResult<()> {
        self.products = self.products_slot.read();
        self.meals = self.meals_slot.read();
        self.meal_plans = self.plans_slot.read();
        self.preferences = self.preferences_slot.read();
        self.initialize_recommended_plans()?;
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn meal_plans(&self) -> &[MealPlan] {
        &self.meal_plans
    }

    pub fn preferences(&self) -> &NutritionPreferences {
        &self.preferences
    }

    // ========================================================================
    // Meal plans
    // ========================================================================

    /// Append the recommended plans unless one is already present
    ///
    /// Returns whether anything was seeded.
    pub fn initialize_recommended_plans(&mut self) -> StoreResult<bool> {
        if self.meal_plans.iter().any(|p| p.is_recommended) {
            return Ok(false);
        }

        let created_at = self.clock.now();
        let templates = recommended_plan_templates();
        let seeded = templates.len();
        for template in templates {
            let totals = combined_plan_macros(&template.meals, &self.products);
            self.meal_plans.push(MealPlan {
                id: format!("recommended-{}-{}", template.goal.as_str(), slug(template.name)),
                name: template.name.to_string(),
                goal: template.goal,
                meals: template.meals,
                total_calories: totals.calories,
                total_protein: totals.protein,
                total_fat: totals.fat,
                total_carbs: totals.carbs,
                is_recommended: true,
                created_at: Some(created_at),
            });
        }
        info!(count = seeded, "Seeded recommended meal plans");
        self.plans_slot.write(&self.meal_plans)?;
        Ok(true)
    }

    pub fn recommended_meal_plans(&self) -> Vec<&MealPlan> {
        self.meal_plans.iter().filter(|p| p.is_recommended).collect()
    }

    pub fn custom_meal_plans(&self) -> Vec<&MealPlan> {
        self.meal_plans.iter().filter(|p| !p.is_recommended).collect()
    }

    /// Save a plan with totals summed from each template's rounded totals
    pub fn save_meal_plan(&mut self, input: NewMealPlan) -> StoreResult<MealPlan> {
        let totals = plan_macros(&input.meals, &self.products);
        let plan = MealPlan {
            id: new_id("plan"),
            name: input.name,
            goal: input.goal,
            meals: input.meals,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_fat: totals.fat,
            total_carbs: totals.carbs,
            is_recommended: input.is_recommended,
            created_at: Some(self.clock.now()),
        };
        self.meal_plans.push(plan.clone());
        self.plans_slot.write(&self.meal_plans)?;
        Ok(plan)
    }

    pub fn delete_meal_plan(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.meal_plans.len();
        self.meal_plans.retain(|p| p.id != id);
        self.plans_slot.write(&self.meal_plans)?;
        Ok(self.meal_plans.len() != before)
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub fn get_product_by_id(&self, id: &str) -> Option<&Product> {
        find_product(&self.products, id)
    }

    pub fn products_by_category(&self, category: ProductCategory) -> Vec<&Product> {
        self.products.iter().filter(|p| p.category == category).collect()
    }

    /// Case-insensitive substring match on either name
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p
                        .name_en
                        .as_ref()
                        .is_some_and(|name| name.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn add_product(&mut self, input: NewProduct) -> StoreResult<Product> {
        let product = Product {
            id: new_id("product"),
            name: input.name,
            name_en: input.name_en,
            category: input.category,
            calories: input.calories,
            protein: input.protein,
            fat: input.fat,
            carbs: input.carbs,
            image: input.image,
            description: input.description,
        };
        self.products.push(product.clone());
        self.products_slot.write(&self.products)?;
        Ok(product)
    }

    // ========================================================================
    // Meals
    // ========================================================================

    /// Rounded macro totals of `items` against the current product table
    pub fn calculate_meal_macros(&self, items: &[MealItem]) -> MacroTotals {
        calculate_meal_macros(items, &self.products)
    }

    /// Log a meal, snapshotting totals and the resolved products
    pub fn add_meal(&mut self, input: NewMeal) -> StoreResult<Meal> {
        let totals = self.calculate_meal_macros(&input.items);
        let items = input
            .items
            .into_iter()
            .map(|item| {
                let product = self.get_product_by_id(&item.product_id).cloned();
                MealItem { product, ..item }
            })
            .collect();

        let meal = Meal {
            id: new_id("meal"),
            meal_type: input.meal_type,
            name: input.name,
            items,
            date: input.date,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_fat: totals.fat,
            total_carbs: totals.carbs,
        };
        debug!(id = %meal.id, calories = %meal.total_calories, "Logged meal");
        self.meals.push(meal.clone());
        self.meals_slot.write(&self.meals)?;
        Ok(meal)
    }

    pub fn delete_meal(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != id);
        self.meals_slot.write(&self.meals)?;
        Ok(self.meals.len() != before)
    }

    pub fn meals_by_date(&self, date: NaiveDate) -> Vec<&Meal> {
        self.meals.iter().filter(|m| m.date == date).collect()
    }

    /// Meals and summed totals for `date`
    pub fn daily_nutrition(&self, date: NaiveDate) -> DailyNutrition {
        let meals: Vec<Meal> = self.meals_by_date(date).into_iter().cloned().collect();
        let totals: MacroTotals = meals.iter().map(Meal::totals).sum();

        DailyNutrition {
            date,
            goal: self.preferences.goal.unwrap_or_default(),
            target_calories: self
                .preferences
                .target_calories
                .filter(|&calories| calories > 0)
                .unwrap_or(DEFAULT_TARGET_CALORIES),
            meals,
            total_calories: totals.calories,
            total_protein: totals.protein,
            total_fat: totals.fat,
            total_carbs: totals.carbs,
        }
    }

    pub fn today_nutrition(&self) -> DailyNutrition {
        self.daily_nutrition(self.clock.today())
    }

    // ========================================================================
    // Preferences
    // ========================================================================

    /// Set the goal; the calorie target changes only when given
    pub fn set_nutrition_goal(
        &mut self,
        goal: NutritionGoal,
        target_calories: Option<u32>,
    ) -> StoreResult<()> {
        self.preferences.goal = Some(goal);
        if target_calories.is_some() {
            self.preferences.target_calories = target_calories;
        }
        self.preferences_slot.write(&self.preferences)
    }

    pub fn clear_nutrition_goal(&mut self) -> StoreResult<()> {
        self.preferences.goal = None;
        self.preferences_slot.write(&self.preferences)
    }
}
