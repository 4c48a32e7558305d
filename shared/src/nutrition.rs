//! Nutrition models and macro-nutrient arithmetic
//!
//! Product values are expressed per 100 g. A logged amount contributes
//! `value * amount / 100`. Totals are rounded once computed: calories to a
//! whole number, protein/fat/carbs to one decimal place.

use crate::errors::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Nutrition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NutritionGoal {
    Gain,
    Lose,
    #[default]
    Maintain,
}

impl NutritionGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutritionGoal::Gain => "gain",
            NutritionGoal::Lose => "lose",
            NutritionGoal::Maintain => "maintain",
        }
    }
}

impl std::str::FromStr for NutritionGoal {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gain" => Ok(NutritionGoal::Gain),
            "lose" => Ok(NutritionGoal::Lose),
            "maintain" => Ok(NutritionGoal::Maintain),
            _ => Err(DomainError::unknown("nutrition goal", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl std::str::FromStr for MealType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(DomainError::unknown("meal type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Grains,
    Fruits,
    Vegetables,
    Protein,
    Dairy,
    Nuts,
    Beverages,
    Other,
}

impl std::str::FromStr for ProductCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grains" => Ok(ProductCategory::Grains),
            "fruits" => Ok(ProductCategory::Fruits),
            "vegetables" => Ok(ProductCategory::Vegetables),
            "protein" => Ok(ProductCategory::Protein),
            "dairy" => Ok(ProductCategory::Dairy),
            "nuts" => Ok(ProductCategory::Nuts),
            "beverages" => Ok(ProductCategory::Beverages),
            "other" => Ok(ProductCategory::Other),
            _ => Err(DomainError::unknown("product category", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

/// Food product, macros per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
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

/// Amount of a product, in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub product_id: String,
    pub amount: Decimal,
    /// Product as it was when the item was logged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl MealItem {
    pub fn new(product_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
            product: None,
        }
    }
}

/// Logged meal with snapshot totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    pub items: Vec<MealItem>,
    pub date: NaiveDate,
    pub total_calories: Decimal,
    pub total_protein: Decimal,
    pub total_fat: Decimal,
    pub total_carbs: Decimal,
}

impl Meal {
    pub fn totals(&self) -> MacroTotals {
        MacroTotals {
            calories: self.total_calories,
            protein: self.total_protein,
            fat: self.total_fat,
            carbs: self.total_carbs,
        }
    }
}

/// Meal inside a plan: no id, no date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTemplate {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    pub items: Vec<MealItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub name: String,
    pub goal: NutritionGoal,
    pub meals: Vec<MealTemplate>,
    pub total_calories: Decimal,
    pub total_protein: Decimal,
    pub total_fat: Decimal,
    pub total_carbs: Decimal,
    #[serde(default)]
    pub is_recommended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Persisted nutrition preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPreferences {
    pub goal: Option<NutritionGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_meal_plan_id: Option<String>,
}

/// Nutrition summary for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub goal: NutritionGoal,
    pub target_calories: u32,
    pub meals: Vec<Meal>,
    pub total_calories: Decimal,
    pub total_protein: Decimal,
    pub total_fat: Decimal,
    pub total_carbs: Decimal,
}

/// Calories and macronutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MacroTotals {
    pub calories: Decimal,
    pub protein: Decimal,
    pub fat: Decimal,
    pub carbs: Decimal,
}

impl MacroTotals {
    /// Apply display rounding: whole calories, one decimal for the rest
    pub fn rounded(self) -> Self {
        Self {
            calories: round_to(self.calories, 0),
            protein: round_to(self.protein, 1),
            fat: round_to(self.fat, 1),
            carbs: round_to(self.carbs, 1),
        }
    }
}

impl std::ops::Add for MacroTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
            carbs: self.carbs + rhs.carbs,
        }
    }
}

impl std::iter::Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MacroTotals::default(), |acc, t| acc + t)
    }
}

fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Look up a product by id
pub fn find_product<'a>(products: &'a [Product], product_id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == product_id)
}

/// Unrounded macro sum. Items whose product is unknown contribute nothing.
pub fn raw_macros<'a>(
    items: impl IntoIterator<Item = &'a MealItem>,
    products: &[Product],
) -> MacroTotals {
    items
        .into_iter()
        .filter_map(|item| {
            find_product(products, &item.product_id).map(|product| {
                let multiplier = item.amount / Decimal::ONE_HUNDRED;
                MacroTotals {
                    calories: product.calories * multiplier,
                    protein: product.protein * multiplier,
                    fat: product.fat * multiplier,
                    carbs: product.carbs * multiplier,
                }
            })
        })
        .sum()
}

/// Rounded totals for one meal's items
pub fn calculate_meal_macros(items: &[MealItem], products: &[Product]) -> MacroTotals {
    raw_macros(items, products).rounded()
}

/// Plan totals as the sum of each template's rounded totals
///
/// Rounding happens per template before summing, so the result can differ
/// slightly from [`combined_plan_macros`].
pub fn plan_macros(meals: &[MealTemplate], products: &[Product]) -> MacroTotals {
    meals
        .iter()
        .map(|meal| calculate_meal_macros(&meal.items, products))
        .sum::<MacroTotals>()
        .rounded()
}

/// Plan totals computed from all items at once, rounded a single time
pub fn combined_plan_macros(meals: &[MealTemplate], products: &[Product]) -> MacroTotals {
    raw_macros(meals.iter().flat_map(|meal| meal.items.iter()), products).rounded()
}
