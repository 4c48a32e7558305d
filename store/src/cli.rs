//! Argument parsing for the `iron-progress` binary

use anyhow::{bail, Context, Result};
use iron_progress_shared::{GoalType, MealItem, MealType, NutritionGoal, ProductCategory, UnitSystem};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "usage: iron-progress <command>

commands:
  summary                               print the dashboard (default)
  export <file>                         write the workouts + plans snapshot
  import <file>                         replace workouts and/or plans from a snapshot
  products [category]                   list products, optionally of one category
  log-meal <type> <product>=<grams>...  log a meal for today
  nutrition-goal <goal> [calories]      set the nutrition goal and calorie target
  units <metric|imperial>               set the display unit system
  goal <type> <target>                  add a progress goal";

/// One invocation of the binary
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Summary,
    Export(PathBuf),
    Import(PathBuf),
    Products(Option<ProductCategory>),
    LogMeal {
        meal_type: MealType,
        items: Vec<MealItem>,
    },
    NutritionGoal {
        goal: NutritionGoal,
        target_calories: Option<u32>,
    },
    Units(UnitSystem),
    AddGoal {
        goal_type: GoalType,
        target: f64,
    },
}

impl Command {
    /// Parse the arguments after the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        let command = match args.as_slice() {
            [] | ["summary"] => Command::Summary,
            ["export", path] => Command::Export(PathBuf::from(*path)),
            ["import", path] => Command::Import(PathBuf::from(*path)),
            ["products"] => Command::Products(None),
            ["products", category] => Command::Products(Some(category.parse()?)),
            ["log-meal", meal_type, items @ ..] if !items.is_empty() => Command::LogMeal {
                meal_type: meal_type.parse()?,
                items: items.iter().map(|item| parse_item(item)).collect::<Result<_>>()?,
            },
            ["nutrition-goal", goal] => Command::NutritionGoal {
                goal: goal.parse()?,
                target_calories: None,
            },
            ["nutrition-goal", goal, calories] => Command::NutritionGoal {
                goal: goal.parse()?,
                target_calories: Some(
                    calories
                        .parse()
                        .with_context(|| format!("Invalid calorie target: {calories}"))?,
                ),
            },
            ["units", system] => Command::Units(system.parse()?),
            ["goal", goal_type, target] => Command::AddGoal {
                goal_type: goal_type.parse()?,
                target: target
                    .parse()
                    .with_context(|| format!("Invalid goal target: {target}"))?,
            },
            _ => bail!(USAGE),
        };
        Ok(command)
    }
}

/// `<product-id>=<grams>`
fn parse_item(raw: &str) -> Result<MealItem> {
    let Some((product_id, grams)) = raw.split_once('=') else {
        bail!("Expected <product>=<grams>, got {raw}");
    };
    let amount = Decimal::from_str(grams).with_context(|| format!("Invalid amount in {raw}"))?;
    Ok(MealItem::new(product_id, amount))
}
