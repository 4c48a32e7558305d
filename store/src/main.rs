//! Iron Progress command line
//!
//! Operational surface over the local stores. The commands are listed in
//! `iron_progress_store::cli::USAGE`. Command output goes to stdout as
//! JSON, logs go to stderr.

use anyhow::{Context, Result};
use iron_progress_shared::types::{NewGoal, NewMeal, PreferencesUpdate, WorkoutImport};
use iron_progress_store::cli::Command;
use iron_progress_store::clock::{Clock, SystemClock};
use iron_progress_store::config::{self, StorageBackend};
use iron_progress_store::state::AppState;
use iron_progress_store::storage::{JsonFileStorage, MemoryStorage, Storage};
use serde::Serialize;
use std::fs;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        backend = ?config.storage.backend,
        "Starting Iron Progress"
    );

    let storage: Rc<dyn Storage> = match config.storage.backend {
        StorageBackend::File => Rc::new(
            JsonFileStorage::open(&config.storage.data_dir)
                .with_context(|| format!("Failed to open data dir {}", config.storage.data_dir))?,
        ),
        StorageBackend::Memory => Rc::new(MemoryStorage::new()),
    };

    let mut state = AppState::new(storage, Rc::new(SystemClock), &config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    run(Command::parse(&args)?, &mut state)
}

fn run(command: Command, state: &mut AppState) -> Result<()> {
    match command {
        Command::Summary => print_json(&state.dashboard())?,
        Command::Export(path) => {
            let snapshot = state.workouts.borrow().export_data();
            fs::write(&path, serde_json::to_string_pretty(&snapshot)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                workouts = snapshot.workouts.len(),
                plans = snapshot.plans.len(),
                "Exported workout data"
            );
        }
        Command::Import(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let data: WorkoutImport = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid snapshot in {}", path.display()))?;
            state.import_workouts(data)?;
        }
        Command::Products(category) => match category {
            Some(category) => print_json(&state.nutrition.products_by_category(category))?,
            None => print_json(&state.nutrition.products())?,
        },
        Command::LogMeal { meal_type, items } => {
            let name = items
                .iter()
                .map(|item| {
                    state
                        .nutrition
                        .get_product_by_id(&item.product_id)
                        .map_or(item.product_id.as_str(), |p| p.name.as_str())
                })
                .collect::<Vec<_>>()
                .join(", ");
            let date = state.clock().today();
            let meal = state.nutrition.add_meal(NewMeal {
                meal_type,
                name,
                items,
                date,
            })?;
            print_json(&meal)?;
        }
        Command::NutritionGoal {
            goal,
            target_calories,
        } => {
            state.nutrition.set_nutrition_goal(goal, target_calories)?;
            print_json(&state.nutrition.today_nutrition())?;
        }
        Command::Units(units) => {
            state.users.borrow_mut().update_preferences(PreferencesUpdate {
                units: Some(units),
                ..PreferencesUpdate::default()
            })?;
            info!(unit = %units.weight_unit(), "Display units updated");
        }
        Command::AddGoal { goal_type, target } => {
            let goal = state.goals.add_goal(NewGoal {
                goal_type,
                target,
                deadline: None,
            })?;
            print_json(&goal)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "iron_progress_store=info".into()
        } else {
            "iron_progress_store=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    // stdout carries command output only
    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
