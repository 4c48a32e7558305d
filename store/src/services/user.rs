//! User profile and training statistics
//!
//! The stats record is written here but computed by the workout store;
//! this store performs no aggregation of its own.

use crate::error::StoreResult;
use crate::storage::{Slot, SlotKey, SlotNamespace};
use iron_progress_shared::types::{PreferencesUpdate, StatsUpdate, UserUpdate};
use iron_progress_shared::{User, UserPreferences, UserStats};
use tracing::debug;

/// Store for the single local user
pub struct UserStore {
    user_slot: Slot<User>,
    stats_slot: Slot<UserStats>,
    user: User,
    stats: UserStats,
}

impl UserStore {
    pub fn new(slots: &SlotNamespace) -> Self {
        let user_slot = slots.slot(SlotKey::User, User::default);
        let stats_slot = slots.slot(SlotKey::Stats, UserStats::default);
        let user = user_slot.read();
        let stats = stats_slot.read();

        Self {
            user_slot,
            stats_slot,
            user,
            stats,
        }
    }

    /// Re-read both slots
    pub fn load(&mut self) {
        self.user = self.user_slot.read();
        self.stats = self.stats_slot.read();
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// Stored preferences, or the defaults if none were ever saved
    pub fn preferences(&self) -> UserPreferences {
        self.user.preferences.clone().unwrap_or_default()
    }

    pub fn update_user(&mut self, update: UserUpdate) -> StoreResult<()> {
        update.apply_to(&mut self.user);
        self.user_slot.write(&self.user)
    }

    pub fn update_preferences(&mut self, update: PreferencesUpdate) -> StoreResult<()> {
        let mut preferences = self.user.preferences.take().unwrap_or_default();
        update.apply_to(&mut preferences);
        self.user.preferences = Some(preferences);
        self.user_slot.write(&self.user)
    }

    /// Merge already-computed statistics and persist them
    pub fn update_stats(&mut self, update: StatsUpdate) -> StoreResult<()> {
        update.apply_to(&mut self.stats);
        debug!(
            total_workouts = self.stats.total_workouts,
            total_volume = self.stats.total_volume,
            "Stats updated"
        );
        self.stats_slot.write(&self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use iron_progress_shared::{Theme, UnitSystem};
    use std::rc::Rc;

    fn slots() -> (Rc<MemoryStorage>, SlotNamespace) {
        let storage = Rc::new(MemoryStorage::new());
        let ns = SlotNamespace::new(storage.clone(), "iron-progress");
        (storage, ns)
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let (storage, ns) = slots();
        let store = UserStore::new(&ns);

        assert_eq!(store.user().id, "user-1");
        assert_eq!(store.stats(), &UserStats::default());
        assert!(storage.contains("iron-progress-user"));
        assert!(storage.contains("iron-progress-stats"));
    }

    #[test]
    fn test_update_user_merges_and_persists() {
        let (_, ns) = slots();
        let mut store = UserStore::new(&ns);
        store
            .update_user(UserUpdate {
                name: Some("Sam".to_string()),
                weight: Some(82.5),
                ..UserUpdate::default()
            })
            .unwrap();

        let reloaded = UserStore::new(&ns);
        assert_eq!(reloaded.user().name, "Sam");
        assert_eq!(reloaded.user().weight, Some(82.5));
        assert_eq!(reloaded.user().id, "user-1");
    }

    #[test]
    fn test_update_preferences_starts_from_defaults() {
        let (storage, ns) = slots();
        storage.insert_raw("iron-progress-user", r#"{"id":"user-1","name":"Sam"}"#);
        let mut store = UserStore::new(&ns);
        assert!(store.user().preferences.is_none());

        store
            .update_preferences(PreferencesUpdate {
                units: Some(UnitSystem::Imperial),
                ..PreferencesUpdate::default()
            })
            .unwrap();

        let prefs = store.preferences();
        assert_eq!(prefs.units, UnitSystem::Imperial);
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(prefs.sound_enabled);
    }

    #[test]
    fn test_update_stats_keeps_unmentioned_fields() {
        let (_, ns) = slots();
        let mut store = UserStore::new(&ns);
        store
            .update_stats(StatsUpdate {
                streak_days: Some(4),
                ..StatsUpdate::default()
            })
            .unwrap();
        store
            .update_stats(StatsUpdate {
                total_workouts: Some(2),
                total_volume: Some(1500.0),
                ..StatsUpdate::default()
            })
            .unwrap();

        store.load();
        assert_eq!(store.stats().streak_days, 4);
        assert_eq!(store.stats().total_workouts, 2);
        assert_eq!(store.stats().total_volume, 1500.0);
    }
}
