//! Persistent slots
//!
//! A [`Storage`] backend maps string keys to serialized JSON documents.
//! A [`Slot`] is a typed register over one key: it reads the stored value or
//! falls back to a default, and writes replace the value wholesale.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, warn};

/// Synchronous key-value backend
pub trait Storage {
    /// Raw document stored under `key`, `None` if absent
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the document stored under `key`
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Named collections persisted by the stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    User,
    Stats,
    Exercises,
    Workouts,
    Plans,
    Goals,
    Products,
    Meals,
    MealPlans,
    NutritionPreferences,
}

impl SlotKey {
    pub const ALL: [SlotKey; 10] = [
        SlotKey::User,
        SlotKey::Stats,
        SlotKey::Exercises,
        SlotKey::Workouts,
        SlotKey::Plans,
        SlotKey::Goals,
        SlotKey::Products,
        SlotKey::Meals,
        SlotKey::MealPlans,
        SlotKey::NutritionPreferences,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::User => "user",
            SlotKey::Stats => "stats",
            SlotKey::Exercises => "exercises",
            SlotKey::Workouts => "workouts",
            SlotKey::Plans => "plans",
            SlotKey::Goals => "goals",
            SlotKey::Products => "products",
            SlotKey::Meals => "meals",
            SlotKey::MealPlans => "meal-plans",
            SlotKey::NutritionPreferences => "nutrition-preferences",
        }
    }
}

/// A storage backend plus the key prefix every slot shares
#[derive(Clone)]
pub struct SlotNamespace {
    storage: Rc<dyn Storage>,
    prefix: String,
}

impl SlotNamespace {
    pub fn new(storage: Rc<dyn Storage>, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    /// Full storage key for `slot`, e.g. `iron-progress-workouts`
    pub fn key(&self, slot: SlotKey) -> String {
        if self.prefix.is_empty() {
            slot.as_str().to_string()
        } else {
            format!("{}-{}", self.prefix, slot.as_str())
        }
    }

    pub fn slot<T>(&self, slot: SlotKey, default: fn() -> T) -> Slot<T>
    where
        T: Serialize + DeserializeOwned,
    {
        Slot {
            key: self.key(slot),
            storage: Rc::clone(&self.storage),
            default,
        }
    }
}

/// Typed read-or-default register over one storage key
pub struct Slot<T> {
    key: String,
    storage: Rc<dyn Storage>,
    default: fn() -> T,
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value, or the default when the slot is absent or unreadable
    ///
    /// An absent or corrupt slot is overwritten with the default. An I/O
    /// failure leaves the stored bytes alone.
    pub fn read(&self) -> T {
        match self.storage.read(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(key = %self.key, error = %err, "Corrupt slot, restoring default");
                    self.restore_default()
                }
            },
            Ok(None) => self.restore_default(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "Slot unreadable, using default");
                (self.default)()
            }
        }
    }

    /// Replace the stored value
    pub fn write(&self, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(value).map_err(|source| {
            StoreError::Serialization {
                key: self.key.clone(),
                source,
            }
        })?;
        self.storage.write(&self.key, &raw)?;
        debug!(key = %self.key, bytes = raw.len(), "Slot written");
        Ok(())
    }

    fn restore_default(&self) -> T {
        let value = (self.default)();
        if let Err(err) = self.write(&value) {
            warn!(key = %self.key, error = %err, "Failed to persist slot default");
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn read(&self, key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::io(key, io::Error::new(io::ErrorKind::Other, "unavailable")))
        }

        fn write(&self, key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::io(key, io::Error::new(io::ErrorKind::Other, "unavailable")))
        }
    }

    fn numbers() -> Vec<u32> {
        vec![1, 2, 3]
    }

    fn namespace(storage: Rc<dyn Storage>) -> SlotNamespace {
        SlotNamespace::new(storage, "iron-progress")
    }

    #[test]
    fn test_keys_use_prefix() {
        let ns = namespace(Rc::new(MemoryStorage::new()));
        assert_eq!(ns.key(SlotKey::MealPlans), "iron-progress-meal-plans");
        assert_eq!(ns.key(SlotKey::NutritionPreferences), "iron-progress-nutrition-preferences");

        let bare = SlotNamespace::new(Rc::new(MemoryStorage::new()), "");
        assert_eq!(bare.key(SlotKey::Goals), "goals");
    }

    #[test]
    fn test_absent_slot_writes_default() {
        let storage = Rc::new(MemoryStorage::new());
        let slot = namespace(storage.clone()).slot(SlotKey::Workouts, numbers);

        assert_eq!(slot.read(), vec![1, 2, 3]);
        assert!(storage.contains("iron-progress-workouts"));
    }

    #[test]
    fn test_corrupt_slot_is_replaced() {
        let storage = Rc::new(MemoryStorage::new());
        storage.insert_raw("iron-progress-workouts", "{not json");
        let slot = namespace(storage.clone()).slot(SlotKey::Workouts, numbers);

        assert_eq!(slot.read(), vec![1, 2, 3]);
        let raw = storage.get_raw("iron-progress-workouts").unwrap();
        assert_eq!(serde_json::from_str::<Vec<u32>>(&raw).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_replaces_value() {
        let storage = Rc::new(MemoryStorage::new());
        let slot = namespace(storage).slot(SlotKey::Goals, Vec::<u32>::new);

        slot.write(&vec![7, 8]).unwrap();
        assert_eq!(slot.read(), vec![7, 8]);
        slot.write(&vec![]).unwrap();
        assert!(slot.read().is_empty());
    }

    #[test]
    fn test_unreadable_backend_yields_default() {
        let slot = namespace(Rc::new(BrokenStorage)).slot(SlotKey::Stats, numbers);
        assert_eq!(slot.read(), vec![1, 2, 3]);
        assert!(matches!(slot.write(&vec![]), Err(StoreError::Io { .. })));
    }
}
