pub mod inventory;
pub mod sqlite;

use crate::app::Result;

pub use inventory::{InventoryStore, INVENTORY_KEY};
pub use sqlite::SqliteSlot;

/// A durable named slot holding one serialized value per key.
pub trait Slot {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}
