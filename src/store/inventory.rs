use tracing::{debug, info, warn};

use crate::app::{Result, VintiqueError};
use crate::domain::{Item, ItemDraft, ItemPatch};
use crate::store::Slot;

/// Key under which the serialized inventory lives in the slot.
pub const INVENTORY_KEY: &str = "lingerieInventory";

/// Owner of the inventory list and the only writer to it.
///
/// Every mutation persists the resulting list before it becomes visible in
/// memory, so a failed write leaves both copies unchanged.
pub struct InventoryStore {
    slot: Box<dyn Slot + Send>,
    items: Vec<Item>,
}

impl InventoryStore {
    /// Rehydrate from the slot. A missing or unreadable value yields an empty list.
    pub fn open(slot: Box<dyn Slot + Send>) -> Result<Self> {
        let items = match slot.load(INVENTORY_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Item>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "stored inventory is corrupt, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!(count = items.len(), "inventory loaded");

        Ok(Self { slot, items })
    }

    pub fn snapshot(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Create an in-stock item and put it at the front of the list.
    pub fn add(&mut self, draft: ItemDraft) -> Result<Item> {
        if draft.name.trim().is_empty() {
            return Err(VintiqueError::Validation("item name is required".into()));
        }

        let item = Item::new(draft);
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(item.clone());
        next.extend(self.items.iter().cloned());
        self.commit(next)?;

        info!(id = %item.id, name = %item.name, "item added");
        Ok(item)
    }

    /// Merge `patch` into the item. Returns `false` when the id is unknown.
    pub fn update(&mut self, id: &str, patch: &ItemPatch) -> Result<bool> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(VintiqueError::Validation("item name is required".into()));
        }

        let Some(index) = self.position(id) else {
            warn!(id, "update for unknown item ignored");
            return Ok(false);
        };

        let mut next = self.items.clone();
        next[index].apply(patch);
        self.commit(next)?;

        info!(id, "item updated");
        Ok(true)
    }

    /// Record a sale. Returns `false` when the id is unknown and
    /// fails with `InvalidState` when the item is already sold.
    pub fn mark_sold(&mut self, id: &str, price: f64) -> Result<bool> {
        let Some(index) = self.position(id) else {
            warn!(id, "sale for unknown item ignored");
            return Ok(false);
        };

        let mut next = self.items.clone();
        next[index].sell(price)?;
        self.commit(next)?;

        info!(id, price = ?self.items[index].sold_price, "item sold");
        Ok(true)
    }

    /// Remove the item. Returns `false` when there was nothing to remove.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.position(id).is_none() {
            debug!(id, "delete for unknown item ignored");
            return Ok(false);
        }

        let next = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        info!(id, "item deleted");
        Ok(true)
    }

    /// Overwrite the whole inventory. Callers validate the items beforehand.
    pub fn replace_all(&mut self, items: Vec<Item>) -> Result<()> {
        let count = items.len();
        self.commit(items)?;
        info!(count, "inventory replaced");
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn commit(&mut self, next: Vec<Item>) -> Result<()> {
        let raw = serde_json::to_string(&next)?;
        self.slot.save(INVENTORY_KEY, &raw).map_err(|e| {
            tracing::error!(error = %e, "failed to persist inventory");
            VintiqueError::Persistence(e.to_string())
        })?;
        self.items = next;
        Ok(())
    }
}
