use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{Result, VintiqueError};
use crate::domain::amount::sanitize_amount;

/// Sale lifecycle of an item. Only moves forward: in stock, then sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Sold")]
    Sold,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::InStock => write!(f, "In Stock"),
            ItemStatus::Sold => write!(f, "Sold"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub cost: f64,
    pub potential_revenue: f64,
    pub sold_price: Option<f64>,
    pub status: ItemStatus,
    pub date_added: DateTime<Utc>,
}

impl Item {
    /// Build a fresh in-stock item from a draft, assigning id and timestamp.
    pub fn new(draft: ItemDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            image_url: draft.image_url,
            cost: sanitize_amount(draft.cost),
            potential_revenue: sanitize_amount(draft.potential_revenue),
            sold_price: None,
            status: ItemStatus::InStock,
            date_added: Utc::now(),
        }
    }

    pub fn is_sold(&self) -> bool {
        self.status == ItemStatus::Sold
    }

    /// Price shown in listings: the sale price once sold, the list price before.
    pub fn display_price(&self) -> Option<f64> {
        match self.status {
            ItemStatus::Sold => self.sold_price,
            ItemStatus::InStock => Some(self.potential_revenue),
        }
    }

    /// Merge the patch into this item. Identity, timestamp and sale state are untouched.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(ref name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(ref image_url) = patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(cost) = patch.cost {
            self.cost = sanitize_amount(cost);
        }
        if let Some(potential_revenue) = patch.potential_revenue {
            self.potential_revenue = sanitize_amount(potential_revenue);
        }
    }

    pub fn sell(&mut self, price: f64) -> Result<()> {
        if self.is_sold() {
            return Err(VintiqueError::InvalidState(format!(
                "\"{}\" has already been sold",
                self.name
            )));
        }
        self.sold_price = Some(sanitize_amount(price));
        self.status = ItemStatus::Sold;
        Ok(())
    }

    /// Check the record-level invariants a stored or imported item must satisfy.
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("missing id".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("missing name".to_string());
        }
        for (label, value) in [("cost", self.cost), ("potentialRevenue", self.potential_revenue)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number", label));
            }
        }
        match (self.status, self.sold_price) {
            (ItemStatus::Sold, None) => Err("sold item has no soldPrice".to_string()),
            (ItemStatus::InStock, Some(_)) => Err("in-stock item has a soldPrice".to_string()),
            (ItemStatus::Sold, Some(price)) if !price.is_finite() || price < 0.0 => {
                Err("soldPrice must be a non-negative number".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// User-supplied fields for a new item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub cost: f64,
    pub potential_revenue: f64,
}

/// Replacement values for the mutable fields of an existing item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cost: Option<f64>,
    pub potential_revenue: Option<f64>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.cost.is_none()
            && self.potential_revenue.is_none()
    }
}

impl From<ItemDraft> for ItemPatch {
    fn from(draft: ItemDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
            image_url: Some(draft.image_url),
            cost: Some(draft.cost),
            potential_revenue: Some(draft.potential_revenue),
        }
    }
}
