//! JSON backup export and import.
//!
//! A backup is a pretty-printed JSON array of items named
//! `vintique-backup-<YYYY-MM-DD>.json`. Imports are validated in full before
//! anything in the store is touched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::{info, warn};

use crate::app::{Result, VintiqueError};
use crate::domain::Item;

pub const BACKUP_PREFIX: &str = "vintique-backup-";
pub const BACKUP_EXTENSION: &str = "json";

pub fn backup_file_name(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        BACKUP_PREFIX,
        date.format("%Y-%m-%d"),
        BACKUP_EXTENSION
    )
}

pub fn to_json(items: &[Item]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Write a backup dated today into `dir` and return its path.
pub fn export_to_dir(items: &[Item], dir: &Path) -> Result<PathBuf> {
    export_dated(items, dir, Local::now().date_naive())
}

pub fn export_dated(items: &[Item], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = dir.join(backup_file_name(date));
    std::fs::write(&path, to_json(items)?)?;
    info!(path = %path.display(), count = items.len(), "backup exported");
    Ok(path)
}

/// Parse and validate backup text into an item list.
pub fn parse_backup(text: &str) -> Result<Vec<Item>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| VintiqueError::InvalidBackup(format!("not valid JSON: {}", e)))?;

    let Value::Array(entries) = value else {
        return Err(VintiqueError::InvalidBackup(
            "expected a list of items".into(),
        ));
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let item: Item = serde_json::from_value(entry)
            .map_err(|e| VintiqueError::InvalidBackup(format!("item {}: {}", index, e)))?;
        item.check()
            .map_err(|reason| VintiqueError::InvalidBackup(format!("item {}: {}", index, reason)))?;
        if !seen.insert(item.id.clone()) {
            return Err(VintiqueError::InvalidBackup(format!(
                "item {}: duplicate id {}",
                index, item.id
            )));
        }
        items.push(item);
    }

    Ok(items)
}

pub fn read_backup(path: &Path) -> Result<Vec<Item>> {
    let text = std::fs::read_to_string(path)?;
    parse_backup(&text).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "backup rejected");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemDraft, ItemStatus};

    fn sample() -> Vec<Item> {
        let mut robe = Item::new(ItemDraft {
            name: "Silk Robe".into(),
            description: "1950s, blush pink".into(),
            image_url: "https://example.com/robe.jpg".into(),
            cost: 20.0,
            potential_revenue: 50.0,
        });
        robe.sell(45.0).unwrap();
        let slip = Item::new(ItemDraft {
            name: "Lace Slip".into(),
            cost: 12.75,
            potential_revenue: 39.99,
            ..Default::default()
        });
        vec![slip, robe]
    }

    #[test]
    fn test_file_name_uses_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "vintique-backup-2024-03-07.json");
    }

    #[test]
    fn test_export_then_import_reproduces_inventory() {
        let items = sample();
        let text = to_json(&items).unwrap();
        assert!(text.contains("\n  "));
        assert_eq!(parse_backup(&text).unwrap(), items);
    }

    #[test]
    fn test_export_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let items = sample();

        let path = export_dated(&items, dir.path(), date).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "vintique-backup-2025-12-31.json"
        );
        assert_eq!(read_backup(&path).unwrap(), items);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_backup("[]").unwrap().is_empty());
    }

    #[test]
    fn test_object_is_rejected() {
        let err = parse_backup(r#"{"foo": "bar"}"#).unwrap_err();
        assert!(matches!(err, VintiqueError::InvalidBackup(_)));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = parse_backup("[{").unwrap_err();
        assert!(matches!(err, VintiqueError::InvalidBackup(_)));
    }

    #[test]
    fn test_bad_element_reports_index() {
        let text = r#"[
            {"id": "a", "name": "Ok", "cost": 1, "potentialRevenue": 2, "soldPrice": null,
             "status": "In Stock", "dateAdded": "2024-01-01T00:00:00Z"},
            {"id": "b", "name": "Broken"}
        ]"#;
        let err = parse_backup(text).unwrap_err();
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn test_sold_without_price_rejected() {
        let text = r#"[{"id": "a", "name": "Slip", "cost": 1, "potentialRevenue": 2,
            "soldPrice": null, "status": "Sold", "dateAdded": "2024-01-01T00:00:00Z"}]"#;
        assert!(parse_backup(text).is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut items = sample();
        items[1].id = items[0].id.clone();
        let text = to_json(&items).unwrap();
        let err = parse_backup(&text).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn test_browser_backup_imports() {
        let text = r#"[
          {
            "id": "5f0c7a52-8e36-4a4e-9a53-3f0bdbf8b1d1",
            "name": "1950s Silk Peignoir",
            "description": "",
            "imageUrl": "",
            "cost": 20,
            "potentialRevenue": 50,
            "soldPrice": null,
            "status": "In Stock",
            "dateAdded": "2024-05-02T09:30:00.000Z"
          }
        ]"#;
        let items = parse_backup(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, ItemStatus::InStock);
        assert_eq!(items[0].cost, 20.0);
    }
}
