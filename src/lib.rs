//! # Vintique
//!
//! A small stock tracker for a vintage lingerie business.
//!
//! ## Architecture
//!
//! ```text
//! CLI / TUI → Item Editor → Store → Slot (SQLite)
//!                  ↓
//!          Description Assistant (Gemini)
//! ```
//!
//! - [`store`]: the inventory and its durable slot
//! - [`editor`]: draft/commit state machine behind the add/edit dialog
//! - [`domain`]: items, amounts and the financial summary
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a piece
//! vintique add --name "1950s Silk Peignoir" --cost 20 --price 65
//!
//! # Record a sale (ids can be shortened to a unique prefix)
//! vintique sell 3f2a 58
//!
//! # Financial overview
//! vintique summary
//!
//! # Launch TUI
//! vintique tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// the description assistant and the loaded configuration.
pub mod app;

/// Description assistant backed by the Gemini `generateContent` API.
pub mod assistant;

/// JSON backup export and import.
pub mod backup;

/// Command-line interface using clap.
///
/// - `add`, `edit`, `sell`, `delete` - change stock
/// - `list`, `show`, `summary` - inspect it
/// - `export`, `import` - dated JSON backups
/// - `describe` - draft a product description
/// - `tui` - launch the TUI
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/vintique/config.toml`, supporting:
/// - Database location and currency symbol
/// - Assistant model and API key
/// - Custom colors (named or hex) and keybindings
pub mod config;

/// Core domain models.
///
/// - [`Item`](domain::Item): one piece of stock
/// - [`Summary`](domain::Summary): totals across the inventory
pub mod domain;

/// Item editor state machine shared by the TUI.
pub mod editor;

/// Inventory persistence.
///
/// - [`Slot`](store::Slot): durable key-value slot
/// - [`SqliteSlot`](store::SqliteSlot): SQLite implementation
/// - [`InventoryStore`](store::InventoryStore): the in-memory list kept in sync with its slot
pub mod store;

/// Terminal user interface.
///
/// Summary cards across the top, inventory list and detail pane below,
/// and a popup editor for adding, editing, selling and deleting items.
pub mod tui;
