pub mod amount;
pub mod image;
pub mod item;
pub mod summary;

pub use amount::{coerce_amount, format_money, format_optional_money, sanitize_amount};
pub use image::resolve_image;
pub use item::{Item, ItemDraft, ItemPatch, ItemStatus};
pub use summary::{summarize, Summary};
