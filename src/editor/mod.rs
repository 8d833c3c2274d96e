//! Item editor state machine.
//!
//! The editor stages form input in a [`Draft`] and commits it to the
//! [`InventoryStore`] on submit. States:
//!
//! ```text
//! Closed --open_create--> Creating --submit--> Closed
//! Closed --open_edit----> Editing  --submit / confirm_sale / confirm_delete--> Closed
//! any    --cancel-------> Closed
//! ```
//!
//! Sold items are read-only here: their fields cannot be edited or resubmitted.

use crate::app::{Result, VintiqueError};
use crate::domain::{coerce_amount, resolve_image, Item, ItemDraft, ItemPatch};
use crate::store::InventoryStore;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Closed,
    Creating,
    Editing { item: Item },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    ImageUrl,
    Cost,
    PotentialRevenue,
    SoldPrice,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        DraftField::Name,
        DraftField::Description,
        DraftField::ImageUrl,
        DraftField::Cost,
        DraftField::PotentialRevenue,
        DraftField::SoldPrice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Item Name",
            DraftField::Description => "Description",
            DraftField::ImageUrl => "Image (URL or file)",
            DraftField::Cost => "Cost (What you paid)",
            DraftField::PotentialRevenue => "List Price (Potential Revenue)",
            DraftField::SoldPrice => "Sold Price",
        }
    }
}

/// Raw form text for every editable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub cost: String,
    pub potential_revenue: String,
    pub sold_price: String,
}

impl Draft {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            cost: item.cost.to_string(),
            potential_revenue: item.potential_revenue.to_string(),
            sold_price: item.sold_price.map(|p| p.to_string()).unwrap_or_default(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::ImageUrl => &self.image_url,
            DraftField::Cost => &self.cost,
            DraftField::PotentialRevenue => &self.potential_revenue,
            DraftField::SoldPrice => &self.sold_price,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Description => &mut self.description,
            DraftField::ImageUrl => &mut self.image_url,
            DraftField::Cost => &mut self.cost,
            DraftField::PotentialRevenue => &mut self.potential_revenue,
            DraftField::SoldPrice => &mut self.sold_price,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn to_item_draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            image_url: self.image_url.trim().to_string(),
            cost: coerce_amount(&self.cost),
            potential_revenue: coerce_amount(&self.potential_revenue),
        }
    }
}

/// Identifies the editor session a description request was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionTicket {
    session: u64,
}

/// What a committing transition did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Added(Item),
    Updated(String),
    Sold(String),
    Deleted(String),
    /// The item vanished from the store while the editor was open.
    Missing(String),
}

#[derive(Debug, Clone)]
pub struct ItemEditor {
    state: EditorState,
    draft: Draft,
    focus: DraftField,
    session: u64,
    pending_delete: bool,
}

impl Default for ItemEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemEditor {
    pub fn new() -> Self {
        Self {
            state: EditorState::Closed,
            draft: Draft::default(),
            focus: DraftField::Name,
            session: 0,
            pending_delete: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    pub fn is_open(&self) -> bool {
        self.state != EditorState::Closed
    }

    pub fn is_delete_pending(&self) -> bool {
        self.pending_delete
    }

    /// The item being viewed, if any.
    pub fn item(&self) -> Option<&Item> {
        match &self.state {
            EditorState::Editing { item } => Some(item),
            _ => None,
        }
    }

    /// Whether the open item is sold and therefore read-only.
    pub fn is_locked(&self) -> bool {
        self.item().is_some_and(Item::is_sold)
    }

    pub fn open_create(&mut self) {
        self.open(EditorState::Creating, Draft::default());
    }

    pub fn open_edit(&mut self, item: &Item) {
        let draft = Draft::from_item(item);
        self.open(
            EditorState::Editing {
                item: item.clone(),
            },
            draft,
        );
    }

    fn open(&mut self, state: EditorState, draft: Draft) {
        self.session += 1;
        self.state = state;
        self.draft = draft;
        self.pending_delete = false;
        self.focus = self.editable_fields().first().copied().unwrap_or(DraftField::Name);
    }

    /// Close without committing, discarding the draft.
    pub fn cancel(&mut self) {
        self.state = EditorState::Closed;
        self.draft = Draft::default();
        self.pending_delete = false;
        self.focus = DraftField::Name;
    }

    /// Fields that accept input in the current state.
    pub fn editable_fields(&self) -> Vec<DraftField> {
        match &self.state {
            EditorState::Closed => Vec::new(),
            EditorState::Creating => DraftField::ALL[..5].to_vec(),
            EditorState::Editing { item } if item.is_sold() => Vec::new(),
            EditorState::Editing { .. } => DraftField::ALL.to_vec(),
        }
    }

    pub fn is_editable(&self, field: DraftField) -> bool {
        self.editable_fields().contains(&field)
    }

    pub fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.shift_focus(-1);
    }

    fn shift_focus(&mut self, step: isize) {
        let fields = self.editable_fields();
        if fields.is_empty() {
            return;
        }
        let len = fields.len() as isize;
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = fields[(current + step).rem_euclid(len) as usize];
    }

    /// Replace a field's text. Ignored for fields that are not editable.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        if !self.is_editable(field) {
            return false;
        }
        *self.draft.field_mut(field) = value.into();
        true
    }

    /// Whether the focused field holds an embedded image, which is edited as one value.
    fn focus_is_embedded_image(&self) -> bool {
        self.focus == DraftField::ImageUrl && self.draft.image_url.trim_start().starts_with("data:")
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_editable(self.focus) {
            return;
        }
        if self.focus_is_embedded_image() {
            self.draft.image_url.clear();
        }
        self.draft.field_mut(self.focus).push(c);
    }

    pub fn pop_char(&mut self) {
        if !self.is_editable(self.focus) {
            return;
        }
        if self.focus_is_embedded_image() {
            self.draft.image_url.clear();
        } else {
            self.draft.field_mut(self.focus).pop();
        }
    }

    /// Commit the draft: add in `Creating`, update in `Editing`.
    ///
    /// A local image path is embedded as a data URI first. On error the
    /// editor stays open with the draft intact.
    pub fn submit(&mut self, store: &mut InventoryStore) -> Result<EditorOutcome> {
        if !self.draft.can_submit() {
            return Err(VintiqueError::Validation("item name is required".into()));
        }

        let outcome = match &self.state {
            EditorState::Closed => {
                return Err(VintiqueError::InvalidState("editor is not open".into()));
            }
            EditorState::Creating => EditorOutcome::Added(store.add(self.resolved_draft()?)?),
            EditorState::Editing { item } if item.is_sold() => {
                return Err(VintiqueError::InvalidState(
                    "sold items cannot be edited".into(),
                ));
            }
            EditorState::Editing { item } => {
                let patch = ItemPatch::from(self.resolved_draft()?);
                if store.update(&item.id, &patch)? {
                    EditorOutcome::Updated(item.id.clone())
                } else {
                    EditorOutcome::Missing(item.id.clone())
                }
            }
        };

        self.cancel();
        Ok(outcome)
    }

    fn resolved_draft(&self) -> Result<ItemDraft> {
        let mut draft = self.draft.to_item_draft();
        draft.image_url = resolve_image(&draft.image_url)?;
        Ok(draft)
    }

    /// Mark the open item sold at the draft's sale price.
    pub fn confirm_sale(&mut self, store: &mut InventoryStore) -> Result<EditorOutcome> {
        let item = self.editing_item("confirm a sale")?;
        if item.is_sold() {
            return Err(VintiqueError::InvalidState(format!(
                "\"{}\" has already been sold",
                item.name
            )));
        }

        let id = item.id.clone();
        let price = coerce_amount(&self.draft.sold_price);
        let outcome = if store.mark_sold(&id, price)? {
            EditorOutcome::Sold(id)
        } else {
            EditorOutcome::Missing(id)
        };

        self.cancel();
        Ok(outcome)
    }

    /// First step of deletion; nothing is removed until [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self) -> Result<()> {
        self.editing_item("delete")?;
        self.pending_delete = true;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = false;
    }

    pub fn confirm_delete(&mut self, store: &mut InventoryStore) -> Result<EditorOutcome> {
        let id = self.editing_item("delete")?.id.clone();
        if !self.pending_delete {
            return Err(VintiqueError::InvalidState(
                "delete has not been requested".into(),
            ));
        }

        let outcome = if store.delete(&id)? {
            EditorOutcome::Deleted(id)
        } else {
            EditorOutcome::Missing(id)
        };

        self.cancel();
        Ok(outcome)
    }

    fn editing_item(&self, action: &str) -> Result<&Item> {
        self.item().ok_or_else(|| {
            VintiqueError::InvalidState(format!("no item is open to {}", action))
        })
    }

    /// Ticket for a description request, if the description can currently be edited.
    pub fn description_ticket(&self) -> Option<DescriptionTicket> {
        self.is_editable(DraftField::Description)
            .then_some(DescriptionTicket {
                session: self.session,
            })
    }

    /// Apply a generated description. Results for a closed or reopened
    /// editor are dropped and `false` is returned.
    pub fn apply_description(&mut self, ticket: DescriptionTicket, text: String) -> bool {
        if ticket.session != self.session || !self.is_editable(DraftField::Description) {
            return false;
        }
        self.draft.description = text;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteSlot;

    fn store() -> InventoryStore {
        InventoryStore::open(Box::new(SqliteSlot::in_memory().unwrap())).unwrap()
    }

    fn add_robe(store: &mut InventoryStore) -> Item {
        store
            .add(ItemDraft {
                name: "Silk Robe".into(),
                cost: 20.0,
                potential_revenue: 50.0,
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_create_flow() {
        let mut store = store();
        let mut editor = ItemEditor::new();
        editor.open_create();
        assert_eq!(editor.state(), &EditorState::Creating);
        assert_eq!(editor.draft(), &Draft::default());

        editor.set_field(DraftField::Name, "Lace Slip");
        editor.set_field(DraftField::Cost, "12.5");
        editor.set_field(DraftField::PotentialRevenue, "not a number");

        let outcome = editor.submit(&mut store).unwrap();
        let EditorOutcome::Added(item) = outcome else {
            panic!("expected an added item");
        };
        assert_eq!(item.cost, 12.5);
        assert_eq!(item.potential_revenue, 0.0);
        assert!(!editor.is_open());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_submit_without_name_stays_open() {
        let mut store = store();
        let mut editor = ItemEditor::new();
        editor.open_create();
        editor.set_field(DraftField::Cost, "5");

        let err = editor.submit(&mut store).unwrap_err();
        assert!(matches!(err, VintiqueError::Validation(_)));
        assert!(editor.is_open());
        assert_eq!(editor.draft().cost, "5");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_edit_flow_updates_store() {
        let mut store = store();
        let robe = add_robe(&mut store);
        let mut editor = ItemEditor::new();
        editor.open_edit(&robe);
        assert_eq!(editor.draft().name, "Silk Robe");
        assert_eq!(editor.draft().cost, "20");

        editor.set_field(DraftField::Description, "Ivory, hand-rolled hems");
        let outcome = editor.submit(&mut store).unwrap();
        assert_eq!(outcome, EditorOutcome::Updated(robe.id.clone()));

        let stored = store.get(&robe.id).unwrap();
        assert_eq!(stored.description, "Ivory, hand-rolled hems");
        assert_eq!(stored.potential_revenue, 50.0);
    }

    #[test]
    fn test_sale_flow() {
        let mut store = store();
        let robe = add_robe(&mut store);
        let mut editor = ItemEditor::new();
        editor.open_edit(&robe);
        editor.set_field(DraftField::SoldPrice, "45");

        let outcome = editor.confirm_sale(&mut store).unwrap();
        assert_eq!(outcome, EditorOutcome::Sold(robe.id.clone()));
        assert!(!editor.is_open());
        assert_eq!(store.get(&robe.id).unwrap().sold_price, Some(45.0));
    }

    #[test]
    fn test_sold_item_is_locked() {
        let mut store = store();
        let robe = add_robe(&mut store);
        store.mark_sold(&robe.id, 45.0).unwrap();
        let sold = store.get(&robe.id).unwrap().clone();

        let mut editor = ItemEditor::new();
        editor.open_edit(&sold);
        assert!(editor.is_locked());
        assert!(editor.editable_fields().is_empty());
        assert!(!editor.set_field(DraftField::Name, "Renamed"));
        editor.push_char('x');
        assert_eq!(editor.draft().name, "Silk Robe");

        let err = editor.submit(&mut store).unwrap_err();
        assert!(matches!(err, VintiqueError::InvalidState(_)));
        let err = editor.confirm_sale(&mut store).unwrap_err();
        assert!(matches!(err, VintiqueError::InvalidState(_)));
        assert_eq!(store.get(&robe.id).unwrap().sold_price, Some(45.0));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = store();
        let robe = add_robe(&mut store);
        let mut editor = ItemEditor::new();
        editor.open_edit(&robe);

        assert!(editor.confirm_delete(&mut store).is_err());
        assert_eq!(store.snapshot().len(), 1);

        editor.request_delete().unwrap();
        editor.cancel_delete();
        assert!(editor.confirm_delete(&mut store).is_err());

        editor.request_delete().unwrap();
        let outcome = editor.confirm_delete(&mut store).unwrap();
        assert_eq!(outcome, EditorOutcome::Deleted(robe.id));
        assert!(store.snapshot().is_empty());
        assert!(!editor.is_open());
    }

    #[test]
    fn test_delete_not_available_while_creating() {
        let mut editor = ItemEditor::new();
        editor.open_create();
        assert!(editor.request_delete().is_err());
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut store = store();
        let mut editor = ItemEditor::new();
        editor.open_create();
        editor.set_field(DraftField::Name, "Bed Jacket");
        editor.cancel();
        assert!(!editor.is_open());
        assert_eq!(editor.draft(), &Draft::default());
        assert!(store.snapshot().is_empty());
        assert!(editor.submit(&mut store).is_err());
    }

    #[test]
    fn test_item_removed_while_open() {
        let mut store = store();
        let robe = add_robe(&mut store);
        let mut editor = ItemEditor::new();
        editor.open_edit(&robe);
        store.delete(&robe.id).unwrap();

        let outcome = editor.submit(&mut store).unwrap();
        assert_eq!(outcome, EditorOutcome::Missing(robe.id));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_focus_cycles_editable_fields() {
        let mut editor = ItemEditor::new();
        editor.open_create();
        assert_eq!(editor.focus(), DraftField::Name);
        editor.focus_prev();
        assert_eq!(editor.focus(), DraftField::PotentialRevenue);
        editor.focus_next();
        editor.focus_next();
        assert_eq!(editor.focus(), DraftField::Description);
        assert!(!editor.is_editable(DraftField::SoldPrice));
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut editor = ItemEditor::new();
        editor.open_create();
        for c in "Slipp".chars() {
            editor.push_char(c);
        }
        editor.pop_char();
        assert_eq!(editor.draft().name, "Slip");
    }

    #[test]
    fn test_submit_embeds_local_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slip.png");
        std::fs::write(&path, b"abc").unwrap();

        let mut store = store();
        let mut editor = ItemEditor::new();
        editor.open_create();
        editor.set_field(DraftField::Name, "Lace Slip");
        editor.set_field(DraftField::ImageUrl, path.to_string_lossy());

        let EditorOutcome::Added(item) = editor.submit(&mut store).unwrap() else {
            panic!("expected an added item");
        };
        assert_eq!(item.image_url, "data:image/png;base64,YWJj");
        assert_eq!(store.get(&item.id).unwrap().image_url, item.image_url);
    }

    #[test]
    fn test_missing_image_file_keeps_editor_open() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.jpg");

        let mut store = store();
        let robe = add_robe(&mut store);
        let mut editor = ItemEditor::new();
        editor.open_edit(&robe);
        editor.set_field(DraftField::ImageUrl, missing.to_string_lossy());

        assert!(editor.submit(&mut store).is_err());
        assert!(editor.is_open());
        assert_eq!(editor.draft().image_url, missing.to_string_lossy());
        assert_eq!(store.get(&robe.id).unwrap().image_url, "");
    }

    #[test]
    fn test_embedded_image_is_edited_as_one_value() {
        let mut store = store();
        let robe = add_robe(&mut store);
        store
            .update(
                &robe.id,
                &ItemPatch {
                    image_url: Some("data:image/png;base64,YWJj".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        let robe = store.get(&robe.id).unwrap().clone();

        let mut editor = ItemEditor::new();
        editor.open_edit(&robe);
        while editor.focus() != DraftField::ImageUrl {
            editor.focus_next();
        }
        editor.pop_char();
        assert_eq!(editor.draft().image_url, "");

        editor.open_edit(&robe);
        while editor.focus() != DraftField::ImageUrl {
            editor.focus_next();
        }
        editor.push_char('h');
        assert_eq!(editor.draft().image_url, "h");

        editor.open_edit(&robe);
        editor.submit(&mut store).unwrap();
        assert_eq!(
            store.get(&robe.id).unwrap().image_url,
            "data:image/png;base64,YWJj"
        );
    }

    #[test]
    fn test_description_applied_to_open_session() {
        let mut editor = ItemEditor::new();
        editor.open_create();
        let ticket = editor.description_ticket().unwrap();
        assert!(editor.apply_description(ticket, "Romantic silk.".into()));
        assert_eq!(editor.draft().description, "Romantic silk.");
    }

    #[test]
    fn test_description_discarded_after_close() {
        let mut editor = ItemEditor::new();
        editor.open_create();
        let ticket = editor.description_ticket().unwrap();
        editor.cancel();
        assert!(!editor.apply_description(ticket, "Too late.".into()));

        editor.open_create();
        assert!(!editor.apply_description(ticket, "Still too late.".into()));
        assert_eq!(editor.draft().description, "");
    }

    #[test]
    fn test_no_description_ticket_for_sold_item() {
        let mut store = store();
        let robe = add_robe(&mut store);
        store.mark_sold(&robe.id, 10.0).unwrap();
        let mut editor = ItemEditor::new();
        editor.open_edit(store.get(&robe.id).unwrap());
        assert!(editor.description_ticket().is_none());
    }
}
