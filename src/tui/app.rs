use ratatui::widgets::ListState;

use crate::domain::Item;
use crate::editor::{DescriptionTicket, ItemEditor};

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub items: Vec<Item>,
    pub item_index: usize,
    pub list_state: ListState,
    pub editor: ItemEditor,
    pub should_quit: bool,
    pub status_message: Option<String>,
    // Pending delete confirmation from the list (item_id, item_name)
    pub pending_delete: Option<(String, String)>,
    // Description request in flight for the open editor session
    pub generating: Option<DescriptionTicket>,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            items: Vec::new(),
            item_index: 0,
            list_state,
            editor: ItemEditor::new(),
            should_quit: false,
            status_message: None,
            pending_delete: None,
            generating: None,
        }
    }

    /// Refresh the local copy of the inventory, keeping the selection in range.
    pub fn sync(&mut self, items: &[Item]) {
        self.items = items.to_vec();
        if self.item_index >= self.items.len() {
            self.item_index = self.items.len().saturating_sub(1);
        }
        self.list_state.select(Some(self.item_index));
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.item_index)
    }

    pub fn move_up(&mut self) {
        self.select(self.item_index.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.item_index + 1);
    }

    pub fn next_page(&mut self) {
        self.select(self.item_index + PAGE_SIZE);
    }

    pub fn prev_page(&mut self) {
        self.select(self.item_index.saturating_sub(PAGE_SIZE));
    }

    fn select(&mut self, index: usize) {
        let max_index = self.items.len().saturating_sub(1);
        self.item_index = index.min(max_index);
        self.list_state.select(Some(self.item_index));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
