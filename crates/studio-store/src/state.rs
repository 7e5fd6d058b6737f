use std::collections::VecDeque;

use serde::Serialize;

use studio_shared::constants::DEFAULT_TOOL;
use studio_shared::{ActiveFilters, HistoryEntry, ImageRecord};

/// Everything the studio pages render.
///
/// `generated_images` and `gallery` are newest-first. `gallery` holds at most
/// one record per id. `edit_history` never exceeds
/// [`HISTORY_CAPACITY`](studio_shared::constants::HISTORY_CAPACITY) entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_image: Option<ImageRecord>,
    pub generated_images: Vec<ImageRecord>,
    pub gallery: Vec<ImageRecord>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub edit_history: VecDeque<HistoryEntry>,
    pub active_filters: ActiveFilters,
    pub selected_tool: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current_image: None,
            generated_images: Vec::new(),
            gallery: Vec::new(),
            is_loading: false,
            error: None,
            edit_history: VecDeque::new(),
            active_filters: ActiveFilters::new(),
            selected_tool: DEFAULT_TOOL.to_string(),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.edit_history.is_empty()
    }

    pub fn gallery_item(&self, id: &str) -> Option<&ImageRecord> {
        self.gallery.iter().find(|img| img.id == id)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
