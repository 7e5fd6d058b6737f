use studio_shared::{FilterValue, HistoryEntry, ImageRecord};

/// Every way session state can change. Ids and timestamps are already
/// resolved by the time an action is built, so [`reduce`](crate::reduce) is
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCurrentImage(Option<ImageRecord>),
    AddGeneratedImage(ImageRecord),
    AddToGallery(ImageRecord),
    RemoveFromGallery(String),
    SetLoading(bool),
    SetError(String),
    ClearError,
    AddToHistory(HistoryEntry),
    UndoLastAction,
    ApplyFilter { name: String, value: FilterValue },
    RemoveFilter(String),
    SetSelectedTool(String),
    ResetState,
}

impl Action {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCurrentImage(_) => "set_current_image",
            Self::AddGeneratedImage(_) => "add_generated_image",
            Self::AddToGallery(_) => "add_to_gallery",
            Self::RemoveFromGallery(_) => "remove_from_gallery",
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
            Self::ClearError => "clear_error",
            Self::AddToHistory(_) => "add_to_history",
            Self::UndoLastAction => "undo_last_action",
            Self::ApplyFilter { .. } => "apply_filter",
            Self::RemoveFilter(_) => "remove_filter",
            Self::SetSelectedTool(_) => "set_selected_tool",
            Self::ResetState => "reset_state",
        }
    }
}
