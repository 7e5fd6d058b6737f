use studio_shared::constants::HISTORY_CAPACITY;

use crate::action::Action;
use crate::state::SessionState;

pub fn reduce(state: &mut SessionState, action: Action) {
    match action {
        Action::SetCurrentImage(image) => {
            state.current_image = image;
            state.error = None;
        }
        Action::AddGeneratedImage(image) => {
            state.generated_images.insert(0, image.clone());
            state.current_image = Some(image);
            state.error = None;
        }
        Action::AddToGallery(image) => {
            match state.gallery.iter().position(|img| img.id == image.id) {
                Some(idx) => state.gallery[idx] = image,
                None => state.gallery.insert(0, image),
            }
        }
        Action::RemoveFromGallery(id) => {
            state.gallery.retain(|img| img.id != id);
        }
        Action::SetLoading(loading) => {
            state.is_loading = loading;
        }
        Action::SetError(message) => {
            state.error = Some(message);
            state.is_loading = false;
        }
        Action::ClearError => {
            state.error = None;
        }
        Action::AddToHistory(entry) => {
            state.edit_history.push_back(entry);
            while state.edit_history.len() > HISTORY_CAPACITY {
                state.edit_history.pop_front();
            }
        }
        Action::UndoLastAction => {
            if let Some(entry) = state.edit_history.pop_back() {
                state.current_image = entry.image;
                state.active_filters = entry.filters.unwrap_or_default();
            }
        }
        Action::ApplyFilter { name, value } => {
            state.active_filters.insert(name, value);
        }
        Action::RemoveFilter(name) => {
            state.active_filters.remove(&name);
        }
        Action::SetSelectedTool(tool) => {
            state.selected_tool = tool;
        }
        Action::ResetState => {
            // Gallery survives a reset.
            let gallery = std::mem::take(&mut state.gallery);
            *state = SessionState {
                gallery,
                ..SessionState::new()
            };
        }
    }
}
