use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::debug;

use studio_shared::constants::{GALLERY_ID_PREFIX, GENERATED_ID_PREFIX};
use studio_shared::ids::generate_id;
use studio_shared::{FilterValue, HistoryEntry, ImageDraft, ImageKind, ImageRecord};

use crate::action::Action;
use crate::reducer::reduce;
use crate::state::SessionState;

/// Owner of one [`SessionState`].
///
/// Every method builds an [`Action`] and dispatches it; none of them fail.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "Dispatching session action");
        reduce(&mut self.state, action);
    }

    pub fn set_current_image(&mut self, image: Option<ImageRecord>) {
        self.dispatch(Action::SetCurrentImage(image));
    }

    /// Store a freshly generated image and make it current.
    ///
    /// The draft's id, kind and creation time are replaced with a new
    /// `generated_*` id, [`ImageKind::Generated`] and now.
    pub fn add_generated_image(&mut self, draft: ImageDraft) -> ImageRecord {
        let image = draft.into_record(
            generate_id(GENERATED_ID_PREFIX),
            ImageKind::Generated,
            Utc::now(),
        );
        self.dispatch(Action::AddGeneratedImage(image.clone()));
        image
    }

    /// Save an image to the gallery, replacing any entry with the same id.
    ///
    /// Drafts without an id (or with an empty one) get a `gallery_*` id; drafts without a kind are
    /// treated as uploads. `saved_at` is always set to now.
    pub fn add_to_gallery(&mut self, draft: impl Into<ImageDraft>) -> ImageRecord {
        let draft = draft.into();
        let now = Utc::now();
        let id = draft
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| generate_id(GALLERY_ID_PREFIX));
        let kind = draft.kind.unwrap_or(ImageKind::Uploaded);
        let created_at = draft.created_at.unwrap_or(now);

        let mut image = draft.into_record(id, kind, created_at);
        image.saved_at = Some(now);

        self.dispatch(Action::AddToGallery(image.clone()));
        image
    }

    pub fn remove_from_gallery(&mut self, id: &str) {
        self.dispatch(Action::RemoveFromGallery(id.to_string()));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.dispatch(Action::SetLoading(loading));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.dispatch(Action::SetError(message.into()));
    }

    pub fn clear_error(&mut self) {
        self.dispatch(Action::ClearError);
    }

    pub fn add_to_history(&mut self, entry: HistoryEntry) {
        self.dispatch(Action::AddToHistory(entry));
    }

    /// Snapshot of the current image and filters, suitable for
    /// [`add_to_history`](Self::add_to_history).
    pub fn history_snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            image: self.state.current_image.clone(),
            filters: Some(self.state.active_filters.clone()),
        }
    }

    pub fn undo_last_action(&mut self) {
        self.dispatch(Action::UndoLastAction);
    }

    pub fn apply_filter(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.dispatch(Action::ApplyFilter {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn remove_filter(&mut self, name: &str) {
        self.dispatch(Action::RemoveFilter(name.to_string()));
    }

    pub fn set_selected_tool(&mut self, tool: impl Into<String>) {
        self.dispatch(Action::SetSelectedTool(tool.into()));
    }

    pub fn reset_state(&mut self) {
        self.dispatch(Action::ResetState);
    }
}

/// Cloneable, thread-safe handle to a [`SessionStore`].
///
/// The lock is only held for the duration of the closure passed to
/// [`with`](Self::with); never hold it across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<SessionStore>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut SessionStore) -> R) -> R {
        // Poisoning is ignored; a panicking closure may leave partial updates.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    pub fn snapshot(&self) -> SessionState {
        self.with(|store| store.state().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = SessionStore::new();
        let state = store.state();
        assert!(state.current_image.is_none());
        assert!(state.generated_images.is_empty());
        assert!(state.gallery.is_empty());
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.edit_history.is_empty());
        assert!(state.active_filters.is_empty());
        assert_eq!(state.selected_tool, "brush");
    }

    #[test]
    fn test_generated_images_scenario() {
        let mut store = SessionStore::new();
        let a = store.add_generated_image(ImageDraft::new("a"));
        let b = store.add_generated_image(ImageDraft::new("b"));

        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("generated_"));
        assert_eq!(a.kind, ImageKind::Generated);

        let state = store.state();
        assert_eq!(state.generated_images, vec![b.clone(), a]);
        assert_eq!(state.current_image, Some(b));
    }

    #[test]
    fn test_generated_overrides_draft_identity() {
        let mut store = SessionStore::new();
        let draft = ImageDraft {
            kind: Some(ImageKind::Uploaded),
            ..ImageDraft::new("u").with_id("mine")
        };
        let image = store.add_generated_image(draft);
        assert_ne!(image.id, "mine");
        assert_eq!(image.kind, ImageKind::Generated);
    }

    #[test]
    fn test_generated_count_matches_calls() {
        let mut store = SessionStore::new();
        for i in 0..30 {
            store.add_generated_image(ImageDraft::new(format!("u{i}")));
        }
        let urls: Vec<&str> = store
            .state()
            .generated_images
            .iter()
            .map(|i| i.url.as_str())
            .collect();
        assert_eq!(urls.len(), 30);
        assert_eq!(urls[0], "u29");
        assert_eq!(urls[29], "u0");
    }

    #[test]
    fn test_gallery_same_id_replaces() {
        let mut store = SessionStore::new();
        store.add_to_gallery(ImageDraft::new("1").with_id("x"));
        let second = store.add_to_gallery(ImageDraft::new("2").with_id("x"));

        let gallery = &store.state().gallery;
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery[0].id, "x");
        assert_eq!(gallery[0].url, "2");
        assert_eq!(gallery[0], second);
    }

    #[test]
    fn test_gallery_synthesizes_id_and_saved_at() {
        let mut store = SessionStore::new();
        let saved = store.add_to_gallery(ImageDraft::new("u"));
        assert!(saved.id.starts_with("gallery_"));
        assert!(saved.saved_at.is_some());
        assert_eq!(saved.kind, ImageKind::Uploaded);
    }

    #[test]
    fn test_gallery_empty_id_is_synthesized() {
        let mut store = SessionStore::new();
        let a = store.add_to_gallery(ImageDraft::new("1").with_id(""));
        let b = store.add_to_gallery(ImageDraft::new("2").with_id(""));

        assert!(a.id.starts_with("gallery_"));
        assert!(b.id.starts_with("gallery_"));
        assert_ne!(a.id, b.id);
        assert_eq!(store.state().gallery.len(), 2);
    }

    #[test]
    fn test_generated_image_can_be_saved_under_same_id() {
        let mut store = SessionStore::new();
        let image = store.add_generated_image(ImageDraft::new("u").with_prompt("banana"));
        let saved = store.add_to_gallery(image.clone());

        assert_eq!(saved.id, image.id);
        assert_eq!(saved.created_at, image.created_at);
        assert_eq!(saved.kind, ImageKind::Generated);
        assert_eq!(saved.prompt.as_deref(), Some("banana"));
        assert_eq!(store.state().gallery.len(), 1);
        assert_eq!(store.state().generated_images.len(), 1);
    }

    #[test]
    fn test_history_snapshot() {
        let mut store = SessionStore::new();
        store.apply_filter("sepia", 40);
        let snap = store.history_snapshot();
        assert!(snap.image.is_none());
        assert_eq!(snap.filters.unwrap().len(), 1);
    }

    #[test]
    fn test_handle_shares_state() {
        let handle = SessionHandle::new();
        let other = handle.clone();
        other.with(|s| s.set_selected_tool("eraser"));
        assert_eq!(handle.snapshot().selected_tool, "eraser");
    }

    #[test]
    fn test_handle_across_threads() {
        let handle = SessionHandle::new();
        let workers: Vec<_> = (0..4)
            .map(|t| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        handle.with(|s| {
                            s.add_to_gallery(ImageDraft::new("u").with_id(format!("{t}-{i}")));
                        });
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        assert_eq!(handle.snapshot().gallery.len(), 100);
    }
}
