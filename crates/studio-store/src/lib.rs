//! # studio-store
//!
//! In-memory state for one image-editing session.
//!
//! [`SessionState`] is only ever changed by [`reduce`]-ing an [`Action`].
//! [`SessionStore`] wraps the state with the named operations callers use
//! (and which mint ids and timestamps), [`SessionHandle`] shares a store
//! across tasks, and [`workflows`] drive an
//! [`ImageService`](studio_service::ImageService) around the store with the
//! loading/error bookkeeping every caller needs.

pub mod action;
pub mod gallery;
pub mod reducer;
pub mod state;
pub mod store;
pub mod workflows;

pub use action::Action;
pub use gallery::{count_by_kind, GalleryQuery, GallerySort, KindCounts, KindFilter};
pub use reducer::reduce;
pub use state::SessionState;
pub use store::{SessionHandle, SessionStore};
