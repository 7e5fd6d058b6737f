//! # studio-shared
//!
//! Types and helpers shared by every Banana Studio crate: the image and
//! session data model, filter presets, the model catalog, and the
//! placeholder-URL utilities used by the mock image service.

pub mod catalog;
pub mod constants;
pub mod ids;
pub mod presets;
pub mod seed;
pub mod types;

pub use types::*;
