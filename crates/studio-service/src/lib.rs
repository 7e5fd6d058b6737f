//! # studio-service
//!
//! The image service the studio talks to. [`ImageService`] is the seam;
//! [`MockImageService`] is the only implementation and hands out
//! placeholder URLs after a simulated processing delay.

pub mod error;
pub mod mock;
pub mod types;

mod service;

pub use error::ServiceError;
pub use mock::{MockConfig, MockImageService};
pub use service::ImageService;
pub use types::*;
