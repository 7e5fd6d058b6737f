/// Application name
pub const APP_NAME: &str = "Banana Studio";

/// Maximum number of snapshots kept in the edit history
pub const HISTORY_CAPACITY: usize = 20;

/// Tool selected when a session starts
pub const DEFAULT_TOOL: &str = "brush";

/// Length of the random suffix appended to synthesized image ids
pub const ID_SUFFIX_LEN: usize = 9;

/// Id prefixes, one per origin of an image record
pub const GENERATED_ID_PREFIX: &str = "generated";
pub const GALLERY_ID_PREFIX: &str = "gallery";
pub const UPLOADED_ID_PREFIX: &str = "uploaded";

/// Generation defaults
pub const DEFAULT_MODEL: &str = "flux-pro/ultra";
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";
pub const DEFAULT_STYLE: &str = "realistic";
pub const DEFAULT_QUALITY: &str = "high";
pub const DEFAULT_EDIT_TYPE: &str = "modify";
pub const DEFAULT_ENHANCEMENT: &str = "upscale";

/// Placeholder image host
pub const PLACEHOLDER_BASE_URL: &str = "https://picsum.photos/seed";

/// Width of placeholder images in pixels
pub const PLACEHOLDER_WIDTH: u32 = 800;

/// Base width used when reporting output dimensions for an aspect ratio
pub const DIMENSION_BASE_WIDTH: u32 = 1024;

/// Simulated processing time for models missing from the catalog
pub const DEFAULT_PROCESSING_MS: u64 = 2500;

/// Probability that a mock generation call fails
pub const DEFAULT_FAILURE_RATE: f64 = 0.05;

/// Default HTTP port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;
