//! Placeholder-backed image service.
//!
//! Every operation sleeps for a fixed, operation-specific time and returns a
//! placeholder URL. Generation additionally fails at random with
//! [`MockConfig::failure_rate`] probability.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use studio_shared::catalog::processing_time_ms;
use studio_shared::constants::{DEFAULT_ASPECT_RATIO, DEFAULT_FAILURE_RATE};
use studio_shared::seed::{placeholder_url, style_seed};

use crate::error::{Result, ServiceError};
use crate::service::ImageService;
use crate::types::{
    EditRequest, EditedImage, EnhanceRequest, EnhancedImage, GenerateRequest, GeneratedImage,
    ImageAnalysis, StyleRequest, StyledImage, TechnicalInfo,
};

const EDIT_DELAY_MS: u64 = 1500;
const ENHANCE_DELAY_MS: u64 = 2000;
const STYLE_DELAY_MS: u64 = 2500;
const ANALYZE_DELAY_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MockConfig {
    /// Sleep for the simulated processing time before answering.
    pub simulate_latency: bool,
    /// Probability in `0.0..=1.0` that `generate` fails.
    pub failure_rate: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MockImageService {
    config: MockConfig,
}

impl MockImageService {
    pub fn new(mut config: MockConfig) -> Self {
        if !(0.0..=1.0).contains(&config.failure_rate) {
            warn!(
                failure_rate = config.failure_rate,
                "Failure rate out of range, clamping"
            );
            config.failure_rate = config.failure_rate.clamp(0.0, 1.0);
        }
        if config.failure_rate.is_nan() {
            config.failure_rate = 0.0;
        }
        Self { config }
    }

    /// No latency and no injected failures.
    pub fn instant() -> Self {
        Self::new(MockConfig {
            simulate_latency: false,
            failure_rate: 0.0,
        })
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    async fn simulate(&self, millis: u64) {
        if self.config.simulate_latency {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    fn roll_failure(&self) -> bool {
        self.config.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.config.failure_rate)
    }
}

fn now_seed() -> Option<u64> {
    u64::try_from(Utc::now().timestamp_millis()).ok()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

#[async_trait]
impl ImageService for MockImageService {
    async fn generate(&self, req: GenerateRequest) -> Result<GeneratedImage> {
        require("prompt", &req.prompt)?;

        let processing = processing_time_ms(&req.model);
        self.simulate(processing).await;

        if self.roll_failure() {
            warn!(model = %req.model, "Simulated generation failure");
            return Err(ServiceError::Unavailable);
        }

        let url = placeholder_url(&req.prompt, &req.aspect_ratio, None);
        debug!(model = %req.model, url = %url, "Generated placeholder image");

        Ok(GeneratedImage {
            url,
            model: req.model,
            aspect_ratio: req.aspect_ratio,
            prompt: req.prompt,
            generated_at: Utc::now(),
            processing_time_ms: processing,
        })
    }

    async fn edit(&self, req: EditRequest) -> Result<EditedImage> {
        require("image_url", &req.image_url)?;
        require("prompt", &req.prompt)?;

        self.simulate(EDIT_DELAY_MS).await;

        let url = placeholder_url(
            &format!("{}_edited", req.prompt),
            DEFAULT_ASPECT_RATIO,
            now_seed(),
        );
        debug!(edit_type = %req.edit_type, url = %url, "Edited placeholder image");

        Ok(EditedImage {
            url,
            original_url: req.image_url,
            edit_prompt: req.prompt,
            edit_type: req.edit_type,
            edited_at: Utc::now(),
        })
    }

    async fn enhance(&self, req: EnhanceRequest) -> Result<EnhancedImage> {
        require("image_url", &req.image_url)?;

        self.simulate(ENHANCE_DELAY_MS).await;

        let url = placeholder_url(
            &format!("enhanced_{}", req.enhancement_type),
            DEFAULT_ASPECT_RATIO,
            now_seed(),
        );
        let factor = if req.enhancement_type == "upscale" { "2x" } else { "1x" };

        Ok(EnhancedImage {
            url,
            original_url: req.image_url,
            enhancement_factor: factor.to_string(),
            enhancement_type: req.enhancement_type,
            enhanced_at: Utc::now(),
        })
    }

    async fn style_transfer(&self, req: StyleRequest) -> Result<StyledImage> {
        require("image_url", &req.image_url)?;
        require("style_name", &req.style_name)?;

        self.simulate(STYLE_DELAY_MS).await;

        let url = placeholder_url(
            &format!("styled_{}", req.style_name),
            DEFAULT_ASPECT_RATIO,
            Some(style_seed(&req.style_name)),
        );

        Ok(StyledImage {
            url,
            original_url: req.image_url,
            style_applied: req.style_name,
            styled_at: Utc::now(),
        })
    }

    async fn analyze(&self, image_url: &str) -> Result<ImageAnalysis> {
        require("image_url", image_url)?;

        self.simulate(ANALYZE_DELAY_MS).await;

        let quality_score = rand::thread_rng().gen_range(70..100);

        Ok(ImageAnalysis {
            objects: to_strings(&["person", "building", "sky", "tree"]),
            colors: to_strings(&["blue", "green", "brown", "white"]),
            style: "photographic".to_string(),
            quality_score,
            suggested_prompts: to_strings(&[
                "A person standing in front of a modern building",
                "Urban landscape with architectural elements",
                "Professional photography of city environment",
            ]),
            technical_info: TechnicalInfo {
                dimensions: "800x450".to_string(),
                format: "JPEG".to_string(),
                size: "156KB".to_string(),
            },
        })
    }
}
