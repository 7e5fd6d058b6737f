use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use studio_shared::constants::{
    DEFAULT_ASPECT_RATIO, DEFAULT_EDIT_TYPE, DEFAULT_ENHANCEMENT, DEFAULT_MODEL,
};

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_aspect_ratio() -> String {
    DEFAULT_ASPECT_RATIO.to_string()
}

fn default_edit_type() -> String {
    DEFAULT_EDIT_TYPE.to_string()
}

fn default_enhancement() -> String {
    DEFAULT_ENHANCEMENT.to_string()
}

// ─── Generation ───

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(alias = "query")]
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: default_model(),
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    pub model: String,
    pub aspect_ratio: String,
    pub prompt: String,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

// ─── Editing ───

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    pub image_url: String,
    pub prompt: String,
    #[serde(default = "default_edit_type")]
    pub edit_type: String,
}

impl EditRequest {
    pub fn new(image_url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            prompt: prompt.into(),
            edit_type: default_edit_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditedImage {
    pub url: String,
    pub original_url: String,
    pub edit_prompt: String,
    pub edit_type: String,
    pub edited_at: DateTime<Utc>,
}

// ─── Enhancement ───

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub image_url: String,
    #[serde(default = "default_enhancement")]
    pub enhancement_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedImage {
    pub url: String,
    pub original_url: String,
    pub enhancement_type: String,
    /// `2x` for upscaling, `1x` otherwise.
    pub enhancement_factor: String,
    pub enhanced_at: DateTime<Utc>,
}

// ─── Style transfer ───

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRequest {
    pub image_url: String,
    pub style_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledImage {
    pub url: String,
    pub original_url: String,
    pub style_applied: String,
    pub styled_at: DateTime<Utc>,
}

// ─── Analysis ───

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalInfo {
    pub dimensions: String,
    pub format: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub objects: Vec<String>,
    pub colors: Vec<String>,
    pub style: String,
    /// 70..=99
    pub quality_score: u8,
    pub suggested_prompts: Vec<String>,
    pub technical_info: TechnicalInfo,
}
