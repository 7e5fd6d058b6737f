use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ASPECT_RATIO, DEFAULT_MODEL, DEFAULT_QUALITY, DEFAULT_STYLE};

/// Where an image record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Generated,
    Uploaded,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Uploaded => "uploaded",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single adjustment value. Presets only use numbers, but callers may
/// store arbitrary text (e.g. a blend mode name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Filter name -> value. A missing key means the filter is not applied.
pub type ActiveFilters = BTreeMap<String, FilterValue>;

/// Settings the generator page submits alongside a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub model: String,
    pub aspect_ratio: String,
    pub style: String,
    pub quality: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.into(),
            style: DEFAULT_STYLE.into(),
            quality: DEFAULT_QUALITY.into(),
        }
    }
}

/// An image known to the session.
///
/// `id` and `created_at` are fixed when the record is created. The optional
/// metadata is carried through the store untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GenerationSettings>,
    /// Enhancement applied to produce this image (e.g. `upscale`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<String>,
    /// Prompt of the AI modification that produced this image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_applied: Option<String>,
    /// Filters active when the image was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ActiveFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl ImageRecord {
    /// Text used for searching and name-sorting: the prompt, else the name.
    pub fn label(&self) -> &str {
        self.prompt
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

/// Partial image data. Used where the caller does not (yet) own an id or a
/// creation timestamp, e.g. freshly generated images or gallery saves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDraft {
    pub id: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: Option<ImageKind>,
    pub created_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub settings: Option<GenerationSettings>,
    pub enhancement: Option<String>,
    pub edit_prompt: Option<String>,
    pub style_applied: Option<String>,
    pub filters: Option<ActiveFilters>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl ImageDraft {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.model = Some(settings.model.clone());
        self.settings = Some(settings);
        self
    }

    /// Materialize the draft with the identity fields supplied by the caller.
    /// Any id, kind or timestamp already on the draft is discarded.
    pub fn into_record(self, id: String, kind: ImageKind, created_at: DateTime<Utc>) -> ImageRecord {
        ImageRecord {
            id,
            url: self.url,
            kind,
            created_at,
            saved_at: None,
            name: self.name,
            prompt: self.prompt,
            model: self.model,
            settings: self.settings,
            enhancement: self.enhancement,
            edit_prompt: self.edit_prompt,
            style_applied: self.style_applied,
            filters: self.filters,
            edited_at: self.edited_at,
        }
    }
}

impl From<ImageRecord> for ImageDraft {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: Some(record.id),
            url: record.url,
            kind: Some(record.kind),
            created_at: Some(record.created_at),
            name: record.name,
            prompt: record.prompt,
            model: record.model,
            settings: record.settings,
            enhancement: record.enhancement,
            edit_prompt: record.edit_prompt,
            style_applied: record.style_applied,
            filters: record.filters,
            edited_at: record.edited_at,
        }
    }
}

/// Snapshot taken before a destructive edit so it can be undone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub image: Option<ImageRecord>,
    pub filters: Option<ActiveFilters>,
}
