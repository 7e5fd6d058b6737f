//! Models the generator can target, plus prompt suggestions.

use serde::Serialize;

use crate::constants::DEFAULT_PROCESSING_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Fast,
    Medium,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    High,
    Ultra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiModel {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub speed: Speed,
    pub quality: Quality,
    pub specialties: &'static [&'static str],
    /// Simulated generation latency in milliseconds.
    pub processing_time_ms: u64,
}

pub const AI_MODELS: &[AiModel] = &[
    AiModel {
        id: "flux-pro/ultra",
        name: "Flux Pro Ultra",
        description: "Fastest generation with high quality results",
        speed: Speed::Fast,
        quality: Quality::High,
        specialties: &["general", "realistic", "artistic"],
        processing_time_ms: 2000,
    },
    AiModel {
        id: "imagen4",
        name: "Imagen 4",
        description: "Google's latest model with superior quality",
        speed: Speed::Medium,
        quality: Quality::Ultra,
        specialties: &["photorealistic", "detailed", "accurate"],
        processing_time_ms: 3000,
    },
    AiModel {
        id: "recraft-v3",
        name: "Recraft V3",
        description: "Specialized in realistic image generation",
        speed: Speed::Medium,
        quality: Quality::High,
        specialties: &["realistic", "photography", "portraits"],
        processing_time_ms: 2500,
    },
    AiModel {
        id: "ideogram/V_3",
        name: "Ideogram V3",
        description: "Best for character consistency and faces",
        speed: Speed::Slow,
        quality: Quality::Ultra,
        specialties: &["faces", "characters", "consistency"],
        processing_time_ms: 3500,
    },
];

pub const SAMPLE_PROMPTS: &[&str] = &[
    "A majestic dragon soaring through clouds at golden hour",
    "Cyberpunk cityscape with neon lights reflecting on wet streets",
    "Ancient library filled with floating books and magical energy",
    "Astronaut exploring an alien jungle with bioluminescent plants",
    "Steampunk airship floating above Victorian London",
    "Underwater palace with mermaids and coral gardens",
    "Post-apocalyptic wasteland with overgrown ruins",
    "Medieval knight in enchanted armor standing in moonlight",
    "Futuristic laboratory with holographic displays and robots",
    "Mystical forest clearing with fairy circles and glowing mushrooms",
];

pub fn find_model(id: &str) -> Option<&'static AiModel> {
    AI_MODELS.iter().find(|m| m.id == id)
}

/// Simulated latency for `model`; unknown models get the default.
pub fn processing_time_ms(model: &str) -> u64 {
    find_model(model)
        .map(|m| m.processing_time_ms)
        .unwrap_or(DEFAULT_PROCESSING_MS)
}
