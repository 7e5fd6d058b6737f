//! Named filter bundles offered by the editor.

use serde::Serialize;

use crate::types::{ActiveFilters, FilterValue};

/// A named set of adjustments applied together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterPreset {
    pub key: &'static str,
    pub name: &'static str,
    #[serde(skip)]
    pub filters: &'static [(&'static str, f64)],
}

impl FilterPreset {
    /// The preset's adjustments as an [`ActiveFilters`] map.
    pub fn adjustments(&self) -> ActiveFilters {
        self.filters
            .iter()
            .map(|(name, value)| (name.to_string(), FilterValue::Number(*value)))
            .collect()
    }
}

pub const FILTER_PRESETS: &[FilterPreset] = &[
    FilterPreset {
        key: "vintage",
        name: "Vintage",
        filters: &[
            ("sepia", 40.0),
            ("contrast", 110.0),
            ("brightness", 90.0),
            ("saturation", 80.0),
        ],
    },
    FilterPreset {
        key: "dramatic",
        name: "Dramatic",
        filters: &[
            ("contrast", 130.0),
            ("brightness", 85.0),
            ("saturation", 120.0),
            ("shadows", -20.0),
        ],
    },
    FilterPreset {
        key: "cool",
        name: "Cool",
        filters: &[("temperature", -200.0), ("tint", 10.0), ("saturation", 110.0)],
    },
    FilterPreset {
        key: "warm",
        name: "Warm",
        filters: &[("temperature", 200.0), ("tint", -10.0), ("brightness", 105.0)],
    },
    FilterPreset {
        key: "blackwhite",
        name: "Black & White",
        filters: &[("saturation", 0.0), ("contrast", 115.0)],
    },
    FilterPreset {
        key: "cyberpunk",
        name: "Cyberpunk",
        filters: &[
            ("hue", 280.0),
            ("saturation", 140.0),
            ("contrast", 120.0),
            ("brightness", 95.0),
        ],
    },
];

pub fn find_preset(key: &str) -> Option<&'static FilterPreset> {
    FILTER_PRESETS.iter().find(|p| p.key == key)
}
