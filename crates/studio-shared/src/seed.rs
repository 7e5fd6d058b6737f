//! Seed derivation and placeholder image URLs.
//!
//! The mock image service does not render anything. It hands out
//! placeholder-host URLs whose seed is derived from the request text, so the
//! same prompt always maps to the same picture.

use crate::constants::{DIMENSION_BASE_WIDTH, PLACEHOLDER_BASE_URL, PLACEHOLDER_WIDTH};

/// Output size for an aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Rolling 31x hash over UTF-16 code units with 32-bit wrap-around, then the
/// absolute value.
pub fn text_to_seed(text: &str) -> u64 {
    let hash = text.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    });
    u64::from(hash.unsigned_abs())
}

/// Sum of the UTF-16 code units of a style name.
pub fn style_seed(style: &str) -> u64 {
    style.encode_utf16().map(u64::from).sum()
}

/// Parse `"w:h"`. Zero or malformed components yield `None`.
pub fn parse_aspect_ratio(aspect: &str) -> Option<(u32, u32)> {
    let (w, h) = aspect.split_once(':')?;
    let w: u32 = w.trim().parse().ok()?;
    let h: u32 = h.trim().parse().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

fn scaled_height(base_width: u32, aspect: &str) -> u32 {
    let (w, h) = parse_aspect_ratio(aspect).unwrap_or((16, 9));
    (f64::from(base_width) * f64::from(h) / f64::from(w)).round() as u32
}

/// Placeholder URL for `text` at `aspect`. A zero or missing `seed` falls back
/// to [`text_to_seed`].
pub fn placeholder_url(text: &str, aspect: &str, seed: Option<u64>) -> String {
    let seed = seed
        .filter(|s| *s != 0)
        .unwrap_or_else(|| text_to_seed(text));
    format!(
        "{PLACEHOLDER_BASE_URL}/{seed}/{PLACEHOLDER_WIDTH}/{}",
        scaled_height(PLACEHOLDER_WIDTH, aspect)
    )
}

pub fn image_dimensions(aspect: &str) -> ImageDimensions {
    ImageDimensions {
        width: DIMENSION_BASE_WIDTH,
        height: scaled_height(DIMENSION_BASE_WIDTH, aspect),
    }
}

/// Human readable size, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let bytes = bytes as f64;
    let exp = (bytes.ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes / 1024f64.powi(exp as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[exp])
}
