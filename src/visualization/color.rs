//! Score → color mapping.

use super::constants::{COLOR_FALLBACK, COLOR_MISSING};
use crate::scores::MISSING_SCORE;

/// Maps a node value to a `#rrggbb` color.
///
/// Implementations must be pure and must accept any `f64`, NaN included.
pub trait ColorMapper {
    fn color(&self, value: f64) -> String;
}

/// Linear red (0.0) → green (1.0) scale with gray for missing scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedGreenScale;

impl ColorMapper for RedGreenScale {
    fn color(&self, value: f64) -> String {
        if value == MISSING_SCORE {
            COLOR_MISSING.to_string()
        } else if (0.0..=1.0).contains(&value) {
            rgb_hex(1.0 - value, value, 0.0)
        } else {
            COLOR_FALLBACK.to_string()
        }
    }
}

/// Hex color of unit-range RGB channels.
pub fn rgb_hex(r: f64, g: f64, b: f64) -> String {
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

fn channel(c: f64) -> u8 {
    // Clamped, so the cast cannot truncate
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_score_is_gray() {
        assert_eq!(RedGreenScale.color(MISSING_SCORE), "#808080");
    }

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(RedGreenScale.color(0.0), "#ff0000");
        assert_eq!(RedGreenScale.color(1.0), "#00ff00");
    }

    #[test]
    fn test_scale_midpoint() {
        assert_eq!(RedGreenScale.color(0.5), "#808000");
        assert_eq!(RedGreenScale.color(0.25), "#bf4000");
    }

    #[test]
    fn test_out_of_range_falls_back_to_gray() {
        assert_eq!(RedGreenScale.color(2.0), "#808080");
        assert_eq!(RedGreenScale.color(-0.5), "#808080");
        assert_eq!(RedGreenScale.color(f64::NAN), "#808080");
        assert_eq!(RedGreenScale.color(f64::INFINITY), "#808080");
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb_hex(0.0, 0.0, 1.0), "#0000ff");
        assert_eq!(rgb_hex(1.5, -1.0, 0.0), "#ff0000");
    }
}
