//! Per-frame gradient assembly: zips wave-field positions with adjusted
//! colors into the two stop lists the host paints each tick.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::ConfigSnapshot;
use crate::wave::{self, INTENSITY_TIME_SCALE};

/// Fixed time shift decorrelating the secondary gradient from the primary.
pub const SECONDARY_PHASE_OFFSET_MS: f64 = 2000.0;

/// Opacity at which the host composites the primary gradient layer.
pub const PRIMARY_LAYER_OPACITY: f64 = 0.8;

/// Opacity at which the host composites the secondary gradient layer,
/// painted beneath the primary.
pub const SECONDARY_LAYER_OPACITY: f64 = 0.6;

/// One anchor point of a gradient, in the form the host renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GradientStop {
    /// Percentage offset, e.g. `"42%"`. Not guaranteed ascending across
    /// stops; consumers needing sorted offsets must re-sort.
    pub offset: String,
    /// Lowercase `#rrggbb` color.
    pub color: String,
    pub opacity: f64,
}

/// One frame of output: stop lists for both gradient layers. Empty lists
/// mean the host should fall back to its flat background fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GradientFrame {
    pub primary: Vec<GradientStop>,
    pub secondary: Vec<GradientStop>,
}

/// Build one layer's stops at logical time `time_ms`.
///
/// Stops are emitted in config order regardless of their numeric offsets.
/// The brightness and saturation passes run only for non-identity factors,
/// and the highlight pass only when `highlights > 0` — exact short-circuits,
/// so identity configs reproduce the configured colors byte for byte.
pub fn generate_stops(snapshot: &ConfigSnapshot, time_ms: f64) -> Vec<GradientStop> {
    let positions = wave::color_positions(snapshot, time_ms, snapshot.active_colors.len());

    snapshot
        .active_colors
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(index, (&base_color, position))| {
            let mut color = base_color;
            if snapshot.color_brightness != 1.0 {
                color = color.adjust_brightness(snapshot.color_brightness);
            }
            if snapshot.color_saturation != 1.0 {
                color = color.adjust_saturation(snapshot.color_saturation);
            }
            if snapshot.highlights > 0.0 {
                let wave_intensity =
                    ((time_ms * INTENSITY_TIME_SCALE + index as f64).sin() + 1.0) * 0.5;
                color = color.apply_highlight(wave_intensity, snapshot.highlights);
            }
            GradientStop {
                offset: format!("{}%", (position * 100.0).round() as i64),
                color: color.to_hex(),
                opacity: 1.0,
            }
        })
        .collect()
}

/// Build a full frame: the primary layer at `time_ms` and the secondary
/// layer phase-shifted 2 seconds ahead.
pub fn generate_frame(snapshot: &ConfigSnapshot, time_ms: f64) -> GradientFrame {
    GradientFrame {
        primary: generate_stops(snapshot, time_ms),
        secondary: generate_stops(snapshot, time_ms + SECONDARY_PHASE_OFFSET_MS),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::{BackdropConfig, ColorEntry};

    fn two_color_config() -> BackdropConfig {
        BackdropConfig {
            colors: vec![ColorEntry::new("#D3F6FA"), ColorEntry::new("#FFFCEB")],
            speed: 4.0,
            color_blending: 5.0,
            highlights: 0.0,
            color_brightness: 1.0,
            color_saturation: 1.0,
            ..BackdropConfig::default()
        }
    }

    #[test]
    fn no_enabled_colors_yields_empty_frame() {
        let config = BackdropConfig {
            colors: vec![ColorEntry {
                color: "#D3F6FA".to_string(),
                enabled: false,
            }],
            ..BackdropConfig::default()
        };
        let snapshot = config.validate().unwrap();
        for t in [0.0, 555.5, 1e7] {
            let frame = generate_frame(&snapshot, t);
            assert!(frame.primary.is_empty());
            assert!(frame.secondary.is_empty());
        }
    }

    #[test]
    fn identity_factors_pass_colors_through_untouched() {
        let snapshot = two_color_config().validate().unwrap();
        let stops = generate_stops(&snapshot, 0.0);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].offset, "0%");
        assert_eq!(stops[0].color, "#d3f6fa");
        assert_eq!(stops[1].offset, "100%");
        assert_eq!(stops[1].color, "#fffceb");
        assert_eq!(stops[0].opacity, 1.0);
    }

    #[test]
    fn brightness_factor_applies_when_not_identity() {
        let config = BackdropConfig {
            color_brightness: 0.5,
            ..two_color_config()
        };
        let stops = generate_stops(&config.validate().unwrap(), 0.0);
        // #D3F6FA halved: 0xd3=211 -> 106 = 0x6a, 0xf6=246 -> 123 = 0x7b,
        // 0xfa=250 -> 125 = 0x7d.
        assert_eq!(stops[0].color, "#6a7b7d");
    }

    #[test]
    fn highlight_pass_only_runs_when_enabled() {
        let base = generate_stops(&two_color_config().validate().unwrap(), 750.0);
        let lit_config = BackdropConfig {
            highlights: 8.0,
            ..two_color_config()
        };
        let lit = generate_stops(&lit_config.validate().unwrap(), 750.0);
        assert_eq!(base.len(), lit.len());
        // Same positions, brighter (or clamped-equal) colors.
        assert_eq!(base[0].offset, lit[0].offset);
        assert_ne!(base, lit);
    }

    #[test]
    fn stops_follow_config_order_not_offset_order() {
        let config = BackdropConfig {
            colors: vec![
                ColorEntry::new("#111111"),
                ColorEntry::new("#222222"),
                ColorEntry::new("#333333"),
            ],
            ..two_color_config()
        };
        let snapshot = config.validate().unwrap();
        for t in [0.0, 1234.5, 40_000.0] {
            let stops = generate_stops(&snapshot, t);
            assert_eq!(stops[0].color, "#111111");
            assert_eq!(stops[1].color, "#222222");
            assert_eq!(stops[2].color, "#333333");
        }
    }

    #[test]
    fn frames_are_deterministic() {
        let snapshot = BackdropConfig::default().validate().unwrap();
        let a = serde_json::to_string(&generate_frame(&snapshot, 1234.5)).unwrap();
        let b = serde_json::to_string(&generate_frame(&snapshot, 1234.5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn secondary_is_primary_shifted_two_seconds() {
        let snapshot = BackdropConfig::default().validate().unwrap();
        let frame = generate_frame(&snapshot, 300.0);
        assert_eq!(
            frame.secondary,
            generate_stops(&snapshot, 300.0 + SECONDARY_PHASE_OFFSET_MS)
        );
    }
}
