use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::BackdropError;
use crate::model::Rgb;

/// One configured gradient color. Only `enabled` entries participate in
/// rendering; order in the list defines gradient-stop order.
#[derive(Debug, Clone, Serialize, Deserialize, TS, JsonSchema)]
#[ts(export)]
pub struct ColorEntry {
    /// 6-hex-digit color, with or without a leading `#`.
    pub color: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl ColorEntry {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            enabled: true,
        }
    }
}

/// Host-supplied configuration for the animated backdrop. Immutable per
/// animation session; the host replaces it wholesale via
/// [`crate::driver::AnimationDriver::set_config`].
#[derive(Debug, Clone, Serialize, Deserialize, TS, JsonSchema)]
#[serde(default)]
#[ts(export)]
pub struct BackdropConfig {
    pub colors: Vec<ColorEntry>,
    /// Time-dilation factor for wave phase. Negative values clamp to 0.
    pub speed: f64,
    /// Spatial oscillation density along X (spatial sampler only).
    pub wave_frequency_x: f64,
    /// Spatial oscillation density along Y (spatial sampler only).
    pub wave_frequency_y: f64,
    /// Strength divisor for pairwise blends; effective blend ratio is
    /// `requested * color_blending / 10`.
    pub color_blending: f64,
    /// Highlight pass strength. Exactly 0 disables the pass entirely.
    pub highlights: f64,
    /// Brightness multiplier; exactly 1.0 skips the pass.
    pub color_brightness: f64,
    /// Saturation multiplier; exactly 1.0 skips the pass.
    pub color_saturation: f64,
    /// Flat fill beneath all gradient layers.
    pub background_color: String,
    pub background_alpha: f64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            colors: vec![
                ColorEntry::new("#D3F6FA"),
                ColorEntry::new("#FFFCEB"),
                ColorEntry::new("#E8DFF5"),
                ColorEntry::new("#DCF8E8"),
            ],
            speed: 4.0,
            wave_frequency_x: 3.0,
            wave_frequency_y: 2.0,
            color_blending: 5.0,
            highlights: 2.0,
            color_brightness: 1.0,
            color_saturation: 1.0,
            background_color: "#FFFFFF".to_string(),
            background_alpha: 1.0,
        }
    }
}

impl BackdropConfig {
    /// Validate and freeze into a per-tick snapshot.
    ///
    /// Every hex color (enabled or not, plus the background) is parsed here
    /// so steady-state animation never sees a malformed color. Out-of-range
    /// scalars are clamped rather than rejected — the loop must never crash
    /// mid-session over a weird but harmless number.
    pub fn validate(&self) -> Result<ConfigSnapshot, BackdropError> {
        for entry in &self.colors {
            // Disabled entries are validated too: toggling one on later
            // must not surface a parse error mid-animation.
            Rgb::from_hex(&entry.color)?;
        }
        let active_colors = self
            .colors
            .iter()
            .filter(|e| e.enabled)
            .map(|e| Rgb::from_hex(&e.color))
            .collect::<Result<Vec<_>, _>>()?;
        let background = Rgb::from_hex(&self.background_color)?;

        Ok(ConfigSnapshot {
            active_colors,
            speed: self.speed.max(0.0),
            wave_frequency_x: self.wave_frequency_x.max(0.0),
            wave_frequency_y: self.wave_frequency_y.max(0.0),
            color_blending: self.color_blending.max(0.0),
            highlights: self.highlights.max(0.0),
            color_brightness: self.color_brightness.max(0.0),
            color_saturation: self.color_saturation.max(0.0),
            background,
            background_alpha: self.background_alpha.clamp(0.0, 1.0),
        })
    }
}

/// Immutable, pre-validated view of a [`BackdropConfig`], read exactly once
/// per tick. Colors are pre-parsed and already filtered to enabled entries,
/// in config order; scalars are clamped to their valid ranges.
///
/// Swapping the snapshot (rather than mutating shared config fields) is what
/// guarantees a frame can never observe a half-updated config, even if the
/// host calls `set_config` from inside the frame callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSnapshot {
    pub active_colors: Vec<Rgb>,
    pub speed: f64,
    pub wave_frequency_x: f64,
    pub wave_frequency_y: f64,
    pub color_blending: f64,
    pub highlights: f64,
    pub color_brightness: f64,
    pub color_saturation: f64,
    pub background: Rgb,
    pub background_alpha: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let snapshot = BackdropConfig::default().validate().unwrap();
        assert_eq!(snapshot.active_colors.len(), 4);
        assert_eq!(snapshot.background, Rgb::new(255, 255, 255));
    }

    #[test]
    fn disabled_colors_are_excluded_but_still_validated() {
        let mut config = BackdropConfig {
            colors: vec![
                ColorEntry::new("#D3F6FA"),
                ColorEntry {
                    color: "#FFFCEB".to_string(),
                    enabled: false,
                },
            ],
            ..BackdropConfig::default()
        };
        let snapshot = config.validate().unwrap();
        assert_eq!(snapshot.active_colors, vec![Rgb::new(0xD3, 0xF6, 0xFA)]);

        config.colors[1].color = "broken".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_color_names_offending_string() {
        let mut config = BackdropConfig::default();
        config.colors.push(ColorEntry::new("#12345"));
        match config.validate().unwrap_err() {
            BackdropError::InvalidColorFormat { value } => assert_eq!(value, "#12345"),
            other => panic!("wrong error kind: {other:?}"),
        }
    }

    #[test]
    fn negative_scalars_clamp_to_zero() {
        let config = BackdropConfig {
            speed: -3.0,
            highlights: -1.0,
            color_blending: -0.5,
            background_alpha: 4.0,
            ..BackdropConfig::default()
        };
        let snapshot = config.validate().unwrap();
        assert_eq!(snapshot.speed, 0.0);
        assert_eq!(snapshot.highlights, 0.0);
        assert_eq!(snapshot.color_blending, 0.0);
        assert_eq!(snapshot.background_alpha, 1.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: BackdropConfig =
            serde_json::from_str(r##"{"speed": 2.5, "colors": [{"color": "#aabbcc"}]}"##).unwrap();
        assert_eq!(config.speed, 2.5);
        assert!(config.colors[0].enabled);
        assert_eq!(config.color_brightness, 1.0);
        assert_eq!(config.background_color, "#FFFFFF");
    }
}
