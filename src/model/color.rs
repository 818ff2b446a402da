use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::BackdropError;

/// Damping applied to saturation adjustment. Without it the effect
/// overshoots perceptually; the factor is divided by this before scaling `s`.
pub const SATURATION_DAMPING: f64 = 3.0;

/// Divisor turning the config's `color_blending` strength into an
/// effective blend ratio (`effective = ratio * strength / 10`).
pub const BLEND_STRENGTH_SCALE: f64 = 10.0;

/// Scale for the highlight pass: brightness factor is
/// `1 + strength * intensity * 0.1`.
pub const HIGHLIGHT_BRIGHTNESS_SCALE: f64 = 0.1;

/// RGB color with 8-bit channels. All adjustment math runs in f64 and
/// rounds half-up on the final channel values so the same inputs always
/// produce byte-identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL color with all components normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Round to u8 with half-up semantics, clamping to [0, 255].
fn channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit color string, with or without a leading `#`.
    /// Anything else fails with `InvalidColorFormat`.
    pub fn from_hex(hex: &str) -> Result<Self, BackdropError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BackdropError::InvalidColorFormat {
                value: hex.to_string(),
            });
        }
        let packed =
            u32::from_str_radix(digits, 16).map_err(|_| BackdropError::InvalidColorFormat {
                value: hex.to_string(),
            })?;
        Ok(Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        })
    }

    /// Encode as a lowercase `#rrggbb` string. Total — never fails.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL with all components in [0, 1].
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // Achromatic: hue is undefined, use 0.
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: sector / 6.0,
            s,
            l,
        }
    }

    /// Multiply each channel by `factor`, clamping to [0, 255].
    pub fn adjust_brightness(self, factor: f64) -> Self {
        Self {
            r: channel(f64::from(self.r) * factor),
            g: channel(f64::from(self.g) * factor),
            b: channel(f64::from(self.b) * factor),
        }
    }

    /// Scale saturation by `factor / SATURATION_DAMPING` via HSL.
    pub fn adjust_saturation(self, factor: f64) -> Self {
        let mut hsl = self.to_hsl();
        hsl.s = (hsl.s * factor / SATURATION_DAMPING).clamp(0.0, 1.0);
        hsl.to_rgb()
    }

    /// Brighten by a wave-intensity-driven highlight. A `strength` of exactly
    /// zero returns the color unchanged; this is a behavioral contract (it
    /// avoids float drift at identity), not a performance shortcut.
    pub fn apply_highlight(self, intensity: f64, strength: f64) -> Self {
        if strength == 0.0 {
            return self;
        }
        self.adjust_brightness(1.0 + strength * intensity * HIGHLIGHT_BRIGHTNESS_SCALE)
    }

    /// Linear interpolation toward `other`. The requested `ratio` is scaled by
    /// `blend_strength / BLEND_STRENGTH_SCALE` and the effective ratio is
    /// clamped to [0, 1].
    pub fn blend(self, other: Self, ratio: f64, blend_strength: f64) -> Self {
        let t = (ratio * blend_strength / BLEND_STRENGTH_SCALE).clamp(0.0, 1.0);
        let inv = 1.0 - t;
        Self {
            r: channel(f64::from(self.r) * inv + f64::from(other.r) * t),
            g: channel(f64::from(self.g) * inv + f64::from(other.g) * t),
            b: channel(f64::from(self.b) * inv + f64::from(other.b) * t),
        }
    }
}

impl Hsl {
    /// Convert to RGB. Total for all finite inputs: components are clamped
    /// to [0, 1] before conversion rather than trusting the caller.
    pub fn to_rgb(self) -> Rgb {
        let h = if self.h.is_nan() { 0.0 } else { self.h.clamp(0.0, 1.0) };
        let s = if self.s.is_nan() { 0.0 } else { self.s.clamp(0.0, 1.0) };
        let l = if self.l.is_nan() { 0.0 } else { self.l.clamp(0.0, 1.0) };

        if s == 0.0 {
            let v = channel(l * 255.0);
            return Rgb { r: v, g: v, b: v };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb {
            r: channel(hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0),
            g: channel(hue_to_channel(p, q, h) * 255.0),
            b: channel(hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0),
        }
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Blend two hex color strings. Fails with `InvalidColorFormat` if either
/// input is malformed; the error propagates rather than falling back, since
/// config colors are validated once at load time.
pub fn blend_hex(
    hex_a: &str,
    hex_b: &str,
    ratio: f64,
    blend_strength: f64,
) -> Result<String, BackdropError> {
    let a = Rgb::from_hex(hex_a)?;
    let b = Rgb::from_hex(hex_b)?;
    Ok(a.blend(b, ratio, blend_strength).to_hex())
}
