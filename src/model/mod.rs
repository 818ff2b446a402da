pub mod color;

// Re-export commonly used types at the model level.
pub use color::{
    blend_hex, Hsl, Rgb, BLEND_STRENGTH_SCALE, HIGHLIGHT_BRIGHTNESS_SCALE, SATURATION_DAMPING,
};
