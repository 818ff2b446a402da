//! Rendering core for a continuously animated, multi-color ambient
//! background: a time-driven wave field, a color adjustment pipeline, and a
//! gradient-stop composer, tied together by a pause-aware animation driver.
//!
//! Every frame is a pure function of (config, logical time): the driver
//! computes logical time, [`compose`] asks [`wave`] for one stop position
//! per active color, runs each configured color through the adjustment
//! passes in [`model::color`], and publishes two phase-shifted stop lists
//! for the host surface to paint over its flat background fill.

pub mod compose;
pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod wave;

pub use compose::{GradientFrame, GradientStop};
pub use config::{BackdropConfig, ColorEntry, ConfigSnapshot};
pub use driver::{AnimationDriver, Clock, LogicalClock, SystemClock};
pub use error::BackdropError;
pub use model::Rgb;
