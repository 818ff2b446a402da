//! Time-driven wave field: the deterministic displacement/intensity model
//! behind the animated gradient. Everything here is a total pure function of
//! (config snapshot, time) — no state, no failure path.

use crate::config::ConfigSnapshot;

/// Converts milliseconds (scaled by config speed) into wave phase.
pub const WAVE_TIME_SCALE: f64 = 0.002;

/// Amplitude of the per-color position wobble around its base spacing.
/// Small enough that adjacent stops rarely cross; when they do, that
/// reordering is accepted visual jitter, not something to sort away.
pub const POSITION_WAVE_AMPLITUDE: f64 = 0.1;

/// Time scale for the intensity term, shared with the highlight pass.
pub const INTENSITY_TIME_SCALE: f64 = 0.001;

/// Per-color phase step for position generation.
const COLOR_PHASE_STEP: f64 = std::f64::consts::FRAC_PI_2;

/// Displacement and intensity at one point of the spatial field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Always in [0, 1].
    pub intensity: f64,
}

/// Gradient-stop positions for `count` colors at logical time `time_ms`.
///
/// Each position is its even base spacing `i / (count - 1)` plus a small
/// phase-shifted sine wobble, clamped to [0, 1]. Continuous in time, but NOT
/// guaranteed ascending across colors.
pub fn color_positions(snapshot: &ConfigSnapshot, time_ms: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let phase = time_ms * snapshot.speed * WAVE_TIME_SCALE;
    (0..count)
        .map(|i| {
            let base = if count == 1 {
                0.0
            } else {
                i as f64 / (count - 1) as f64
            };
            let wave = (phase + i as f64 * COLOR_PHASE_STEP).sin() * POSITION_WAVE_AMPLITUDE;
            (base + wave).clamp(0.0, 1.0)
        })
        .collect()
}

/// Sample the spatial field at surface coordinates `(x, y)`.
///
/// Coordinates are normalized against the surface dimensions (degenerate
/// dimensions fall back to unit size, keeping the function total), then run
/// through independent sin/cos terms per axis plus a shared pressure term.
pub fn sample_at(
    snapshot: &ConfigSnapshot,
    x: f64,
    y: f64,
    time_ms: f64,
    width: f64,
    height: f64,
) -> WaveSample {
    let nx = x / if width > 0.0 { width } else { 1.0 };
    let ny = y / if height > 0.0 { height } else { 1.0 };
    let phase = time_ms * snapshot.speed * WAVE_TIME_SCALE;

    let wave_x = (nx * snapshot.wave_frequency_x + phase).sin();
    let wave_y = (ny * snapshot.wave_frequency_y + phase).cos();
    let pressure = ((nx + ny) * std::f64::consts::PI + time_ms * INTENSITY_TIME_SCALE).sin();

    WaveSample {
        offset_x: (wave_x + 0.5 * pressure) * POSITION_WAVE_AMPLITUDE,
        offset_y: (wave_y + 0.5 * pressure) * POSITION_WAVE_AMPLITUDE,
        intensity: ((wave_x + wave_y + time_ms * INTENSITY_TIME_SCALE).sin() + 1.0) * 0.5,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::BackdropConfig;

    fn snapshot() -> ConfigSnapshot {
        BackdropConfig::default().validate().unwrap()
    }

    #[test]
    fn zero_colors_yields_empty() {
        for t in [0.0, 123.4, 1e9] {
            assert!(color_positions(&snapshot(), t, 0).is_empty());
        }
    }

    #[test]
    fn single_color_is_wave_around_zero() {
        let snap = snapshot();
        let p = color_positions(&snap, 0.0, 1);
        assert_eq!(p, vec![0.0]); // sin(0) = 0, clamped base 0
        let p = color_positions(&snap, 400.0, 1);
        assert_eq!(p.len(), 1);
        assert!(p[0] >= 0.0 && p[0] <= POSITION_WAVE_AMPLITUDE);
    }

    #[test]
    fn two_colors_at_time_zero_span_full_range() {
        // i=0: sin(0) = 0; i=1: sin(pi/2) * 0.1 pushes past 1 and clamps.
        let p = color_positions(&snapshot(), 0.0, 2);
        assert_eq!(p, vec![0.0, 1.0]);
    }

    #[test]
    fn positions_stay_in_unit_interval() {
        let snap = snapshot();
        for step in 0..200 {
            let t = f64::from(step) * 37.5;
            for p in color_positions(&snap, t, 5) {
                assert!((0.0..=1.0).contains(&p), "p = {p} at t = {t}");
            }
        }
    }

    #[test]
    fn positions_are_continuous_in_time() {
        let snap = snapshot();
        let a = color_positions(&snap, 1000.0, 4);
        let b = color_positions(&snap, 1001.0, 4);
        for (pa, pb) in a.iter().zip(&b) {
            // speed 4 * 0.002 rad/ms * amplitude 0.1 bounds the per-ms delta.
            assert!((pa - pb).abs() < 0.001);
        }
    }

    #[test]
    fn zero_speed_freezes_positions() {
        let snap = ConfigSnapshot {
            speed: 0.0,
            ..snapshot()
        };
        assert_eq!(
            color_positions(&snap, 0.0, 3),
            color_positions(&snap, 99_999.0, 3)
        );
    }

    #[test]
    fn intensity_always_in_unit_interval() {
        let snap = snapshot();
        for step in 0..100 {
            let t = f64::from(step) * 113.0;
            let s = sample_at(&snap, f64::from(step) * 3.0, f64::from(step) * 7.0, t, 390.0, 844.0);
            assert!((0.0..=1.0).contains(&s.intensity));
        }
    }

    #[test]
    fn degenerate_dimensions_are_total() {
        let s = sample_at(&snapshot(), 10.0, 10.0, 500.0, 0.0, -5.0);
        assert!(s.offset_x.is_finite());
        assert!(s.offset_y.is_finite());
        assert!((0.0..=1.0).contains(&s.intensity));
    }
}
