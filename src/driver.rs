//! Animation driver: pause-aware time bookkeeping and the frame loop that
//! feeds logical time into the gradient composer and publishes frames to
//! the host surface.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::compose::{self, GradientFrame};
use crate::config::{BackdropConfig, ConfigSnapshot};
use crate::error::BackdropError;

/// Minimum real-time spacing between ticks (~60 Hz cap).
pub const TICK_INTERVAL_MS: u64 = 16;

/// Wall-clock millisecond source. Abstracted so tests can drive time
/// manually; production uses [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock anchored at construction.
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Pause-aware elapsed time. While paused the logical clock is frozen at the
/// pause timestamp; resuming shifts the zero offset so logical time picks up
/// exactly where it stopped rather than jumping.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalClock {
    /// Wall time corresponding to logical time 0.
    zero: f64,
    /// Wall time at which the clock was paused, if paused.
    paused_at: Option<f64>,
}

impl LogicalClock {
    pub fn new(wall_ms: f64) -> Self {
        Self {
            zero: wall_ms,
            paused_at: None,
        }
    }

    pub fn new_paused(wall_ms: f64) -> Self {
        Self {
            zero: wall_ms,
            paused_at: Some(wall_ms),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Logical time at the given wall time. Frozen while paused.
    pub fn logical_time(&self, wall_ms: f64) -> f64 {
        match self.paused_at {
            Some(paused_at) => paused_at - self.zero,
            None => wall_ms - self.zero,
        }
    }

    /// Freeze the clock. No-op if already paused.
    pub fn pause(&mut self, wall_ms: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(wall_ms);
        }
    }

    /// Unfreeze the clock without a time jump. No-op if running.
    pub fn resume(&mut self, wall_ms: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.zero += wall_ms - paused_at;
        }
    }
}

struct DriverState {
    snapshot: ConfigSnapshot,
    clock: LogicalClock,
}

struct Shared<C: Clock> {
    wall: C,
    state: Mutex<DriverState>,
}

impl<C: Clock> Shared<C> {
    /// Compute one frame, or `None` while paused.
    ///
    /// The snapshot is cloned out of the lock before any math runs, so a
    /// `set_config` issued from inside the frame callback can never tear
    /// the frame being computed.
    fn tick(&self) -> Option<GradientFrame> {
        let wall = self.wall.now_ms();
        let (snapshot, logical) = {
            let state = self.state.lock();
            if state.clock.is_paused() {
                return None;
            }
            (state.snapshot.clone(), state.clock.logical_time(wall))
        };
        Some(compose::generate_frame(&snapshot, logical))
    }
}

/// Owns the frame loop: validates and swaps config, tracks pause state, and
/// publishes a [`GradientFrame`] to the host on every tick while running.
pub struct AnimationDriver<C: Clock = SystemClock> {
    shared: Arc<Shared<C>>,
    task: Option<JoinHandle<()>>,
}

impl AnimationDriver<SystemClock> {
    /// Validate `config` and build a driver in the Running state.
    pub fn new(config: &BackdropConfig) -> Result<Self, BackdropError> {
        Self::with_clock(config, SystemClock::default(), false)
    }

    /// Validate `config` and build a driver that starts paused.
    pub fn new_paused(config: &BackdropConfig) -> Result<Self, BackdropError> {
        Self::with_clock(config, SystemClock::default(), true)
    }
}

impl<C: Clock + 'static> AnimationDriver<C> {
    /// Build a driver over an explicit wall-clock source.
    pub fn with_clock(config: &BackdropConfig, wall: C, paused: bool) -> Result<Self, BackdropError> {
        let snapshot = config.validate()?;
        let now = wall.now_ms();
        let clock = if paused {
            LogicalClock::new_paused(now)
        } else {
            LogicalClock::new(now)
        };
        Ok(Self {
            shared: Arc::new(Shared {
                wall,
                state: Mutex::new(DriverState { snapshot, clock }),
            }),
            task: None,
        })
    }

    /// Replace the configuration, effective next tick. On validation failure
    /// the previous valid config keeps running and the error is returned.
    pub fn set_config(&self, config: &BackdropConfig) -> Result<(), BackdropError> {
        let snapshot = config.validate()?;
        self.shared.state.lock().snapshot = snapshot;
        Ok(())
    }

    /// Toggle pause. Pausing freezes logical time; resuming continues from
    /// the frozen value with no jump.
    pub fn set_paused(&self, paused: bool) {
        let wall = self.shared.wall.now_ms();
        let mut state = self.shared.state.lock();
        if paused {
            state.clock.pause(wall);
        } else {
            state.clock.resume(wall);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.shared.state.lock().clock.is_paused()
    }

    /// Current logical time in milliseconds.
    pub fn logical_time_ms(&self) -> f64 {
        let wall = self.shared.wall.now_ms();
        self.shared.state.lock().clock.logical_time(wall)
    }

    /// Compute one frame at the current logical time, or `None` while
    /// paused. Hosts that own their own display-refresh callback call this
    /// directly instead of [`start`](Self::start).
    pub fn tick(&self) -> Option<GradientFrame> {
        self.shared.tick()
    }

    /// Spawn the frame loop on the current tokio runtime. Ticks are spaced
    /// at least [`TICK_INTERVAL_MS`] apart; paused ticks skip computation
    /// and publish nothing. Restarting an already-running driver replaces
    /// its loop.
    pub fn start(&mut self, mut on_frame: impl FnMut(GradientFrame) + Send + 'static) {
        self.stop();
        let shared = Arc::clone(&self.shared);
        self.task = Some(tokio::spawn(async move {
            let mut ticks = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if let Some(frame) = shared.tick() {
                    on_frame(frame);
                }
            }
        }));
    }

    /// Stop the frame loop. Idempotent: the pending tick is cancelled
    /// exactly once and further calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<C: Clock> Drop for AnimationDriver<C> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
