use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::error::ConfigError;
use crate::notifier::Notifier;
use crate::runner::{Machine, Runner, Tick};
use crate::scheduler::Scheduler;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GlitchPhase {
    #[default]
    Idle,
    Entry,
    Peak,
    Recovery,
}

impl GlitchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            GlitchPhase::Idle => "idle",
            GlitchPhase::Entry => "entry",
            GlitchPhase::Peak => "peak",
            GlitchPhase::Recovery => "recovery",
        }
    }
}

/// An effect that can be parked at its resting state by the controller.
pub trait Ambient: Machine {
    /// Back to the resting state. Anything that should survive a pause (such as
    /// a position in an interval pattern) is kept.
    fn reset(&mut self);

    fn is_active(&self) -> bool;
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlickerOptions {
    pub interval: Duration,
    pub burst_min: Duration,
    pub burst_max: Duration,
    pub seed: u64,
}

impl Default for FlickerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(22_000),
            burst_min: Duration::from_millis(150),
            burst_max: Duration::from_millis(300),
            seed: 0,
        }
    }
}

/// Fixed-rate flicker: once per interval, glitch for a random short burst.
pub struct Flicker {
    options: FlickerOptions,
    rng: SmallRng,
    glitching: bool,
    burst: Duration,
}

impl Flicker {
    pub fn new(options: FlickerOptions) -> Self {
        let rng = SmallRng::seed_from_u64(options.seed);
        Self {
            options,
            rng,
            glitching: false,
            burst: Duration::ZERO,
        }
    }

    fn roll_burst(&mut self) -> Duration {
        let low = self.options.burst_min.as_millis() as u64;
        let high = self.options.burst_max.as_millis() as u64;
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Duration::from_millis(self.rng.random_range(low..=high))
    }
}

impl Machine for Flicker {
    type Frame = bool;

    fn start(&mut self, _notifier: &dyn Notifier) -> Tick {
        self.glitching = false;
        Tick::Wait(self.options.interval)
    }

    fn advance(&mut self, _notifier: &dyn Notifier) -> Tick {
        if self.glitching {
            self.glitching = false;
            Tick::Wait(self.options.interval.saturating_sub(self.burst))
        } else {
            self.burst = self.roll_burst();
            self.glitching = true;
            Tick::Wait(self.burst)
        }
    }

    fn frame(&self) -> bool {
        self.glitching
    }
}

impl Ambient for Flicker {
    fn reset(&mut self) {
        self.glitching = false;
    }

    fn is_active(&self) -> bool {
        self.glitching
    }
}

/// Offsets of the phase changes inside one signal glitch, measured from the
/// trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTiming {
    pub peak_at: Duration,
    pub recovery_at: Duration,
    pub total: Duration,
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self {
            peak_at: Duration::from_millis(400),
            recovery_at: Duration::from_millis(1400),
            total: Duration::from_millis(2000),
        }
    }
}

impl PhaseTiming {
    pub fn with_total(total: Duration) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    // Phase boundaries past `total` collapse to zero-length phases.
    fn entry_len(&self) -> Duration {
        self.peak_at.min(self.total)
    }

    fn recovery_start(&self) -> Duration {
        self.recovery_at.min(self.total).max(self.entry_len())
    }

    fn peak_len(&self) -> Duration {
        self.recovery_start().saturating_sub(self.entry_len())
    }

    fn recovery_len(&self) -> Duration {
        self.total.saturating_sub(self.recovery_start())
    }
}

pub fn default_pattern() -> Vec<Duration> {
    [15_000, 23_000, 9_000, 31_000, 18_000]
        .into_iter()
        .map(Duration::from_millis)
        .collect()
}

/// Signal-loss glitch triggered on a non-uniform schedule. Trigger-to-trigger
/// gaps walk `pattern` in order and wrap.
pub struct SignalGlitch {
    pattern: Vec<Duration>,
    cursor: usize,
    timing: PhaseTiming,
    phase: GlitchPhase,
}

impl SignalGlitch {
    pub fn new(pattern: Vec<Duration>, timing: PhaseTiming) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        Ok(Self {
            pattern,
            cursor: 0,
            timing,
            phase: GlitchPhase::Idle,
        })
    }

    pub fn with_default_pattern(timing: PhaseTiming) -> Self {
        Self {
            pattern: default_pattern(),
            cursor: 0,
            timing,
            phase: GlitchPhase::Idle,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> GlitchPhase {
        self.phase
    }
}

impl Machine for SignalGlitch {
    type Frame = GlitchPhase;

    fn start(&mut self, _notifier: &dyn Notifier) -> Tick {
        self.phase = GlitchPhase::Idle;
        Tick::Wait(self.pattern[self.cursor])
    }

    fn advance(&mut self, _notifier: &dyn Notifier) -> Tick {
        match self.phase {
            GlitchPhase::Idle => {
                self.phase = GlitchPhase::Entry;
                self.cursor = (self.cursor + 1) % self.pattern.len();
                Tick::Wait(self.timing.entry_len())
            }
            GlitchPhase::Entry => {
                self.phase = GlitchPhase::Peak;
                Tick::Wait(self.timing.peak_len())
            }
            GlitchPhase::Peak => {
                self.phase = GlitchPhase::Recovery;
                Tick::Wait(self.timing.recovery_len())
            }
            GlitchPhase::Recovery => {
                self.phase = GlitchPhase::Idle;
                Tick::Wait(self.pattern[self.cursor].saturating_sub(self.timing.total))
            }
        }
    }

    fn frame(&self) -> GlitchPhase {
        self.phase
    }
}

impl Ambient for SignalGlitch {
    fn reset(&mut self) {
        self.phase = GlitchPhase::Idle;
    }

    fn is_active(&self) -> bool {
        self.phase != GlitchPhase::Idle
    }
}

/// Owns an ambient effect's runner and decides when it may run: only while
/// reduced motion is off and the page is visible. Whenever either condition
/// fails the effect is parked at rest with nothing scheduled; when both hold
/// again the wait restarts from the beginning of the current interval.
pub struct GlitchController<M: Ambient, S: Scheduler> {
    runner: Runner<M, S>,
    reduced_motion: bool,
    page_visible: bool,
}

impl<M: Ambient, S: Scheduler> GlitchController<M, S> {
    pub fn new(runner: Runner<M, S>, reduced_motion: bool) -> Self {
        Self {
            runner,
            reduced_motion,
            page_visible: true,
        }
    }

    pub fn start(&self) {
        self.sync();
    }

    pub fn is_enabled(&self) -> bool {
        !self.reduced_motion
    }

    pub fn is_scheduled(&self) -> bool {
        self.runner.is_running()
    }

    pub fn set_reduced_motion(&mut self, reduce: bool) {
        self.reduced_motion = reduce;
        self.sync();
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        self.page_visible = visible;
        self.sync();
    }

    pub fn frame(&self) -> M::Frame {
        self.runner.frame()
    }

    pub fn with<R>(&self, read: impl FnOnce(&M) -> R) -> R {
        self.runner.with(read)
    }

    /// Parks the effect and publishes its resting frame one last time so any
    /// "glitch active" markers get cleared.
    pub fn teardown(&self) {
        self.runner.halt(M::reset);
    }

    fn sync(&self) {
        let may_run = !self.reduced_motion && self.page_visible;
        if may_run {
            if !self.runner.is_running() {
                tracing::debug!("glitch: schedule");
                self.runner.start();
            }
        } else if self.runner.is_running() || self.runner.with(M::is_active) {
            tracing::debug!("glitch: park");
            self.runner.halt(M::reset);
        }
    }
}
