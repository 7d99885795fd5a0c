// fps.rs - Rolling frame-rate statistics

use std::collections::VecDeque;
use std::fmt::{self, Write};
use std::time::Instant;

/// Samples kept for the rolling statistics.
pub const WINDOW: usize = 100;

/// Monotonic time source in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { start: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FpsStats {
    pub latest: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for FpsStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frames per second: latest = {} | avg of last {WINDOW} = {} | min = {} | max = {}",
            self.latest.round(),
            self.mean.round(),
            self.min.round(),
            self.max.round(),
        )
    }
}

/// Frame-rate monitor over the last [`WINDOW`] frames.
pub struct FpsMonitor {
    frames: VecDeque<f64>,
    last_ms: f64,
    stats: FpsStats,
    text: String,
}

impl FpsMonitor {
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            frames: VecDeque::with_capacity(WINDOW + 1),
            last_ms: clock.now_ms(),
            stats: FpsStats::default(),
            text: String::new(),
        }
    }

    /// Takes one sample: the rate implied by the time since the previous call.
    pub fn render(&mut self, clock: &impl Clock) -> FpsStats {
        let delta = clock.now_ms() - self.last_ms;
        let stats = self.push_sample(1000.0 / delta);

        // Read after the update so the next delta includes this frame's work.
        self.last_ms = clock.now_ms();
        stats
    }

    /// Adds an instantaneous rate, evicting the oldest past [`WINDOW`].
    pub fn push_sample(&mut self, fps: f64) -> FpsStats {
        self.frames.push_back(fps);
        if self.frames.len() > WINDOW {
            self.frames.pop_front();
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &frame in &self.frames {
            sum += frame;
            min = min.min(frame);
            max = max.max(frame);
        }

        self.stats = FpsStats {
            latest: fps,
            mean: sum / self.frames.len() as f64,
            min,
            max,
        };

        self.text.clear();
        // Writing into a String cannot fail.
        let _ = write!(self.text, "{}", self.stats);
        self.stats
    }

    pub fn stats(&self) -> FpsStats {
        self.stats
    }

    /// Display line for the latest statistics; empty before the first sample.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames.iter().copied()
    }

    pub fn reset(&mut self, clock: &impl Clock) {
        self.frames.clear();
        self.stats = FpsStats::default();
        self.text.clear();
        self.last_ms = clock.now_ms();
    }
}
