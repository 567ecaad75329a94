use std::time::Duration;

use super::source::TimeSource;

/// Derived clock values, all pure reads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeReadout {
    /// Seconds elapsed since the clock was created.
    pub since_start: f64,

    /// Seconds between the last two completed ticks.
    pub delta: f64,

    /// Instantaneous rate derived from `delta` (`1000 / delta_ms`),
    /// or `0.0` before the first full tick interval exists.
    pub frames_per_second: f64,

    /// Monotonic tick counter.
    pub frame_count: u64,
}

/// Loop clock for a single sketch.
///
/// The clock never reads the system directly; it goes through the injected
/// [`TimeSource`] so the loop is testable with hand-cranked time.
pub struct Clock {
    source: Box<dyn TimeSource>,
    start: Duration,
    last_frame: Duration,
    delta: Duration,
    frame_count: u64,
}

impl Clock {
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        let start = source.now();
        Self {
            source,
            start,
            last_frame: start,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Records the end of a tick interval: recomputes `delta` against the
    /// previous mark and moves the mark to now.
    pub fn mark_frame(&mut self) {
        let now = self.source.now();
        self.delta = now.saturating_sub(self.last_frame);
        self.last_frame = now;
    }

    /// Advances the tick counter. Called once per completed tick, after draw.
    pub fn bump_frame(&mut self) {
        self.frame_count = self.frame_count.wrapping_add(1);
    }

    pub fn readout(&self) -> TimeReadout {
        let delta_ms = self.delta.as_secs_f64() * 1000.0;
        TimeReadout {
            since_start: self.source.now().saturating_sub(self.start).as_secs_f64(),
            delta: self.delta.as_secs_f64(),
            frames_per_second: if delta_ms != 0.0 { 1000.0 / delta_ms } else { 0.0 },
            frame_count: self.frame_count,
        }
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("start", &self.start)
            .field("last_frame", &self.last_frame)
            .field("delta", &self.delta)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}
