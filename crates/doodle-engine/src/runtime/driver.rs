use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::core::Sketch;
use crate::input::RawInput;

/// One poll of an input source.
#[derive(Debug, Clone, PartialEq)]
pub enum Poll {
    /// Raw events that arrived since the previous poll, in arrival order.
    Events(Vec<RawInput>),
    /// The source is gone; the loop should wind down.
    Closed,
}

/// Host-provided delivery of raw input events.
pub trait EventSource {
    fn poll(&mut self) -> Result<Poll>;
}

/// Event source that never produces anything. For sketches without input.
pub struct NoInput;

impl EventSource for NoInput {
    fn poll(&mut self) -> Result<Poll> {
        Ok(Poll::Events(Vec::new()))
    }
}

/// Blocking pump standing in for the host scheduler.
pub struct Driver;

impl Driver {
    /// Drives `sketch` on the calling thread until it stops or `events`
    /// closes.
    ///
    /// Each turn: poll and dispatch raw input, perform any pending deferred
    /// begin, run one tick, then sleep out the remainder of the tick interval
    /// (no sleep when unthrottled). Everything is cooperative on this one
    /// thread: ticks never overlap, and a slow callback delays the next tick
    /// rather than skipping it.
    ///
    /// Returns as soon as the sketch is not running, so callers should
    /// `start()` (or `begin()`) before handing the sketch over.
    pub fn run<S>(sketch: &mut Sketch<S>, events: &mut dyn EventSource) -> Result<()> {
        loop {
            let batch = match events.poll().context("input source failed")? {
                Poll::Closed => {
                    log::debug!("input source closed; stopping loop");
                    sketch.end();
                    return Ok(());
                }
                Poll::Events(batch) => batch,
            };
            for ev in batch {
                sketch.dispatch(ev);
            }

            sketch.pump();
            if !sketch.is_running() {
                return Ok(());
            }

            let tick_started = Instant::now();
            sketch.tick();

            if let Some(interval) = sketch.tick_interval() {
                let elapsed = tick_started.elapsed();
                if elapsed < interval {
                    thread::sleep(interval - elapsed);
                }
            }
        }
    }
}
