use std::fmt;
use std::time::Duration;

use crate::host::{DocumentHost, DrawTarget, MountPoint, SetupError};
use crate::input::{KeySnapshot, MouseSnapshot, RawInput, RawKeyEvent, RawMouseEvent};
use crate::surface::Surface;
use crate::time::{Clock, MonotonicTime, TimeReadout, TimeSource};

use super::frame::{Frame, LoopControl};
use super::registry::{EventRegistry, KeyCallback, MouseCallback};

/// Identity of one armed timer.
///
/// A new id is issued every time the loop arms its timer; a no-op `begin()`
/// leaves the id unchanged.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TimerId(u64);

/// Loop phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Phase {
    Stopped,
    Running { timer: TimerId },
}

/// Configuration error: a negative or non-finite tick rate was requested.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RateError {
    pub requested: f64,
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick rate must be finite and non-negative (got {})",
            self.requested
        )
    }
}

impl std::error::Error for RateError {}

/// A sketch: drawing surface, callback registry, clock, and the loop state
/// machine, in one object.
///
/// User-shared state lives in `S`; every callback receives `&mut S` next to a
/// per-invocation [`Frame`], so sketch-local data crosses callbacks without
/// any open extension point on the sketch itself.
///
/// The sketch does not own a thread or a timer. A host pump (see
/// [`runtime::Driver`](crate::runtime::Driver)) is expected to call
/// [`pump`](Self::pump) once per turn, [`tick`](Self::tick) per timer firing
/// while [`is_running`](Self::is_running), and [`dispatch`](Self::dispatch)
/// for raw input as it arrives.
pub struct Sketch<S> {
    surface: Surface,
    clock: Clock,
    events: EventRegistry<S>,
    state: S,

    /// Target ticks per second; `0` = as fast as the host allows.
    rate: f64,
    clear_before_draw: bool,

    phase: Phase,
    has_begun: bool,
    deferred_begin: bool,
    next_timer: u64,
    control: LoopControl,
}

impl<S> Sketch<S> {
    // ── construction ──────────────────────────────────────────────────────

    /// Creates a sketch over a new off-document surface.
    pub fn with_size(doc: &mut dyn DocumentHost, width: u32, height: u32, state: S) -> Self {
        Self::from_target(doc.create_surface(width, height), state)
    }

    /// Creates a sketch over an existing host surface.
    pub fn from_target(target: Box<dyn DrawTarget>, state: S) -> Self {
        Self {
            surface: Surface::new(target),
            clock: Clock::new(Box::new(MonotonicTime::new())),
            events: EventRegistry::default(),
            state,
            rate: 60.0,
            clear_before_draw: true,
            phase: Phase::Stopped,
            has_begun: false,
            deferred_begin: false,
            next_timer: 0,
            control: LoopControl::default(),
        }
    }

    /// Creates a sketch over the surface matching `selector`.
    ///
    /// Fails synchronously when nothing matches or the match is not a
    /// drawing surface; no sketch is constructed in either case.
    pub fn from_selector(
        doc: &mut dyn DocumentHost,
        selector: &str,
        state: S,
    ) -> Result<Self, SetupError> {
        Ok(Self::from_target(doc.surface_by_selector(selector)?, state))
    }

    /// Replaces the clock's time source. Rebaselines the clock: elapsed time,
    /// delta, and the frame counter restart from zero.
    pub fn time_source(&mut self, source: Box<dyn TimeSource>) -> &mut Self {
        self.clock = Clock::new(source);
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn surface(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Derived clock readout. Pure read, no side effects.
    pub fn time(&self) -> TimeReadout {
        self.clock.readout()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Identity of the currently armed timer, while running.
    pub fn timer(&self) -> Option<TimerId> {
        match self.phase {
            Phase::Running { timer } => Some(timer),
            Phase::Stopped => None,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Tick interval derived from the stored rate; `None` means unthrottled.
    ///
    /// Rates small enough to overflow a `Duration` saturate to
    /// `Duration::MAX`.
    pub fn tick_interval(&self) -> Option<Duration> {
        if self.rate == 0.0 {
            None
        } else {
            Some(Duration::try_from_secs_f64(1.0 / self.rate).unwrap_or(Duration::MAX))
        }
    }

    // ── fluent configuration ──────────────────────────────────────────────

    /// Sets the target tick rate. Rejects negative and non-finite rates at
    /// call time and leaves the stored rate unchanged on error.
    ///
    /// Changing the rate while running does not retime the armed timer; call
    /// [`recalibrate`](Self::recalibrate) (or [`change_rate`](Self::change_rate))
    /// for an immediate effect.
    pub fn set_rate(&mut self, rate: f64) -> Result<&mut Self, RateError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(RateError { requested: rate });
        }
        self.rate = rate;
        Ok(self)
    }

    /// Re-arms the timer at the stored rate by stopping and restarting the
    /// loop. No-op while stopped.
    pub fn recalibrate(&mut self) -> &mut Self {
        if self.is_running() {
            self.end().begin()
        } else {
            self
        }
    }

    /// [`set_rate`](Self::set_rate) plus [`recalibrate`](Self::recalibrate).
    pub fn change_rate(&mut self, rate: f64) -> Result<&mut Self, RateError> {
        self.set_rate(rate)?;
        Ok(self.recalibrate())
    }

    /// Toggles clearing the full surface before each draw phase.
    pub fn clear_before_draw(&mut self, clear: bool) -> &mut Self {
        self.clear_before_draw = clear;
        self
    }

    /// Visual background styling of the surface, distinct from the fill color.
    pub fn background_color(&mut self, color: &str) -> &mut Self {
        self.surface.background_color(color);
        self
    }

    /// Attaches the surface to a container element.
    pub fn mount(&mut self, parent: MountPoint) -> &mut Self {
        self.surface.mount(parent);
        self
    }

    /// Attaches the surface to the document body.
    pub fn mount_to_body(&mut self) -> &mut Self {
        self.mount(MountPoint::Body)
    }

    // ── registration ──────────────────────────────────────────────────────

    pub fn on_initialize<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S) + 'static,
    {
        self.events.initialize.push(Box::new(callback));
        self
    }

    pub fn on_update<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, f64) + 'static,
    {
        self.events.update.push(Box::new(callback));
        self
    }

    pub fn on_draw<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S) + 'static,
    {
        self.events.draw.push(Box::new(callback));
        self
    }

    pub fn on_key_up<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &KeySnapshot) + 'static,
    {
        self.events.key_up.push(Box::new(callback));
        self
    }

    pub fn on_key_down<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &KeySnapshot) + 'static,
    {
        self.events.key_down.push(Box::new(callback));
        self
    }

    pub fn on_mouse_enter<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot) + 'static,
    {
        self.events.mouse_enter.push(Box::new(callback));
        self
    }

    pub fn on_mouse_exit<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot) + 'static,
    {
        self.events.mouse_exit.push(Box::new(callback));
        self
    }

    pub fn on_mouse_move<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot) + 'static,
    {
        self.events.mouse_move.push(Box::new(callback));
        self
    }

    pub fn on_mouse_up<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot) + 'static,
    {
        self.events.mouse_up.push(Box::new(callback));
        self
    }

    pub fn on_mouse_down<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot) + 'static,
    {
        self.events.mouse_down.push(Box::new(callback));
        self
    }

    pub fn on_mouse_click<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot) + 'static,
    {
        self.events.mouse_click.push(Box::new(callback));
        self
    }

    pub fn on_mouse_double_click<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot) + 'static,
    {
        self.events.mouse_double_click.push(Box::new(callback));
        self
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Requests a deferred [`begin`](Self::begin): the host pump performs it
    /// on its next turn, so registrations made after `start()` in the same
    /// synchronous block still take effect before the first tick.
    pub fn start(&mut self) -> &mut Self {
        log::trace!("begin deferred to next pump turn");
        self.deferred_begin = true;
        self
    }

    /// Performs any pending deferred begin. Called by the host pump once per
    /// turn, before ticking.
    pub fn pump(&mut self) -> &mut Self {
        if self.deferred_begin {
            self.deferred_begin = false;
            self.begin();
        }
        self
    }

    /// Arms the loop. No-op while already running.
    ///
    /// The first-ever begin runs all `initialize` callbacks exactly once, in
    /// registration order, each to completion, before the timer is armed.
    /// A re-begin after [`end`](Self::end) resumes ticking without re-running
    /// initialize.
    pub fn begin(&mut self) -> &mut Self {
        if self.is_running() {
            return self;
        }

        if !self.has_begun {
            self.has_begun = true;
            self.run_initialize();
        }

        let timer = TimerId(self.next_timer);
        self.next_timer += 1;
        self.phase = Phase::Running { timer };
        log::debug!(
            "loop armed: timer={timer:?} interval={:?}",
            self.tick_interval()
        );
        // A stop requested from inside initialize lands here, leaving the
        // loop stopped before it ever ticks.
        self.apply_control();
        self
    }

    /// Cancels the timer. No-op while stopped. An in-flight tick is never
    /// interrupted; only future ticks are cancelled.
    pub fn end(&mut self) -> &mut Self {
        if let Phase::Running { timer } = self.phase {
            self.phase = Phase::Stopped;
            log::debug!("loop stopped: timer={timer:?}");
        }
        self
    }

    // ── tick ──────────────────────────────────────────────────────────────

    /// Runs one full tick: update callbacks, clock mark, optional clear, draw
    /// callbacks, frame-counter increment. Invoked by the host per timer
    /// firing.
    ///
    /// Update callbacks receive the delta of the interval ending at the
    /// *previous* tick; the clock is re-marked only after the update phase
    /// finishes. Callback panics propagate; there is no isolation between
    /// callbacks.
    pub fn tick(&mut self) {
        let delta = self.clock.readout().delta;
        for cb in self.events.update.iter_mut() {
            let mut frame = Frame {
                surface: &mut self.surface,
                time: self.clock.readout(),
                control: &mut self.control,
            };
            cb(&mut frame, &mut self.state, delta);
        }

        self.clock.mark_frame();

        if self.clear_before_draw {
            self.surface.clear();
        }

        for cb in self.events.draw.iter_mut() {
            let mut frame = Frame {
                surface: &mut self.surface,
                time: self.clock.readout(),
                control: &mut self.control,
            };
            cb(&mut frame, &mut self.state);
        }

        self.clock.bump_frame();
        self.apply_control();
    }

    // ── input dispatch ────────────────────────────────────────────────────

    /// Translates a raw host event into its snapshot and invokes the matching
    /// callback list, in registration order. Other kinds are unaffected.
    ///
    /// Mouse-move positions are adjusted to be surface-relative; every other
    /// mouse kind reports target-relative positions as delivered.
    pub fn dispatch(&mut self, input: RawInput) {
        match input {
            RawInput::KeyDown(raw) => self.dispatch_key(&raw, KeyKind::Down),
            RawInput::KeyUp(raw) => self.dispatch_key(&raw, KeyKind::Up),
            RawInput::MouseEnter(raw) => self.dispatch_mouse(&raw, MouseKind::Enter),
            RawInput::MouseExit(raw) => self.dispatch_mouse(&raw, MouseKind::Exit),
            RawInput::MouseMove(raw) => self.dispatch_mouse(&raw, MouseKind::Move),
            RawInput::MouseUp(raw) => self.dispatch_mouse(&raw, MouseKind::Up),
            RawInput::MouseDown(raw) => self.dispatch_mouse(&raw, MouseKind::Down),
            RawInput::MouseClick(raw) => self.dispatch_mouse(&raw, MouseKind::Click),
            RawInput::MouseDoubleClick(raw) => self.dispatch_mouse(&raw, MouseKind::DoubleClick),
        }
    }

    fn dispatch_key(&mut self, raw: &RawKeyEvent, kind: KeyKind) {
        let snap = KeySnapshot::from_raw(raw);
        let list = match kind {
            KeyKind::Up => &mut self.events.key_up,
            KeyKind::Down => &mut self.events.key_down,
        };
        run_key_list(
            list,
            &mut self.surface,
            &self.clock,
            &mut self.control,
            &mut self.state,
            &snap,
        );
        self.apply_control();
    }

    fn dispatch_mouse(&mut self, raw: &RawMouseEvent, kind: MouseKind) {
        let mut snap = MouseSnapshot::from_raw(raw);
        if kind == MouseKind::Move {
            snap = snap.offset_by(self.surface.offset());
        }
        let list = match kind {
            MouseKind::Enter => &mut self.events.mouse_enter,
            MouseKind::Exit => &mut self.events.mouse_exit,
            MouseKind::Move => &mut self.events.mouse_move,
            MouseKind::Up => &mut self.events.mouse_up,
            MouseKind::Down => &mut self.events.mouse_down,
            MouseKind::Click => &mut self.events.mouse_click,
            MouseKind::DoubleClick => &mut self.events.mouse_double_click,
        };
        run_mouse_list(
            list,
            &mut self.surface,
            &self.clock,
            &mut self.control,
            &mut self.state,
            &snap,
        );
        self.apply_control();
    }

    fn run_initialize(&mut self) {
        for cb in self.events.initialize.iter_mut() {
            let mut frame = Frame {
                surface: &mut self.surface,
                time: self.clock.readout(),
                control: &mut self.control,
            };
            cb(&mut frame, &mut self.state);
        }
    }

    fn apply_control(&mut self) {
        if self.control.take_end() {
            self.end();
        }
    }
}

impl<S> fmt::Debug for Sketch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sketch")
            .field("surface", &self.surface)
            .field("rate", &self.rate)
            .field("clear_before_draw", &self.clear_before_draw)
            .field("phase", &self.phase)
            .field("has_begun", &self.has_begun)
            .field("deferred_begin", &self.deferred_begin)
            .finish_non_exhaustive()
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum KeyKind {
    Up,
    Down,
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum MouseKind {
    Enter,
    Exit,
    Move,
    Up,
    Down,
    Click,
    DoubleClick,
}

fn run_key_list<S>(
    list: &mut [KeyCallback<S>],
    surface: &mut Surface,
    clock: &Clock,
    control: &mut LoopControl,
    state: &mut S,
    snap: &KeySnapshot,
) {
    for cb in list.iter_mut() {
        let mut frame = Frame {
            surface: &mut *surface,
            time: clock.readout(),
            control: &mut *control,
        };
        cb(&mut frame, state, snap);
    }
}

fn run_mouse_list<S>(
    list: &mut [MouseCallback<S>],
    surface: &mut Surface,
    clock: &Clock,
    control: &mut LoopControl,
    state: &mut S,
    snap: &MouseSnapshot,
) {
    for cb in list.iter_mut() {
        let mut frame = Frame {
            surface: &mut *surface,
            time: clock.readout(),
            control: &mut *control,
        };
        cb(&mut frame, state, snap);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::host::headless::{DrawCmd, DrawLog, HeadlessDocument, HeadlessSurface};
    use crate::input::{ButtonMask, Modifiers, MouseButton};
    use crate::time::ManualTime;

    /// Shared callback state for loop tests.
    #[derive(Default)]
    struct Probe {
        calls: Vec<String>,
        deltas: Vec<f64>,
        points: Vec<Vec2>,
    }

    fn sketch(w: u32, h: u32) -> (Sketch<Probe>, DrawLog, ManualTime) {
        let target = HeadlessSurface::new(w, h);
        let log = target.log();
        let time = ManualTime::new();
        let mut sk = Sketch::from_target(Box::new(target), Probe::default());
        sk.time_source(Box::new(time.clone()));
        (sk, log, time)
    }

    fn mouse_at(target: Vec2) -> RawMouseEvent {
        RawMouseEvent {
            client: Vec2::new(500.0, 500.0) + target,
            target,
            movement: Vec2::new(1.0, 1.0),
            button: MouseButton::Left,
            buttons: ButtonMask(0b1),
            modifiers: Modifiers::default(),
        }
    }

    fn key(name: &str) -> RawKeyEvent {
        RawKeyEvent {
            key: name.to_string(),
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    // ── registration order ────────────────────────────────────────────────

    #[test]
    fn callbacks_fire_in_registration_order() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_update(|_, s: &mut Probe, _| s.calls.push("u1".into()))
            .on_draw(|_, s| s.calls.push("d1".into()))
            .on_update(|_, s, _| s.calls.push("u2".into()))
            .on_draw(|_, s| s.calls.push("d2".into()));
        sk.begin();
        sk.tick();
        assert_eq!(sk.state().calls, ["u1", "u2", "d1", "d2"]);
    }

    #[test]
    fn registration_after_start_joins_the_first_initialize_pass() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_initialize(|_, s: &mut Probe| s.calls.push("early".into()));
        sk.start();
        sk.on_initialize(|_, s| s.calls.push("late".into()));
        sk.pump();
        assert_eq!(sk.state().calls, ["early", "late"]);
        assert!(sk.is_running());
    }

    #[test]
    fn start_alone_does_not_begin() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.start();
        assert!(!sk.is_running());
        sk.pump();
        assert!(sk.is_running());
    }

    // ── state machine ─────────────────────────────────────────────────────

    #[test]
    fn begin_twice_keeps_timer_and_skips_initialize() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_initialize(|_, s: &mut Probe| s.calls.push("init".into()));
        sk.begin();
        let timer = sk.timer();
        sk.begin();
        assert_eq!(sk.timer(), timer);
        assert_eq!(sk.state().calls, ["init"]);
    }

    #[test]
    fn end_while_stopped_is_a_noop() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.end();
        assert!(!sk.is_running());
    }

    #[test]
    fn rebegin_after_end_rearms_without_initialize() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_initialize(|_, s: &mut Probe| s.calls.push("init".into()));
        sk.begin();
        let first = sk.timer();
        sk.end();
        assert!(!sk.is_running());
        sk.begin();
        assert!(sk.is_running());
        assert_ne!(sk.timer(), first);
        assert_eq!(sk.state().calls, ["init"]);
    }

    #[test]
    fn pending_deferred_begin_survives_an_end() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.begin();
        sk.start();
        sk.end();
        sk.pump();
        assert!(sk.is_running());
    }

    // ── rate control ──────────────────────────────────────────────────────

    #[test]
    fn negative_rate_errors_and_keeps_the_previous_rate() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.set_rate(50.0).unwrap();
        let err = sk.set_rate(-1.0).unwrap_err();
        assert_eq!(err.requested, -1.0);
        assert_eq!(sk.rate(), 50.0);
        assert_eq!(sk.tick_interval(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn non_finite_rates_are_rejected() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.set_rate(50.0).unwrap();
        assert!(sk.set_rate(f64::NAN).is_err());
        assert_eq!(
            sk.set_rate(f64::INFINITY).err(),
            Some(RateError {
                requested: f64::INFINITY
            })
        );
        assert_eq!(sk.rate(), 50.0);
        assert_eq!(sk.tick_interval(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn a_vanishingly_small_rate_saturates_the_interval() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.set_rate(1e-30).unwrap();
        assert_eq!(sk.tick_interval(), Some(Duration::MAX));
    }

    #[test]
    fn rate_zero_means_unthrottled() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.set_rate(0.0).unwrap();
        assert_eq!(sk.tick_interval(), None);
    }

    #[test]
    fn positive_rate_derives_the_interval() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.set_rate(25.0).unwrap();
        assert_eq!(sk.tick_interval(), Some(Duration::from_millis(40)));
    }

    #[test]
    fn set_rate_alone_does_not_retime_a_running_loop() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.begin();
        let timer = sk.timer();
        sk.set_rate(5.0).unwrap();
        assert_eq!(sk.timer(), timer);
    }

    #[test]
    fn change_rate_rearms_a_running_loop() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.begin();
        let timer = sk.timer();
        sk.change_rate(5.0).unwrap();
        assert!(sk.is_running());
        assert_ne!(sk.timer(), timer);
    }

    #[test]
    fn recalibrate_while_stopped_stays_stopped() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.recalibrate();
        assert!(!sk.is_running());
    }

    // ── clock semantics ───────────────────────────────────────────────────

    #[test]
    fn update_observes_the_previous_ticks_delta() {
        let (mut sk, _log, time) = sketch(10, 10);
        sk.on_update(|_, s: &mut Probe, delta| s.deltas.push(delta));
        sk.begin();

        sk.tick();
        time.advance(Duration::from_millis(16));
        sk.tick();
        time.advance(Duration::from_millis(10));
        sk.tick();

        // Tick N reports the interval that ended at tick N-1.
        assert_eq!(sk.state().deltas, [0.0, 0.0, 0.016]);
    }

    #[test]
    fn frame_count_increments_after_draw() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_draw(|frame, s: &mut Probe| s.deltas.push(frame.time.frame_count as f64));
        sk.begin();
        sk.tick();
        sk.tick();
        assert_eq!(sk.state().deltas, [0.0, 1.0]);
        assert_eq!(sk.time().frame_count, 2);
    }

    // ── clear-before-draw ─────────────────────────────────────────────────

    #[test]
    fn auto_clear_runs_between_update_and_draw() {
        let (mut sk, log, _time) = sketch(20, 30);
        sk.on_draw(|frame, _| {
            frame.surface.fill("#fff").rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        });
        sk.begin();
        sk.tick();
        let cmds = log.take();
        assert_eq!(cmds[0], DrawCmd::ClearRect(Rect::new(0.0, 0.0, 20.0, 30.0)));
        assert_eq!(cmds[1], DrawCmd::FillColor("#fff".to_string()));
    }

    #[test]
    fn without_auto_clear_prior_content_persists() {
        let (mut sk, log, _time) = sketch(20, 30);
        sk.clear_before_draw(false);
        sk.begin();
        sk.tick();
        sk.tick();
        assert!(
            !log.commands().iter().any(|c| matches!(c, DrawCmd::ClearRect(_))),
            "no clear expected across ticks"
        );
    }

    // ── input dispatch ────────────────────────────────────────────────────

    #[test]
    fn key_events_reach_only_the_matching_kind() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_key_down(|_, s: &mut Probe, snap| s.calls.push(format!("down:{}", snap.key)))
            .on_key_up(|_, s, snap| s.calls.push(format!("up:{}", snap.key)));
        sk.dispatch(RawInput::KeyDown(key("a")));
        assert_eq!(sk.state().calls, ["down:a"]);
    }

    #[test]
    fn mouse_move_positions_are_surface_relative() {
        let mut doc = HeadlessDocument::new();
        doc.insert_surface_at("#c", 100, 100, Vec2::new(7.0, 9.0));
        let mut sk = Sketch::from_selector(&mut doc, "#c", Probe::default()).unwrap();
        sk.on_mouse_move(|_, s: &mut Probe, snap| s.points.push(snap.pos))
            .on_mouse_down(|_, s, snap| s.points.push(snap.pos));

        sk.dispatch(RawInput::MouseMove(mouse_at(Vec2::new(20.0, 30.0))));
        sk.dispatch(RawInput::MouseDown(mouse_at(Vec2::new(20.0, 30.0))));

        // Move is offset-adjusted; down is not.
        assert_eq!(
            sk.state().points,
            [Vec2::new(13.0, 21.0), Vec2::new(20.0, 30.0)]
        );
    }

    #[test]
    fn mouse_snapshots_carry_buttons_and_absolute_position() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_mouse_click(|_, s: &mut Probe, snap| {
            assert!(snap.buttons.contains(MouseButton::Left));
            s.points.push(snap.abs);
        });
        sk.dispatch(RawInput::MouseClick(mouse_at(Vec2::new(3.0, 4.0))));
        assert_eq!(sk.state().points, [Vec2::new(503.0, 504.0)]);
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn one_tick_draws_the_registered_square() {
        let mut doc = HeadlessDocument::new();
        let log = doc.log();
        let mut sk = Sketch::with_size(&mut doc, 400, 400, Probe::default());
        sk.set_rate(0.0).unwrap();
        sk.on_draw(|frame, _| {
            frame.surface.fill("#fff").square(Vec2::new(10.0, 10.0), 5.0);
        });
        sk.start();
        sk.pump();
        sk.tick();

        assert_eq!(
            log.commands(),
            vec![
                DrawCmd::ClearRect(Rect::new(0.0, 0.0, 400.0, 400.0)),
                DrawCmd::FillColor("#fff".to_string()),
                DrawCmd::FillRect(Rect::new(10.0, 10.0, 5.0, 5.0)),
            ]
        );
    }

    #[test]
    fn unmatched_selector_fails_synchronously() {
        let mut doc = HeadlessDocument::new();
        let err = Sketch::from_selector(&mut doc, "#missing", Probe::default()).unwrap_err();
        assert_eq!(err, SetupError::NoSuchElement("#missing".to_string()));
    }

    #[test]
    fn non_drawable_selector_fails_with_a_type_error() {
        let mut doc = HeadlessDocument::new();
        doc.insert_plain("#app");
        let err = Sketch::from_selector(&mut doc, "#app", Probe::default()).unwrap_err();
        assert_eq!(err, SetupError::NotADrawTarget("#app".to_string()));
    }

    // ── loop control from callbacks ───────────────────────────────────────

    #[test]
    fn an_end_request_from_update_still_runs_the_draw_phase() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_update(|frame, s: &mut Probe, _| {
            s.calls.push("update".into());
            frame.control.end();
        })
        .on_draw(|_, s| s.calls.push("draw".into()));
        sk.begin();
        sk.tick();
        assert_eq!(sk.state().calls, ["update", "draw"]);
        assert!(!sk.is_running());
    }

    #[test]
    fn an_end_request_from_initialize_leaves_the_loop_stopped() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_initialize(|frame, _: &mut Probe| frame.control.end());
        sk.begin();
        assert!(!sk.is_running());
    }

    #[test]
    fn an_end_request_from_input_dispatch_stops_the_loop() {
        let (mut sk, _log, _time) = sketch(10, 10);
        sk.on_key_down(|frame, _: &mut Probe, _| frame.control.end());
        sk.begin();
        sk.dispatch(RawInput::KeyDown(key("q")));
        assert!(!sk.is_running());
    }

    // ── fluent configuration ──────────────────────────────────────────────

    #[test]
    fn configuration_chains_on_the_same_sketch() {
        let (mut sk, log, _time) = sketch(10, 10);
        sk.background_color("#eee")
            .mount_to_body()
            .clear_before_draw(false)
            .set_rate(30.0)
            .unwrap()
            .start();
        sk.pump();
        assert!(sk.is_running());
        assert_eq!(
            log.commands(),
            vec![
                DrawCmd::Background("#eee".to_string()),
                DrawCmd::Mount(MountPoint::Body),
            ]
        );
    }

    #[test]
    fn debug_formatting_skips_callbacks_and_state() {
        let (sk, _log, _time) = sketch(10, 10);
        let rendered = format!("{sk:?}");
        assert!(rendered.starts_with("Sketch"));
        assert!(rendered.contains("rate: 60.0"));
    }
}
