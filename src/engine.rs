//! Core countdown state machine.
//!
//! The engine owns the target end-time, computes remaining time, tracks the
//! running/stopped lifecycle, enforces the "cannot start at zero" rule and
//! queues lifecycle [`Event`]s for whoever owns it. It has no timers of its
//! own: a driver (the [`countdown`](crate::countdown) widget, or anything
//! else) calls [`Engine::tick`] periodically and the engine recomputes the
//! display from the fixed deadline and the injected [`Clock`]. Because each
//! tick derives state from wall-clock comparison rather than tick counting,
//! delayed or missed ticks self-correct on the next invocation instead of
//! accumulating drift.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widgets::engine::{Engine, TimeParts, RunState};
//!
//! let mut engine = Engine::new();
//! engine.configure(TimeParts::new(0, 5, 30), false).unwrap();
//! engine.start().unwrap();
//! assert_eq!(engine.run_state(), RunState::Running);
//!
//! // Drive it from a periodic callback:
//! let _outcome = engine.tick();
//! ```

use crate::clock::{Clock, SystemClock};
use crate::display::{project, DisplayPolicy};
use crate::RenderTarget;
use std::collections::VecDeque;
use std::time::{Duration, SystemTime};
use thiserror::Error;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;

/// Queued events are dropped oldest-first past this depth when the owner
/// never drains them.
const EVENT_BACKLOG: usize = 64;

/// Raw `(hours, minutes, seconds)` configuration triple, as produced by a
/// settings form.
///
/// No upper bound is enforced: overflowing components such as `minutes: 75`
/// are accepted and only normalized through remaining-time math at display
/// time. Negative components are malformed and rejected by
/// [`Engine::configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// Whole hours.
    pub hours: i64,
    /// Whole minutes; may exceed 59.
    pub minutes: i64,
    /// Whole seconds; may exceed 59.
    pub seconds: i64,
}

impl TimeParts {
    /// Builds a triple from its components.
    pub fn new(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    fn is_valid(&self) -> bool {
        self.hours >= 0 && self.minutes >= 0 && self.seconds >= 0
    }

    fn total_millis(&self) -> u64 {
        (self.hours as u64)
            .saturating_mul(MS_PER_HOUR)
            .saturating_add((self.minutes as u64).saturating_mul(MS_PER_MINUTE))
            .saturating_add((self.seconds as u64).saturating_mul(MS_PER_SECOND))
    }
}

/// Time left until the deadline, clamped at zero.
///
/// Stores the raw leftover milliseconds; displayed units are derived with
/// floor division, so the unit triple reads all-zero for the final
/// sub-second stretch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remaining {
    millis: u64,
}

impl Remaining {
    /// Wraps a raw millisecond count.
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Time left between `now` and `deadline`; zero once the deadline has
    /// passed or the clock has jumped beyond it.
    pub fn between(now: SystemTime, deadline: SystemTime) -> Self {
        let left = deadline.duration_since(now).unwrap_or(Duration::ZERO);
        Self {
            millis: left.as_millis() as u64,
        }
    }

    /// Whole hours left (unbounded, no wrap into days).
    pub fn hours(&self) -> u64 {
        self.millis / MS_PER_HOUR
    }

    /// Whole minutes left within the hour.
    pub fn minutes(&self) -> u64 {
        (self.millis / MS_PER_MINUTE) % 60
    }

    /// Whole seconds left within the minute.
    pub fn seconds(&self) -> u64 {
        (self.millis / MS_PER_SECOND) % 60
    }

    /// Leftover milliseconds below one second, for sub-second precision.
    pub fn subsec_millis(&self) -> u64 {
        self.millis % MS_PER_SECOND
    }

    /// Raw leftover milliseconds.
    pub fn total_millis(&self) -> u64 {
        self.millis
    }

    /// True when every displayed unit is zero (less than one second left).
    pub fn is_zero(&self) -> bool {
        self.hours() == 0 && self.minutes() == 0 && self.seconds() == 0
    }
}

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Never armed, or just reset.
    Idle,
    /// A scheduling loop is active.
    Running,
    /// Armed with a duration/deadline but not currently ticking.
    Stopped,
}

/// Which displayed units changed during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitChanges {
    /// The hours digit pair changed.
    pub hours: bool,
    /// The minutes digit pair changed.
    pub minutes: bool,
    /// The seconds digit pair changed.
    pub seconds: bool,
}

impl UnitChanges {
    /// True when at least one unit changed.
    pub fn any(&self) -> bool {
        self.hours || self.minutes || self.seconds
    }
}

/// Result of a single [`Engine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No displayed unit changed; no re-render is needed.
    Unchanged,
    /// The listed units changed and should be re-rendered.
    UnitsChanged(UnitChanges),
    /// The countdown just reached all-zero. Fires exactly once per run; the
    /// engine has already stopped itself.
    ReachedZero,
}

/// Lifecycle notification queued by the engine for its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A run was armed and started.
    Started,
    /// The countdown was paused, or stopped itself on completion.
    Stopped,
    /// The engine was cleared back to idle.
    Reset,
    /// The countdown reached zero. Follows the final `UnitsChanged` and
    /// precedes the auto-stop's `Stopped`.
    Completed,
    /// Displayed units changed during a tick.
    UnitsChanged(UnitChanges),
}

/// Rejected configuration input. The prior engine state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Hours, minutes and seconds need to be valid non-negative numbers.
    #[error("hours, minutes and seconds need to be a valid non-negative number")]
    InvalidDuration,
}

/// Rejected lifecycle operation. All variants are locally recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Attempt to start with no time configured; the start control stays
    /// disabled instead.
    #[error("cannot start a countdown with no time configured")]
    ZeroDuration,
    /// Defensive double-start guard; starting twice must not re-arm the
    /// deadline.
    #[error("countdown is already running")]
    AlreadyRunning,
}

/// How the next `start` derives its deadline. The most recent configure
/// call decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArmMode {
    /// Count down from now for the configured/remaining length.
    Length,
    /// Count down to a fixed point in time.
    Until(SystemTime),
}

/// The countdown engine. See the [module docs](self) for an overview.
///
/// Generic over its [`Clock`] so tests and embedders can control time; the
/// default is the system wall clock.
#[derive(Debug, Clone)]
pub struct Engine<C: Clock = SystemClock> {
    clock: C,
    mode: ArmMode,
    deadline: Option<SystemTime>,
    remaining: Remaining,
    run_state: RunState,
    hide_zeroed_units: bool,
    start_slack: Duration,
    events: VecDeque<Event>,
}

impl Engine<SystemClock> {
    /// Creates an idle engine on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Engine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Engine<C> {
    /// Creates an idle engine reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            mode: ArmMode::Length,
            deadline: None,
            remaining: Remaining::default(),
            run_state: RunState::Idle,
            hide_zeroed_units: false,
            start_slack: Duration::from_secs(1),
            events: VecDeque::new(),
        }
    }

    /// Configures a countdown length.
    ///
    /// Rejects negative components with [`ConfigError::InvalidDuration`]
    /// without mutating displayed state. On success any previous deadline is
    /// discarded, the remaining time is recomputed from the raw parts (no
    /// deadline is armed yet) and the engine lands in `Stopped`, or `Idle`
    /// when the length is all-zero. A running countdown is stopped first.
    pub fn configure(&mut self, parts: TimeParts, hide_zeroed_units: bool) -> Result<(), ConfigError> {
        if !parts.is_valid() {
            return Err(ConfigError::InvalidDuration);
        }
        self.stop();
        self.mode = ArmMode::Length;
        self.deadline = None;
        self.remaining = Remaining::from_millis(parts.total_millis());
        self.hide_zeroed_units = hide_zeroed_units;
        self.run_state = if self.remaining.is_zero() {
            RunState::Idle
        } else {
            RunState::Stopped
        };
        Ok(())
    }

    /// Configures a countdown toward a fixed point in time.
    ///
    /// Mutually exclusive with [`configure`](Self::configure) per run: the
    /// most recent call decides how `start` arms the deadline. A deadline
    /// already in the past is accepted and clamps the remaining time to
    /// zero, which leaves the engine unstartable rather than erroring here.
    pub fn configure_until(&mut self, deadline: SystemTime) {
        self.stop();
        self.mode = ArmMode::Until(deadline);
        self.deadline = None;
        self.remaining = Remaining::between(self.clock.now(), deadline);
        self.run_state = if self.remaining.is_zero() {
            RunState::Idle
        } else {
            RunState::Stopped
        };
    }

    /// Arms the deadline and transitions to `Running`.
    ///
    /// Fails with [`EngineError::ZeroDuration`] when the remaining time is
    /// already all-zero (a hard precondition, not merely a UI affordance)
    /// and with [`EngineError::AlreadyRunning`] when a run is active, so a
    /// double start can never re-arm the deadline.
    ///
    /// In length mode the deadline is computed once as `now + remaining +
    /// start slack`; restarting after a pause therefore resumes from the
    /// frozen display. In absolute mode the stored deadline is used
    /// unmodified, with no slack. Emits [`Event::Started`].
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.run_state == RunState::Running {
            return Err(EngineError::AlreadyRunning);
        }
        match self.mode {
            ArmMode::Length => {
                if self.remaining.is_zero() {
                    return Err(EngineError::ZeroDuration);
                }
                let length = Duration::from_millis(self.remaining.total_millis());
                self.deadline = Some(self.clock.now() + length + self.start_slack);
            }
            ArmMode::Until(deadline) => {
                self.remaining = Remaining::between(self.clock.now(), deadline);
                if self.remaining.is_zero() {
                    return Err(EngineError::ZeroDuration);
                }
                self.deadline = Some(deadline);
            }
        }
        self.run_state = RunState::Running;
        self.push_event(Event::Started);
        Ok(())
    }

    /// Pauses the countdown. Idempotent; a no-op unless running.
    ///
    /// The remaining time stays frozen at its last computed value and the
    /// deadline is re-armed from it on the next `start`. Emits
    /// [`Event::Stopped`] on an actual transition only.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Stopped;
            self.push_event(Event::Stopped);
        }
    }

    /// Stops and clears everything back to `Idle`: zero length, no deadline,
    /// hide flag off. Emits [`Event::Reset`] (never `Started`).
    pub fn reset(&mut self) {
        self.stop();
        self.mode = ArmMode::Length;
        self.deadline = None;
        self.remaining = Remaining::default();
        self.hide_zeroed_units = false;
        self.run_state = RunState::Idle;
        self.push_event(Event::Reset);
    }

    /// Recomputes the remaining time from the deadline and the clock.
    ///
    /// A no-op returning [`TickOutcome::Unchanged`] unless running. Never
    /// errors: a clock that jumped past (or before) the deadline is absorbed
    /// by clamping. On the transition to all-zero it emits
    /// [`Event::Completed`] exactly once, stops itself and returns
    /// [`TickOutcome::ReachedZero`]; repeated calls afterwards are
    /// idempotent.
    pub fn tick(&mut self) -> TickOutcome {
        if self.run_state != RunState::Running {
            return TickOutcome::Unchanged;
        }
        let Some(deadline) = self.deadline else {
            return TickOutcome::Unchanged;
        };

        let next = Remaining::between(self.clock.now(), deadline);
        let changes = UnitChanges {
            hours: next.hours() != self.remaining.hours(),
            minutes: next.minutes() != self.remaining.minutes(),
            seconds: next.seconds() != self.remaining.seconds(),
        };
        self.remaining = next;

        if changes.any() {
            self.push_event(Event::UnitsChanged(changes));
        }
        if next.is_zero() {
            self.push_event(Event::Completed);
            self.stop();
            return TickOutcome::ReachedZero;
        }
        if changes.any() {
            TickOutcome::UnitsChanged(changes)
        } else {
            TickOutcome::Unchanged
        }
    }

    /// The current remaining-time snapshot.
    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    /// The current lifecycle state.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Whether zero-valued leading units are hidden at display time.
    pub fn hide_zeroed_units(&self) -> bool {
        self.hide_zeroed_units
    }

    /// Unit visibility derived from the current snapshot.
    pub fn display_policy(&self) -> DisplayPolicy {
        project(self.remaining, self.hide_zeroed_units)
    }

    /// Whether a `start` would currently succeed. Drives the
    /// enabled/disabled state of a start control.
    pub fn can_start(&self) -> bool {
        self.run_state != RunState::Running && !self.remaining.is_zero()
    }

    /// Adjusts the flat bias added when arming a deadline from a length.
    ///
    /// Defaults to one second, which keeps the configured first digit on
    /// screen for a full interval instead of dropping immediately on the
    /// first tick. Absolute-mode arming never applies it.
    pub fn set_start_slack(&mut self, slack: Duration) {
        self.start_slack = slack;
    }

    /// The current start slack.
    pub fn start_slack(&self) -> Duration {
        self.start_slack
    }

    /// Drains all queued lifecycle events, oldest first.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// Pushes the current snapshot into a presentation surface.
    pub fn render_to(&self, target: &mut dyn RenderTarget) {
        target.render(&self.remaining, self.display_policy(), self.run_state);
    }

    fn push_event(&mut self, event: Event) {
        if self.events.len() == EVENT_BACKLOG {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn manual_engine() -> (Engine<ManualClock>, ManualClock) {
        let clock = ManualClock::new(SystemTime::UNIX_EPOCH);
        (Engine::with_clock(clock.clone()), clock)
    }

    #[test]
    fn configure_then_start_runs() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(0, 1, 30), false).unwrap();

        assert_eq!(engine.run_state(), RunState::Stopped);
        engine.start().unwrap();
        assert_eq!(engine.run_state(), RunState::Running);
        assert_eq!(engine.take_events(), vec![Event::Started]);
    }

    #[test]
    fn zero_duration_cannot_start() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 0), false).unwrap();

        assert_eq!(engine.run_state(), RunState::Idle);
        assert!(!engine.can_start());
        assert_eq!(engine.start(), Err(EngineError::ZeroDuration));
        assert_ne!(engine.run_state(), RunState::Running);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn negative_parts_are_rejected_without_mutating_state() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(0, 5, 0), true).unwrap();

        let before = engine.remaining();
        assert_eq!(
            engine.configure(TimeParts::new(0, -1, 0), false),
            Err(ConfigError::InvalidDuration)
        );
        assert_eq!(engine.remaining(), before);
        assert!(engine.hide_zeroed_units());
    }

    #[test]
    fn overflowing_minutes_normalize_through_decomposition() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(0, 75, 0), false).unwrap();

        let remaining = engine.remaining();
        assert_eq!(remaining.hours(), 1);
        assert_eq!(remaining.minutes(), 15);
        assert_eq!(remaining.seconds(), 0);
    }

    #[test]
    fn double_start_does_not_rearm() {
        let (mut engine, clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 10), false).unwrap();
        engine.start().unwrap();

        clock.advance(Duration::from_secs(3));
        assert_eq!(engine.start(), Err(EngineError::AlreadyRunning));

        // First tick reflects the original deadline, not a re-armed one.
        engine.tick();
        assert_eq!(engine.remaining().seconds(), 8); // 10 + 1s slack - 3s
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 5), false).unwrap();
        engine.start().unwrap();

        engine.stop();
        let state_once = engine.run_state();
        let events_once = engine.take_events();
        engine.stop();

        assert_eq!(engine.run_state(), state_once);
        assert_eq!(events_once, vec![Event::Started, Event::Stopped]);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn configure_round_trips_before_any_clock_advance() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(2, 3, 4), false).unwrap();

        // No deadline armed yet, so tick leaves the raw length untouched.
        assert_eq!(engine.tick(), TickOutcome::Unchanged);
        let remaining = engine.remaining();
        assert_eq!(
            (remaining.hours(), remaining.minutes(), remaining.seconds()),
            (2, 3, 4)
        );
    }

    #[test]
    fn countdown_is_monotonic_in_total_millis() {
        let (mut engine, clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 30), false).unwrap();
        engine.start().unwrap();

        let mut last = u64::MAX;
        for _ in 0..40 {
            clock.advance(Duration::from_millis(730));
            engine.tick();
            let now = engine.remaining().total_millis();
            assert!(now <= last);
            last = now;
        }
    }

    #[test]
    fn reaches_zero_exactly_once() {
        let (mut engine, clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 1), false).unwrap();
        engine.start().unwrap();

        // 1s configured + 1s start slack.
        clock.advance(Duration::from_millis(2100));
        assert_eq!(engine.tick(), TickOutcome::ReachedZero);
        assert_eq!(engine.run_state(), RunState::Stopped);

        let events = engine.take_events();
        let completions = events.iter().filter(|e| **e == Event::Completed).count();
        assert_eq!(completions, 1);
        assert_eq!(events.last(), Some(&Event::Stopped));

        // Settled: further ticks change nothing and never re-complete.
        clock.advance(Duration::from_secs(5));
        assert_eq!(engine.tick(), TickOutcome::Unchanged);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn tick_before_deadline_advance_is_unchanged() {
        let (mut engine, clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 10), false).unwrap();
        engine.start().unwrap();
        engine.tick(); // settle onto deadline-derived remaining
        clock.advance(Duration::from_millis(40));
        engine.tick(); // crosses into the slack-shifted second

        clock.advance(Duration::from_millis(40));
        assert_eq!(engine.tick(), TickOutcome::Unchanged);
    }

    #[test]
    fn tick_reports_which_units_changed() {
        let (mut engine, clock) = manual_engine();
        engine.configure(TimeParts::new(1, 0, 0), false).unwrap();
        engine.start().unwrap();
        engine.tick();

        // Crossing the hour boundary flips all three displayed units.
        clock.advance(Duration::from_secs(2));
        match engine.tick() {
            TickOutcome::UnitsChanged(changes) => {
                assert!(changes.hours);
                assert!(changes.minutes);
                assert!(changes.seconds);
            }
            other => panic!("expected UnitsChanged, got {:?}", other),
        }
    }

    #[test]
    fn pause_freezes_remaining_and_restart_resumes() {
        let (mut engine, clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 10), false).unwrap();
        engine.start().unwrap();

        clock.advance(Duration::from_secs(4));
        engine.tick();
        let frozen = engine.remaining();
        engine.stop();

        // Wall time keeps moving while paused; the display must not.
        clock.advance(Duration::from_secs(60));
        assert_eq!(engine.tick(), TickOutcome::Unchanged);
        assert_eq!(engine.remaining(), frozen);

        engine.start().unwrap();
        engine.tick();
        assert_eq!(engine.remaining().seconds(), frozen.seconds() + 1); // slack re-applied
    }

    #[test]
    fn start_stop_start_interleaves_events() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(1, 1, 1), false).unwrap();

        engine.start().unwrap();
        engine.stop();
        engine.start().unwrap();

        assert_eq!(
            engine.take_events(),
            vec![Event::Started, Event::Stopped, Event::Started]
        );
    }

    #[test]
    fn reset_clears_to_idle_without_restarting() {
        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(0, 2, 0), true).unwrap();
        engine.start().unwrap();
        engine.take_events();

        engine.reset();
        assert_eq!(engine.run_state(), RunState::Idle);
        assert!(engine.remaining().is_zero());
        assert!(!engine.hide_zeroed_units());
        assert_eq!(engine.take_events(), vec![Event::Stopped, Event::Reset]);
    }

    #[test]
    fn reset_is_reachable_from_idle() {
        let (mut engine, _clock) = manual_engine();
        engine.reset();
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.take_events(), vec![Event::Reset]);
    }

    #[test]
    fn absolute_mode_arms_without_slack() {
        let (mut engine, clock) = manual_engine();
        let deadline = SystemTime::UNIX_EPOCH + Duration::from_secs(90);
        engine.configure_until(deadline);

        engine.start().unwrap();
        engine.tick();
        assert_eq!(engine.remaining().minutes(), 1);
        assert_eq!(engine.remaining().seconds(), 30);

        clock.advance(Duration::from_secs(91));
        assert_eq!(engine.tick(), TickOutcome::ReachedZero);
    }

    #[test]
    fn past_absolute_deadline_clamps_and_refuses_start() {
        let (mut engine, clock) = manual_engine();
        clock.advance(Duration::from_secs(100));
        engine.configure_until(SystemTime::UNIX_EPOCH + Duration::from_secs(10));

        assert!(engine.remaining().is_zero());
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.start(), Err(EngineError::ZeroDuration));
    }

    #[test]
    fn latest_configure_call_wins() {
        let (mut engine, _clock) = manual_engine();
        engine.configure_until(SystemTime::UNIX_EPOCH + Duration::from_secs(3600));
        engine.configure(TimeParts::new(0, 0, 5), false).unwrap();

        engine.start().unwrap();
        engine.tick();
        // Length mode with slack, not the hour-away absolute deadline.
        assert!(engine.remaining().total_millis() <= 6_000);
    }

    #[test]
    fn backward_clock_jump_grows_toward_the_fixed_deadline() {
        let (mut engine, clock) = manual_engine();
        clock.advance(Duration::from_secs(100));
        engine.configure(TimeParts::new(0, 0, 10), false).unwrap();
        engine.start().unwrap(); // deadline fixed at 111s

        clock.advance(Duration::from_secs(3));
        engine.tick();
        assert_eq!(engine.remaining().seconds(), 8);

        // Host clock steps back behind the start instant. The deadline
        // stays put, so the remaining time grows instead of underflowing.
        clock.set(SystemTime::UNIX_EPOCH + Duration::from_secs(95));
        engine.tick();
        assert_eq!(engine.remaining().seconds(), 16);
        assert_eq!(engine.run_state(), RunState::Running);

        // And the run still terminates normally once time passes it again.
        clock.set(SystemTime::UNIX_EPOCH + Duration::from_secs(200));
        assert_eq!(engine.tick(), TickOutcome::ReachedZero);
        assert_eq!(engine.remaining().total_millis(), 0);
    }

    #[test]
    fn clock_jump_past_deadline_clamps_to_zero() {
        let (mut engine, clock) = manual_engine();
        clock.advance(Duration::from_secs(1000));
        engine.configure(TimeParts::new(0, 0, 5), false).unwrap();
        engine.start().unwrap();

        // Host clock jumps far past the deadline in one step.
        clock.advance(Duration::from_secs(3600));
        assert_eq!(engine.tick(), TickOutcome::ReachedZero);
        assert_eq!(engine.remaining().total_millis(), 0);
    }

    #[test]
    fn event_backlog_drops_oldest() {
        let (mut engine, _clock) = manual_engine();
        for _ in 0..(EVENT_BACKLOG + 5) {
            engine.configure(TimeParts::new(0, 0, 5), false).unwrap();
            engine.start().unwrap();
            engine.stop();
        }
        let events = engine.take_events();
        assert_eq!(events.len(), EVENT_BACKLOG);
    }

    #[test]
    fn render_to_pushes_current_snapshot() {
        struct Surface {
            seconds: u64,
            state: Option<RunState>,
        }
        impl RenderTarget for Surface {
            fn render(&mut self, remaining: &Remaining, _policy: DisplayPolicy, state: RunState) {
                self.seconds = remaining.seconds();
                self.state = Some(state);
            }
        }

        let (mut engine, _clock) = manual_engine();
        engine.configure(TimeParts::new(0, 0, 7), false).unwrap();

        let mut surface = Surface {
            seconds: 0,
            state: None,
        };
        engine.render_to(&mut surface);
        assert_eq!(surface.seconds, 7);
        assert_eq!(surface.state, Some(RunState::Stopped));
    }
}
