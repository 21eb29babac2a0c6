//! Countdown widget for Bubble Tea applications.
//!
//! Wraps an [`Engine`] in the bubbletea-rs message loop: a periodic tick
//! command drives [`Engine::tick`] at a bounded interval while running, and
//! the chain cancels itself when the countdown completes or is stopped.
//! Correctness never depends on the interval — every tick recomputes the
//! display from the wall-clock deadline, so a backgrounded or slow host
//! self-corrects on the next tick.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widgets::countdown::{new, new_with_interval};
//! use countdown_widgets::engine::TimeParts;
//! use std::time::Duration;
//!
//! // Create a countdown with the default 100ms tick interval
//! let mut countdown = new();
//! countdown.configure(TimeParts::new(0, 5, 0), false).unwrap();
//!
//! // Or with a custom interval
//! let countdown = new_with_interval(Duration::from_millis(50));
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use countdown_widgets::countdown::{new, Model, CompletedMsg};
//! use countdown_widgets::engine::TimeParts;
//!
//! struct MyApp {
//!     countdown: Model,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = new();
//!         countdown.configure(TimeParts::new(0, 10, 0), true).unwrap();
//!         let cmd = countdown.start_cmd();
//!         (Self { countdown }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<CompletedMsg>() {
//!             if done.id == self.countdown.id() {
//!                 // Countdown finished!
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```
//!
//! The user-facing start/stop gesture is whatever the host wires up;
//! [`Model::toggle_cmd`] is the usual handler for a single play/pause key.

use crate::clock::{Clock, SystemClock};
use crate::display::{format_unit, Styles};
use crate::engine::{
    ConfigError, Engine, Event, Remaining, RunState, TickOutcome, TimeParts,
};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime};

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generates unique identifiers so multiple countdowns can coexist in one
/// application without message conflicts.
fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Default nominal tick interval. A tuning parameter, not a correctness
/// requirement: remaining time is derived from the deadline each tick.
const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Message sent on every scheduled tick of a countdown.
///
/// The `tag` identifies the tick chain it belongs to; chains armed before
/// the most recent start are rejected, which is what makes cancellation of
/// a possibly-absent loop idempotent.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The countdown this tick targets.
    pub id: i64,
    tag: i64,
}

/// Message used to start and stop a countdown.
///
/// Produced by [`Model::start_cmd`], [`Model::stop_cmd`] and
/// [`Model::toggle_cmd`]; the desired running state is private so it can
/// only be set through those methods.
#[derive(Debug, Clone)]
pub struct StartStopMsg {
    /// The countdown this message targets.
    pub id: i64,
    running: bool,
}

/// Message used to clear a countdown back to idle.
#[derive(Debug, Clone)]
pub struct ResetMsg {
    /// The countdown this message targets.
    pub id: i64,
}

/// Message emitted when a countdown reaches zero.
///
/// Sent once per run, after the engine has already stopped itself. Hosts
/// match on the `id` to tell countdowns apart.
#[derive(Debug, Clone)]
pub struct CompletedMsg {
    /// The countdown that completed.
    pub id: i64,
}

/// Countdown widget model.
///
/// Owns the [`Engine`] exclusively: hosts reach lifecycle state through the
/// read accessors and change it only via commands and configuration calls,
/// never by mutating run state directly.
#[derive(Debug, Clone)]
pub struct Model<C: Clock = SystemClock> {
    engine: Engine<C>,
    /// Nominal time between ticks while running.
    pub interval: Duration,
    /// Styling for the digit display.
    pub styles: Styles,
    id: i64,
    tag: i64,
}

/// Creates an idle countdown on the system clock with the default interval.
pub fn new() -> Model {
    new_with_interval(DEFAULT_INTERVAL)
}

/// Creates an idle countdown with a custom tick interval.
pub fn new_with_interval(interval: Duration) -> Model {
    Model::with_engine(Engine::new(), interval)
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl<C: Clock> Model<C> {
    /// Wraps an existing engine, e.g. one built on a custom [`Clock`].
    pub fn with_engine(engine: Engine<C>, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            styles: Styles::default(),
            id: next_id(),
            tag: 0,
        }
    }

    /// The unique identifier of this countdown instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Read access to the underlying engine.
    pub fn engine(&self) -> &Engine<C> {
        &self.engine
    }

    /// Whether the countdown is actively ticking.
    pub fn running(&self) -> bool {
        self.engine.run_state() == RunState::Running
    }

    /// Whether a start command would currently succeed; drives the
    /// enabled/disabled state of a start control.
    pub fn can_start(&self) -> bool {
        self.engine.can_start()
    }

    /// The current remaining-time snapshot.
    pub fn remaining(&self) -> Remaining {
        self.engine.remaining()
    }

    /// Configures a countdown length and the hide-zeroed-units flag.
    ///
    /// This is the entry point a settings collaborator forwards into; see
    /// [`crate::settings`].
    pub fn configure(
        &mut self,
        parts: TimeParts,
        hide_zeroed_units: bool,
    ) -> Result<(), ConfigError> {
        self.engine.configure(parts, hide_zeroed_units)
    }

    /// Configures a countdown toward a fixed point in time.
    pub fn configure_until(&mut self, deadline: SystemTime) {
        self.engine.configure_until(deadline);
    }

    /// Adjusts the arming slack; see [`Engine::set_start_slack`].
    pub fn set_start_slack(&mut self, slack: Duration) {
        self.engine.set_start_slack(slack);
    }

    /// Drains queued lifecycle events. Call after forwarding a message to
    /// [`update`](Self::update) to observe Started/Stopped/Reset/Completed
    /// transitions in order.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.engine.take_events()
    }

    /// Generates a command that starts the countdown.
    pub fn start_cmd(&self) -> Cmd {
        self.start_stop(true)
    }

    /// Generates a command that pauses the countdown, keeping the remaining
    /// time frozen for a later start.
    pub fn stop_cmd(&self) -> Cmd {
        self.start_stop(false)
    }

    /// Generates a command that flips between running and stopped; the
    /// usual handler for a single play/pause gesture.
    pub fn toggle_cmd(&self) -> Cmd {
        self.start_stop(!self.running())
    }

    /// Generates a command that clears the countdown back to idle.
    pub fn reset_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ResetMsg { id }) as Msg
        })
    }

    fn start_stop(&self, running: bool) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(StartStopMsg { id, running }) as Msg
        })
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn completed_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(CompletedMsg { id }) as Msg
        })
    }

    /// Processes countdown messages and returns the next scheduled command.
    ///
    /// Handles [`StartStopMsg`], [`ResetMsg`] and [`TickMsg`]; anything else
    /// is ignored. Messages addressed to another countdown leave state
    /// untouched. Within one update the engine is fully settled before any
    /// follow-up message is scheduled, so observers never see a torn state.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(start_stop) = msg.downcast_ref::<StartStopMsg>() {
            if start_stop.id != 0 && start_stop.id != self.id {
                return None;
            }
            if start_stop.running {
                // A refused start (zero duration, already running) is a
                // recoverable no-op; the control simply stays as it is.
                if self.engine.start().is_ok() {
                    self.tag += 1;
                    return Some(self.tick_cmd());
                }
                return None;
            }
            self.engine.stop();
            // No new command: the stale tick chain dies on the tag check.
            return None;
        }

        if let Some(reset) = msg.downcast_ref::<ResetMsg>() {
            if reset.id != 0 && reset.id != self.id {
                return None;
            }
            self.engine.reset();
            self.tag += 1;
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if !self.running() || (tick.id != 0 && tick.id != self.id) {
                return None;
            }
            // Reject ticks from chains armed before the latest start, so a
            // stop/start cycle cannot leave two chains ticking at once.
            if tick.tag != self.tag {
                return None;
            }

            return match self.engine.tick() {
                TickOutcome::ReachedZero => Some(self.completed_cmd()),
                // Unchanged re-renders nothing; the chain just continues.
                TickOutcome::Unchanged | TickOutcome::UnitsChanged(_) => Some(self.tick_cmd()),
            };
        }

        None
    }

    /// Renders the countdown as styled, colon-separated digit pairs,
    /// honoring the display policy. Idle and stopped countdowns render in
    /// the dimmed `stopped` style.
    pub fn view(&self) -> String {
        let remaining = self.engine.remaining();
        let policy = self.engine.display_policy();
        let digit = if self.running() {
            &self.styles.digit
        } else {
            &self.styles.stopped
        };

        let mut units = Vec::with_capacity(3);
        if policy.show_hours {
            units.push(digit.render(&format_unit(remaining.hours())));
        }
        if policy.show_minutes {
            units.push(digit.render(&format_unit(remaining.minutes())));
        }
        units.push(digit.render(&format_unit(remaining.seconds())));

        units.join(&self.styles.divider.render(":"))
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        // Idle until configured; a zero-length countdown must not start.
        (new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
