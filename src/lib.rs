#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/countdown-widgets/")]

//! # countdown-widgets
//!
//! A countdown timer widget and companion settings panel for building
//! terminal applications with [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate is split along the seams of the countdown problem:
//!
//! - [`engine`] — the core state machine: deadline arming, remaining-time
//!   computation, run-state lifecycle, completion detection. No timers, no
//!   rendering; drive it with [`engine::Engine::tick`].
//! - [`display`] — pure projection of an engine snapshot into unit
//!   visibility and zero-padded digit strings.
//! - [`countdown`] — the bubbletea widget: a tick-command loop around the
//!   engine plus a styled digit view, in the usual `init`/`update`/`view`
//!   shape.
//! - [`settings`] — a small form that produces validated
//!   `(hours, minutes, seconds, hide zeroed units)` tuples for
//!   `configure`.
//! - [`clock`] — injectable wall-clock sources, including a manual clock
//!   for deterministic tests.
//!
//! Each rendered widget owns an independent engine; instances are told
//! apart by unique message ids, so several countdowns can coexist in one
//! program.
//!
//! ## Quick Start
//!
//! ```rust
//! use countdown_widgets::prelude::*;
//!
//! let mut countdown = countdown_new();
//! countdown.configure(TimeParts::new(0, 25, 0), true).unwrap();
//! assert!(countdown.can_start());
//! // In a bubbletea program: return countdown.start_cmd() from update().
//! ```
//!
//! ## Custom presentation shells
//!
//! Shells that are not bubbletea programs implement [`RenderTarget`] and
//! pull snapshots out of the engine directly:
//!
//! ```rust
//! use countdown_widgets::prelude::*;
//!
//! struct Plain(String);
//!
//! impl RenderTarget for Plain {
//!     fn render(&mut self, remaining: &Remaining, policy: DisplayPolicy, _state: RunState) {
//!         self.0.clear();
//!         if policy.show_minutes {
//!             self.0.push_str(&format_unit(remaining.minutes()));
//!             self.0.push(':');
//!         }
//!         self.0.push_str(&format_unit(remaining.seconds()));
//!     }
//! }
//!
//! let mut engine = Engine::new();
//! engine.configure(TimeParts::new(0, 0, 9), true).unwrap();
//! let mut surface = Plain(String::new());
//! engine.render_to(&mut surface);
//! assert_eq!(surface.0, "09");
//! ```

pub mod clock;
pub mod countdown;
pub mod display;
pub mod engine;
pub mod settings;

pub use display::DisplayPolicy;
pub use engine::{Remaining, RunState};

/// A presentation surface the engine can push snapshots into.
///
/// Implemented by concrete shells — a bubbletea view, a plain string, a
/// test probe. The shell receives everything it needs to draw in one call:
/// the engine recomputes remaining time and re-evaluates the display
/// policy before rendering, so implementors never observe a torn
/// intermediate state. The surface is handed in explicitly; the core never
/// performs ambient lookups to find something to draw on.
pub trait RenderTarget {
    /// Draws the given snapshot.
    fn render(&mut self, remaining: &Remaining, policy: DisplayPolicy, state: RunState);
}

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{
    new as countdown_new, new_with_interval as countdown_new_with_interval,
    CompletedMsg as CountdownCompletedMsg, Model as Countdown, ResetMsg as CountdownResetMsg,
    StartStopMsg as CountdownStartStopMsg, TickMsg as CountdownTickMsg,
};
pub use display::{format_unit, project, Styles as DisplayStyles};
pub use engine::{ConfigError, Engine, EngineError, Event, TickOutcome, TimeParts, UnitChanges};
pub use settings::{new as settings_new, ApplySettingsMsg, Model as SettingsPanel};

/// Prelude module for convenient imports.
///
/// ```rust
/// use countdown_widgets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::countdown::{
        new as countdown_new, new_with_interval as countdown_new_with_interval,
        CompletedMsg as CountdownCompletedMsg, Model as Countdown, ResetMsg as CountdownResetMsg,
        StartStopMsg as CountdownStartStopMsg, TickMsg as CountdownTickMsg,
    };
    pub use crate::display::{format_unit, project, DisplayPolicy, Styles as DisplayStyles};
    pub use crate::engine::{
        ConfigError, Engine, EngineError, Event, Remaining, RunState, TickOutcome, TimeParts,
        UnitChanges,
    };
    pub use crate::settings::{new as settings_new, ApplySettingsMsg, Model as SettingsPanel};
    pub use crate::RenderTarget;
}
