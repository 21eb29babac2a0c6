//! Display adapter: unit visibility and digit formatting.
//!
//! Pure functions of an engine snapshot — no timers, no state. The adapter
//! decides which of hours/minutes/seconds should be on screen and renders
//! each unit as a zero-padded digit pair; the [`Styles`] struct carries the
//! lipgloss styling the countdown widget applies on top.

use crate::engine::Remaining;
use lipgloss_extras::prelude::*;

/// Which time units are currently shown.
///
/// Seconds are always shown. Hiding a lower unit requires every higher unit
/// to be hidden as well, so the display collapses from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPolicy {
    /// Render the hours digit pair.
    pub show_hours: bool,
    /// Render the minutes digit pair.
    pub show_minutes: bool,
    /// Render the seconds digit pair. Always true.
    pub show_seconds: bool,
}

/// Maps a remaining-time snapshot to unit visibility.
///
/// With `hide_zeroed_units` unset everything is shown. With it set, hours
/// disappear while zero, and minutes additionally require hours to be zero:
///
/// ```rust
/// use countdown_widgets::display::project;
/// use countdown_widgets::engine::Remaining;
///
/// let policy = project(Remaining::from_millis(5_000), true);
/// assert!(!policy.show_hours);
/// assert!(!policy.show_minutes);
/// assert!(policy.show_seconds);
/// ```
pub fn project(remaining: Remaining, hide_zeroed_units: bool) -> DisplayPolicy {
    let hide_hours = hide_zeroed_units && remaining.hours() == 0;
    let hide_minutes = hide_hours && remaining.minutes() == 0;
    DisplayPolicy {
        show_hours: !hide_hours,
        show_minutes: !hide_minutes,
        show_seconds: true,
    }
}

/// Formats one unit value as a fixed-width decimal string.
///
/// At least two digits, zero-padded, no grouping separators. Values of 100
/// or more are not truncated: the string simply grows past two characters.
pub fn format_unit(value: u64) -> String {
    format!("{:02}", value)
}

/// Lipgloss styles for the countdown display.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style applied to each digit pair while the countdown is running.
    pub digit: Style,
    /// Style for the `:` dividers between units.
    pub divider: Style,
    /// Style applied to digit pairs while idle or stopped.
    pub stopped: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            digit: Style::new().bold(true),
            divider: Style::new().foreground(Color::from("240")),
            stopped: Style::new().faint(true),
        }
    }
}
