//! Settings panel for configuring a countdown.
//!
//! A small form with two-digit hours/minutes/seconds fields and a
//! hide-zeroed-units checkbox. On submit it emits an [`ApplySettingsMsg`]
//! for the host to forward into the countdown's `configure`; the panel
//! itself never starts, stops or ticks anything. Persistence of the chosen
//! values is the host's concern.
//!
//! ```rust
//! use bubbletea_rs::{Msg, Cmd};
//! use countdown_widgets::countdown;
//! use countdown_widgets::settings::{self, ApplySettingsMsg};
//!
//! struct App {
//!     countdown: countdown::Model,
//!     settings: settings::Model,
//! }
//!
//! impl App {
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(apply) = msg.downcast_ref::<ApplySettingsMsg>() {
//!             // Digit-only fields cannot produce an invalid duration.
//!             let _ = self.countdown.configure(apply.parts, apply.hide_zeroed_units);
//!             return None;
//!         }
//!         // Keys go to the open panel; everything else keeps the
//!         // countdown's tick chain flowing.
//!         if self.settings.visible() && msg.is::<bubbletea_rs::KeyMsg>() {
//!             return self.settings.update(msg);
//!         }
//!         self.countdown.update(msg)
//!     }
//! }
//! ```

use crate::engine::TimeParts;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::time::Duration;

/// Maximum digits per time field. The engine itself is unbounded; the cap
/// is a form affordance matching the two-digit display.
const FIELD_WIDTH: usize = 2;

/// Message emitted when the form is submitted.
#[derive(Debug, Clone)]
pub struct ApplySettingsMsg {
    /// The configured countdown length.
    pub parts: TimeParts,
    /// Whether zero-valued leading units should be hidden.
    pub hide_zeroed_units: bool,
}

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Hours,
    Minutes,
    Seconds,
    HideZeroedUnits,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Hours => Self::Minutes,
            Self::Minutes => Self::Seconds,
            Self::Seconds => Self::HideZeroedUnits,
            Self::HideZeroedUnits => Self::Hours,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Hours => Self::HideZeroedUnits,
            Self::Minutes => Self::Hours,
            Self::Seconds => Self::Minutes,
            Self::HideZeroedUnits => Self::Seconds,
        }
    }
}

/// Lipgloss styles for the settings form.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Field labels ("hours", "minutes", ...).
    pub label: Style,
    /// Unfocused field values.
    pub field: Style,
    /// The focused field value.
    pub focused: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            label: Style::new().faint(true),
            field: Style::new(),
            focused: Style::new().bold(true).foreground(Color::from("212")),
        }
    }
}

/// Settings form model.
#[derive(Debug, Clone)]
pub struct Model {
    hours: String,
    minutes: String,
    seconds: String,
    hide_zeroed_units: bool,
    focus: Field,
    visible: bool,
    /// Styling for the form.
    pub styles: Styles,
}

/// Creates a hidden, empty settings panel.
pub fn new() -> Model {
    Model::default()
}

impl Default for Model {
    fn default() -> Self {
        Self {
            hours: String::new(),
            minutes: String::new(),
            seconds: String::new(),
            hide_zeroed_units: false,
            focus: Field::Hours,
            visible: false,
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Whether the panel currently consumes key input and renders.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the panel; showing focuses the hours field.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            self.focus = Field::Hours;
        }
    }

    /// The values the form would submit right now. Empty fields read as
    /// zero; digit-only input means this can never be negative.
    pub fn values(&self) -> (TimeParts, bool) {
        let parse = |s: &str| s.parse::<i64>().unwrap_or(0);
        (
            TimeParts::new(
                parse(&self.hours),
                parse(&self.minutes),
                parse(&self.seconds),
            ),
            self.hide_zeroed_units,
        )
    }

    /// Pre-fills the form, e.g. from persisted host settings.
    pub fn set_values(&mut self, parts: TimeParts, hide_zeroed_units: bool) {
        self.hours = format!("{:02}", parts.hours.max(0));
        self.minutes = format!("{:02}", parts.minutes.max(0));
        self.seconds = format!("{:02}", parts.seconds.max(0));
        self.hide_zeroed_units = hide_zeroed_units;
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Hours => Some(&mut self.hours),
            Field::Minutes => Some(&mut self.minutes),
            Field::Seconds => Some(&mut self.seconds),
            Field::HideZeroedUnits => None,
        }
    }

    fn submit_cmd(&self) -> Cmd {
        let (parts, hide_zeroed_units) = self.values();
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ApplySettingsMsg {
                parts,
                hide_zeroed_units,
            }) as Msg
        })
    }

    /// Processes key input while the panel is visible.
    ///
    /// Digits fill the focused field and hop to the next one when it is
    /// full; backspace deletes and hops back from an empty field; tab and
    /// the arrow keys cycle focus; space toggles the checkbox; enter
    /// submits and hides the panel; esc hides it without applying.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.visible {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        match key_msg.key {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if let Some(field) = self.focused_field_mut() {
                    if field.len() < FIELD_WIDTH {
                        field.push(ch);
                    }
                    if field.len() == FIELD_WIDTH {
                        self.focus = self.focus.next();
                    }
                }
            }
            KeyCode::Char(' ') => {
                if self.focus == Field::HideZeroedUnits {
                    self.hide_zeroed_units = !self.hide_zeroed_units;
                }
            }
            KeyCode::Backspace => {
                let focus = self.focus;
                if let Some(field) = self.focused_field_mut() {
                    if field.pop().is_none() && focus != Field::Hours {
                        self.focus = focus.prev();
                    }
                }
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => {
                self.focus = self.focus.next();
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
                self.focus = self.focus.prev();
            }
            KeyCode::Enter => {
                self.visible = false;
                return Some(self.submit_cmd());
            }
            KeyCode::Esc => {
                self.visible = false;
            }
            _ => {}
        }
        None
    }

    /// Renders the form, or an empty string while hidden.
    pub fn view(&self) -> String {
        if !self.visible {
            return String::new();
        }

        let field = |value: &str, focused: bool| {
            let padded = format!("{:0>2}", value);
            if focused {
                self.styles.focused.render(&padded)
            } else {
                self.styles.field.render(&padded)
            }
        };

        let time_row = format!(
            "{} {} {} {} {} {}",
            self.styles.label.render("h"),
            field(&self.hours, self.focus == Field::Hours),
            self.styles.label.render("m"),
            field(&self.minutes, self.focus == Field::Minutes),
            self.styles.label.render("s"),
            field(&self.seconds, self.focus == Field::Seconds),
        );

        let checkbox = {
            let mark = if self.hide_zeroed_units { "x" } else { " " };
            let text = format!("[{}] hide zeroed units", mark);
            if self.focus == Field::HideZeroedUnits {
                self.styles.focused.render(&text)
            } else {
                self.styles.field.render(&text)
            }
        };

        format!(
            "{}\n{}\n{}",
            time_row,
            checkbox,
            self.styles.label.render("enter: apply • esc: close"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn open_panel() -> Model {
        let mut panel = new();
        panel.toggle();
        panel
    }

    #[test]
    fn hidden_panel_ignores_keys() {
        let mut panel = new();
        assert!(panel.update(key(KeyCode::Char('5'))).is_none());
        let (parts, _) = panel.values();
        assert_eq!(parts, TimeParts::new(0, 0, 0));
    }

    #[test]
    fn digits_fill_fields_and_hop_forward() {
        let mut panel = open_panel();
        for ch in ['0', '1', '3', '0', '4', '5'] {
            panel.update(key(KeyCode::Char(ch)));
        }
        let (parts, _) = panel.values();
        assert_eq!(parts, TimeParts::new(1, 30, 45));
    }

    #[test]
    fn non_digits_are_ignored_in_time_fields() {
        let mut panel = open_panel();
        panel.update(key(KeyCode::Char('x')));
        panel.update(key(KeyCode::Char('7')));
        let (parts, _) = panel.values();
        assert_eq!(parts.hours, 7);
    }

    #[test]
    fn backspace_hops_back_from_an_empty_field() {
        let mut panel = open_panel();
        panel.update(key(KeyCode::Char('1')));
        panel.update(key(KeyCode::Char('2'))); // hours full, focus on minutes
        panel.update(key(KeyCode::Backspace)); // minutes empty, hop back
        panel.update(key(KeyCode::Backspace)); // deletes '2'
        let (parts, _) = panel.values();
        assert_eq!(parts.hours, 1);
    }

    #[test]
    fn space_toggles_the_checkbox() {
        let mut panel = open_panel();
        for _ in 0..3 {
            panel.update(key(KeyCode::Tab));
        }
        panel.update(key(KeyCode::Char(' ')));
        let (_, hide) = panel.values();
        assert!(hide);
    }

    #[test]
    fn enter_submits_and_hides() {
        let mut panel = open_panel();
        panel.update(key(KeyCode::Char('5')));
        let cmd = panel.update(key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert!(!panel.visible());
    }

    #[test]
    fn esc_closes_without_submitting() {
        let mut panel = open_panel();
        let cmd = panel.update(key(KeyCode::Esc));
        assert!(cmd.is_none());
        assert!(!panel.visible());
    }

    #[test]
    fn set_values_prefills_two_digit_fields() {
        let mut panel = new();
        panel.set_values(TimeParts::new(0, 5, 30), true);
        let (parts, hide) = panel.values();
        assert_eq!(parts, TimeParts::new(0, 5, 30));
        assert!(hide);
    }
}
