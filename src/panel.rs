//! Chat panel visibility
//!
//! The panel opens and closes from its toggle button. While open, a click
//! anywhere outside both the panel and the toggle button closes it.

use crate::state_machine::Effect;
use serde::{Deserialize, Serialize};

/// A point in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Axis-aligned bounds; the right and bottom edges are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && i64::from(p.x) < i64::from(self.x) + i64::from(self.width)
            && i64::from(p.y) < i64::from(self.y) + i64::from(self.height)
    }
}

/// What a document click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    ToggleButton,
    Panel,
    Outside,
}

/// Geometry of the widget chrome, for hosts that report raw coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub panel: Rect,
    pub toggle_button: Rect,
}

impl PanelLayout {
    pub fn classify(&self, p: Point) -> ClickTarget {
        if self.toggle_button.contains(p) {
            ClickTarget::ToggleButton
        } else if self.panel.contains(p) {
            ClickTarget::Panel
        } else {
            ClickTarget::Outside
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// Toggle button was clicked
    Toggle,
    /// A click anywhere in the document
    DocumentClick(ClickTarget),
    Show,
    Hide,
}

/// Open/closed state; starts closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Apply an event, returning the effect to run if visibility changed
    pub fn apply(&mut self, event: PanelEvent) -> Option<Effect> {
        let open = match event {
            PanelEvent::Toggle => !self.open,
            PanelEvent::DocumentClick(ClickTarget::Panel | ClickTarget::ToggleButton) => self.open,
            PanelEvent::DocumentClick(ClickTarget::Outside) | PanelEvent::Hide => false,
            PanelEvent::Show => true,
        };

        if open == self.open {
            return None;
        }
        self.open = open;
        Some(if open { Effect::ShowPanel } else { Effect::HidePanel })
    }
}
