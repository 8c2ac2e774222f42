//! Presentation state of the widget and the events that change it.
//!
//! State covers only what the host toggles after the first render: whether
//! the panel is open and whether hidden siblings were revealed. Events never
//! touch the index.

use serde::Serialize;

/// Open/closed and expanded flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WidgetState {
    pub open: bool,
    pub related_expanded: bool,
}

/// User interactions handled by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Toggle control activated.
    Toggle,
    /// Escape key pressed; closes the panel.
    Escape,
    /// "Show more" activated; reveals the remaining siblings.
    ShowMore,
}

impl WidgetState {
    pub fn apply(self, event: WidgetEvent) -> Self {
        match event {
            WidgetEvent::Toggle => Self {
                open: !self.open,
                ..self
            },
            WidgetEvent::Escape => Self {
                open: false,
                ..self
            },
            WidgetEvent::ShowMore => Self {
                related_expanded: true,
                ..self
            },
        }
    }

    /// Value of the root element's `data-state` attribute.
    pub fn data_state(self) -> &'static str {
        if self.open { "open" } else { "closed" }
    }

    /// Value of the toggle's `aria-expanded` attribute.
    pub fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
