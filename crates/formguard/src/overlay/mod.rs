//! Tooltip overlays used to present field errors.

mod bootstrap;

pub use bootstrap::BootstrapTooltips;

use serde::{Deserialize, Serialize};

/// Side of the field a tooltip is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

impl Placement {
    /// Returns the Bootstrap 5 placement class suffix.
    ///
    /// Bootstrap 5 uses logical sides, so `right` renders as `end`.
    pub const fn bootstrap_side(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "end",
            Self::Bottom => "bottom",
            Self::Left => "start",
        }
    }
}

/// What makes a tooltip appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Shown and hidden only by explicit calls.
    #[default]
    Manual,
    Hover,
    Focus,
    Click,
}

/// Options passed to the tooltip library for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    /// Tooltip text.
    pub title: String,
    /// Anchor side.
    pub placement: Placement,
    /// Trigger mode.
    pub trigger: Trigger,
    /// Whether showing and hiding fades.
    pub animation: bool,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            placement: Placement::Right,
            trigger: Trigger::Manual,
            animation: false,
        }
    }
}

impl TooltipOptions {
    /// Returns a copy of these options with a different title.
    #[must_use]
    pub fn titled(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }
}

/// Trait for the tooltip library that shows field errors.
///
/// Implementations must tolerate `destroy` for a field with no visible
/// tooltip, and `show` for a field that already has one (replace it).
pub trait Overlay {
    /// Shows a tooltip anchored to the field.
    fn show(&mut self, field_id: &str, options: &TooltipOptions);

    /// Removes the tooltip anchored to the field, if any.
    fn destroy(&mut self, field_id: &str);
}

impl<O: Overlay + ?Sized> Overlay for Box<O> {
    fn show(&mut self, field_id: &str, options: &TooltipOptions) {
        (**self).show(field_id, options);
    }

    fn destroy(&mut self, field_id: &str) {
        (**self).destroy(field_id);
    }
}
