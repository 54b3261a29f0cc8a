//! Bootstrap 5 tooltip overlay.

use std::collections::BTreeMap;

use ironhtml::html;
use ironhtml_elements::Div;
use tracing::trace;

use super::{Overlay, TooltipOptions};

/// Overlay that renders Bootstrap 5 tooltip markup for every shown field.
///
/// The markup is what Bootstrap's tooltip plugin inserts next to the anchor
/// element; hosts that do their own DOM work can splice it in directly.
#[derive(Debug, Clone, Default)]
pub struct BootstrapTooltips {
    tooltips: BTreeMap<String, String>,
}

impl BootstrapTooltips {
    /// Creates an overlay with no visible tooltips.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the markup of the tooltip anchored to a field.
    pub fn markup(&self, field_id: &str) -> Option<&str> {
        self.tooltips.get(field_id).map(String::as_str)
    }

    /// Returns whether a tooltip is visible for the field.
    pub fn is_visible(&self, field_id: &str) -> bool {
        self.tooltips.contains_key(field_id)
    }

    /// Iterates over visible tooltips as `(field_id, markup)`, sorted by field.
    pub fn visible(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tooltips
            .iter()
            .map(|(field, markup)| (field.as_str(), markup.as_str()))
    }

    /// Returns the number of visible tooltips.
    pub fn len(&self) -> usize {
        self.tooltips.len()
    }

    /// Returns whether no tooltip is visible.
    pub fn is_empty(&self) -> bool {
        self.tooltips.is_empty()
    }
}

impl Overlay for BootstrapTooltips {
    fn show(&mut self, field_id: &str, options: &TooltipOptions) {
        trace!(field = field_id, "showing tooltip");
        self.tooltips
            .insert(field_id.to_string(), render_tooltip(field_id, options));
    }

    fn destroy(&mut self, field_id: &str) {
        if self.tooltips.remove(field_id).is_some() {
            trace!(field = field_id, "destroyed tooltip");
        }
    }
}

/// Renders the tooltip element for one field.
pub fn render_tooltip(field_id: &str, options: &TooltipOptions) -> String {
    let fade = if options.animation { " fade" } else { "" };
    let class = format!(
        "tooltip bs-tooltip-{}{fade} show",
        options.placement.bootstrap_side()
    );

    html! { div.class(#class) }
        .attr("role", "tooltip")
        .attr("data-anchor", field_id)
        .child::<Div, _>(|d| d.class("tooltip-arrow"))
        .child::<Div, _>(|d| d.class("tooltip-inner").text(&options.title))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Placement;

    #[test]
    fn test_render_tooltip() {
        let options = TooltipOptions::default().titled("Email is invalid.");
        let html = render_tooltip("email", &options);
        assert!(html.contains("bs-tooltip-end"));
        assert!(html.contains("tooltip-inner"));
        assert!(html.contains("tooltip-arrow"));
        assert!(html.contains("Email is invalid."));
        assert!(!html.contains("fade"));
    }

    #[test]
    fn test_render_tooltip_placement_and_fade() {
        let options = TooltipOptions {
            title: "x".to_string(),
            placement: Placement::Left,
            animation: true,
            ..TooltipOptions::default()
        };
        let html = render_tooltip("email", &options);
        assert!(html.contains("bs-tooltip-start"));
        assert!(html.contains("fade"));
    }

    #[test]
    fn test_show_replaces_and_destroy_removes() {
        let mut overlay = BootstrapTooltips::new();
        let options = TooltipOptions::default();

        overlay.show("email", &options.titled("first"));
        overlay.show("email", &options.titled("second"));
        assert_eq!(overlay.len(), 1);
        assert!(overlay.markup("email").unwrap().contains("second"));

        overlay.destroy("email");
        overlay.destroy("email");
        assert!(overlay.is_empty());
        assert!(!overlay.is_visible("email"));
    }
}
