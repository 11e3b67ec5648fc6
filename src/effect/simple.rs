//! Simple blend effect: one class and one custom property on the root.

use super::{Declarations, MarkupEffect};
use crate::config::Markers;
use crate::markup::RootElement;
use crate::settings::{BlendMode, BlendSettings};

// ============================================================================
// SimpleEffect
// ============================================================================

/// Marks the block's root element and sets its blend-mode custom property.
///
/// The class token is prepended to any existing classes and the declaration
/// to any existing inline style. If the root element cannot be parsed the
/// markup is returned unchanged.
///
/// # Example
///
/// ```
/// use blend_layers::{BlendMode, Markers, MarkupEffect, SimpleEffect};
///
/// let effect = SimpleEffect::new(BlendMode::Multiply);
/// let html = effect.apply(r#"<p style="color:red">Hi</p>"#, &Markers::default());
///
/// assert_eq!(
///     html,
///     r#"<p style="--abmb-blend-mode: multiply; color:red" class="abmb-blend-simple">Hi</p>"#
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleEffect {
    pub blend_mode: BlendMode,
}

impl SimpleEffect {
    pub fn new(blend_mode: BlendMode) -> Self {
        Self { blend_mode }
    }
}

impl From<&BlendSettings> for SimpleEffect {
    fn from(settings: &BlendSettings) -> Self {
        Self::new(settings.blend_mode)
    }
}

impl MarkupEffect for SimpleEffect {
    fn declarations(&self, markers: &Markers) -> Declarations {
        Declarations::new().with(markers.var_name("blend-mode"), self.blend_mode)
    }

    fn apply(&self, html: &str, markers: &Markers) -> String {
        let Some(mut root) = RootElement::parse(html) else {
            tracing::debug!("no root element, leaving markup untouched");
            return html.to_string();
        };

        root.prepend_class(&markers.simple_class());
        root.prepend_style(&self.declarations(markers).to_string());
        root.to_html()
    }
}
