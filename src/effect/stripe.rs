//! Stripe blend effect: the block plus decorative burn and soft layers.

use html_escape::encode_double_quoted_attribute;

use super::{Declarations, MarkupEffect};
use crate::color::CssColor;
use crate::config::Markers;
use crate::markup::{InnerText, RootElement, extract_inner_text, join_front};
use crate::settings::{BlendMode, BlendSettings};

// ============================================================================
// StripeEffect
// ============================================================================

/// Configuration for the layered stripe effect.
///
/// The block's root element becomes the *base*: it gains the base marker
/// class and the shared declarations. Two `<div>` siblings follow it, the
/// *burn* and *soft* layers. Each copies the base's original classes and
/// inline style, carries `aria-hidden="true"`, and repeats the base's text
/// with line breaks preserved. The layers are positioned over the base on
/// the client by [`LayerPositioner`](crate::LayerPositioner).
#[derive(Debug, Clone, PartialEq)]
pub struct StripeEffect {
    /// Blend mode of the base element.
    pub base_blend_mode: BlendMode,
    /// Blend mode of the burn layer.
    pub burn_blend_mode: BlendMode,
    /// Text colour of the burn layer.
    pub burn_color: CssColor,
    /// Text colour of the soft layer.
    pub soft_color: CssColor,
    /// Opacity of the soft layer (0.0-1.0).
    pub soft_opacity: f32,
    /// Stacking order of the soft layer.
    pub soft_z_index: i32,
}

impl From<&BlendSettings> for StripeEffect {
    fn from(settings: &BlendSettings) -> Self {
        Self {
            base_blend_mode: settings.base_blend_mode,
            burn_blend_mode: settings.burn_blend_mode,
            burn_color: settings.burn_color.clone(),
            soft_color: settings.soft_color.clone(),
            soft_opacity: settings.soft_opacity.clamp(0.0, 1.0),
            soft_z_index: settings.soft_z_index,
        }
    }
}

impl Default for StripeEffect {
    fn default() -> Self {
        Self::from(&BlendSettings::default())
    }
}

impl MarkupEffect for StripeEffect {
    fn declarations(&self, markers: &Markers) -> Declarations {
        Declarations::new()
            .with(markers.var_name("base-blend-mode"), self.base_blend_mode)
            .with(markers.var_name("burn-blend-mode"), self.burn_blend_mode)
            .with(markers.var_name("burn-color"), &self.burn_color)
            .with(markers.var_name("soft-color"), &self.soft_color)
            .with(markers.var_name("soft-opacity"), self.soft_opacity)
            .with(markers.var_name("soft-z-index"), self.soft_z_index)
    }

    fn apply(&self, html: &str, markers: &Markers) -> String {
        let declarations = self.declarations(markers).to_string();
        let text = extract_inner_text(html);

        let (base, copied_class, copied_style) = match RootElement::parse(html) {
            Some(mut root) => {
                let class = root.class().map(str::to_owned);
                let style = root.style().map(str::to_owned);
                root.prepend_class(&markers.base_class());
                root.prepend_style(&declarations);
                (root.to_html(), class, style)
            }
            None => {
                tracing::debug!("no root element, appending layers to unmarked markup");
                (html.to_string(), None, None)
            }
        };

        let layer_style = join_front(&declarations, copied_style.as_deref());
        let layer = |marker: String| {
            let class = match copied_class.as_deref().map(str::trim) {
                Some(existing) if !existing.is_empty() => format!("{existing} {marker}"),
                _ => marker,
            };
            overlay_markup(&class, &layer_style, &text)
        };

        let mut out = base;
        out.push_str(&layer(markers.burn_class()));
        out.push_str(&layer(markers.soft_class()));
        out
    }
}

/// Renders one decorative overlay element.
fn overlay_markup(class: &str, style: &str, text: &InnerText) -> String {
    format!(
        r#"<div class="{}" style="{}" aria-hidden="true">{}</div>"#,
        encode_double_quoted_attribute(class),
        encode_double_quoted_attribute(style),
        text.to_html()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(html: &str) -> String {
        StripeEffect::default().apply(html, &Markers::default())
    }

    const VARS: &str = "--abmb-base-blend-mode: color-burn; --abmb-burn-blend-mode: normal; \
        --abmb-burn-color: #bdc6d2; --abmb-soft-color: #0000003b; \
        --abmb-soft-opacity: 1; --abmb-soft-z-index: -2;";

    #[test]
    fn declarations_use_stripe_fields() {
        let settings = BlendSettings {
            soft_opacity: 0.45,
            soft_z_index: 3,
            ..BlendSettings::default()
        }
        .with_stripe_blend_modes(BlendMode::Screen, BlendMode::Overlay);

        let decls = StripeEffect::from(&settings).declarations(&Markers::default());

        assert_eq!(decls.get("--abmb-base-blend-mode"), Some("screen"));
        assert_eq!(decls.get("--abmb-burn-blend-mode"), Some("overlay"));
        assert_eq!(decls.get("--abmb-soft-opacity"), Some("0.45"));
        assert_eq!(decls.get("--abmb-soft-z-index"), Some("3"));
    }

    #[test]
    fn builds_base_and_two_layers() {
        let html = apply(r#"<p class="foo">Hello<br>World</p>"#);

        let expected = format!(
            concat!(
                r#"<p class="abmb-stripe-base foo" style="{vars}">Hello<br>World</p>"#,
                r#"<div class="foo abmb-stripe-burn" style="{vars}" aria-hidden="true">Hello<br>World</div>"#,
                r#"<div class="foo abmb-stripe-soft" style="{vars}" aria-hidden="true">Hello<br>World</div>"#,
            ),
            vars = VARS
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn layers_copy_original_style_after_vars() {
        let html = apply(r#"<h2 style="letter-spacing:2px">Big</h2>"#);
        let layer_style = format!(r#"style="{VARS} letter-spacing:2px""#);
        assert_eq!(html.matches(&layer_style).count(), 3);
        assert!(html.contains(r#"<div class="abmb-stripe-burn""#));
        assert!(html.contains(r#"<div class="abmb-stripe-soft""#));
    }

    #[test]
    fn layers_hold_text_only() {
        let html = apply(r#"<p>Go <a href="/x">here</a><br/>now</p>"#);
        assert!(html.starts_with(r#"<p class="abmb-stripe-base" style=""#));
        assert_eq!(html.matches(r#"aria-hidden="true">Go here<br>now</div>"#).count(), 2);
    }

    #[test]
    fn quoted_angle_brackets_stay_out_of_layers() {
        let html = apply(concat!(
            r#"<p>Go <a title="1 > 0" href="/x">here</a>"#,
            "<script>if (a < b) go()</script></p>",
        ));
        assert_eq!(html.matches(r#"aria-hidden="true">Go here</div>"#).count(), 2);
    }

    #[test]
    fn unclosed_root_falls_back_to_stripped_text() {
        let html = apply("<p>Hello <em>there</em>");
        assert!(html.starts_with(r#"<p class="abmb-stripe-base""#));
        assert_eq!(html.matches(r#"aria-hidden="true">Hello there</div>"#).count(), 2);
    }

    #[test]
    fn unparseable_root_still_gets_layers() {
        let html = apply("Loose text");
        assert!(html.starts_with("Loose text<div"));
        assert_eq!(html.matches(r#"aria-hidden="true">Loose text</div>"#).count(), 2);
    }

    #[test]
    fn colour_values_are_attribute_escaped() {
        let effect = StripeEffect {
            burn_color: CssColor::parse("rgb(1 2 3 / 50%)").unwrap(),
            ..StripeEffect::default()
        };
        let html = effect.apply(r#"<p class="a&amp;b">x</p>"#, &Markers::default());
        assert!(html.contains("--abmb-burn-color: rgb(1 2 3 / 50%);"));
        assert!(html.contains(r#"<div class="a&amp;b abmb-stripe-burn""#));
    }
}
