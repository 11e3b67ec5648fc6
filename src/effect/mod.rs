//! Blend effects applied to rendered block markup.
//!
//! Each effect implements [`MarkupEffect`], which turns one block's rendered
//! HTML into its augmented form. Effects are built from [`BlendSettings`]
//! with [`effect_for`], which picks the implementation from the settings'
//! [`EffectMode`].
//!
//! # Output shapes
//!
//! ```text
//! simple:  <p class="abmb-blend-simple …" style="--abmb-blend-mode: …; …">…</p>
//!
//! stripe:  <p class="abmb-stripe-base …" style="<vars> …">…</p>   ◄── base
//!          <div class="… abmb-stripe-burn" aria-hidden="true">…</div>
//!          <div class="… abmb-stripe-soft" aria-hidden="true">…</div>
//! ```
//!
//! Applying an effect twice compounds its class tokens; effects are not
//! idempotent.

pub mod simple;
pub mod stripe;

pub use simple::SimpleEffect;
pub use stripe::StripeEffect;

use std::fmt;

use crate::config::Markers;
use crate::settings::{BlendSettings, EffectMode};

// ============================================================================
// MarkupEffect
// ============================================================================

/// A transformation of one block's rendered markup.
///
/// Implementations never fail: when the markup does not have the expected
/// shape, the affected step is skipped and the rest is applied best-effort.
pub trait MarkupEffect {
    /// Returns the augmented markup.
    fn apply(&self, html: &str, markers: &Markers) -> String;

    /// The custom-property declarations this effect injects.
    fn declarations(&self, markers: &Markers) -> Declarations;
}

/// Builds the effect selected by `settings.mode`.
pub fn effect_for(settings: &BlendSettings) -> Box<dyn MarkupEffect> {
    match settings.mode {
        EffectMode::Simple => Box::new(SimpleEffect::from(settings)),
        EffectMode::Stripe => Box::new(StripeEffect::from(settings)),
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// An ordered list of CSS declarations, rendered as `name: value;` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations(Vec<(String, String)>);

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a declaration.
    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.push((name.into(), value.to_string()));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push(name, value);
        self
    }

    /// Returns the value of the first declaration named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Declarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

// ============================================================================
// Stylesheet
// ============================================================================

/// The front-end rules that turn the injected custom properties into blending.
///
/// Overlay geometry is left to [`LayerPositioner`](crate::LayerPositioner);
/// these rules only set compositing and colour.
pub fn stylesheet(markers: &Markers) -> String {
    let var = |name: &str| markers.var_name(name);
    format!(
        ".{simple} {{ mix-blend-mode: var({blend}); }}\n\
         .{base} {{ mix-blend-mode: var({base_blend}); }}\n\
         .{burn}, .{soft} {{ pointer-events: none; user-select: none; }}\n\
         .{burn} {{ mix-blend-mode: var({burn_blend}); color: var({burn_color}); }}\n\
         .{soft} {{ color: var({soft_color}); opacity: var({soft_opacity}); z-index: var({soft_z}); }}\n",
        simple = markers.simple_class(),
        base = markers.base_class(),
        burn = markers.burn_class(),
        soft = markers.soft_class(),
        blend = var("blend-mode"),
        base_blend = var("base-blend-mode"),
        burn_blend = var("burn-blend-mode"),
        burn_color = var("burn-color"),
        soft_color = var("soft-color"),
        soft_opacity = var("soft-opacity"),
        soft_z = var("soft-z-index"),
    )
}
