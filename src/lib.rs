//! blend-layers: layered blend-mode effects for rendered content blocks
//!
//! This crate rewrites the markup of supported blocks so they render with a
//! CSS blend effect, and aligns the decorative layers of the stripe effect
//! with their base element once the page is laid out.
//!
//! # Example
//!
//! ```
//! use blend_layers::{BlendSettings, BlendTransformer, EffectMode, PluginConfig};
//!
//! let transformer = BlendTransformer::new(PluginConfig::default());
//! let settings = BlendSettings::for_mode(EffectMode::Stripe);
//!
//! let html = transformer.render_block(
//!     "core/paragraph",
//!     r#"<p class="foo">Hello<br>World</p>"#,
//!     &settings,
//! );
//!
//! assert!(html.starts_with(r#"<p class="abmb-stripe-base foo""#));
//! assert!(html.contains(r#"<div class="foo abmb-stripe-burn""#));
//! assert!(html.contains(r#"<div class="foo abmb-stripe-soft""#));
//! ```
//!
//! # Serializable Settings
//!
//! Block settings travel as the camelCase JSON object stored in the block's
//! `advancedBlendMode` attribute. Unknown or malformed values fall back to
//! their defaults:
//!
//! ```
//! use blend_layers::{BlendMode, BlendSettings, EffectMode};
//!
//! let settings = BlendSettings::from_json(
//!     r#"{ "enabled": true, "mode": "stripe", "burnBlendMode": "bogus" }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.mode, EffectMode::Stripe);
//! assert_eq!(settings.burn_blend_mode, BlendMode::Normal);
//! ```

mod color;
mod config;
mod editor;
mod effect;
mod error;
mod markup;
mod positioner;
mod settings;
mod transformer;

pub use color::CssColor;
pub use config::{ClientSettings, DEFAULT_SUPPORTED_BLOCKS, Markers, PluginConfig};
pub use editor::{
    ControlOption, EditorPreview, attribute_definition, blend_mode_options, editor_preview,
    effect_mode_options, extend_block_registration,
};
pub use effect::{Declarations, MarkupEffect, SimpleEffect, StripeEffect, effect_for, stylesheet};
pub use error::{Error, Result};
pub use markup::{Attribute, InnerText, RootElement, extract_inner_text};
pub use positioner::{
    AutoPositioner, ElementId, Geometry, LayerDocument, LayerPositioner, LayerStyler,
    MemoryDocument, MemoryElement, OverlayStyle, PositionReport, ReadyState, StyleProperty,
    Trigger, TriggerScheduler, Typography,
};
pub use settings::{ATTRIBUTE_NAME, BlendMode, BlendSettings, EffectMode};
pub use transformer::{BlendTransformer, BlockRenderInput, transform};
