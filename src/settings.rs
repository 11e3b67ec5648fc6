//! Per-block blend settings as persisted in block attributes.
//!
//! [`BlendSettings`] is the JSON object stored under the `advancedBlendMode`
//! attribute of a supported block. Every key is optional: a missing key, or
//! one whose value cannot be used, resolves to its documented default.
//!
//! # Example
//!
//! ```
//! use blend_layers::{BlendMode, BlendSettings, EffectMode};
//!
//! let settings = BlendSettings::from_json(
//!     r#"{ "enabled": true, "mode": "stripe", "softOpacity": 0.5 }"#,
//! ).unwrap();
//!
//! assert!(settings.enabled);
//! assert_eq!(settings.mode, EffectMode::Stripe);
//! assert_eq!(settings.base_blend_mode, BlendMode::ColorBurn);
//! assert_eq!(settings.soft_opacity, 0.5);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::color::CssColor;

/// Attribute key under which blend settings are stored on a block.
pub const ATTRIBUTE_NAME: &str = "advancedBlendMode";

// ============================================================================
// BlendMode
// ============================================================================

/// The CSS `mix-blend-mode` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// All blend modes, in the order the editor lists them.
    pub const ALL: [BlendMode; 16] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Returns the CSS keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// Returns the human readable label shown in editor controls.
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Multiply => "Multiply",
            Self::Screen => "Screen",
            Self::Overlay => "Overlay",
            Self::Darken => "Darken",
            Self::Lighten => "Lighten",
            Self::ColorDodge => "Color Dodge",
            Self::ColorBurn => "Color Burn",
            Self::HardLight => "Hard Light",
            Self::SoftLight => "Soft Light",
            Self::Difference => "Difference",
            Self::Exclusion => "Exclusion",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Color => "Color",
            Self::Luminosity => "Luminosity",
        }
    }

    /// Looks up a blend mode by its CSS keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == keyword)
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// EffectMode
// ============================================================================

/// Which blend effect a block renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum EffectMode {
    /// A single custom property on the block's root element.
    #[default]
    Simple,
    /// The block followed by decorative burn and soft layers.
    Stripe,
}

// ============================================================================
// BlendSettings
// ============================================================================

/// Blend settings for one block instance.
///
/// Not every field is used by both modes. `blend_mode` drives the simple
/// effect; the `base_*`, `burn_*` and `soft_*` fields drive the stripe
/// effect; `base_color`, `overlay_color` and `overlay_opacity` feed the
/// editor preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "jsonschema", schemars(default))]
#[serde(rename_all = "camelCase", from = "RawBlendSettings")]
pub struct BlendSettings {
    /// Whether the effect is rendered at all.
    pub enabled: bool,

    /// Which effect to render.
    pub mode: EffectMode,

    /// Blend mode for the simple effect.
    pub blend_mode: BlendMode,

    /// Base colour shown in the editor preview.
    pub base_color: CssColor,

    /// Overlay colour shown in the editor preview.
    pub overlay_color: CssColor,

    /// Overlay opacity shown in the editor preview (0.0-1.0).
    pub overlay_opacity: f32,

    /// Blend mode applied to the base element of the stripe effect.
    pub base_blend_mode: BlendMode,

    /// Blend mode applied to the burn layer.
    pub burn_blend_mode: BlendMode,

    /// Text colour of the burn layer.
    pub burn_color: CssColor,

    /// Text colour of the soft layer, usually translucent.
    pub soft_color: CssColor,

    /// Opacity of the soft layer (0.0-1.0).
    pub soft_opacity: f32,

    /// Stacking order of the soft layer.
    pub soft_z_index: i32,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: EffectMode::Simple,
            blend_mode: BlendMode::ColorBurn,
            base_color: CssColor::from_static("#bdc6d2"),
            overlay_color: CssColor::from_static("#3a3a3a"),
            overlay_opacity: 0.3,
            base_blend_mode: BlendMode::ColorBurn,
            burn_blend_mode: BlendMode::Normal,
            burn_color: CssColor::from_static("#bdc6d2"),
            soft_color: CssColor::from_static("#0000003b"),
            soft_opacity: 1.0,
            soft_z_index: -2,
        }
    }
}

impl BlendSettings {
    /// Creates enabled settings for the given mode, all else default.
    pub fn for_mode(mode: EffectMode) -> Self {
        Self {
            enabled: true,
            mode,
            ..Self::default()
        }
    }

    /// Sets the simple-mode blend mode.
    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Sets the stripe base and burn blend modes.
    pub fn with_stripe_blend_modes(mut self, base: BlendMode, burn: BlendMode) -> Self {
        self.base_blend_mode = base;
        self.burn_blend_mode = burn;
        self
    }

    /// Sets the stripe burn and soft colours.
    pub fn with_stripe_colors(mut self, burn: CssColor, soft: CssColor) -> Self {
        self.burn_color = burn;
        self.soft_color = soft;
        self
    }

    /// Reads the settings from a block's attribute object.
    ///
    /// Anything other than an object under [`ATTRIBUTE_NAME`] yields the
    /// defaults, which leave the effect disabled.
    pub fn from_block_attributes(attrs: &serde_json::Value) -> Self {
        attrs
            .get(ATTRIBUTE_NAME)
            .filter(|value| value.is_object())
            .and_then(|value| Self::deserialize(value).ok())
            .unwrap_or_default()
    }

    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from a JSON string.
    ///
    /// Only malformed JSON or a non-object document is an error; unusable
    /// field values fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Lenient decoding
// ============================================================================

/// Wire shape of [`BlendSettings`], where every field may be absent or bad.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawBlendSettings {
    #[serde(deserialize_with = "lenient")]
    enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    mode: Option<EffectMode>,
    #[serde(deserialize_with = "lenient")]
    blend_mode: Option<BlendMode>,
    #[serde(deserialize_with = "lenient")]
    base_color: Option<CssColor>,
    #[serde(deserialize_with = "lenient")]
    overlay_color: Option<CssColor>,
    #[serde(deserialize_with = "lenient")]
    overlay_opacity: Option<f32>,
    #[serde(deserialize_with = "lenient")]
    base_blend_mode: Option<BlendMode>,
    #[serde(deserialize_with = "lenient")]
    burn_blend_mode: Option<BlendMode>,
    #[serde(deserialize_with = "lenient")]
    burn_color: Option<CssColor>,
    #[serde(deserialize_with = "lenient")]
    soft_color: Option<CssColor>,
    #[serde(deserialize_with = "lenient")]
    soft_opacity: Option<f32>,
    #[serde(deserialize_with = "lenient")]
    soft_z_index: Option<i32>,
}

impl From<RawBlendSettings> for BlendSettings {
    fn from(raw: RawBlendSettings) -> Self {
        let defaults = BlendSettings::default();
        Self {
            enabled: raw.enabled.unwrap_or(defaults.enabled),
            mode: raw.mode.unwrap_or(defaults.mode),
            blend_mode: raw.blend_mode.unwrap_or(defaults.blend_mode),
            base_color: raw.base_color.unwrap_or(defaults.base_color),
            overlay_color: raw.overlay_color.unwrap_or(defaults.overlay_color),
            overlay_opacity: unit_interval(raw.overlay_opacity, defaults.overlay_opacity),
            base_blend_mode: raw.base_blend_mode.unwrap_or(defaults.base_blend_mode),
            burn_blend_mode: raw.burn_blend_mode.unwrap_or(defaults.burn_blend_mode),
            burn_color: raw.burn_color.unwrap_or(defaults.burn_color),
            soft_color: raw.soft_color.unwrap_or(defaults.soft_color),
            soft_opacity: unit_interval(raw.soft_opacity, defaults.soft_opacity),
            soft_z_index: raw.soft_z_index.unwrap_or(defaults.soft_z_index),
        }
    }
}

fn unit_interval(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => default,
    }
}

/// Decodes a value, discarding it instead of failing when it has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match T::deserialize(&value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(err) => {
            tracing::debug!(%value, error = %err, "ignoring unusable blend setting");
            Ok(None)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
