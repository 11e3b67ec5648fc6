//! Data the block editor needs: attribute registration, control options and
//! the in-editor preview of an effect.
//!
//! The editor never renders the stripe layers. It previews both modes on
//! the block wrapper with marker classes and custom properties.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::config::PluginConfig;
use crate::settings::{ATTRIBUTE_NAME, BlendMode, BlendSettings, EffectMode};

// ============================================================================
// Attribute registration
// ============================================================================

/// The attribute definition registered on every supported block.
///
/// ```json
/// { "type": "object", "default": { "enabled": false, "mode": "simple", ... } }
/// ```
pub fn attribute_definition() -> Value {
    json!({
        "type": "object",
        "default": BlendSettings::default(),
    })
}

/// Adds the blend attribute to a block type's registration settings.
///
/// Returns true if the block is supported and the attribute was added.
/// Existing attributes are kept.
pub fn extend_block_registration(
    config: &PluginConfig,
    block_type: &str,
    registration: &mut Value,
) -> bool {
    if !config.supports(block_type) {
        return false;
    }
    let Some(settings) = registration.as_object_mut() else {
        return false;
    };
    let attributes = settings
        .entry("attributes")
        .or_insert_with(|| Value::Object(Map::new()));
    if !attributes.is_object() {
        *attributes = Value::Object(Map::new());
    }
    if let Some(attributes) = attributes.as_object_mut() {
        attributes.insert(ATTRIBUTE_NAME.to_string(), attribute_definition());
    }
    true
}

// ============================================================================
// Control options
// ============================================================================

/// A label/value pair for select and radio controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlOption {
    pub label: String,
    pub value: String,
}

/// Options of the blend mode selects, in display order.
pub fn blend_mode_options() -> Vec<ControlOption> {
    BlendMode::ALL
        .into_iter()
        .map(|mode| ControlOption {
            label: mode.label().to_string(),
            value: mode.as_str().to_string(),
        })
        .collect()
}

/// Options of the effect type radio control.
pub fn effect_mode_options() -> Vec<ControlOption> {
    [(EffectMode::Simple, "Simple CSS"), (EffectMode::Stripe, "Stripe Effect")]
        .into_iter()
        .map(|(mode, label)| ControlOption {
            label: label.to_string(),
            value: match mode {
                EffectMode::Simple => "simple",
                EffectMode::Stripe => "stripe",
            }
            .to_string(),
        })
        .collect()
}

// ============================================================================
// Preview
// ============================================================================

/// Wrapper props applied to a block in the editor canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorPreview {
    /// Class names replacing the wrapper's preview classes.
    pub class_name: String,
    /// Wrapper style with the preview custom properties merged in.
    pub style: Map<String, Value>,
}

/// Computes the editor preview for a block.
///
/// `None` for unsupported blocks and disabled settings. `wrapper_style` is
/// the wrapper's existing style object; preview properties override it.
pub fn editor_preview(
    config: &PluginConfig,
    block_type: &str,
    settings: &BlendSettings,
    wrapper_style: Option<&Map<String, Value>>,
) -> Option<EditorPreview> {
    if !config.supports(block_type) || !settings.enabled {
        return None;
    }
    let markers = &config.markers;

    let class_name = match settings.mode {
        EffectMode::Simple => markers.simple_preview_class(),
        EffectMode::Stripe => markers.stripe_preview_class(),
    };

    let mut style = wrapper_style.cloned().unwrap_or_default();
    style.insert(markers.var_name("blend-mode"), json!(settings.blend_mode));
    style.insert(markers.var_name("base-color"), json!(settings.base_color));
    style.insert(markers.var_name("overlay-color"), json!(settings.overlay_color));
    style.insert(markers.var_name("overlay-opacity"), json!(settings.overlay_opacity));

    Some(EditorPreview {
        class_name: format!("{class_name} {}", markers.editor_preview_class()),
        style,
    })
}
