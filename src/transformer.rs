//! Render-filter entry point: rewrites a rendered block's markup.

use serde::{Deserialize, Serialize};

use crate::config::{Markers, PluginConfig};
use crate::effect::effect_for;
use crate::settings::BlendSettings;

// ============================================================================
// BlockRenderInput
// ============================================================================

/// One block as handed over by the host render pipeline.
///
/// # JSON Format
///
/// ```json
/// {
///   "blockType": "core/paragraph",
///   "html": "<p>Hello</p>",
///   "settings": { "enabled": true, "mode": "simple" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct BlockRenderInput {
    pub block_type: String,
    pub html: String,
    #[serde(default)]
    pub settings: BlendSettings,
}

// ============================================================================
// BlendTransformer
// ============================================================================

/// Applies blend effects to the blocks on the configured allow-list.
///
/// Every method is pure: the output depends only on the configuration and
/// the arguments. Unsupported block types and disabled settings return the
/// markup unchanged.
///
/// # Example
///
/// ```
/// use blend_layers::{BlendSettings, BlendTransformer, EffectMode, PluginConfig};
///
/// let transformer = BlendTransformer::new(PluginConfig::default());
/// let settings = BlendSettings::for_mode(EffectMode::Simple);
///
/// let html = transformer.render_block("core/paragraph", "<p>Hi</p>", &settings);
/// assert!(html.contains("abmb-blend-simple"));
///
/// let image = transformer.render_block("core/image", "<figure></figure>", &settings);
/// assert_eq!(image, "<figure></figure>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlendTransformer {
    config: PluginConfig,
}

impl BlendTransformer {
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Transforms one block's markup according to `settings`.
    pub fn render_block(&self, block_type: &str, html: &str, settings: &BlendSettings) -> String {
        if !self.config.supports(block_type) {
            tracing::trace!(block_type, "block type not supported, skipping");
            return html.to_string();
        }
        apply_settings(html, settings, &self.config.markers)
    }

    /// Like [`render_block`](Self::render_block), reading the settings from
    /// the block's attribute object.
    pub fn render_with_attributes(
        &self,
        block_type: &str,
        html: &str,
        attributes: &serde_json::Value,
    ) -> String {
        if !self.config.supports(block_type) {
            return html.to_string();
        }
        let settings = BlendSettings::from_block_attributes(attributes);
        apply_settings(html, &settings, &self.config.markers)
    }

    /// Transforms a [`BlockRenderInput`].
    pub fn render_input(&self, input: &BlockRenderInput) -> String {
        self.render_block(&input.block_type, &input.html, &input.settings)
    }
}

/// Transforms markup with the default markers, ignoring the block type.
///
/// Disabled settings return `html` unchanged.
pub fn transform(html: &str, settings: &BlendSettings) -> String {
    apply_settings(html, settings, &Markers::default())
}

fn apply_settings(html: &str, settings: &BlendSettings, markers: &Markers) -> String {
    if !settings.enabled {
        return html.to_string();
    }
    tracing::debug!(mode = ?settings.mode, "applying blend effect");
    effect_for(settings).apply(html, markers)
}

// ============================================================================
// Tests
// ============================================================================
