//! Client-side alignment of stripe overlays with their base element.
//!
//! After layout, every element carrying the base marker class is measured and
//! its two following siblings, the burn and soft overlays, are given matching
//! absolute geometry and copied typography. The rendering environment is
//! reached only through [`LayerDocument`] (queries and measurement) and
//! [`LayerStyler`] (inline style writes), so the algorithm runs the same
//! against a browser binding or the in-memory [`MemoryDocument`].
//!
//! # Example
//!
//! ```
//! use blend_layers::{
//!     Geometry, LayerPositioner, Markers, MemoryDocument, MemoryElement, StyleProperty,
//! };
//!
//! let markers = Markers::default();
//! let mut doc = MemoryDocument::new();
//! let base = doc.push(
//!     MemoryElement::new([markers.base_class()])
//!         .with_geometry(Geometry::new(12.0, 0.0, 320.0, 48.0)),
//! );
//! let burn = doc.push(MemoryElement::new([markers.burn_class()]));
//! let soft = doc.push(MemoryElement::new([markers.soft_class()]));
//!
//! let report = LayerPositioner::new(markers).run(&mut doc);
//!
//! assert_eq!(report.positioned, 1);
//! assert_eq!(doc.style(burn, StyleProperty::Top), Some("12px"));
//! assert_eq!(doc.style(soft, StyleProperty::Width), Some("320px"));
//! # let _ = base;
//! ```

mod geometry;
mod memory;
mod schedule;

pub use geometry::{Geometry, StyleProperty, Typography};
pub use memory::{ElementId, MemoryDocument, MemoryElement};
pub use schedule::{AutoPositioner, ReadyState, Trigger, TriggerScheduler};

use geometry::px;

use crate::config::{Markers, PluginConfig};

// ============================================================================
// Environment traits
// ============================================================================

/// Writes inline style properties on elements.
pub trait LayerStyler {
    /// Handle to an element of the document.
    type Element: Copy + Eq + std::fmt::Debug;

    /// Sets one inline style property.
    fn set_style(&mut self, element: Self::Element, property: StyleProperty, value: &str);
}

/// Read access to a laid-out document.
pub trait LayerDocument: LayerStyler {
    /// All elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<Self::Element>;

    /// The next element sibling, skipping text and comment nodes.
    fn next_element_sibling(&self, element: Self::Element) -> Option<Self::Element>;

    /// True if `element`'s class list contains `class`.
    fn has_class(&self, element: Self::Element, class: &str) -> bool;

    /// The element's offset position and rendered size.
    fn geometry(&self, element: Self::Element) -> Geometry;

    /// The element's computed typography.
    fn typography(&self, element: Self::Element) -> Typography;
}

// ============================================================================
// OverlayStyle
// ============================================================================

/// The full set of inline properties written on each overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    properties: Vec<(StyleProperty, String)>,
}

impl OverlayStyle {
    /// Computes overlay styling from the base's measurements.
    pub fn from_base(geometry: Geometry, typography: &Typography) -> Self {
        let mut properties = vec![
            (StyleProperty::Position, "absolute".to_string()),
            (StyleProperty::Top, px(geometry.top)),
            (StyleProperty::Left, px(geometry.left)),
            (StyleProperty::Width, px(geometry.width)),
            (StyleProperty::Height, px(geometry.height)),
        ];
        properties.extend(
            typography
                .properties()
                .into_iter()
                .map(|(property, value)| (property, value.to_string())),
        );
        properties.push((StyleProperty::Margin, "0".to_string()));
        properties.push((StyleProperty::BoxSizing, "border-box".to_string()));
        Self { properties }
    }

    /// Returns the value computed for `property`.
    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.properties
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> {
        self.properties.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Writes every property onto `element`.
    pub fn apply_to<S: LayerStyler>(&self, styler: &mut S, element: S::Element) {
        for (property, value) in &self.properties {
            styler.set_style(element, *property, value);
        }
    }
}

// ============================================================================
// LayerPositioner
// ============================================================================

/// Outcome of one positioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionReport {
    /// Base elements whose overlays were aligned.
    pub positioned: usize,
    /// Base elements skipped because their siblings were not burn then soft.
    pub skipped: usize,
}

/// Aligns burn and soft overlays with their base element.
///
/// A pass is idempotent: it only writes overlay inline styles, and the values
/// depend only on the base's current layout.
#[derive(Debug, Clone)]
pub struct LayerPositioner {
    base_class: String,
    burn_class: String,
    soft_class: String,
}

impl LayerPositioner {
    /// Creates a positioner recognising the classes derived from `markers`.
    pub fn new(markers: Markers) -> Self {
        Self {
            base_class: markers.base_class(),
            burn_class: markers.burn_class(),
            soft_class: markers.soft_class(),
        }
    }

    /// Creates a positioner from the plugin configuration.
    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.markers.clone())
    }

    /// Runs one positioning pass over `doc`.
    pub fn run<D: LayerDocument>(&self, doc: &mut D) -> PositionReport {
        let mut report = PositionReport::default();

        for base in doc.elements_with_class(&self.base_class) {
            let Some((burn, soft)) = self.overlays_of(doc, base) else {
                tracing::trace!(?base, "base without burn/soft siblings, skipping");
                report.skipped += 1;
                continue;
            };

            let style = OverlayStyle::from_base(doc.geometry(base), &doc.typography(base));
            style.apply_to(doc, burn);
            style.apply_to(doc, soft);
            report.positioned += 1;
        }

        tracing::debug!(
            positioned = report.positioned,
            skipped = report.skipped,
            "positioned stripe overlays"
        );
        report
    }

    /// The burn and soft overlays directly following `base`, if both are present.
    fn overlays_of<D: LayerDocument>(
        &self,
        doc: &D,
        base: D::Element,
    ) -> Option<(D::Element, D::Element)> {
        let burn = doc
            .next_element_sibling(base)
            .filter(|&e| doc.has_class(e, &self.burn_class))?;
        let soft = doc
            .next_element_sibling(burn)
            .filter(|&e| doc.has_class(e, &self.soft_class))?;
        Some((burn, soft))
    }
}

impl Default for LayerPositioner {
    fn default() -> Self {
        Self::new(Markers::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typography() -> Typography {
        Typography {
            font_family: "\"Inter\", sans-serif".into(),
            font_size: "48px".into(),
            font_weight: "700".into(),
            line_height: "57.6px".into(),
            letter_spacing: "-0.96px".into(),
            text_transform: "none".into(),
            text_align: "center".into(),
            padding: "0px 8px".into(),
        }
    }

    fn stripe(doc: &mut MemoryDocument, geometry: Geometry) -> (ElementId, ElementId, ElementId) {
        let markers = Markers::default();
        let base = doc.push(
            MemoryElement::new(["wp-block-heading".to_string(), markers.base_class()])
                .with_geometry(geometry)
                .with_typography(typography()),
        );
        let burn = doc.push(MemoryElement::new([markers.burn_class()]));
        let soft = doc.push(MemoryElement::new([markers.soft_class()]));
        (base, burn, soft)
    }

    #[test]
    fn overlays_match_base_geometry_and_typography() {
        let mut doc = MemoryDocument::new();
        let geometry = Geometry::new(96.5, 24.0, 640.25, 115.2);
        let (base, burn, soft) = stripe(&mut doc, geometry);

        let report = LayerPositioner::default().run(&mut doc);
        assert_eq!(report, PositionReport { positioned: 1, skipped: 0 });

        for overlay in [burn, soft] {
            assert_eq!(doc.style(overlay, StyleProperty::Position), Some("absolute"));
            assert!(doc.rendered_geometry(overlay).unwrap().approx_eq(&geometry, 0.01));
            assert_eq!(doc.style(overlay, StyleProperty::Margin), Some("0"));
            assert_eq!(doc.style(overlay, StyleProperty::BoxSizing), Some("border-box"));
            for (property, value) in typography().properties() {
                assert_eq!(doc.style(overlay, property), Some(value));
            }
        }
        assert_eq!(doc.element(base).style_len(), 0);
    }

    #[test]
    fn skips_when_next_sibling_is_not_burn() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        doc.push(MemoryElement::new([markers.base_class()]));
        doc.push(MemoryElement::new([markers.soft_class()]));
        doc.push(MemoryElement::new([markers.burn_class()]));

        let report = LayerPositioner::default().run(&mut doc);

        assert_eq!(report, PositionReport { positioned: 0, skipped: 1 });
        assert_eq!(doc.mutation_count(), 0);
    }

    #[test]
    fn skips_when_soft_is_missing() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        doc.push(MemoryElement::new([markers.base_class()]));
        doc.push(MemoryElement::new([markers.burn_class()]));
        doc.push(MemoryElement::new(["unrelated".to_string()]));

        let report = LayerPositioner::default().run(&mut doc);

        assert_eq!(report.skipped, 1);
        assert_eq!(doc.mutation_count(), 0);
    }

    #[test]
    fn siblings_must_share_the_parent() {
        let markers = Markers::default();
        let mut doc = MemoryDocument::new();
        let group = doc.push(MemoryElement::new(["wp-block-group".to_string()]));
        doc.push(MemoryElement::new([markers.base_class()]).with_parent(group));
        doc.push(MemoryElement::new([markers.burn_class()]));
        doc.push(MemoryElement::new([markers.soft_class()]));

        let report = LayerPositioner::default().run(&mut doc);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn handles_several_bases_independently() {
        let mut doc = MemoryDocument::new();
        let (_, first_burn, _) = stripe(&mut doc, Geometry::new(0.0, 0.0, 100.0, 20.0));
        doc.push(MemoryElement::new([Markers::default().base_class()]));
        let (_, last_burn, _) = stripe(&mut doc, Geometry::new(300.0, 0.0, 100.0, 20.0));

        let report = LayerPositioner::default().run(&mut doc);

        assert_eq!(report, PositionReport { positioned: 2, skipped: 1 });
        assert_eq!(doc.style(first_burn, StyleProperty::Top), Some("0px"));
        assert_eq!(doc.style(last_burn, StyleProperty::Top), Some("300px"));
    }

    #[test]
    fn rerun_follows_new_layout() {
        let mut doc = MemoryDocument::new();
        let (base, burn, soft) = stripe(&mut doc, Geometry::new(10.0, 10.0, 800.0, 60.0));
        let positioner = LayerPositioner::default();
        positioner.run(&mut doc);

        let narrow = Geometry::new(10.0, 10.0, 360.0, 120.0);
        doc.element_mut(base).set_geometry(narrow);
        positioner.run(&mut doc);
        positioner.run(&mut doc);

        assert_eq!(doc.rendered_geometry(burn), Some(narrow));
        assert_eq!(doc.rendered_geometry(soft), Some(narrow));
    }

    #[test]
    fn custom_markers_are_honoured() {
        let markers = Markers {
            prefix: "fx".into(),
        };
        let mut doc = MemoryDocument::new();
        doc.push(MemoryElement::new([markers.base_class()]));
        doc.push(MemoryElement::new([markers.burn_class()]));
        doc.push(MemoryElement::new([markers.soft_class()]));

        assert_eq!(LayerPositioner::default().run(&mut doc).positioned, 0);
        assert_eq!(LayerPositioner::new(markers).run(&mut doc).positioned, 1);
    }

    #[test]
    fn overlay_style_lists_every_property_once() {
        let style = OverlayStyle::from_base(Geometry::new(1.0, 2.0, 3.0, 4.0), &typography());
        assert_eq!(style.iter().count(), 15);
        assert_eq!(style.get(StyleProperty::Left), Some("2px"));
        assert_eq!(style.get(StyleProperty::FontWeight), Some("700"));
    }
}
