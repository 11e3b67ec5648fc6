//! An in-memory laid-out document.
//!
//! [`MemoryDocument`] holds pre-measured elements in document order. It backs
//! headless runs of [`LayerPositioner`](super::LayerPositioner) and records
//! every style write so callers can inspect the outcome.

use std::collections::HashMap;

use super::geometry::{Geometry, StyleProperty, Typography};
use super::{LayerDocument, LayerStyler};

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// One element with its measurements and inline style.
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    classes: Vec<String>,
    parent: Option<ElementId>,
    geometry: Geometry,
    typography: Typography,
    style: HashMap<StyleProperty, String>,
}

impl MemoryElement {
    /// Creates an element with the given class list.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    /// Replaces the measured geometry, as after a reflow.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Inline style value for `property`.
    pub fn style(&self, property: StyleProperty) -> Option<&str> {
        self.style.get(&property).map(String::as_str)
    }

    /// Number of inline style properties set.
    pub fn style_len(&self) -> usize {
        self.style.len()
    }
}

/// Elements in document order; siblings are elements with the same parent.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    mutations: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element and returns its handle.
    pub fn push(&mut self, element: MemoryElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> &MemoryElement {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut MemoryElement {
        &mut self.elements[id.0]
    }

    /// Inline style value for `property` on `id`.
    pub fn style(&self, id: ElementId, property: StyleProperty) -> Option<&str> {
        self.element(id).style(property)
    }

    /// The geometry an element's inline `top`/`left`/`width`/`height` describe.
    ///
    /// `None` unless all four are set as pixel lengths.
    pub fn rendered_geometry(&self, id: ElementId) -> Option<Geometry> {
        let read = |property: StyleProperty| {
            self.style(id, property)?
                .strip_suffix("px")?
                .parse::<f64>()
                .ok()
        };
        Some(Geometry::new(
            read(StyleProperty::Top)?,
            read(StyleProperty::Left)?,
            read(StyleProperty::Width)?,
            read(StyleProperty::Height)?,
        ))
    }

    /// Total number of style writes since creation.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }
}

impl LayerStyler for MemoryDocument {
    type Element = ElementId;

    fn set_style(&mut self, element: ElementId, property: StyleProperty, value: &str) {
        self.elements[element.0]
            .style
            .insert(property, value.to_string());
        self.mutations += 1;
    }
}

impl LayerDocument for MemoryDocument {
    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.classes.iter().any(|c| c == class))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn next_element_sibling(&self, element: ElementId) -> Option<ElementId> {
        let parent = self.elements.get(element.0)?.parent;
        self.elements
            .iter()
            .enumerate()
            .skip(element.0 + 1)
            .find(|(_, e)| e.parent == parent)
            .map(|(i, _)| ElementId(i))
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.elements
            .get(element.0)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn geometry(&self, element: ElementId) -> Geometry {
        self.elements[element.0].geometry
    }

    fn typography(&self, element: ElementId) -> Typography {
        self.elements[element.0].typography.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn siblings_follow_document_order_within_parent() {
        let mut doc = MemoryDocument::new();
        let group = doc.push(MemoryElement::new(["group"]));
        let a = doc.push(MemoryElement::new(["a"]).with_parent(group));
        let b = doc.push(MemoryElement::new(["b"]).with_parent(group));
        let after = doc.push(MemoryElement::new(["after"]));

        assert_eq!(doc.next_element_sibling(a), Some(b));
        assert_eq!(doc.next_element_sibling(b), None);
        assert_eq!(doc.next_element_sibling(group), Some(after));
    }

    #[test]
    fn rendered_geometry_needs_all_edges() {
        let mut doc = MemoryDocument::new();
        let el = doc.push(MemoryElement::new(["x"]));
        assert_eq!(doc.rendered_geometry(el), None);

        doc.set_style(el, StyleProperty::Top, "1px");
        doc.set_style(el, StyleProperty::Left, "2px");
        doc.set_style(el, StyleProperty::Width, "3px");
        assert_eq!(doc.rendered_geometry(el), None);

        doc.set_style(el, StyleProperty::Height, "4.5px");
        assert_eq!(doc.rendered_geometry(el), Some(Geometry::new(1.0, 2.0, 3.0, 4.5)));
        assert_eq!(doc.mutation_count(), 4);
    }
}
