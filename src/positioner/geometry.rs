//! Measured geometry, typography and the style properties written to overlays.

use std::fmt;

/// An element's box in CSS pixels.
///
/// `top` and `left` are offsets relative to the element's offset parent, the
/// same containing block an absolutely positioned sibling resolves against.
/// `width` and `height` are the rendered border-box size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Returns the right edge (left + width).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Returns the bottom edge (top + height).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True if every edge is within `tolerance` pixels of `other`.
    pub fn approx_eq(&self, other: &Geometry, tolerance: f64) -> bool {
        (self.top - other.top).abs() <= tolerance
            && (self.left - other.left).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// Computed typography of the base element, as CSS value strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Typography {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub text_transform: String,
    pub text_align: String,
    pub padding: String,
}

impl Typography {
    /// Pairs each copied property with its value.
    pub fn properties(&self) -> [(StyleProperty, &str); 8] {
        [
            (StyleProperty::FontFamily, self.font_family.as_str()),
            (StyleProperty::FontSize, self.font_size.as_str()),
            (StyleProperty::FontWeight, self.font_weight.as_str()),
            (StyleProperty::LineHeight, self.line_height.as_str()),
            (StyleProperty::LetterSpacing, self.letter_spacing.as_str()),
            (StyleProperty::TextTransform, self.text_transform.as_str()),
            (StyleProperty::TextAlign, self.text_align.as_str()),
            (StyleProperty::Padding, self.padding.as_str()),
        ]
    }
}

/// Inline style properties the positioner writes on overlay elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Position,
    Top,
    Left,
    Width,
    Height,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    LetterSpacing,
    TextTransform,
    TextAlign,
    Padding,
    Margin,
    BoxSizing,
}

impl StyleProperty {
    /// The CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Top => "top",
            Self::Left => "left",
            Self::Width => "width",
            Self::Height => "height",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::FontWeight => "font-weight",
            Self::LineHeight => "line-height",
            Self::LetterSpacing => "letter-spacing",
            Self::TextTransform => "text-transform",
            Self::TextAlign => "text-align",
            Self::Padding => "padding",
            Self::Margin => "margin",
            Self::BoxSizing => "box-sizing",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Formats a pixel length, e.g. `12.5` → `12.5px`.
pub(crate) fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_edges() {
        let g = Geometry::new(10.0, 20.0, 100.0, 40.5);
        assert_eq!(g.right(), 120.0);
        assert_eq!(g.bottom(), 50.5);
    }

    #[test]
    fn approx_eq_tolerates_subpixel_rounding() {
        let a = Geometry::new(10.0, 20.0, 100.0, 40.0);
        let b = Geometry::new(10.4, 19.6, 100.2, 40.0);
        assert!(a.approx_eq(&b, 0.5));
        assert!(!a.approx_eq(&b, 0.1));
    }

    #[test]
    fn pixel_formatting() {
        assert_eq!(px(100.0), "100px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(-3.0), "-3px");
    }

    #[test]
    fn css_names_are_kebab_case() {
        assert_eq!(StyleProperty::LetterSpacing.to_string(), "letter-spacing");
        assert_eq!(StyleProperty::BoxSizing.css_name(), "box-sizing");
    }
}
