//! Minimal parsing of a rendered block's root element.
//!
//! Blocks arrive as a single top-level element, possibly preceded by
//! whitespace. [`RootElement`] parses only that element's opening tag into an
//! attribute list and keeps everything after it verbatim, so class and style
//! edits never disturb the block's content. Serialization re-quotes every
//! attribute value, which keeps the output well-formed.
//!
//! Nothing here repairs malformed markup: if the opening tag cannot be
//! parsed, [`RootElement::parse`] returns `None` and callers skip their edit.

mod text;

pub use text::InnerText;

use std::fmt;

// ============================================================================
// Attribute
// ============================================================================

/// One attribute of the root element.
///
/// Values are stored decoded and re-encoded on serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for valueless attributes such as `hidden`.
    pub value: Option<String>,
}

// ============================================================================
// RootElement
// ============================================================================

/// The parsed root element of a block's markup.
///
/// # Example
///
/// ```
/// use blend_layers::RootElement;
///
/// let mut root = RootElement::parse(r#"<p class="foo">Hello</p>"#).unwrap();
/// root.prepend_class("fx");
/// root.prepend_style("--fx-mode: screen;");
///
/// assert_eq!(
///     root.to_html(),
///     r#"<p class="fx foo" style="--fx-mode: screen;">Hello</p>"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootElement<'a> {
    leading: &'a str,
    tag: &'a str,
    attributes: Vec<Attribute>,
    self_closing: bool,
    rest: &'a str,
}

impl<'a> RootElement<'a> {
    /// Parses the opening tag of the first element in `html`.
    ///
    /// Returns `None` if `html` (after leading whitespace) does not start
    /// with a complete opening tag.
    pub fn parse(html: &'a str) -> Option<Self> {
        let body = html.trim_start();
        let leading = &html[..html.len() - body.len()];

        let after_lt = body.strip_prefix('<')?;
        let tag_len = after_lt
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
            .unwrap_or(after_lt.len());
        let tag = &after_lt[..tag_len];
        if !tag.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }

        let mut cursor = Cursor::new(&after_lt[tag_len..]);
        let mut attributes = Vec::new();

        let self_closing = loop {
            cursor.skip_whitespace();
            if cursor.eat("/>") {
                break true;
            }
            if cursor.eat(">") {
                break false;
            }
            if cursor.is_empty() {
                return None;
            }
            let name = cursor.take_while(|c| !(c.is_whitespace() || matches!(c, '=' | '>' | '/')));
            if name.is_empty() {
                // Stray '/' inside the tag.
                cursor.advance(1);
                continue;
            }
            cursor.skip_whitespace();
            let value = if cursor.eat("=") {
                cursor.skip_whitespace();
                Some(cursor.take_value()?)
            } else {
                None
            };
            attributes.push(Attribute {
                name: name.to_string(),
                value: value.map(|v| html_escape::decode_html_entities(v).into_owned()),
            });
        };

        Some(Self {
            leading,
            tag,
            attributes,
            self_closing,
            rest: cursor.remaining(),
        })
    }

    /// The tag name as written.
    pub fn tag_name(&self) -> &str {
        self.tag
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns an attribute's decoded value. Names match ASCII case-insensitively.
    ///
    /// A valueless attribute yields `Some("")`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.find(name)
            .map(|i| self.attributes[i].value.as_deref().unwrap_or(""))
    }

    /// Sets an attribute, replacing an existing one of the same name.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.find(name) {
            Some(i) => self.attributes[i].value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// The `class` attribute, if present.
    pub fn class(&self) -> Option<&str> {
        self.attribute("class")
    }

    /// The `style` attribute, if present.
    pub fn style(&self) -> Option<&str> {
        self.attribute("style")
    }

    /// Puts `token` in front of the existing class list, creating it if absent.
    pub fn prepend_class(&mut self, token: &str) {
        let merged = join_front(token, self.class());
        self.set_attribute("class", merged);
    }

    /// Puts `declaration` in front of the existing style, creating it if absent.
    pub fn prepend_style(&mut self, declaration: &str) {
        let merged = join_front(declaration, self.style());
        self.set_attribute("style", merged);
    }

    /// The markup between the opening tag and the root's closing tag.
    ///
    /// `None` for self-closing elements or when the closing tag is missing.
    pub fn inner_html(&self) -> Option<&'a str> {
        if self.self_closing {
            return None;
        }
        let close = self.rest.rfind("</")?;
        let closing_name = self.rest[close + 2..]
            .split(|c: char| c == '>' || c.is_whitespace())
            .next()
            .unwrap_or("");
        closing_name
            .eq_ignore_ascii_case(self.tag)
            .then(|| &self.rest[..close])
    }

    /// The visible text of the element, see [`InnerText`].
    pub fn inner_text(&self) -> Option<InnerText> {
        self.inner_html().map(InnerText::from_markup)
    }

    /// Serializes the element with its (possibly edited) attributes.
    pub fn to_html(&self) -> String {
        self.to_string()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for RootElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}", self.leading, self.tag)?;
        for attribute in &self.attributes {
            match &attribute.value {
                Some(value) => write!(
                    f,
                    " {}=\"{}\"",
                    attribute.name,
                    html_escape::encode_double_quoted_attribute(value)
                )?,
                None => write!(f, " {}", attribute.name)?,
            }
        }
        f.write_str(if self.self_closing { " />" } else { ">" })?;
        f.write_str(self.rest)
    }
}

/// Extracts the visible text of a block's root element.
///
/// Falls back to stripping tags from the whole string when the root element
/// or its closing tag cannot be found.
pub fn extract_inner_text(html: &str) -> InnerText {
    RootElement::parse(html)
        .and_then(|root| root.inner_text())
        .unwrap_or_else(|| {
            tracing::trace!("root element not closed, stripping whole fragment");
            InnerText::from_markup(html)
        })
}

pub(crate) fn join_front(front: &str, existing: Option<&str>) -> String {
    match existing.map(str::trim).filter(|s| !s.is_empty()) {
        Some(existing) => format!("{front} {existing}"),
        None => front.to_string(),
    }
}

/// Byte length of the tag opening `tail`, from `<` through its closing `>`.
///
/// Quoted attribute values may contain `>`. `None` if the tag never ends.
fn tag_len(tail: &str) -> Option<usize> {
    let mut cursor = Cursor::new(tail.strip_prefix('<')?);
    loop {
        cursor.take_while(|c| !matches!(c, '>' | '='));
        if cursor.eat(">") {
            return Some(tail.len() - cursor.remaining().len());
        }
        if !cursor.eat("=") {
            return None;
        }
        cursor.skip_whitespace();
        cursor.take_value()?;
    }
}

// ============================================================================
// Cursor
// ============================================================================

struct Cursor<'a> {
    input: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input }
    }

    fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn remaining(&self) -> &'a str {
        self.input
    }

    fn advance(&mut self, bytes: usize) {
        let bytes = self
            .input
            .char_indices()
            .map(|(i, _)| i)
            .find(|&i| i >= bytes)
            .unwrap_or(self.input.len());
        self.input = &self.input[bytes..];
    }

    fn eat(&mut self, token: &str) -> bool {
        match self.input.strip_prefix(token) {
            Some(rest) => {
                self.input = rest;
                true
            }
            None => false,
        }
    }

    fn skip_whitespace(&mut self) {
        self.input = self.input.trim_start();
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let end = self.input.find(|c: char| !keep(c)).unwrap_or(self.input.len());
        let (taken, rest) = self.input.split_at(end);
        self.input = rest;
        taken
    }

    /// Reads a quoted or unquoted attribute value. `None` on an unterminated quote.
    fn take_value(&mut self) -> Option<&'a str> {
        let quote = self.input.chars().next().filter(|c| matches!(c, '"' | '\''));
        match quote {
            Some(quote) => {
                let body = &self.input[1..];
                let end = body.find(quote)?;
                self.input = &body[end + 1..];
                Some(&body[..end])
            }
            None => Some(self.take_while(|c| !(c.is_whitespace() || c == '>'))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_tag_and_attributes() {
        let root = RootElement::parse(
            r#"<h2 class="wp-block-heading" id='intro' data-x=3 hidden>Hi</h2>"#,
        )
        .unwrap();

        assert_eq!(root.tag_name(), "h2");
        assert_eq!(root.class(), Some("wp-block-heading"));
        assert_eq!(root.attribute("ID"), Some("intro"));
        assert_eq!(root.attribute("data-x"), Some("3"));
        assert_eq!(root.attribute("hidden"), Some(""));
        assert_eq!(root.style(), None);
        assert_eq!(root.inner_html(), Some("Hi"));
    }

    #[test]
    fn serialization_preserves_leading_whitespace_and_content() {
        let html = "\n  <div class=\"wp-block-group\">\n<p>One</p>\n</div>\n";
        let root = RootElement::parse(html).unwrap();
        assert_eq!(root.to_html(), html);
    }

    #[test]
    fn requotes_single_quoted_values() {
        let root = RootElement::parse(r#"<p title='say "hi"'>x</p>"#).unwrap();
        assert_eq!(root.attribute("title"), Some(r#"say "hi""#));
        assert_eq!(root.to_html(), r#"<p title="say &quot;hi&quot;">x</p>"#);
    }

    #[test]
    fn decodes_entities_once() {
        let root = RootElement::parse(r#"<p title="a &amp; b">x</p>"#).unwrap();
        assert_eq!(root.attribute("title"), Some("a & b"));
        assert_eq!(root.to_html(), r#"<p title="a &amp; b">x</p>"#);
    }

    #[test]
    fn prepend_merges_with_existing_values() {
        let mut root = RootElement::parse(r#"<p class="foo" style="color:red">x</p>"#).unwrap();
        root.prepend_class("fx");
        root.prepend_style("--fx: 1;");
        assert_eq!(root.class(), Some("fx foo"));
        assert_eq!(root.style(), Some("--fx: 1; color:red"));
    }

    #[test]
    fn prepend_creates_missing_attributes() {
        let mut root = RootElement::parse("<p>x</p>").unwrap();
        root.prepend_class("fx");
        root.prepend_style("--fx: 1;");
        assert_eq!(root.to_html(), r#"<p class="fx" style="--fx: 1;">x</p>"#);

        let mut blank = RootElement::parse(r#"<p class="  ">x</p>"#).unwrap();
        blank.prepend_class("fx");
        assert_eq!(blank.class(), Some("fx"));
    }

    #[test]
    fn self_closing_root() {
        let mut root = RootElement::parse("<hr/>").unwrap();
        root.prepend_class("fx");
        assert_eq!(root.to_html(), r#"<hr class="fx" />"#);
        assert_eq!(root.inner_html(), None);
    }

    #[test]
    fn rejects_non_element_input() {
        assert!(RootElement::parse("plain text").is_none());
        assert!(RootElement::parse("<!-- wp:paragraph -->").is_none());
        assert!(RootElement::parse("<p class=\"open").is_none());
        assert!(RootElement::parse("<p").is_none());
        assert!(RootElement::parse("").is_none());
    }

    #[test]
    fn inner_html_requires_matching_close() {
        let root = RootElement::parse("<p>Hello <em>there</em>").unwrap();
        assert_eq!(root.inner_html(), None);

        let root = RootElement::parse("<P>Hello</p >").unwrap();
        assert_eq!(root.inner_html(), Some("Hello"));
    }

    #[test]
    fn extract_falls_back_to_whole_string() {
        assert_eq!(extract_inner_text("<p>Hello<br>World").as_str(), "Hello\nWorld");
        assert_eq!(extract_inner_text("just <b>text</b>").as_str(), "just text");
        assert_eq!(
            extract_inner_text("<p class=\"a\">Hello<br>World</p>").as_str(),
            "Hello\nWorld"
        );
    }
}
