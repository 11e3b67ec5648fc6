//! Visible text extracted from block markup.

use std::fmt;

/// Plain text of an element with line breaks kept as `\n`.
///
/// Tags are stripped, `<br>` becomes `\n`, and newlines in the source markup
/// (which HTML renders as spaces) become spaces. `<script>` and `<style>`
/// contents are dropped. Character references are kept
/// as written, so the text can be put back into markup without re-escaping.
///
/// # Example
///
/// ```
/// use blend_layers::InnerText;
///
/// let text = InnerText::from_markup("Hello<br/><strong>World</strong>");
/// assert_eq!(text.as_str(), "Hello\nWorld");
/// assert_eq!(text.to_html(), "Hello<br>World");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InnerText(String);

impl InnerText {
    /// Strips tags from `markup`, keeping line breaks.
    pub fn from_markup(markup: &str) -> Self {
        let mut text = String::with_capacity(markup.len());
        let mut rest = markup;

        while let Some(lt) = rest.find(['<', '\n', '\r']) {
            text.push_str(&rest[..lt]);
            let tail = &rest[lt..];

            if tail.starts_with('\r') {
                rest = &tail[1..];
                if !rest.starts_with('\n') {
                    text.push(' ');
                }
                continue;
            }
            if tail.starts_with('\n') {
                text.push(' ');
                rest = &tail[1..];
                continue;
            }

            if let Some(comment) = tail.strip_prefix("<!--") {
                rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
                continue;
            }

            let Some(len) = super::tag_len(tail) else {
                // Unterminated tag swallows the remainder.
                rest = "";
                break;
            };
            let name = tag_name(&tail[1..len - 1]);
            rest = &tail[len..];
            if name.eq_ignore_ascii_case("br") {
                text.push('\n');
            } else if RAW_TEXT.iter().any(|raw| name.eq_ignore_ascii_case(raw)) {
                rest = skip_raw_text(rest, name);
            }
        }
        text.push_str(rest);

        Self(text)
    }

    /// The text, with `\n` marking line breaks.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if there is no text at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the lines between breaks.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }

    /// Renders the text back to markup with `<br>` for each line break.
    pub fn to_html(&self) -> String {
        self.0.replace('\n', "<br>")
    }
}

impl fmt::Display for InnerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elements whose content is never rendered as text.
const RAW_TEXT: [&str; 2] = ["script", "style"];

/// Name of an opening tag given its body without angle brackets, so `br`
/// for `br`, `br/` and `BR class="x"`. Closing tags and comments yield `""`.
fn tag_name(tag: &str) -> &str {
    let end = tag
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(tag.len());
    &tag[..end]
}

/// Skips past the closing tag of the raw-text element `name`.
fn skip_raw_text<'a>(content: &'a str, name: &str) -> &'a str {
    let closing = format!("</{}", name.to_ascii_lowercase());
    let Some(close) = content.to_ascii_lowercase().find(&closing) else {
        return "";
    };
    let tail = &content[close..];
    super::tag_len(tail).map_or("", |len| &tail[len..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Hello<br>World", "Hello\nWorld")]
    #[case("Hello<br/>World", "Hello\nWorld")]
    #[case("Hello<br />World", "Hello\nWorld")]
    #[case("Hello<BR class=\"x\">World", "Hello\nWorld")]
    #[case("<strong>bold</strong> and <a href=\"/x\">link</a>", "bold and link")]
    #[case("\n<p>One</p>\n<p>Two</p>\n", " One Two ")]
    #[case("a\r\nb", "a b")]
    #[case("Tom &amp; Jerry", "Tom &amp; Jerry")]
    #[case("before<!-- a > b -->after", "beforeafter")]
    #[case("cut <span", "cut ")]
    #[case(r#"Go <a title="1 > 0" href="/x">here</a>"#, "Go here")]
    #[case("<span data-q='a>b' class=x>q</span>", "q")]
    #[case("a<script>if (x < y) alert(1)</script>b", "ab")]
    #[case("a<STYLE media=\"x\">p > b { color: red }</Style >b", "ab")]
    #[case("a<script>never closed", "a")]
    #[case("", "")]
    fn strips_tags_and_keeps_breaks(#[case] markup: &str, #[case] expected: &str) {
        assert_eq!(InnerText::from_markup(markup).as_str(), expected);
    }

    #[test]
    fn bracket_like_tags_are_not_breaks() {
        assert_eq!(InnerText::from_markup("a<bra>b").as_str(), "ab");
        assert_eq!(InnerText::from_markup("a<abbr>b</abbr>").as_str(), "ab");
    }

    #[test]
    fn rendering_reproduces_text() {
        let text = InnerText::from_markup("Line one<br>Line <em>two</em><br><br>end");
        assert_eq!(text.lines().collect::<Vec<_>>(), ["Line one", "Line two", "", "end"]);

        let again = InnerText::from_markup(&text.to_html());
        assert_eq!(again, text);
    }

    #[test]
    fn non_ascii_text_survives() {
        let text = InnerText::from_markup("Grüße<br>日本語");
        assert_eq!(text.as_str(), "Grüße\n日本語");
        assert_eq!(text.to_html(), "Grüße<br>日本語");
    }
}
