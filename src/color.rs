//! CSS colour values carried by blend settings.

use std::fmt;
use std::str::FromStr;

use palette::Srgba;
use palette::rgb::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Characters that would let a colour value break out of its declaration.
const FORBIDDEN: &[char] = &[';', '{', '}', '<', '>', '"', '\\'];

/// A sanitised CSS colour string.
///
/// Any CSS colour syntax is accepted (`#rgb`, `rgb(...)`, `var(--x)`, named
/// colours). Hex values must contain 3, 4, 6 or 8 hex digits. Values that
/// could terminate the surrounding declaration are rejected.
///
/// # Example
///
/// ```
/// use blend_layers::CssColor;
///
/// assert!(CssColor::parse("#bdc6d2").is_some());
/// assert!(CssColor::parse("var(--wp--preset--color--primary)").is_some());
/// assert!(CssColor::parse("#12").is_none());
/// assert!(CssColor::parse("red; background: url(x)").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "jsonschema", schemars(transparent))]
#[serde(try_from = "String", into = "String")]
pub struct CssColor(String);

impl CssColor {
    /// Validates and wraps a colour string, trimming surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.contains(FORBIDDEN) {
            return None;
        }
        if value.starts_with('#') && parse_hex(value).is_none() {
            return None;
        }
        Some(Self(value.to_string()))
    }

    /// Builds a colour from a value known to be valid.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    /// Returns the colour as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the RGBA components if this is a hex colour.
    pub fn to_srgba(&self) -> Option<Srgba<u8>> {
        parse_hex(&self.0)
    }
}

impl TryFrom<String> for CssColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Error> {
        Self::parse(&value).ok_or(Error::InvalidColor(value))
    }
}

impl From<CssColor> for String {
    fn from(color: CssColor) -> Self {
        color.0
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`.
fn parse_hex(value: &str) -> Option<Srgba<u8>> {
    let digits = value.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let (rgb, alpha) = match digits.len() {
        3 | 6 => (digits, None),
        4 => (&digits[..3], Some(&digits[3..])),
        8 => (&digits[..6], Some(&digits[6..])),
        _ => return None,
    };

    let rgb = Srgb::<u8>::from_str(rgb).ok()?;
    let alpha = match alpha {
        None => 255,
        Some(a) if a.len() == 1 => u8::from_str_radix(&a.repeat(2), 16).ok()?,
        Some(a) => u8::from_str_radix(a, 16).ok()?,
    };

    Some(Srgba::new(rgb.red, rgb.green, rgb.blue, alpha))
}
