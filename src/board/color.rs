//! Display colors.
//!
//! Colors are `#RRGGBB` hex strings, validated on construction and stored
//! upper-case so that two spellings of the same color compare equal.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color must start with '#': '{0}'")]
    MissingHash(String),

    #[error("color must have exactly 6 hex digits: '{0}'")]
    WrongLength(String),

    #[error("invalid hex digit in color: '{0}'")]
    InvalidDigit(String),
}

/// Fill used for provinces that no country owns.
pub const NEUTRAL_HEX: &str = "#EEEEEE";

/// A validated `#RRGGBB` display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(pub(super) String);

impl Color {
    /// Parses a `#RRGGBB` string. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Color, ColorError> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorError::WrongLength(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(s.to_string()));
        }
        Ok(Color(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// The neutral background fill, `#EEEEEE`.
    pub fn neutral() -> Color {
        Color(String::from(NEUTRAL_HEX))
    }

    /// Returns the canonical `#RRGGBB` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(serde::de::Error::custom)
    }
}
