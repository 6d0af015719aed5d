//! User color - a `#RRGGBB` display color

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color assigned to a user for avatars and name labels
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserColor(String);

/// Error when parsing a color string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must start with '#'")]
    MissingHash,

    #[error("color must have exactly 6 hex digits, got {0}")]
    WrongLength(usize),

    #[error("invalid hex digit in color")]
    InvalidDigit,
}

impl UserColor {
    /// Fallback color used when a record carries no color
    pub const BLACK: &'static str = "#000000";

    /// Parse a `#RRGGBB` string (either case is accepted)
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if digits.len() != 6 {
            return Err(ColorParseError::WrongLength(digits.len()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit);
        }
        Ok(Self(s.to_string()))
    }

    /// Pick a random color from `#000000` up to (excluding) `#ffffff`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value: u32 = rng.gen_range(0..0x00FF_FFFF);
        Self(format!("#{value:06x}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserColor {
    fn default() -> Self {
        Self(Self::BLACK.to_string())
    }
}

impl fmt::Display for UserColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserColor> for String {
    fn from(color: UserColor) -> Self {
        color.0
    }
}

impl std::str::FromStr for UserColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
