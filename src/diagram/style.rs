use serde::Deserialize;

use super::types::UseCaseDirection;
use crate::error::EditError;

const DEFAULT_BACKGROUND: &str = "#FFFFFF";
const DEFAULT_TEXT: &str = "#000000";
const DEFAULT_PRIMARY: &str = "#1E88E5";

/// Global look of every diagram kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Style {
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_text")]
    pub text_color: String,
    #[serde(default = "default_primary")]
    pub primary_color: String,
    #[serde(default)]
    pub use_case_direction: UseCaseDirection,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}
fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}
fn default_primary() -> String {
    DEFAULT_PRIMARY.to_string()
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background_color: default_background(),
            text_color: default_text(),
            primary_color: default_primary(),
            use_case_direction: UseCaseDirection::default(),
        }
    }
}

impl Style {
    /// Checks every color, e.g. after deserializing a style table.
    pub fn validated(self) -> Result<Self, EditError> {
        Ok(Self {
            background_color: parse_color(&self.background_color)?,
            text_color: parse_color(&self.text_color)?,
            primary_color: parse_color(&self.primary_color)?,
            use_case_direction: self.use_case_direction,
        })
    }
}

/// A partial style table. Absent fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleOverrides {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub primary_color: Option<String>,
    pub use_case_direction: Option<UseCaseDirection>,
}

fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Accepts `#RGB`, `#RRGGBB` or a plain color name such as `LightBlue`.
pub fn parse_color(value: &str) -> Result<String, EditError> {
    let value = value.trim();
    let is_name = !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic());
    if is_hex_color(value) || is_name {
        Ok(value.to_string())
    } else {
        Err(EditError::InvalidColor(value.to_string()))
    }
}
