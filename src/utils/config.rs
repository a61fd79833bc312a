//! Configuration and constants for the CLI.
//!
//! Presentation settings (colours, currency symbol) live in [`StyleConfig`]
//! and are handed to the encoder; the reconstructor never sees them.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current diagram output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default output paths for the generate command
pub const DEFAULT_PUML_PATH: &str = "artifacts/sequence.puml";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

// Field names for the event list (collectors differ in naming)
pub const EVENT_FIELD_NAMES: &[&str] = &["events", "messages", "interactions", "calls"];

// Value transfers arrive in wei; diagrams show whole ether with two decimals.
pub const WEI_DECIMALS: u32 = 18;
pub const DISPLAY_DECIMALS: u32 = 2;

/// Characters kept from each end of a shortened address
pub const ADDRESS_PREFIX_CHARS: usize = 6;
pub const ADDRESS_SUFFIX_CHARS: usize = 4;

pub const DEFAULT_DELEGATE_LIFELINE_COLOR: &str = "#809ECB";
pub const DEFAULT_DELEGATE_MESSAGE_COLOR: &str = "#3471CD";
pub const DEFAULT_NATIVE_SYMBOL: &str = "ETH";

/// Where notes are placed relative to the participant lifeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotePlacement {
    Left,
    #[default]
    Right,
    Over,
}

impl NotePlacement {
    pub fn keyword(&self) -> &'static str {
        match self {
            NotePlacement::Left => "left of",
            NotePlacement::Right => "right of",
            NotePlacement::Over => "over",
        }
    }
}

/// Presentation settings for the text encoder
///
/// **Public** - loaded from TOML or defaulted by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Colour of activation bars opened by delegate calls
    pub delegate_lifeline_color: String,

    /// Colour of arrows sent from inside a delegated context
    pub delegate_message_color: String,

    /// Symbol appended to value-transfer amounts
    pub native_symbol: String,

    /// Placement of error notes
    pub note_placement: NotePlacement,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            delegate_lifeline_color: DEFAULT_DELEGATE_LIFELINE_COLOR.to_string(),
            delegate_message_color: DEFAULT_DELEGATE_MESSAGE_COLOR.to_string(),
            native_symbol: DEFAULT_NATIVE_SYMBOL.to_string(),
            note_placement: NotePlacement::default(),
        }
    }
}

impl StyleConfig {
    /// Check that both colours are hex colours the encoder can emit verbatim
    pub fn validate(&self) -> Result<(), ConfigError> {
        for color in [&self.delegate_lifeline_color, &self.delegate_message_color] {
            if !is_hex_color(color) {
                return Err(ConfigError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Load a style from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidColor` - If a colour is not a hex colour
///
/// # Example
/// ```ignore
/// let style = load_style("style.toml")?;
/// ```
pub fn load_style(path: impl AsRef<Path>) -> Result<StyleConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let style: StyleConfig = toml::from_str(&contents)?;
    style.validate()?;
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_style_keeps_defaults() {
        let style: StyleConfig = toml::from_str("native_symbol = \"MATIC\"").unwrap();
        assert_eq!(style.native_symbol, "MATIC");
        assert_eq!(style.delegate_lifeline_color, DEFAULT_DELEGATE_LIFELINE_COLOR);
        assert_eq!(style.note_placement, NotePlacement::Right);
    }

    #[test]
    fn test_note_placement_from_toml() {
        let style: StyleConfig = toml::from_str("note_placement = \"over\"").unwrap();
        assert_eq!(style.note_placement.keyword(), "over");
    }

    #[test]
    fn test_invalid_color_rejected() {
        let style = StyleConfig {
            delegate_message_color: "blue".to_string(),
            ..Default::default()
        };
        assert!(matches!(style.validate(), Err(ConfigError::InvalidColor(_))));
        assert!(StyleConfig::default().validate().is_ok());
    }
}
