//! Editor configuration: field defaults and interaction tuning.

use crate::field::MIN_FIELD_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Defaults applied when fields are created, plus the constants the
/// interaction engine and export stage work with.
///
/// Every key is optional when parsed from JSON; missing keys keep their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Anchor (x, y) of newly created fields, in image pixels.
    pub default_position: (f64, f64),
    /// Size (width, height) of newly created photo fields.
    pub photo_size: (f64, f64),
    /// Font size of newly created text fields.
    pub font_size: f64,
    /// Smallest width/height a resize may commit. Cannot go below
    /// [`MIN_FIELD_SIZE`].
    pub min_field_size: f64,
    /// Fixed label carried by photo fields.
    pub photo_label: String,
    /// Width of the synthetic text highlight box.
    pub text_highlight_width: f64,
    /// Font size of the caption drawn above photo placeholders.
    pub caption_font_size: f64,
    /// Vertical distance between the caption and the placeholder top.
    pub caption_offset: f64,
    /// Resize handle size in image pixels.
    pub handle_size: f64,
    /// Resize handle hit tolerance in image pixels.
    pub handle_tolerance: f64,
    /// File name of the exported document.
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_position: (50.0, 50.0),
            photo_size: (100.0, 130.0),
            font_size: 20.0,
            min_field_size: MIN_FIELD_SIZE,
            photo_label: "FOTO".to_string(),
            text_highlight_width: 100.0,
            caption_font_size: 12.0,
            caption_offset: 15.0,
            handle_size: 8.0,
            handle_tolerance: 6.0,
            export_file_name: "carteirinha-oab.pdf".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would break the editing rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_field_size.is_nan() || self.min_field_size < MIN_FIELD_SIZE {
            return Err(ConfigError::Invalid(format!(
                "min_field_size {} is below {}",
                self.min_field_size, MIN_FIELD_SIZE
            )));
        }
        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.default_position, (50.0, 50.0));
        assert_eq!(config.photo_size, (100.0, 130.0));
        assert_eq!(config.font_size, 20.0);
        assert_eq!(config.min_field_size, 5.0);
        assert_eq!(config.photo_label, "FOTO");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "font_size": 14.0 }"#).unwrap();
        assert_eq!(config.font_size, 14.0);
        assert_eq!(config.photo_size, (100.0, 130.0));
        assert_eq!(config.export_file_name, "carteirinha-oab.pdf");
    }

    #[test]
    fn test_invalid_json() {
        let result = EditorConfig::from_json_str("{ font_size: }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_min_field_size_below_floor_is_rejected() {
        let result = EditorConfig::from_json_str(r#"{ "min_field_size": 2.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = EditorConfig::from_json_str(r#"{ "min_field_size": 12.0 }"#).unwrap();
        assert_eq!(config.min_field_size, 12.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EditorConfig {
            photo_label: "PHOTO".to_string(),
            ..EditorConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json_str(&json).unwrap(), config);
    }
}
