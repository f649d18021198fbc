use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{DEFAULT_ROW_LENGTH, Geometry};

/// User settings, read once at startup.
///
/// Animation fields are carried for the UI; the engine itself only uses
/// `row_length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub row_length: usize,
    pub animation: bool,
    pub animation_speed: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            row_length: DEFAULT_ROW_LENGTH,
            animation: true,
            animation_speed: 1.0,
        }
    }
}

impl Settings {
    /// Parses settings JSON. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry().map(|_| ())
    }

    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.row_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sixteen_board_with_animation() {
        let settings = Settings::default();
        assert_eq!(settings.row_length, 16);
        assert!(settings.animation);
        assert_eq!(settings.geometry().unwrap(), Geometry::default());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings = Settings::from_json(r#"{"rowLength": 8}"#).unwrap();
        assert_eq!(settings.row_length, 8);
        assert!(settings.animation);
        assert_eq!(settings.animation_speed, 1.0);
    }

    #[test]
    fn invalid_row_length_is_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"rowLength": 9}"#),
            Err(ConfigError::InvalidRowLength(9))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"rowLength": 1048576}"#),
            Err(ConfigError::RowLengthTooLarge {
                row_length: 1048576,
                ..
            })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let settings = Settings {
            row_length: 10,
            animation: false,
            animation_speed: 2.5,
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"rowLength\":10"));
        assert!(json.contains("\"animationSpeed\":2.5"));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
