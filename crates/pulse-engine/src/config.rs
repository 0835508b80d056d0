//! Engine configuration
//!
//! Settings come from the process environment on the device, but can also be
//! carried as JSON alongside a capture.

use pulse_core::{PulseError, PulseResult};
use serde::{Deserialize, Serialize};

/// Environment variable holding the median filter window size
pub const FILTER_WINDOW_VAR: &str = "PULSE_FILTER_WINDOW";
/// Environment variable holding the width annotation selection
pub const WIDTH_SELECTION_VAR: &str = "PULSE_WIDTH_SELECTION";

/// Which channels get pulse-width annotations downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthSelection {
    /// Annotate every channel
    All,
    /// Only channels classified as rising
    Rising,
    /// Only channels classified as falling
    Falling,
    /// Annotate nothing
    None,
}

impl WidthSelection {
    /// Parse the `all` / `rising` / `falling` / `none` spelling
    pub fn parse(value: &str) -> PulseResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(WidthSelection::All),
            "rising" => Ok(WidthSelection::Rising),
            "falling" => Ok(WidthSelection::Falling),
            "none" => Ok(WidthSelection::None),
            other => Err(PulseError::ConfigurationError {
                message: format!(
                    "unknown width selection '{}', expected all/rising/falling/none",
                    other
                ),
            }),
        }
    }

    /// Whether a channel with the given rising flag is selected
    pub fn selects(&self, rising: bool) -> bool {
        match self {
            WidthSelection::All => true,
            WidthSelection::Rising => rising,
            WidthSelection::Falling => !rising,
            WidthSelection::None => false,
        }
    }
}

/// Pulse-extraction engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Median filter window size, a positive odd integer
    pub filter_window: usize,
    /// Which channels get width annotations in reports
    pub width_selection: WidthSelection,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            filter_window: 15,
            width_selection: WidthSelection::All,
        }
    }
}

impl EngineConfig {
    /// Read settings from the process environment, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> PulseResult<Self> {
        let mut config = EngineConfig::default();

        if let Ok(raw) = std::env::var(FILTER_WINDOW_VAR) {
            config.filter_window =
                raw.trim()
                    .parse()
                    .map_err(|_| PulseError::ConfigurationError {
                        message: format!("{} is not a valid window size: '{}'", FILTER_WINDOW_VAR, raw),
                    })?;
        }
        if let Ok(raw) = std::env::var(WIDTH_SELECTION_VAR) {
            config.width_selection = WidthSelection::parse(&raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the window constraints that do not depend on channel length
    pub fn validate(&self) -> PulseResult<()> {
        if self.filter_window == 0 || self.filter_window % 2 == 0 {
            return Err(PulseError::ConfigurationError {
                message: format!(
                    "filter window must be a positive odd integer, got {}",
                    self.filter_window
                ),
            });
        }
        Ok(())
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> PulseResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PulseError::ConfigurationError {
            message: format!("failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> PulseResult<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| PulseError::ConfigurationError {
                message: format!("failed to deserialize configuration: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.filter_window, 15);
        assert_eq!(config.width_selection, WidthSelection::All);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_even_window_rejected() {
        let config = EngineConfig { filter_window: 14, ..Default::default() };
        assert!(config.validate().is_err());

        let config = EngineConfig { filter_window: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!(WidthSelection::parse("all").unwrap(), WidthSelection::All);
        assert_eq!(WidthSelection::parse(" Rising ").unwrap(), WidthSelection::Rising);
        assert_eq!(WidthSelection::parse("falling").unwrap(), WidthSelection::Falling);
        assert_eq!(WidthSelection::parse("none").unwrap(), WidthSelection::None);
        assert!(WidthSelection::parse("sideways").is_err());
    }

    #[test]
    fn test_selection_filtering() {
        assert!(WidthSelection::All.selects(true));
        assert!(WidthSelection::All.selects(false));
        assert!(WidthSelection::Rising.selects(true));
        assert!(!WidthSelection::Rising.selects(false));
        assert!(!WidthSelection::Falling.selects(true));
        assert!(WidthSelection::Falling.selects(false));
        assert!(!WidthSelection::None.selects(true));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            filter_window: 7,
            width_selection: WidthSelection::Falling,
        };
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_rejects_invalid_window() {
        let json = r#"{ "filter_window": 8, "width_selection": "all" }"#;
        assert!(EngineConfig::from_json(json).is_err());
    }
}
