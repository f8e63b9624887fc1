//! Configuration for the text encoding of positions

use serde::{Deserialize, Serialize};

/// Most decimal places a double can carry meaningfully; larger settings are capped
pub const MAX_DECIMALS: u32 = 15;

/// Precision used when writing coordinates as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Decimal places kept for pixel values, at most [`MAX_DECIMALS`]
    pub absolute_decimals: u32,

    /// Decimal places kept for percentages, at most [`MAX_DECIMALS`]
    pub proportional_decimals: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            absolute_decimals: 2,
            proportional_decimals: 3,
        }
    }
}

impl EncodingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decimal places kept for pixel values
    pub fn with_absolute_decimals(mut self, decimals: u32) -> Self {
        self.absolute_decimals = decimals;
        self
    }

    /// Set the decimal places kept for percentages
    pub fn with_proportional_decimals(mut self, decimals: u32) -> Self {
        self.proportional_decimals = decimals;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncodingConfig::default();
        assert_eq!(config.absolute_decimals, 2);
        assert_eq!(config.proportional_decimals, 3);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EncodingConfig::new()
            .with_absolute_decimals(0)
            .with_proportional_decimals(1);

        assert_eq!(config.absolute_decimals, 0);
        assert_eq!(config.proportional_decimals, 1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EncodingConfig = toml::from_str("absolute_decimals = 4").unwrap();
        assert_eq!(config.absolute_decimals, 4);
        assert_eq!(config.proportional_decimals, 3);
    }
}
