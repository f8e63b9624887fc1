//! Settings file for evaluating positions outside an editor
//!
//! A settings file supplies what the editor would normally provide: the
//! parent area, the bounds of the components positions may refer to, and the
//! precision used when writing positions back out.
//!
//! ```toml
//! [parent]
//! x = 0
//! y = 0
//! width = 600
//! height = 400
//!
//! [encoding]
//! absolute_decimals = 1
//!
//! [components]
//! 1f = { x = 10, y = 10, width = 200, height = 30 }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::config::EncodingConfig;
use crate::geometry::types::PixelRect;
use crate::relative::registry::{ComponentId, ComponentRegistry};

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Component key '{key}' is not a non-zero hexadecimal id")]
    InvalidComponentId { key: String },
}

/// Resolved settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Parent area to resolve against, if the file sets one
    pub parent: Option<PixelRect>,
    pub encoding: EncodingConfig,
    pub components: ComponentRegistry,
}

/// TOML structure for deserializing settings
#[derive(Deserialize)]
struct TomlSettings {
    parent: Option<PixelRect>,
    #[serde(default)]
    encoding: EncodingConfig,
    #[serde(default)]
    components: BTreeMap<String, PixelRect>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;

        let components = parsed
            .components
            .into_iter()
            .map(|(key, rect)| match parse_strict_hex(&key) {
                Some(id) => Ok((id, rect)),
                None => Err(SettingsError::InvalidComponentId { key }),
            })
            .collect::<Result<ComponentRegistry, _>>()?;

        Ok(Settings {
            parent: parsed.parent,
            encoding: parsed.encoding,
            components,
        })
    }
}

/// Hex id that must consist only of hex digits, with an optional `0x`
fn parse_strict_hex(key: &str) -> Option<ComponentId> {
    let digits = key.strip_prefix("0x").unwrap_or(key);
    u64::from_str_radix(digits, 16).ok().and_then(ComponentId::new)
}
