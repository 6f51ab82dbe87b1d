//! Store configuration.

use frostline_commerce::sku::SkuPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Site logo shown when no override has been saved in settings.
pub const DEFAULT_SITE_LOGO: &str = "/assets/frostline-logo.svg";

/// Errors loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Config read error: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid TOML for this schema.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration, deserialized from TOML. Every field has a
/// shipped default, so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Shared back-office username.
    pub admin_username: String,
    /// Shared back-office password.
    pub admin_password: String,
    /// Key the basket is persisted under in the local store.
    pub basket_key: String,
    /// Object name prefix for uploaded assets.
    pub asset_prefix: String,
    /// Site logo used until an admin saves an override.
    pub default_site_logo: String,
    /// SKU normalization policy.
    pub sku: SkuPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            basket_key: "frostline:basket".to_string(),
            asset_prefix: "uploads".to_string(),
            default_site_logo: DEFAULT_SITE_LOGO.to_string(),
            sku: SkuPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
