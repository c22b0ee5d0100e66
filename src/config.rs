//! Session configuration.
//!
//! Loaded from an optional JSON file. Every field has a default matching the
//! stock three-country setup, so an empty object `{}` is a valid config.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::board::color::Color;
use crate::board::country::{Country, CountryId, CountryRegistry};

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("at least one country must be configured")]
    NoCountries,

    #[error("duplicate country id {0}")]
    DuplicateCountry(CountryId),
}

/// One configured country.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryConfig {
    pub id: u32,
    pub name: String,
    pub color: Color,
}

/// Everything a session needs besides the map asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Advisory unlock secret. Not a security boundary.
    pub secret: String,
    pub neutral_color: Color,
    /// Class of the group element that contains region paths; `null` accepts all paths.
    pub region_group_class: Option<String>,
    pub countries: Vec<CountryConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            secret: String::from("CHANGE_ME"),
            neutral_color: Color::neutral(),
            region_group_class: Some(String::from("state")),
            countries: CountryRegistry::standard()
                .iter()
                .map(|c| CountryConfig {
                    id: c.id().0,
                    name: c.name().to_string(),
                    color: c.color().clone(),
                })
                .collect(),
        }
    }
}

impl SessionConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<SessionConfig, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        SessionConfig::from_json(&data)
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<SessionConfig, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.country_registry()?;
        Ok(config)
    }

    /// Builds the fixed country population.
    pub fn country_registry(&self) -> Result<CountryRegistry, ConfigError> {
        if self.countries.is_empty() {
            return Err(ConfigError::NoCountries);
        }
        let countries = self
            .countries
            .iter()
            .map(|c| Country::new(CountryId(c.id), c.name.clone(), c.color.clone()))
            .collect();
        CountryRegistry::new(countries).map_err(ConfigError::DuplicateCountry)
    }
}
