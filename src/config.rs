//! # Store Configuration
//!
//! Connection parameters for the remote inventory collection, read once at
//! process start.
//!
//! | Variable               | Meaning                          | Default                                |
//! |------------------------|----------------------------------|----------------------------------------|
//! | `INVENTORY_PROJECT_ID` | Firestore project identifier     | required                               |
//! | `INVENTORY_API_KEY`    | Web API key (`key=` query param) | none                                   |
//! | `INVENTORY_AUTH_TOKEN` | Bearer token                     | none                                   |
//! | `INVENTORY_DATABASE`   | Database id                      | `(default)`                            |
//! | `INVENTORY_COLLECTION` | Collection holding the records   | `inventory`                            |
//! | `INVENTORY_BASE_URL`   | REST endpoint                    | `https://firestore.googleapis.com/v1`  |

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_COLLECTION: &str = "inventory";

pub const PROJECT_ID_VAR: &str = "INVENTORY_PROJECT_ID";
pub const API_KEY_VAR: &str = "INVENTORY_API_KEY";
pub const AUTH_TOKEN_VAR: &str = "INVENTORY_AUTH_TOKEN";
pub const DATABASE_VAR: &str = "INVENTORY_DATABASE";
pub const COLLECTION_VAR: &str = "INVENTORY_COLLECTION";
pub const BASE_URL_VAR: &str = "INVENTORY_BASE_URL";

/// Errors raised while reading the configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Setting {name} must not be blank")]
    Blank { name: &'static str },
}

/// Where the inventory collection lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub project_id: String,
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
    pub database: String,
    pub collection: String,
    pub base_url: String,
}

impl StoreConfig {
    /// A configuration for `project_id` with every other setting at its default.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: None,
            auth_token: None,
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to
    /// its value. Empty optional values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let project_id = lookup(PROJECT_ID_VAR).ok_or(ConfigError::Missing(PROJECT_ID_VAR))?;
        if project_id.trim().is_empty() {
            return Err(ConfigError::Blank {
                name: PROJECT_ID_VAR,
            });
        }

        let mut config = Self::new(project_id.trim());
        config.api_key = optional(API_KEY_VAR);
        config.auth_token = optional(AUTH_TOKEN_VAR);
        if let Some(database) = optional(DATABASE_VAR) {
            config.database = database;
        }
        if let Some(collection) = optional(COLLECTION_VAR) {
            config.collection = collection;
        }
        if let Some(base_url) = optional(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[(PROJECT_ID_VAR, "inventory-demo")])).unwrap();
        assert_eq!(config, StoreConfig::new("inventory-demo"));
        assert_eq!(config.collection, "inventory");
        assert_eq!(config.database, "(default)");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_overrides_are_read() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (PROJECT_ID_VAR, "inventory-demo"),
            (API_KEY_VAR, "secret"),
            (COLLECTION_VAR, "pantry"),
            (BASE_URL_VAR, "http://localhost:8080/v1"),
            (AUTH_TOKEN_VAR, ""),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.collection, "pantry");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_project_id_is_required() {
        assert_eq!(
            StoreConfig::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing(PROJECT_ID_VAR))
        );
        assert_eq!(
            StoreConfig::from_lookup(lookup_from(&[(PROJECT_ID_VAR, "  ")])),
            Err(ConfigError::Blank {
                name: PROJECT_ID_VAR
            })
        );
    }
}
