//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     CHEAPWARE_PORT=8080                                                 │
//! │     CHEAPWARE_WHATSAPP_NUMBER=15551234567                               │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     $CHEAPWARE_CONFIG, or                                               │
//! │     ~/.config/cheapware/storefront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.cheapware.storefront/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     0.0.0.0:3000, in-memory carts, built-in catalog                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 3000
//! cors_origins = ["http://localhost:3001"]
//!
//! [checkout]
//! phone_number = "+1 555 123 4567"
//! base_url = "https://wa.me"
//!
//! [storage]
//! carts = "file"        # memory | file
//! cart_dir = "./data/carts"
//! catalog_path = "./catalog.json"
//! ```

use std::path::PathBuf;

use cheapware_core::CheckoutSettings;
use cheapware_store::{CartBackend, StoreConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CHEAPWARE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Server Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSection {
    #[serde(default = "default_phone_number")]
    pub phone_number: String,

    #[serde(default = "default_whatsapp_base")]
    pub base_url: String,
}

fn default_phone_number() -> String {
    cheapware_core::checkout::DEFAULT_PHONE_NUMBER.to_string()
}

fn default_whatsapp_base() -> String {
    cheapware_core::checkout::DEFAULT_WHATSAPP_BASE_URL.to_string()
}

impl Default for CheckoutSection {
    fn default() -> Self {
        CheckoutSection {
            phone_number: default_phone_number(),
            base_url: default_whatsapp_base(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStorage {
    #[default]
    Memory,
    File,
}

impl std::str::FromStr for CartStorage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(CartStorage::Memory),
            "file" => Ok(CartStorage::File),
            other => Err(ConfigError::Invalid(format!(
                "Unknown cart storage: '{other}'. Valid options: memory, file"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub carts: CartStorage,

    /// Directory for cart files when `carts = "file"`.
    #[serde(default = "default_cart_dir")]
    pub cart_dir: PathBuf,

    /// Catalog JSON to load instead of the built-in catalog.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_cart_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "cheapware", "storefront")
        .map(|dirs| dirs.data_dir().join("carts"))
        .unwrap_or_else(|| PathBuf::from("data/carts"))
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            carts: CartStorage::default(),
            cart_dir: default_cart_dir(),
            catalog_path: None,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub checkout: CheckoutSection,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load() -> ConfigResult<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with the config path and environment supplied
    /// by the caller.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match config_path {
            // an explicitly named file must exist
            Some(path) => {
                info!(?path, "Loading storefront config from file");
                config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
            }
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
                    info!(?path, "Loading storefront config from file");
                    config = Self::from_toml(&std::fs::read_to_string(&path)?)?;
                } else {
                    debug!("No config file found, using defaults");
                }
            }
        }

        config.apply_env_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("server.bind_addr must not be empty".into()));
        }

        self.checkout_settings()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("checkout: {e}")))?;

        if self.storage.carts == CartStorage::File && self.storage.cart_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.cart_dir is required when carts = \"file\"".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides<F>(&mut self, env: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = env("CHEAPWARE_PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    debug!(port = p, "Overriding port from environment");
                    self.server.port = p;
                }
                Err(_) => warn!(port = %port, "Ignoring invalid CHEAPWARE_PORT"),
            }
        }

        if let Some(addr) = env("CHEAPWARE_BIND_ADDR") {
            debug!(addr = %addr, "Overriding bind address from environment");
            self.server.bind_addr = addr;
        }

        if let Some(origins) = env("CHEAPWARE_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(number) = env("CHEAPWARE_WHATSAPP_NUMBER") {
            debug!("Overriding WhatsApp number from environment");
            self.checkout.phone_number = number;
        }

        if let Some(dir) = env("CHEAPWARE_CART_DIR") {
            // naming a directory implies file storage
            self.storage.cart_dir = PathBuf::from(dir);
            self.storage.carts = CartStorage::File;
        }

        if let Some(storage) = env("CHEAPWARE_CART_STORAGE") {
            self.storage.carts = storage.parse()?;
        }

        if let Some(path) = env("CHEAPWARE_CATALOG_PATH") {
            self.storage.catalog_path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cheapware", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            phone_number: self.checkout.phone_number.clone(),
            base_url: self.checkout.base_url.clone(),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        let backend = match self.storage.carts {
            CartStorage::Memory => CartBackend::Memory,
            CartStorage::File => CartBackend::File(self.storage.cart_dir.clone()),
        };

        let mut config = StoreConfig::new().cart_backend(backend);
        if let Some(path) = &self.storage.catalog_path {
            config = config.catalog_path(path.clone());
        }
        config
    }
}
