//! Configuration for the lease checker
//!
//! Settings are read from TOML:
//!
//! ```toml
//! [provider]
//! kind = "anthropic"
//! model = "claude-sonnet-4-20250514"
//! max_tokens = 4000
//! temperature = 0.0
//! timeout_secs = 120
//!
//! [jurisdiction]
//! region = "Ontario"
//! statute = "Residential Tenancies Act"
//! audience = "a student renting near the University of Ottawa"
//!
//! [limits]
//! min_text_chars = 100
//! max_upload_bytes = 10485760
//! allowed_extensions = ["pdf", "doc", "docx"]
//! ```
//!
//! Every key is optional. Environment variables are applied on top of the
//! file: `LEASE_CHECK_PROVIDER`, `LEASE_CHECK_MODEL`, `LEASE_CHECK_API_BASE`.

pub mod error;
pub mod limits;
pub mod provider;

pub use error::{ConfigError, Result};
pub use lease_analyzer::Jurisdiction;
pub use limits::LimitsConfig;
pub use provider::{ProviderConfig, ProviderKind};

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const ENV_PROVIDER: &str = "LEASE_CHECK_PROVIDER";
pub const ENV_MODEL: &str = "LEASE_CHECK_MODEL";
pub const ENV_API_BASE: &str = "LEASE_CHECK_API_BASE";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseCheckConfig {
    pub provider: ProviderConfig,
    pub jurisdiction: Jurisdiction,
    pub limits: LimitsConfig,
}

impl LeaseCheckConfig {
    /// `<config dir>/lease-check/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lease-check").join("config.toml"))
    }

    /// Load from `path` if given, else from [`default_path`](Self::default_path),
    /// then apply environment overrides and validate.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) => Self::load_or_default(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse one TOML file without environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from(path) {
            Err(ConfigError::NotFound(_)) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides read through `lookup`. Empty values are ignored and an
    /// unknown provider name is logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(kind) = get(ENV_PROVIDER) {
            match kind.parse::<ProviderKind>() {
                Ok(kind) => self.provider.kind = kind,
                Err(e) => warn!(error = %e, "Ignoring {}", ENV_PROVIDER),
            }
        }
        if let Some(model) = get(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Some(api_base) = get(ENV_API_BASE) {
            self.provider.api_base = Some(api_base);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.limits.validate()
    }
}
