//! Model provider settings

use crate::error::{ConfigError, Result};
use lease_analyzer::analyzer::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use lease_analyzer::backend::{DEFAULT_ANTHROPIC_API_BASE, DEFAULT_OPENAI_API_BASE};
use lease_analyzer::AnalyzerSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which completion API to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    /// Any OpenAI-compatible `chat/completions` endpoint
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }

    /// Environment variable consulted when no key is configured
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_api_base(&self) -> &'static str {
        match self {
            Self::Anthropic => DEFAULT_ANTHROPIC_API_BASE,
            Self::OpenAi => DEFAULT_OPENAI_API_BASE,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            other => Err(ConfigError::invalid(
                "provider.kind",
                format!("unknown provider '{other}' (expected anthropic or openai)"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Overrides the provider's public endpoint
    pub api_base: Option<String>,
    pub model: String,
    /// Falls back to the provider's API key variable when unset
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Anthropic,
            api_base: None,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

impl ProviderConfig {
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_base())
    }

    /// Configured key, or the one found through `lookup` under the
    /// provider's variable name
    pub fn resolve_api_key<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(self.kind.api_key_env()))
            .filter(|key| !key.trim().is_empty())
    }

    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(|name| std::env::var(name).ok())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid("provider.model", "model name is empty"));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid(
                "provider.max_tokens",
                "must be greater than zero",
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::invalid(
                "provider.temperature",
                format!("{} is outside 0.0..=1.0", self.temperature),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "provider.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
