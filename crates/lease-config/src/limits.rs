//! Upload and extraction limits

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_TEXT_CHARS: usize = 100;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Extracted text shorter than this is treated as unreadable
    pub min_text_chars: usize,
    pub max_upload_bytes: u64,
    /// Lowercase, without the leading dot
    pub allowed_extensions: Vec<String>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: vec!["pdf".to_string(), "doc".to_string(), "docx".to_string()],
        }
    }
}

impl LimitsConfig {
    /// Case-insensitive; a leading dot is ignored
    pub fn allows_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    pub fn validate(&self) -> Result<()> {
        if self.allowed_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "limits.allowed_extensions",
                "at least one extension is required",
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::invalid(
                "limits.max_upload_bytes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_extension() {
        let limits = LimitsConfig::default();
        assert!(limits.allows_extension("pdf"));
        assert!(limits.allows_extension("PDF"));
        assert!(limits.allows_extension(".docx"));
        assert!(!limits.allows_extension("txt"));
        assert!(!limits.allows_extension(""));
    }

    #[test]
    fn test_empty_extension_list_is_invalid() {
        let limits = LimitsConfig {
            allowed_extensions: Vec::new(),
            ..Default::default()
        };
        assert!(limits.validate().is_err());
        assert!(LimitsConfig::default().validate().is_ok());
    }
}
