//! Input checks run before any extraction or model call

use lease_config::LimitsConfig;
use lease_extract::ExtractResult;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid file type. Only {allowed} files are allowed")]
    InvalidFileType { allowed: String },

    #[error("File too large ({size} bytes). Maximum size is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("Could not extract sufficient text from the document ({chars} characters, at least {min} required)")]
    InsufficientText { chars: usize, min: usize },
}

fn allowed_list(limits: &LimitsConfig) -> String {
    let names: Vec<String> = limits
        .allowed_extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_ascii_uppercase())
        .collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{}, and {}", head.join(", "), last),
    }
}

/// The file name must carry an allowed extension
pub fn check_extension(path: &Path, limits: &LimitsConfig) -> Result<(), ValidationError> {
    let allowed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| limits.allows_extension(ext));
    if allowed {
        Ok(())
    } else {
        Err(ValidationError::InvalidFileType {
            allowed: allowed_list(limits),
        })
    }
}

pub fn check_size(size: u64, limits: &LimitsConfig) -> Result<(), ValidationError> {
    if size > limits.max_upload_bytes {
        return Err(ValidationError::TooLarge {
            size,
            limit: limits.max_upload_bytes,
        });
    }
    Ok(())
}

/// Extension and size checks for a file on disk
pub fn check_file(path: &Path, limits: &LimitsConfig) -> anyhow::Result<()> {
    check_extension(path, limits)?;
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ValidationError::NotFound(path.to_path_buf()).into());
        }
        Err(e) => return Err(anyhow::Error::new(e).context(format!("Failed to read {}", path.display()))),
    };
    check_size(metadata.len(), limits)?;
    Ok(())
}

/// Counts characters, not bytes
pub fn check_text(extracted: &ExtractResult, limits: &LimitsConfig) -> Result<(), ValidationError> {
    if !extracted.has_min_chars(limits.min_text_chars) {
        return Err(ValidationError::InsufficientText {
            chars: extracted.text_length,
            min: limits.min_text_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_extension() {
        let limits = LimitsConfig::default();
        assert!(check_extension(Path::new("lease.pdf"), &limits).is_ok());
        assert!(check_extension(Path::new("LEASE.PDF"), &limits).is_ok());
        assert!(check_extension(Path::new("dir/lease.docx"), &limits).is_ok());

        let err = check_extension(Path::new("lease.txt"), &limits).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type. Only PDF, DOC, and DOCX files are allowed"
        );
        assert!(check_extension(Path::new("lease"), &limits).is_err());
    }

    #[test]
    fn test_allowed_list_wording() {
        let limits = LimitsConfig {
            allowed_extensions: vec!["pdf".to_string()],
            ..Default::default()
        };
        assert_eq!(allowed_list(&limits), "PDF");
    }

    #[test]
    fn test_check_size() {
        let limits = LimitsConfig::default();
        assert!(check_size(limits.max_upload_bytes, &limits).is_ok());
        assert!(matches!(
            check_size(limits.max_upload_bytes + 1, &limits),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    fn extracted(text: String) -> ExtractResult {
        ExtractResult::new(text, "lease.pdf", "layout")
    }

    #[test]
    fn test_check_text_counts_chars() {
        let limits = LimitsConfig::default();
        assert!(check_text(&extracted("a".repeat(100)), &limits).is_ok());
        assert!(matches!(
            check_text(&extracted("a".repeat(99)), &limits),
            Err(ValidationError::InsufficientText { chars: 99, min: 100 })
        ));
        // 100 chars, 200 bytes
        assert!(check_text(&extracted("é".repeat(100)), &limits).is_ok());
    }

    #[test]
    fn test_check_file() {
        let limits = LimitsConfig {
            max_upload_bytes: 8,
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.pdf");
        let err = check_file(&missing, &limits).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::NotFound(_))
        ));

        let big = dir.path().join("big.pdf");
        fs::write(&big, [0u8; 16]).unwrap();
        let err = check_file(&big, &limits).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::TooLarge { size: 16, limit: 8 })
        ));

        let small = dir.path().join("small.pdf");
        fs::write(&small, [0u8; 4]).unwrap();
        assert!(check_file(&small, &limits).is_ok());
    }
}
