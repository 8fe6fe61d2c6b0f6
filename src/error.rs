// src/error.rs
//! Unified error handling for EKG Core
//!
//! Synthesis and windowing are total functions and never fail; errors only
//! arise while loading configuration or when a caller asks for strict
//! rhythm identifier parsing.

use thiserror::Error;

/// Unified error type for the crate
#[derive(Debug, Error)]
pub enum EkgError {
    /// Configuration file could not be read
    #[error("[CONFIG] failed to read {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML or does not match the schema
    #[error("[CONFIG] parse error: {0}")]
    ConfigParse(String),

    /// One or more settings are out of range
    #[error("[CONFIG] validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Strict rhythm lookup was given an identifier outside the enumeration
    #[error("[RHYTHM] unknown rhythm identifier '{0}'")]
    UnknownRhythm(String),

    /// Buffer export failed
    #[error("[EXPORT] serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<toml::de::Error> for EkgError {
    fn from(err: toml::de::Error) -> Self {
        EkgError::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for EkgError {
    fn from(err: toml::ser::Error) -> Self {
        EkgError::ConfigParse(err.to_string())
    }
}

/// Result type alias for EKG operations
pub type EkgResult<T> = Result<T, EkgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_joins_messages() {
        let err = EkgError::Validation(vec![
            "sampling_rate_hz out of range".to_string(),
            "canvas_width must be positive".to_string(),
        ]);

        let display = err.to_string();
        assert!(display.starts_with("[CONFIG]"));
        assert!(display.contains("sampling_rate_hz out of range; canvas_width"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse: Result<toml::Value, _> = toml::from_str("[synthesis");
        let err: EkgError = parse.unwrap_err().into();
        assert!(matches!(err, EkgError::ConfigParse(_)));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err = EkgError::ConfigIo {
            path: "missing.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EkgError>();
    }
}
