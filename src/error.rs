//! # Error Handling
//!
//! Provides the unified `AppError` enum used by the loader and the command line front-end.
//!
//! The resolution core itself never fails; degraded input is reported through
//! [`Notice`](crate::oas::models::Notice) values instead.

use derive_more::{Display, From};

/// Failures of the outer surfaces: reading a document, decoding it, writing results.
///
/// `From` is derived for every wrapped type, so `?` converts directly; a bare `String`
/// becomes `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML deserialization failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// `General(String)` carries no source, so `derive(Error)` is not used.
impl std::error::Error for AppError {}

/// Result alias used by the loader and the CLI.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_display() {
        let app_err: AppError = Error::new(ErrorKind::NotFound, "openapi.yaml").into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert_eq!(app_err.to_string(), "IO Error: openapi.yaml");
    }

    #[test]
    fn test_json_conversion_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ oops").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
        assert!(app_err.to_string().starts_with("JSON Error: "));
    }

    #[test]
    fn test_yaml_conversion_display() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: a list }").unwrap_err();
        let app_err: AppError = yaml_err.into();
        assert!(matches!(app_err, AppError::Yaml(_)));
        assert!(app_err.to_string().starts_with("YAML Error: "));
    }
}
