//! Error types for Outflow operations.
//!
//! [`OutflowError`] wraps every error condition that can occur between
//! receiving a diagram and producing its rendered output.

use std::io;

use thiserror::Error;

use crate::validate::ValidationError;

/// The main error type for Outflow operations.
#[derive(Debug, Error)]
pub enum OutflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid diagram: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for OutflowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let error: OutflowError = ValidationError::NoInputs.into();
        assert!(matches!(error, OutflowError::Validation(ValidationError::NoInputs)));
        assert!(error.to_string().starts_with("Invalid diagram: "));
    }

    #[test]
    fn test_export_error_is_boxed() {
        let error: OutflowError = crate::export::Error::Render("no colour".to_string()).into();
        assert_eq!(error.to_string(), "Export error: Render error: no colour");
    }
}
