//! Validation related error types

use thiserror::Error;

/// Input validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required input was empty
    #[error("Input '{field}' cannot be empty")]
    EmptyInput { field: String },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// Algorithm name not present in the catalog
    #[error("Unknown hash algorithm: {name}")]
    UnknownAlgorithm { name: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl ValidationError {
    /// Create an empty input error
    pub fn empty_input(field: &str) -> Self {
        Self::EmptyInput {
            field: field.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }
}
