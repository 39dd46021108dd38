//! Shared error types for the random-mean service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid URL: {input}")]
    InvalidUrl { input: String },
}

impl SharedError {
    pub fn invalid_config(field: &str, value: impl ToString) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
