// ABOUTME: DNS-compatible container group name validation.
// ABOUTME: Container group names follow RFC 1123 label requirements.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerGroupNameError {
    #[error("container group name cannot be empty")]
    Empty,

    #[error("container group name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("container group name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("container group name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("container group name must be lowercase")]
    NotLowercase,

    #[error("invalid character in container group name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerGroupName(String);

impl ContainerGroupName {
    pub fn new(value: &str) -> Result<Self, ContainerGroupNameError> {
        if value.is_empty() {
            return Err(ContainerGroupNameError::Empty);
        }

        if value.len() > 63 {
            return Err(ContainerGroupNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(ContainerGroupNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(ContainerGroupNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(ContainerGroupNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(ContainerGroupNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
