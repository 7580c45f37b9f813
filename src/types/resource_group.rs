// ABOUTME: Azure resource group name validation.
// ABOUTME: Alphanumerics, underscore, hyphen, period and parentheses; no trailing period.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceGroupNameError {
    #[error("resource group name cannot be empty")]
    Empty,

    #[error("resource group name exceeds maximum length of 90 characters")]
    TooLong,

    #[error("resource group name cannot end with a period")]
    EndsWithPeriod,

    #[error("invalid character in resource group name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceGroupName(String);

impl ResourceGroupName {
    pub fn new(value: &str) -> Result<Self, ResourceGroupNameError> {
        if value.is_empty() {
            return Err(ResourceGroupNameError::Empty);
        }

        if value.chars().count() > 90 {
            return Err(ResourceGroupNameError::TooLong);
        }

        if value.ends_with('.') {
            return Err(ResourceGroupNameError::EndsWithPeriod);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_alphanumeric() && !matches!(c, '_' | '-' | '.' | '(' | ')'))
        {
            return Err(ResourceGroupNameError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_case_and_punctuation() {
        assert!(ResourceGroupName::new("autoscale-rg").is_ok());
        assert!(ResourceGroupName::new("Prod_West.(eu)").is_ok());
    }

    #[test]
    fn rejects_trailing_period() {
        assert!(matches!(
            ResourceGroupName::new("rg."),
            Err(ResourceGroupNameError::EndsWithPeriod)
        ));
    }

    #[test]
    fn rejects_spaces() {
        assert!(matches!(
            ResourceGroupName::new("my rg"),
            Err(ResourceGroupNameError::InvalidChar(' '))
        ));
    }
}
