// Copyright (c) 2025 - MV Consulting
//! Custom Domain Name Value Object with DNS Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Domain name validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainNameError {
    #[error("Domain name is empty")]
    Empty,

    #[error("Domain name contains an empty label: {0}")]
    EmptyLabel(String),

    #[error("Domain name exceeds maximum length of 253 characters: {0}")]
    TooLong(usize),

    #[error("Label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("Invalid character in domain name: {0}")]
    InvalidCharacter(char),

    #[error("Label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),

    #[error("Top-level label cannot be all numeric: {0}")]
    NumericTld(String),

    #[error("Domain name must contain at least two labels")]
    NotQualified,
}

/// Custom domain the server is reachable under, e.g. `vscode.example.com`
///
/// Follows RFC 1123:
/// - Total length ≤ 253 characters
/// - Each label ≤ 63 characters, alphanumeric and hyphens only
/// - Labels cannot start or end with hyphens
/// - The top-level label cannot be all numeric
/// - At least two labels, since CloudFront aliases must be fully qualified
///
/// # Examples
///
/// ```rust
/// use cdk_vscode_server::domain::DomainName;
///
/// let domain = DomainName::new("vscode.example.com").unwrap();
/// assert_eq!(domain.apex(), Some("example.com"));
///
/// assert!(DomainName::new("localhost").is_err());
/// assert!(DomainName::new("-bad.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "domainName";

    /// Maximum total length (RFC 1123)
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length for a single label (RFC 1123)
    pub const MAX_LABEL_LENGTH: usize = 63;

    pub fn new(domain: impl Into<String>) -> Result<Self, DomainNameError> {
        let domain = domain.into();

        if domain.is_empty() {
            return Err(DomainNameError::Empty);
        }

        if domain.len() > Self::MAX_LENGTH {
            return Err(DomainNameError::TooLong(domain.len()));
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.iter().any(|label| label.is_empty()) {
            return Err(DomainNameError::EmptyLabel(domain));
        }
        for label in &labels {
            Self::validate_label(label)?;
        }

        if labels.len() < 2 {
            return Err(DomainNameError::NotQualified);
        }

        if let Some(tld) = labels.last() {
            if tld.chars().all(|c| c.is_ascii_digit()) {
                return Err(DomainNameError::NumericTld(tld.to_string()));
            }
        }

        Ok(Self(domain))
    }

    fn validate_label(label: &str) -> Result<(), DomainNameError> {
        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(DomainNameError::LabelTooLong(label.to_string()));
        }

        if let Some(ch) = label
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-')
        {
            return Err(DomainNameError::InvalidCharacter(ch));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainNameError::InvalidLabelFormat(label.to_string()));
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the first label
    pub fn apex(&self) -> Option<&str> {
        self.0.split_once('.').map(|(_, rest)| rest)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = DomainNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}
