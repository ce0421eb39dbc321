// Copyright (c) 2025 - MV Consulting
//! Error types for construct configuration and materialization

use thiserror::Error;

/// Errors that can occur while resolving, validating or materializing a
/// VS Code server construct
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// A value lies outside the set of values a field accepts
    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidOption {
        field: String,
        value: String,
        reason: String,
    },

    /// Mutually exclusive fields were set together
    #[error("Conflicting options: {} cannot be set together", fields.join(", "))]
    ConflictingOption { fields: Vec<String> },

    /// A field was set without the field(s) it depends on
    #[error("{field} requires {}", requires.join(" or "))]
    MissingDependency {
        field: String,
        requires: Vec<String>,
    },

    /// An operation was invoked in the wrong lifecycle phase
    #[error("{operation} requires the construct to be {required}, but it is {actual}")]
    PreconditionViolation {
        operation: String,
        required: String,
        actual: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Filesystem error while loading configuration
    #[error("I/O error: {0}")]
    Io(String),

    /// The construction engine failed or returned unusable outputs
    #[error("Construction engine error: {0}")]
    Engine(String),
}

impl ConstructError {
    /// Build an [`ConstructError::InvalidOption`] for a field
    pub fn invalid_option(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConstructError::InvalidOption {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`ConstructError::MissingDependency`]
    pub fn missing_dependency(field: impl Into<String>, requires: &[&str]) -> Self {
        ConstructError::MissingDependency {
            field: field.into(),
            requires: requires.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Names of the fields this error points at
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ConstructError::InvalidOption { field, .. } => vec![field.as_str()],
            ConstructError::ConflictingOption { fields } => {
                fields.iter().map(String::as_str).collect()
            }
            ConstructError::MissingDependency { field, .. } => vec![field.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Result type for construct operations
pub type ConstructResult<T> = Result<T, ConstructError>;

impl From<serde_json::Error> for ConstructError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConstructError::Deserialization(err.to_string())
        } else {
            ConstructError::Serialization(err.to_string())
        }
    }
}

impl From<std::io::Error> for ConstructError {
    fn from(err: std::io::Error) -> Self {
        ConstructError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_fields() {
        let err = ConstructError::ConflictingOption {
            fields: vec!["certificateArn".into(), "autoCreateCertificate".into()],
        };
        assert_eq!(
            err.to_string(),
            "Conflicting options: certificateArn, autoCreateCertificate cannot be set together"
        );
        assert_eq!(err.fields(), vec!["certificateArn", "autoCreateCertificate"]);

        let err = ConstructError::missing_dependency(
            "autoCreateCertificate",
            &["hostedZoneId", "domainName"],
        );
        assert_eq!(
            err.to_string(),
            "autoCreateCertificate requires hostedZoneId or domainName"
        );
    }

    #[test]
    fn test_json_errors_map_to_deserialization() {
        let err: ConstructError = serde_json::from_str::<u32>("\"nope\"")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConstructError::Deserialization(_)));
    }
}
