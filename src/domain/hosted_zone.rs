// Copyright (c) 2025 - MV Consulting
//! Route53 Hosted Zone Identifier

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConstructError;

/// Route53 hosted zone id such as `Z0123456789ABCDEFGHIJ`
///
/// Only the bare id is accepted; the `/hostedzone/` path form returned by
/// some API calls must be stripped by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostedZoneId(String);

impl HostedZoneId {
    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "hostedZoneId";

    pub const MAX_LENGTH: usize = 32;

    pub fn new(id: impl Into<String>) -> Result<Self, ConstructError> {
        let id = id.into();

        if id.starts_with("/hostedzone/") {
            return Err(ConstructError::invalid_option(
                Self::FIELD,
                &id,
                "use the bare zone id without the /hostedzone/ prefix",
            ));
        }
        if id.is_empty() || id.len() > Self::MAX_LENGTH {
            return Err(ConstructError::invalid_option(
                Self::FIELD,
                &id,
                "must be between 1 and 32 characters",
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(ConstructError::invalid_option(
                Self::FIELD,
                &id,
                "may only contain uppercase letters and digits",
            ));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HostedZoneId {
    type Error = ConstructError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HostedZoneId> for String {
    fn from(value: HostedZoneId) -> Self {
        value.0
    }
}

impl fmt::Display for HostedZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
