// Copyright (c) 2025 - MV Consulting
//! Resource tags applied to every taggable resource of the server
//!
//! | Tag Key | Description |
//! |---------|-------------|
//! | `app` | Static identifier (`vscode-server`) |
//!
//! Caller supplied tags are merged over the defaults, so a caller can
//! override `app` as well.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{ConstructError, ConstructResult};

/// Tag key for application identification
pub const TAG_APP: &str = "app";

/// Tag value for application identification
pub const TAG_APP_VALUE: &str = "vscode-server";

/// Prefix reserved by AWS
const RESERVED_PREFIX: &str = "aws:";

const MAX_KEY_LENGTH: usize = 128;
const MAX_VALUE_LENGTH: usize = 256;

/// Ordered tag set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTags(BTreeMap<String, String>);

impl ResourceTags {
    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "additionalTags";

    /// Defaults merged with `additional`; entries in `additional` win
    pub fn merged(additional: &BTreeMap<String, String>) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert(TAG_APP.to_string(), TAG_APP_VALUE.to_string());
        tags.extend(additional.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(tags)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validate caller supplied tags
///
/// # Rules
/// - Key is 1..=128 characters and does not start with `aws:`
/// - Value is at most 256 characters
pub fn validate_tags(tags: &BTreeMap<String, String>) -> ConstructResult<()> {
    for (key, value) in tags {
        if key.is_empty() || key.chars().count() > MAX_KEY_LENGTH {
            return Err(ConstructError::invalid_option(
                ResourceTags::FIELD,
                key,
                "tag keys must be between 1 and 128 characters",
            ));
        }
        if key.to_ascii_lowercase().starts_with(RESERVED_PREFIX) {
            return Err(ConstructError::invalid_option(
                ResourceTags::FIELD,
                key,
                "the aws: prefix is reserved",
            ));
        }
        if value.chars().count() > MAX_VALUE_LENGTH {
            return Err(ConstructError::invalid_option(
                ResourceTags::FIELD,
                format!("{key}={value}"),
                "tag values must be at most 256 characters",
            ));
        }
    }
    Ok(())
}
