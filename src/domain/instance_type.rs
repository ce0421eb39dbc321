// Copyright (c) 2025 - MV Consulting
//! EC2 Instance Type Value Objects
//!
//! An instance type is a class (family + generation + attributes, e.g. `m7g`)
//! joined with a size (e.g. `xlarge`). Both halves are validated on
//! construction; the combined [`InstanceType`] renders as `m7g.xlarge`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LinuxArchitectureType;
use crate::errors::ConstructError;

/// Instance class such as `m7g`, `t3`, or `c6gn`
///
/// # Invariants
/// - 2 to 16 characters
/// - Starts with a lowercase letter
/// - Only lowercase letters, digits and hyphens
/// - Contains a generation digit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceClass(String);

impl InstanceClass {
    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "instanceClass";

    pub fn new(class: impl Into<String>) -> Result<Self, ConstructError> {
        let class = class.into();
        let invalid = |reason: &str| ConstructError::invalid_option(Self::FIELD, &class, reason);

        if class.len() < 2 || class.len() > 16 {
            return Err(invalid("must be between 2 and 16 characters"));
        }
        if !class.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(invalid("must start with a lowercase letter"));
        }
        if !class
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid("may only contain lowercase letters, digits and hyphens"));
        }
        if !class.chars().any(|c| c.is_ascii_digit()) {
            return Err(invalid("must contain a generation number"));
        }

        Ok(Self(class))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Architecture implied by the class attributes, if any
    ///
    /// Graviton classes carry a `g` in the attribute letters following the
    /// generation number (`m7g`, `c6gn`, `t4g`). A leading `g` is the GPU
    /// family and says nothing about the processor.
    pub fn implied_architecture(&self) -> Option<LinuxArchitectureType> {
        let attributes: String = self
            .0
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .skip_while(|c| c.is_ascii_digit())
            .take_while(|c| *c != '-')
            .collect();

        if attributes.contains('g') {
            Some(LinuxArchitectureType::Arm)
        } else if attributes.contains('a') || attributes.contains('i') {
            Some(LinuxArchitectureType::Amd64)
        } else {
            None
        }
    }
}

impl Default for InstanceClass {
    fn default() -> Self {
        Self("m7g".to_string())
    }
}

impl TryFrom<String> for InstanceClass {
    type Error = ConstructError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InstanceClass> for String {
    fn from(value: InstanceClass) -> Self {
        value.0
    }
}

impl fmt::Display for InstanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instance size such as `large`, `xlarge`, `4xlarge` or `metal`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceSize(String);

impl InstanceSize {
    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "instanceSize";

    const NAMED: [&'static str; 7] = ["nano", "micro", "small", "medium", "large", "xlarge", "metal"];

    pub fn new(size: impl Into<String>) -> Result<Self, ConstructError> {
        let size = size.into();

        if Self::NAMED.contains(&size.as_str())
            || Self::is_multiple(&size, "xlarge")
            || size
                .strip_prefix("metal-")
                .is_some_and(|rest| Self::is_multiple(rest, "xl"))
        {
            return Ok(Self(size));
        }

        Err(ConstructError::invalid_option(
            Self::FIELD,
            &size,
            "expected nano, micro, small, medium, large, xlarge, <N>xlarge, metal or metal-<N>xl",
        ))
    }

    /// `<N><suffix>` with N a number of at least 2 and no leading zero
    fn is_multiple(value: &str, suffix: &str) -> bool {
        value
            .strip_suffix(suffix)
            .filter(|n| !n.is_empty() && !n.starts_with('0'))
            .and_then(|n| n.parse::<u16>().ok())
            .is_some_and(|n| n >= 2)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for InstanceSize {
    fn default() -> Self {
        Self("xlarge".to_string())
    }
}

impl TryFrom<String> for InstanceSize {
    type Error = ConstructError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InstanceSize> for String {
    fn from(value: InstanceSize) -> Self {
        value.0
    }
}

impl fmt::Display for InstanceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full instance type, rendered as `<class>.<size>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct InstanceType {
    pub class: InstanceClass,
    pub size: InstanceSize,
}

impl InstanceType {
    pub fn of(class: InstanceClass, size: InstanceSize) -> Self {
        Self { class, size }
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.size)
    }
}
