// Copyright (c) 2025 - MV Consulting
//! CPU Architecture Option Type
//!
//! Closed set of processor architectures the server can run on. The
//! canonical literals (`ARM`, `AMD64`) are the only accepted spellings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConstructError;

/// The architecture of the cpu you want to run vscode server on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum LinuxArchitectureType {
    /// ARM architecture (Graviton)
    #[default]
    Arm,
    /// AMD64 architecture
    Amd64,
}

impl LinuxArchitectureType {
    /// Every member of the closed set
    pub const ALL: [LinuxArchitectureType; 2] = [Self::Arm, Self::Amd64];

    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "instanceCpuArchitecture";

    /// Canonical literal
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arm => "ARM",
            Self::Amd64 => "AMD64",
        }
    }

    /// Architecture segment of Canonical's SSM parameter paths
    pub fn ubuntu_path_segment(&self) -> &'static str {
        match self {
            Self::Arm => "arm64",
            Self::Amd64 => "amd64",
        }
    }

    /// Architecture suffix of Amazon Linux SSM parameter paths
    pub fn amazon_linux_suffix(&self) -> &'static str {
        match self {
            Self::Arm => "arm64",
            Self::Amd64 => "x86_64",
        }
    }
}

impl FromStr for LinuxArchitectureType {
    type Err = ConstructError;

    /// Exact, case-sensitive identity match against the closed set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| {
                ConstructError::invalid_option(Self::FIELD, s, "expected one of ARM, AMD64")
            })
    }
}

impl TryFrom<String> for LinuxArchitectureType {
    type Error = ConstructError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LinuxArchitectureType> for String {
    fn from(value: LinuxArchitectureType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LinuxArchitectureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
