// Copyright (c) 2025 - MV Consulting
//! Linux Flavor Option Type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConstructError;

/// The flavor of linux you want to run vscode server on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum LinuxFlavorType {
    /// Ubuntu 22.04 (Jammy)
    #[default]
    Ubuntu22,
    /// Ubuntu 24.04 (Noble)
    Ubuntu24,
    /// Amazon Linux 2023
    AmazonLinux2023,
}

/// Which installer document provisions the server for a flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallerKind {
    /// apt based install
    Ubuntu,
    /// dnf based install
    AmazonLinux2023,
}

impl LinuxFlavorType {
    /// Every member of the closed set
    pub const ALL: [LinuxFlavorType; 3] = [Self::Ubuntu22, Self::Ubuntu24, Self::AmazonLinux2023];

    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "instanceOperatingSystem";

    /// Canonical literal
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ubuntu22 => "UBUNTU_22",
            Self::Ubuntu24 => "UBUNTU_24",
            Self::AmazonLinux2023 => "AMAZON_LINUX_2023",
        }
    }

    /// Installer used to set up VS Code server on this flavor
    pub fn installer(&self) -> InstallerKind {
        match self {
            Self::Ubuntu22 | Self::Ubuntu24 => InstallerKind::Ubuntu,
            Self::AmazonLinux2023 => InstallerKind::AmazonLinux2023,
        }
    }
}

impl FromStr for LinuxFlavorType {
    type Err = ConstructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flavor| flavor.as_str() == s)
            .ok_or_else(|| {
                ConstructError::invalid_option(
                    Self::FIELD,
                    s,
                    "expected one of UBUNTU_22, UBUNTU_24, AMAZON_LINUX_2023",
                )
            })
    }
}

impl TryFrom<String> for LinuxFlavorType {
    type Error = ConstructError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LinuxFlavorType> for String {
    fn from(value: LinuxFlavorType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LinuxFlavorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
