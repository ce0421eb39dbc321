// Copyright (c) 2025 - MV Consulting
//! Partially specified server configuration (the property bag)
//!
//! Every field is optional. Absent fields are filled with the documented
//! defaults by [`crate::config::resolve`]; nothing here is ever read
//! directly by the construct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::resolved::ResolvedServerConfig;
use crate::domain::{
    InstanceClass, InstanceSize, LinuxArchitectureType, LinuxFlavorType, PolicyStatement,
};
use crate::errors::ConstructResult;

/// Properties for the VSCodeServer construct
///
/// Field names serialize in camelCase (`instanceCpuArchitecture`,
/// `devServerPort`, ...). Unknown fields are rejected so typos surface
/// instead of silently falling back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VSCodeServerProps {
    /// UserName for VSCode Server (default `participant`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vscode_user: Option<String>,

    /// Password for VSCode Server (default: generated)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vscode_password: Option<String>,

    /// EC2 instance name (default `VSCodeServer`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_name: Option<String>,

    /// Root volume size in GiB (default 40)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_volume_size: Option<u32>,

    /// Instance class (default `m7g`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_class: Option<InstanceClass>,

    /// Instance size (default `xlarge`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_size: Option<InstanceSize>,

    /// Operating system (default `UBUNTU_22`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_operating_system: Option<LinuxFlavorType>,

    /// CPU architecture (default `ARM`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub instance_cpu_architecture: Option<LinuxArchitectureType>,

    /// Folder to open in VS Code server (default `/Workshop`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub home_folder: Option<String>,

    /// Base path of the dev server in the Nginx site (default `app`)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dev_server_base_path: Option<String>,

    /// Port of the dev server (default 8081)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dev_server_port: Option<u16>,

    /// Extra statements for the instance role (default none)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub additional_instance_role_policies: Option<Vec<PolicyStatement>>,

    /// Extra tags for the instance (default none)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub additional_tags: Option<BTreeMap<String, String>>,

    /// Custom domain; uses the distribution domain when unset
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub domain_name: Option<String>,

    /// Route53 zone of the custom domain; looked up by name when unset
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hosted_zone_id: Option<String>,

    /// Existing ACM certificate in us-east-1
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub certificate_arn: Option<String>,

    /// Create a DNS validated certificate in us-east-1 (default false)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub auto_create_certificate: Option<bool>,

    /// Stop the instance when idle (default false)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub enable_auto_stop: Option<bool>,

    /// Minutes of inactivity before stopping (default 30)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub idle_timeout_minutes: Option<u32>,

    /// Minutes between idle checks (default 5)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub idle_check_interval_minutes: Option<u32>,
}

impl VSCodeServerProps {
    /// Resolve defaults and check invariants
    pub fn resolve(&self) -> ConstructResult<ResolvedServerConfig> {
        crate::config::resolve(self)
    }

    /// Configure a custom domain backed by an existing certificate
    pub fn with_existing_certificate(
        mut self,
        domain_name: impl Into<String>,
        certificate_arn: impl Into<String>,
    ) -> Self {
        self.domain_name = Some(domain_name.into());
        self.certificate_arn = Some(certificate_arn.into());
        self
    }

    /// Configure a custom domain with an auto-created certificate
    pub fn with_auto_certificate(
        mut self,
        domain_name: impl Into<String>,
        hosted_zone_id: Option<String>,
    ) -> Self {
        self.domain_name = Some(domain_name.into());
        self.hosted_zone_id = hosted_zone_id;
        self.auto_create_certificate = Some(true);
        self
    }

    /// Enable idle auto-stop with the default timings
    pub fn with_auto_stop(mut self) -> Self {
        self.enable_auto_stop = Some(true);
        self
    }
}
