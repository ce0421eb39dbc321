// Copyright (c) 2025 - MV Consulting
//! Fully resolved server configuration
//!
//! A [`ResolvedServerConfig`] can only be obtained through
//! [`crate::config::resolve`] (or by deserializing, which runs the same
//! resolver), so holding one means every default has been applied and every
//! invariant holds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::props::VSCodeServerProps;
use crate::domain::{
    ami_ssm_parameter, CertificateArn, DomainName, HostedZoneId, InstallerKind, InstanceType,
    LinuxArchitectureType, LinuxFlavorType, PolicyStatement, ResourceTags,
};
use crate::errors::ConstructError;

/// Where the login password comes from
#[derive(Clone, PartialEq, Eq)]
pub enum PasswordSource {
    /// Caller supplied password
    Explicit(String),
    /// Generated by the construction engine's credential step
    Generate,
}

impl PasswordSource {
    pub fn is_generated(&self) -> bool {
        matches!(self, PasswordSource::Generate)
    }

    pub fn explicit(&self) -> Option<&str> {
        match self {
            PasswordSource::Explicit(password) => Some(password),
            PasswordSource::Generate => None,
        }
    }
}

impl fmt::Debug for PasswordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordSource::Explicit(_) => f.write_str("Explicit(<redacted>)"),
            PasswordSource::Generate => f.write_str("Generate"),
        }
    }
}

/// How the Route53 zone of a custom domain is found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostedZoneSource {
    /// Zone given by id
    Id(HostedZoneId),
    /// Zone looked up by the domain name at synthesis time
    LookupByDomain,
}

/// Viewer certificate of a custom domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateSource {
    /// Existing ACM certificate
    Existing(CertificateArn),
    /// DNS validated certificate created in us-east-1
    AutoCreate,
}

/// Custom domain in front of the CloudFront distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomDomain {
    pub domain_name: DomainName,
    pub hosted_zone: HostedZoneSource,
    pub certificate: CertificateSource,
}

/// Idle auto-stop timings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoStop {
    pub idle_timeout_minutes: u32,
    pub check_interval_minutes: u32,
}

/// Fully populated, validated server configuration
///
/// Serializes as the equivalent fully explicit [`VSCodeServerProps`] and
/// deserializes through the resolver, so a serialized config re-parses to
/// an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VSCodeServerProps", into = "VSCodeServerProps")]
pub struct ResolvedServerConfig {
    pub(crate) instance_name: String,
    pub(crate) cpu_architecture: LinuxArchitectureType,
    pub(crate) operating_system: LinuxFlavorType,
    pub(crate) instance_type: InstanceType,
    pub(crate) volume_size_gib: u32,
    pub(crate) home_folder: String,
    pub(crate) dev_server_base_path: String,
    pub(crate) dev_server_port: u16,
    pub(crate) vscode_user: String,
    pub(crate) password: PasswordSource,
    pub(crate) domain: Option<CustomDomain>,
    pub(crate) additional_policies: Vec<PolicyStatement>,
    pub(crate) additional_tags: BTreeMap<String, String>,
    pub(crate) auto_stop: Option<AutoStop>,
}

impl ResolvedServerConfig {
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn cpu_architecture(&self) -> LinuxArchitectureType {
        self.cpu_architecture
    }

    pub fn operating_system(&self) -> LinuxFlavorType {
        self.operating_system
    }

    pub fn instance_type(&self) -> &InstanceType {
        &self.instance_type
    }

    pub fn volume_size_gib(&self) -> u32 {
        self.volume_size_gib
    }

    pub fn home_folder(&self) -> &str {
        &self.home_folder
    }

    pub fn dev_server_base_path(&self) -> &str {
        &self.dev_server_base_path
    }

    pub fn dev_server_port(&self) -> u16 {
        self.dev_server_port
    }

    pub fn vscode_user(&self) -> &str {
        &self.vscode_user
    }

    pub fn password(&self) -> &PasswordSource {
        &self.password
    }

    pub fn domain(&self) -> Option<&CustomDomain> {
        self.domain.as_ref()
    }

    pub fn additional_policies(&self) -> &[PolicyStatement] {
        &self.additional_policies
    }

    pub fn additional_tags(&self) -> &BTreeMap<String, String> {
        &self.additional_tags
    }

    /// Default tags merged with the caller's tags
    pub fn tags(&self) -> ResourceTags {
        ResourceTags::merged(&self.additional_tags)
    }

    pub fn auto_stop(&self) -> Option<AutoStop> {
        self.auto_stop
    }

    /// SSM parameter of the AMI for the chosen architecture and flavor
    pub fn ami_parameter(&self) -> String {
        ami_ssm_parameter(self.cpu_architecture, self.operating_system)
    }

    pub fn installer(&self) -> InstallerKind {
        self.operating_system.installer()
    }
}

impl From<ResolvedServerConfig> for VSCodeServerProps {
    /// The fully explicit property bag equivalent to a resolved config
    fn from(config: ResolvedServerConfig) -> Self {
        let (domain_name, hosted_zone_id, certificate_arn, auto_create_certificate) =
            match config.domain {
                Some(domain) => {
                    let zone = match domain.hosted_zone {
                        HostedZoneSource::Id(id) => Some(id.into()),
                        HostedZoneSource::LookupByDomain => None,
                    };
                    let (arn, auto) = match domain.certificate {
                        CertificateSource::Existing(arn) => (Some(arn.into()), false),
                        CertificateSource::AutoCreate => (None, true),
                    };
                    (Some(domain.domain_name.into()), zone, arn, auto)
                }
                None => (None, None, None, false),
            };

        let (idle_timeout_minutes, idle_check_interval_minutes) = match config.auto_stop {
            Some(auto_stop) => (
                Some(auto_stop.idle_timeout_minutes),
                Some(auto_stop.check_interval_minutes),
            ),
            None => (None, None),
        };

        VSCodeServerProps {
            vscode_user: Some(config.vscode_user),
            vscode_password: match config.password {
                PasswordSource::Explicit(password) => Some(password),
                PasswordSource::Generate => None,
            },
            instance_name: Some(config.instance_name),
            instance_volume_size: Some(config.volume_size_gib),
            instance_class: Some(config.instance_type.class),
            instance_size: Some(config.instance_type.size),
            instance_operating_system: Some(config.operating_system),
            instance_cpu_architecture: Some(config.cpu_architecture),
            home_folder: Some(config.home_folder),
            dev_server_base_path: Some(config.dev_server_base_path),
            dev_server_port: Some(config.dev_server_port),
            additional_instance_role_policies: Some(config.additional_policies),
            additional_tags: Some(config.additional_tags),
            domain_name,
            hosted_zone_id,
            certificate_arn,
            auto_create_certificate: Some(auto_create_certificate),
            enable_auto_stop: Some(config.auto_stop.is_some()),
            idle_timeout_minutes,
            idle_check_interval_minutes,
        }
    }
}

impl TryFrom<VSCodeServerProps> for ResolvedServerConfig {
    type Error = ConstructError;

    fn try_from(props: VSCodeServerProps) -> Result<Self, Self::Error> {
        crate::config::resolve(&props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_debug_is_redacted() {
        let source = PasswordSource::Explicit("hunter2".into());
        let rendered = format!("{source:?}");
        assert!(!rendered.contains("hunter2"));
        assert_eq!(rendered, "Explicit(<redacted>)");
        assert_eq!(source.explicit(), Some("hunter2"));
        assert!(PasswordSource::Generate.is_generated());
    }
}
