// Copyright (c) 2025 - MV Consulting
//! Server Domain Models
//!
//! Value objects describing the shape of a VS Code server deployment. Every
//! value object validates its invariants on construction, so a value that
//! exists is a value that is legal.
//!
//! # Closed Option Sets
//!
//! - [`LinuxArchitectureType`] - `ARM` | `AMD64`
//! - [`LinuxFlavorType`] - `UBUNTU_22` | `UBUNTU_24` | `AMAZON_LINUX_2023`
//!
//! # Value Objects with Invariants
//!
//! - [`InstanceClass`] / [`InstanceSize`] - EC2 instance type halves
//! - [`DomainName`] - RFC 1123 custom domain
//! - [`HostedZoneId`] - Route53 zone id
//! - [`CertificateArn`] - ACM certificate in `us-east-1`
//! - [`PolicyStatement`] - IAM statement for the instance role
//! - [`ResourceTags`] - default + caller tags

pub mod architecture;
pub mod certificate;
pub mod domain_name;
pub mod flavor;
pub mod hosted_zone;
pub mod instance_type;
pub mod mappings;
pub mod policy;
pub mod tags;

pub use architecture::LinuxArchitectureType;
pub use certificate::CertificateArn;
pub use domain_name::{DomainName, DomainNameError};
pub use flavor::{InstallerKind, LinuxFlavorType};
pub use hosted_zone::HostedZoneId;
pub use instance_type::{InstanceClass, InstanceSize, InstanceType};
pub use mappings::ami_ssm_parameter;
pub use policy::{Effect, PolicyStatement};
pub use tags::ResourceTags;
