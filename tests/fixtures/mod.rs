// Copyright (c) 2025 - MV Consulting
//! Test Fixtures for cdk-vscode-server
//!
//! Deterministic property bags shared by the integration tests.
//!
//! # Design Principles
//! - All values are fixed constants so failures are reproducible
//! - Every fixture resolves successfully unless its name says otherwise

#![allow(dead_code)]

use std::collections::BTreeMap;

use cdk_vscode_server::domain::{Effect, InstanceClass, InstanceSize, PolicyStatement};
use cdk_vscode_server::{LinuxArchitectureType, LinuxFlavorType, VSCodeServerProps};

pub const STACK_NAME: &str = "workshop-stack";
pub const CONSTRUCT_ID: &str = "vscode";

pub const DOMAIN_NAME: &str = "ide.example.com";
pub const HOSTED_ZONE_ID: &str = "Z0123456789ABCDEFGHIJ";
pub const CERTIFICATE_ARN: &str =
    "arn:aws:acm:us-east-1:123456789012:certificate/0b5c1f2e-6f7a-4b8c-9d0e-1f2a3b4c5d6e";
pub const PASSWORD: &str = "correct-horse-battery-staple";

/// Statement granting read access to one bucket
pub fn bucket_read_policy() -> PolicyStatement {
    PolicyStatement::allow(
        ["s3:GetObject", "s3:ListBucket"],
        [
            "arn:aws:s3:::workshop-assets",
            "arn:aws:s3:::workshop-assets/*",
        ],
    )
    .with_sid("WorkshopAssets")
    .with_effect(Effect::Allow)
}

/// Every field set explicitly, auto-stop and an existing certificate
pub fn fully_populated_props() -> VSCodeServerProps {
    VSCodeServerProps {
        vscode_user: Some("builder".into()),
        vscode_password: Some(PASSWORD.into()),
        instance_name: Some("WorkshopIde".into()),
        instance_volume_size: Some(100),
        instance_class: Some(InstanceClass::new("m7i").expect("Invalid instance class")),
        instance_size: Some(InstanceSize::new("2xlarge").expect("Invalid instance size")),
        instance_operating_system: Some(LinuxFlavorType::AmazonLinux2023),
        instance_cpu_architecture: Some(LinuxArchitectureType::Amd64),
        home_folder: Some("/home/builder/workspace".into()),
        dev_server_base_path: Some("preview".into()),
        dev_server_port: Some(3000),
        additional_instance_role_policies: Some(vec![bucket_read_policy()]),
        additional_tags: Some(BTreeMap::from([
            ("team".to_string(), "platform".to_string()),
            ("app".to_string(), "workshop-ide".to_string()),
        ])),
        domain_name: Some(DOMAIN_NAME.into()),
        hosted_zone_id: Some(HOSTED_ZONE_ID.into()),
        certificate_arn: Some(CERTIFICATE_ARN.into()),
        auto_create_certificate: Some(false),
        enable_auto_stop: Some(true),
        idle_timeout_minutes: Some(45),
        idle_check_interval_minutes: Some(10),
    }
}

/// Custom domain with an auto-created certificate and zone lookup
pub fn auto_certificate_props() -> VSCodeServerProps {
    VSCodeServerProps::default().with_auto_certificate(DOMAIN_NAME, None)
}

/// Custom domain with an existing certificate
pub fn existing_certificate_props() -> VSCodeServerProps {
    VSCodeServerProps::default().with_existing_certificate(DOMAIN_NAME, CERTIFICATE_ARN)
}

/// Both certificate options set (does not resolve)
pub fn conflicting_certificate_props() -> VSCodeServerProps {
    VSCodeServerProps {
        domain_name: Some(DOMAIN_NAME.into()),
        certificate_arn: Some(CERTIFICATE_ARN.into()),
        auto_create_certificate: Some(true),
        ..Default::default()
    }
}
