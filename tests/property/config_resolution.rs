// Copyright (c) 2025 - MV Consulting
//! Property-Based Tests for Configuration Resolution
//!
//! Properties verified:
//! - both certificate options set always conflicts
//! - auto-created certificates without zone and domain always miss a
//!   dependency
//! - idle timings without auto-stop are dropped rather than rejected
//! - unset fields take the documented default, set fields are kept
//! - resolving fully explicit props gives the same props back
//! - a resolved configuration survives a JSON round trip unchanged

use std::collections::BTreeMap;

use cdk_vscode_server::config::defaults::*;
use cdk_vscode_server::domain::{InstanceClass, InstanceSize, PolicyStatement};
use cdk_vscode_server::{
    resolve, ConstructError, LinuxArchitectureType, LinuxFlavorType, ResolvedServerConfig,
    VSCodeServerProps,
};
use proptest::prelude::*;
use proptest::sample::select;

// ============================================================================
// Strategies
// ============================================================================

fn architecture() -> impl Strategy<Value = LinuxArchitectureType> {
    select(LinuxArchitectureType::ALL.to_vec())
}

fn flavor() -> impl Strategy<Value = LinuxFlavorType> {
    select(LinuxFlavorType::ALL.to_vec())
}

fn instance_class() -> impl Strategy<Value = InstanceClass> {
    select(vec!["m7g", "m7i", "t3", "c6gn", "r7a", "g5"])
        .prop_map(|c| InstanceClass::new(c).expect("valid class"))
}

fn instance_size() -> impl Strategy<Value = InstanceSize> {
    select(vec!["medium", "large", "xlarge", "2xlarge", "16xlarge", "metal"])
        .prop_map(|s| InstanceSize::new(s).expect("valid size"))
}

fn home_folder() -> impl Strategy<Value = String> {
    "/[A-Za-z][A-Za-z0-9_-]{0,8}(/[a-z0-9_]{1,8}){0,2}"
}

fn policy() -> impl Strategy<Value = PolicyStatement> {
    (
        prop::collection::vec("[a-z0-9]{2,8}:[A-Z][A-Za-z]{0,15}", 1..3),
        prop::collection::vec("arn:aws:[a-z0-9]{2,8}:::[a-z0-9-]{1,12}", 1..3),
    )
        .prop_map(|(actions, resources)| PolicyStatement::allow(actions, resources))
}

fn tags() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z][a-z0-9-]{0,12}", "[A-Za-z0-9 ._-]{0,24}", 0..4)
}

/// Custom domain fields: (domainName, hostedZoneId, certificateArn, autoCreateCertificate)
type DomainFields = (Option<String>, Option<String>, Option<String>, Option<bool>);

fn domain_fields() -> impl Strategy<Value = DomainFields> {
    let domain = "[a-z]{1,10}\\.example\\.com";
    let zone = "Z[A-Z0-9]{6,20}";
    let arn = "arn:aws:acm:us-east-1:[0-9]{12}:certificate/[a-f0-9-]{8,36}";
    prop_oneof![
        Just::<DomainFields>((None, None, None, Some(false))),
        (domain, zone, arn).prop_map(|(d, z, a)| (Some(d), Some(z), Some(a), Some(false))),
        (domain, zone).prop_map(|(d, z)| (Some(d), Some(z), None, Some(true))),
    ]
}

/// Auto-stop fields: (enableAutoStop, idleTimeoutMinutes, idleCheckIntervalMinutes)
type AutoStopFields = (Option<bool>, Option<u32>, Option<u32>);

fn auto_stop_fields() -> impl Strategy<Value = AutoStopFields> {
    prop_oneof![
        Just::<AutoStopFields>((Some(false), None, None)),
        (1u32..=1440)
            .prop_flat_map(|timeout| (Just(timeout), 1..=timeout))
            .prop_map(|(timeout, interval)| (Some(true), Some(timeout), Some(interval))),
    ]
}

/// Props with every field the invariants allow set explicitly
fn explicit_props() -> impl Strategy<Value = VSCodeServerProps> {
    let shape = (
        architecture(),
        flavor(),
        instance_class(),
        instance_size(),
        8u32..=16_384,
        "[A-Za-z]([A-Za-z0-9-]{0,30}[A-Za-z0-9])?",
    );
    let paths = (
        home_folder(),
        "[a-z][a-z0-9-]{0,10}",
        1u16..=u16::MAX,
        "[a-z_][a-z0-9_-]{0,15}",
        "[A-Za-z0-9!@#%^*()_+=-]{1,24}",
    );
    let extras = (
        prop::collection::vec(policy(), 0..3),
        tags(),
        domain_fields(),
        auto_stop_fields(),
    );

    (shape, paths, extras).prop_map(
        |(
            (arch, flavor, class, size, volume, name),
            (home, base_path, port, user, password),
            (policies, tags, (domain, zone, arn, auto_cert), (auto_stop, timeout, interval)),
        )| VSCodeServerProps {
            vscode_user: Some(user),
            vscode_password: Some(password),
            instance_name: Some(name),
            instance_volume_size: Some(volume),
            instance_class: Some(class),
            instance_size: Some(size),
            instance_operating_system: Some(flavor),
            instance_cpu_architecture: Some(arch),
            home_folder: Some(home),
            dev_server_base_path: Some(base_path),
            dev_server_port: Some(port),
            additional_instance_role_policies: Some(policies),
            additional_tags: Some(tags),
            domain_name: domain,
            hosted_zone_id: zone,
            certificate_arn: arn,
            auto_create_certificate: auto_cert,
            enable_auto_stop: auto_stop,
            idle_timeout_minutes: timeout,
            idle_check_interval_minutes: interval,
        },
    )
}

/// Explicit props with an arbitrary subset of the simple fields cleared
fn partial_props() -> impl Strategy<Value = VSCodeServerProps> {
    (explicit_props(), prop::collection::vec(any::<bool>(), 8)).prop_map(|(mut props, clear)| {
        if clear[0] {
            props.instance_cpu_architecture = None;
        }
        if clear[1] {
            props.instance_operating_system = None;
        }
        if clear[2] {
            props.instance_volume_size = None;
        }
        if clear[3] {
            props.home_folder = None;
        }
        if clear[4] {
            props.dev_server_base_path = None;
        }
        if clear[5] {
            props.dev_server_port = None;
        }
        if clear[6] {
            props.vscode_user = None;
        }
        if clear[7] {
            props.vscode_password = None;
            props.instance_class = None;
            props.instance_size = None;
        }
        props
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_both_certificate_options_conflict(
        props in explicit_props(),
        arn in ".{0,40}",
    ) {
        let props = VSCodeServerProps {
            certificate_arn: Some(arn),
            auto_create_certificate: Some(true),
            ..props
        };
        let is_conflict = matches!(resolve(&props), Err(ConstructError::ConflictingOption { .. }));
        prop_assert!(is_conflict);
    }

    #[test]
    fn prop_auto_certificate_without_zone_or_domain_misses_dependency(props in explicit_props()) {
        let props = VSCodeServerProps {
            auto_create_certificate: Some(true),
            hosted_zone_id: None,
            domain_name: None,
            certificate_arn: None,
            ..props
        };
        prop_assert_eq!(
            resolve(&props).unwrap_err(),
            ConstructError::missing_dependency("autoCreateCertificate", &["hostedZoneId", "domainName"])
        );
    }

    #[test]
    fn prop_idle_timings_without_auto_stop_are_dropped(
        props in partial_props(),
        enable in prop_oneof![Just(None), Just(Some(false))],
        timeout in prop::option::of(any::<u32>()),
        interval in prop::option::of(any::<u32>()),
    ) {
        let props = VSCodeServerProps {
            enable_auto_stop: enable,
            idle_timeout_minutes: timeout,
            idle_check_interval_minutes: interval,
            ..props
        };
        let config = resolve(&props).unwrap();
        prop_assert_eq!(config.auto_stop(), None);

        let explicit = VSCodeServerProps::from(config);
        prop_assert_eq!(explicit.enable_auto_stop, Some(false));
        prop_assert_eq!(explicit.idle_timeout_minutes, None);
        prop_assert_eq!(explicit.idle_check_interval_minutes, None);
    }

    #[test]
    fn prop_unset_fields_take_defaults(props in partial_props()) {
        let config = resolve(&props).unwrap();

        prop_assert_eq!(
            config.cpu_architecture(),
            props.instance_cpu_architecture.unwrap_or(DEFAULT_ARCHITECTURE)
        );
        prop_assert_eq!(
            config.operating_system(),
            props.instance_operating_system.unwrap_or(DEFAULT_FLAVOR)
        );
        prop_assert_eq!(
            config.volume_size_gib(),
            props.instance_volume_size.unwrap_or(DEFAULT_INSTANCE_VOLUME_SIZE)
        );
        prop_assert_eq!(
            config.home_folder(),
            props.home_folder.as_deref().unwrap_or(DEFAULT_HOME_FOLDER)
        );
        prop_assert_eq!(
            config.dev_server_base_path(),
            props.dev_server_base_path.as_deref().unwrap_or(DEFAULT_DEV_SERVER_BASE_PATH)
        );
        prop_assert_eq!(
            config.dev_server_port(),
            props.dev_server_port.unwrap_or(DEFAULT_DEV_SERVER_PORT)
        );
        prop_assert_eq!(
            config.vscode_user(),
            props.vscode_user.as_deref().unwrap_or(DEFAULT_VSCODE_USER)
        );
        prop_assert_eq!(config.password().is_generated(), props.vscode_password.is_none());
        if props.instance_class.is_none() {
            prop_assert_eq!(config.instance_type().to_string(), "m7g.xlarge");
        }
    }

    #[test]
    fn prop_resolving_explicit_props_is_identity(props in explicit_props()) {
        let config = resolve(&props).unwrap();
        prop_assert_eq!(VSCodeServerProps::from(config), props);
    }

    #[test]
    fn prop_resolution_is_idempotent(props in partial_props()) {
        let once = resolve(&props).unwrap();
        let twice = resolve(&VSCodeServerProps::from(once.clone())).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_resolved_config_json_round_trip(props in partial_props()) {
        let config = resolve(&props).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let reparsed: ResolvedServerConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(reparsed, config);
    }
}

#[test]
fn test_empty_props_resolve_to_documented_defaults() {
    let config = resolve(&VSCodeServerProps::default()).unwrap();

    assert_eq!(config.cpu_architecture(), LinuxArchitectureType::Arm);
    assert_eq!(config.operating_system(), LinuxFlavorType::Ubuntu22);
    assert_eq!(config.volume_size_gib(), 40);
    assert_eq!(config.home_folder(), "/Workshop");
    assert_eq!(config.dev_server_base_path(), "app");
    assert_eq!(config.dev_server_port(), 8081);
    assert_eq!(config.vscode_user(), "participant");
}
