// Copyright (c) 2025 - MV Consulting
//! Configuration resolver: defaults first, invariants second
//!
//! ```text
//! VSCodeServerProps ──cross-field checks──► defaults ──field checks──► ResolvedServerConfig
//! ```
//!
//! Cross-field rules run before any field is parsed so that a conflicting
//! or incomplete combination is reported as such even when one of the
//! involved values is also malformed.

use tracing::{debug, warn};

use crate::config::defaults::*;
use crate::config::props::VSCodeServerProps;
use crate::config::resolved::{
    AutoStop, CertificateSource, CustomDomain, HostedZoneSource, PasswordSource,
    ResolvedServerConfig,
};
use crate::config::validation::{self, ValidationResult};
use crate::domain::{tags, CertificateArn, DomainName, HostedZoneId, InstanceType};
use crate::errors::{ConstructError, ConstructResult};

/// Resolve a partially populated property bag into a full configuration
///
/// Pure: the input is not modified and no I/O happens. Explicitly set
/// fields are never overwritten, including `false` and zero values. Idle
/// timings given while auto-stop is off are dropped with a warning.
pub fn resolve(props: &VSCodeServerProps) -> ConstructResult<ResolvedServerConfig> {
    check_cross_field_invariants(props)?;

    let instance_name = props
        .instance_name
        .clone()
        .unwrap_or_else(|| DEFAULT_INSTANCE_NAME.to_string());
    validation::validate_instance_name(&instance_name)?;

    let cpu_architecture = props.instance_cpu_architecture.unwrap_or(DEFAULT_ARCHITECTURE);
    let operating_system = props.instance_operating_system.unwrap_or(DEFAULT_FLAVOR);

    let instance_type = InstanceType::of(
        props.instance_class.clone().unwrap_or_else(default_instance_class),
        props.instance_size.clone().unwrap_or_else(default_instance_size),
    );
    if let Some(message) = validation::architecture_mismatch(&instance_type.class, cpu_architecture)
    {
        warn!(instance_type = %instance_type, "{}", message);
    }

    let volume_size_gib = props.instance_volume_size.unwrap_or(DEFAULT_INSTANCE_VOLUME_SIZE);
    validation::validate_volume_size(volume_size_gib)?;

    let home_folder = props
        .home_folder
        .clone()
        .unwrap_or_else(|| DEFAULT_HOME_FOLDER.to_string());
    validation::validate_home_folder(&home_folder)?;

    let dev_server_base_path = props
        .dev_server_base_path
        .clone()
        .unwrap_or_else(|| DEFAULT_DEV_SERVER_BASE_PATH.to_string());
    validation::validate_dev_server_base_path(&dev_server_base_path)?;

    let dev_server_port = props.dev_server_port.unwrap_or(DEFAULT_DEV_SERVER_PORT);
    validation::validate_dev_server_port(dev_server_port)?;

    let vscode_user = props
        .vscode_user
        .clone()
        .unwrap_or_else(|| DEFAULT_VSCODE_USER.to_string());
    validation::validate_vscode_user(&vscode_user)?;

    // An empty password means "generate one", same as an absent one.
    let password = match props.vscode_password.as_deref() {
        None | Some("") => PasswordSource::Generate,
        Some(password) => {
            validation::validate_vscode_password(password)?;
            PasswordSource::Explicit(password.to_string())
        }
    };

    let additional_policies = props
        .additional_instance_role_policies
        .clone()
        .unwrap_or_default();
    for (index, statement) in additional_policies.iter().enumerate() {
        statement.validate(index)?;
    }

    let additional_tags = props.additional_tags.clone().unwrap_or_default();
    tags::validate_tags(&additional_tags)?;

    let domain = resolve_domain(props)?;
    let auto_stop = resolve_auto_stop(props)?;

    let config = ResolvedServerConfig {
        instance_name,
        cpu_architecture,
        operating_system,
        instance_type,
        volume_size_gib,
        home_folder,
        dev_server_base_path,
        dev_server_port,
        vscode_user,
        password,
        domain,
        additional_policies,
        additional_tags,
        auto_stop,
    };

    debug!(
        instance_type = %config.instance_type,
        architecture = %config.cpu_architecture,
        flavor = %config.operating_system,
        custom_domain = config.domain.is_some(),
        auto_stop = config.auto_stop.is_some(),
        generated_password = config.password.is_generated(),
        "Resolved VS Code server configuration"
    );

    Ok(config)
}

/// Cross-field rules in reporting order
fn check_cross_field_invariants(props: &VSCodeServerProps) -> ValidationResult {
    validation::validate_certificate_exclusivity(props)?;
    validation::validate_auto_certificate_dependency(props)?;
    validation::validate_domain_dependencies(props)
}

fn resolve_domain(props: &VSCodeServerProps) -> ConstructResult<Option<CustomDomain>> {
    let Some(raw_domain) = props.domain_name.as_deref() else {
        return Ok(None);
    };

    let domain_name = DomainName::new(raw_domain).map_err(|e| {
        ConstructError::invalid_option(DomainName::FIELD, raw_domain, e.to_string())
    })?;

    let hosted_zone = match props.hosted_zone_id.as_deref() {
        Some(id) => HostedZoneSource::Id(HostedZoneId::new(id)?),
        None => HostedZoneSource::LookupByDomain,
    };

    let certificate = match props.certificate_arn.as_deref() {
        Some(arn) => CertificateSource::Existing(CertificateArn::new(arn)?),
        None => CertificateSource::AutoCreate,
    };

    Ok(Some(CustomDomain {
        domain_name,
        hosted_zone,
        certificate,
    }))
}

fn resolve_auto_stop(props: &VSCodeServerProps) -> ConstructResult<Option<AutoStop>> {
    if props.enable_auto_stop != Some(true) {
        if let Some(message) = validation::ignored_idle_timings(props) {
            warn!("{}", message);
        }
        return Ok(None);
    }

    let idle_timeout_minutes = props
        .idle_timeout_minutes
        .unwrap_or(DEFAULT_IDLE_TIMEOUT_MINUTES);
    let check_interval_minutes = props
        .idle_check_interval_minutes
        .unwrap_or(DEFAULT_IDLE_CHECK_INTERVAL_MINUTES);
    validation::validate_auto_stop_timings(idle_timeout_minutes, check_interval_minutes)?;

    Ok(Some(AutoStop {
        idle_timeout_minutes,
        check_interval_minutes,
    }))
}
