// Copyright (c) 2025 - MV Consulting
//! Pure Validation Functions - Configuration Invariants
//!
//! All functions are pure (no I/O, no mutation) and report the offending
//! field names in their errors.
//!
//! # Invariant Categories
//!
//! 1. **Cross-field invariants**: certificate and domain combinations
//! 2. **Field invariants**: paths, user names, ports, sizes, auto-stop
//!    timings
//! 3. **Advisory checks**: legal but suspicious combinations, reported as
//!    warnings rather than errors

use crate::config::props::VSCodeServerProps;
use crate::domain::{InstanceClass, LinuxArchitectureType};
use crate::errors::{ConstructError, ConstructResult};

/// Validation result with detailed error information
pub type ValidationResult = ConstructResult<()>;

/// Smallest root volume the supported AMIs boot from
pub const MIN_VOLUME_SIZE_GIB: u32 = 8;

/// Largest gp3 volume
pub const MAX_VOLUME_SIZE_GIB: u32 = 16_384;

/// Maximum length of a hostname label
pub const MAX_INSTANCE_NAME_LENGTH: usize = 63;

/// Maximum Linux user name length
pub const MAX_USER_LENGTH: usize = 32;

/// Characters that break double-quoted shell strings or enable injection
/// when interpolated into user data or installer scripts
const SHELL_FORBIDDEN: &[char] = &['"', '\'', '\\', '`', '$', ';', '&', '|', '<', '>', '\n', '\r'];

/// Validate certificate options are not contradictory
///
/// # Rules
/// - `certificateArn` and `autoCreateCertificate=true` are mutually exclusive
pub fn validate_certificate_exclusivity(props: &VSCodeServerProps) -> ValidationResult {
    if props.certificate_arn.is_some() && props.auto_create_certificate == Some(true) {
        return Err(ConstructError::ConflictingOption {
            fields: vec!["certificateArn".to_string(), "autoCreateCertificate".to_string()],
        });
    }
    Ok(())
}

/// Validate an auto-created certificate can be DNS validated
///
/// # Rules
/// - `autoCreateCertificate=true` needs `hostedZoneId` or `domainName`
pub fn validate_auto_certificate_dependency(props: &VSCodeServerProps) -> ValidationResult {
    if props.auto_create_certificate == Some(true)
        && props.hosted_zone_id.is_none()
        && props.domain_name.is_none()
    {
        return Err(ConstructError::missing_dependency(
            "autoCreateCertificate",
            &["hostedZoneId", "domainName"],
        ));
    }
    Ok(())
}

/// Validate the custom domain options form a complete set
///
/// # Rules
/// - `hostedZoneId`, `certificateArn` and `autoCreateCertificate=true` are
///   only meaningful with `domainName`
/// - `domainName` needs a certificate, either `certificateArn` or
///   `autoCreateCertificate=true`
pub fn validate_domain_dependencies(props: &VSCodeServerProps) -> ValidationResult {
    if props.domain_name.is_none() {
        let dangling = [
            ("hostedZoneId", props.hosted_zone_id.is_some()),
            ("certificateArn", props.certificate_arn.is_some()),
            ("autoCreateCertificate", props.auto_create_certificate == Some(true)),
        ];
        if let Some((field, _)) = dangling.iter().find(|(_, set)| *set) {
            return Err(ConstructError::missing_dependency(*field, &["domainName"]));
        }
        return Ok(());
    }

    if props.certificate_arn.is_none() && props.auto_create_certificate != Some(true) {
        return Err(ConstructError::missing_dependency(
            "domainName",
            &["certificateArn", "autoCreateCertificate"],
        ));
    }

    Ok(())
}

/// Validate auto-stop timings
///
/// # Rules
/// - Interval is at least one minute
/// - Interval does not exceed the idle timeout
pub fn validate_auto_stop_timings(idle_timeout: u32, check_interval: u32) -> ValidationResult {
    if check_interval == 0 {
        return Err(ConstructError::invalid_option(
            "idleCheckIntervalMinutes",
            check_interval.to_string(),
            "must be at least one minute",
        ));
    }
    if check_interval > idle_timeout {
        return Err(ConstructError::invalid_option(
            "idleCheckIntervalMinutes",
            check_interval.to_string(),
            format!("must not exceed idleTimeoutMinutes ({idle_timeout})"),
        ));
    }
    Ok(())
}

/// Validate a value can be interpolated into a shell script
pub fn validate_shell_safe(field: &str, value: &str) -> ValidationResult {
    if value.is_empty() {
        return Err(ConstructError::invalid_option(field, value, "cannot be empty"));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| SHELL_FORBIDDEN.contains(c) || c.is_whitespace())
    {
        return Err(ConstructError::invalid_option(
            field,
            value,
            format!("contains forbidden character {bad:?}"),
        ));
    }
    Ok(())
}

/// Validate the EC2 instance name
///
/// The name is also written to cloud-init as the hostname.
///
/// # Rules
/// - 1..=63 characters
/// - ASCII letters, digits and hyphens only
/// - No leading or trailing hyphen
pub fn validate_instance_name(name: &str) -> ValidationResult {
    let invalid = |reason: &str| ConstructError::invalid_option("instanceName", name, reason);

    if name.is_empty() || name.len() > MAX_INSTANCE_NAME_LENGTH {
        return Err(invalid("must be between 1 and 63 characters"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid("may only contain letters, digits and -"));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("must not start or end with -"));
    }
    Ok(())
}

/// Validate the root volume size
pub fn validate_volume_size(size_gib: u32) -> ValidationResult {
    if !(MIN_VOLUME_SIZE_GIB..=MAX_VOLUME_SIZE_GIB).contains(&size_gib) {
        return Err(ConstructError::invalid_option(
            "instanceVolumeSize",
            size_gib.to_string(),
            format!("must be between {MIN_VOLUME_SIZE_GIB} and {MAX_VOLUME_SIZE_GIB} GiB"),
        ));
    }
    Ok(())
}

/// Validate the dev server port
pub fn validate_dev_server_port(port: u16) -> ValidationResult {
    if port == 0 {
        return Err(ConstructError::invalid_option(
            "devServerPort",
            "0",
            "must be a non-zero port",
        ));
    }
    Ok(())
}

/// Validate the home folder
///
/// # Rules
/// - Absolute path
/// - Shell safe
/// - No `..` components
pub fn validate_home_folder(folder: &str) -> ValidationResult {
    validate_shell_safe("homeFolder", folder)?;
    if !folder.starts_with('/') {
        return Err(ConstructError::invalid_option(
            "homeFolder",
            folder,
            "must be an absolute path",
        ));
    }
    if folder.split('/').any(|part| part == "..") {
        return Err(ConstructError::invalid_option(
            "homeFolder",
            folder,
            "must not contain .. components",
        ));
    }
    Ok(())
}

/// Validate the dev server base path
///
/// # Rules
/// - Shell safe and non-empty
/// - No leading or trailing slash (the Nginx location adds them)
pub fn validate_dev_server_base_path(path: &str) -> ValidationResult {
    validate_shell_safe("devServerBasePath", path)?;
    if path.starts_with('/') || path.ends_with('/') {
        return Err(ConstructError::invalid_option(
            "devServerBasePath",
            path,
            "must not start or end with a slash",
        ));
    }
    Ok(())
}

/// Validate the login user is a portable Linux user name
///
/// # Rules
/// - 1..=32 characters
/// - Starts with a lowercase letter or underscore
/// - Lowercase letters, digits, underscores and hyphens only
pub fn validate_vscode_user(user: &str) -> ValidationResult {
    let invalid = |reason: &str| ConstructError::invalid_option("vscodeUser", user, reason);

    if user.is_empty() || user.len() > MAX_USER_LENGTH {
        return Err(invalid("must be between 1 and 32 characters"));
    }
    if !user.starts_with(|c: char| c.is_ascii_lowercase() || c == '_') {
        return Err(invalid("must start with a lowercase letter or underscore"));
    }
    if !user
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(invalid("may only contain lowercase letters, digits, _ and -"));
    }
    Ok(())
}

/// Validate an explicit password
pub fn validate_vscode_password(password: &str) -> ValidationResult {
    if password.chars().any(|c| c.is_control()) {
        return Err(ConstructError::invalid_option(
            "vscodePassword",
            "<redacted>",
            "must not contain control characters",
        ));
    }
    Ok(())
}

/// Advisory check for idle timings given while auto-stop is off
///
/// The timings are ignored in that case, so a warning is enough.
pub fn ignored_idle_timings(props: &VSCodeServerProps) -> Option<String> {
    if props.enable_auto_stop == Some(true) {
        return None;
    }
    let set: Vec<&str> = [
        ("idleTimeoutMinutes", props.idle_timeout_minutes.is_some()),
        ("idleCheckIntervalMinutes", props.idle_check_interval_minutes.is_some()),
    ]
    .into_iter()
    .filter_map(|(field, is_set)| is_set.then_some(field))
    .collect();

    if set.is_empty() {
        return None;
    }
    Some(format!("{} ignored because enableAutoStop is not true", set.join(" and ")))
}

/// Advisory check that the instance class can boot the chosen architecture
///
/// Returns a warning message instead of an error: the heuristic only looks
/// at the class attribute letters and cannot be authoritative.
pub fn architecture_mismatch(
    class: &InstanceClass,
    arch: LinuxArchitectureType,
) -> Option<String> {
    match class.implied_architecture() {
        Some(implied) if implied != arch => Some(format!(
            "instance class {class} looks like a {implied} class but {arch} images were requested"
        )),
        _ => None,
    }
}
