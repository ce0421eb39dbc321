// Copyright (c) 2025 - MV Consulting
//! Process-wide type registration table
//!
//! Engines address the construct and its option types by fully qualified
//! name (`@mavogel/cdk-vscode-server.VSCodeServer`). The table describing
//! those names is built exactly once per process; concurrent and repeated
//! [`initialize`] calls are safe and return the same table.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use serde::Serialize;
use tracing::info;

use crate::config::defaults::*;
use crate::domain::{LinuxArchitectureType, LinuxFlavorType};

/// Namespace every registered type lives in
pub const NAMESPACE: &str = "@mavogel/cdk-vscode-server";

/// Fully qualified name of the construct
pub const VSCODE_SERVER_FQN: &str = "@mavogel/cdk-vscode-server.VSCodeServer";

/// Fully qualified name of the property bag
pub const VSCODE_SERVER_PROPS_FQN: &str = "@mavogel/cdk-vscode-server.VSCodeServerProps";

/// Fully qualified name of the architecture enum
pub const LINUX_ARCHITECTURE_TYPE_FQN: &str = "@mavogel/cdk-vscode-server.LinuxArchitectureType";

/// Fully qualified name of the flavor enum
pub const LINUX_FLAVOR_TYPE_FQN: &str = "@mavogel/cdk-vscode-server.LinuxFlavorType";

static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
static INIT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Kind of registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Enum,
    Struct,
}

/// One field of a registered struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub type_name: &'static str,
    pub optional: bool,
    /// Documented default, `None` when the field stays unset
    pub default: Option<String>,
}

impl FieldSpec {
    fn optional(name: &'static str, type_name: &'static str, default: Option<String>) -> Self {
        Self {
            name,
            type_name,
            optional: true,
            default,
        }
    }
}

/// Registration record of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeEntry {
    pub fqn: &'static str,
    pub kind: TypeKind,
    /// Enum literals, class properties and methods
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<&'static str>,
    /// Struct fields
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldSpec>,
}

/// Table of every type engines may address by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRegistry {
    entries: BTreeMap<&'static str, TypeEntry>,
}

impl TypeRegistry {
    fn builtin() -> Self {
        let entries = [
            TypeEntry {
                fqn: LINUX_ARCHITECTURE_TYPE_FQN,
                kind: TypeKind::Enum,
                members: LinuxArchitectureType::ALL.iter().map(|a| a.as_str()).collect(),
                fields: Vec::new(),
            },
            TypeEntry {
                fqn: LINUX_FLAVOR_TYPE_FQN,
                kind: TypeKind::Enum,
                members: LinuxFlavorType::ALL.iter().map(|f| f.as_str()).collect(),
                fields: Vec::new(),
            },
            TypeEntry {
                fqn: VSCODE_SERVER_PROPS_FQN,
                kind: TypeKind::Struct,
                members: Vec::new(),
                fields: props_schema(),
            },
            TypeEntry {
                fqn: VSCODE_SERVER_FQN,
                kind: TypeKind::Class,
                members: vec!["domainName", "password", "node", "toString", "isConstruct"],
                fields: Vec::new(),
            },
        ];

        Self {
            entries: entries.into_iter().map(|entry| (entry.fqn, entry)).collect(),
        }
    }

    pub fn get(&self, fqn: &str) -> Option<&TypeEntry> {
        self.entries.get(fqn)
    }
}

fn props_schema() -> Vec<FieldSpec> {
    let some = |v: &str| Some(v.to_string());
    vec![
        FieldSpec::optional("vscodeUser", "string", some(DEFAULT_VSCODE_USER)),
        FieldSpec::optional("vscodePassword", "string", some("generated")),
        FieldSpec::optional("instanceName", "string", some(DEFAULT_INSTANCE_NAME)),
        FieldSpec::optional(
            "instanceVolumeSize",
            "number",
            Some(DEFAULT_INSTANCE_VOLUME_SIZE.to_string()),
        ),
        FieldSpec::optional("instanceClass", "string", some(DEFAULT_INSTANCE_CLASS)),
        FieldSpec::optional("instanceSize", "string", some(DEFAULT_INSTANCE_SIZE)),
        FieldSpec::optional(
            "instanceOperatingSystem",
            LINUX_FLAVOR_TYPE_FQN,
            some(DEFAULT_FLAVOR.as_str()),
        ),
        FieldSpec::optional(
            "instanceCpuArchitecture",
            LINUX_ARCHITECTURE_TYPE_FQN,
            some(DEFAULT_ARCHITECTURE.as_str()),
        ),
        FieldSpec::optional("homeFolder", "string", some(DEFAULT_HOME_FOLDER)),
        FieldSpec::optional("devServerBasePath", "string", some(DEFAULT_DEV_SERVER_BASE_PATH)),
        FieldSpec::optional(
            "devServerPort",
            "number",
            Some(DEFAULT_DEV_SERVER_PORT.to_string()),
        ),
        FieldSpec::optional("additionalInstanceRolePolicies", "PolicyStatement[]", some("[]")),
        FieldSpec::optional("additionalTags", "map<string, string>", some("{}")),
        FieldSpec::optional("domainName", "string", None),
        FieldSpec::optional("hostedZoneId", "string", None),
        FieldSpec::optional("certificateArn", "string", None),
        FieldSpec::optional("autoCreateCertificate", "boolean", some("false")),
        FieldSpec::optional("enableAutoStop", "boolean", some("false")),
        FieldSpec::optional(
            "idleTimeoutMinutes",
            "number",
            Some(DEFAULT_IDLE_TIMEOUT_MINUTES.to_string()),
        ),
        FieldSpec::optional(
            "idleCheckIntervalMinutes",
            "number",
            Some(DEFAULT_IDLE_CHECK_INTERVAL_MINUTES.to_string()),
        ),
    ]
}

/// Build the registration table if it does not exist yet
pub fn initialize() -> &'static TypeRegistry {
    REGISTRY.get_or_init(|| {
        INIT_COUNT.fetch_add(1, Ordering::SeqCst);
        let registry = TypeRegistry::builtin();
        info!(
            namespace = NAMESPACE,
            types = registry.entries.len(),
            "Registered construct types"
        );
        registry
    })
}

/// Whether [`initialize`] has run in this process
pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}

/// Number of times the table was built (at most one)
pub fn initialization_count() -> usize {
    INIT_COUNT.load(Ordering::SeqCst)
}

/// Look up a registered type
pub fn lookup(fqn: &str) -> Option<&'static TypeEntry> {
    initialize().get(fqn)
}

/// Look up a type that must be registered
///
/// # Panics
/// Panics when `fqn` is not registered. Handing an unknown type across
/// the engine boundary is a programming error, not a runtime condition.
pub fn require(fqn: &str) -> &'static TypeEntry {
    match lookup(fqn) {
        Some(entry) => entry,
        None => panic!("type {fqn} is not registered in {NAMESPACE}"),
    }
}
