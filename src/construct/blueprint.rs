// Copyright (c) 2025 - MV Consulting
//! In-process blueprint engine
//!
//! Renders a resolved configuration into a deterministic
//! [`DeploymentBlueprint`] without touching any cloud API. Values only a
//! real deployment can know (the distribution domain, the generated
//! password, the status API endpoint) are emitted as deferred references,
//! the same way a synthesized template refers to them.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info};

use crate::config::{AutoStop, CertificateSource, HostedZoneSource, PasswordSource};
use crate::construct::engine::{ConstructionEngine, ConstructionRequest, MaterializedOutputs};
use crate::domain::{InstallerKind, LinuxArchitectureType, PolicyStatement, ResourceTags};
use crate::errors::{ConstructError, ConstructResult};
use crate::registry;

/// Root device of the instance
pub const ROOT_DEVICE_NAME: &str = "/dev/sda1";

/// Managed policies attached to every instance role
pub const MANAGED_POLICIES: [&str; 4] = [
    "AmazonSSMManagedInstanceCore",
    "CloudWatchAgentServerPolicy",
    "AmazonQDeveloperAccess",
    "ReadOnlyAccess",
];

/// Origin-facing CloudFront prefix list allowed into the security group
pub const CLOUDFRONT_PREFIX_LIST: &str = "com.amazonaws.global.cloudfront.origin-facing";

/// EBS root volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeSpec {
    pub device_name: String,
    pub size_gib: u32,
    pub volume_type: String,
    pub encrypted: bool,
    pub delete_on_termination: bool,
}

/// EC2 instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceSpec {
    pub name: String,
    pub instance_type: String,
    pub architecture: LinuxArchitectureType,
    pub ami_ssm_parameter: String,
    pub root_volume: VolumeSpec,
    pub require_imdsv2: bool,
    pub user_data: String,
}

/// Instance role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSpec {
    pub managed_policies: Vec<String>,
    pub additional_statements: Vec<PolicyStatement>,
}

/// VS Code server installer run on the instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerSpec {
    pub kind: InstallerKind,
    pub vscode_user: String,
    /// Deferred reference for generated passwords; never the literal
    /// explicit password
    pub password_reference: String,
    pub home_folder: String,
    pub dev_server_base_path: String,
    pub dev_server_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain_name: Option<String>,
}

/// CloudFront distribution in front of the instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSpec {
    pub origin_prefix_list: String,
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_zone: Option<HostedZoneSource>,
}

/// Deterministic description of everything a deployment would create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentBlueprint {
    pub construct_path: String,
    pub instance: InstanceSpec,
    pub instance_role: RoleSpec,
    pub installer: InstallerSpec,
    pub distribution: DistributionSpec,
    pub tags: ResourceTags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_stop: Option<AutoStop>,
    /// Stack outputs by name
    pub outputs: BTreeMap<String, String>,
}

/// Render the cloud-config user data of the instance
pub fn render_user_data(instance_name: &str, home_folder: &str, user: &str) -> String {
    format!(
        "#cloud-config\nhostname: {instance_name}\nruncmd:\n  - mkdir -p {home_folder} && chown -R {user}:{user} {home_folder}\n"
    )
}

/// Deferred reference to an attribute of a resource in the construct
fn token(construct_id: &str, resource: &str, attribute: &str) -> String {
    format!("${{Token[{construct_id}.{resource}.{attribute}]}}")
}

/// Render the blueprint for a request
pub fn render(request: &ConstructionRequest) -> DeploymentBlueprint {
    let config = &request.config;
    let id = request.construct_id.as_str();

    let password_reference = match config.password() {
        PasswordSource::Explicit(_) => "explicit".to_string(),
        PasswordSource::Generate => format!(
            "{{{{resolve:secretsmanager:{}-{}-password-secret:SecretString:password}}}}",
            request.stack_name, id
        ),
    };

    let domain = config.domain();
    let distribution_domain = token(id, "cf-distribution", "DomainName");
    let public_domain = domain
        .map(|d| d.domain_name.to_string())
        .unwrap_or_else(|| distribution_domain.clone());

    let mut outputs = BTreeMap::new();
    outputs.insert(
        "domainName".to_string(),
        format!("https://{}/?folder={}", public_domain, config.home_folder()),
    );
    outputs.insert("password".to_string(), password_reference.clone());
    if config.auto_stop().is_some() {
        outputs.insert("statusApiUrl".to_string(), token(id, "StatusApi", "Url"));
    }

    DeploymentBlueprint {
        construct_path: request.construct_path(),
        instance: InstanceSpec {
            name: config.instance_name().to_string(),
            instance_type: config.instance_type().to_string(),
            architecture: config.cpu_architecture(),
            ami_ssm_parameter: config.ami_parameter(),
            root_volume: VolumeSpec {
                device_name: ROOT_DEVICE_NAME.to_string(),
                size_gib: config.volume_size_gib(),
                volume_type: "gp3".to_string(),
                encrypted: true,
                delete_on_termination: true,
            },
            require_imdsv2: true,
            user_data: render_user_data(
                config.instance_name(),
                config.home_folder(),
                config.vscode_user(),
            ),
        },
        instance_role: RoleSpec {
            managed_policies: MANAGED_POLICIES.iter().map(|p| p.to_string()).collect(),
            additional_statements: config.additional_policies().to_vec(),
        },
        installer: InstallerSpec {
            kind: config.installer(),
            vscode_user: config.vscode_user().to_string(),
            password_reference,
            home_folder: config.home_folder().to_string(),
            dev_server_base_path: config.dev_server_base_path().to_string(),
            dev_server_port: config.dev_server_port(),
            custom_domain_name: domain.map(|d| d.domain_name.to_string()),
        },
        distribution: DistributionSpec {
            origin_prefix_list: CLOUDFRONT_PREFIX_LIST.to_string(),
            aliases: domain
                .map(|d| vec![d.domain_name.to_string()])
                .unwrap_or_default(),
            certificate: domain.map(|d| d.certificate.clone()),
            hosted_zone: domain.map(|d| d.hosted_zone.clone()),
        },
        tags: config.tags(),
        auto_stop: config.auto_stop(),
        outputs,
    }
}

/// Engine that renders blueprints instead of provisioning
#[derive(Debug, Default)]
pub struct BlueprintEngine {
    rendered: Mutex<BTreeMap<String, DeploymentBlueprint>>,
}

impl BlueprintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blueprint rendered for a construct path (`<stack>/<id>`)
    pub fn blueprint(&self, construct_path: &str) -> ConstructResult<Option<DeploymentBlueprint>> {
        let rendered = self
            .rendered
            .lock()
            .map_err(|e| ConstructError::Engine(format!("blueprint store poisoned: {e}")))?;
        Ok(rendered.get(construct_path).cloned())
    }
}

#[async_trait]
impl ConstructionEngine for BlueprintEngine {
    fn name(&self) -> &str {
        "blueprint"
    }

    async fn materialize(&self, request: &ConstructionRequest) -> ConstructResult<MaterializedOutputs> {
        registry::require(request.fqn);

        let blueprint = render(request);
        debug!(
            construct = %blueprint.construct_path,
            instance_type = %blueprint.instance.instance_type,
            ami = %blueprint.instance.ami_ssm_parameter,
            "Rendered deployment blueprint"
        );

        let outputs = MaterializedOutputs {
            default_domain_name: token(&request.construct_id, "cf-distribution", "DomainName"),
            generated_password: request
                .config
                .password()
                .is_generated()
                .then(|| blueprint.installer.password_reference.clone()),
            status_api_url: blueprint.outputs.get("statusApiUrl").cloned(),
        };

        let mut rendered = self
            .rendered
            .lock()
            .map_err(|e| ConstructError::Engine(format!("blueprint store poisoned: {e}")))?;
        if rendered.contains_key(&blueprint.construct_path) {
            return Err(ConstructError::Engine(format!(
                "construct path {} is already materialized",
                blueprint.construct_path
            )));
        }
        info!(construct = %blueprint.construct_path, "Blueprint stored");
        rendered.insert(blueprint.construct_path.clone(), blueprint);

        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, VSCodeServerProps};
    use crate::registry::VSCODE_SERVER_FQN;

    fn request(props: VSCodeServerProps) -> ConstructionRequest {
        ConstructionRequest {
            fqn: VSCODE_SERVER_FQN,
            stack_name: "workshop".to_string(),
            construct_id: "vscode".to_string(),
            config: resolve(&props).unwrap(),
        }
    }

    #[test]
    fn test_default_blueprint() {
        let blueprint = render(&request(VSCodeServerProps::default()));

        assert_eq!(blueprint.construct_path, "workshop/vscode");
        assert_eq!(blueprint.instance.instance_type, "m7g.xlarge");
        assert_eq!(
            blueprint.instance.ami_ssm_parameter,
            "/aws/service/canonical/ubuntu/server/jammy/stable/current/arm64/hvm/ebs-gp2/ami-id"
        );
        assert_eq!(blueprint.instance.root_volume.size_gib, 40);
        assert_eq!(blueprint.installer.kind, InstallerKind::Ubuntu);
        assert_eq!(blueprint.tags.get("app"), Some("vscode-server"));
        assert!(blueprint.distribution.aliases.is_empty());
        assert_eq!(
            blueprint.outputs["domainName"],
            "https://${Token[vscode.cf-distribution.DomainName]}/?folder=/Workshop"
        );
        assert_eq!(
            blueprint.outputs["password"],
            "{{resolve:secretsmanager:workshop-vscode-password-secret:SecretString:password}}"
        );
        assert!(!blueprint.outputs.contains_key("statusApiUrl"));
    }

    #[test]
    fn test_explicit_password_never_rendered() {
        let props = VSCodeServerProps {
            vscode_password: Some("hunter2".into()),
            ..Default::default()
        };
        let blueprint = render(&request(props));
        let json = serde_json::to_string(&blueprint).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_user_data() {
        assert_eq!(
            render_user_data("VSCodeServer", "/Workshop", "participant"),
            "#cloud-config\nhostname: VSCodeServer\nruncmd:\n  - mkdir -p /Workshop && chown -R participant:participant /Workshop\n"
        );
    }

    #[tokio::test]
    async fn test_same_path_materialized_once() {
        let engine = BlueprintEngine::new();
        let request = request(VSCodeServerProps::default());

        let outputs = engine.materialize(&request).await.unwrap();
        assert!(outputs.generated_password.is_some());
        assert!(engine.blueprint("workshop/vscode").unwrap().is_some());

        assert!(matches!(
            engine.materialize(&request).await,
            Err(ConstructError::Engine(_))
        ));
    }
}
