// Copyright (c) 2025 - MV Consulting
//! VSCodeServer construct façade
//!
//! One façade per deployment. The configuration is resolved and validated
//! when the façade is created; outputs become readable once an engine has
//! materialized it.

use chrono::Utc;
use std::any::Any;
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{resolve, PasswordSource, ResolvedServerConfig, VSCodeServerProps};
use crate::construct::engine::{ConstructionEngine, ConstructionRequest, MaterializedOutputs};
use crate::errors::{ConstructError, ConstructResult};
use crate::registry::{self, VSCODE_SERVER_FQN};
use crate::state_machine::{
    ConstructCommand, ConstructPhase, StateMachine, StateMachineWithHistory, Transition,
};

/// Position of a construct inside its stack
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstructNode {
    stack_name: String,
    id: String,
}

impl ConstructNode {
    fn new(stack_name: &str, id: &str) -> ConstructResult<Self> {
        for (field, value) in [("stackName", stack_name), ("id", id)] {
            if value.is_empty() || value.contains('/') {
                return Err(ConstructError::invalid_option(
                    field,
                    value,
                    "must be non-empty and must not contain '/'",
                ));
            }
        }
        Ok(Self {
            stack_name: stack_name.to_string(),
            id: id.to_string(),
        })
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// `<stack>/<id>`
    pub fn path(&self) -> String {
        format!("{}/{}", self.stack_name, self.id)
    }
}

/// Handle over one VS Code server deployment
pub struct VSCodeServer {
    node: ConstructNode,
    instance_id: Uuid,
    config: ResolvedServerConfig,
    lifecycle: StateMachineWithHistory<ConstructPhase>,
    outputs: Option<MaterializedOutputs>,
}

impl VSCodeServer {
    /// Resolve `props` and create an unconstructed façade
    ///
    /// Registers the construct types on first use. Fails with the first
    /// validation error of the property bag; nothing is handed to an engine
    /// until the configuration is fully valid.
    pub fn new(stack_name: &str, id: &str, props: &VSCodeServerProps) -> ConstructResult<Self> {
        registry::initialize();
        registry::require(VSCODE_SERVER_FQN);

        let node = ConstructNode::new(stack_name, id)?;
        let config = resolve(props)?;

        Ok(Self {
            node,
            instance_id: Uuid::now_v7(),
            config,
            lifecycle: StateMachineWithHistory::new(ConstructPhase::default()),
            outputs: None,
        })
    }

    /// Materialize the construct through `engine`
    ///
    /// A façade is constructed at most once. When the engine fails the
    /// façade stays unconstructed.
    pub async fn construct<E>(&mut self, engine: &E) -> ConstructResult<()>
    where
        E: ConstructionEngine + ?Sized,
    {
        let phase = *self.lifecycle.current_state();
        if !phase.can_transition(&ConstructCommand::Materialize) {
            return Err(ConstructError::PreconditionViolation {
                operation: "construct".to_string(),
                required: ConstructPhase::Unconstructed.to_string(),
                actual: phase.to_string(),
            });
        }

        let request = ConstructionRequest {
            fqn: VSCODE_SERVER_FQN,
            stack_name: self.node.stack_name.clone(),
            construct_id: self.node.id.clone(),
            config: self.config.clone(),
        };

        let outputs = engine.materialize(&request).await.map_err(|e| {
            warn!(construct = %self.node.path(), engine = engine.name(), error = %e, "Materialization failed");
            e
        })?;
        self.check_outputs(&outputs)?;

        self.lifecycle
            .transition_with_history(ConstructCommand::Materialize, Utc::now())
            .map_err(|e| ConstructError::Engine(e.to_string()))?;
        self.outputs = Some(outputs);

        info!(
            construct = %self.node.path(),
            instance = %self.instance_id,
            engine = engine.name(),
            "VSCodeServer constructed"
        );
        Ok(())
    }

    fn check_outputs(&self, outputs: &MaterializedOutputs) -> ConstructResult<()> {
        if self.config.domain().is_none() && outputs.default_domain_name.is_empty() {
            return Err(ConstructError::Engine(
                "engine did not assign a domain name".to_string(),
            ));
        }
        if self.config.password().is_generated()
            && outputs
                .generated_password
                .as_deref()
                .map_or(true, str::is_empty)
        {
            return Err(ConstructError::Engine(
                "engine did not generate a password".to_string(),
            ));
        }
        if self.config.auto_stop().is_some() && outputs.status_api_url.is_none() {
            return Err(ConstructError::Engine(
                "engine did not report a status API endpoint".to_string(),
            ));
        }
        Ok(())
    }

    fn materialized(&self, operation: &str) -> ConstructResult<&MaterializedOutputs> {
        self.outputs
            .as_ref()
            .ok_or_else(|| ConstructError::PreconditionViolation {
                operation: operation.to_string(),
                required: ConstructPhase::Constructed.to_string(),
                actual: self.phase().to_string(),
            })
    }

    /// Custom domain when configured, else the engine-assigned domain
    pub fn domain_name(&self) -> ConstructResult<String> {
        let outputs = self.materialized("domainName")?;
        Ok(match self.config.domain() {
            Some(domain) => domain.domain_name.to_string(),
            None => outputs.default_domain_name.clone(),
        })
    }

    /// Login URL opening the home folder
    pub fn url(&self) -> ConstructResult<String> {
        let domain = self.domain_name()?;
        Ok(format!(
            "https://{}/?folder={}",
            domain,
            self.config.home_folder()
        ))
    }

    /// Effective login password, explicit or generated
    pub fn password(&self) -> ConstructResult<String> {
        let outputs = self.materialized("password")?;
        match self.config.password() {
            PasswordSource::Explicit(password) => Ok(password.clone()),
            PasswordSource::Generate => outputs
                .generated_password
                .clone()
                .ok_or_else(|| ConstructError::Engine("generated password missing".to_string())),
        }
    }

    /// Status API endpoint, `None` when auto-stop is disabled
    pub fn status_api_url(&self) -> ConstructResult<Option<String>> {
        Ok(self.materialized("statusApiUrl")?.status_api_url.clone())
    }

    pub fn node(&self) -> &ConstructNode {
        &self.node
    }

    pub fn config(&self) -> &ResolvedServerConfig {
        &self.config
    }

    pub fn phase(&self) -> ConstructPhase {
        *self.lifecycle.current_state()
    }

    pub fn is_constructed(&self) -> bool {
        self.phase().is_terminal()
    }

    pub fn history(&self) -> &[Transition<ConstructPhase, ConstructCommand>] {
        self.lifecycle.history()
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Whether `value` is a VSCodeServer façade
    pub fn is_construct(value: &dyn Any) -> bool {
        value.is::<VSCodeServer>()
    }
}

impl fmt::Display for VSCodeServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VSCodeServer({}, {})", self.node.path(), self.instance_id)
    }
}

impl fmt::Debug for VSCodeServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VSCodeServer")
            .field("node", &self.node)
            .field("instance_id", &self.instance_id)
            .field("phase", &self.phase())
            .field("config", &self.config)
            .field("outputs", &self.outputs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedEngine;

    #[async_trait]
    impl ConstructionEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn materialize(
            &self,
            _request: &ConstructionRequest,
        ) -> ConstructResult<MaterializedOutputs> {
            Ok(MaterializedOutputs {
                default_domain_name: "d111111abcdef8.cloudfront.net".to_string(),
                generated_password: Some("generated-secret".to_string()),
                status_api_url: None,
            })
        }
    }

    #[test]
    fn test_outputs_require_construction() {
        let server = VSCodeServer::new("stack", "vscode", &VSCodeServerProps::default()).unwrap();

        assert_eq!(server.phase(), ConstructPhase::Unconstructed);
        assert!(matches!(
            server.domain_name(),
            Err(ConstructError::PreconditionViolation { .. })
        ));
        assert!(matches!(
            server.password(),
            Err(ConstructError::PreconditionViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_construct_once() {
        let mut server =
            VSCodeServer::new("stack", "vscode", &VSCodeServerProps::default()).unwrap();
        server.construct(&FixedEngine).await.unwrap();

        assert!(server.is_constructed());
        assert_eq!(server.domain_name().unwrap(), "d111111abcdef8.cloudfront.net");
        assert_eq!(server.password().unwrap(), "generated-secret");
        assert_eq!(server.history().len(), 1);

        let err = server.construct(&FixedEngine).await.unwrap_err();
        assert_eq!(
            err,
            ConstructError::PreconditionViolation {
                operation: "construct".into(),
                required: "unconstructed".into(),
                actual: "constructed".into(),
            }
        );
    }

    #[test]
    fn test_display_and_debug() {
        let props = VSCodeServerProps {
            vscode_password: Some("hunter2".into()),
            ..Default::default()
        };
        let a = VSCodeServer::new("stack", "vscode", &props).unwrap();
        let b = VSCodeServer::new("stack", "vscode", &props).unwrap();

        assert!(a.to_string().starts_with("VSCodeServer(stack/vscode, "));
        assert_ne!(a.to_string(), b.to_string());
        assert!(!format!("{a:?}").contains("hunter2"));
    }

    #[test]
    fn test_is_construct() {
        let server = VSCodeServer::new("stack", "vscode", &VSCodeServerProps::default()).unwrap();
        assert!(VSCodeServer::is_construct(&server));
        assert!(!VSCodeServer::is_construct(&"stack/vscode"));
    }

    #[test]
    fn test_invalid_node_id() {
        let err = VSCodeServer::new("stack", "a/b", &VSCodeServerProps::default()).unwrap_err();
        assert_eq!(err.fields(), vec!["id"]);
    }
}
