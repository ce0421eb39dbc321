// Copyright (c) 2025 - MV Consulting
//! Construction engine seam
//!
//! The engine is the collaborator that actually materializes a resolved
//! configuration (provisioning, certificate issuance, password
//! generation). The façade only hands it a request addressed by fully
//! qualified type name and reads back the derived outputs.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::config::ResolvedServerConfig;
use crate::errors::ConstructResult;

/// Materialization request for one construct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructionRequest {
    /// Fully qualified name of the construct type
    pub fqn: &'static str,
    /// Owning stack
    pub stack_name: String,
    /// Construct id inside the stack
    pub construct_id: String,
    /// Validated configuration
    pub config: ResolvedServerConfig,
}

impl ConstructionRequest {
    /// `<stack>/<id>`
    pub fn construct_path(&self) -> String {
        format!("{}/{}", self.stack_name, self.construct_id)
    }
}

/// Values only the engine can determine
#[derive(Clone, PartialEq, Eq, Default)]
pub struct MaterializedOutputs {
    /// Domain assigned by the engine (the distribution domain)
    pub default_domain_name: String,
    /// Password produced by the credential step, when one was requested
    pub generated_password: Option<String>,
    /// Status API endpoint, when auto-stop is enabled
    pub status_api_url: Option<String>,
}

impl fmt::Debug for MaterializedOutputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterializedOutputs")
            .field("default_domain_name", &self.default_domain_name)
            .field(
                "generated_password",
                &self.generated_password.as_ref().map(|_| "<redacted>"),
            )
            .field("status_api_url", &self.status_api_url)
            .finish()
    }
}

/// Engine that materializes constructs
#[async_trait]
pub trait ConstructionEngine: Send + Sync {
    /// Name for logs
    fn name(&self) -> &str;

    /// Materialize the requested construct and report its derived outputs
    async fn materialize(&self, request: &ConstructionRequest) -> ConstructResult<MaterializedOutputs>;
}
