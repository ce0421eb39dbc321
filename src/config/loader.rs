// Copyright (c) 2025 - MV Consulting
//! Loading property bags from JSON documents and the environment

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::props::VSCodeServerProps;
use crate::errors::{ConstructError, ConstructResult};

/// Environment variable naming the props JSON file
pub const ENV_PROPS: &str = "VSCODE_SERVER_PROPS";

/// Environment variable with the construct id
pub const ENV_CONSTRUCT_ID: &str = "VSCODE_SERVER_ID";

/// Environment variable with the owning stack name
pub const ENV_STACK_NAME: &str = "VSCODE_SERVER_STACK";

/// Parse a props JSON document
pub fn load_props_from_str(json: &str) -> ConstructResult<VSCodeServerProps> {
    let props = serde_json::from_str(json)?;
    Ok(props)
}

/// Read and parse a props JSON file
pub fn load_props_from_path(path: impl AsRef<Path>) -> ConstructResult<VSCodeServerProps> {
    let path = path.as_ref();
    debug!("Loading VS Code server props from {}", path.display());

    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConstructError::Io(format!("{}: {}", path.display(), e)))?;
    load_props_from_str(&contents)
}

/// Settings of the synthesis binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthConfig {
    /// Props file; empty props when unset
    pub props_path: Option<PathBuf>,
    /// Construct id inside the stack
    pub construct_id: String,
    /// Owning stack name
    pub stack_name: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            props_path: None,
            construct_id: "VSCodeServer".to_string(),
            stack_name: "vscode-server".to_string(),
        }
    }
}

impl SynthConfig {
    /// Load settings from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            props_path: non_empty(ENV_PROPS).map(PathBuf::from),
            construct_id: non_empty(ENV_CONSTRUCT_ID).unwrap_or(defaults.construct_id),
            stack_name: non_empty(ENV_STACK_NAME).unwrap_or(defaults.stack_name),
        }
    }

    /// Props named by this configuration
    pub fn load_props(&self) -> ConstructResult<VSCodeServerProps> {
        match &self.props_path {
            Some(path) => load_props_from_path(path),
            None => Ok(VSCodeServerProps::default()),
        }
    }
}
