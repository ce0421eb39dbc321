// Copyright (c) 2025 - MV Consulting
//! VS Code server construct
//!
//! Turns a declarative, partially specified property bag into a validated,
//! fully resolved server configuration and hands it to a construction
//! engine. The materialized deployment is read back through the
//! [`VSCodeServer`] façade.
//!
//! ```rust
//! use cdk_vscode_server::{VSCodeServerProps, LinuxFlavorType};
//!
//! let props = VSCodeServerProps {
//!     instance_operating_system: Some(LinuxFlavorType::Ubuntu24),
//!     ..Default::default()
//! };
//! let config = cdk_vscode_server::resolve(&props).unwrap();
//! assert_eq!(config.dev_server_port(), 8081);
//! ```

pub mod config;
pub mod construct;
pub mod domain;
pub mod errors;
pub mod registry;
pub mod state_machine;

// Re-export commonly used types
pub use config::{resolve, ResolvedServerConfig, VSCodeServerProps};
pub use construct::{BlueprintEngine, ConstructionEngine, VSCodeServer};
pub use domain::{LinuxArchitectureType, LinuxFlavorType};
pub use errors::{ConstructError, ConstructResult};
