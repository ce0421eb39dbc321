// Copyright (c) 2025 - MV Consulting
//! Construct Façade and Engines
//!
//! - [`VSCodeServer`] - read-only handle over one deployment
//! - [`ConstructionEngine`] - collaborator that materializes a resolved
//!   configuration
//! - [`BlueprintEngine`] - in-process engine rendering a
//!   [`DeploymentBlueprint`]

pub mod blueprint;
pub mod engine;
pub mod server;

pub use blueprint::{BlueprintEngine, DeploymentBlueprint};
pub use engine::{ConstructionEngine, ConstructionRequest, MaterializedOutputs};
pub use server::{ConstructNode, VSCodeServer};
