// Copyright (c) 2025 - MV Consulting
//! Server Configuration
//!
//! Two distinct shapes keep unresolved defaults from leaking into the
//! construct:
//!
//! - [`VSCodeServerProps`] - what the caller writes, every field optional
//! - [`ResolvedServerConfig`] - what the construct reads, every field set
//!
//! [`resolve`] is the only bridge between them.

pub mod defaults;
pub mod loader;
pub mod props;
pub mod resolved;
pub mod resolver;
pub mod validation;

pub use loader::{load_props_from_path, load_props_from_str, SynthConfig};
pub use props::VSCodeServerProps;
pub use resolved::{
    AutoStop, CertificateSource, CustomDomain, HostedZoneSource, PasswordSource,
    ResolvedServerConfig,
};
pub use resolver::resolve;
pub use validation::ValidationResult;
