// Copyright (c) 2025 - MV Consulting
//! Documented defaults substituted for absent configuration fields
//!
//! These constants are the single source of truth for the property bag
//! defaults; the resolver, the docs and the tests all read them from here.

use crate::domain::{InstanceClass, InstanceSize, LinuxArchitectureType, LinuxFlavorType};

/// Default login user
pub const DEFAULT_VSCODE_USER: &str = "participant";

/// Default EC2 `Name` of the server instance
pub const DEFAULT_INSTANCE_NAME: &str = "VSCodeServer";

/// Default root volume size in GiB
pub const DEFAULT_INSTANCE_VOLUME_SIZE: u32 = 40;

/// Default folder opened in VS Code
pub const DEFAULT_HOME_FOLDER: &str = "/Workshop";

/// Default base path of the dev server behind Nginx
pub const DEFAULT_DEV_SERVER_BASE_PATH: &str = "app";

/// Default dev server port
pub const DEFAULT_DEV_SERVER_PORT: u16 = 8081;

/// Default instance class (Graviton general purpose)
pub const DEFAULT_INSTANCE_CLASS: &str = "m7g";

/// Default instance size
pub const DEFAULT_INSTANCE_SIZE: &str = "xlarge";

/// Default CPU architecture
pub const DEFAULT_ARCHITECTURE: LinuxArchitectureType = LinuxArchitectureType::Arm;

/// Default operating system
pub const DEFAULT_FLAVOR: LinuxFlavorType = LinuxFlavorType::Ubuntu22;

/// Default minutes of inactivity before an idle instance is stopped
pub const DEFAULT_IDLE_TIMEOUT_MINUTES: u32 = 30;

/// Default minutes between idle checks
pub const DEFAULT_IDLE_CHECK_INTERVAL_MINUTES: u32 = 5;

/// Returns the default instance class
pub fn default_instance_class() -> InstanceClass {
    InstanceClass::default()
}

/// Returns the default instance size
pub fn default_instance_size() -> InstanceSize {
    InstanceSize::default()
}
