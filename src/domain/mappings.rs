// Copyright (c) 2025 - MV Consulting
//! AMI SSM parameter lookup per architecture and flavor
//!
//! Public SSM parameters always resolve to the latest image of a
//! distribution release:
//!
//! ```text
//! aws ssm get-parameters-by-path --path "/aws/service/canonical/ubuntu/" --recursive
//! aws ssm get-parameters-by-path --path "/aws/service/ami-amazon-linux-latest/" --recursive
//! ```

use super::{LinuxArchitectureType, LinuxFlavorType};

/// SSM parameter holding the current AMI id for an architecture/flavor pair
pub fn ami_ssm_parameter(arch: LinuxArchitectureType, flavor: LinuxFlavorType) -> String {
    match flavor {
        LinuxFlavorType::Ubuntu22 => format!(
            "/aws/service/canonical/ubuntu/server/jammy/stable/current/{}/hvm/ebs-gp2/ami-id",
            arch.ubuntu_path_segment()
        ),
        LinuxFlavorType::Ubuntu24 => format!(
            "/aws/service/canonical/ubuntu/server/noble/stable/current/{}/hvm/ebs-gp3/ami-id",
            arch.ubuntu_path_segment()
        ),
        LinuxFlavorType::AmazonLinux2023 => format!(
            "/aws/service/ami-amazon-linux-latest/al2023-ami-kernel-default-{}",
            arch.amazon_linux_suffix()
        ),
    }
}
