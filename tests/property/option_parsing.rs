// Copyright (c) 2025 - MV Consulting
//! Property-Based Tests for Closed Option Sets
//!
//! A string parses as an option iff it is one of the literals, matched
//! exactly. Near misses (other case, padding) are rejected.

use cdk_vscode_server::{ConstructError, LinuxArchitectureType, LinuxFlavorType};
use proptest::prelude::*;

const ARCHITECTURES: [&str; 2] = ["ARM", "AMD64"];
const FLAVORS: [&str; 3] = ["UBUNTU_22", "UBUNTU_24", "AMAZON_LINUX_2023"];

/// Arbitrary strings mixed with literals and their near misses
fn candidate(literals: &'static [&'static str]) -> impl Strategy<Value = String> {
    let literal = proptest::sample::select(literals).prop_map(str::to_string);
    prop_oneof![
        3 => any::<String>(),
        2 => "[A-Z0-9_]{0,20}",
        2 => literal.clone(),
        1 => literal.clone().prop_map(|s| s.to_lowercase()),
        1 => literal.prop_map(|s| format!(" {s}")),
    ]
}

proptest! {
    #[test]
    fn prop_architecture_parses_iff_literal(s in candidate(&ARCHITECTURES)) {
        let parsed = s.parse::<LinuxArchitectureType>();
        prop_assert_eq!(parsed.is_ok(), ARCHITECTURES.contains(&s.as_str()));

        match parsed {
            Ok(arch) => prop_assert_eq!(arch.as_str(), s.as_str()),
            Err(err) => {
                let is_invalid_option = matches!(err, ConstructError::InvalidOption { .. });
                prop_assert!(is_invalid_option);
                prop_assert_eq!(err.fields(), vec!["instanceCpuArchitecture"]);
            }
        }
    }

    #[test]
    fn prop_flavor_parses_iff_literal(s in candidate(&FLAVORS)) {
        let parsed = s.parse::<LinuxFlavorType>();
        prop_assert_eq!(parsed.is_ok(), FLAVORS.contains(&s.as_str()));

        match parsed {
            Ok(flavor) => prop_assert_eq!(flavor.as_str(), s.as_str()),
            Err(err) => {
                let is_invalid_option = matches!(err, ConstructError::InvalidOption { .. });
                prop_assert!(is_invalid_option);
                prop_assert_eq!(err.fields(), vec!["instanceOperatingSystem"]);
            }
        }
    }

    #[test]
    fn prop_json_literals_follow_parsing(s in candidate(&FLAVORS)) {
        let json = serde_json::to_string(&s).unwrap();
        let from_json = serde_json::from_str::<LinuxFlavorType>(&json);
        prop_assert_eq!(from_json.is_ok(), FLAVORS.contains(&s.as_str()));
    }
}
