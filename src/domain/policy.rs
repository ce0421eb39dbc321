// Copyright (c) 2025 - MV Consulting
//! IAM Policy Statements attached to the instance role

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{ConstructError, ConstructResult};

/// Allow or deny
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

/// One statement of an IAM policy document
///
/// Serialized with the IAM JSON grammar keys (`Sid`, `Effect`, `Action`,
/// `Resource`, `Condition`) so statements can be pasted from existing
/// policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sid: Option<String>,

    #[serde(default)]
    pub effect: Effect,

    #[serde(rename = "Action")]
    pub actions: Vec<String>,

    #[serde(rename = "Resource")]
    pub resources: Vec<String>,

    /// Operator -> (condition key -> value)
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub condition: BTreeMap<String, BTreeMap<String, String>>,
}

impl PolicyStatement {
    /// Field name used when reporting invalid values
    pub const FIELD: &'static str = "additionalInstanceRolePolicies";

    /// Allow statement over the given actions and resources
    pub fn allow<A, R>(actions: A, resources: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            sid: None,
            effect: Effect::Allow,
            actions: actions.into_iter().map(Into::into).collect(),
            resources: resources.into_iter().map(Into::into).collect(),
            condition: BTreeMap::new(),
        }
    }

    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_condition(
        mut self,
        operator: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.condition
            .entry(operator.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Check the statement is well formed
    ///
    /// # Rules
    /// - At least one action, each `service:Action` with a non-empty service
    ///   and action part (wildcards allowed), or the bare `*`
    /// - At least one non-empty resource
    /// - Sid, when present, is alphanumeric
    pub fn validate(&self, index: usize) -> ConstructResult<()> {
        let field = format!("{}[{}]", Self::FIELD, index);

        if self.actions.is_empty() {
            return Err(ConstructError::invalid_option(
                &field,
                "",
                "statement needs at least one action",
            ));
        }
        for action in &self.actions {
            if !Self::is_valid_action(action) {
                return Err(ConstructError::invalid_option(
                    &field,
                    action,
                    "actions must look like service:Action",
                ));
            }
        }

        if self.resources.is_empty() || self.resources.iter().any(|r| r.trim().is_empty()) {
            return Err(ConstructError::invalid_option(
                &field,
                self.resources.join(","),
                "statement needs at least one non-empty resource",
            ));
        }

        if let Some(sid) = &self.sid {
            if sid.is_empty() || !sid.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConstructError::invalid_option(
                    &field,
                    sid,
                    "sid must be alphanumeric",
                ));
            }
        }

        Ok(())
    }

    fn is_valid_action(action: &str) -> bool {
        if action == "*" {
            return true;
        }
        match action.split_once(':') {
            Some((service, name)) => {
                !service.is_empty()
                    && service
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                    && !name.is_empty()
                    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '*' || c == '?')
            }
            None => false,
        }
    }
}
