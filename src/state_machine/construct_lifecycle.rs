// Copyright (c) 2025 - MV Consulting
//! Construct Lifecycle State Machine
//!
//! # States
//!
//! - Unconstructed: configuration resolved, nothing materialized
//! - Constructed: the engine materialized the deployment (terminal)
//!
//! # Inputs
//!
//! - Materialize: Unconstructed → Constructed
//!
//! There are no other transitions; a constructed façade is never
//! re-materialized.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// Lifecycle phase of a construct façade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConstructPhase {
    #[default]
    Unconstructed,
    Constructed,
}

impl ConstructPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconstructed => "unconstructed",
            Self::Constructed => "constructed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Constructed)
    }
}

impl fmt::Display for ConstructPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle command (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructCommand {
    /// Hand the resolved configuration to the engine
    Materialize,
}

impl fmt::Display for ConstructCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Materialize => f.write_str("materialize"),
        }
    }
}

impl StateMachine for ConstructPhase {
    type Input = ConstructCommand;
    type Output = ();

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        match (self, input) {
            (Self::Unconstructed, ConstructCommand::Materialize) => Ok((Self::Constructed, ())),
            (Self::Constructed, _) => Err(TransitionError::InvalidTransition {
                from: self.to_string(),
                input: input.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::StateMachineWithHistory;
    use chrono::Utc;

    #[test]
    fn test_materialize_once() {
        let (phase, ()) = ConstructPhase::Unconstructed
            .transition(&ConstructCommand::Materialize)
            .unwrap();
        assert_eq!(phase, ConstructPhase::Constructed);
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_constructed_is_terminal() {
        let err = ConstructPhase::Constructed
            .transition(&ConstructCommand::Materialize)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: "constructed".into(),
                input: "materialize".into()
            }
        );
    }

    #[test]
    fn test_rejected_transition_keeps_history() {
        let mut fsm = StateMachineWithHistory::new(ConstructPhase::default());
        fsm.transition_with_history(ConstructCommand::Materialize, Utc::now())
            .unwrap();
        assert!(fsm
            .transition_with_history(ConstructCommand::Materialize, Utc::now())
            .is_err());
        assert_eq!(fsm.history().len(), 1);
        assert_eq!(*fsm.current_state(), ConstructPhase::Constructed);
    }
}
