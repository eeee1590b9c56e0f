//! Shared state-machine machinery for workflow-bearing entities.
//!
//! Each entity kind declares its transition table by implementing
//! [`StateMachine`]; [`apply_transition`] is the single place a requested
//! state change is checked against the current state. Statuses are compared
//! as enum variants, never as strings, so an unrecognized value cannot
//! slip through as a valid transition.

use crate::error::CoreError;

/// A finite set of states with an explicit transition table.
pub trait StateMachine: Copy + Eq {
    /// Entity name used in error messages (e.g. `"Case"`).
    const ENTITY: &'static str;

    /// Whether `from -> to` is a permitted edge. Self-transitions are not
    /// edges; `can_transition(s, s)` must return false.
    fn can_transition(from: Self, to: Self) -> bool;

    /// Stable string form for storage and error messages.
    fn as_str(self) -> &'static str;

    /// A state with no outgoing edges.
    fn is_terminal(self) -> bool;
}

/// Validate a requested transition against the current state.
///
/// Returns the new state on success, or [`CoreError::InvalidTransition`]
/// if the edge is not in the entity's transition table. Requesting the
/// current state again is an invalid transition, not a no-op; callers that
/// retried a lost race must observe the failure.
pub fn apply_transition<S: StateMachine>(current: S, requested: S) -> Result<S, CoreError> {
    if S::can_transition(current, requested) {
        Ok(requested)
    } else {
        Err(CoreError::InvalidTransition {
            entity: S::ENTITY,
            from: current.as_str(),
            to: requested.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseStatus;
    use crate::warrant::WarrantStatus;

    #[test]
    fn test_apply_transition_accepts_valid_edge() {
        let next = apply_transition(CaseStatus::Open, CaseStatus::Closed)
            .expect("open -> closed is a valid edge");
        assert_eq!(next, CaseStatus::Closed);
    }

    #[test]
    fn test_apply_transition_rejects_self_edge() {
        let result = apply_transition(WarrantStatus::Pending, WarrantStatus::Pending);
        assert!(matches!(
            result,
            Err(CoreError::InvalidTransition {
                entity: "Warrant",
                from: "pending",
                to: "pending",
            })
        ));
    }

    #[test]
    fn test_apply_transition_error_names_states() {
        let err = apply_transition(CaseStatus::Archived, CaseStatus::Open).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid transition for Case: archived -> open"
        );
    }
}
