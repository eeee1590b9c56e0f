//! Warrant request vocabulary, lifecycle, and creation rules.
//!
//! Warrant requests are filed by any authenticated actor except helpers
//! and resolved exactly once by a reviewer; both Approved and Rejected are
//! terminal states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::workflow::StateMachine;

/// Maximum length for the target description.
pub const MAX_TARGET_LENGTH: usize = 500;

/// Maximum length for the reasoning text.
pub const MAX_REASONING_LENGTH: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantKind {
    Search,
    Arrest,
    Surveillance,
    Other,
}

pub const ALL_WARRANT_KINDS: &[WarrantKind] = &[
    WarrantKind::Search,
    WarrantKind::Arrest,
    WarrantKind::Surveillance,
    WarrantKind::Other,
];

impl WarrantKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WarrantKind::Search => "search",
            WarrantKind::Arrest => "arrest",
            WarrantKind::Surveillance => "surveillance",
            WarrantKind::Other => "other",
        }
    }
}

impl fmt::Display for WarrantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WarrantKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(WarrantKind::Search),
            "arrest" => Ok(WarrantKind::Arrest),
            "surveillance" => Ok(WarrantKind::Surveillance),
            "other" => Ok(WarrantKind::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown warrant kind '{other}'"
            ))),
        }
    }
}

/// Warrant lifecycle. Pending is the initial state; review resolves the
/// request exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantStatus {
    Pending,
    Approved,
    Rejected,
}

impl StateMachine for WarrantStatus {
    const ENTITY: &'static str = "Warrant";

    fn can_transition(from: Self, to: Self) -> bool {
        matches!(
            (from, to),
            (WarrantStatus::Pending, WarrantStatus::Approved)
                | (WarrantStatus::Pending, WarrantStatus::Rejected)
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            WarrantStatus::Pending => "pending",
            WarrantStatus::Approved => "approved",
            WarrantStatus::Rejected => "rejected",
        }
    }

    fn is_terminal(self) -> bool {
        self != WarrantStatus::Pending
    }
}

impl fmt::Display for WarrantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(StateMachine::as_str(*self))
    }
}

impl FromStr for WarrantStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WarrantStatus::Pending),
            "approved" => Ok(WarrantStatus::Approved),
            "rejected" => Ok(WarrantStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown warrant status '{other}'"
            ))),
        }
    }
}

/// A reviewer's decision on a pending warrant request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// The status this decision resolves the request to.
    pub fn target_status(self) -> WarrantStatus {
        match self {
            ReviewDecision::Approve => WarrantStatus::Approved,
            ReviewDecision::Reject => WarrantStatus::Rejected,
        }
    }
}

/// Validate the caller-supplied fields of a new warrant request.
pub fn validate_new_warrant(target: &str, reasoning: &str) -> Result<(), CoreError> {
    if target.trim().is_empty() {
        return Err(CoreError::Validation(
            "Target description must not be empty".to_string(),
        ));
    }
    if target.len() > MAX_TARGET_LENGTH {
        return Err(CoreError::Validation(format!(
            "Target description exceeds maximum length of {MAX_TARGET_LENGTH} characters"
        )));
    }
    if reasoning.trim().is_empty() {
        return Err(CoreError::Validation(
            "Reasoning must not be empty".to_string(),
        ));
    }
    if reasoning.len() > MAX_REASONING_LENGTH {
        return Err(CoreError::Validation(format!(
            "Reasoning exceeds maximum length of {MAX_REASONING_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::apply_transition;

    #[test]
    fn test_transition_table_is_exact() {
        use WarrantStatus::*;
        let valid = [(Pending, Approved), (Pending, Rejected)];
        for from in [Pending, Approved, Rejected] {
            for to in [Pending, Approved, Rejected] {
                let expected = valid.contains(&(from, to));
                assert_eq!(
                    WarrantStatus::can_transition(from, to),
                    expected,
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_resolved_warrants_are_terminal() {
        for from in [WarrantStatus::Approved, WarrantStatus::Rejected] {
            assert!(StateMachine::is_terminal(from));
            for to in [
                WarrantStatus::Pending,
                WarrantStatus::Approved,
                WarrantStatus::Rejected,
            ] {
                assert!(
                    apply_transition(from, to).is_err(),
                    "re-review from {from} to {to} must fail"
                );
            }
        }
    }

    #[test]
    fn test_decision_maps_to_status() {
        assert_eq!(
            ReviewDecision::Approve.target_status(),
            WarrantStatus::Approved
        );
        assert_eq!(
            ReviewDecision::Reject.target_status(),
            WarrantStatus::Rejected
        );
    }

    #[test]
    fn test_kind_round_trips_through_string_form() {
        for kind in ALL_WARRANT_KINDS {
            let parsed: WarrantKind = kind.as_str().parse().expect("seed value must parse");
            assert_eq!(parsed, *kind);
        }
        assert!("wiretap".parse::<WarrantKind>().is_err());
    }

    #[test]
    fn test_validate_new_warrant_rejects_blank_fields() {
        assert!(validate_new_warrant("", "reason").is_err());
        assert!(validate_new_warrant("target", "  ").is_err());
        assert!(validate_new_warrant("12 Alta St apartment", "probable cause").is_ok());
    }
}
