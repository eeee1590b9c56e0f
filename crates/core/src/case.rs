//! Case file vocabulary, lifecycle, and creation rules.
//!
//! A case file is either a criminal case (Detective Bureau) or an internal
//! affairs case; the owning division is derived from the kind and controls
//! both visibility and who may move the case through its lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Division};
use crate::error::CoreError;
use crate::policy;
use crate::workflow::StateMachine;

/// Maximum length for a case title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a case description.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// The two case registries. Each keeps its own display numbering sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    Criminal,
    InternalAffairs,
}

pub const ALL_CASE_KINDS: &[CaseKind] = &[CaseKind::Criminal, CaseKind::InternalAffairs];

impl CaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseKind::Criminal => "criminal",
            CaseKind::InternalAffairs => "internal_affairs",
        }
    }

    /// The division that owns every case of this kind.
    pub fn owning_division(self) -> Division {
        match self {
            CaseKind::Criminal => Division::DetectiveBureau,
            CaseKind::InternalAffairs => Division::InternalAffairs,
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "criminal" => Ok(CaseKind::Criminal),
            "internal_affairs" => Ok(CaseKind::InternalAffairs),
            other => Err(CoreError::Validation(format!("Unknown case kind '{other}'"))),
        }
    }
}

/// Case lifecycle. Open is the initial state; Archived is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Open,
    Closed,
    Archived,
}

impl StateMachine for CaseStatus {
    const ENTITY: &'static str = "Case";

    fn can_transition(from: Self, to: Self) -> bool {
        matches!(
            (from, to),
            (CaseStatus::Open, CaseStatus::Closed)
                | (CaseStatus::Closed, CaseStatus::Open)
                | (CaseStatus::Closed, CaseStatus::Archived)
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::Closed => "closed",
            CaseStatus::Archived => "archived",
        }
    }

    fn is_terminal(self) -> bool {
        self == CaseStatus::Archived
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(StateMachine::as_str(*self))
    }
}

impl FromStr for CaseStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CaseStatus::Open),
            "closed" => Ok(CaseStatus::Closed),
            "archived" => Ok(CaseStatus::Archived),
            other => Err(CoreError::Validation(format!(
                "Unknown case status '{other}'"
            ))),
        }
    }
}

/// Whether the actor may see cases of this kind at all.
///
/// Callers must report a denial on a specific case id as not-found so the
/// existence of other-division records does not leak.
pub fn can_view_case(actor: &Actor, kind: CaseKind) -> bool {
    policy::can_manage_division_record(actor, kind.owning_division())
}

/// Transition-specific authorization, consulted after the edge itself has
/// been validated.
///
/// Closing an open case is allowed for assigned actors as well as division
/// members; reopening and archiving require division manage rights (being
/// assigned is not enough on its own).
pub fn can_transition_case(
    actor: &Actor,
    kind: CaseKind,
    is_assigned: bool,
    from: CaseStatus,
    to: CaseStatus,
) -> bool {
    let manages = policy::can_manage_division_record(actor, kind.owning_division());
    match (from, to) {
        (CaseStatus::Open, CaseStatus::Closed) => is_assigned || manages,
        (CaseStatus::Closed, CaseStatus::Open) | (CaseStatus::Closed, CaseStatus::Archived) => {
            manages
        }
        _ => false,
    }
}

/// Validate the caller-supplied fields of a new case.
pub fn validate_new_case(title: &str, location: &str, description: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    if location.trim().is_empty() {
        return Err(CoreError::Validation(
            "Location must not be empty".to_string(),
        ));
    }
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate one proposed assignee against the case's owning division.
///
/// Assignees must belong to the owning division or be administrators;
/// anyone else would gain visibility into a registry their divisions do
/// not grant.
pub fn validate_assignee(assignee: &Actor, kind: CaseKind) -> Result<(), CoreError> {
    if assignee.is_admin() || assignee.in_division(kind.owning_division()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Assignee {} does not belong to the {} division",
            assignee.id,
            kind.owning_division()
        )))
    }
}
