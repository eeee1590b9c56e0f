//! The policy evaluator.
//!
//! Pure predicates answering "may actor A perform action K". Every gate in
//! the API layer goes through this module so the role sets live in exactly
//! one place. All functions are total over well-formed input; malformed
//! role or division strings never reach this module because parsing at the
//! boundary is fail-closed (see [`crate::actor`]).

use serde::Serialize;

use crate::actor::{Actor, Division, Role};
use crate::types::DbId;

/// A navigable capability and the divisions allowed to use it.
///
/// An empty `required_divisions` slice means the feature is available to
/// every authenticated actor.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEntry {
    pub key: &'static str,
    pub required_divisions: &'static [Division],
}

/// The static feature catalog. Loaded once, never mutated at runtime;
/// safe for unsynchronized concurrent reads.
pub const FEATURE_CATALOG: &[FeatureEntry] = &[
    FeatureEntry {
        key: "criminal-cases",
        required_divisions: &[Division::DetectiveBureau],
    },
    FeatureEntry {
        key: "internal-affairs",
        required_divisions: &[Division::InternalAffairs],
    },
    FeatureEntry {
        key: "department-of-justice",
        required_divisions: &[Division::DepartmentOfJustice],
    },
    FeatureEntry {
        key: "warrants",
        required_divisions: &[],
    },
    FeatureEntry {
        key: "announcements",
        required_divisions: &[],
    },
    FeatureEntry {
        key: "documentation",
        required_divisions: &[],
    },
];

/// Look up a catalog entry by key.
pub fn feature(key: &str) -> Option<&'static FeatureEntry> {
    FEATURE_CATALOG.iter().find(|entry| entry.key == key)
}

/// Whether the actor may use the named feature.
///
/// Administrators always may. Otherwise the actor's division set must
/// intersect the feature's required set; an empty required set admits
/// everyone. An unknown key denies.
pub fn can_access_feature(actor: &Actor, key: &str) -> bool {
    let Some(entry) = feature(key) else {
        return false;
    };
    if actor.is_admin() {
        return true;
    }
    entry.required_divisions.is_empty()
        || entry
            .required_divisions
            .iter()
            .any(|division| actor.in_division(*division))
}

/// The feature keys visible to the actor, in catalog order. Drives
/// navigation; a pure function of its argument.
pub fn visible_features(actor: &Actor) -> Vec<&'static str> {
    FEATURE_CATALOG
        .iter()
        .filter(|entry| can_access_feature(actor, entry.key))
        .map(|entry| entry.key)
        .collect()
}

/// Whether the actor may post announcements.
pub fn can_post(actor: &Actor) -> bool {
    matches!(
        actor.role,
        Role::Detective | Role::Coordinator | Role::Commissioner | Role::Administrator
    )
}

/// Whether the actor may pin or unpin announcements. Strict subset of
/// [`can_post`].
pub fn can_pin(actor: &Actor) -> bool {
    matches!(
        actor.role,
        Role::Coordinator | Role::Commissioner | Role::Administrator
    )
}

/// Whether the actor may resolve pending warrant requests.
pub fn can_review_warrant(actor: &Actor) -> bool {
    matches!(
        actor.role,
        Role::Administrator | Role::Coordinator | Role::Commissioner | Role::Chief | Role::Captain
    )
}

/// Whether the actor may file warrant requests. Open to every role except
/// helpers, independent of division.
pub fn can_create_warrant(actor: &Actor) -> bool {
    actor.role != Role::Ayudante
}

/// Whether the actor may delete (or edit) an announcement authored by
/// `author_id`: the author themselves, or the elevated pin set.
pub fn can_delete_announcement(actor: &Actor, author_id: DbId) -> bool {
    actor.id == author_id || can_pin(actor)
}

/// Whether the actor may see and manage records owned by `division`.
pub fn can_manage_division_record(actor: &Actor, division: Division) -> bool {
    actor.is_admin() || actor.in_division(division)
}

/// An action submitted to [`evaluate`] by callers that want the uniform
/// allow/deny form instead of calling the predicates directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    AccessFeature(&'a str),
    Post,
    Pin,
    CreateWarrant,
    ReviewWarrant,
    DeleteAnnouncement { author_id: DbId },
    ManageDivisionRecord(Division),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    fn from_bool(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// Evaluate a single action for an actor.
pub fn evaluate(actor: &Actor, action: Action<'_>) -> Decision {
    let allowed = match action {
        Action::AccessFeature(key) => can_access_feature(actor, key),
        Action::Post => can_post(actor),
        Action::Pin => can_pin(actor),
        Action::CreateWarrant => can_create_warrant(actor),
        Action::ReviewWarrant => can_review_warrant(actor),
        Action::DeleteAnnouncement { author_id } => can_delete_announcement(actor, author_id),
        Action::ManageDivisionRecord(division) => can_manage_division_record(actor, division),
    };
    Decision::from_bool(allowed)
}
