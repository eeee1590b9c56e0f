//! Role and division vocabulary, and the actor view used by policy checks.
//!
//! Roles and divisions are closed enumerations stored as strings in the
//! database and in JWT claims. Parsing is fail-closed: an unrecognized
//! value is an error, and every authorization path treats that error as
//! a denial. String forms must match the seed data in
//! `20260301000001_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// An officer rank within the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Entry-level helper. May not file warrant requests.
    Ayudante,
    Detective,
    Coordinator,
    Commissioner,
    Chief,
    Captain,
    InternalAffairsAgent,
    InternalAffairsSupervisor,
    /// Bypasses all division checks.
    #[serde(rename = "admin")]
    Administrator,
}

/// Every role, in seed order. Used by tests and by admin user management
/// to enumerate the valid vocabulary.
pub const ALL_ROLES: &[Role] = &[
    Role::Ayudante,
    Role::Detective,
    Role::Coordinator,
    Role::Commissioner,
    Role::Chief,
    Role::Captain,
    Role::InternalAffairsAgent,
    Role::InternalAffairsSupervisor,
    Role::Administrator,
];

impl Role {
    /// Stable string form used in the database and in JWT claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Ayudante => "ayudante",
            Role::Detective => "detective",
            Role::Coordinator => "coordinator",
            Role::Commissioner => "commissioner",
            Role::Chief => "chief",
            Role::Captain => "captain",
            Role::InternalAffairsAgent => "internal_affairs_agent",
            Role::InternalAffairsSupervisor => "internal_affairs_supervisor",
            Role::Administrator => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ayudante" => Ok(Role::Ayudante),
            "detective" => Ok(Role::Detective),
            "coordinator" => Ok(Role::Coordinator),
            "commissioner" => Ok(Role::Commissioner),
            "chief" => Ok(Role::Chief),
            "captain" => Ok(Role::Captain),
            "internal_affairs_agent" => Ok(Role::InternalAffairsAgent),
            "internal_affairs_supervisor" => Ok(Role::InternalAffairsSupervisor),
            "admin" => Ok(Role::Administrator),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// An organizational scope controlling visibility of case files and
/// sanction registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Division {
    DetectiveBureau,
    InternalAffairs,
    DepartmentOfJustice,
}

pub const ALL_DIVISIONS: &[Division] = &[
    Division::DetectiveBureau,
    Division::InternalAffairs,
    Division::DepartmentOfJustice,
];

impl Division {
    /// Stable string form used in the database and in JWT claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Division::DetectiveBureau => "detective_bureau",
            Division::InternalAffairs => "internal_affairs",
            Division::DepartmentOfJustice => "department_of_justice",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Division {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detective_bureau" => Ok(Division::DetectiveBureau),
            "internal_affairs" => Ok(Division::InternalAffairs),
            "department_of_justice" => Ok(Division::DepartmentOfJustice),
            other => Err(CoreError::Validation(format!("Unknown division '{other}'"))),
        }
    }
}

/// The authenticated-person view every policy predicate takes.
///
/// There is no ambient "current session" in this crate; callers pass the
/// actor explicitly to each query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
    pub divisions: Vec<Division>,
}

impl Actor {
    pub fn new(id: DbId, role: Role, divisions: Vec<Division>) -> Self {
        Self {
            id,
            role,
            divisions,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    pub fn in_division(&self, division: Division) -> bool {
        self.divisions.contains(&division)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_string_form() {
        for role in ALL_ROLES {
            let parsed: Role = role.as_str().parse().expect("seed value must parse");
            assert_eq!(parsed, *role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("sergeant".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err()); // case-sensitive
    }

    #[test]
    fn test_division_round_trips_through_string_form() {
        for division in ALL_DIVISIONS {
            let parsed: Division = division.as_str().parse().expect("seed value must parse");
            assert_eq!(parsed, *division);
        }
    }

    #[test]
    fn test_unknown_division_rejected() {
        assert!("traffic".parse::<Division>().is_err());
        assert!("".parse::<Division>().is_err());
    }

    #[test]
    fn test_actor_division_membership() {
        let actor = Actor::new(1, Role::Detective, vec![Division::DetectiveBureau]);
        assert!(actor.in_division(Division::DetectiveBureau));
        assert!(!actor.in_division(Division::InternalAffairs));
        assert!(!actor.is_admin());
    }
}
