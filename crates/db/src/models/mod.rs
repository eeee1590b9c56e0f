//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches where applicable

pub mod announcement;
pub mod case;
pub mod officer;
pub mod sanction;
pub mod session;
pub mod user;
pub mod warrant;
