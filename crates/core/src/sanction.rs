//! Disciplinary sanction vocabulary and creation rules.
//!
//! Sanctions have no lifecycle states; their create/update/delete
//! operations are each gated by division manage rights against the
//! registry that owns the subject officer. The Detective Bureau and
//! Internal Affairs registries are disjoint even though the record shape
//! is identical.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length for a sanction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

pub const ALL_SEVERITIES: &[Severity] = &[Severity::Minor, Severity::Moderate, Severity::Severe];

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minor" => Ok(Severity::Minor),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            other => Err(CoreError::Validation(format!("Unknown severity '{other}'"))),
        }
    }
}

/// Validate the caller-supplied fields of a new or updated sanction.
pub fn validate_sanction_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Description must not be empty".to_string(),
        ));
    }
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the caller-supplied fields of a new officer registry entry.
pub fn validate_new_officer(full_name: &str) -> Result<(), CoreError> {
    if full_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Officer name must not be empty".to_string(),
        ));
    }
    Ok(())
}
