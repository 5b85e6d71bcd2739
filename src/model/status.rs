//! Record lifecycle status
//!
//! Records are never hard-deleted from the admin client (resumes aside);
//! they move between these states instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status shared by every portfolio record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Visible on the public portfolio
    #[default]
    Active,
    /// Hidden but editable
    Inactive,
    /// Hidden and locked by an administrator
    Blocked,
    /// Soft-deleted
    Deleted,
}

impl Status {
    /// Get all statuses for iteration
    pub fn all() -> &'static [Status] {
        &[
            Status::Active,
            Status::Inactive,
            Status::Blocked,
            Status::Deleted,
        ]
    }

    /// Wire representation (`ACTIVE`, `INACTIVE`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Inactive => "INACTIVE",
            Status::Blocked => "BLOCKED",
            Status::Deleted => "DELETED",
        }
    }

    /// Whether a record in this state is shown publicly
    pub fn is_public(&self) -> bool {
        matches!(self, Status::Active)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status: {0}. Use ACTIVE, INACTIVE, BLOCKED or DELETED")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(Status::Active),
            "INACTIVE" => Ok(Status::Inactive),
            "BLOCKED" => Ok(Status::Blocked),
            "DELETED" => Ok(Status::Deleted),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!("active".parse::<Status>(), Ok(Status::Active));
        assert_eq!(" Blocked ".parse::<Status>(), Ok(Status::Blocked));
        assert!("archived".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&Status::Inactive).unwrap();
        assert_eq!(json, "\"INACTIVE\"");

        let restored: Status = serde_json::from_str("\"DELETED\"").unwrap();
        assert_eq!(restored, Status::Deleted);
    }

    #[test]
    fn test_only_active_is_public() {
        let public: Vec<_> = Status::all().iter().filter(|s| s.is_public()).collect();
        assert_eq!(public, vec![&Status::Active]);
    }
}
