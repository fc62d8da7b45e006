//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - User role definitions

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};

/// User roles within the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform administrator, full access.
    Admin,
    /// Site manager, manages their own organizations.
    Manager,
    /// Resident, read-only access to their own data.
    Resident,
}

impl UserRole {
    /// Parses a role from its stored text form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "resident" => Some(Self::Resident),
            _ => None,
        }
    }

    /// Returns the stored text form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Resident => "resident",
        }
    }

    /// Returns true if this role can manage organizations, units, and dues.
    #[must_use]
    pub const fn can_manage(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Returns true if this role can trigger the overdue sweep.
    #[must_use]
    pub const fn can_sweep(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Admin.can_manage());
        assert!(UserRole::Manager.can_manage());
        assert!(!UserRole::Resident.can_manage());

        assert!(UserRole::Admin.can_sweep());
        assert!(UserRole::Manager.can_sweep());
        assert!(!UserRole::Resident.can_sweep());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Manager, UserRole::Resident] {
            assert_eq!(UserRole::parse(&role.to_string()), Some(role));
        }
        assert_eq!(UserRole::parse("owner"), None);
    }
}
