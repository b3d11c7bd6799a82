//! User roles and the ordinal hierarchy used for every authorization check.
//!
//! The hierarchy is a total order: viewer(1) < manager(2) < admin(3).
//! Checks always compare integer levels via [`Role::allows`], never enum
//! identity, so a manager satisfies any viewer-gated operation and an admin
//! satisfies everything.

use serde::{Deserialize, Serialize};

/// A user's role, stored in the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Manager,
    Admin,
}

impl Role {
    /// Ordinal level for hierarchy comparison.
    pub fn level(self) -> u8 {
        match self {
            Role::Viewer => 1,
            Role::Manager => 2,
            Role::Admin => 3,
        }
    }

    /// True iff this role meets or exceeds `required`.
    pub fn allows(self, required: Role) -> bool {
        self.level() >= required.level()
    }

    /// The stored label for this role (matches the Postgres enum).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
