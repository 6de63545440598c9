use serde::{Deserialize, Serialize};

use crate::models::Role;
use crate::types::OwnerId;

/// A registered ledger user as known to the store's user directory.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: OwnerId,
    pub phone: String,
    pub role: Role
}

/// The verified identity on whose behalf an operation runs.
///
/// Credential verification happens upstream; the core only ever sees the resulting
/// `(user_id, role)` pair and receives it explicitly on every call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Caller {
    pub user_id: OwnerId,
    pub role: Role
}

impl Caller {
    pub fn user(user_id: OwnerId) -> Self {
        Self { user_id, role: Role::User }
    }

    pub fn admin(user_id: OwnerId) -> Self {
        Self { user_id, role: Role::Admin }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn owns(&self, owner_id: OwnerId) -> bool {
        self.user_id == owner_id
    }

    /// Administrators may act on any record, everyone else only on their own.
    pub fn may_access(&self, owner_id: OwnerId) -> bool {
        self.is_admin() || self.owns(owner_id)
    }
}
