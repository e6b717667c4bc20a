//! Access context: who is calling, and what they may do.
//!
//! Every application operation receives an [`AccessContext`] and checks the
//! capability it needs before touching storage. The context is built by the
//! driving adapter (HTTP headers, CLI flags, tests) and carries no transport
//! types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EstoreError, ForbiddenError};
use crate::id::UserId;

/// Role granted to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Back-office roles allowed to manage other users' data and the catalogue.
    #[must_use]
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Stable textual form, shared by storage and HTTP headers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognised role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Principal {
    Anonymous,
    User { id: UserId, role: Role },
    System,
}

/// The caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessContext {
    principal: Principal,
}

impl AccessContext {
    /// A caller that did not identify itself.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            principal: Principal::Anonymous,
        }
    }

    /// An authenticated user holding `role`.
    #[must_use]
    pub fn user(id: UserId, role: Role) -> Self {
        Self {
            principal: Principal::User { id, role },
        }
    }

    #[must_use]
    pub fn customer(id: UserId) -> Self {
        Self::user(id, Role::Customer)
    }

    #[must_use]
    pub fn admin(id: UserId) -> Self {
        Self::user(id, Role::Admin)
    }

    #[must_use]
    pub fn super_admin(id: UserId) -> Self {
        Self::user(id, Role::SuperAdmin)
    }

    /// In-process caller (seeding, maintenance tasks). Holds every capability.
    #[must_use]
    pub fn system() -> Self {
        Self {
            principal: Principal::System,
        }
    }

    /// Id of the calling user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        match self.principal {
            Principal::User { id, .. } => Some(id),
            Principal::Anonymous | Principal::System => None,
        }
    }

    fn is_staff(&self) -> bool {
        match self.principal {
            Principal::System => true,
            Principal::User { role, .. } => role.is_staff(),
            Principal::Anonymous => false,
        }
    }

    /// Allow the owner of the data, or staff.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`] for anonymous callers and for
    /// customers acting on someone else's data.
    pub fn ensure_can_act_for(&self, owner: UserId) -> Result<(), EstoreError> {
        match self.principal {
            Principal::System => Ok(()),
            Principal::Anonymous => Err(ForbiddenError::Anonymous.into()),
            Principal::User { id, role } if id == owner || role.is_staff() => Ok(()),
            Principal::User { .. } => Err(ForbiddenError::NotOwner(owner).into()),
        }
    }

    /// Allow Admin, SuperAdmin and system callers.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`] for everyone else.
    pub fn ensure_staff(&self) -> Result<(), EstoreError> {
        match self.principal {
            Principal::Anonymous => Err(ForbiddenError::Anonymous.into()),
            _ if self.is_staff() => Ok(()),
            _ => Err(ForbiddenError::StaffOnly.into()),
        }
    }

    /// Allow SuperAdmin and system callers.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`] for everyone else.
    pub fn ensure_super_admin(&self) -> Result<(), EstoreError> {
        match self.principal {
            Principal::System
            | Principal::User {
                role: Role::SuperAdmin,
                ..
            } => Ok(()),
            Principal::Anonymous => Err(ForbiddenError::Anonymous.into()),
            Principal::User { .. } => Err(ForbiddenError::SuperAdminOnly.into()),
        }
    }

    /// Check that the caller may create an account holding `role`.
    ///
    /// Customers are created by staff; staff accounts only by a super-admin.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`] when the caller's role is too low.
    pub fn ensure_can_grant(&self, role: Role) -> Result<(), EstoreError> {
        if role.is_staff() {
            self.ensure_super_admin()
        } else {
            self.ensure_staff()
        }
    }
}
