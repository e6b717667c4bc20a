//! Common error types used across the workspace.
//!
//! Each layer converts into [`EstoreError`] through `#[from]`; adapters wrap
//! their own failures into [`EstoreError::Storage`].

use crate::id::{CategoryId, UserId};

/// Top-level error returned by every domain and application operation.
#[derive(Debug, thiserror::Error)]
pub enum EstoreError {
    /// A request or record failed a domain rule.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The caller lacks the capability required by the operation.
    #[error(transparent)]
    Forbidden(#[from] ForbiddenError),

    /// A uniqueness rule would be broken.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// The store refused a write that would break the default-address rule.
    #[error(transparent)]
    InvariantViolation(#[from] InvariantError),

    /// The persistence backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    EmptyField(&'static str),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("contact phone must be a valid 10-digit mobile number")]
    InvalidPhone,

    #[error("email address is malformed")]
    InvalidEmail,

    #[error("state code must be exactly two letters")]
    InvalidStateCode,

    #[error("{0} is not a valid identifier")]
    InvalidId(&'static str),

    #[error("'{0}' is not a known role")]
    InvalidRole(String),

    #[error("category {0} cannot sit below itself or one of its descendants")]
    CategoryCycle(CategoryId),
}

/// A lookup by id came back empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found with id {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Reasons an [`AccessContext`](crate::access::AccessContext) check fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenError {
    #[error("authentication required")]
    Anonymous,

    #[error("caller may not act on behalf of user {0}")]
    NotOwner(UserId),

    #[error("operation requires a staff role")]
    StaffOnly,

    #[error("operation requires the super-admin role")]
    SuperAdminOnly,
}

/// A unique field already holds the given value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with {field} '{value}' already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub field: &'static str,
    pub value: String,
}

/// Violations of the one-default-address-per-user rule detected at write time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("user {0} would end up with more than one default address")]
    MultipleDefaults(UserId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err = EstoreError::from(NotFoundError {
            entity: "Address",
            id: "42".to_string(),
        });
        assert_eq!(err.to_string(), "Address not found with id 42");
    }

    #[test]
    fn should_prefix_validation_messages() {
        let err = EstoreError::from(ValidationError::EmptyField("contact_name"));
        assert_eq!(
            err.to_string(),
            "validation error: contact_name must not be blank"
        );
    }

    #[test]
    fn should_keep_storage_source_out_of_display() {
        let source = std::io::Error::other("disk on fire");
        let err = EstoreError::Storage(Box::new(source));
        assert_eq!(err.to_string(), "storage error");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn should_render_conflict_with_value() {
        let err = ConflictError {
            entity: "State",
            field: "code",
            value: "KA".to_string(),
        };
        assert_eq!(err.to_string(), "State with code 'KA' already exists");
    }
}
