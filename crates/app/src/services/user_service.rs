//! User service: account creation and lookup.

use estore_domain::access::AccessContext;
use estore_domain::error::{ConflictError, EstoreError, NotFoundError};
use estore_domain::id::UserId;
use estore_domain::user::User;

use crate::ports::UserRepository;

/// Application service for user accounts.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a user.
    ///
    /// Staff create customers; only a super-admin creates staff accounts.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`], [`EstoreError::Validation`],
    /// [`EstoreError::Conflict`] when the email is taken, or a storage error.
    #[tracing::instrument(skip(self, ctx, user), fields(role = %user.role))]
    pub async fn create_user(&self, ctx: &AccessContext, user: User) -> Result<User, EstoreError> {
        ctx.ensure_can_grant(user.role)?;
        user.validate()?;
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(ConflictError {
                entity: "User",
                field: "email",
                value: user.email,
            }
            .into());
        }
        self.repo.create(user).await
    }

    /// Look up a user by id. Customers may only read themselves.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`], [`EstoreError::NotFound`], or a
    /// storage error.
    pub async fn get_user(&self, ctx: &AccessContext, id: UserId) -> Result<User, EstoreError> {
        ctx.ensure_can_act_for(id)?;
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all users (staff only).
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`] or a storage error.
    pub async fn list_users(&self, ctx: &AccessContext) -> Result<Vec<User>, EstoreError> {
        ctx.ensure_staff()?;
        self.repo.get_all().await
    }
}
