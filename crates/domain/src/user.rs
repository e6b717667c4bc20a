//! User: the owner of addresses and the subject of access checks.

use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::error::{EstoreError, ValidationError};
use crate::id::UserId;
use crate::Timestamp;

/// A back-office or customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] when `name` is blank or `email`
    /// is not of the form `local@domain`.
    pub fn validate(&self) -> Result<(), EstoreError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if !is_plausible_email(&self.email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    name: Option<String>,
    email: Option<String>,
    role: Option<Role>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// Emails are stored lower-cased so uniqueness checks are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Validation`] if `name` or `email` is missing or malformed.
    pub fn build(self) -> Result<User, EstoreError> {
        let user = User {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default().trim().to_string(),
            email: self.email.unwrap_or_default().trim().to_lowercase(),
            role: self.role.unwrap_or_default(),
            created_at: chrono::Utc::now(),
        };
        user.validate()?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_customer_by_default() {
        let user = User::builder()
            .name("Asha Rao")
            .email("Asha@Example.com")
            .build()
            .unwrap();
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.email, "asha@example.com");
    }

    #[test]
    fn should_return_validation_error_when_name_is_blank() {
        let result = User::builder().name("   ").email("a@b.in").build();
        assert!(matches!(
            result,
            Err(EstoreError::Validation(ValidationError::EmptyField("name")))
        ));
    }

    #[test]
    fn should_reject_malformed_emails() {
        for email in ["", "no-at-sign", "@domain.in", "local@", "a@b@c", "a b@c.in"] {
            let result = User::builder().name("X").email(email).build();
            assert!(
                matches!(
                    result,
                    Err(EstoreError::Validation(ValidationError::InvalidEmail))
                ),
                "accepted {email:?}"
            );
        }
    }
}
