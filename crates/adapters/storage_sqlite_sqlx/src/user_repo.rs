//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use estore_app::ports::UserRepository;
use estore_domain::access::Role;
use estore_domain::error::{ConflictError, EstoreError};
use estore_domain::id::UserId;
use estore_domain::user::User;

use crate::decode;
use crate::error::{StorageError, is_unique_violation};

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let role: String = row.try_get("role")?;
        let created_at: String = row.try_get("created_at")?;

        let role = Role::from_str(&role).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(User {
            id: decode::id::<UserId>(&id)?,
            name,
            email,
            role,
            created_at: decode::timestamp(&created_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (id, name, email, role, created_at) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY created_at, rowid";
const SELECT_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(user.id.to_string())
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.role.as_str())
                .bind(decode::encode_timestamp(user.created_at))
                .execute(&pool)
                .await
                .map_err(|err| -> EstoreError {
                    if is_unique_violation(&err) {
                        ConflictError {
                            entity: "User",
                            field: "email",
                            value: user.email.clone(),
                        }
                        .into()
                    } else {
                        StorageError::from(err).into()
                    }
                })?;

            Ok(user)
        }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, EstoreError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_EMAIL)
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteUserRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    fn test_user(email: &str) -> User {
        User::builder()
            .name("Asha Rao")
            .email(email)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_and_retrieve_user_when_valid() {
        let repo = setup().await;
        let user = test_user("asha@example.com");
        let id = user.id;

        repo.create(user).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.email, "asha@example.com");
        assert_eq!(fetched.role, Role::Customer);
    }

    #[tokio::test]
    async fn should_return_none_when_user_not_found() {
        let repo = setup().await;
        assert!(repo.get_by_id(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_find_user_by_email() {
        let repo = setup().await;
        let user = test_user("asha@example.com");
        let id = user.id;
        repo.create(user).await.unwrap();

        let found = repo.find_by_email("asha@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(id));
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_report_conflict_when_email_taken() {
        let repo = setup().await;
        repo.create(test_user("asha@example.com")).await.unwrap();

        let result = repo.create(test_user("asha@example.com")).await;
        assert!(matches!(result, Err(EstoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_list_users_in_creation_order() {
        let repo = setup().await;
        let first = test_user("a@example.com");
        let second = test_user("b@example.com");
        let ids = vec![first.id, second.id];
        repo.create(first).await.unwrap();
        repo.create(second).await.unwrap();

        let all: Vec<UserId> = repo.get_all().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(all, ids);
    }

    #[tokio::test]
    async fn should_store_role_through_roundtrip() {
        let repo = setup().await;
        let admin = User::builder()
            .name("Ops")
            .email("ops@example.com")
            .role(Role::SuperAdmin)
            .build()
            .unwrap();
        let id = admin.id;
        repo.create(admin).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.role, Role::SuperAdmin);
    }
}
