//! `SQLite` implementation of [`CategoryRepository`].
//!
//! Sub-categories reference their parent with `ON DELETE CASCADE`, so
//! deleting a category removes its subtree in the same statement.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use estore_app::ports::CategoryRepository;
use estore_domain::category::{Category, CategoryStatus};
use estore_domain::error::EstoreError;
use estore_domain::id::CategoryId;

use crate::decode;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Category`].
struct Wrapper(Category);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let parent_id: Option<String> = row.try_get("parent_id")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let status = CategoryStatus::parse(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown category status '{status}'").into(),
        })?;

        Ok(Self(Category {
            id: decode::id(&id)?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            parent_id: parent_id.as_deref().map(decode::id).transpose()?,
            status,
            created_at: decode::timestamp(&created_at)?,
            updated_at: decode::timestamp(&updated_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO categories \
     (id, name, description, image_url, parent_id, status, created_at, updated_at) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM categories WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM categories ORDER BY name, rowid";
const SELECT_CHILDREN: &str =
    "SELECT * FROM categories WHERE parent_id = ? ORDER BY name, rowid";
const SELECT_ANCESTORS: &str = "WITH RECURSIVE chain (id, parent_id, depth) AS ( \
         SELECT id, parent_id, 0 FROM categories WHERE id = ? \
         UNION ALL \
         SELECT c.id, c.parent_id, chain.depth + 1 \
         FROM categories c JOIN chain ON c.id = chain.parent_id \
     ) \
     SELECT id FROM chain WHERE depth > 0 ORDER BY depth";
const UPDATE: &str = "UPDATE categories SET \
     name = ?, description = ?, image_url = ?, parent_id = ?, status = ?, updated_at = ? \
     WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM categories WHERE id = ?";

/// `SQLite`-backed category repository.
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn create(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Category, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(category.id.to_string())
                .bind(&category.name)
                .bind(&category.description)
                .bind(&category.image_url)
                .bind(category.parent_id.map(|id| id.to_string()))
                .bind(category.status.as_str())
                .bind(decode::encode_timestamp(category.created_at))
                .bind(decode::encode_timestamp(category.updated_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(category)
        }
    }

    fn get_by_id(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_children(
        &self,
        parent_id: CategoryId,
    ) -> impl Future<Output = Result<Vec<Category>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_CHILDREN)
                .bind(parent_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_ancestors(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Vec<CategoryId>, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(String,)> = sqlx::query_as(SELECT_ANCESTORS)
                .bind(id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let ids = rows
                .iter()
                .map(|(id,)| decode::id(id))
                .collect::<Result<Vec<CategoryId>, _>>()
                .map_err(StorageError::from)?;
            Ok(ids)
        }
    }

    fn update(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Category, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&category.name)
                .bind(&category.description)
                .bind(&category.image_url)
                .bind(category.parent_id.map(|id| id.to_string()))
                .bind(category.status.as_str())
                .bind(decode::encode_timestamp(category.updated_at))
                .bind(category.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(category)
        }
    }

    fn delete(&self, id: CategoryId) -> impl Future<Output = Result<bool, EstoreError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
