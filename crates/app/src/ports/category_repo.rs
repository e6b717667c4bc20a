//! Category repository port.

use std::future::Future;

use estore_domain::category::Category;
use estore_domain::error::EstoreError;
use estore_domain::id::CategoryId;

/// Repository for the [`Category`] tree.
pub trait CategoryRepository {
    /// Insert a new category.
    fn create(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Category, EstoreError>> + Send;

    /// Get a category by its unique identifier.
    fn get_by_id(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Option<Category>, EstoreError>> + Send;

    /// Get all categories ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, EstoreError>> + Send;

    /// Direct children of `parent_id`, ordered by name.
    fn find_children(
        &self,
        parent_id: CategoryId,
    ) -> impl Future<Output = Result<Vec<Category>, EstoreError>> + Send;

    /// Ids of every ancestor of `id`, nearest parent first.
    fn find_ancestors(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = Result<Vec<CategoryId>, EstoreError>> + Send;

    /// Overwrite a stored category.
    fn update(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Category, EstoreError>> + Send;

    /// Delete a category together with its whole subtree.
    ///
    /// Returns `false` when nothing was stored under `id`.
    fn delete(&self, id: CategoryId) -> impl Future<Output = Result<bool, EstoreError>> + Send;
}
