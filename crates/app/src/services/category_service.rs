//! Category service: the catalogue tree.
//!
//! Parents must exist and a category may never end up below itself. Tree
//! writes are serialized in-process so two concurrent re-parentings cannot
//! close a loop between them.

use estore_domain::access::AccessContext;
use estore_domain::category::{
    Category, CategoryDraft, CategoryStatus, CategorySummary, CategoryView,
};
use estore_domain::error::{EstoreError, NotFoundError, ValidationError};
use estore_domain::id::CategoryId;
use tokio::sync::Mutex;

use crate::ports::CategoryRepository;

/// Application service for category maintenance.
pub struct CategoryService<R> {
    repo: R,
    tree: Mutex<()>,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tree: Mutex::new(()),
        }
    }

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_categories(&self) -> Result<Vec<Category>, EstoreError> {
        self.repo.get_all().await
    }

    /// Look up a category with its parent and direct children.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] or a storage error.
    pub async fn get_category(&self, id: CategoryId) -> Result<CategoryView, EstoreError> {
        let category = self.require(id).await?;
        self.expand(category).await
    }

    /// Create an active category, optionally below an existing parent.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`] for non-staff callers,
    /// [`EstoreError::Validation`], [`EstoreError::NotFound`] for an unknown
    /// parent, or a storage error.
    #[tracing::instrument(skip(self, ctx, draft), fields(caller = ?ctx.user_id()))]
    pub async fn create_category(
        &self,
        ctx: &AccessContext,
        draft: CategoryDraft,
    ) -> Result<CategoryView, EstoreError> {
        ctx.ensure_staff()?;
        let draft = draft.validate()?;

        let _tree = self.tree.lock().await;
        if let Some(parent_id) = draft.parent_id {
            self.require(parent_id).await?;
        }
        let created = self.repo.create(Category::from_draft(draft)).await?;
        tracing::debug!(
            category_id = %created.id,
            parent_id = ?created.parent_id,
            "category created"
        );
        self.expand(created).await
    }

    /// Rename, describe or move a category.
    ///
    /// A request without a parent moves the category to the top level.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] for an unknown category or parent,
    /// [`EstoreError::Forbidden`], [`EstoreError::Validation`] for a bad
    /// request or a parent that would close a cycle, or a storage error.
    #[tracing::instrument(skip(self, ctx, draft), fields(caller = ?ctx.user_id()))]
    pub async fn update_category(
        &self,
        ctx: &AccessContext,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<CategoryView, EstoreError> {
        self.require(id).await?;
        ctx.ensure_staff()?;
        let draft = draft.validate()?;

        let _tree = self.tree.lock().await;
        let mut category = self.require(id).await?;
        if let Some(parent_id) = draft.parent_id {
            self.ensure_can_attach(id, parent_id).await?;
        }
        category.apply(draft);
        let updated = self.repo.update(category).await?;
        self.expand(updated).await
    }

    /// Activate or deactivate a category.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`], [`EstoreError::Forbidden`], or a
    /// storage error.
    #[tracing::instrument(skip(self, ctx), fields(caller = ?ctx.user_id()))]
    pub async fn set_category_status(
        &self,
        ctx: &AccessContext,
        id: CategoryId,
        status: CategoryStatus,
    ) -> Result<CategoryView, EstoreError> {
        self.require(id).await?;
        ctx.ensure_staff()?;

        let _tree = self.tree.lock().await;
        let mut category = self.require(id).await?;
        if !category.set_status(status) {
            return self.expand(category).await;
        }
        let updated = self.repo.update(category).await?;
        tracing::debug!(
            category_id = %updated.id,
            status = updated.status.as_str(),
            "category status changed"
        );
        self.expand(updated).await
    }

    /// Delete a category and everything below it (super-admin only).
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`], [`EstoreError::Forbidden`], or a
    /// storage error.
    #[tracing::instrument(skip(self, ctx), fields(caller = ?ctx.user_id()))]
    pub async fn delete_category(
        &self,
        ctx: &AccessContext,
        id: CategoryId,
    ) -> Result<(), EstoreError> {
        self.require(id).await?;
        ctx.ensure_super_admin()?;

        let _tree = self.tree.lock().await;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn ensure_can_attach(
        &self,
        id: CategoryId,
        parent_id: CategoryId,
    ) -> Result<(), EstoreError> {
        if parent_id == id {
            return Err(ValidationError::CategoryCycle(id).into());
        }
        self.require(parent_id).await?;
        if self.repo.find_ancestors(parent_id).await?.contains(&id) {
            return Err(ValidationError::CategoryCycle(id).into());
        }
        Ok(())
    }

    async fn require(&self, id: CategoryId) -> Result<Category, EstoreError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn expand(&self, category: Category) -> Result<CategoryView, EstoreError> {
        let parent_category = match category.parent_id {
            Some(parent_id) => self
                .repo
                .get_by_id(parent_id)
                .await?
                .as_ref()
                .map(CategorySummary::from),
            None => None,
        };
        let sub_categories = self
            .repo
            .find_children(category.id)
            .await?
            .iter()
            .map(CategorySummary::from)
            .collect();
        Ok(CategoryView {
            category,
            parent_category,
            sub_categories,
        })
    }
}

fn not_found(id: CategoryId) -> EstoreError {
    NotFoundError {
        entity: "Category",
        id: id.to_string(),
    }
    .into()
}
