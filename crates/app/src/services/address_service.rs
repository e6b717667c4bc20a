//! Address service: use-cases for a user's delivery addresses.
//!
//! Owns the default-address rule: once a user has an address, exactly one of
//! them is default. The first address always becomes default, asking for a
//! default elsewhere moves the flag, and deleting the default hands the flag
//! to the oldest remaining address.
//!
//! `update_address` may clear the flag of the current default without
//! promoting anything else, leaving the user with no default until another
//! address is made default. That permissive behaviour is kept on purpose and
//! logged at `warn` when it happens.

use std::collections::HashMap;

use estore_domain::access::AccessContext;
use estore_domain::address::{Address, AddressDraft, AddressView};
use estore_domain::error::{EstoreError, NotFoundError};
use estore_domain::geo::LocalityPath;
use estore_domain::id::{AddressId, LocalityId, UserId};
use estore_domain::user::User;

use crate::ports::{AddressRepository, LocalityRepository, UserRepository};
use crate::user_locks::UserLocks;

/// Application service for address CRUD and default-flag maintenance.
pub struct AddressService<A, U, L> {
    addresses: A,
    users: U,
    localities: L,
    locks: UserLocks,
}

impl<A, U, L> AddressService<A, U, L>
where
    A: AddressRepository,
    U: UserRepository,
    L: LocalityRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(addresses: A, users: U, localities: L) -> Self {
        Self {
            addresses,
            users,
            localities,
            locks: UserLocks::default(),
        }
    }

    /// List every address of a user, expanded.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when the user does not exist,
    /// [`EstoreError::Forbidden`] when the caller may not read the user's
    /// data, or a storage error from a repository.
    #[tracing::instrument(skip(self, ctx), fields(caller = ?ctx.user_id()))]
    pub async fn list_addresses(
        &self,
        ctx: &AccessContext,
        user_id: UserId,
    ) -> Result<Vec<AddressView>, EstoreError> {
        self.require_user(user_id).await?;
        ctx.ensure_can_act_for(user_id)?;

        let addresses = self.addresses.find_by_user(user_id).await?;
        let mut paths: HashMap<LocalityId, LocalityPath> = HashMap::new();
        let mut views = Vec::with_capacity(addresses.len());
        for address in addresses {
            let path = match paths.get(&address.locality_id) {
                Some(path) => path.clone(),
                None => {
                    let path = self.require_path(address.locality_id).await?;
                    paths.insert(address.locality_id, path.clone());
                    path
                }
            };
            views.push(AddressView::new(address, path));
        }
        Ok(views)
    }

    /// Look up one address by id.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when no address with `id` exists,
    /// [`EstoreError::Forbidden`] when it belongs to someone the caller may
    /// not act for, or a storage error.
    #[tracing::instrument(skip(self, ctx), fields(caller = ?ctx.user_id()))]
    pub async fn get_address(
        &self,
        ctx: &AccessContext,
        id: AddressId,
    ) -> Result<AddressView, EstoreError> {
        let address = self.require_address(id).await?;
        ctx.ensure_can_act_for(address.user_id)?;
        self.expand(address).await
    }

    /// Create an address for `user_id`.
    ///
    /// The new address is default when the request asks for it or when the
    /// user owns no address yet. Taking the flag clears it on the previous
    /// default in the same store transaction.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] for an unknown user or locality,
    /// [`EstoreError::Forbidden`], [`EstoreError::Validation`] for a bad
    /// request (nothing is written), [`EstoreError::InvariantViolation`] if
    /// the store refuses the default swap, or a storage error.
    #[tracing::instrument(skip(self, ctx, draft), fields(caller = ?ctx.user_id()))]
    pub async fn create_address(
        &self,
        ctx: &AccessContext,
        user_id: UserId,
        draft: AddressDraft,
    ) -> Result<AddressView, EstoreError> {
        self.require_user(user_id).await?;
        ctx.ensure_can_act_for(user_id)?;
        let draft = draft.validate()?;
        let path = self.require_path(draft.locality_id).await?;

        let _guard = self.locks.lock(user_id).await;
        let owned = self.addresses.count_by_user(user_id).await?;
        let is_default = draft.is_default || owned == 0;

        let created = self
            .addresses
            .create(Address::from_draft(user_id, draft, is_default))
            .await?;
        tracing::debug!(address_id = %created.id, is_default, "address created");
        Ok(AddressView::new(created, path))
    }

    /// Overwrite every mutable field of an address, the default flag included.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] for an unknown address or locality,
    /// [`EstoreError::Forbidden`], [`EstoreError::Validation`],
    /// [`EstoreError::InvariantViolation`], or a storage error.
    #[tracing::instrument(skip(self, ctx, draft), fields(caller = ?ctx.user_id()))]
    pub async fn update_address(
        &self,
        ctx: &AccessContext,
        id: AddressId,
        draft: AddressDraft,
    ) -> Result<AddressView, EstoreError> {
        let address = self.require_address(id).await?;
        ctx.ensure_can_act_for(address.user_id)?;
        let draft = draft.validate()?;
        let path = self.require_path(draft.locality_id).await?;

        let _guard = self.locks.lock(address.user_id).await;
        let mut address = self.require_address(id).await?;
        let was_default = address.is_default;
        address.apply(draft);

        let updated = self.addresses.update(address).await?;
        if was_default && !updated.is_default {
            tracing::warn!(
                user_id = %updated.user_id,
                address_id = %updated.id,
                "default flag cleared by update, user has no default address"
            );
        }
        Ok(AddressView::new(updated, path))
    }

    /// Delete an address, promoting another one if it was the default.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when the address does not exist,
    /// [`EstoreError::Forbidden`], or a storage error.
    #[tracing::instrument(skip(self, ctx), fields(caller = ?ctx.user_id()))]
    pub async fn delete_address(
        &self,
        ctx: &AccessContext,
        id: AddressId,
    ) -> Result<(), EstoreError> {
        let address = self.require_address(id).await?;
        ctx.ensure_can_act_for(address.user_id)?;

        let _guard = self.locks.lock(address.user_id).await;
        self.require_address(id).await?;
        if let Some(promoted) = self.addresses.delete(id).await? {
            tracing::debug!(address_id = %promoted.id, "promoted to default after delete");
        }
        Ok(())
    }

    /// Make an address its owner's default.
    ///
    /// Already-default addresses are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when the address does not exist,
    /// [`EstoreError::Forbidden`], [`EstoreError::InvariantViolation`], or a
    /// storage error.
    #[tracing::instrument(skip(self, ctx), fields(caller = ?ctx.user_id()))]
    pub async fn set_default_address(
        &self,
        ctx: &AccessContext,
        id: AddressId,
    ) -> Result<AddressView, EstoreError> {
        let address = self.require_address(id).await?;
        ctx.ensure_can_act_for(address.user_id)?;

        let _guard = self.locks.lock(address.user_id).await;
        let mut address = self.require_address(id).await?;
        if address.is_default {
            return self.expand(address).await;
        }

        address.is_default = true;
        let updated = self.addresses.update(address).await?;
        tracing::debug!(address_id = %updated.id, "default address changed");
        self.expand(updated).await
    }

    /// The user's default address, or `None` when no address is flagged.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when the user does not exist,
    /// [`EstoreError::Forbidden`], or a storage error.
    #[tracing::instrument(skip(self, ctx), fields(caller = ?ctx.user_id()))]
    pub async fn get_default_address(
        &self,
        ctx: &AccessContext,
        user_id: UserId,
    ) -> Result<Option<AddressView>, EstoreError> {
        self.require_user(user_id).await?;
        ctx.ensure_can_act_for(user_id)?;

        match self.addresses.find_default_by_user(user_id).await? {
            Some(address) => self.expand(address).await.map(Some),
            None => Ok(None),
        }
    }

    /// Check that `id` names an address owned by `user_id`.
    ///
    /// An address owned by someone else is reported exactly like a missing
    /// one, so routes scoped to a user never reveal foreign addresses.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when the address does not exist or
    /// belongs to another user, or a storage error.
    pub async fn ensure_belongs_to(
        &self,
        user_id: UserId,
        id: AddressId,
    ) -> Result<(), EstoreError> {
        match self.addresses.get_by_id(id).await? {
            Some(address) if address.user_id == user_id => Ok(()),
            _ => Err(NotFoundError {
                entity: "Address",
                id: id.to_string(),
            }
            .into()),
        }
    }

    async fn require_user(&self, id: UserId) -> Result<User, EstoreError> {
        self.users.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn require_address(&self, id: AddressId) -> Result<Address, EstoreError> {
        self.addresses.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Address",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn require_path(&self, id: LocalityId) -> Result<LocalityPath, EstoreError> {
        self.localities.get_path(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Locality",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn expand(&self, address: Address) -> Result<AddressView, EstoreError> {
        let path = self.require_path(address.locality_id).await?;
        Ok(AddressView::new(address, path))
    }
}
