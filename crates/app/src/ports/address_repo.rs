//! Address repository port.
//!
//! The default flag is the only cross-row rule in the address table: a user
//! has at most one default address. Every write that can set the flag is a
//! single atomic unit on the implementation side, so callers never observe
//! two defaults, and never observe zero because a swap was half-applied.

use std::future::Future;

use estore_domain::address::Address;
use estore_domain::error::EstoreError;
use estore_domain::id::{AddressId, UserId};

/// Repository for persisting and querying [`Address`]es.
pub trait AddressRepository {
    /// Insert a new address.
    ///
    /// When `address.is_default` is set, every other default address of the
    /// same user is cleared in the same transaction.
    fn create(&self, address: Address)
    -> impl Future<Output = Result<Address, EstoreError>> + Send;

    /// Get an address by its unique identifier.
    fn get_by_id(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<Address>, EstoreError>> + Send;

    /// All addresses of a user, in creation order.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Address>, EstoreError>> + Send;

    /// The user's default address, if one is flagged.
    fn find_default_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Address>, EstoreError>> + Send;

    /// Number of addresses owned by the user.
    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<usize, EstoreError>> + Send;

    /// Overwrite an existing address.
    ///
    /// Same default handling as [`AddressRepository::create`]. Clearing the
    /// flag is written as-is; nothing else is promoted.
    fn update(&self, address: Address)
    -> impl Future<Output = Result<Address, EstoreError>> + Send;

    /// Delete an address.
    ///
    /// If the deleted row was the default and the owner has other addresses,
    /// the oldest remaining one becomes default in the same transaction and
    /// is returned.
    fn delete(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<Address>, EstoreError>> + Send;
}
