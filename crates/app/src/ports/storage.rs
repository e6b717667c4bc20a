//! Storage port: repository traits for users and the geography catalogue.

use std::future::Future;

use estore_domain::error::EstoreError;
use estore_domain::geo::{City, Locality, LocalityPath, State};
use estore_domain::id::{CityId, LocalityId, StateId, UserId};
use estore_domain::user::User;

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Persist a new user.
    ///
    /// Implementations report a duplicate email as [`EstoreError::Conflict`].
    fn create(&self, user: User) -> impl Future<Output = Result<User, EstoreError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, EstoreError>> + Send;

    /// Get all users, oldest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, EstoreError>> + Send;

    /// Find a user by (lower-cased) email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, EstoreError>> + Send;
}

/// Repository for [`State`]s.
pub trait StateRepository {
    /// Persist a new state.
    fn create(&self, state: State) -> impl Future<Output = Result<State, EstoreError>> + Send;

    /// Get a state by its unique identifier.
    fn get_by_id(
        &self,
        id: StateId,
    ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send;

    /// Get all states ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<State>, EstoreError>> + Send;

    /// Find a state by exact name.
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send;

    /// Find a state by its two-letter code.
    fn find_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send;
}

/// Repository for [`City`] records.
pub trait CityRepository {
    /// Persist a new city.
    fn create(&self, city: City) -> impl Future<Output = Result<City, EstoreError>> + Send;

    /// Get a city by its unique identifier.
    fn get_by_id(
        &self,
        id: CityId,
    ) -> impl Future<Output = Result<Option<City>, EstoreError>> + Send;

    /// Get all cities ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<City>, EstoreError>> + Send;

    /// Get the cities of one state ordered by name.
    fn find_by_state(
        &self,
        state_id: StateId,
    ) -> impl Future<Output = Result<Vec<City>, EstoreError>> + Send;
}

/// Repository for [`Locality`] records.
pub trait LocalityRepository {
    /// Persist a new locality.
    fn create(
        &self,
        locality: Locality,
    ) -> impl Future<Output = Result<Locality, EstoreError>> + Send;

    /// Get a locality by its unique identifier.
    fn get_by_id(
        &self,
        id: LocalityId,
    ) -> impl Future<Output = Result<Option<Locality>, EstoreError>> + Send;

    /// Get all localities ordered by name.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Locality>, EstoreError>> + Send;

    /// Get the localities of one city ordered by name.
    fn find_by_city(
        &self,
        city_id: CityId,
    ) -> impl Future<Output = Result<Vec<Locality>, EstoreError>> + Send;

    /// Resolve a locality together with its city and state.
    fn get_path(
        &self,
        id: LocalityId,
    ) -> impl Future<Output = Result<Option<LocalityPath>, EstoreError>> + Send;
}
