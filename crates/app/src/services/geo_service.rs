//! Geography service: states, cities and localities.
//!
//! Reads are open to every caller; creating records is a staff operation.

use estore_domain::access::AccessContext;
use estore_domain::error::{ConflictError, EstoreError, NotFoundError};
use estore_domain::geo::{City, Locality, State};
use estore_domain::id::{CityId, LocalityId, StateId};

use crate::ports::{CityRepository, LocalityRepository, StateRepository};

/// Application service for the state → city → locality catalogue.
pub struct GeoService<S, C, L> {
    states: S,
    cities: C,
    localities: L,
}

impl<S, C, L> GeoService<S, C, L>
where
    S: StateRepository,
    C: CityRepository,
    L: LocalityRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(states: S, cities: C, localities: L) -> Self {
        Self {
            states,
            cities,
            localities,
        }
    }

    /// List all states.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_states(&self) -> Result<Vec<State>, EstoreError> {
        self.states.get_all().await
    }

    /// Look up a state by id.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when no state with `id` exists,
    /// or a storage error.
    pub async fn get_state(&self, id: StateId) -> Result<State, EstoreError> {
        self.states.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "State",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Create a state. Names and codes are unique.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`] for non-staff callers,
    /// [`EstoreError::Validation`], [`EstoreError::Conflict`] when the name or
    /// code is taken, or a storage error.
    #[tracing::instrument(skip(self, ctx, state), fields(state_name = %state.name))]
    pub async fn create_state(
        &self,
        ctx: &AccessContext,
        state: State,
    ) -> Result<State, EstoreError> {
        ctx.ensure_staff()?;
        state.validate()?;
        if self.states.find_by_name(&state.name).await?.is_some() {
            return Err(ConflictError {
                entity: "State",
                field: "name",
                value: state.name,
            }
            .into());
        }
        if self.states.find_by_code(&state.code).await?.is_some() {
            return Err(ConflictError {
                entity: "State",
                field: "code",
                value: state.code,
            }
            .into());
        }
        self.states.create(state).await
    }

    /// List all cities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_cities(&self) -> Result<Vec<City>, EstoreError> {
        self.cities.get_all().await
    }

    /// Look up a city by id.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when no city with `id` exists,
    /// or a storage error.
    pub async fn get_city(&self, id: CityId) -> Result<City, EstoreError> {
        self.cities.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "City",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the cities of a state.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when the state does not exist,
    /// or a storage error.
    pub async fn list_cities_by_state(&self, state_id: StateId) -> Result<Vec<City>, EstoreError> {
        self.get_state(state_id).await?;
        self.cities.find_by_state(state_id).await
    }

    /// Create a city inside an existing state.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`], [`EstoreError::Validation`],
    /// [`EstoreError::NotFound`] for an unknown state, or a storage error.
    #[tracing::instrument(skip(self, ctx, city), fields(city_name = %city.name))]
    pub async fn create_city(&self, ctx: &AccessContext, city: City) -> Result<City, EstoreError> {
        ctx.ensure_staff()?;
        city.validate()?;
        self.get_state(city.state_id).await?;
        self.cities.create(city).await
    }

    /// List all localities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_localities(&self) -> Result<Vec<Locality>, EstoreError> {
        self.localities.get_all().await
    }

    /// Look up a locality by id.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when no locality with `id` exists,
    /// or a storage error.
    pub async fn get_locality(&self, id: LocalityId) -> Result<Locality, EstoreError> {
        self.localities.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Locality",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the localities of a city.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::NotFound`] when the city does not exist,
    /// or a storage error.
    pub async fn list_localities_by_city(
        &self,
        city_id: CityId,
    ) -> Result<Vec<Locality>, EstoreError> {
        self.get_city(city_id).await?;
        self.localities.find_by_city(city_id).await
    }

    /// Create a locality inside an existing city.
    ///
    /// # Errors
    ///
    /// Returns [`EstoreError::Forbidden`], [`EstoreError::Validation`],
    /// [`EstoreError::NotFound`] for an unknown city, or a storage error.
    #[tracing::instrument(skip(self, ctx, locality), fields(locality_name = %locality.name))]
    pub async fn create_locality(
        &self,
        ctx: &AccessContext,
        locality: Locality,
    ) -> Result<Locality, EstoreError> {
        ctx.ensure_staff()?;
        locality.validate()?;
        self.get_city(locality.city_id).await?;
        self.localities.create(locality).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estore_domain::error::{ForbiddenError, ValidationError};
    use estore_domain::geo::LocalityPath;
    use estore_domain::id::UserId;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryStateRepo {
        rows: Mutex<Vec<State>>,
    }

    impl StateRepository for InMemoryStateRepo {
        fn create(&self, state: State) -> impl Future<Output = Result<State, EstoreError>> + Send {
            self.rows.lock().unwrap().push(state.clone());
            async { Ok(state) }
        }

        fn get_by_id(
            &self,
            id: StateId,
        ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send {
            let result = self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<State>, EstoreError>> + Send {
            let result = self.rows.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn find_by_name(
            &self,
            name: &str,
        ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send {
            let result = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.name == name)
                .cloned();
            async { Ok(result) }
        }

        fn find_by_code(
            &self,
            code: &str,
        ) -> impl Future<Output = Result<Option<State>, EstoreError>> + Send {
            let result = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.code == code)
                .cloned();
            async { Ok(result) }
        }
    }

    #[derive(Default)]
    struct InMemoryCityRepo {
        rows: Mutex<Vec<City>>,
    }

    impl CityRepository for InMemoryCityRepo {
        fn create(&self, city: City) -> impl Future<Output = Result<City, EstoreError>> + Send {
            self.rows.lock().unwrap().push(city.clone());
            async { Ok(city) }
        }

        fn get_by_id(
            &self,
            id: CityId,
        ) -> impl Future<Output = Result<Option<City>, EstoreError>> + Send {
            let result = self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<City>, EstoreError>> + Send {
            let result = self.rows.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn find_by_state(
            &self,
            state_id: StateId,
        ) -> impl Future<Output = Result<Vec<City>, EstoreError>> + Send {
            let result: Vec<City> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.state_id == state_id)
                .cloned()
                .collect();
            async { Ok(result) }
        }
    }

    #[derive(Default)]
    struct InMemoryLocalityRepo {
        rows: Mutex<Vec<Locality>>,
    }

    impl LocalityRepository for InMemoryLocalityRepo {
        fn create(
            &self,
            locality: Locality,
        ) -> impl Future<Output = Result<Locality, EstoreError>> + Send {
            self.rows.lock().unwrap().push(locality.clone());
            async { Ok(locality) }
        }

        fn get_by_id(
            &self,
            id: LocalityId,
        ) -> impl Future<Output = Result<Option<Locality>, EstoreError>> + Send {
            let result = self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Locality>, EstoreError>> + Send {
            let result = self.rows.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn find_by_city(
            &self,
            city_id: CityId,
        ) -> impl Future<Output = Result<Vec<Locality>, EstoreError>> + Send {
            let result: Vec<Locality> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.city_id == city_id)
                .cloned()
                .collect();
            async { Ok(result) }
        }

        fn get_path(
            &self,
            _id: LocalityId,
        ) -> impl Future<Output = Result<Option<LocalityPath>, EstoreError>> + Send {
            async { Ok(None) }
        }
    }

    type Service = GeoService<InMemoryStateRepo, InMemoryCityRepo, InMemoryLocalityRepo>;

    fn make_service() -> Service {
        GeoService::new(
            InMemoryStateRepo::default(),
            InMemoryCityRepo::default(),
            InMemoryLocalityRepo::default(),
        )
    }

    fn staff() -> AccessContext {
        AccessContext::admin(UserId::new())
    }

    #[tokio::test]
    async fn should_create_hierarchy_when_caller_is_staff() {
        let svc = make_service();
        let state = svc
            .create_state(&staff(), State::new("Karnataka", "KA").unwrap())
            .await
            .unwrap();
        let city = svc
            .create_city(&staff(), City::new("Bengaluru", state.id).unwrap())
            .await
            .unwrap();
        let locality = svc
            .create_locality(
                &staff(),
                Locality::new("Indiranagar", "560038", city.id).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(svc.list_cities_by_state(state.id).await.unwrap(), vec![city.clone()]);
        assert_eq!(svc.list_localities_by_city(city.id).await.unwrap(), vec![locality.clone()]);
        assert_eq!(svc.get_locality(locality.id).await.unwrap(), locality);
    }

    #[tokio::test]
    async fn should_forbid_customers_from_creating_states() {
        let svc = make_service();
        let result = svc
            .create_state(
                &AccessContext::customer(UserId::new()),
                State::new("Kerala", "KL").unwrap(),
            )
            .await;
        assert!(matches!(
            result,
            Err(EstoreError::Forbidden(ForbiddenError::StaffOnly))
        ));
        assert!(svc.list_states().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_duplicate_state_name_and_code() {
        let svc = make_service();
        svc.create_state(&staff(), State::new("Karnataka", "KA").unwrap())
            .await
            .unwrap();

        let same_name = svc
            .create_state(&staff(), State::new("Karnataka", "KR").unwrap())
            .await;
        assert!(matches!(same_name, Err(EstoreError::Conflict(ref c)) if c.field == "name"));

        let same_code = svc
            .create_state(&staff(), State::new("Kar", "KA").unwrap())
            .await;
        assert!(matches!(same_code, Err(EstoreError::Conflict(ref c)) if c.field == "code"));
    }

    #[tokio::test]
    async fn should_reject_city_for_unknown_state() {
        let svc = make_service();
        let result = svc
            .create_city(&staff(), City::new("Nowhere", StateId::new()).unwrap())
            .await;
        assert!(matches!(result, Err(EstoreError::NotFound(ref e)) if e.entity == "State"));
    }

    #[tokio::test]
    async fn should_reject_locality_for_unknown_city() {
        let svc = make_service();
        let result = svc
            .create_locality(
                &staff(),
                Locality::new("Somewhere", "000000", CityId::new()).unwrap(),
            )
            .await;
        assert!(matches!(result, Err(EstoreError::NotFound(ref e)) if e.entity == "City"));
    }

    #[tokio::test]
    async fn should_revalidate_records_built_outside_constructors() {
        let svc = make_service();
        let state = State {
            id: StateId::new(),
            name: String::new(),
            code: "KA".to_string(),
        };
        let result = svc.create_state(&staff(), state).await;
        assert!(matches!(
            result,
            Err(EstoreError::Validation(ValidationError::EmptyField("name")))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_listing_children_of_unknown_parent() {
        let svc = make_service();
        assert!(matches!(
            svc.list_cities_by_state(StateId::new()).await,
            Err(EstoreError::NotFound(_))
        ));
        assert!(matches!(
            svc.list_localities_by_city(CityId::new()).await,
            Err(EstoreError::NotFound(_))
        ));
    }
}
