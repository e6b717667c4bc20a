//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod addresses;
#[allow(clippy::missing_errors_doc)]
pub mod categories;
#[allow(clippy::missing_errors_doc)]
pub mod cities;
#[allow(clippy::missing_errors_doc)]
pub mod localities;
#[allow(clippy::missing_errors_doc)]
pub mod states;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{get, put};

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};
use estore_domain::id::Identifier;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a path segment or body field into a typed id.
///
/// A malformed value is a `400` naming the id's field.
pub(crate) fn parse_id<T: Identifier>(value: &str) -> Result<T, ApiError> {
    Ok(value.parse::<T>()?)
}

/// Build the `/api` sub-router.
pub fn routes<AR, UR, SR, CR, LR, KR>() -> Router<AppState<AR, UR, SR, CR, LR, KR>>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    Router::new()
        // Geography
        .route(
            "/states",
            get(states::list::<AR, UR, SR, CR, LR, KR>)
                .post(states::create::<AR, UR, SR, CR, LR, KR>),
        )
        .route("/states/{id}", get(states::get::<AR, UR, SR, CR, LR, KR>))
        .route(
            "/cities",
            get(cities::list::<AR, UR, SR, CR, LR, KR>)
                .post(cities::create::<AR, UR, SR, CR, LR, KR>),
        )
        .route("/cities/{id}", get(cities::get::<AR, UR, SR, CR, LR, KR>))
        .route(
            "/cities/by-state/{state_id}",
            get(cities::list_by_state::<AR, UR, SR, CR, LR, KR>),
        )
        .route(
            "/localities",
            get(localities::list::<AR, UR, SR, CR, LR, KR>)
                .post(localities::create::<AR, UR, SR, CR, LR, KR>),
        )
        .route("/localities/{id}", get(localities::get::<AR, UR, SR, CR, LR, KR>))
        .route(
            "/localities/by-city/{city_id}",
            get(localities::list_by_city::<AR, UR, SR, CR, LR, KR>),
        )
        // Catalogue
        .route(
            "/categories",
            get(categories::list::<AR, UR, SR, CR, LR, KR>)
                .post(categories::create::<AR, UR, SR, CR, LR, KR>),
        )
        .route(
            "/categories/{id}",
            get(categories::get::<AR, UR, SR, CR, LR, KR>)
                .put(categories::update::<AR, UR, SR, CR, LR, KR>)
                .delete(categories::delete::<AR, UR, SR, CR, LR, KR>),
        )
        .route(
            "/categories/{id}/status",
            put(categories::set_status::<AR, UR, SR, CR, LR, KR>),
        )
        // Users
        .route(
            "/users",
            get(users::list::<AR, UR, SR, CR, LR, KR>)
                .post(users::create::<AR, UR, SR, CR, LR, KR>),
        )
        .route("/users/{user_id}", get(users::get::<AR, UR, SR, CR, LR, KR>))
        // Addresses
        .route(
            "/users/{user_id}/addresses",
            get(addresses::list::<AR, UR, SR, CR, LR, KR>)
                .post(addresses::create::<AR, UR, SR, CR, LR, KR>),
        )
        .route(
            "/users/{user_id}/addresses/default",
            get(addresses::get_default::<AR, UR, SR, CR, LR, KR>),
        )
        .route(
            "/users/{user_id}/addresses/{address_id}",
            get(addresses::get::<AR, UR, SR, CR, LR, KR>)
                .put(addresses::update::<AR, UR, SR, CR, LR, KR>)
                .delete(addresses::delete::<AR, UR, SR, CR, LR, KR>),
        )
        .route(
            "/users/{user_id}/addresses/{address_id}/default",
            put(addresses::set_default::<AR, UR, SR, CR, LR, KR>),
        )
}
