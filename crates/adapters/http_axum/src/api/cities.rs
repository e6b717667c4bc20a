//! JSON REST handlers for cities.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};
use estore_domain::geo::City;
use estore_domain::id::{CityId, StateId};

use crate::access::Caller;
use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a city.
#[derive(Deserialize)]
pub struct CreateCityRequest {
    pub name: String,
    pub state_id: String,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<City>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<City>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<City>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/cities`
pub async fn list<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
) -> Result<ListResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let cities = state.geo_service.list_cities().await?;
    Ok(ListResponse::Ok(Json(cities)))
}

/// `GET /api/cities/by-state/{state_id}`
pub async fn list_by_state<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Path(state_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let state_id: StateId = parse_id(&state_id)?;
    let cities = state.geo_service.list_cities_by_state(state_id).await?;
    Ok(ListResponse::Ok(Json(cities)))
}

/// `GET /api/cities/{id}`
pub async fn get<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let city_id: CityId = parse_id(&id)?;
    let city = state.geo_service.get_city(city_id).await?;
    Ok(GetResponse::Ok(Json(city)))
}

/// `POST /api/cities`
pub async fn create<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateCityRequest>,
) -> Result<CreateResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let state_id: StateId = parse_id(&req.state_id)?;
    let city = City::new(&req.name, state_id)?;
    let created = state.geo_service.create_city(&ctx, city).await?;
    Ok(CreateResponse::Created(Json(created)))
}
