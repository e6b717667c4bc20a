//! JSON REST handlers for localities.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};
use estore_domain::geo::Locality;
use estore_domain::id::{CityId, LocalityId};

use crate::access::Caller;
use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a locality.
#[derive(Deserialize)]
pub struct CreateLocalityRequest {
    pub name: String,
    pub pincode: String,
    pub city_id: String,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Locality>>),
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
    Ok(Json<Locality>),
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
    Created(Json<Locality>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/localities`
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
    let localities = state.geo_service.list_localities().await?;
    Ok(ListResponse::Ok(Json(localities)))
}

/// `GET /api/localities/by-city/{city_id}`
pub async fn list_by_city<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Path(city_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let city_id: CityId = parse_id(&city_id)?;
    let localities = state.geo_service.list_localities_by_city(city_id).await?;
    Ok(ListResponse::Ok(Json(localities)))
}

/// `GET /api/localities/{id}`
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
    let locality_id: LocalityId = parse_id(&id)?;
    let locality = state.geo_service.get_locality(locality_id).await?;
    Ok(GetResponse::Ok(Json(locality)))
}

/// `POST /api/localities`
pub async fn create<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateLocalityRequest>,
) -> Result<CreateResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let city_id: CityId = parse_id(&req.city_id)?;
    let locality = Locality::new(&req.name, &req.pincode, city_id)?;
    let created = state.geo_service.create_locality(&ctx, locality).await?;
    Ok(CreateResponse::Created(Json(created)))
}
