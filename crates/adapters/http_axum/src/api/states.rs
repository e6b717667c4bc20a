//! JSON REST handlers for states.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};
use estore_domain::geo;
use estore_domain::id::StateId;

use crate::access::Caller;
use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a state.
#[derive(Deserialize)]
pub struct CreateStateRequest {
    pub name: String,
    pub code: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<geo::State>>),
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
    Ok(Json<geo::State>),
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
    Created(Json<geo::State>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/states`
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
    let states = state.geo_service.list_states().await?;
    Ok(ListResponse::Ok(Json(states)))
}

/// `GET /api/states/{id}`
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
    let state_id: StateId = parse_id(&id)?;
    let found = state.geo_service.get_state(state_id).await?;
    Ok(GetResponse::Ok(Json(found)))
}

/// `POST /api/states`
pub async fn create<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Json(req): Json<CreateStateRequest>,
) -> Result<CreateResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let new_state = geo::State::new(&req.name, &req.code)?;
    let created = state.geo_service.create_state(&ctx, new_state).await?;
    Ok(CreateResponse::Created(Json(created)))
}
