//! JSON REST handlers for a user's addresses.
//!
//! Every route is scoped to `/users/{user_id}`. A caller that may not act
//! for that user is refused before the address is looked up, so a foreign
//! caller cannot tell which address ids exist. An address id that belongs
//! to another user is answered with `404`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};
use estore_domain::address::{AddressDraft, AddressView};
use estore_domain::id::{AddressId, UserId};

use crate::access::Caller;
use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<AddressView>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the single-address endpoints.
pub enum GetResponse {
    Ok(Json<AddressView>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the default-address endpoint.
///
/// A user without a default address gets `200` with a JSON `null`.
pub enum DefaultResponse {
    Ok(Json<Option<AddressView>>),
}

impl IntoResponse for DefaultResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<AddressView>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_ids(user_id: &str, address_id: &str) -> Result<(UserId, AddressId), ApiError> {
    Ok((parse_id(user_id)?, parse_id(address_id)?))
}

/// `GET /api/users/{user_id}/addresses`
pub async fn list<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path(user_id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&user_id)?;
    let addresses = state.address_service.list_addresses(&ctx, user_id).await?;
    Ok(ListResponse::Ok(Json(addresses)))
}

/// `POST /api/users/{user_id}/addresses`
pub async fn create<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path(user_id): Path<String>,
    Json(draft): Json<AddressDraft>,
) -> Result<CreateResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&user_id)?;
    let created = state
        .address_service
        .create_address(&ctx, user_id, draft)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/users/{user_id}/addresses/default`
pub async fn get_default<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path(user_id): Path<String>,
) -> Result<DefaultResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&user_id)?;
    let default = state
        .address_service
        .get_default_address(&ctx, user_id)
        .await?;
    Ok(DefaultResponse::Ok(Json(default)))
}

/// `GET /api/users/{user_id}/addresses/{address_id}`
pub async fn get<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path((user_id, address_id)): Path<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let (user_id, address_id) = parse_ids(&user_id, &address_id)?;
    ctx.ensure_can_act_for(user_id)?;
    state
        .address_service
        .ensure_belongs_to(user_id, address_id)
        .await?;
    let address = state.address_service.get_address(&ctx, address_id).await?;
    Ok(GetResponse::Ok(Json(address)))
}

/// `PUT /api/users/{user_id}/addresses/{address_id}`
pub async fn update<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path((user_id, address_id)): Path<(String, String)>,
    Json(draft): Json<AddressDraft>,
) -> Result<GetResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let (user_id, address_id) = parse_ids(&user_id, &address_id)?;
    ctx.ensure_can_act_for(user_id)?;
    state
        .address_service
        .ensure_belongs_to(user_id, address_id)
        .await?;
    let updated = state
        .address_service
        .update_address(&ctx, address_id, draft)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `PUT /api/users/{user_id}/addresses/{address_id}/default`
pub async fn set_default<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path((user_id, address_id)): Path<(String, String)>,
) -> Result<GetResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let (user_id, address_id) = parse_ids(&user_id, &address_id)?;
    ctx.ensure_can_act_for(user_id)?;
    state
        .address_service
        .ensure_belongs_to(user_id, address_id)
        .await?;
    let address = state
        .address_service
        .set_default_address(&ctx, address_id)
        .await?;
    Ok(GetResponse::Ok(Json(address)))
}

/// `DELETE /api/users/{user_id}/addresses/{address_id}`
pub async fn delete<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path((user_id, address_id)): Path<(String, String)>,
) -> Result<DeleteResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let (user_id, address_id) = parse_ids(&user_id, &address_id)?;
    ctx.ensure_can_act_for(user_id)?;
    state
        .address_service
        .ensure_belongs_to(user_id, address_id)
        .await?;
    state
        .address_service
        .delete_address(&ctx, address_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
