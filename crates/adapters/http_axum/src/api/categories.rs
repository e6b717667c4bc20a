//! JSON REST handlers for the category tree.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use estore_app::ports::{
    AddressRepository, CategoryRepository, CityRepository, LocalityRepository, StateRepository,
    UserRepository,
};
use estore_domain::category::{Category, CategoryDraft, CategoryStatus, CategoryView};
use estore_domain::id::CategoryId;

use crate::access::Caller;
use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for changing a category's status.
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: CategoryStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Category>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the endpoints returning one category.
pub enum GetResponse {
    Ok(Json<CategoryView>),
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
    Created(Json<CategoryView>),
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

/// `GET /api/categories`
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
    let categories = state.category_service.list_categories().await?;
    Ok(ListResponse::Ok(Json(categories)))
}

/// `GET /api/categories/{id}`
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
    let category_id: CategoryId = parse_id(&id)?;
    let view = state.category_service.get_category(category_id).await?;
    Ok(GetResponse::Ok(Json(view)))
}

/// `POST /api/categories`
pub async fn create<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Json(draft): Json<CategoryDraft>,
) -> Result<CreateResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let created = state.category_service.create_category(&ctx, draft).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/categories/{id}`
pub async fn update<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
    Json(draft): Json<CategoryDraft>,
) -> Result<GetResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let category_id: CategoryId = parse_id(&id)?;
    let updated = state
        .category_service
        .update_category(&ctx, category_id, draft)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `PUT /api/categories/{id}/status`
pub async fn set_status<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<GetResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let category_id: CategoryId = parse_id(&id)?;
    let view = state
        .category_service
        .set_category_status(&ctx, category_id, req.status)
        .await?;
    Ok(GetResponse::Ok(Json(view)))
}

/// `DELETE /api/categories/{id}`
pub async fn delete<AR, UR, SR, CR, LR, KR>(
    State(state): State<AppState<AR, UR, SR, CR, LR, KR>>,
    Caller(ctx): Caller,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    AR: AddressRepository + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    SR: StateRepository + Send + Sync + 'static,
    CR: CityRepository + Send + Sync + 'static,
    LR: LocalityRepository + Send + Sync + 'static,
    KR: CategoryRepository + Send + Sync + 'static,
{
    let category_id: CategoryId = parse_id(&id)?;
    state
        .category_service
        .delete_category(&ctx, category_id)
        .await?;
    Ok(DeleteResponse::NoContent)
}
