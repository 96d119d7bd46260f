// src/handlers/tripeiros.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::PaginationQuery},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::tripeiro::{
        CreateContaPayload, CreateTripeiroPayload, TripeiroListQuery, TripeiroPaymentsQuery,
        UpdateTripeiroPayload,
    },
};

pub async fn list_tripeiros(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<TripeiroListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagination = PaginationQuery { page: query.page, limit: query.limit };
    let page = app_state
        .tripeiro_service
        .list(user.tenant_id, query.search.as_deref(), query.ativo, pagination)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

pub async fn get_tripeiro(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tripeiro = app_state.tripeiro_service.get(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(tripeiro)))
}

pub async fn create_tripeiro(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTripeiroPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tripeiro = app_state.tripeiro_service.create(user.tenant_id, payload).await?;

    Ok((StatusCode::CREATED, Json(tripeiro)))
}

pub async fn update_tripeiro(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTripeiroPayload>,
) -> Result<impl IntoResponse, AppError> {
    let tripeiro = app_state.tripeiro_service.update(user.tenant_id, id, payload).await?;

    Ok((StatusCode::OK, Json(tripeiro)))
}

// Exclusão bloqueada com pagamentos ou contas vivas (409)
pub async fn delete_tripeiro(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tripeiro_service.delete(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Tripeiro deleted successfully" }))))
}

// =============================================================================
//  SUB-RECURSOS: CONTAS E PAGAMENTOS
// =============================================================================

pub async fn list_accounts(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .tripeiro_service
        .list_accounts(user.tenant_id, id, pagination)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

pub async fn create_account(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateContaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let account = app_state
        .tripeiro_service
        .create_account(user.tenant_id, id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn tripeiro_payments(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<TripeiroPaymentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.start_date.zip(query.end_date);
    let pagination = PaginationQuery { page: query.page, limit: query.limit };

    let report = app_state
        .tripeiro_service
        .payments(user.tenant_id, id, range, pagination)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}
