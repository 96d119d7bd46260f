// src/handlers/attendants.rs

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
    models::attendant::{
        AttendantListQuery, CommissionListQuery, CreateAttendantPayload, UpdateAttendantPayload,
    },
};

pub async fn list_attendants(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<AttendantListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagination = PaginationQuery { page: query.page, limit: query.limit };
    let page = app_state
        .attendant_service
        .list(user.tenant_id, query.ativo, pagination)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

pub async fn get_attendant(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let attendant = app_state.attendant_service.get(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(attendant)))
}

pub async fn create_attendant(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateAttendantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let attendant = app_state.attendant_service.create(user.tenant_id, payload).await?;

    Ok((StatusCode::CREATED, Json(attendant)))
}

pub async fn update_attendant(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAttendantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let attendant = app_state.attendant_service.update(user.tenant_id, id, payload).await?;

    Ok((StatusCode::OK, Json(attendant)))
}

// Exclusão bloqueada com pagamentos vinculados (409): o caminho é desativar
pub async fn delete_attendant(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.attendant_service.delete(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Attendant deleted successfully" }))))
}

pub async fn attendant_commissions(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Query(query): Query<CommissionListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.start_date.zip(query.end_date);
    let pagination = PaginationQuery { page: query.page, limit: query.limit };

    let report = app_state
        .attendant_service
        .commissions(user.tenant_id, id, range, pagination)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}
