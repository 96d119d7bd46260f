// src/handlers/admin.rs

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
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::admin::{AdminCreateUserPayload, AdminUpdateUserPayload, UserMetricsQuery},
};

// Todas estas rotas passam pelo admin_guard (role = admin) no router.

pub async fn admin_dashboard(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let dashboard = app_state.admin_service.dashboard().await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

pub async fn list_users(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.admin_service.list_users().await?;

    Ok((StatusCode::OK, Json(users)))
}

pub async fn create_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<AdminCreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.admin_service.create_user(&actor, payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdminUpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state.admin_service.update_user(&actor, id, payload).await?;

    Ok((StatusCode::OK, Json(user)))
}

pub async fn deactivate_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.admin_service.deactivate_user(&actor, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "User deactivated successfully" }))))
}

pub async fn user_metrics(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserMetricsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.start_date.zip(query.end_date);
    let metrics = app_state.admin_service.user_metrics(id, range).await?;

    Ok((StatusCode::OK, Json(metrics)))
}

pub async fn list_tenants(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tenants = app_state.admin_service.tenants().await?;

    Ok((StatusCode::OK, Json(tenants)))
}
