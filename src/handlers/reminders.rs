// src/handlers/reminders.rs

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
    models::reminder::{CreateReminderPayload, ReminderListQuery, UpdateReminderPayload},
};

pub async fn list_reminders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ReminderListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let reminders = app_state
        .reminder_service
        .list(user.tenant_id, user.id, &query)
        .await?;

    Ok((StatusCode::OK, Json(reminders)))
}

// Pendentes dos próximos 7 dias
pub async fn upcoming_reminders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let reminders = app_state.reminder_service.upcoming(user.tenant_id, user.id).await?;

    Ok((StatusCode::OK, Json(reminders)))
}

pub async fn get_reminder(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reminder = app_state.reminder_service.get(user.tenant_id, user.id, id).await?;

    Ok((StatusCode::OK, Json(reminder)))
}

pub async fn create_reminder(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateReminderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let reminder = app_state
        .reminder_service
        .create(user.tenant_id, user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(reminder)))
}

pub async fn update_reminder(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReminderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let reminder = app_state
        .reminder_service
        .update(user.tenant_id, user.id, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(reminder)))
}

pub async fn delete_reminder(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.reminder_service.delete(user.tenant_id, user.id, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Reminder deleted successfully" }))))
}

// Concluir duas vezes é 409
pub async fn complete_reminder(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.reminder_service.complete(user.tenant_id, user.id, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Reminder marked as completed" }))))
}
