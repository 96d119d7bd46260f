// src/handlers/notes.rs

use axum::{
    extract::{Path, State},
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
    models::note::{CreateNotePayload, PinResponse, UpdateNotePayload},
};

// Notas são do usuário, não do tenant inteiro

pub async fn list_notes(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let notes = app_state.note_service.list(user.tenant_id, user.id).await?;

    Ok((StatusCode::OK, Json(notes)))
}

pub async fn get_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let note = app_state.note_service.get(user.tenant_id, user.id, id).await?;

    Ok((StatusCode::OK, Json(note)))
}

pub async fn create_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateNotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let note = app_state.note_service.create(user.tenant_id, user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let note = app_state
        .note_service
        .update(user.tenant_id, user.id, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(note)))
}

pub async fn delete_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.note_service.delete(user.tenant_id, user.id, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Note deleted successfully" }))))
}

pub async fn toggle_pin(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let is_pinned = app_state
        .note_service
        .toggle_pin(user.tenant_id, user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(PinResponse { is_pinned })))
}
