// src/handlers/expenses.rs

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
    models::expense::{CreateExpensePayload, ExpenseListQuery, UpdateExpensePayload},
};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStatsQuery {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

pub async fn list_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ExpenseListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.expense_service.list(user.tenant_id, &query).await?;

    Ok((StatusCode::OK, Json(page)))
}

pub async fn get_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let expense = app_state.expense_service.get(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(expense)))
}

pub async fn create_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state.expense_service.create(user.tenant_id, payload).await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    let expense = app_state.expense_service.update(user.tenant_id, id, payload).await?;

    Ok((StatusCode::OK, Json(expense)))
}

pub async fn delete_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.expense_service.delete(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Expense deleted successfully" }))))
}

pub async fn expense_stats(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ExpenseStatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.start_date.zip(query.end_date);
    let stats = app_state.expense_service.stats(user.tenant_id, range).await?;

    Ok((StatusCode::OK, Json(stats)))
}
