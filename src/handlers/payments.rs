// src/handlers/payments.rs

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
    models::payment::{
        CreatePaymentPayload, PaymentListQuery, PaymentStats, PaymentWithNames,
        UpdatePaymentPayload,
    },
};

#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    params(PaymentListQuery),
    responses(
        (status = 200, description = "Lista paginada de pagamentos"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<PaymentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.payment_service.list(user.tenant_id, &query).await?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/payments/{id}
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Pagamento com nomes desnormalizados", body = PaymentWithNames),
        (status = 404, description = "Não encontrado no tenant")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state.payment_service.get(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(payment)))
}

// POST /api/payments
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento criado (comissão já calculada)", body = PaymentWithNames),
        (status = 400, description = "Campos obrigatórios ausentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // O tenant vem da sessão autenticada, nunca do corpo
    let payment = app_state.payment_service.create(user.tenant_id, payload).await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// PUT /api/payments/{id}
#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    tag = "Payments",
    request_body = UpdatePaymentPayload,
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Pagamento atualizado (comissão recalculada)", body = PaymentWithNames),
        (status = 404, description = "Não encontrado no tenant")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state.payment_service.update(user.tenant_id, id, payload).await?;

    Ok((StatusCode::OK, Json(payment)))
}

// DELETE /api/payments/{id} (soft)
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Pagamento marcado como removido"),
        (status = 404, description = "Não encontrado no tenant")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_payment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.payment_service.delete(user.tenant_id, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Payment deleted successfully" }))))
}

// GET /api/payments/stats
#[utoipa::path(
    get,
    path = "/api/payments/stats",
    tag = "Payments",
    params(StatsQuery),
    responses(
        (status = 200, description = "Totais do período sobre pagamentos confirmados", body = PaymentStats)
    ),
    security(("api_jwt" = []))
)]
pub async fn payment_stats(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.start_date.zip(query.end_date);
    let stats = app_state.payment_service.stats(user.tenant_id, range).await?;

    Ok((StatusCode::OK, Json(stats)))
}
