// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::{DashboardQuery, DashboardResponse},
};

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Métricas financeiras + fatias do painel", body = DashboardResponse),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Só filtra por período quando as duas datas chegam juntas
    let range = query.start_date.zip(query.end_date);

    let response = app_state
        .dashboard_service
        .metrics(user.tenant_id, user.id, range)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}
