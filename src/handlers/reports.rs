// src/handlers/reports.rs

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
    models::report::{ReportQuery, ReportResponse},
};

// GET /api/reports/generate
#[utoipa::path(
    get,
    path = "/api/reports/generate",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Relatório financeiro completo", body = ReportResponse),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = query.start_date.zip(query.end_date);

    let report = app_state.report_service.generate(user.tenant_id, range).await?;

    Ok((StatusCode::OK, Json(report)))
}
