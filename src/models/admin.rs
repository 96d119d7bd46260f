// src/models/admin.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::audit::{AuditActivity, AuditLog};
use crate::models::auth::UserRole;

// Visão geral global (cruza todos os tenants; somente admin)
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_users: i64,
    pub total_tenants: i64,
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct RoleCount {
    pub role: UserRole,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub overview: AdminOverview,
    pub users_by_role: Vec<RoleCount>,
    pub recent_activity: Vec<AuditActivity>,
}

// Usuário na listagem administrativa, com o nome do tenant resolvido
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AdminUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub tenant_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tenant_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminCreateUserPayload {
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(required(message = "Email is required"), email(message = "Email is invalid"))]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 6, message = "Password must have at least 6 characters")
    )]
    pub password: Option<String>,

    pub role: Option<UserRole>,
    pub tenant_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateUserPayload {
    pub name: Option<String>,

    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,

    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub tenant_id: Option<Uuid>,

    // Quando presente e não vazia, a senha é re-hasheada
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserMetricsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountedTotal {
    pub count: i64,
    pub total_value: Decimal,
}

#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMetrics {
    pub count: i64,
    pub total_value: Decimal,
    pub total_commission: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_result: Decimal,
    pub profit_margin: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    pub payments: PaymentMetrics,
    pub expenses: CountedTotal,
    pub receivables: CountedTotal,
    pub summary: MetricsSummary,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserMetricsResponse {
    pub user: AdminUser,
    pub metrics: UserMetrics,
    pub recent_activity: Vec<AuditLog>,
}
