// src/models/report.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    // Mantido por compatibilidade com o frontend; hoje só existe o financeiro
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
    pub total_commissions: Decimal,
    pub confirmed_payments: i64,
    pub expense_count: i64,
    pub attendant_count: i64,
    pub pending_payments: i64,
    pub total_pending: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryBreakdown {
    pub name: String,
    pub value: Decimal,
    pub count: i64,
    pub percentage: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendantBreakdown {
    pub name: String,
    pub sales_count: i64,
    pub total_sales: Decimal,
    pub total_commission: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripeiroBreakdown {
    pub name: String,
    pub payment_count: i64,
    pub total_paid: Decimal,
    pub total_pending: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyTrendEntry {
    #[schema(example = "Abr/25")]
    pub month: String,
    pub revenue: Decimal,
    pub expenses: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub summary: ReportSummary,
    pub by_category: Vec<CategoryBreakdown>,
    pub by_attendant: Vec<AttendantBreakdown>,
    pub by_tripeiro: Vec<TripeiroBreakdown>,
    pub monthly_trend: Vec<MonthlyTrendEntry>,
}
