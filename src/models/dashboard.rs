// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::note::Note;
use crate::models::payment::PaymentType;
use crate::models::reminder::Reminder;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// Os números principais (os cards do topo do painel)
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub total_receivables: Decimal,
    pub total_commissions: Decimal,
    pub net_profit: Decimal,

    // Variação percentual da receita frente ao período anterior de mesma duração
    pub variation: Decimal,

    pub total_tripeiros: i64,
    pub total_atendentes: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopAttendant {
    pub id: Uuid,
    pub name: String,
    pub total_sales: i64,
    pub total_commission: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatestPayment {
    pub id: Uuid,
    pub amount: Decimal,

    #[schema(value_type = String, format = Date)]
    pub payment_date: NaiveDate,

    pub payment_type: PaymentType,
    pub description: String,
    pub attendant_name: Option<String>,
    pub tripeiro_name: Option<String>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatestExpense {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub category: String,

    #[schema(value_type = String, format = Date)]
    pub expense_date: NaiveDate,
}

/// O painel completo: métricas + as fatias opcionais (cada uma pode degradar
/// para vazio de forma independente sem derrubar a resposta).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub metrics: DashboardMetrics,
    pub top_attendants: Vec<TopAttendant>,
    pub latest_payments: Vec<LatestPayment>,
    pub latest_expenses: Vec<LatestExpense>,
    pub notes: Vec<Note>,
    pub reminders: Vec<Reminder>,
}
