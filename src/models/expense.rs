// src/models/expense.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Expense {
    pub id: Uuid,

    #[schema(example = "Aluguel do ponto")]
    pub descricao: String,

    #[schema(example = "300.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-06-01")]
    pub data_despesa: NaiveDate,

    #[schema(example = "Infraestrutura")]
    pub categoria: String,

    pub observacoes: Option<String>,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExpensePayload {
    #[validate(required(message = "Description is required"), length(min = 1, message = "Description is required"))]
    pub descricao: Option<String>,

    #[validate(required(message = "Value is required"))]
    pub valor: Option<Decimal>,

    #[validate(required(message = "Expense date is required"))]
    #[schema(value_type = Option<String>, format = Date)]
    pub data_despesa: Option<NaiveDate>,

    #[validate(required(message = "Category is required"), length(min = 1, message = "Category is required"))]
    pub categoria: Option<String>,

    pub observacoes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateExpensePayload {
    pub descricao: Option<String>,
    pub valor: Option<Decimal>,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_despesa: Option<NaiveDate>,

    pub categoria: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub observacoes: Option<Option<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub categoria: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Estatísticas por categoria (mantidas do fluxo de relatórios rápidos)
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct ExpenseCategoryStat {
    pub categoria: String,
    pub total_count: i64,
    pub total_value: Decimal,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct ExpenseTotals {
    pub total_expenses: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub by_category: Vec<ExpenseCategoryStat>,
    pub total: ExpenseTotals,
}
