// src/models/tripeiro.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Tripeiro {
    pub id: Uuid,

    #[schema(example = "Carlos Tripeiro")]
    pub nome: String,

    pub telefone: Option<String>,
    pub email: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,

    pub ativo: bool,
    pub observacoes: Option<String>,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tripeiro com os agregados de contas e pagamentos para a listagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TripeiroWithTotals {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub tripeiro: Tripeiro,

    pub total_accounts: i64,
    pub total_debt: Option<Decimal>,
    pub total_payments: i64,
}

/// Detalhe: tripeiro + as contas dele.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripeiroDetail {
    #[serde(flatten)]
    pub tripeiro: TripeiroWithTotals,

    pub accounts: Vec<ContaTripeiro>,
}

// Conta de crédito de um tripeiro (número único globalmente entre registros vivos)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ContaTripeiro {
    pub id: Uuid,
    pub tripeiro_id: Uuid,

    #[schema(example = "CT-00042")]
    pub numero_conta: String,

    pub descricao: Option<String>,

    #[schema(example = "500.00")]
    pub limite_credito: Decimal,

    #[schema(example = "120.00")]
    pub saldo_devedor: Decimal,

    pub ativa: bool,
    pub observacoes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTripeiroPayload {
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name is required"))]
    pub nome: Option<String>,

    pub telefone: Option<String>,

    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,

    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTripeiroPayload {
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub telefone: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub endereco: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cidade: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub estado: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub cep: Option<Option<String>>,

    pub ativo: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub observacoes: Option<Option<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TripeiroListQuery {
    pub ativo: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContaPayload {
    #[validate(required(message = "Account number is required"), length(min = 1, message = "Account number is required"))]
    pub numero_conta: Option<String>,

    pub descricao: Option<String>,
    pub limite_credito: Option<Decimal>,
    pub saldo_devedor: Option<Decimal>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TripeiroPaymentsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
