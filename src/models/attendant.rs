// src/models/attendant.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::patch::double_option;
use crate::models::payment::PaymentStatus;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Attendant {
    pub id: Uuid,

    #[schema(example = "João Vendedor")]
    pub nome: String,

    pub telefone: Option<String>,
    pub email: Option<String>,

    // Percentual de comissão sobre pagamentos de entrada (0 a 100)
    #[schema(example = "10.00")]
    pub comissao_percentual: Decimal,

    pub ativo: bool,
    pub observacoes: Option<String>,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Atendente com os agregados de pagamentos para a listagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendantWithTotals {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub attendant: Attendant,

    pub total_payments: i64,
    pub total_commissions: Option<Decimal>,
}

pub fn validar_percentual(valor: &Decimal) -> Result<(), ValidationError> {
    if *valor < Decimal::ZERO || *valor > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new("comissao_percentual")
            .with_message("Commission percentage must be between 0 and 100".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAttendantPayload {
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name is required"))]
    pub nome: Option<String>,

    pub telefone: Option<String>,

    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,

    #[validate(
        required(message = "Commission percentage is required"),
        custom(function = "validar_percentual")
    )]
    pub comissao_percentual: Option<Decimal>,

    pub observacoes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendantPayload {
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub telefone: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[validate(custom(function = "validar_percentual"))]
    pub comissao_percentual: Option<Decimal>,

    pub ativo: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub observacoes: Option<Option<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendantListQuery {
    pub ativo: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Linha da sub-listagem de comissões de um atendente
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AttendantCommissionEntry {
    pub id: Uuid,
    pub descricao: String,
    pub valor: Decimal,
    pub valor_comissao: Decimal,

    #[schema(value_type = String, format = Date)]
    pub data_pagamento: NaiveDate,

    pub status: PaymentStatus,
    pub tripeiro_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CommissionListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentual_dentro_da_faixa_passa() {
        assert!(validar_percentual(&Decimal::ZERO).is_ok());
        assert!(validar_percentual(&Decimal::from(100)).is_ok());
        assert!(validar_percentual(&"37.5".parse().unwrap()).is_ok());
    }

    #[test]
    fn percentual_fora_da_faixa_falha() {
        assert!(validar_percentual(&Decimal::from(-1)).is_err());
        assert!(validar_percentual(&"100.01".parse().unwrap()).is_err());
    }
}
