// src/models/payment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_pagamento", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Entrada, // Dinheiro entrando
    Saida,   // Dinheiro saindo
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_pagamento", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pendente,
    Confirmado,
    Cancelado,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: Uuid,

    #[schema(example = "Venda balcão")]
    pub descricao: String,

    #[schema(example = "1000.00")]
    pub valor: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-06-15")]
    pub data_pagamento: NaiveDate,

    pub atendente_id: Option<Uuid>,
    pub tripeiro_id: Option<Uuid>,

    pub tipo_pagamento: PaymentType,
    pub status: PaymentStatus,

    // Derivado: recalculado sempre que valor, tipo ou atendente mudam
    #[schema(example = "100.00")]
    pub valor_comissao: Decimal,

    pub observacoes: Option<String>,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pagamento com os nomes de atendente/tripeiro desnormalizados para exibição.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PaymentWithNames {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub payment: Payment,

    pub attendant_name: Option<String>,
    pub tripeiro_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentPayload {
    #[validate(required(message = "Description is required"), length(min = 1, message = "Description is required"))]
    pub descricao: Option<String>,

    #[validate(required(message = "Value is required"))]
    #[schema(example = "1000.00")]
    pub valor: Option<Decimal>,

    #[validate(required(message = "Payment date is required"))]
    #[schema(value_type = Option<String>, format = Date, example = "2025-06-15")]
    pub data_pagamento: Option<NaiveDate>,

    pub atendente_id: Option<Uuid>,
    pub tripeiro_id: Option<Uuid>,

    // Padrões: entrada / pendente
    pub tipo_pagamento: Option<PaymentType>,
    pub status: Option<PaymentStatus>,

    pub observacoes: Option<String>,
}

/// Atualização parcial: campo ausente mantém o valor atual; para colunas
/// anuláveis, `null` explícito limpa a coluna.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePaymentPayload {
    pub descricao: Option<String>,
    pub valor: Option<Decimal>,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_pagamento: Option<NaiveDate>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub atendente_id: Option<Option<Uuid>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub tripeiro_id: Option<Option<Uuid>>,

    pub tipo_pagamento: Option<PaymentType>,
    pub status: Option<PaymentStatus>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub observacoes: Option<Option<String>>,
}

/// O resultado da mesclagem do patch contra a linha carregada: são estes os
/// valores efetivamente gravados (a comissão é derivada deles em seguida).
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentValues {
    pub descricao: String,
    pub valor: Decimal,
    pub data_pagamento: NaiveDate,
    pub atendente_id: Option<Uuid>,
    pub tripeiro_id: Option<Uuid>,
    pub tipo_pagamento: PaymentType,
    pub status: PaymentStatus,
    pub observacoes: Option<String>,
}

impl UpdatePaymentPayload {
    pub fn merge_into(self, atual: &Payment) -> PaymentValues {
        PaymentValues {
            descricao: self.descricao.unwrap_or_else(|| atual.descricao.clone()),
            valor: self.valor.unwrap_or(atual.valor),
            data_pagamento: self.data_pagamento.unwrap_or(atual.data_pagamento),
            atendente_id: self.atendente_id.unwrap_or(atual.atendente_id),
            tripeiro_id: self.tripeiro_id.unwrap_or(atual.tripeiro_id),
            tipo_pagamento: self.tipo_pagamento.unwrap_or(atual.tipo_pagamento),
            status: self.status.unwrap_or(atual.status),
            observacoes: self.observacoes.unwrap_or_else(|| atual.observacoes.clone()),
        }
    }
}

// Filtros da listagem (todos opcionais, combináveis)
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub attendant_id: Option<Uuid>,
    pub tripeiro_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct PaymentStats {
    pub total_payments: i64,
    pub total_income: Decimal,
    pub total_outcome: Decimal,
    pub total_commissions: Decimal,
    pub active_attendants: i64,
    pub active_tripeiros: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagamento_base() -> Payment {
        Payment {
            id: Uuid::new_v4(),
            descricao: "Venda balcão".to_string(),
            valor: Decimal::from(1000),
            data_pagamento: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            atendente_id: Some(Uuid::new_v4()),
            tripeiro_id: None,
            tipo_pagamento: PaymentType::Entrada,
            status: PaymentStatus::Pendente,
            valor_comissao: Decimal::from(100),
            observacoes: Some("à vista".to_string()),
            tenant_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn atualizar_somente_status_preserva_os_demais_campos() {
        let atual = pagamento_base();
        let patch: UpdatePaymentPayload =
            serde_json::from_str(r#"{"status": "confirmado"}"#).unwrap();

        let merged = patch.merge_into(&atual);

        assert_eq!(merged.status, PaymentStatus::Confirmado);
        assert_eq!(merged.descricao, atual.descricao);
        assert_eq!(merged.valor, atual.valor);
        assert_eq!(merged.atendente_id, atual.atendente_id);
        assert_eq!(merged.observacoes, atual.observacoes);
    }

    #[test]
    fn null_explicito_limpa_campo_anulavel() {
        let atual = pagamento_base();
        let patch: UpdatePaymentPayload =
            serde_json::from_str(r#"{"atendente_id": null}"#).unwrap();

        let merged = patch.merge_into(&atual);

        assert_eq!(merged.atendente_id, None);
        // Os demais anuláveis não foram tocados
        assert_eq!(merged.observacoes, atual.observacoes);
    }

    #[test]
    fn valores_presentes_substituem() {
        let atual = pagamento_base();
        let patch: UpdatePaymentPayload =
            serde_json::from_str(r#"{"valor": 250.5, "tipo_pagamento": "saida"}"#).unwrap();

        let merged = patch.merge_into(&atual);

        assert_eq!(merged.valor, "250.5".parse::<Decimal>().unwrap());
        assert_eq!(merged.tipo_pagamento, PaymentType::Saida);
        assert_eq!(merged.data_pagamento, atual.data_pagamento);
    }
}
