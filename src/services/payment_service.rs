// src/services/payment_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Paginated, pagination::PaginationQuery},
    db::{AttendantRepository, PaymentRepository},
    models::payment::{
        CreatePaymentPayload, PaymentListQuery, PaymentStats, PaymentStatus, PaymentType,
        PaymentValues, PaymentWithNames, UpdatePaymentPayload,
    },
    services::commission::calcular_comissao,
};

#[derive(Clone)]
pub struct PaymentService {
    payment_repo: PaymentRepository,
    attendant_repo: AttendantRepository,
}

impl PaymentService {
    pub fn new(payment_repo: PaymentRepository, attendant_repo: AttendantRepository) -> Self {
        Self { payment_repo, attendant_repo }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        query: &PaymentListQuery,
    ) -> Result<Paginated<PaymentWithNames>, AppError> {
        let pagination = PaginationQuery { page: query.page, limit: query.limit };
        let (payments, total) = self
            .payment_repo
            .list(tenant_id, query, pagination.limit(), pagination.offset())
            .await?;

        Ok(Paginated::new(payments, pagination.page(), pagination.limit(), total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<PaymentWithNames, AppError> {
        self.payment_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Payment"))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        payload: CreatePaymentPayload,
    ) -> Result<PaymentWithNames, AppError> {
        let values = PaymentValues {
            descricao: payload
                .descricao
                .ok_or_else(|| AppError::InvalidInput("Description is required".to_string()))?,
            valor: payload
                .valor
                .ok_or_else(|| AppError::InvalidInput("Value is required".to_string()))?,
            data_pagamento: payload
                .data_pagamento
                .ok_or_else(|| AppError::InvalidInput("Payment date is required".to_string()))?,
            atendente_id: payload.atendente_id,
            tripeiro_id: payload.tripeiro_id,
            tipo_pagamento: payload.tipo_pagamento.unwrap_or(PaymentType::Entrada),
            status: payload.status.unwrap_or(PaymentStatus::Pendente),
            observacoes: payload.observacoes,
        };

        let valor_comissao = self.comissao_para(tenant_id, &values).await?;

        let id = self.payment_repo.insert(tenant_id, &values, valor_comissao).await?;

        // Recarrega com os nomes desnormalizados para a resposta
        self.payment_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Payment"))
    }

    /// Atualização parcial: mescla o patch contra a linha atual e recalcula a
    /// comissão a partir dos valores resultantes — nunca fica comissão velha
    /// depois de uma edição de valor, tipo ou atendente.
    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        payload: UpdatePaymentPayload,
    ) -> Result<PaymentWithNames, AppError> {
        let atual = self
            .payment_repo
            .find_row(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Payment"))?;

        let values = payload.merge_into(&atual);
        let valor_comissao = self.comissao_para(tenant_id, &values).await?;

        self.payment_repo.update(tenant_id, id, &values, valor_comissao).await?;

        self.payment_repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Payment"))
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.payment_repo
            .find_row(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Payment"))?;

        self.payment_repo.soft_delete(tenant_id, id).await
    }

    pub async fn stats(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<PaymentStats, AppError> {
        self.payment_repo.stats(tenant_id, range).await
    }

    // Busca o percentual do atendente (quando houver) e aplica a regra.
    // Atendente removido ou de outro tenant resolve para percentual nenhum,
    // e portanto comissão zero — a requisição não falha por causa disso.
    async fn comissao_para(
        &self,
        tenant_id: Uuid,
        values: &PaymentValues,
    ) -> Result<Decimal, AppError> {
        let percentual = match values.atendente_id {
            Some(atendente_id) => {
                self.attendant_repo.find_commission_pct(tenant_id, atendente_id).await?
            }
            None => None,
        };

        Ok(calcular_comissao(values.valor, values.tipo_pagamento, percentual))
    }
}
