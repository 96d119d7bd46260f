// src/services/tripeiro_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationMeta, PaginationQuery},
    },
    db::TripeiroRepository,
    models::{
        payment::PaymentWithNames,
        tripeiro::{
            ContaTripeiro, CreateContaPayload, CreateTripeiroPayload, TripeiroDetail,
            TripeiroWithTotals, UpdateTripeiroPayload,
        },
    },
};

/// Pagamentos de um tripeiro: páginas + soma do período.
#[derive(Debug, Serialize, ToSchema)]
pub struct TripeiroPaymentsReport {
    pub data: Vec<PaymentWithNames>,
    pub summary: TripeiroPaymentsSummary,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripeiroPaymentsSummary {
    pub total_value: Decimal,
}

#[derive(Clone)]
pub struct TripeiroService {
    repo: TripeiroRepository,
}

impl TripeiroService {
    pub fn new(repo: TripeiroRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        search: Option<&str>,
        ativo: Option<bool>,
        pagination: PaginationQuery,
    ) -> Result<Paginated<TripeiroWithTotals>, AppError> {
        let (tripeiros, total) = self
            .repo
            .list(tenant_id, search, ativo, pagination.limit(), pagination.offset())
            .await?;

        Ok(Paginated::new(tripeiros, pagination.page(), pagination.limit(), total))
    }

    // Detalhe inclui as contas do tripeiro
    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<TripeiroDetail, AppError> {
        let tripeiro = self
            .repo
            .find_with_totals(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))?;

        let accounts = self.repo.all_accounts(id).await?;

        Ok(TripeiroDetail { tripeiro, accounts })
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        payload: CreateTripeiroPayload,
    ) -> Result<TripeiroWithTotals, AppError> {
        let nome = payload
            .nome
            .ok_or_else(|| AppError::InvalidInput("Name is required".to_string()))?;

        if let Some(email) = payload.email.as_deref() {
            if self.repo.email_in_use(tenant_id, email, None).await? {
                return Err(AppError::EmailAlreadyExists);
            }
        }

        let created = self
            .repo
            .insert(
                tenant_id,
                &nome,
                payload.telefone.as_deref(),
                payload.email.as_deref(),
                payload.endereco.as_deref(),
                payload.cidade.as_deref(),
                payload.estado.as_deref(),
                payload.cep.as_deref(),
                payload.observacoes.as_deref(),
            )
            .await?;

        self.repo
            .find_with_totals(tenant_id, created.id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        payload: UpdateTripeiroPayload,
    ) -> Result<TripeiroWithTotals, AppError> {
        let atual = self
            .repo
            .find_row(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))?;

        let nome = payload.nome.unwrap_or_else(|| atual.nome.clone());
        let telefone = payload.telefone.unwrap_or_else(|| atual.telefone.clone());
        let email = payload.email.unwrap_or_else(|| atual.email.clone());
        let endereco = payload.endereco.unwrap_or_else(|| atual.endereco.clone());
        let cidade = payload.cidade.unwrap_or_else(|| atual.cidade.clone());
        let estado = payload.estado.unwrap_or_else(|| atual.estado.clone());
        let cep = payload.cep.unwrap_or_else(|| atual.cep.clone());
        let ativo = payload.ativo.unwrap_or(atual.ativo);
        let observacoes = payload.observacoes.unwrap_or_else(|| atual.observacoes.clone());

        if let Some(email) = email.as_deref() {
            if Some(email) != atual.email.as_deref()
                && self.repo.email_in_use(tenant_id, email, Some(id)).await?
            {
                return Err(AppError::EmailAlreadyExists);
            }
        }

        self.repo
            .update(
                tenant_id,
                id,
                &nome,
                telefone.as_deref(),
                email.as_deref(),
                endereco.as_deref(),
                cidade.as_deref(),
                estado.as_deref(),
                cep.as_deref(),
                ativo,
                observacoes.as_deref(),
            )
            .await?;

        self.repo
            .find_with_totals(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))
    }

    /// Exclusão bloqueada enquanto houver pagamentos ou contas vivas; o
    /// caminho é desativar o tripeiro.
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_row(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))?;

        let payments = self.repo.count_live_payments(id).await?;
        let accounts = self.repo.count_live_accounts(id).await?;

        if payments > 0 || accounts > 0 {
            return Err(AppError::Conflict(
                "Cannot delete tripeiro with associated records. Deactivate instead.".to_string(),
            ));
        }

        self.repo.soft_delete(tenant_id, id).await
    }

    // =========================================================================
    //  CONTAS
    // =========================================================================

    pub async fn list_accounts(
        &self,
        tenant_id: Uuid,
        tripeiro_id: Uuid,
        pagination: PaginationQuery,
    ) -> Result<Paginated<ContaTripeiro>, AppError> {
        self.repo
            .find_row(tenant_id, tripeiro_id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))?;

        let (accounts, total) = self
            .repo
            .list_accounts(tripeiro_id, pagination.limit(), pagination.offset())
            .await?;

        Ok(Paginated::new(accounts, pagination.page(), pagination.limit(), total))
    }

    pub async fn create_account(
        &self,
        tenant_id: Uuid,
        tripeiro_id: Uuid,
        payload: CreateContaPayload,
    ) -> Result<ContaTripeiro, AppError> {
        self.repo
            .find_row(tenant_id, tripeiro_id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))?;

        let numero_conta = payload
            .numero_conta
            .ok_or_else(|| AppError::InvalidInput("Account number is required".to_string()))?;

        // Unicidade global entre contas vivas (comportamento herdado)
        if self.repo.account_number_in_use(&numero_conta).await? {
            return Err(AppError::Conflict("Account number already exists".to_string()));
        }

        self.repo
            .insert_account(
                tripeiro_id,
                &numero_conta,
                payload.descricao.as_deref(),
                payload.limite_credito.unwrap_or(Decimal::ZERO),
                payload.saldo_devedor.unwrap_or(Decimal::ZERO),
                payload.observacoes.as_deref(),
            )
            .await
    }

    // =========================================================================
    //  PAGAMENTOS
    // =========================================================================

    pub async fn payments(
        &self,
        tenant_id: Uuid,
        tripeiro_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
        pagination: PaginationQuery,
    ) -> Result<TripeiroPaymentsReport, AppError> {
        self.repo
            .find_row(tenant_id, tripeiro_id)
            .await?
            .ok_or(AppError::NotFound("Tripeiro"))?;

        let (data, total, total_value) = self
            .repo
            .payments(tenant_id, tripeiro_id, range, pagination.limit(), pagination.offset())
            .await?;

        Ok(TripeiroPaymentsReport {
            data,
            summary: TripeiroPaymentsSummary { total_value },
            pagination: PaginationMeta::new(pagination.page(), pagination.limit(), total),
        })
    }
}
