// src/services/attendant_service.rs

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
    db::AttendantRepository,
    models::attendant::{
        AttendantCommissionEntry, AttendantWithTotals, CreateAttendantPayload,
        UpdateAttendantPayload,
    },
};

/// Listagem de comissões de um atendente: páginas + total do período.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommissionReport {
    pub data: Vec<AttendantCommissionEntry>,
    pub summary: CommissionSummary,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSummary {
    pub total_commission: Decimal,
}

#[derive(Clone)]
pub struct AttendantService {
    repo: AttendantRepository,
}

impl AttendantService {
    pub fn new(repo: AttendantRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        ativo: Option<bool>,
        pagination: PaginationQuery,
    ) -> Result<Paginated<AttendantWithTotals>, AppError> {
        let (attendants, total) = self
            .repo
            .list(tenant_id, ativo, pagination.limit(), pagination.offset())
            .await?;

        Ok(Paginated::new(attendants, pagination.page(), pagination.limit(), total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<AttendantWithTotals, AppError> {
        self.repo
            .find_with_totals(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Attendant"))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        payload: CreateAttendantPayload,
    ) -> Result<AttendantWithTotals, AppError> {
        let nome = payload
            .nome
            .ok_or_else(|| AppError::InvalidInput("Name is required".to_string()))?;
        let comissao_percentual = payload.comissao_percentual.ok_or_else(|| {
            AppError::InvalidInput("Commission percentage is required".to_string())
        })?;

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
                comissao_percentual,
                payload.observacoes.as_deref(),
            )
            .await?;

        self.get(tenant_id, created.id).await
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        payload: UpdateAttendantPayload,
    ) -> Result<AttendantWithTotals, AppError> {
        let atual = self
            .repo
            .find_row(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Attendant"))?;

        let nome = payload.nome.unwrap_or_else(|| atual.nome.clone());
        let telefone = payload.telefone.unwrap_or_else(|| atual.telefone.clone());
        let email = payload.email.unwrap_or_else(|| atual.email.clone());
        let comissao_percentual = payload.comissao_percentual.unwrap_or(atual.comissao_percentual);
        let ativo = payload.ativo.unwrap_or(atual.ativo);
        let observacoes = payload.observacoes.unwrap_or_else(|| atual.observacoes.clone());

        // Unicidade de e-mail só interessa quando ele realmente mudou
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
                comissao_percentual,
                ativo,
                observacoes.as_deref(),
            )
            .await?;

        self.get(tenant_id, id).await
    }

    /// Exclusão (soft) só é permitida sem pagamentos vivos vinculados; com
    /// dependentes, o caminho é desativar o atendente.
    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_row(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Attendant"))?;

        if self.repo.count_live_payments(id).await? > 0 {
            return Err(AppError::Conflict(
                "Cannot delete attendant with associated payments. Deactivate instead.".to_string(),
            ));
        }

        self.repo.soft_delete(tenant_id, id).await
    }

    pub async fn commissions(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
        pagination: PaginationQuery,
    ) -> Result<CommissionReport, AppError> {
        self.repo
            .find_row(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Attendant"))?;

        let (data, total, total_commission) = self
            .repo
            .commissions(tenant_id, id, range, pagination.limit(), pagination.offset())
            .await?;

        Ok(CommissionReport {
            data,
            summary: CommissionSummary { total_commission },
            pagination: PaginationMeta::new(pagination.page(), pagination.limit(), total),
        })
    }
}
