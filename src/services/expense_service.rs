// src/services/expense_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Paginated, pagination::PaginationQuery},
    db::ExpenseRepository,
    models::expense::{
        CreateExpensePayload, Expense, ExpenseListQuery, ExpenseStats, UpdateExpensePayload,
    },
};

#[derive(Clone)]
pub struct ExpenseService {
    repo: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(repo: ExpenseRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        query: &ExpenseListQuery,
    ) -> Result<Paginated<Expense>, AppError> {
        let pagination = PaginationQuery { page: query.page, limit: query.limit };
        let (expenses, total) = self
            .repo
            .list(tenant_id, query, pagination.limit(), pagination.offset())
            .await?;

        Ok(Paginated::new(expenses, pagination.page(), pagination.limit(), total))
    }

    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Expense, AppError> {
        self.repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Expense"))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        payload: CreateExpensePayload,
    ) -> Result<Expense, AppError> {
        let descricao = payload
            .descricao
            .ok_or_else(|| AppError::InvalidInput("Description is required".to_string()))?;
        let valor = payload
            .valor
            .ok_or_else(|| AppError::InvalidInput("Value is required".to_string()))?;
        let data_despesa = payload
            .data_despesa
            .ok_or_else(|| AppError::InvalidInput("Expense date is required".to_string()))?;
        let categoria = payload
            .categoria
            .ok_or_else(|| AppError::InvalidInput("Category is required".to_string()))?;

        self.repo
            .insert(
                tenant_id,
                &descricao,
                valor,
                data_despesa,
                &categoria,
                payload.observacoes.as_deref(),
            )
            .await
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        payload: UpdateExpensePayload,
    ) -> Result<Expense, AppError> {
        let atual = self
            .repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Expense"))?;

        // Campo ausente mantém o valor atual
        let descricao = payload.descricao.unwrap_or(atual.descricao);
        let valor = payload.valor.unwrap_or(atual.valor);
        let data_despesa = payload.data_despesa.unwrap_or(atual.data_despesa);
        let categoria = payload.categoria.unwrap_or(atual.categoria);
        let observacoes = payload.observacoes.unwrap_or(atual.observacoes);

        self.repo
            .update(
                tenant_id,
                id,
                &descricao,
                valor,
                data_despesa,
                &categoria,
                observacoes.as_deref(),
            )
            .await
    }

    pub async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(tenant_id, id)
            .await?
            .ok_or(AppError::NotFound("Expense"))?;

        self.repo.soft_delete(tenant_id, id).await
    }

    pub async fn stats(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<ExpenseStats, AppError> {
        let by_category = self.repo.stats_by_category(tenant_id, range).await?;
        let total = self.repo.totals(tenant_id, range).await?;

        Ok(ExpenseStats { by_category, total })
    }
}
