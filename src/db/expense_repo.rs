// src/db/expense_repo.rs

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::expense::{Expense, ExpenseCategoryStat, ExpenseListQuery, ExpenseTotals},
};

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ExpenseListQuery) {
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            qb.push(" AND data_despesa BETWEEN ");
            qb.push_bind(start);
            qb.push(" AND ");
            qb.push_bind(end);
        }
        if let Some(categoria) = &filter.categoria {
            qb.push(" AND categoria = ");
            qb.push_bind(categoria.clone());
        }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        filter: &ExpenseListQuery,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Expense>, i64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM despesas WHERE tenant_id = ",
        );
        count_qb.push_bind(tenant_id);
        count_qb.push(" AND deleted_at IS NULL");
        Self::push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT * FROM despesas WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY data_despesa DESC, created_at DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let expenses = qb
            .build_query_as::<Expense>()
            .fetch_all(&self.pool)
            .await?;

        Ok((expenses, total))
    }

    pub async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            "SELECT * FROM despesas WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn insert(
        &self,
        tenant_id: Uuid,
        descricao: &str,
        valor: rust_decimal::Decimal,
        data_despesa: NaiveDate,
        categoria: &str,
        observacoes: Option<&str>,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO despesas (descricao, valor, data_despesa, categoria, observacoes, tenant_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(descricao)
        .bind(valor)
        .bind(data_despesa)
        .bind(categoria)
        .bind(observacoes)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        descricao: &str,
        valor: rust_decimal::Decimal,
        data_despesa: NaiveDate,
        categoria: &str,
        observacoes: Option<&str>,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE despesas
            SET descricao = $1, valor = $2, data_despesa = $3, categoria = $4,
                observacoes = $5, updated_at = now()
            WHERE id = $6 AND tenant_id = $7
            RETURNING *
            "#,
        )
        .bind(descricao)
        .bind(valor)
        .bind(data_despesa)
        .bind(categoria)
        .bind(observacoes)
        .bind(id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn soft_delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE despesas SET deleted_at = now() WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    //  ESTATÍSTICAS POR CATEGORIA
    // =========================================================================

    pub async fn stats_by_category(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<ExpenseCategoryStat>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT categoria, COUNT(*) AS total_count, COALESCE(SUM(valor), 0) AS total_value
            FROM despesas
            WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        if let Some((start, end)) = range {
            qb.push(" AND data_despesa BETWEEN ");
            qb.push_bind(start);
            qb.push(" AND ");
            qb.push_bind(end);
        }
        qb.push(" GROUP BY categoria ORDER BY total_value DESC");

        let stats = qb
            .build_query_as::<ExpenseCategoryStat>()
            .fetch_all(&self.pool)
            .await?;

        Ok(stats)
    }

    pub async fn totals(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<ExpenseTotals, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*) AS total_expenses, COALESCE(SUM(valor), 0) AS total_amount
            FROM despesas
            WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        if let Some((start, end)) = range {
            qb.push(" AND data_despesa BETWEEN ");
            qb.push_bind(start);
            qb.push(" AND ");
            qb.push_bind(end);
        }

        let totals = qb
            .build_query_as::<ExpenseTotals>()
            .fetch_one(&self.pool)
            .await?;

        Ok(totals)
    }
}
