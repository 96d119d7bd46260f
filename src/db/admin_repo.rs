// src/db/admin_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::admin::{CountedTotal, PaymentMetrics, RoleCount},
};

// Agregados globais do painel administrativo. Estas consultas cruzam todos os
// tenants de propósito; o acesso é barrado antes, pelo guard de role.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_active_users(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE is_active = true",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn users_by_role(&self) -> Result<Vec<RoleCount>, AppError> {
        let rows = sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS count FROM users WHERE is_active = true GROUP BY role",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn global_revenue(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(valor), 0) FROM pagamentos
            WHERE tipo_pagamento = 'entrada' AND status = 'confirmado' AND deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn global_expenses(&self) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(valor), 0) FROM despesas WHERE deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    // =========================================================================
    //  MÉTRICAS POR USUÁRIO (escopadas ao tenant do usuário consultado)
    // =========================================================================

    fn push_range(
        qb: &mut QueryBuilder<'_, Postgres>,
        column: &str,
        range: Option<(NaiveDate, NaiveDate)>,
    ) {
        if let Some((start, end)) = range {
            qb.push(format!(" AND {column} BETWEEN "));
            qb.push_bind(start);
            qb.push(" AND ");
            qb.push_bind(end);
        }
    }

    pub async fn payment_metrics(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<PaymentMetrics, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*), COALESCE(SUM(valor), 0), COALESCE(SUM(valor_comissao), 0)
            FROM pagamentos WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND status = 'confirmado' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_pagamento", range);

        let (count, total_value, total_commission): (i64, Decimal, Decimal) =
            qb.build_query_as().fetch_one(&self.pool).await?;

        Ok(PaymentMetrics { count, total_value, total_commission })
    }

    pub async fn expense_metrics(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<CountedTotal, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*), COALESCE(SUM(valor), 0) FROM despesas WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_despesa", range);

        let (count, total_value): (i64, Decimal) =
            qb.build_query_as().fetch_one(&self.pool).await?;

        Ok(CountedTotal { count, total_value })
    }

    pub async fn receivable_metrics(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<CountedTotal, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*), COALESCE(SUM(valor), 0) FROM recebimentos WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND status = 'confirmado' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_recebimento", range);

        let (count, total_value): (i64, Decimal) =
            qb.build_query_as().fetch_one(&self.pool).await?;

        Ok(CountedTotal { count, total_value })
    }
}
