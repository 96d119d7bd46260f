// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{LatestExpense, LatestPayment, TopAttendant},
        note::Note,
        reminder::Reminder,
    },
};

/// Uma consulta por fatia do painel: as fatias opcionais podem degradar para
/// vazio de forma independente no serviço, sem derrubar a resposta inteira.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

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

    // Receita: entradas confirmadas do período
    pub async fn revenue_sum(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Decimal, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COALESCE(SUM(valor), 0) FROM pagamentos
            WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND tipo_pagamento = 'entrada' AND status = 'confirmado' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_pagamento", range);

        let total: Decimal = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    pub async fn expenses_sum(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Decimal, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(valor), 0) FROM despesas WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_despesa", range);

        let total: Decimal = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    // Recebíveis são opcionais: a falha desta consulta degrada para zero
    pub async fn receivables_sum(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Decimal, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COALESCE(SUM(valor), 0) FROM recebimentos WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND status = 'confirmado' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_recebimento", range);

        let total: Decimal = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    // Sobre o mesmo conjunto de pagamentos usado para a receita
    pub async fn commissions_sum(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Decimal, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COALESCE(SUM(valor_comissao), 0) FROM pagamentos
            WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND tipo_pagamento = 'entrada' AND status = 'confirmado' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_pagamento", range);

        let total: Decimal = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    pub async fn top_attendants(&self, tenant_id: Uuid) -> Result<Vec<TopAttendant>, AppError> {
        let attendants = sqlx::query_as::<_, TopAttendant>(
            r#"
            SELECT
                a.id,
                a.nome AS name,
                COUNT(p.id) AS total_sales,
                COALESCE(SUM(p.valor_comissao), 0) AS total_commission
            FROM atendentes a
            LEFT JOIN pagamentos p
                ON a.id = p.atendente_id AND p.status = 'confirmado' AND p.deleted_at IS NULL
            WHERE a.tenant_id = $1 AND a.ativo = true AND a.deleted_at IS NULL
            GROUP BY a.id, a.nome
            ORDER BY total_commission DESC
            LIMIT 5
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendants)
    }

    pub async fn latest_payments(&self, tenant_id: Uuid) -> Result<Vec<LatestPayment>, AppError> {
        let payments = sqlx::query_as::<_, LatestPayment>(
            r#"
            SELECT
                p.id,
                p.valor AS amount,
                p.data_pagamento AS payment_date,
                p.tipo_pagamento AS payment_type,
                p.descricao AS description,
                a.nome AS attendant_name,
                t.nome AS tripeiro_name
            FROM pagamentos p
            LEFT JOIN atendentes a ON p.atendente_id = a.id
            LEFT JOIN tripeiros t ON p.tripeiro_id = t.id
            WHERE p.tenant_id = $1 AND p.status = 'confirmado' AND p.deleted_at IS NULL
            ORDER BY p.data_pagamento DESC, p.created_at DESC
            LIMIT 10
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn latest_expenses(&self, tenant_id: Uuid) -> Result<Vec<LatestExpense>, AppError> {
        let expenses = sqlx::query_as::<_, LatestExpense>(
            r#"
            SELECT
                d.id,
                d.descricao AS description,
                d.valor AS amount,
                COALESCE(d.categoria, 'Geral') AS category,
                d.data_despesa AS expense_date
            FROM despesas d
            WHERE d.tenant_id = $1 AND d.deleted_at IS NULL
            ORDER BY d.data_despesa DESC, d.created_at DESC
            LIMIT 10
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn recent_notes(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes
            WHERE tenant_id = $1 AND user_id = $2 AND deleted_at IS NULL
            ORDER BY is_pinned DESC, updated_at DESC
            LIMIT 5
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    pub async fn pending_reminders(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Reminder>, AppError> {
        let reminders = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT * FROM reminders
            WHERE tenant_id = $1 AND user_id = $2 AND deleted_at IS NULL AND status = 'pending'
            ORDER BY CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
                     due_date ASC NULLS LAST
            LIMIT 5
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    pub async fn count_active_tripeiros(&self, tenant_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tripeiros WHERE tenant_id = $1 AND ativo = true AND deleted_at IS NULL",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn count_active_atendentes(&self, tenant_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM atendentes WHERE tenant_id = $1 AND ativo = true AND deleted_at IS NULL",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
