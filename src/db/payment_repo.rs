// src/db/payment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::payment::{
        Payment, PaymentListQuery, PaymentStats, PaymentValues, PaymentWithNames,
    },
};

const SELECT_WITH_NAMES: &str = r#"
    SELECT p.*, a.nome AS attendant_name, t.nome AS tripeiro_name
    FROM pagamentos p
    LEFT JOIN atendentes a ON p.atendente_id = a.id
    LEFT JOIN tripeiros t ON p.tripeiro_id = t.id
"#;

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Aplica os filtros opcionais da listagem sobre um builder já iniciado
    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &PaymentListQuery) {
        if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            qb.push(" AND p.data_pagamento BETWEEN ");
            qb.push_bind(start);
            qb.push(" AND ");
            qb.push_bind(end);
        }
        if let Some(status) = filter.status {
            qb.push(" AND p.status = ");
            qb.push_bind(status);
        }
        if let Some(attendant_id) = filter.attendant_id {
            qb.push(" AND p.atendente_id = ");
            qb.push_bind(attendant_id);
        }
        if let Some(tripeiro_id) = filter.tripeiro_id {
            qb.push(" AND p.tripeiro_id = ");
            qb.push_bind(tripeiro_id);
        }
    }

    /// Listagem paginada com filtros combináveis; mais recente primeiro,
    /// empate desfeito pela ordem de inserção.
    pub async fn list(
        &self,
        tenant_id: Uuid,
        filter: &PaymentListQuery,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PaymentWithNames>, i64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM pagamentos p WHERE p.tenant_id = ",
        );
        count_qb.push_bind(tenant_id);
        count_qb.push(" AND p.deleted_at IS NULL");
        Self::push_filters(&mut count_qb, filter);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(SELECT_WITH_NAMES);
        qb.push(" WHERE p.tenant_id = ");
        qb.push_bind(tenant_id);
        qb.push(" AND p.deleted_at IS NULL");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY p.data_pagamento DESC, p.created_at DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let payments = qb
            .build_query_as::<PaymentWithNames>()
            .fetch_all(&self.pool)
            .await?;

        Ok((payments, total))
    }

    pub async fn find_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<PaymentWithNames>, AppError> {
        let payment = sqlx::query_as::<_, PaymentWithNames>(&format!(
            "{SELECT_WITH_NAMES} WHERE p.id = $1 AND p.tenant_id = $2 AND p.deleted_at IS NULL"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    // Linha crua, sem joins: é contra ela que o patch é mesclado
    pub async fn find_row(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM pagamentos WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn insert(
        &self,
        tenant_id: Uuid,
        values: &PaymentValues,
        valor_comissao: Decimal,
    ) -> Result<Uuid, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO pagamentos (
                descricao, valor, data_pagamento, atendente_id, tripeiro_id,
                tipo_pagamento, status, valor_comissao, observacoes, tenant_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&values.descricao)
        .bind(values.valor)
        .bind(values.data_pagamento)
        .bind(values.atendente_id)
        .bind(values.tripeiro_id)
        .bind(values.tipo_pagamento)
        .bind(values.status)
        .bind(valor_comissao)
        .bind(&values.observacoes)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        values: &PaymentValues,
        valor_comissao: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE pagamentos
            SET descricao = $1, valor = $2, data_pagamento = $3, atendente_id = $4,
                tripeiro_id = $5, tipo_pagamento = $6, status = $7, valor_comissao = $8,
                observacoes = $9, updated_at = now()
            WHERE id = $10 AND tenant_id = $11
            "#,
        )
        .bind(&values.descricao)
        .bind(values.valor)
        .bind(values.data_pagamento)
        .bind(values.atendente_id)
        .bind(values.tripeiro_id)
        .bind(values.tipo_pagamento)
        .bind(values.status)
        .bind(valor_comissao)
        .bind(&values.observacoes)
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Pagamentos nunca são removidos fisicamente
    pub async fn soft_delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE pagamentos SET deleted_at = now() WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Totais do período sobre pagamentos confirmados.
    pub async fn stats(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<PaymentStats, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                COUNT(*) AS total_payments,
                COALESCE(SUM(CASE WHEN tipo_pagamento = 'entrada' THEN valor ELSE 0 END), 0) AS total_income,
                COALESCE(SUM(CASE WHEN tipo_pagamento = 'saida' THEN valor ELSE 0 END), 0) AS total_outcome,
                COALESCE(SUM(valor_comissao), 0) AS total_commissions,
                COUNT(DISTINCT atendente_id) AS active_attendants,
                COUNT(DISTINCT tripeiro_id) AS active_tripeiros
            FROM pagamentos
            WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL AND status = 'confirmado'");
        if let Some((start, end)) = range {
            qb.push(" AND data_pagamento BETWEEN ");
            qb.push_bind(start);
            qb.push(" AND ");
            qb.push_bind(end);
        }

        let stats = qb
            .build_query_as::<PaymentStats>()
            .fetch_one(&self.pool)
            .await?;

        Ok(stats)
    }
}
