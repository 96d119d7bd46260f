// src/db/attendant_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::attendant::{Attendant, AttendantCommissionEntry, AttendantWithTotals},
};

#[derive(Clone)]
pub struct AttendantRepository {
    pool: PgPool,
}

impl AttendantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        ativo: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AttendantWithTotals>, i64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM atendentes WHERE tenant_id = ",
        );
        count_qb.push_bind(tenant_id);
        count_qb.push(" AND deleted_at IS NULL");
        if let Some(ativo) = ativo {
            count_qb.push(" AND ativo = ");
            count_qb.push_bind(ativo);
        }

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                a.*,
                COUNT(DISTINCT p.id) AS total_payments,
                SUM(p.valor_comissao) AS total_commissions
            FROM atendentes a
            LEFT JOIN pagamentos p ON a.id = p.atendente_id AND p.deleted_at IS NULL
            WHERE a.tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND a.deleted_at IS NULL");
        if let Some(ativo) = ativo {
            qb.push(" AND a.ativo = ");
            qb.push_bind(ativo);
        }
        qb.push(" GROUP BY a.id ORDER BY a.nome ASC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let attendants = qb
            .build_query_as::<AttendantWithTotals>()
            .fetch_all(&self.pool)
            .await?;

        Ok((attendants, total))
    }

    pub async fn find_with_totals(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<AttendantWithTotals>, AppError> {
        let attendant = sqlx::query_as::<_, AttendantWithTotals>(
            r#"
            SELECT
                a.*,
                COUNT(DISTINCT p.id) AS total_payments,
                SUM(p.valor_comissao) AS total_commissions
            FROM atendentes a
            LEFT JOIN pagamentos p ON a.id = p.atendente_id AND p.deleted_at IS NULL
            WHERE a.id = $1 AND a.tenant_id = $2 AND a.deleted_at IS NULL
            GROUP BY a.id
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendant)
    }

    pub async fn find_row(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Attendant>, AppError> {
        let attendant = sqlx::query_as::<_, Attendant>(
            "SELECT * FROM atendentes WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendant)
    }

    /// Percentual de comissão de um atendente vivo do tenant; `None` quando o
    /// atendente não existe, foi removido ou pertence a outro tenant — nesse
    /// caso a comissão do pagamento fica em zero, sem falhar a requisição.
    pub async fn find_commission_pct(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Decimal>, AppError> {
        let pct = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT comissao_percentual FROM atendentes
            WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pct)
    }

    pub async fn email_in_use(
        &self,
        tenant_id: Uuid,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM atendentes WHERE email = ",
        );
        qb.push_bind(email);
        qb.push(" AND tenant_id = ");
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        if let Some(id) = exclude_id {
            qb.push(" AND id != ");
            qb.push_bind(id);
        }

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count > 0)
    }

    pub async fn insert(
        &self,
        tenant_id: Uuid,
        nome: &str,
        telefone: Option<&str>,
        email: Option<&str>,
        comissao_percentual: Decimal,
        observacoes: Option<&str>,
    ) -> Result<Attendant, AppError> {
        let attendant = sqlx::query_as::<_, Attendant>(
            r#"
            INSERT INTO atendentes (nome, telefone, email, comissao_percentual, observacoes, tenant_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(telefone)
        .bind(email)
        .bind(comissao_percentual)
        .bind(observacoes)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendant)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        nome: &str,
        telefone: Option<&str>,
        email: Option<&str>,
        comissao_percentual: Decimal,
        ativo: bool,
        observacoes: Option<&str>,
    ) -> Result<Attendant, AppError> {
        let attendant = sqlx::query_as::<_, Attendant>(
            r#"
            UPDATE atendentes
            SET nome = $1, telefone = $2, email = $3, comissao_percentual = $4,
                ativo = $5, observacoes = $6, updated_at = now()
            WHERE id = $7 AND tenant_id = $8
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(telefone)
        .bind(email)
        .bind(comissao_percentual)
        .bind(ativo)
        .bind(observacoes)
        .bind(id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendant)
    }

    pub async fn soft_delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE atendentes SET deleted_at = now() WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Pagamentos vivos que ainda referenciam o atendente (bloqueiam exclusão)
    pub async fn count_live_payments(&self, id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM pagamentos WHERE atendente_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Sub-listagem de comissões de um atendente, com o total do período.
    pub async fn commissions(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<AttendantCommissionEntry>, i64, Decimal), AppError> {
        let mut totals_qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*), COALESCE(SUM(p.valor_comissao), 0)
            FROM pagamentos p
            WHERE p.atendente_id = "#,
        );
        totals_qb.push_bind(id);
        totals_qb.push(" AND p.tenant_id = ");
        totals_qb.push_bind(tenant_id);
        totals_qb.push(" AND p.deleted_at IS NULL");
        if let Some((start, end)) = range {
            totals_qb.push(" AND p.data_pagamento BETWEEN ");
            totals_qb.push_bind(start);
            totals_qb.push(" AND ");
            totals_qb.push_bind(end);
        }

        let (total, total_commission): (i64, Decimal) = totals_qb
            .build_query_as()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                p.id, p.descricao, p.valor, p.valor_comissao,
                p.data_pagamento, p.status,
                t.nome AS tripeiro_name
            FROM pagamentos p
            LEFT JOIN tripeiros t ON p.tripeiro_id = t.id
            WHERE p.atendente_id = "#,
        );
        qb.push_bind(id);
        qb.push(" AND p.tenant_id = ");
        qb.push_bind(tenant_id);
        qb.push(" AND p.deleted_at IS NULL");
        if let Some((start, end)) = range {
            qb.push(" AND p.data_pagamento BETWEEN ");
            qb.push_bind(start);
            qb.push(" AND ");
            qb.push_bind(end);
        }
        qb.push(" ORDER BY p.data_pagamento DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let entries = qb
            .build_query_as::<AttendantCommissionEntry>()
            .fetch_all(&self.pool)
            .await?;

        Ok((entries, total, total_commission))
    }
}
