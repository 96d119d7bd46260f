// src/db/tripeiro_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        payment::PaymentWithNames,
        tripeiro::{ContaTripeiro, Tripeiro, TripeiroWithTotals},
    },
};

const SELECT_WITH_TOTALS: &str = r#"
    SELECT
        t.*,
        COUNT(DISTINCT c.id) AS total_accounts,
        SUM(c.saldo_devedor) AS total_debt,
        COUNT(DISTINCT p.id) AS total_payments
    FROM tripeiros t
    LEFT JOIN contas_tripeiro c ON t.id = c.tripeiro_id AND c.deleted_at IS NULL
    LEFT JOIN pagamentos p ON t.id = p.tripeiro_id AND p.deleted_at IS NULL
"#;

#[derive(Clone)]
pub struct TripeiroRepository {
    pool: PgPool,
}

impl TripeiroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filters(
        qb: &mut QueryBuilder<'_, Postgres>,
        search: Option<&str>,
        ativo: Option<bool>,
    ) {
        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (t.nome ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR t.email ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR t.telefone ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        if let Some(ativo) = ativo {
            qb.push(" AND t.ativo = ");
            qb.push_bind(ativo);
        }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        search: Option<&str>,
        ativo: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TripeiroWithTotals>, i64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM tripeiros t WHERE t.tenant_id = ",
        );
        count_qb.push_bind(tenant_id);
        count_qb.push(" AND t.deleted_at IS NULL");
        Self::push_filters(&mut count_qb, search, ativo);

        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(SELECT_WITH_TOTALS);
        qb.push(" WHERE t.tenant_id = ");
        qb.push_bind(tenant_id);
        qb.push(" AND t.deleted_at IS NULL");
        Self::push_filters(&mut qb, search, ativo);
        qb.push(" GROUP BY t.id ORDER BY t.nome ASC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let tripeiros = qb
            .build_query_as::<TripeiroWithTotals>()
            .fetch_all(&self.pool)
            .await?;

        Ok((tripeiros, total))
    }

    pub async fn find_with_totals(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<TripeiroWithTotals>, AppError> {
        let tripeiro = sqlx::query_as::<_, TripeiroWithTotals>(&format!(
            "{SELECT_WITH_TOTALS} WHERE t.id = $1 AND t.tenant_id = $2 AND t.deleted_at IS NULL GROUP BY t.id"
        ))
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tripeiro)
    }

    pub async fn find_row(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Tripeiro>, AppError> {
        let tripeiro = sqlx::query_as::<_, Tripeiro>(
            "SELECT * FROM tripeiros WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tripeiro)
    }

    pub async fn email_in_use(
        &self,
        tenant_id: Uuid,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM tripeiros WHERE email = ",
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

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        tenant_id: Uuid,
        nome: &str,
        telefone: Option<&str>,
        email: Option<&str>,
        endereco: Option<&str>,
        cidade: Option<&str>,
        estado: Option<&str>,
        cep: Option<&str>,
        observacoes: Option<&str>,
    ) -> Result<Tripeiro, AppError> {
        let tripeiro = sqlx::query_as::<_, Tripeiro>(
            r#"
            INSERT INTO tripeiros (
                nome, telefone, email, endereco, cidade, estado, cep, observacoes, tenant_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(telefone)
        .bind(email)
        .bind(endereco)
        .bind(cidade)
        .bind(estado)
        .bind(cep)
        .bind(observacoes)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tripeiro)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        nome: &str,
        telefone: Option<&str>,
        email: Option<&str>,
        endereco: Option<&str>,
        cidade: Option<&str>,
        estado: Option<&str>,
        cep: Option<&str>,
        ativo: bool,
        observacoes: Option<&str>,
    ) -> Result<Tripeiro, AppError> {
        let tripeiro = sqlx::query_as::<_, Tripeiro>(
            r#"
            UPDATE tripeiros
            SET nome = $1, telefone = $2, email = $3, endereco = $4, cidade = $5,
                estado = $6, cep = $7, ativo = $8, observacoes = $9, updated_at = now()
            WHERE id = $10 AND tenant_id = $11
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(telefone)
        .bind(email)
        .bind(endereco)
        .bind(cidade)
        .bind(estado)
        .bind(cep)
        .bind(ativo)
        .bind(observacoes)
        .bind(id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tripeiro)
    }

    pub async fn soft_delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE tripeiros SET deleted_at = now() WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Dependentes vivos bloqueiam a exclusão (o caminho certo é desativar)
    pub async fn count_live_payments(&self, id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM pagamentos WHERE tripeiro_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count_live_accounts(&self, id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contas_tripeiro WHERE tripeiro_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // =========================================================================
    //  CONTAS DO TRIPEIRO
    // =========================================================================

    pub async fn list_accounts(
        &self,
        tripeiro_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ContaTripeiro>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contas_tripeiro WHERE tripeiro_id = $1 AND deleted_at IS NULL",
        )
        .bind(tripeiro_id)
        .fetch_one(&self.pool)
        .await?;

        let accounts = sqlx::query_as::<_, ContaTripeiro>(
            r#"
            SELECT * FROM contas_tripeiro
            WHERE tripeiro_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tripeiro_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((accounts, total))
    }

    pub async fn all_accounts(&self, tripeiro_id: Uuid) -> Result<Vec<ContaTripeiro>, AppError> {
        let accounts = sqlx::query_as::<_, ContaTripeiro>(
            r#"
            SELECT * FROM contas_tripeiro
            WHERE tripeiro_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(tripeiro_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    // Unicidade global entre registros vivos (comportamento herdado; ver DESIGN.md)
    pub async fn account_number_in_use(&self, numero_conta: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contas_tripeiro WHERE numero_conta = $1 AND deleted_at IS NULL",
        )
        .bind(numero_conta)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn insert_account(
        &self,
        tripeiro_id: Uuid,
        numero_conta: &str,
        descricao: Option<&str>,
        limite_credito: Decimal,
        saldo_devedor: Decimal,
        observacoes: Option<&str>,
    ) -> Result<ContaTripeiro, AppError> {
        let account = sqlx::query_as::<_, ContaTripeiro>(
            r#"
            INSERT INTO contas_tripeiro (
                tripeiro_id, numero_conta, descricao, limite_credito, saldo_devedor, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(tripeiro_id)
        .bind(numero_conta)
        .bind(descricao)
        .bind(limite_credito)
        .bind(saldo_devedor)
        .bind(observacoes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Account number already exists".to_string());
                }
            }
            e.into()
        })?;

        Ok(account)
    }

    // =========================================================================
    //  PAGAMENTOS DO TRIPEIRO
    // =========================================================================

    pub async fn payments(
        &self,
        tenant_id: Uuid,
        tripeiro_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PaymentWithNames>, i64, Decimal), AppError> {
        let mut totals_qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*), COALESCE(SUM(p.valor), 0) FROM pagamentos p WHERE p.tripeiro_id = ",
        );
        totals_qb.push_bind(tripeiro_id);
        totals_qb.push(" AND p.tenant_id = ");
        totals_qb.push_bind(tenant_id);
        totals_qb.push(" AND p.deleted_at IS NULL");
        if let Some((start, end)) = range {
            totals_qb.push(" AND p.data_pagamento BETWEEN ");
            totals_qb.push_bind(start);
            totals_qb.push(" AND ");
            totals_qb.push_bind(end);
        }

        let (total, total_value): (i64, Decimal) = totals_qb
            .build_query_as()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT p.*, a.nome AS attendant_name, t.nome AS tripeiro_name
            FROM pagamentos p
            LEFT JOIN atendentes a ON p.atendente_id = a.id
            LEFT JOIN tripeiros t ON p.tripeiro_id = t.id
            WHERE p.tripeiro_id = "#,
        );
        qb.push_bind(tripeiro_id);
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

        let payments = qb
            .build_query_as::<PaymentWithNames>()
            .fetch_all(&self.pool)
            .await?;

        Ok((payments, total, total_value))
    }
}
