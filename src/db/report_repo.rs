// src/db/report_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::report::{AttendantBreakdown, TripeiroBreakdown},
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
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

    // (quantidade de pagamentos confirmados, receita total)
    pub async fn revenue_summary(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<(i64, Decimal), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*), COALESCE(SUM(valor), 0) FROM pagamentos WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND status = 'confirmado' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_pagamento", range);

        let summary = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(summary)
    }

    pub async fn expenses_summary(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<(i64, Decimal), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*), COALESCE(SUM(valor), 0) FROM despesas WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_despesa", range);

        let summary = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(summary)
    }

    // (total de comissões, atendentes distintos) sobre pagamentos confirmados
    pub async fn commissions_summary(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<(Decimal, i64), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COALESCE(SUM(valor_comissao), 0), COUNT(DISTINCT atendente_id)
            FROM pagamentos WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND status = 'confirmado' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_pagamento", range);

        let summary = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(summary)
    }

    pub async fn pending_summary(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<(i64, Decimal), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*), COALESCE(SUM(valor), 0) FROM pagamentos WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND status = 'pendente' AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_pagamento", range);

        let summary = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(summary)
    }

    // (categoria, soma, quantidade) — o percentual é derivado no serviço
    pub async fn expenses_by_category(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<(String, Decimal, i64)>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COALESCE(categoria, 'Outros'), SUM(valor), COUNT(*)
            FROM despesas WHERE tenant_id = "#,
        );
        qb.push_bind(tenant_id);
        qb.push(" AND deleted_at IS NULL");
        Self::push_range(&mut qb, "data_despesa", range);
        qb.push(" GROUP BY categoria ORDER BY 2 DESC");

        let rows = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn top_attendants(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<AttendantBreakdown>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                a.nome AS name,
                COUNT(p.id) AS sales_count,
                COALESCE(SUM(p.valor), 0) AS total_sales,
                COALESCE(SUM(p.valor_comissao), 0) AS total_commission
            FROM atendentes a
            LEFT JOIN pagamentos p
                ON a.id = p.atendente_id
                AND p.status = 'confirmado'
                AND p.deleted_at IS NULL"#,
        );
        Self::push_range(&mut qb, "p.data_pagamento", range);
        qb.push(" WHERE a.tenant_id = ");
        qb.push_bind(tenant_id);
        qb.push(
            r#" AND a.deleted_at IS NULL
            GROUP BY a.id, a.nome
            ORDER BY total_commission DESC
            LIMIT 10"#,
        );

        let rows = qb
            .build_query_as::<AttendantBreakdown>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn top_tripeiros(
        &self,
        tenant_id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<TripeiroBreakdown>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                t.nome AS name,
                COUNT(p.id) AS payment_count,
                COALESCE(SUM(CASE WHEN p.status = 'confirmado' THEN p.valor ELSE 0 END), 0) AS total_paid,
                COALESCE(SUM(CASE WHEN p.status = 'pendente' THEN p.valor ELSE 0 END), 0) AS total_pending
            FROM tripeiros t
            LEFT JOIN pagamentos p
                ON t.id = p.tripeiro_id
                AND p.deleted_at IS NULL"#,
        );
        Self::push_range(&mut qb, "p.data_pagamento", range);
        qb.push(" WHERE t.tenant_id = ");
        qb.push_bind(tenant_id);
        qb.push(
            r#" AND t.deleted_at IS NULL
            GROUP BY t.id, t.nome
            ORDER BY total_paid DESC
            LIMIT 10"#,
        );

        let rows = qb
            .build_query_as::<TripeiroBreakdown>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // Série mensal de receita confirmada dos últimos 6 meses ("YYYY-MM", soma)
    pub async fn monthly_revenue(&self, tenant_id: Uuid) -> Result<Vec<(String, Decimal)>, AppError> {
        let rows = sqlx::query_as::<_, (String, Decimal)>(
            r#"
            SELECT
                to_char(data_pagamento, 'YYYY-MM') AS month,
                SUM(CASE WHEN status = 'confirmado' THEN valor ELSE 0 END)
            FROM pagamentos
            WHERE tenant_id = $1
              AND deleted_at IS NULL
              AND data_pagamento >= (CURRENT_DATE - INTERVAL '6 months')
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn monthly_expenses(&self, tenant_id: Uuid) -> Result<Vec<(String, Decimal)>, AppError> {
        let rows = sqlx::query_as::<_, (String, Decimal)>(
            r#"
            SELECT
                to_char(data_despesa, 'YYYY-MM') AS month,
                SUM(valor)
            FROM despesas
            WHERE tenant_id = $1
              AND deleted_at IS NULL
              AND data_despesa >= (CURRENT_DATE - INTERVAL '6 months')
            GROUP BY 1
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
