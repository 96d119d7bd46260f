// src/db/tenant_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::tenancy::Tenant};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Usada dentro da transação de registro: se a criação do usuário falhar
    // em seguida, o rollback desfaz também o tenant.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (name, slug)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("Slug '{}' already exists", slug));
                }
            }
            e.into()
        })?;

        Ok(tenant)
    }

    pub async fn list_all(&self) -> Result<Vec<Tenant>, AppError> {
        let tenants = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tenants)
    }

    pub async fn count_active(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tenants WHERE active = true",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
