// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        admin::AdminUser,
        auth::{User, UserRole},
    },
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Cria um novo usuário. Recebe um executor genérico para poder participar
    // da transação de registro (tenant + usuário).
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        tenant_id: Uuid,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, tenant_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(tenant_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // O nome padrão que o Postgres cria para "UNIQUE" na coluna email
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    // =========================================================================
    //  ADMINISTRAÇÃO (cruza tenants; protegida por role no middleware)
    // =========================================================================

    pub async fn list_all(&self) -> Result<Vec<AdminUser>, AppError> {
        let users = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT
                u.id, u.name, u.email, u.role, u.tenant_id,
                u.is_active, u.created_at, u.updated_at,
                t.name AS tenant_name
            FROM users u
            LEFT JOIN tenants t ON u.tenant_id = t.id
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_admin_view(&self, id: Uuid) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT
                u.id, u.name, u.email, u.role, u.tenant_id,
                u.is_active, u.created_at, u.updated_at,
                t.name AS tenant_name
            FROM users u
            LEFT JOIN tenants t ON u.tenant_id = t.id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Atualização dinâmica: só as colunas presentes entram no SET.
    pub async fn update_fields(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<UserRole>,
        is_active: Option<bool>,
        tenant_id: Option<Uuid>,
        password_hash: Option<&str>,
    ) -> Result<(), AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut set = qb.separated(", ");

        if let Some(name) = name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(email) = email {
            set.push("email = ").push_bind_unseparated(email);
        }
        if let Some(role) = role {
            set.push("role = ").push_bind_unseparated(role);
        }
        if let Some(is_active) = is_active {
            set.push("is_active = ").push_bind_unseparated(is_active);
        }
        if let Some(tenant_id) = tenant_id {
            set.push("tenant_id = ").push_bind_unseparated(tenant_id);
        }
        if let Some(hash) = password_hash {
            set.push("password_hash = ").push_bind_unseparated(hash);
        }
        set.push("updated_at = now()");

        qb.push(" WHERE id = ").push_bind(id);

        qb.build()
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::EmailAlreadyExists;
                    }
                }
                e.into()
            })?;

        Ok(())
    }

    // Desativação é o "soft delete" de usuários: a linha permanece para auditoria
    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET is_active = false, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
