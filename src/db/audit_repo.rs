// src/db/audit_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::audit::{AuditActivity, AuditLog},
};

// Trilha de auditoria: só existe append e leitura. Não há UPDATE nem DELETE
// aqui, e não deve haver nunca.
#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn append(
        &self,
        user_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: Option<Uuid>,
        old_values: Option<Value>,
        new_values: Option<Value>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (user_id, action, entity_type, entity_id, old_values, new_values)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(old_values)
        .bind(new_values)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn recent_activity(&self, limit: i64) -> Result<Vec<AuditActivity>, AppError> {
        let rows = sqlx::query_as::<_, AuditActivity>(
            r#"
            SELECT
                al.action,
                al.entity_type,
                al.created_at,
                u.name AS user_name,
                u.email AS user_email
            FROM audit_logs al
            LEFT JOIN users u ON al.user_id = u.id
            ORDER BY al.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn by_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<AuditLog>, AppError> {
        let rows = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT * FROM audit_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
