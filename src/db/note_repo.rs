// src/db/note_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::note::Note};

#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Fixadas primeiro, depois as editadas mais recentemente
    pub async fn list(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes
            WHERE tenant_id = $1 AND user_id = $2 AND deleted_at IS NULL
            ORDER BY is_pinned DESC, updated_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    pub async fn find_by_id(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Note>, AppError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes
            WHERE id = $1 AND tenant_id = $2 AND user_id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    pub async fn insert(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
        content: &str,
        color: &str,
        is_pinned: bool,
    ) -> Result<Note, AppError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (title, content, color, is_pinned, user_id, tenant_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(color)
        .bind(is_pinned)
        .bind(user_id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
        title: Option<&str>,
        content: &str,
        color: &str,
        is_pinned: bool,
    ) -> Result<Note, AppError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $1, content = $2, color = $3, is_pinned = $4, updated_at = now()
            WHERE id = $5 AND tenant_id = $6 AND user_id = $7
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(color)
        .bind(is_pinned)
        .bind(id)
        .bind(tenant_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    pub async fn set_pinned(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
        is_pinned: bool,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE notes SET is_pinned = $1 WHERE id = $2 AND tenant_id = $3 AND user_id = $4",
        )
        .bind(is_pinned)
        .bind(id)
        .bind(tenant_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn soft_delete(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE notes SET deleted_at = now() WHERE id = $1 AND tenant_id = $2 AND user_id = $3",
        )
        .bind(id)
        .bind(tenant_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
