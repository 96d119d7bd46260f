// src/db/reminder_repo.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reminder::{Reminder, ReminderListQuery, ReminderPriority, ReminderStatus},
};

// Prioridade alta primeiro, depois vencimento mais próximo
const ORDER_BY_PRIORITY: &str = r#"
    ORDER BY CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
             due_date ASC NULLS LAST,
             due_time ASC NULLS LAST
"#;

#[derive(Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        filter: &ReminderListQuery,
    ) -> Result<Vec<Reminder>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT * FROM reminders WHERE tenant_id = ",
        );
        qb.push_bind(tenant_id);
        qb.push(" AND user_id = ");
        qb.push_bind(user_id);
        qb.push(" AND deleted_at IS NULL");

        if let Some(status) = filter.status {
            qb.push(" AND status = ");
            qb.push_bind(status);
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND priority = ");
            qb.push_bind(priority);
        }
        if let Some(from) = filter.from_date {
            qb.push(" AND due_date >= ");
            qb.push_bind(from);
        }
        if let Some(to) = filter.to_date {
            qb.push(" AND due_date <= ");
            qb.push_bind(to);
        }
        qb.push(ORDER_BY_PRIORITY);

        let reminders = qb
            .build_query_as::<Reminder>()
            .fetch_all(&self.pool)
            .await?;

        Ok(reminders)
    }

    pub async fn find_by_id(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Reminder>, AppError> {
        let reminder = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT * FROM reminders
            WHERE id = $1 AND tenant_id = $2 AND user_id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
        priority: ReminderPriority,
        category: Option<&str>,
    ) -> Result<Reminder, AppError> {
        let reminder = sqlx::query_as::<_, Reminder>(
            r#"
            INSERT INTO reminders (
                title, description, due_date, due_time, priority, category, user_id, tenant_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(due_time)
        .bind(priority)
        .bind(category)
        .bind(user_id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(reminder)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
        priority: ReminderPriority,
        status: ReminderStatus,
        category: Option<&str>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Reminder, AppError> {
        let reminder = sqlx::query_as::<_, Reminder>(
            r#"
            UPDATE reminders
            SET title = $1, description = $2, due_date = $3, due_time = $4,
                priority = $5, status = $6, category = $7, completed_at = $8,
                updated_at = now()
            WHERE id = $9 AND tenant_id = $10 AND user_id = $11
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(due_time)
        .bind(priority)
        .bind(status)
        .bind(category)
        .bind(completed_at)
        .bind(id)
        .bind(tenant_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(reminder)
    }

    pub async fn mark_completed(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET status = 'completed', completed_at = now(), updated_at = now()
            WHERE id = $1 AND tenant_id = $2 AND user_id = $3
            "#,
        )
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
            r#"
            UPDATE reminders SET deleted_at = now()
            WHERE id = $1 AND tenant_id = $2 AND user_id = $3
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Pendentes que vencem nos próximos 7 dias
    pub async fn upcoming(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Vec<Reminder>, AppError> {
        let reminders = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT * FROM reminders
            WHERE tenant_id = $1 AND user_id = $2
              AND deleted_at IS NULL
              AND status = 'pending'
              AND due_date BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '7 days'
            ORDER BY due_date ASC, due_time ASC
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }
}
