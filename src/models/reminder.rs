// src/models/reminder.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "prioridade_lembrete", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_lembrete", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Completed,
}

// Lembrete pessoal: visível apenas para o usuário dono, dentro do tenant dele.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Reminder {
    pub id: Uuid,

    #[schema(example = "Pagar o aluguel")]
    pub title: String,

    pub description: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, example = "14:30:00")]
    pub due_time: Option<NaiveTime>,

    pub priority: ReminderPriority,
    pub status: ReminderStatus,
    pub category: Option<String>,

    // Preenchido apenas na transição para `completed`
    pub completed_at: Option<DateTime<Utc>>,

    #[schema(ignore)]
    pub user_id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReminderPayload {
    #[validate(required(message = "Title is required"), length(min = 1, message = "Title is required"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    #[schema(value_type = Option<String>)]
    pub due_time: Option<NaiveTime>,

    pub priority: Option<ReminderPriority>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReminderPayload {
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub due_time: Option<Option<NaiveTime>>,

    pub priority: Option<ReminderPriority>,
    pub status: Option<ReminderStatus>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReminderListQuery {
    pub status: Option<ReminderStatus>,
    pub priority: Option<ReminderPriority>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}
