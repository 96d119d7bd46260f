// src/models/note.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;

// Nota pessoal: visível apenas para o usuário dono, dentro do tenant dele.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Note {
    pub id: Uuid,

    pub title: Option<String>,

    #[schema(example = "Cobrar o fornecedor na sexta")]
    pub content: String,

    #[schema(example = "#f3f4f6")]
    pub color: String,

    pub is_pinned: bool,

    #[schema(ignore)]
    pub user_id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotePayload {
    pub title: Option<String>,

    #[validate(required(message = "Content is required"), length(min = 1, message = "Content is required"))]
    pub content: Option<String>,

    pub color: Option<String>,
    pub is_pinned: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateNotePayload {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,

    pub content: Option<String>,
    pub color: Option<String>,
    pub is_pinned: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PinResponse {
    pub is_pinned: bool,
}
