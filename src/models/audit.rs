// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Registro de auditoria: append-only, nunca atualizado nem removido.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "CREATE")]
    pub action: String,

    #[schema(example = "user")]
    pub entity_type: String,

    pub entity_id: Option<Uuid>,

    pub old_values: Option<Value>,
    pub new_values: Option<Value>,

    pub created_at: DateTime<Utc>,
}

/// Entrada da atividade recente no painel administrativo (com o autor).
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditActivity {
    pub action: String,
    pub entity_type: String,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}
