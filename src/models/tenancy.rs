// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Fronteira de isolamento: toda linha de negócio pertence a exatamente um tenant.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Tenant {
    pub id: Uuid,

    #[schema(example = "Banca da Maria")]
    pub name: String,

    #[schema(example = "banca-da-maria-1a2b3c4d")]
    pub slug: String,

    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
