// src/services/note_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NoteRepository,
    models::note::{CreateNotePayload, Note, UpdateNotePayload},
};

const DEFAULT_COLOR: &str = "#f3f4f6";

#[derive(Clone)]
pub struct NoteService {
    repo: NoteRepository,
}

impl NoteService {
    pub fn new(repo: NoteRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Vec<Note>, AppError> {
        self.repo.list(tenant_id, user_id).await
    }

    pub async fn get(&self, tenant_id: Uuid, user_id: Uuid, id: Uuid) -> Result<Note, AppError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Note"))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        payload: CreateNotePayload,
    ) -> Result<Note, AppError> {
        let content = payload
            .content
            .ok_or_else(|| AppError::InvalidInput("Content is required".to_string()))?;

        self.repo
            .insert(
                tenant_id,
                user_id,
                payload.title.as_deref(),
                &content,
                payload.color.as_deref().unwrap_or(DEFAULT_COLOR),
                payload.is_pinned.unwrap_or(false),
            )
            .await
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateNotePayload,
    ) -> Result<Note, AppError> {
        let atual = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Note"))?;

        let title = payload.title.unwrap_or(atual.title);
        let content = payload.content.unwrap_or(atual.content);
        let color = payload.color.unwrap_or(atual.color);
        let is_pinned = payload.is_pinned.unwrap_or(atual.is_pinned);

        self.repo
            .update(tenant_id, user_id, id, title.as_deref(), &content, &color, is_pinned)
            .await
    }

    pub async fn delete(&self, tenant_id: Uuid, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Note"))?;

        self.repo.soft_delete(tenant_id, user_id, id).await
    }

    // Inverte o estado de fixação e devolve o novo estado
    pub async fn toggle_pin(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<bool, AppError> {
        let atual = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Note"))?;

        let novo = !atual.is_pinned;
        self.repo.set_pinned(tenant_id, user_id, id, novo).await?;

        Ok(novo)
    }
}
