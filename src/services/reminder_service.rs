// src/services/reminder_service.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReminderRepository,
    models::reminder::{
        CreateReminderPayload, Reminder, ReminderListQuery, ReminderPriority, ReminderStatus,
        UpdateReminderPayload,
    },
};

/// Regra do carimbo de conclusão: a transição para `completed` grava o
/// momento; qualquer status diferente de `completed` limpa o carimbo; e um
/// lembrete que permanece concluído mantém o carimbo original.
pub(crate) fn proximo_completed_at(
    status_atual: ReminderStatus,
    status_novo: ReminderStatus,
    completed_at_atual: Option<DateTime<Utc>>,
    agora: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (status_atual, status_novo) {
        (ReminderStatus::Pending, ReminderStatus::Completed) => Some(agora),
        (_, ReminderStatus::Pending) => None,
        (ReminderStatus::Completed, ReminderStatus::Completed) => completed_at_atual,
    }
}

#[derive(Clone)]
pub struct ReminderService {
    repo: ReminderRepository,
}

impl ReminderService {
    pub fn new(repo: ReminderRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        filter: &ReminderListQuery,
    ) -> Result<Vec<Reminder>, AppError> {
        self.repo.list(tenant_id, user_id, filter).await
    }

    pub async fn get(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Reminder, AppError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Reminder"))
    }

    pub async fn create(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        payload: CreateReminderPayload,
    ) -> Result<Reminder, AppError> {
        let title = payload
            .title
            .ok_or_else(|| AppError::InvalidInput("Title is required".to_string()))?;

        self.repo
            .insert(
                tenant_id,
                user_id,
                &title,
                payload.description.as_deref(),
                payload.due_date,
                payload.due_time,
                payload.priority.unwrap_or(ReminderPriority::Medium),
                payload.category.as_deref(),
            )
            .await
    }

    pub async fn update(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateReminderPayload,
    ) -> Result<Reminder, AppError> {
        let atual = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Reminder"))?;

        let title = payload.title.unwrap_or(atual.title);
        let description = payload.description.unwrap_or(atual.description);
        let due_date = payload.due_date.unwrap_or(atual.due_date);
        let due_time = payload.due_time.unwrap_or(atual.due_time);
        let priority = payload.priority.unwrap_or(atual.priority);
        let status = payload.status.unwrap_or(atual.status);
        let category = payload.category.unwrap_or(atual.category);

        let completed_at =
            proximo_completed_at(atual.status, status, atual.completed_at, Utc::now());

        self.repo
            .update(
                tenant_id,
                user_id,
                id,
                &title,
                description.as_deref(),
                due_date,
                due_time,
                priority,
                status,
                category.as_deref(),
                completed_at,
            )
            .await
    }

    pub async fn delete(&self, tenant_id: Uuid, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Reminder"))?;

        self.repo.soft_delete(tenant_id, user_id, id).await
    }

    // Concluir duas vezes é conflito: o carimbo original não pode ser sobrescrito
    pub async fn complete(&self, tenant_id: Uuid, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let atual = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(AppError::NotFound("Reminder"))?;

        if atual.status == ReminderStatus::Completed {
            return Err(AppError::Conflict("Reminder already completed".to_string()));
        }

        self.repo.mark_completed(tenant_id, user_id, id).await
    }

    pub async fn upcoming(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Vec<Reminder>, AppError> {
        self.repo.upcoming(tenant_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concluir_grava_o_carimbo() {
        let agora = Utc::now();
        let resultado = proximo_completed_at(
            ReminderStatus::Pending,
            ReminderStatus::Completed,
            None,
            agora,
        );
        assert_eq!(resultado, Some(agora));
    }

    #[test]
    fn reverter_limpa_o_carimbo() {
        let agora = Utc::now();
        let resultado = proximo_completed_at(
            ReminderStatus::Completed,
            ReminderStatus::Pending,
            Some(agora),
            Utc::now(),
        );
        assert_eq!(resultado, None);
    }

    #[test]
    fn permanecer_concluido_mantem_o_carimbo_original() {
        let original = Utc::now() - chrono::Duration::hours(3);
        let resultado = proximo_completed_at(
            ReminderStatus::Completed,
            ReminderStatus::Completed,
            Some(original),
            Utc::now(),
        );
        assert_eq!(resultado, Some(original));
    }

    #[test]
    fn pendente_continua_sem_carimbo() {
        let resultado = proximo_completed_at(
            ReminderStatus::Pending,
            ReminderStatus::Pending,
            None,
            Utc::now(),
        );
        assert_eq!(resultado, None);
    }
}
