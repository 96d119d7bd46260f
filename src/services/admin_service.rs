// src/services/admin_service.rs

use bcrypt::hash;
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AdminRepository, AuditRepository, TenantRepository, UserRepository},
    models::{
        admin::{
            AdminCreateUserPayload, AdminDashboard, AdminOverview, AdminUpdateUserPayload,
            AdminUser, MetricsSummary, UserMetrics, UserMetricsResponse,
        },
        auth::{User, UserRole},
        tenancy::Tenant,
    },
    services::report_service::margem_lucro,
};

#[derive(Clone)]
pub struct AdminService {
    admin_repo: AdminRepository,
    user_repo: UserRepository,
    tenant_repo: TenantRepository,
    audit_repo: AuditRepository,
    pool: sqlx::PgPool,
}

impl AdminService {
    pub fn new(
        admin_repo: AdminRepository,
        user_repo: UserRepository,
        tenant_repo: TenantRepository,
        audit_repo: AuditRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self { admin_repo, user_repo, tenant_repo, audit_repo, pool }
    }

    pub async fn dashboard(&self) -> Result<AdminDashboard, AppError> {
        let total_users = self.admin_repo.count_active_users().await?;
        let total_tenants = self.tenant_repo.count_active().await?;
        let total_revenue = self.admin_repo.global_revenue().await?;
        let total_expenses = self.admin_repo.global_expenses().await?;

        let overview = AdminOverview {
            total_users,
            total_tenants,
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
        };

        Ok(AdminDashboard {
            overview,
            users_by_role: self.admin_repo.users_by_role().await?,
            recent_activity: self.audit_repo.recent_activity(10).await?,
        })
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUser>, AppError> {
        self.user_repo.list_all().await
    }

    pub async fn create_user(
        &self,
        actor: &User,
        payload: AdminCreateUserPayload,
    ) -> Result<AdminUser, AppError> {
        let name = payload
            .name
            .ok_or_else(|| AppError::InvalidInput("Name is required".to_string()))?;
        let email = payload
            .email
            .ok_or_else(|| AppError::InvalidInput("Email is required".to_string()))?;
        let password = payload
            .password
            .ok_or_else(|| AppError::InvalidInput("Password is required".to_string()))?;

        let role = payload.role.unwrap_or(UserRole::User);
        // Sem tenant explícito, o usuário entra no tenant do próprio admin
        let tenant_id = payload.tenant_id.unwrap_or(actor.tenant_id);

        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let created = self
            .user_repo
            .create_user(&self.pool, &name, &email, &password_hash, role, tenant_id)
            .await?;

        self.audit(
            actor.id,
            "CREATE",
            "user",
            Some(created.id),
            None,
            Some(json!({
                "name": created.name,
                "email": created.email,
                "role": created.role,
                "tenant_id": created.tenant_id,
            })),
        )
        .await;

        self.user_repo
            .find_admin_view(created.id)
            .await?
            .ok_or(AppError::NotFound("User"))
    }

    pub async fn update_user(
        &self,
        actor: &User,
        id: Uuid,
        payload: AdminUpdateUserPayload,
    ) -> Result<AdminUser, AppError> {
        let atual = self
            .user_repo
            .find_admin_view(id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let tem_senha = matches!(payload.password.as_deref(), Some(p) if !p.is_empty());
        if payload.name.is_none()
            && payload.email.is_none()
            && payload.role.is_none()
            && payload.is_active.is_none()
            && payload.tenant_id.is_none()
            && !tem_senha
        {
            return Err(AppError::InvalidInput("No fields to update".to_string()));
        }

        let password_hash = match payload.password {
            Some(password) if !password.is_empty() => Some(
                tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
                    .await
                    .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??,
            ),
            _ => None,
        };

        self.user_repo
            .update_fields(
                id,
                payload.name.as_deref(),
                payload.email.as_deref(),
                payload.role,
                payload.is_active,
                payload.tenant_id,
                password_hash.as_deref(),
            )
            .await?;

        // Snapshot do antes/depois, sem jamais registrar a senha
        let old_values = serde_json::to_value(&atual).ok();
        let new_values = json!({
            "name": payload.name,
            "email": payload.email,
            "role": payload.role,
            "is_active": payload.is_active,
            "tenant_id": payload.tenant_id,
            "password_changed": tem_senha,
        });

        self.audit(actor.id, "UPDATE", "user", Some(id), old_values, Some(new_values)).await;

        self.user_repo
            .find_admin_view(id)
            .await?
            .ok_or(AppError::NotFound("User"))
    }

    // Usuários não são removidos: desativação preserva a trilha de auditoria
    pub async fn deactivate_user(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        if id == actor.id {
            return Err(AppError::InvalidInput("Cannot delete your own account".to_string()));
        }

        self.user_repo
            .find_admin_view(id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        self.user_repo.deactivate(id).await?;

        self.audit(actor.id, "DELETE", "user", Some(id), None, None).await;

        Ok(())
    }

    pub async fn user_metrics(
        &self,
        id: Uuid,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<UserMetricsResponse, AppError> {
        let user = self
            .user_repo
            .find_admin_view(id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let payments = self.admin_repo.payment_metrics(user.tenant_id, range).await?;
        let expenses = self.admin_repo.expense_metrics(user.tenant_id, range).await?;
        let receivables = self.admin_repo.receivable_metrics(user.tenant_id, range).await?;

        let total_revenue = payments.total_value + receivables.total_value;
        let total_expenses = expenses.total_value;
        let net_result = total_revenue - total_expenses;

        let summary = MetricsSummary {
            total_revenue,
            total_expenses,
            net_result,
            profit_margin: margem_lucro(net_result, total_revenue),
        };

        let recent_activity = self.audit_repo.by_user(id, 20).await?;

        Ok(UserMetricsResponse {
            user,
            metrics: UserMetrics { payments, expenses, receivables, summary },
            recent_activity,
        })
    }

    pub async fn tenants(&self) -> Result<Vec<Tenant>, AppError> {
        self.tenant_repo.list_all().await
    }

    // A auditoria nunca derruba a operação principal: falha vira warning
    async fn audit(
        &self,
        user_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: Option<Uuid>,
        old_values: Option<serde_json::Value>,
        new_values: Option<serde_json::Value>,
    ) {
        if let Err(e) = self
            .audit_repo
            .append(user_id, action, entity_type, entity_id, old_values, new_values)
            .await
        {
            tracing::warn!("Falha ao gravar auditoria de {action} {entity_type}: {e}");
        }
    }
}
