// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{TenantRepository, UserRepository},
    models::auth::{Claims, User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    tenant_repo: TenantRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        tenant_repo: TenantRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, tenant_repo, jwt_secret, pool }
    }

    /// Registro: cria o tenant e o primeiro usuário numa única transação.
    /// Se a criação do usuário falhar, o rollback desfaz o tenant — nunca
    /// sobra um tenant órfão.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(String, User), AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // Hashing fora da transação (não toca no banco e é pesado de CPU)
        let password_clone = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let mut tx = self.pool.begin().await?;

        let slug = gerar_slug(name);
        let tenant = self.tenant_repo.create(&mut *tx, name, &slug).await?;

        let user = self
            .user_repo
            .create_user(&mut *tx, name, email, &password_hash, UserRole::User, tenant.id)
            .await?;

        tx.commit().await?;

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    /// Valida o token e carrega o usuário do banco. Usuários desativados são
    /// rejeitados mesmo com token ainda dentro da validade.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InvalidToken);
        }

        Ok(user)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            tenant_id: user.tenant_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

/// Slug do tenant: nome normalizado + sufixo aleatório para garantir unicidade.
pub(crate) fn gerar_slug(name: &str) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut normalizado = String::with_capacity(base.len());
    for c in base.chars() {
        if c == '-' && normalizado.ends_with('-') {
            continue;
        }
        normalizado.push(c);
    }
    let normalizado = normalizado.trim_matches('-');

    let sufixo = Uuid::new_v4().simple().to_string();
    format!("{}-{}", normalizado, &sufixo[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_normaliza_e_anexa_sufixo() {
        let slug = gerar_slug("Banca da Maria");
        assert!(slug.starts_with("banca-da-maria-"));
        assert_eq!(slug.len(), "banca-da-maria-".len() + 8);
    }

    #[test]
    fn slug_colapsa_separadores_repetidos() {
        let slug = gerar_slug("  Loja --- Nova  ");
        assert!(slug.starts_with("loja-nova-"));
    }

    #[test]
    fn slugs_do_mesmo_nome_sao_distintos() {
        assert_ne!(gerar_slug("Loja"), gerar_slug("Loja"));
    }
}
