use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Cada variante mapeia para um status HTTP em `into_response`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validações de negócio feitas fora do `validator` (ex: percentual fora da faixa)
    #[error("{0}")]
    InvalidInput(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    // Entidade ausente OU pertencente a outro tenant (indistinguíveis de propósito)
    #[error("{0} não encontrado")]
    NotFound(&'static str),

    // Exclusão bloqueada por dependentes, duplicidade, conclusão dupla...
    #[error("{0}")]
    Conflict(String),

    #[error("E-mail já está em uso")]
    EmailAlreadyExists,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": "One or more fields are invalid",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Please authenticate".to_string())
            }
            AppError::Forbidden => {
                (StatusCode::FORBIDDEN, "Access denied. Admin only.".to_string())
            }
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Email already in use".to_string())
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente só vê o detalhe em
            // modo de desenvolvimento.
            ref e => {
                tracing::error!("Erro interno do servidor: {e}");
                let body = if crate::config::dev_mode() {
                    json!({
                        "message": "An unexpected error occurred",
                        "error": e.to_string(),
                    })
                } else {
                    json!({ "message": "An unexpected error occurred" })
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}
