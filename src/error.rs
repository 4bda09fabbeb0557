// src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de configuração: {0}")]
    ConfigError(String),

    #[error("Erro ao processar senha")]
    PasswordHashingError,

    #[error("Erro ao renderizar página: {0}")]
    TemplateError(#[from] askama::Error),

    // Dados do formulário inválidos (campos vazios, números ou datas mal formados)
    #[error("Dados inválidos: {0}")]
    Validation(String),

    // --- Violações de restrições levantadas pela base de dados ---
    #[error("Violação de unicidade: {0}")]
    UniqueViolation(String),

    #[error("Violação de restrição CHECK: {0}")]
    CheckViolation(String),

    #[error("Violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Classifica os erros da base de dados pelo tipo de restrição violada.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return AppError::UniqueViolation(message),
                ErrorKind::CheckViolation => return AppError::CheckViolation(message),
                ErrorKind::ForeignKeyViolation => return AppError::ForeignKeyViolation(message),
                _ => {}
            }
        }
        AppError::SqlxError(err)
    }
}

impl AppError {
    /// Mensagem para mostrar ao utilizador no formulário.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::UniqueViolation(detail) => {
                if detail.contains("usuario.email") {
                    "Já existe um usuário com este email.".to_string()
                } else if detail.contains("aluno.matricula") {
                    "Esta matrícula já está registada.".to_string()
                } else if detail.contains("sala.nome_sala") {
                    "Já existe uma sala com este nome.".to_string()
                } else if detail.contains("registro.") {
                    "Esse registro já existe para a data selecionada.".to_string()
                } else {
                    "Registo duplicado.".to_string()
                }
            }
            AppError::CheckViolation(detail) => {
                if detail.contains("ck_usuario_tipo") {
                    "Tipo de usuário inválido (use aluno ou professor).".to_string()
                } else if detail.contains("ck_sala_capacidade") {
                    "Capacidade não pode ser negativa.".to_string()
                } else {
                    "Valor fora dos limites permitidos.".to_string()
                }
            }
            AppError::ForeignKeyViolation(_) => {
                "Usuário ou sala inexistente.".to_string()
            }
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                "Erro ao aceder aos dados.".to_string()
            }
            AppError::ConfigError(_) => "Erro de configuração.".to_string(),
            AppError::PasswordHashingError => "Erro ao processar credenciais.".to_string(),
            AppError::TemplateError(_) | AppError::InternalServerError => {
                "Ocorreu um erro inesperado.".to_string()
            }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UniqueViolation(_) | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::CheckViolation(_) | AppError::ForeignKeyViolation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Erro processado: {:?}", self);
        } else {
            tracing::warn!("Pedido rejeitado: {}", self);
        }
        let user_message = self.user_message();

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Voltar</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

/// Erro das rotas `/api/*`: o mesmo estado HTTP de `AppError`, com corpo JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError(AppError::from(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!("Erro na API: {:?}", self.0);
        } else {
            tracing::warn!("Pedido à API rejeitado: {}", self.0);
        }
        let body = json!({
            "erro": self.0.user_message(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UniqueViolation("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::ForeignKeyViolation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::InternalServerError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn user_messages_name_the_violated_constraint() {
        let dup = AppError::UniqueViolation("UNIQUE constraint failed: usuario.email".into());
        assert_eq!(dup.user_message(), "Já existe um usuário com este email.");

        let tipo = AppError::CheckViolation("CHECK constraint failed: ck_usuario_tipo".into());
        assert!(tipo.user_message().contains("aluno ou professor"));

        let sala = AppError::UniqueViolation("UNIQUE constraint failed: sala.nome_sala".into());
        assert_eq!(sala.user_message(), "Já existe uma sala com este nome.");
    }

    #[test]
    fn api_errors_are_json() {
        let response = ApiError(AppError::Validation("Data inválida.".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
