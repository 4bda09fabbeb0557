// src/web/mod.rs
pub mod registro_handlers;
pub mod routes;
pub mod sala_handlers;
pub mod usuario_handlers;

use crate::error::{AppError, AppResult};
use askama::Template;
use axum::response::{Html, Redirect};

/// Renderiza um template Askama, registando a falha.
pub(crate) fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template.render().map(Html).map_err(|e| {
        tracing::error!("Falha ao renderizar template: {}", e);
        AppError::from(e)
    })
}

/// Redireciona para `path` com mensagem de sucesso (Post/Redirect/Get).
pub(crate) fn redirect_success(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{}?success={}", path, urlencoding::encode(message)))
}

/// Redireciona para `path` com a mensagem do erro para o utilizador.
pub(crate) fn redirect_error(path: &str, err: &AppError) -> Redirect {
    Redirect::to(&format!(
        "{}?error={}",
        path,
        urlencoding::encode(&err.user_message())
    ))
}
