// src/web/sala_handlers.rs
use crate::{
    error::AppResult,
    models::sala::NovaSalaForm,
    services::sala_service,
    state::AppState,
    templates::{Feedback, SalasPage},
    web::{redirect_error, redirect_success, render},
};
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, Redirect},
};

// GET /salas
pub async fn show_salas_page(
    State(state): State<AppState>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    let salas = sala_service::listar_salas(&state.db_pool).await?;
    render(&SalasPage { salas, feedback })
}

// POST /salas
pub async fn handle_create_sala(
    State(state): State<AppState>,
    Form(form): Form<NovaSalaForm>,
) -> Redirect {
    let nova = match form.validar() {
        Ok(nova) => nova,
        Err(e) => return redirect_error("/salas", &e),
    };
    match sala_service::criar_sala(&state.db_pool, &nova).await {
        Ok((_, true)) => redirect_success("/salas", "Sala adicionada com sucesso!"),
        Ok((_, false)) => redirect_success("/salas", "Sala já existia."),
        Err(e) => {
            tracing::error!("Falha ao salvar sala '{}': {:?}", nova.nome_sala, e);
            redirect_error("/salas", &e)
        }
    }
}

// POST /salas/{id}/apagar
pub async fn handle_delete_sala(
    State(state): State<AppState>,
    Path(id_sala): Path<i64>,
) -> Redirect {
    match sala_service::apagar_sala(&state.db_pool, id_sala).await {
        Ok(()) => redirect_success("/salas", &format!("Sala {} apagada.", id_sala)),
        Err(e) => redirect_error("/salas", &e),
    }
}
