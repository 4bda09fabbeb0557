// src/web/registro_handlers.rs
use crate::{
    error::{ApiError, AppResult},
    models::registro::{FiltroRegistros, NovoRegistroForm, RegistroJson, FORMATO_DATA},
    services::{registro_service, sala_service, usuario_service},
    state::AppState,
    templates::{Feedback, NovoRegistroPage, RegistrosPage},
    web::{redirect_error, redirect_success, render},
};
use axum::{
    extract::{Form, Json, Query, State},
    response::{Html, Redirect},
};

// GET /registros/novo
pub async fn show_registro_form(
    State(state): State<AppState>,
    Query(feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    let usuarios = usuario_service::listar_para_selecao(&state.db_pool).await?;
    let salas = sala_service::listar_salas(&state.db_pool).await?;
    render(&NovoRegistroPage {
        usuarios,
        salas,
        hoje: chrono::Local::now().date_naive().format(FORMATO_DATA).to_string(),
        feedback,
    })
}

// POST /registros
pub async fn handle_create_registro(
    State(state): State<AppState>,
    Form(form): Form<NovoRegistroForm>,
) -> Redirect {
    let novo = match form.validar() {
        Ok(novo) => novo,
        Err(e) => return redirect_error("/registros/novo", &e),
    };
    match registro_service::registrar_uso(&state.db_pool, &novo).await {
        Ok((_, true)) => redirect_success("/registros/novo", "Registro adicionado com sucesso!"),
        Ok((_, false)) => redirect_success(
            "/registros/novo",
            "Esse registro já existia para a data selecionada.",
        ),
        Err(e) => {
            tracing::error!("Falha ao registrar uso {:?}: {:?}", novo, e);
            redirect_error("/registros/novo", &e)
        }
    }
}

// GET /registros?data=AAAA-MM-DD
pub async fn show_registros_page(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroRegistros>,
    Query(mut feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    let filtro_data = filtro.data.clone().unwrap_or_default();
    let registros = match filtro.dia() {
        Ok(dia) => registro_service::listar_registros(&state.db_pool, dia).await?,
        Err(e) => {
            feedback.error = Some(e.user_message());
            Vec::new()
        }
    };
    render(&RegistrosPage {
        registros,
        filtro_data,
        feedback,
    })
}

// GET /api/registros?data=AAAA-MM-DD
pub async fn api_list_registros(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroRegistros>,
) -> Result<Json<Vec<RegistroJson>>, ApiError> {
    let registros = registro_service::listar_registros(&state.db_pool, filtro.dia()?).await?;
    Ok(Json(registros.iter().map(RegistroJson::from).collect()))
}
