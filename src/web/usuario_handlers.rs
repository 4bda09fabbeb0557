// src/web/usuario_handlers.rs
use crate::{
    error::AppResult,
    models::usuario::{FiltroUsuarios, NovoAlunoForm, NovoProfessorForm, NovoUsuario, Perfil},
    services::usuario_service,
    state::AppState,
    templates::{Feedback, NovoUsuarioPage, UsuariosPage},
    web::{redirect_error, redirect_success, render},
};
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, Redirect},
};

// GET /alunos
pub async fn show_aluno_form(Query(feedback): Query<Feedback>) -> AppResult<Html<String>> {
    render(&NovoUsuarioPage {
        titulo: "Adicionar Aluno",
        acao: "/alunos",
        campo_extra: "matricula",
        rotulo_extra: "Matrícula",
        feedback,
    })
}

// GET /professores
pub async fn show_professor_form(Query(feedback): Query<Feedback>) -> AppResult<Html<String>> {
    render(&NovoUsuarioPage {
        titulo: "Adicionar Professor",
        acao: "/professores",
        campo_extra: "disciplina",
        rotulo_extra: "Disciplina",
        feedback,
    })
}

// POST /alunos
pub async fn handle_create_aluno(
    State(state): State<AppState>,
    Form(form): Form<NovoAlunoForm>,
) -> Redirect {
    tracing::info!("POST /alunos: {}", form.email);
    match form.validar() {
        Ok((dados, perfil)) => salvar(&state, "/alunos", "Aluno", dados, perfil).await,
        Err(e) => redirect_error("/alunos", &e),
    }
}

// POST /professores
pub async fn handle_create_professor(
    State(state): State<AppState>,
    Form(form): Form<NovoProfessorForm>,
) -> Redirect {
    tracing::info!("POST /professores: {}", form.email);
    match form.validar() {
        Ok((dados, perfil)) => salvar(&state, "/professores", "Professor", dados, perfil).await,
        Err(e) => redirect_error("/professores", &e),
    }
}

async fn salvar(
    state: &AppState,
    path: &str,
    rotulo: &str,
    dados: NovoUsuario,
    perfil: Perfil,
) -> Redirect {
    match usuario_service::criar_usuario(&state.db_pool, &dados, &perfil, state.bcrypt_cost).await {
        Ok((_, true)) => redirect_success(path, &format!("{} adicionado com sucesso!", rotulo)),
        Ok((_, false)) => redirect_success(path, &format!("{} já existia.", rotulo)),
        Err(e) => {
            tracing::error!("Falha ao salvar {} '{}': {:?}", rotulo, dados.email, e);
            redirect_error(path, &e)
        }
    }
}

// GET /usuarios?tipo=
pub async fn show_usuarios_page(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroUsuarios>,
    Query(mut feedback): Query<Feedback>,
) -> AppResult<Html<String>> {
    let tipo = match filtro.tipo() {
        Ok(tipo) => tipo,
        Err(e) => {
            feedback.error = Some(e.user_message());
            None
        }
    };
    let usuarios = usuario_service::listar_usuarios(&state.db_pool, tipo).await?;
    render(&UsuariosPage {
        usuarios,
        tipo_filtro: tipo.map(|t| t.as_str().to_string()).unwrap_or_default(),
        feedback,
    })
}

// POST /usuarios/{id}/apagar
pub async fn handle_delete_usuario(
    State(state): State<AppState>,
    Path(id_usuario): Path<i64>,
) -> Redirect {
    let rotulo = match usuario_service::buscar_por_id(&state.db_pool, id_usuario).await {
        Ok(Some(usuario)) => usuario.rotulo(),
        Ok(None) => id_usuario.to_string(),
        Err(e) => return redirect_error("/usuarios", &e),
    };
    match usuario_service::apagar_usuario(&state.db_pool, id_usuario).await {
        Ok(()) => redirect_success("/usuarios", &format!("Usuário {} apagado.", rotulo)),
        Err(e) => redirect_error("/usuarios", &e),
    }
}
