// src/templates.rs
use crate::models::{
    registro::RegistroDetalhado,
    sala::Sala,
    usuario::{Usuario, UsuarioResumo},
};
use askama::Template;

/// Mensagens de feedback (padrão Post/Redirect/Get), lidas de `?success=` / `?error=`.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct Feedback {
    pub success: Option<String>,
    pub error: Option<String>,
}

// Formulário "Adicionar Aluno" ou "Adicionar Professor" (mesmo template)
#[derive(Template)]
#[template(path = "novo_usuario.html")]
pub struct NovoUsuarioPage {
    pub titulo: &'static str,
    pub acao: &'static str,
    pub campo_extra: &'static str,
    pub rotulo_extra: &'static str,
    pub feedback: Feedback,
}

#[derive(Template)]
#[template(path = "usuarios.html")]
pub struct UsuariosPage {
    pub usuarios: Vec<UsuarioResumo>,
    pub tipo_filtro: String,
    pub feedback: Feedback,
}

#[derive(Template)]
#[template(path = "salas.html")]
pub struct SalasPage {
    pub salas: Vec<Sala>,
    pub feedback: Feedback,
}

#[derive(Template)]
#[template(path = "registro_novo.html")]
pub struct NovoRegistroPage {
    pub usuarios: Vec<Usuario>,
    pub salas: Vec<Sala>,
    pub hoje: String,
    pub feedback: Feedback,
}

#[derive(Template)]
#[template(path = "registros.html")]
pub struct RegistrosPage {
    pub registros: Vec<RegistroDetalhado>,
    pub filtro_data: String,
    pub feedback: Feedback,
}
