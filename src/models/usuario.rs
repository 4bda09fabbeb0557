// src/models/usuario.rs
use crate::error::{AppError, AppResult};
use crate::models::campo_obrigatorio;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// Discriminador da tabela `usuario` (restrição `ck_usuario_tipo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoUsuario {
    Aluno,
    Professor,
}

impl TipoUsuario {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoUsuario::Aluno => "aluno",
            TipoUsuario::Professor => "professor",
        }
    }
}

impl fmt::Display for TipoUsuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoUsuario {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aluno" => Ok(TipoUsuario::Aluno),
            "professor" => Ok(TipoUsuario::Professor),
            other => Err(AppError::Validation(format!(
                "Tipo de usuário inválido: '{}'.",
                other
            ))),
        }
    }
}

// Representa uma linha da tabela 'usuario'
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Usuario {
    pub id_usuario: i64,
    pub nome: String,
    pub email: String,
    #[serde(skip)]
    pub senha: String, // hash bcrypt, nunca a senha em claro
    pub tipo: TipoUsuario,
}

impl Usuario {
    /// Rótulo usado nas listas de seleção e na listagem de registros.
    pub fn rotulo(&self) -> String {
        format!("{} - {} ({})", self.id_usuario, self.nome, self.tipo)
    }
}

/// Usuário com os dados da sua tabela de extensão (LEFT JOIN aluno/professor).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsuarioResumo {
    pub id_usuario: i64,
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
    pub matricula: Option<String>,
    pub disciplina: Option<String>,
}

/// Dados comuns a qualquer usuário novo, já validados.
#[derive(Debug, Clone)]
pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
    pub senha: String, // em claro; o serviço gera o hash
}

/// Dados da tabela de extensão que define o tipo do usuário.
#[derive(Debug, Clone)]
pub enum Perfil {
    Aluno { matricula: String },
    Professor { disciplina: String },
}

impl Perfil {
    pub fn tipo(&self) -> TipoUsuario {
        match self {
            Perfil::Aluno { .. } => TipoUsuario::Aluno,
            Perfil::Professor { .. } => TipoUsuario::Professor,
        }
    }
}

// --- Formulários ---

#[derive(Debug, Deserialize)]
pub struct NovoAlunoForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
    #[serde(default)]
    pub matricula: String,
}

impl NovoAlunoForm {
    pub fn validar(self) -> AppResult<(NovoUsuario, Perfil)> {
        let usuario = validar_usuario(&self.nome, &self.email, &self.senha)?;
        let matricula = campo_obrigatorio(&self.matricula)?;
        Ok((usuario, Perfil::Aluno { matricula }))
    }
}

#[derive(Debug, Deserialize)]
pub struct NovoProfessorForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
    #[serde(default)]
    pub disciplina: String,
}

impl NovoProfessorForm {
    pub fn validar(self) -> AppResult<(NovoUsuario, Perfil)> {
        let usuario = validar_usuario(&self.nome, &self.email, &self.senha)?;
        let disciplina = campo_obrigatorio(&self.disciplina)?;
        Ok((usuario, Perfil::Professor { disciplina }))
    }
}

fn validar_usuario(nome: &str, email: &str, senha: &str) -> AppResult<NovoUsuario> {
    Ok(NovoUsuario {
        nome: campo_obrigatorio(nome)?,
        email: campo_obrigatorio(email)?,
        senha: campo_obrigatorio(senha)?,
    })
}

/// Filtro opcional da página /usuarios (?tipo=aluno).
#[derive(Debug, Default, Deserialize)]
pub struct FiltroUsuarios {
    pub tipo: Option<String>,
}

impl FiltroUsuarios {
    pub fn tipo(&self) -> AppResult<Option<TipoUsuario>> {
        match self.tipo.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}
