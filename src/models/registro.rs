// src/models/registro.rs
use crate::error::{AppError, AppResult};
use crate::models::usuario::TipoUsuario;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Formato das datas nos formulários (AAAA-MM-DD).
pub const FORMATO_DATA: &str = "%Y-%m-%d";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registro {
    pub id_registro: i64,
    pub id_usuario: i64,
    pub id_sala: i64,
    pub data_registro: NaiveDate,
}

/// Linha da listagem: registro com o usuário e a sala já resolvidos.
#[derive(Debug, Clone, FromRow)]
pub struct RegistroDetalhado {
    pub id_registro: i64,
    pub data_registro: NaiveDate,
    pub id_usuario: i64,
    pub nome_usuario: String,
    pub tipo: TipoUsuario,
    pub id_sala: i64,
    pub nome_sala: String,
}

impl RegistroDetalhado {
    pub fn usuario_rotulo(&self) -> String {
        format!("{} - {} ({})", self.id_usuario, self.nome_usuario, self.tipo)
    }

    pub fn sala_rotulo(&self) -> String {
        format!("{} - {}", self.id_sala, self.nome_sala)
    }
}

/// Forma exposta em /api/registros.
#[derive(Debug, Serialize)]
pub struct RegistroJson {
    pub id_registro: i64,
    pub data: String,
    pub usuario: String,
    pub sala: String,
}

impl From<&RegistroDetalhado> for RegistroJson {
    fn from(r: &RegistroDetalhado) -> Self {
        Self {
            id_registro: r.id_registro,
            data: r.data_registro.format(FORMATO_DATA).to_string(),
            usuario: r.usuario_rotulo(),
            sala: r.sala_rotulo(),
        }
    }
}

// Os selects chegam como texto; vazio significa "nada selecionado"
#[derive(Debug, Deserialize)]
pub struct NovoRegistroForm {
    #[serde(default)]
    pub id_usuario: String,
    #[serde(default)]
    pub id_sala: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct NovoRegistro {
    pub id_usuario: i64,
    pub id_sala: i64,
    pub dia: Option<NaiveDate>, // None: a base de dados usa a data atual
}

impl NovoRegistroForm {
    pub fn validar(self) -> AppResult<NovoRegistro> {
        let selecao_invalida =
            || AppError::Validation("Selecione um usuário e uma sala.".to_string());
        let id_usuario = self
            .id_usuario
            .trim()
            .parse::<i64>()
            .map_err(|_| selecao_invalida())?;
        let id_sala = self
            .id_sala
            .trim()
            .parse::<i64>()
            .map_err(|_| selecao_invalida())?;
        Ok(NovoRegistro {
            id_usuario,
            id_sala,
            dia: parse_data_opcional(&self.data)?,
        })
    }
}

/// Filtro da listagem (?data=AAAA-MM-DD, opcional).
#[derive(Debug, Default, Deserialize)]
pub struct FiltroRegistros {
    pub data: Option<String>,
}

impl FiltroRegistros {
    pub fn dia(&self) -> AppResult<Option<NaiveDate>> {
        parse_data_opcional(self.data.as_deref().unwrap_or(""))
    }
}

/// Texto vazio → None; caso contrário exige AAAA-MM-DD.
pub fn parse_data_opcional(texto: &str) -> AppResult<Option<NaiveDate>> {
    let texto = texto.trim();
    if texto.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(texto, FORMATO_DATA)
        .map(Some)
        .map_err(|_| AppError::Validation("Data inválida. Use o formato AAAA-MM-DD.".to_string()))
}
