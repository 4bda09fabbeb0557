// src/models/mod.rs
pub mod registro;
pub mod sala;
pub mod usuario;

use crate::error::{AppError, AppResult};

/// Remove espaços e exige que o campo não fique vazio.
pub(crate) fn campo_obrigatorio(valor: &str) -> AppResult<String> {
    let valor = valor.trim();
    if valor.is_empty() {
        return Err(AppError::Validation("Preencha todos os campos.".to_string()));
    }
    Ok(valor.to_string())
}
