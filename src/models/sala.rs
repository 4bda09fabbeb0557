// src/models/sala.rs
use crate::error::{AppError, AppResult};
use crate::models::campo_obrigatorio;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sala {
    pub id_sala: i64,
    pub nome_sala: String,
    pub capacidade: i64,
}

impl Sala {
    pub fn rotulo(&self) -> String {
        format!("{} - {}", self.id_sala, self.nome_sala)
    }
}

#[derive(Debug, Clone)]
pub struct NovaSala {
    pub nome_sala: String,
    pub capacidade: i64,
}

// A capacidade chega como texto para podermos responder com mensagem própria
#[derive(Debug, Deserialize)]
pub struct NovaSalaForm {
    #[serde(default)]
    pub nome_sala: String,
    #[serde(default)]
    pub capacidade: String,
}

impl NovaSalaForm {
    pub fn validar(self) -> AppResult<NovaSala> {
        let nome_sala = campo_obrigatorio(&self.nome_sala)?;
        let capacidade_txt = campo_obrigatorio(&self.capacidade)?;
        let capacidade = capacidade_txt.parse::<i64>().map_err(|_| {
            AppError::Validation("Capacidade deve ser um número inteiro.".to_string())
        })?;
        if capacidade < 0 {
            return Err(AppError::Validation(
                "Capacidade não pode ser negativa.".to_string(),
            ));
        }
        Ok(NovaSala {
            nome_sala,
            capacidade,
        })
    }
}
