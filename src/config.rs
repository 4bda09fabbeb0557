// src/config.rs
use crate::error::{AppError, AppResult};
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "sqlite://registro_salas.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuração da aplicação, lida de variáveis de ambiente.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Lê a configuração do ambiente do processo (o `.env` já foi carregado em `main`).
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Constrói a configuração a partir de uma função de consulta (facilita os testes).
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse::<SocketAddr>().map_err(|e| {
            AppError::ConfigError(format!("BIND_ADDR inválido '{}': {}", bind_raw, e))
        })?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "DB_MAX_CONNECTIONS deve ser um inteiro >= 1 (recebido '{}')",
                        raw
                    )))
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if (4..=31).contains(&n) => n,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "BCRYPT_COST deve estar entre 4 e 31 (recebido '{}')",
                        raw
                    )))
                }
            },
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            bcrypt_cost,
        })
    }
}
