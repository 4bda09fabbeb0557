// src/db.rs
use crate::{config::Config, error::AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub async fn create_db_pool(config: &Config) -> AppResult<SqlitePool> {
    tracing::info!("Ligando à base de dados: {}", config.database_url);

    // Opções de conexão (criar se não existir, timeout, chaves estrangeiras ativas)
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true) // Sem isto o SQLite ignora ON DELETE CASCADE
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Executa os ficheiros SQL em ./migrations (embutidos no binário).
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    tracing::info!("Executando migrações da base de dados...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrações concluídas.");
    Ok(())
}

/// Base de dados em memória para os testes.
/// Uma única conexão, sem expiração: cada conexão SQLite em memória é uma base distinta.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("URL em memória válida")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("falha ao abrir base em memória");
    run_migrations(&pool).await.expect("falha nas migrações");
    pool
}
