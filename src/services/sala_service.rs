// src/services/sala_service.rs
use crate::{
    error::{AppError, AppResult},
    models::sala::{NovaSala, Sala},
};
use sqlx::SqlitePool;

/// Cria a sala ou devolve a existente com o mesmo nome. Devolve `(sala, criada)`.
pub async fn criar_sala(db_pool: &SqlitePool, nova: &NovaSala) -> AppResult<(Sala, bool)> {
    tracing::info!("Tentando criar sala: {}", nova.nome_sala);
    let mut tx = db_pool.begin().await?;

    let existente = sqlx::query_as::<_, Sala>(
        "SELECT id_sala, nome_sala, capacidade FROM sala WHERE nome_sala = ?1",
    )
    .bind(&nova.nome_sala)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(sala) = existente {
        tx.commit().await?;
        tracing::debug!("Sala '{}' já existia (id {}).", sala.nome_sala, sala.id_sala);
        return Ok((sala, false));
    }

    let sala = sqlx::query_as::<_, Sala>(
        r#"
        INSERT INTO sala (nome_sala, capacidade)
        VALUES (?1, ?2)
        RETURNING id_sala, nome_sala, capacidade
        "#,
    )
    .bind(&nova.nome_sala)
    .bind(nova.capacidade)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("✅ Sala {} criada: {}", sala.id_sala, sala.nome_sala);
    Ok((sala, true))
}

pub async fn listar_salas(db_pool: &SqlitePool) -> AppResult<Vec<Sala>> {
    let salas = sqlx::query_as::<_, Sala>(
        "SELECT id_sala, nome_sala, capacidade FROM sala ORDER BY nome_sala ASC",
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontradas {} salas.", salas.len());
    Ok(salas)
}

/// Apaga a sala; os registros que a referem são apagados em cascata.
pub async fn apagar_sala(db_pool: &SqlitePool, id_sala: i64) -> AppResult<()> {
    tracing::info!("Apagando sala {}", id_sala);
    let rows_affected = sqlx::query("DELETE FROM sala WHERE id_sala = ?1")
        .bind(id_sala)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Sala {} não encontrada para apagar.", id_sala);
        return Err(AppError::NotFound(format!("Sala {} não encontrada.", id_sala)));
    }
    Ok(())
}
