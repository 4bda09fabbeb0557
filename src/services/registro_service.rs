// src/services/registro_service.rs
use crate::{
    error::AppResult,
    models::registro::{NovoRegistro, Registro, RegistroDetalhado},
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Regista o uso de uma sala por um usuário num dia, sem duplicar.
///
/// Com `dia = None` a coluna `data_registro` fica com o valor por omissão (data atual).
/// Devolve `(registro, criado)`.
pub async fn registrar_uso(db_pool: &SqlitePool, novo: &NovoRegistro) -> AppResult<(Registro, bool)> {
    tracing::info!(
        "Registando uso: usuário {} sala {} dia {:?}",
        novo.id_usuario,
        novo.id_sala,
        novo.dia
    );
    let mut tx = db_pool.begin().await?;

    let existente = sqlx::query_as::<_, Registro>(
        r#"
        SELECT id_registro, id_usuario, id_sala, data_registro
        FROM registro
        WHERE id_usuario = ?1
          AND id_sala = ?2
          AND data_registro = COALESCE(?3, date('now', 'localtime'))
        "#,
    )
    .bind(novo.id_usuario)
    .bind(novo.id_sala)
    .bind(novo.dia)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(registro) = existente {
        tx.commit().await?;
        tracing::debug!("Registro {} já existia.", registro.id_registro);
        return Ok((registro, false));
    }

    let insercao = match novo.dia {
        Some(dia) => sqlx::query_as::<_, Registro>(
            r#"
            INSERT INTO registro (id_usuario, id_sala, data_registro)
            VALUES (?1, ?2, ?3)
            RETURNING id_registro, id_usuario, id_sala, data_registro
            "#,
        )
        .bind(novo.id_usuario)
        .bind(novo.id_sala)
        .bind(dia),
        // data_registro omitida: vale o DEFAULT da tabela
        None => sqlx::query_as::<_, Registro>(
            r#"
            INSERT INTO registro (id_usuario, id_sala)
            VALUES (?1, ?2)
            RETURNING id_registro, id_usuario, id_sala, data_registro
            "#,
        )
        .bind(novo.id_usuario)
        .bind(novo.id_sala),
    };
    let registro = insercao.fetch_one(&mut *tx).await?;

    tx.commit().await?;
    tracing::info!(
        "✅ Registro {} criado para {}.",
        registro.id_registro,
        registro.data_registro
    );
    Ok((registro, true))
}

/// Lista os registros com usuário e sala, opcionalmente só de um dia.
pub async fn listar_registros(
    db_pool: &SqlitePool,
    dia: Option<NaiveDate>,
) -> AppResult<Vec<RegistroDetalhado>> {
    tracing::debug!("Listando registros (dia: {:?})", dia);
    let registros = sqlx::query_as::<_, RegistroDetalhado>(
        r#"
        SELECT
            r.id_registro,
            r.data_registro,
            u.id_usuario,
            u.nome AS nome_usuario,
            u.tipo,
            s.id_sala,
            s.nome_sala
        FROM registro r
        JOIN usuario u ON u.id_usuario = r.id_usuario
        JOIN sala s ON s.id_sala = r.id_sala
        WHERE ?1 IS NULL OR r.data_registro = ?1
        ORDER BY r.data_registro ASC, r.id_registro ASC
        "#,
    )
    .bind(dia)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontrados {} registros.", registros.len());
    Ok(registros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::error::AppError;

    async fn semear(pool: &SqlitePool) {
        sqlx::query(
            "INSERT INTO usuario (nome, email, senha, tipo) VALUES \
             ('Ana', 'a@uni.br', 'h', 'aluno'), ('Bruno', 'b@uni.br', 'h', 'professor')",
        )
        .execute(pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO sala (nome_sala, capacidade) VALUES ('Lab 1', 30), ('Lab 2', 15)")
            .execute(pool)
            .await
            .unwrap();
    }

    fn dia(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn novo(id_usuario: i64, id_sala: i64, dia: Option<NaiveDate>) -> NovoRegistro {
        NovoRegistro {
            id_usuario,
            id_sala,
            dia,
        }
    }

    #[tokio::test]
    async fn registering_is_idempotent_per_day() {
        let pool = test_pool().await;
        semear(&pool).await;

        let (r1, criado) = registrar_uso(&pool, &novo(1, 1, dia(2025, 5, 2))).await.unwrap();
        assert!(criado);
        let (r2, criado) = registrar_uso(&pool, &novo(1, 1, dia(2025, 5, 2))).await.unwrap();
        assert!(!criado);
        assert_eq!(r1.id_registro, r2.id_registro);

        let (_, criado) = registrar_uso(&pool, &novo(1, 1, dia(2025, 5, 3))).await.unwrap();
        assert!(criado);
    }

    #[tokio::test]
    async fn omitted_date_defaults_to_today() {
        let pool = test_pool().await;
        semear(&pool).await;

        let (registro, criado) = registrar_uso(&pool, &novo(2, 1, None)).await.unwrap();
        assert!(criado);
        assert_eq!(registro.data_registro, chrono::Local::now().date_naive());

        // Mesmo dia, sem data: o registro de hoje já existe
        let (_, criado) = registrar_uso(&pool, &novo(2, 1, None)).await.unwrap();
        assert!(!criado);
    }

    #[tokio::test]
    async fn unknown_user_or_room_is_a_foreign_key_violation() {
        let pool = test_pool().await;
        semear(&pool).await;

        let err = registrar_uso(&pool, &novo(99, 1, dia(2025, 1, 1))).await.unwrap_err();
        assert!(matches!(err, AppError::ForeignKeyViolation(_)), "{:?}", err);

        let err = registrar_uso(&pool, &novo(1, 99, dia(2025, 1, 1))).await.unwrap_err();
        assert!(matches!(err, AppError::ForeignKeyViolation(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn lists_with_optional_date_filter() {
        let pool = test_pool().await;
        semear(&pool).await;
        registrar_uso(&pool, &novo(2, 2, dia(2025, 6, 2))).await.unwrap();
        registrar_uso(&pool, &novo(1, 1, dia(2025, 6, 1))).await.unwrap();
        registrar_uso(&pool, &novo(1, 2, dia(2025, 6, 2))).await.unwrap();

        let todos = listar_registros(&pool, None).await.unwrap();
        assert_eq!(todos.len(), 3);
        assert_eq!(todos[0].data_registro, dia(2025, 6, 1).unwrap());
        assert_eq!(todos[0].usuario_rotulo(), "1 - Ana (aluno)");
        assert_eq!(todos[0].sala_rotulo(), "1 - Lab 1");

        let do_dia = listar_registros(&pool, dia(2025, 6, 2)).await.unwrap();
        assert_eq!(do_dia.len(), 2);
        assert!(do_dia.iter().all(|r| r.data_registro == dia(2025, 6, 2).unwrap()));
        assert_eq!(do_dia[0].usuario_rotulo(), "2 - Bruno (professor)");

        assert!(listar_registros(&pool, dia(2024, 1, 1)).await.unwrap().is_empty());
    }
}
