// src/services/usuario_service.rs
use crate::{
    error::{AppError, AppResult},
    models::usuario::{NovoUsuario, Perfil, TipoUsuario, Usuario, UsuarioResumo},
    services::auth_service,
};
use sqlx::{Executor, Sqlite, SqlitePool, Transaction};

/// Busca um usuário pelo email (único). Aceita o pool ou uma transação aberta.
pub async fn buscar_por_email<'e, E>(executor: E, email: &str) -> AppResult<Option<Usuario>>
where
    E: Executor<'e, Database = Sqlite>,
{
    tracing::debug!("Buscando usuário por email: {}", email);
    let usuario = sqlx::query_as::<_, Usuario>(
        "SELECT id_usuario, nome, email, senha, tipo FROM usuario WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;
    Ok(usuario)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id_usuario: i64) -> AppResult<Option<Usuario>> {
    let usuario = sqlx::query_as::<_, Usuario>(
        "SELECT id_usuario, nome, email, senha, tipo FROM usuario WHERE id_usuario = ?1",
    )
    .bind(id_usuario)
    .fetch_optional(db_pool)
    .await?;
    Ok(usuario)
}

/// Cria o usuário e a linha de extensão do seu perfil, ou devolve o existente com o mesmo email.
///
/// Devolve `(usuario, criado)`. Um usuário já existente nunca é alterado: se o tipo
/// for o mesmo apenas se completa a extensão em falta; se for outro, é um conflito.
pub async fn criar_usuario(
    db_pool: &SqlitePool,
    dados: &NovoUsuario,
    perfil: &Perfil,
    bcrypt_cost: u32,
) -> AppResult<(Usuario, bool)> {
    let tipo = perfil.tipo();
    tracing::info!("Tentando criar {}: {}", tipo, dados.email);

    if let Some(usuario) = buscar_por_email(db_pool, &dados.email).await? {
        return completar_existente(db_pool, usuario, perfil).await.map(|u| (u, false));
    }

    // O hash é calculado antes de abrir a transação para não prender a conexão
    let senha_hash = auth_service::hash_password(&dados.senha, bcrypt_cost).await?;

    let mut tx = db_pool.begin().await?;

    // Um pedido concorrente com o mesmo email falha aqui em `usuario.email` UNIQUE
    let usuario = sqlx::query_as::<_, Usuario>(
        r#"
        INSERT INTO usuario (nome, email, senha, tipo)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id_usuario, nome, email, senha, tipo
        "#,
    )
    .bind(&dados.nome)
    .bind(&dados.email)
    .bind(&senha_hash)
    .bind(tipo)
    .fetch_one(&mut *tx)
    .await?;

    inserir_extensao(&mut tx, usuario.id_usuario, perfil).await?;

    tx.commit().await?;
    tracing::info!("✅ Usuário {} criado ({}).", usuario.id_usuario, tipo);
    Ok((usuario, true))
}

async fn completar_existente(
    db_pool: &SqlitePool,
    usuario: Usuario,
    perfil: &Perfil,
) -> AppResult<Usuario> {
    let tipo = perfil.tipo();
    if usuario.tipo != tipo {
        tracing::warn!(
            "Email '{}' já pertence a um {}, pedido de {} recusado.",
            usuario.email,
            usuario.tipo,
            tipo
        );
        return Err(AppError::Conflict(format!(
            "Este email já está registado como {}.",
            usuario.tipo
        )));
    }

    let mut tx = db_pool.begin().await?;
    if !extensao_existe(&mut tx, usuario.id_usuario, tipo).await? {
        tracing::info!("Completando extensão {} do usuário {}", tipo, usuario.id_usuario);
        inserir_extensao(&mut tx, usuario.id_usuario, perfil).await?;
    }
    tx.commit().await?;
    tracing::debug!("Usuário '{}' já existia.", usuario.email);
    Ok(usuario)
}

async fn extensao_existe(
    tx: &mut Transaction<'_, Sqlite>,
    id_usuario: i64,
    tipo: TipoUsuario,
) -> AppResult<bool> {
    let sql = match tipo {
        TipoUsuario::Aluno => "SELECT EXISTS(SELECT 1 FROM aluno WHERE id_aluno = ?1)",
        TipoUsuario::Professor => {
            "SELECT EXISTS(SELECT 1 FROM professor WHERE id_professor = ?1)"
        }
    };
    let existe: bool = sqlx::query_scalar(sql)
        .bind(id_usuario)
        .fetch_one(&mut **tx)
        .await?;
    Ok(existe)
}

async fn inserir_extensao(
    tx: &mut Transaction<'_, Sqlite>,
    id_usuario: i64,
    perfil: &Perfil,
) -> AppResult<()> {
    match perfil {
        Perfil::Aluno { matricula } => {
            sqlx::query("INSERT INTO aluno (id_aluno, matricula) VALUES (?1, ?2)")
                .bind(id_usuario)
                .bind(matricula)
                .execute(&mut **tx)
                .await?;
        }
        Perfil::Professor { disciplina } => {
            sqlx::query("INSERT INTO professor (id_professor, disciplina) VALUES (?1, ?2)")
                .bind(id_usuario)
                .bind(disciplina)
                .execute(&mut **tx)
                .await?;
        }
    }
    Ok(())
}

/// Lista usuários (com matrícula/disciplina), opcionalmente só de um tipo, ordenados por nome.
pub async fn listar_usuarios(
    db_pool: &SqlitePool,
    tipo: Option<TipoUsuario>,
) -> AppResult<Vec<UsuarioResumo>> {
    tracing::debug!("Listando usuários (filtro: {:?})", tipo);
    let usuarios = sqlx::query_as::<_, UsuarioResumo>(
        r#"
        SELECT u.id_usuario, u.nome, u.email, u.tipo, a.matricula, p.disciplina
        FROM usuario u
        LEFT JOIN aluno a ON a.id_aluno = u.id_usuario
        LEFT JOIN professor p ON p.id_professor = u.id_usuario
        WHERE ?1 IS NULL OR u.tipo = ?1
        ORDER BY u.nome ASC, u.id_usuario ASC
        "#,
    )
    .bind(tipo)
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Encontrados {} usuários.", usuarios.len());
    Ok(usuarios)
}

/// Lista simples para as caixas de seleção do formulário de registro.
pub async fn listar_para_selecao(db_pool: &SqlitePool) -> AppResult<Vec<Usuario>> {
    let usuarios = sqlx::query_as::<_, Usuario>(
        "SELECT id_usuario, nome, email, senha, tipo FROM usuario ORDER BY nome ASC, id_usuario ASC",
    )
    .fetch_all(db_pool)
    .await?;
    Ok(usuarios)
}

/// Apaga o usuário; a base de dados apaga em cascata aluno/professor e registros.
pub async fn apagar_usuario(db_pool: &SqlitePool, id_usuario: i64) -> AppResult<()> {
    tracing::info!("Apagando usuário {}", id_usuario);
    let rows_affected = sqlx::query("DELETE FROM usuario WHERE id_usuario = ?1")
        .bind(id_usuario)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Usuário {} não encontrado para apagar.", id_usuario);
        return Err(AppError::NotFound(format!(
            "Usuário {} não encontrado.",
            id_usuario
        )));
    }
    tracing::info!("✅ Usuário {} apagado.", id_usuario);
    Ok(())
}
