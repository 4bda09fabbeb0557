// src/state.rs
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Custo bcrypt das senhas novas (configurável; os testes usam o mínimo)
    pub bcrypt_cost: u32,
}
