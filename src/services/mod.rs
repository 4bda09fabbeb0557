// src/services/mod.rs
pub mod auth_service;
pub mod registro_service;
pub mod sala_service;
pub mod usuario_service;
