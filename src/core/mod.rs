//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione JWT
//! - Configurazione
//! - Pool del database e migrazioni
//! - Gestione errori ed estrattori con risposta JSON
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, CurrentUser, authentication_middleware, decode_jwt};
pub use config::Config;
pub use error::AppError;
pub use extract::{AppJson, AppPath, AppQuery};
pub use state::AppState;
