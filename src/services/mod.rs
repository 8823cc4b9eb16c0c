//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni sotto-modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod admin;
pub mod invitation;

// Re-exports per facilitare l'import
pub use admin::run_expiration_sweep;
pub use invitation::{
    cancel_invitation, create_invitation, list_participants, list_received_invitations,
    list_sent_invitations, remove_participant, respond_to_invitation, withdraw_invitation,
};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
