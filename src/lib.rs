//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod ledger;
pub mod notifications;
pub mod repositories;
pub mod services;
pub mod sweeper;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/invitations", configure_invitation_routes(state.clone()))
        .nest("/admin", configure_admin_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Configura le routes per la gestione degli inviti
fn configure_invitation_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", post(create_invitation))
        .route("/received", get(list_received_invitations))
        .route("/sent", get(list_sent_invitations))
        .route("/{invitation_id}", delete(cancel_invitation))
        .route("/{invitation_id}/{action}", post(respond_to_invitation))
        .route("/events/{event_id}/participants", get(list_participants))
        .route("/events/{event_id}/withdraw", post(withdraw_invitation))
        .route(
            "/events/{event_id}/participants/{user_id}",
            delete(remove_participant),
        )
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes di manutenzione
fn configure_admin_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/sweep", post(run_expiration_sweep))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
