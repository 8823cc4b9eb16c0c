#![allow(dead_code)]

use axum_test::TestServer;
use calendar_server::core::AppState;
use calendar_server::entities::Notification;
use calendar_server::notifications::NotificationDispatcher;
use calendar_server::repositories::NotificationRepository;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Crea un AppState per i test, con il worker delle notifiche attivo
///
/// # Arguments
/// * `pool` - Connection pool SQLite
///
/// # Returns
/// Arc<AppState> configurato con il JWT secret di test
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    let (notifier, _worker) = NotificationDispatcher::spawn(NotificationRepository::new(pool.clone()));
    Arc::new(AppState::new(pool, JWT_SECRET.to_string(), notifier))
}

/// Crea un TestServer per i test
///
/// # Arguments
/// * `state` - AppState da utilizzare per il server
///
/// # Returns
/// TestServer configurato e pronto per eseguire richieste
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = calendar_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Server sul pool di `#[sqlx::test]`, il caso comune di ogni test
pub fn server_for(pool: &SqlitePool) -> TestServer {
    create_test_server(create_test_state(pool.clone()))
}

/// Genera un JWT token per testing
///
/// # Arguments
/// * `user_id` - ID dell'utente per cui generare il token
/// * `username` - Username dell'utente
/// * `jwt_secret` - Secret key per firmare il token
///
/// # Returns
/// Token JWT valido per 24 ore
pub fn create_test_jwt(user_id: i32, username: &str, jwt_secret: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        id: i32,
        username: String,
        exp: usize,
        iat: usize,
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id,
        username: username.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}

/// Header `Authorization: Bearer ...` per l'utente della fixture
pub fn bearer(user_id: i32, username: &str) -> String {
    format!("Bearer {}", create_test_jwt(user_id, username, JWT_SECRET))
}

/// Le notifiche sono scritte da un task in background: aspetta che ne arrivino `count`
pub async fn wait_for_notifications(
    pool: &SqlitePool,
    user_id: i32,
    count: usize,
) -> Vec<Notification> {
    let repository = NotificationRepository::new(pool.clone());
    let mut notifications = Vec::new();
    for _ in 0..100 {
        notifications = repository
            .find_many_by_user_id(&user_id)
            .await
            .expect("Failed to read notifications");
        if notifications.len() >= count {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    notifications
}

/// Stato corrente di un invito letto direttamente dal database
pub async fn invitation_status(pool: &SqlitePool, invitation_id: i64) -> String {
    sqlx::query_scalar::<_, String>("SELECT status FROM event_invitations WHERE invitation_id = ?")
        .bind(invitation_id)
        .fetch_one(pool)
        .await
        .expect("Invitation not found")
}
