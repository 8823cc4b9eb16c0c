//! Notification entity - Notifica in-app destinata ad un utente

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Notification {
    pub notification_id: i32,
    pub user_id: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}
