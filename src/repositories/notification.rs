//! NotificationRepository - Inserimento delle notifiche in-app

use super::Create;
use crate::dtos::CreateNotificationDTO;
use crate::entities::Notification;
use chrono::Utc;
use sqlx::{Error, SqlitePool};

#[derive(Clone)]
pub struct NotificationRepository {
    connection_pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Notifiche di un utente, dalla più recente
    pub async fn find_many_by_user_id(&self, user_id: &i32) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT notification_id, user_id, message, created_at, is_read
            FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC, notification_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<Notification, CreateNotificationDTO> for NotificationRepository {
    async fn create(&self, data: &CreateNotificationDTO) -> Result<Notification, Error> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO notifications (user_id, message, created_at, is_read) VALUES (?, ?, ?, 0)",
        )
        .bind(data.user_id)
        .bind(&data.message)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        Ok(Notification {
            notification_id: result.last_insert_rowid() as i32,
            user_id: data.user_id,
            message: data.message.clone(),
            created_at: now,
            is_read: false,
        })
    }
}
