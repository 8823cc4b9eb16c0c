//! EventRepository - Lettura degli eventi (gestiti dal servizio calendario)

use super::Read;
use crate::entities::Event;
use sqlx::{Error, SqlitePool};

#[derive(Clone)]
pub struct EventRepository {
    connection_pool: SqlitePool,
}

impl EventRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

impl Read<Event, i32> for EventRepository {
    async fn read(&self, id: &i32) -> Result<Option<Event>, Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, user_id AS owner_id, title, start_time, end_time
            FROM events
            WHERE event_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
