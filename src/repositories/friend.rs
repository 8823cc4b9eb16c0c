//! FriendRepository - Consultazione del grafo delle amicizie

use sqlx::{Error, SqlitePool};

#[derive(Clone)]
pub struct FriendRepository {
    connection_pool: SqlitePool,
}

impl FriendRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// `true` se `user_id` ha `friend_id` tra i suoi amici
    pub async fn are_friends(&self, user_id: &i32, friend_id: &i32) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM friends WHERE user_id = ? AND friend_id = ?",
        )
        .bind(user_id)
        .bind(friend_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(count > 0)
    }
}
