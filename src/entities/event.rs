//! Event entity - Proiezione in sola lettura della tabella eventi
//!
//! Gli eventi appartengono al servizio calendario: qui servono solo owner e finestra temporale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Event {
    pub event_id: i32,
    pub owner_id: i32,
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Event {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.owner_id == user_id
    }
}
