//! Notification DTOs

use serde::{Deserialize, Serialize};

/// DTO per creare una notifica (created_at e is_read assegnati dal server)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateNotificationDTO {
    pub user_id: i32,
    pub message: String,
}
