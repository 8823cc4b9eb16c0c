//! Invitation entity - Entità invito ad un evento

use super::enums::InvitationStatus;
use super::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Invitation {
    pub invitation_id: i32,
    pub event_id: i32,        // evento a cui si viene invitati
    pub invited_user_id: i32, // utente invitato (l'invitante è sempre l'owner dell'evento)
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

/// Invito letto in join con il suo evento, usato dalle viste received/sent
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvitationWithEvent {
    #[sqlx(flatten)]
    pub invitation: Invitation,
    #[sqlx(flatten)]
    pub event: Event,
}
