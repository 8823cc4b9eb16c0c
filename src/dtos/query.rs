//! Query DTOs - Data Transfer Objects per i query parameters

use crate::entities::InvitationStatus;
use serde::{Deserialize, Serialize};

/// Filtri opzionali di GET /invitations/sent?event_id=..&status=..
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SentInvitationsQuery {
    #[serde(default)]
    pub event_id: Option<i32>,
    #[serde(default)]
    pub status: Option<InvitationStatus>,
}
