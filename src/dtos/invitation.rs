//! Invitation DTOs - Data Transfer Objects per inviti

use crate::entities::{Event, Invitation, InvitationStatus, InvitationWithEvent, Participant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvitationDTO {
    pub invitation_id: i32,
    pub event_id: i32,
    pub invited_user_id: i32,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Invitation> for InvitationDTO {
    fn from(value: Invitation) -> Self {
        Self {
            invitation_id: value.invitation_id,
            event_id: value.event_id,
            invited_user_id: value.invited_user_id,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

/// DTO per creare un nuovo invito (senza invitation_id, status e created_at)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateInvitationDTO {
    #[validate(range(min = 1, message = "event_id must be a positive id"))]
    pub event_id: i32,

    #[validate(range(min = 1, message = "invited_user_id must be a positive id"))]
    pub invited_user_id: i32,
}

/// Dati essenziali dell'evento mostrati insieme all'invito
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EventSummaryDTO {
    pub event_id: i32,
    pub owner_id: i32,
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<Event> for EventSummaryDTO {
    fn from(value: Event) -> Self {
        Self {
            event_id: value.event_id,
            owner_id: value.owner_id,
            title: value.title,
            start_time: value.start_time,
            end_time: value.end_time,
        }
    }
}

/// DTO arricchito con le informazioni dell'evento
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EnrichedInvitationDTO {
    pub invitation_id: i32,
    pub invited_user_id: i32,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub event: EventSummaryDTO,
}

impl From<InvitationWithEvent> for EnrichedInvitationDTO {
    fn from(value: InvitationWithEvent) -> Self {
        Self {
            invitation_id: value.invitation.invitation_id,
            invited_user_id: value.invitation.invited_user_id,
            status: value.invitation.status,
            created_at: value.invitation.created_at,
            event: value.event.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParticipantDTO {
    pub user_id: i32,
    pub username: String,
}

impl From<Participant> for ParticipantDTO {
    fn from(value: Participant) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
        }
    }
}

/// Esito di una esecuzione manuale dello sweep
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SweepReportDTO {
    pub expired: u64,
}
