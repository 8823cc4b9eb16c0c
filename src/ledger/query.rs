//! Viste in sola lettura sul ledger. Nessuna cache: ogni chiamata rilegge il database.

use super::InvitationError;
use crate::entities::{InvitationStatus, InvitationWithEvent, Participant};
use crate::repositories::{EventRepository, InvitationRepository, Read};
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct InvitationQueries {
    invitations: InvitationRepository,
    events: EventRepository,
}

impl InvitationQueries {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            invitations: InvitationRepository::new(pool.clone()),
            events: EventRepository::new(pool),
        }
    }

    /// Inviti ancora in attesa di risposta ricevuti da `user_id`
    #[instrument(skip(self))]
    pub async fn received_pending(
        &self,
        user_id: i32,
    ) -> Result<Vec<InvitationWithEvent>, InvitationError> {
        let invitations = self.invitations.find_pending_for_user(&user_id).await?;
        debug!("Found {} pending invitations", invitations.len());
        Ok(invitations)
    }

    /// Inviti emessi per gli eventi di `owner_id`, con filtri opzionali
    #[instrument(skip(self))]
    pub async fn sent(
        &self,
        owner_id: i32,
        event_id: Option<i32>,
        status: Option<InvitationStatus>,
    ) -> Result<Vec<InvitationWithEvent>, InvitationError> {
        let invitations = self
            .invitations
            .find_sent(&owner_id, event_id, status)
            .await?;
        debug!("Found {} sent invitations", invitations.len());
        Ok(invitations)
    }

    /// Partecipanti confermati. Visibili all'owner e a chi ha accettato l'invito.
    #[instrument(skip(self))]
    pub async fn participants(
        &self,
        event_id: i32,
        viewer_id: i32,
    ) -> Result<Vec<Participant>, InvitationError> {
        let event = self.events.read(&event_id).await?.ok_or_else(|| {
            warn!("Event not found: {}", event_id);
            InvitationError::NotFound("Event does not exist")
        })?;

        let participants = self.invitations.find_participants(&event_id).await?;

        let allowed = event.is_owned_by(viewer_id)
            || participants.iter().any(|p| p.user_id == viewer_id);
        if !allowed {
            warn!("User {} cannot see participants of event {}", viewer_id, event_id);
            return Err(InvitationError::Forbidden(
                "You are not authorized to access this event",
            ));
        }

        Ok(participants)
    }
}
