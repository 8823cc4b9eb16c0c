//! Ledger degli inviti - unico punto in cui lo stato di un invito cambia
//!
//! Ogni operazione rilegge l'invito, verifica le precondizioni (esistenza, ownership,
//! amicizia) e poi applica la transizione con un UPDATE condizionato allo stato atteso.
//! Se l'UPDATE non tocca righe lo stato è cambiato nel frattempo (ad esempio per lo
//! sweep delle scadenze) e l'operazione fallisce con `Conflict`.
//!
//! Transizioni ammesse:
//! - `pending  -> accepted | rejected`  (risposta dell'invitato)
//! - `pending  -> withdrawn`            (l'owner annulla l'invito)
//! - `pending  -> expired`              (sweep, evento concluso)
//! - `accepted -> withdrawn`            (l'invitato lascia l'evento)
//! - `accepted -> removed`              (l'owner rimuove il partecipante)

pub mod error;
pub mod query;

pub use error::InvitationError;
pub use query::InvitationQueries;

use crate::dtos::CreateInvitationDTO;
use crate::entities::{Event, Invitation, InvitationStatus, ResponseDecision};
use crate::notifications::NotificationDispatcher;
use crate::repositories::{
    Create, EventRepository, FriendRepository, InvitationRepository, Read,
};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument, warn};

#[derive(Clone)]
pub struct InvitationLedger {
    invitations: InvitationRepository,
    events: EventRepository,
    friends: FriendRepository,
    notifier: NotificationDispatcher,
}

impl InvitationLedger {
    pub fn new(pool: SqlitePool, notifier: NotificationDispatcher) -> Self {
        Self {
            invitations: InvitationRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            friends: FriendRepository::new(pool),
            notifier,
        }
    }

    /// Crea un invito `pending`. Le precondizioni sono verificate in quest'ordine e vince
    /// la prima che fallisce: evento esistente, inviter owner, invitee diverso dall'owner,
    /// invitee amico dell'owner, nessun invito precedente per la coppia (evento, invitee).
    #[instrument(skip(self), fields(event_id = %event_id, inviter = %inviter_id, invitee = %invitee_id))]
    pub async fn create(
        &self,
        event_id: i32,
        inviter_id: i32,
        invitee_id: i32,
    ) -> Result<Invitation, InvitationError> {
        debug!("Creating invitation");

        let event = self.find_event(event_id).await?;

        if !event.is_owned_by(inviter_id) {
            warn!("User {} does not own event {}", inviter_id, event_id);
            return Err(InvitationError::Forbidden(
                "You are not authorized to access this event",
            ));
        }

        if invitee_id == inviter_id {
            warn!("Owner attempted to invite themselves");
            return Err(InvitationError::InvalidArgument(
                "You cannot invite yourself".to_string(),
            ));
        }

        if !self.friends.are_friends(&inviter_id, &invitee_id).await? {
            warn!("Users {} and {} are not friends", inviter_id, invitee_id);
            return Err(InvitationError::Forbidden("Can only invite friends"));
        }

        // Qualsiasi stato blocca un nuovo invito, anche rejected/withdrawn/removed/expired
        if let Some(existing) = self
            .invitations
            .find_by_event_and_invitee(&event_id, &invitee_id)
            .await?
        {
            warn!(
                "Invitation {} already exists ({})",
                existing.invitation_id, existing.status
            );
            return Err(InvitationError::Conflict(format!(
                "User {} is already invited to event {} (invitation is {})",
                invitee_id, event_id, existing.status
            )));
        }

        // L'indice UNIQUE(event_id, invited_user_id) decide tra due create concorrenti
        let invitation = self
            .invitations
            .create(&CreateInvitationDTO {
                event_id,
                invited_user_id: invitee_id,
            })
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    warn!("Concurrent invitation for the same user and event");
                    InvitationError::Conflict(format!(
                        "User {} is already invited to event {}",
                        invitee_id, event_id
                    ))
                }
                other => other.into(),
            })?;

        info!("Invitation {} created", invitation.invitation_id);

        self.notifier.emit(
            invitee_id,
            format!("You have been invited to {}", describe(&event)),
        );

        Ok(invitation)
    }

    /// Risposta dell'invitato: `pending -> accepted | rejected`
    #[instrument(skip(self), fields(invitation_id = %invitation_id, responder = %responder_id, decision = ?decision))]
    pub async fn respond(
        &self,
        invitation_id: i32,
        responder_id: i32,
        decision: ResponseDecision,
    ) -> Result<Invitation, InvitationError> {
        debug!("Responding to invitation");

        let invitation = self.find_invitation(invitation_id).await?;

        if invitation.invited_user_id != responder_id {
            warn!(
                "User {} attempted to respond to invitation for user {}",
                responder_id, invitation.invited_user_id
            );
            return Err(InvitationError::Forbidden(
                "You are not the recipient of this invitation",
            ));
        }

        let updated = self
            .transition(invitation, InvitationStatus::Pending, decision.into())
            .await?;

        self.notify_owner(
            updated.event_id,
            format!("User {} has {} your invitation", responder_id, updated.status),
        )
        .await;

        Ok(updated)
    }

    /// L'owner annulla un invito ancora `pending`: `pending -> withdrawn`
    #[instrument(skip(self), fields(invitation_id = %invitation_id, actor = %actor_id))]
    pub async fn cancel(
        &self,
        invitation_id: i32,
        actor_id: i32,
    ) -> Result<Invitation, InvitationError> {
        debug!("Cancelling invitation");

        let invitation = self.find_invitation(invitation_id).await?;
        let event = self.find_event(invitation.event_id).await?;

        if !event.is_owned_by(actor_id) {
            warn!("User {} cannot cancel invitations of event {}", actor_id, event.event_id);
            return Err(InvitationError::Forbidden(
                "Only the event owner can cancel an invitation",
            ));
        }

        let updated = self
            .transition(invitation, InvitationStatus::Pending, InvitationStatus::Withdrawn)
            .await?;

        self.notifier.emit(
            updated.invited_user_id,
            format!("Your invitation to {} has been cancelled", describe(&event)),
        );

        Ok(updated)
    }

    /// L'invitato lascia un evento a cui aveva aderito: `accepted -> withdrawn`
    #[instrument(skip(self), fields(event_id = %event_id, actor = %actor_id))]
    pub async fn withdraw(
        &self,
        event_id: i32,
        actor_id: i32,
    ) -> Result<Invitation, InvitationError> {
        debug!("Withdrawing from event");

        let invitation = self
            .invitations
            .find_by_event_and_invitee(&event_id, &actor_id)
            .await?
            .ok_or_else(|| {
                warn!("User {} has no invitation to event {}", actor_id, event_id);
                InvitationError::NotFound("You have no invitation to this event")
            })?;

        let updated = self
            .transition(invitation, InvitationStatus::Accepted, InvitationStatus::Withdrawn)
            .await?;

        self.notify_owner(
            event_id,
            format!("User {} has left your event", actor_id),
        )
        .await;

        Ok(updated)
    }

    /// L'owner rimuove un partecipante: `accepted -> removed`
    #[instrument(skip(self), fields(event_id = %event_id, actor = %actor_id, invitee = %invitee_id))]
    pub async fn remove(
        &self,
        event_id: i32,
        actor_id: i32,
        invitee_id: i32,
    ) -> Result<Invitation, InvitationError> {
        debug!("Removing participant");

        let event = self.find_event(event_id).await?;

        if !event.is_owned_by(actor_id) {
            warn!("User {} does not own event {}", actor_id, event_id);
            return Err(InvitationError::Forbidden(
                "Only the event owner can remove participants",
            ));
        }

        let invitation = self
            .invitations
            .find_by_event_and_invitee(&event_id, &invitee_id)
            .await?
            .ok_or_else(|| {
                warn!("User {} was never invited to event {}", invitee_id, event_id);
                InvitationError::NotFound("The user is not invited to this event")
            })?;

        let updated = self
            .transition(invitation, InvitationStatus::Accepted, InvitationStatus::Removed)
            .await?;

        self.notifier.emit(
            invitee_id,
            format!("You have been removed from {}", describe(&event)),
        );

        Ok(updated)
    }

    /// Fa scadere tutti gli inviti pending di eventi conclusi prima di `now`.
    ///
    /// Idempotente: una seconda esecuzione con lo stesso `now` non trova righe.
    /// Qualsiasi errore di storage annulla l'intero batch ed è restituito come
    /// `Transient`, da ripetere al giro successivo.
    #[instrument(skip(self), fields(now = %now))]
    pub async fn expire_all(&self, now: DateTime<Utc>) -> Result<u64, InvitationError> {
        debug!("Expiring invitations of ended events");
        match self.invitations.expire_pending_before(&now).await {
            Ok(count) => {
                info!("{} event invitations were expired", count);
                Ok(count)
            }
            Err(e) => {
                error!("Expiration sweep rolled back: {}", e);
                Err(InvitationError::Transient(e))
            }
        }
    }

    /// UPDATE condizionato: riesce solo se la riga è ancora nello stato `from`
    async fn transition(
        &self,
        invitation: Invitation,
        from: InvitationStatus,
        to: InvitationStatus,
    ) -> Result<Invitation, InvitationError> {
        if invitation.status != from {
            warn!(
                "Invitation {} is {}, expected {}",
                invitation.invitation_id, invitation.status, from
            );
            return Err(InvitationError::Conflict(format!(
                "Invitation is already {}",
                invitation.status
            )));
        }

        let applied = self
            .invitations
            .transition_status(&invitation.invitation_id, from, to)
            .await?;

        if !applied {
            warn!(
                "Invitation {} changed state concurrently, {} -> {} not applied",
                invitation.invitation_id, from, to
            );
            return Err(InvitationError::Conflict(format!(
                "Invitation is no longer {}",
                from
            )));
        }

        info!("Invitation {}: {} -> {}", invitation.invitation_id, from, to);
        Ok(Invitation {
            status: to,
            ..invitation
        })
    }

    async fn find_invitation(&self, invitation_id: i32) -> Result<Invitation, InvitationError> {
        self.invitations.read(&invitation_id).await?.ok_or_else(|| {
            warn!("Invitation not found: {}", invitation_id);
            InvitationError::NotFound("Invitation does not exist")
        })
    }

    async fn find_event(&self, event_id: i32) -> Result<Event, InvitationError> {
        self.events.read(&event_id).await?.ok_or_else(|| {
            warn!("Event not found: {}", event_id);
            InvitationError::NotFound("Event does not exist")
        })
    }

    /// Best-effort: la transizione è già committata, un errore qui viene solo loggato
    async fn notify_owner(&self, event_id: i32, message: String) {
        match self.events.read(&event_id).await {
            Ok(Some(event)) => self.notifier.emit(event.owner_id, message),
            Ok(None) => warn!("Event {} vanished, owner not notified", event_id),
            Err(e) => warn!("Could not load event {} to notify owner: {}", event_id, e),
        }
    }
}

fn describe(event: &Event) -> String {
    match &event.title {
        Some(title) => format!("'{}'", title),
        None => format!("event #{}", event.event_id),
    }
}
