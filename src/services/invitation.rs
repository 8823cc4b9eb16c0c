//! Invitation services - Endpoint HTTP del ciclo di vita degli inviti
//!
//! Gli handler si limitano a estrarre i parametri e a delegare al ledger: controlli di
//! ownership, amicizia e stato sono tutti in `crate::ledger`.

use crate::core::{AppError, AppJson, AppPath, AppQuery, AppState, CurrentUser};
use crate::dtos::{
    CreateInvitationDTO, EnrichedInvitationDTO, InvitationDTO, ParticipantDTO,
    SentInvitationsQuery,
};
use crate::entities::ResponseDecision;
use axum::{
    Extension,
    extract::{Json, State},
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_invitation(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>, // ottenuto dall'autenticazione tramite token jwt
    AppJson(body): AppJson<CreateInvitationDTO>,
) -> Result<Json<InvitationDTO>, AppError> {
    debug!("Creating invitation");
    body.validate()?;

    let invitation = state
        .ledger
        .create(body.event_id, current_user.user_id, body.invited_user_id)
        .await?;

    info!(
        "Invitation {} sent to user {}",
        invitation.invitation_id, invitation.invited_user_id
    );
    Ok(Json(InvitationDTO::from(invitation)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_received_invitations(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<Vec<EnrichedInvitationDTO>>, AppError> {
    debug!("Listing pending invitations");
    let invitations = state
        .queries
        .received_pending(current_user.user_id)
        .await?
        .into_iter()
        .map(EnrichedInvitationDTO::from)
        .collect::<Vec<_>>();

    info!("Found {} pending invitations", invitations.len());
    Ok(Json(invitations))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_sent_invitations(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    AppQuery(filters): AppQuery<SentInvitationsQuery>,
) -> Result<Json<Vec<EnrichedInvitationDTO>>, AppError> {
    debug!("Listing sent invitations");
    let invitations = state
        .queries
        .sent(current_user.user_id, filters.event_id, filters.status)
        .await?
        .into_iter()
        .map(EnrichedInvitationDTO::from)
        .collect::<Vec<_>>();

    info!("Found {} sent invitations", invitations.len());
    Ok(Json(invitations))
}

#[instrument(skip(state, current_user), fields(event_id = %event_id, user_id = %current_user.user_id))]
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    AppPath(event_id): AppPath<i32>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<Vec<ParticipantDTO>>, AppError> {
    let participants = state
        .queries
        .participants(event_id, current_user.user_id)
        .await?
        .into_iter()
        .map(ParticipantDTO::from)
        .collect();

    Ok(Json(participants))
}

#[instrument(skip(state, current_user), fields(invitation_id = %invitation_id, action = %action, user_id = %current_user.user_id))]
pub async fn respond_to_invitation(
    State(state): State<Arc<AppState>>,
    AppPath((invitation_id, action)): AppPath<(i32, String)>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<InvitationDTO>, AppError> {
    debug!("Responding to invitation");

    // l'azione si valida prima di toccare il database
    let decision = action.parse::<ResponseDecision>().map_err(|e| {
        warn!("Invalid invitation action: {}", e);
        AppError::bad_request("Action must be 'accept' or 'reject'")
    })?;

    let invitation = state
        .ledger
        .respond(invitation_id, current_user.user_id, decision)
        .await?;

    info!("Invitation {} is now {}", invitation_id, invitation.status);
    Ok(Json(InvitationDTO::from(invitation)))
}

#[instrument(skip(state, current_user), fields(invitation_id = %invitation_id, user_id = %current_user.user_id))]
pub async fn cancel_invitation(
    State(state): State<Arc<AppState>>,
    AppPath(invitation_id): AppPath<i32>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<(), AppError> {
    state
        .ledger
        .cancel(invitation_id, current_user.user_id)
        .await?;

    info!("Invitation {} cancelled", invitation_id);
    Ok(())
}

#[instrument(skip(state, current_user), fields(event_id = %event_id, user_id = %current_user.user_id))]
pub async fn withdraw_invitation(
    State(state): State<Arc<AppState>>,
    AppPath(event_id): AppPath<i32>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<(), AppError> {
    state.ledger.withdraw(event_id, current_user.user_id).await?;

    info!("User left event {}", event_id);
    Ok(())
}

#[debug_handler]
#[instrument(skip(state, current_user), fields(event_id = %event_id, target_user_id = %user_id, user_id = %current_user.user_id))]
pub async fn remove_participant(
    State(state): State<Arc<AppState>>,
    AppPath((event_id, user_id)): AppPath<(i32, i32)>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<(), AppError> {
    state
        .ledger
        .remove(event_id, current_user.user_id, user_id)
        .await?;

    info!("User {} removed from event {}", user_id, event_id);
    Ok(())
}
