//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod invitation;
pub mod notification;
pub mod query;

pub use invitation::{
    CreateInvitationDTO, EnrichedInvitationDTO, EventSummaryDTO, InvitationDTO, ParticipantDTO,
    SweepReportDTO,
};
pub use notification::CreateNotificationDTO;
pub use query::SentInvitationsQuery;
