//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella (o a una proiezione di tabella) nel database.

pub mod enums;
pub mod event;
pub mod invitation;
pub mod notification;
pub mod user;

// Re-exports per facilitare l'import
pub use enums::{InvitationStatus, ResponseDecision};
pub use event::Event;
pub use invitation::{Invitation, InvitationWithEvent};
pub use notification::Notification;
pub use user::Participant;
