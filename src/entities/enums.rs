//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ********************* ENUMERAZIONI UTILI **********************//

/// Stato di un invito. `Pending` è l'unico stato iniziale; gli altri sono
/// raggiungibili solo attraverso le transizioni di [`InvitationStatus::can_transition_to`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
    Removed,
    Expired,
}

impl InvitationStatus {
    pub const ALL: [InvitationStatus; 6] = [
        InvitationStatus::Pending,
        InvitationStatus::Accepted,
        InvitationStatus::Rejected,
        InvitationStatus::Withdrawn,
        InvitationStatus::Removed,
        InvitationStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Rejected => "rejected",
            InvitationStatus::Withdrawn => "withdrawn",
            InvitationStatus::Removed => "removed",
            InvitationStatus::Expired => "expired",
        }
    }

    /// Ogni stato diverso da `Pending` è una risposta definitiva all'invito
    pub fn is_terminal(&self) -> bool {
        *self != InvitationStatus::Pending
    }

    /// Tabella delle transizioni ammesse dal ledger.
    /// `Accepted` è terminale come risposta, ma la partecipazione può ancora
    /// essere lasciata (`Withdrawn`) o revocata dall'owner (`Removed`).
    pub fn can_transition_to(&self, next: InvitationStatus) -> bool {
        use InvitationStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Withdrawn)
                | (Pending, Expired)
                | (Accepted, Withdrawn)
                | (Accepted, Removed)
        )
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvitationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown invitation status '{}'", s))
    }
}

/// Risposta dell'invitato: solo accettare o rifiutare
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseDecision {
    Accepted,
    Rejected,
}

impl FromStr for ResponseDecision {
    type Err = String;

    /// Accetta sia la forma verbale usata nelle route (`accept`/`reject`)
    /// sia il nome dello stato (`accepted`/`rejected`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accept" | "accepted" => Ok(ResponseDecision::Accepted),
            "reject" | "rejected" => Ok(ResponseDecision::Rejected),
            other => Err(format!("'{}' is not a valid response", other)),
        }
    }
}

impl From<ResponseDecision> for InvitationStatus {
    fn from(value: ResponseDecision) -> Self {
        match value {
            ResponseDecision::Accepted => InvitationStatus::Accepted,
            ResponseDecision::Rejected => InvitationStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_and_accepted_have_outgoing_edges() {
        for from in InvitationStatus::ALL {
            let has_edges = InvitationStatus::ALL
                .into_iter()
                .any(|to| from.can_transition_to(to));
            let expected = matches!(from, InvitationStatus::Pending | InvitationStatus::Accepted);
            assert_eq!(has_edges, expected, "{from}");
        }
    }

    #[test]
    fn pending_is_the_only_non_terminal_state() {
        let open: Vec<_> = InvitationStatus::ALL
            .into_iter()
            .filter(|s| !s.is_terminal())
            .collect();
        assert_eq!(open, vec![InvitationStatus::Pending]);
    }

    #[test]
    fn nothing_transitions_back_to_pending() {
        for from in InvitationStatus::ALL {
            assert!(!from.can_transition_to(InvitationStatus::Pending));
        }
    }

    #[test]
    fn decision_parsing() {
        assert_eq!("accept".parse::<ResponseDecision>(), Ok(ResponseDecision::Accepted));
        assert_eq!("Rejected".parse::<ResponseDecision>(), Ok(ResponseDecision::Rejected));
        assert!("expired".parse::<ResponseDecision>().is_err());
        assert!("maybe".parse::<ResponseDecision>().is_err());
    }

    #[test]
    fn status_parsing_roundtrips_names() {
        assert_eq!("withdrawn".parse::<InvitationStatus>(), Ok(InvitationStatus::Withdrawn));
        assert!("cancelled".parse::<InvitationStatus>().is_err());
    }
}
