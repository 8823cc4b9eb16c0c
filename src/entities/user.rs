//! User entity - Utenti visti dal ledger (solo id e username)

use serde::{Deserialize, Serialize};

/// Partecipante confermato di un evento
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Participant {
    pub user_id: i32,
    pub username: String,
}
