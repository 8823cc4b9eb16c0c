//! Application State - Stato globale dell'applicazione
//!
//! Contiene il ledger degli inviti, le query in sola lettura e la configurazione
//! condivisa necessaria alle route e ai middleware.

use crate::ledger::{InvitationLedger, InvitationQueries};
use crate::notifications::NotificationDispatcher;
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Unico punto in cui lo stato degli inviti viene modificato
    pub ledger: InvitationLedger,

    /// Liste di inviti ricevuti/inviati e partecipanti
    pub queries: InvitationQueries,

    /// Secret key per JWT token
    pub jwt_secret: String,
}

impl AppState {
    /// Crea una nuova istanza di AppState con il pool di connessioni fornito,
    /// la JWT secret e il dispatcher delle notifiche.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `jwt_secret` - Chiave segreta per la verifica dei token JWT
    /// * `notifier` - Coda delle notifiche generate dal ledger
    pub fn new(pool: SqlitePool, jwt_secret: String, notifier: NotificationDispatcher) -> Self {
        Self {
            ledger: InvitationLedger::new(pool.clone(), notifier),
            queries: InvitationQueries::new(pool),
            jwt_secret,
        }
    }
}
