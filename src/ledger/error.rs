//! Errori del ledger degli inviti

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvitationError {
    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Precondizione di stato violata, compreso il caso di transizione concorrente persa
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage momentaneamente non disponibile, l'operazione si può ripetere
    #[error("storage unavailable: {0}")]
    Transient(#[source] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

impl InvitationError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, InvitationError::Transient(_))
    }
}

// SQLITE_BUSY e SQLITE_LOCKED, anche nelle varianti estese (codice & 0xff)
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

fn is_lock_contention(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
            .unwrap_or(false),
        _ => false,
    }
}

impl From<sqlx::Error> for InvitationError {
    fn from(err: sqlx::Error) -> Self {
        let transient = matches!(
            err,
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::WorkerCrashed
        ) || is_lock_contention(&err);

        if transient {
            InvitationError::Transient(err)
        } else {
            InvitationError::Storage(err)
        }
    }
}
