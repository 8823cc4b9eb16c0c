//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce le operazioni di database per una specifica tabella.
//! Solo `InvitationRepository` scrive: eventi e amicizie appartengono ad altri servizi
//! e qui vengono solo letti, le notifiche vengono solo inserite.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query usano sqlx::query / sqlx::query_as con i parametri legati tramite bind,
   controllate a run-time: non serve un database raggiungibile in fase di compilazione
   (a differenza di query! / query_as!). Le righe vengono mappate con #[derive(sqlx::FromRow)].

   Number of Rows	Method to Call	    Returns
   None	            .execute(...)	        sqlx::Result<SqliteQueryResult>  (INSERT/UPDATE, rows_affected())
   Zero or One	    .fetch_optional(...)	sqlx::Result<Option<T>>
   Exactly One	    .fetch_one(...)	        sqlx::Result<T>
   Multiple	        .fetch_all(...)	        sqlx::Result<Vec<T>>

   Regola d'oro per gli inviti: ogni cambio di stato è un UPDATE con "AND status = ?"
   e si guarda rows_affected(). Zero righe = qualcun altro è arrivato prima.
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod event;
pub mod friend;
pub mod invitation;
pub mod notification;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Read};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use event::EventRepository;
pub use friend::FriendRepository;
pub use invitation::InvitationRepository;
pub use notification::NotificationRepository;
