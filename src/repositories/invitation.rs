//! InvitationRepository - Repository per il ledger degli inviti

use super::{Create, Read};
use crate::dtos::CreateInvitationDTO;
use crate::entities::{Invitation, InvitationStatus, InvitationWithEvent, Participant};
use chrono::{DateTime, Utc};
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

const SELECT_INVITATION: &str = r#"
    SELECT invitation_id, event_id, invited_user_id, status, created_at
    FROM event_invitations
"#;

const SELECT_INVITATION_WITH_EVENT: &str = r#"
    SELECT
        i.invitation_id,
        i.event_id,
        i.invited_user_id,
        i.status,
        i.created_at,
        e.user_id AS owner_id,
        e.title,
        e.start_time,
        e.end_time
    FROM event_invitations i
    JOIN events e ON e.event_id = i.event_id
"#;

//INVITATION REPOSITORY
#[derive(Clone)]
pub struct InvitationRepository {
    connection_pool: SqlitePool,
}

impl InvitationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Invito (in qualsiasi stato) di un utente ad un evento, se esiste
    pub async fn find_by_event_and_invitee(
        &self,
        event_id: &i32,
        user_id: &i32,
    ) -> Result<Option<Invitation>, Error> {
        let query = format!(
            "{} WHERE event_id = ? AND invited_user_id = ?",
            SELECT_INVITATION
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Cambia lo stato solo se lo stato corrente è ancora `from`.
    ///
    /// Controllo e scrittura sono lo stesso statement, quindi due transizioni concorrenti
    /// sulla stessa riga non possono entrambe riuscire.
    ///
    /// # Returns
    /// * `Ok(true)` - la riga è passata da `from` a `to`
    /// * `Ok(false)` - la riga non esiste o non è più in stato `from`
    pub async fn transition_status(
        &self,
        invitation_id: &i32,
        from: InvitationStatus,
        to: InvitationStatus,
    ) -> Result<bool, Error> {
        debug_assert!(from.can_transition_to(to), "illegal transition {from} -> {to}");

        let result = sqlx::query(
            "UPDATE event_invitations SET status = ? WHERE invitation_id = ? AND status = ?",
        )
        .bind(to)
        .bind(invitation_id)
        .bind(from)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Porta a `expired` tutti gli inviti pending il cui evento è terminato prima di `now`.
    ///
    /// Un'unica transazione: o passano tutte le righe o nessuna.
    pub async fn expire_pending_before(&self, now: &DateTime<Utc>) -> Result<u64, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE event_invitations
            SET status = ?
            WHERE status = ?
              AND event_id IN (
                  SELECT event_id FROM events WHERE julianday(end_time) < julianday(?)
              )
            "#,
        )
        .bind(InvitationStatus::Expired)
        .bind(InvitationStatus::Pending)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!("Expired {} invitations", result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Inviti pending ricevuti da un utente, con i dati dell'evento
    pub async fn find_pending_for_user(
        &self,
        user_id: &i32,
    ) -> Result<Vec<InvitationWithEvent>, Error> {
        let query = format!(
            "{} WHERE i.invited_user_id = ? AND i.status = ? ORDER BY i.created_at DESC, i.invitation_id DESC",
            SELECT_INVITATION_WITH_EVENT
        );
        sqlx::query_as::<_, InvitationWithEvent>(&query)
            .bind(user_id)
            .bind(InvitationStatus::Pending)
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Inviti per gli eventi posseduti da `owner_id`, filtrabili per evento e stato
    pub async fn find_sent(
        &self,
        owner_id: &i32,
        event_id: Option<i32>,
        status: Option<InvitationStatus>,
    ) -> Result<Vec<InvitationWithEvent>, Error> {
        // QueryBuilder per i filtri opzionali
        let mut query_builder = QueryBuilder::<Sqlite>::new(SELECT_INVITATION_WITH_EVENT);
        query_builder.push(" WHERE e.user_id = ");
        query_builder.push_bind(*owner_id);

        if let Some(event_id) = event_id {
            query_builder.push(" AND i.event_id = ");
            query_builder.push_bind(event_id);
        }
        if let Some(status) = status {
            query_builder.push(" AND i.status = ");
            query_builder.push_bind(status);
        }
        query_builder.push(" ORDER BY i.created_at DESC, i.invitation_id DESC");

        query_builder
            .build_query_as::<InvitationWithEvent>()
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Utenti che hanno accettato l'invito ad un evento
    pub async fn find_participants(&self, event_id: &i32) -> Result<Vec<Participant>, Error> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT u.user_id, u.username
            FROM event_invitations i
            JOIN users u ON u.user_id = i.invited_user_id
            WHERE i.event_id = ? AND i.status = ?
            ORDER BY u.username
            "#,
        )
        .bind(event_id)
        .bind(InvitationStatus::Accepted)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<Invitation, CreateInvitationDTO> for InvitationRepository {
    async fn create(&self, data: &CreateInvitationDTO) -> Result<Invitation, Error> {
        // state e created_at sono sempre assegnati dal server
        let now = Utc::now();
        let status = InvitationStatus::Pending;

        let result = sqlx::query(
            r#"
            INSERT INTO event_invitations (event_id, invited_user_id, status, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(data.event_id)
        .bind(data.invited_user_id)
        .bind(status)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid() as i32;

        Ok(Invitation {
            invitation_id: new_id,
            event_id: data.event_id,
            invited_user_id: data.invited_user_id,
            status,
            created_at: now,
        })
    }
}

impl Read<Invitation, i32> for InvitationRepository {
    async fn read(&self, id: &i32) -> Result<Option<Invitation>, Error> {
        let query = format!("{} WHERE invitation_id = ?", SELECT_INVITATION);
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::testing::{insert_event, insert_user, pool};
    use chrono::Duration;

    async fn seeded() -> (SqlitePool, InvitationRepository) {
        let pool = pool().await;
        insert_user(&pool, 1, "alice").await;
        insert_user(&pool, 2, "bob").await;
        insert_user(&pool, 3, "charlie").await;
        let now = Utc::now();
        // evento 10 futuro, evento 20 già concluso
        insert_event(&pool, 10, 1, now + Duration::days(1), now + Duration::days(1) + Duration::hours(1)).await;
        insert_event(&pool, 20, 1, now - Duration::hours(3), now - Duration::hours(2)).await;
        let repo = InvitationRepository::new(pool.clone());
        (pool, repo)
    }

    #[tokio::test]
    async fn create_and_read_back() {
        let (_pool, repo) = seeded().await;
        let created = repo
            .create(&CreateInvitationDTO { event_id: 10, invited_user_id: 2 })
            .await
            .unwrap();

        let read = repo.read(&created.invitation_id).await.unwrap().unwrap();
        assert_eq!(read.status, InvitationStatus::Pending);
        assert_eq!(read.event_id, 10);
        assert_eq!(read.invited_user_id, 2);
        assert!(repo.read(&999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unique_pair_is_enforced_by_the_schema() {
        let (_pool, repo) = seeded().await;
        let dto = CreateInvitationDTO { event_id: 10, invited_user_id: 2 };
        repo.create(&dto).await.unwrap();

        match repo.create(&dto).await {
            Err(Error::Database(db)) => assert!(db.is_unique_violation()),
            other => panic!("expected unique violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn status_check_constraint_rejects_unknown_values() {
        let (pool, _repo) = seeded().await;
        let result = sqlx::query(
            "INSERT INTO event_invitations (event_id, invited_user_id, status, created_at) VALUES (10, 3, 'maybe', ?)",
        )
        .bind(Utc::now())
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn transition_only_applies_from_expected_state() {
        let (_pool, repo) = seeded().await;
        let inv = repo
            .create(&CreateInvitationDTO { event_id: 10, invited_user_id: 2 })
            .await
            .unwrap();

        assert!(repo
            .transition_status(&inv.invitation_id, InvitationStatus::Pending, InvitationStatus::Accepted)
            .await
            .unwrap());
        // seconda volta: la riga non è più pending
        assert!(!repo
            .transition_status(&inv.invitation_id, InvitationStatus::Pending, InvitationStatus::Rejected)
            .await
            .unwrap());
        assert_eq!(
            repo.read(&inv.invitation_id).await.unwrap().unwrap().status,
            InvitationStatus::Accepted
        );
    }

    #[tokio::test]
    async fn expire_touches_only_pending_rows_of_ended_events() {
        let (_pool, repo) = seeded().await;
        let future = repo
            .create(&CreateInvitationDTO { event_id: 10, invited_user_id: 2 })
            .await
            .unwrap();
        let past_pending = repo
            .create(&CreateInvitationDTO { event_id: 20, invited_user_id: 2 })
            .await
            .unwrap();
        let past_accepted = repo
            .create(&CreateInvitationDTO { event_id: 20, invited_user_id: 3 })
            .await
            .unwrap();
        repo.transition_status(&past_accepted.invitation_id, InvitationStatus::Pending, InvitationStatus::Accepted)
            .await
            .unwrap();

        let now = Utc::now();
        assert_eq!(repo.expire_pending_before(&now).await.unwrap(), 1);
        assert_eq!(repo.expire_pending_before(&now).await.unwrap(), 0);

        let status = |id: i32| {
            let repo = repo.clone();
            async move { repo.read(&id).await.unwrap().unwrap().status }
        };
        assert_eq!(status(future.invitation_id).await, InvitationStatus::Pending);
        assert_eq!(status(past_pending.invitation_id).await, InvitationStatus::Expired);
        assert_eq!(status(past_accepted.invitation_id).await, InvitationStatus::Accepted);
    }

    #[tokio::test]
    async fn sent_filters_combine() {
        let (_pool, repo) = seeded().await;
        repo.create(&CreateInvitationDTO { event_id: 10, invited_user_id: 2 }).await.unwrap();
        repo.create(&CreateInvitationDTO { event_id: 10, invited_user_id: 3 }).await.unwrap();
        let on_past = repo
            .create(&CreateInvitationDTO { event_id: 20, invited_user_id: 2 })
            .await
            .unwrap();
        repo.transition_status(&on_past.invitation_id, InvitationStatus::Pending, InvitationStatus::Rejected)
            .await
            .unwrap();

        assert_eq!(repo.find_sent(&1, None, None).await.unwrap().len(), 3);
        assert_eq!(repo.find_sent(&1, Some(10), None).await.unwrap().len(), 2);
        let rejected = repo
            .find_sent(&1, None, Some(InvitationStatus::Rejected))
            .await
            .unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].invitation.invitation_id, on_past.invitation_id);
        assert_eq!(rejected[0].event.owner_id, 1);
        assert!(repo.find_sent(&1, Some(20), Some(InvitationStatus::Pending)).await.unwrap().is_empty());
        // bob non possiede eventi
        assert!(repo.find_sent(&2, None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn participants_are_accepted_invitees_only() {
        let (_pool, repo) = seeded().await;
        let bob = repo
            .create(&CreateInvitationDTO { event_id: 10, invited_user_id: 2 })
            .await
            .unwrap();
        repo.create(&CreateInvitationDTO { event_id: 10, invited_user_id: 3 }).await.unwrap();
        repo.transition_status(&bob.invitation_id, InvitationStatus::Pending, InvitationStatus::Accepted)
            .await
            .unwrap();

        let participants = repo.find_participants(&10).await.unwrap();
        assert_eq!(
            participants,
            vec![Participant { user_id: 2, username: "bob".to_string() }]
        );
    }
}
