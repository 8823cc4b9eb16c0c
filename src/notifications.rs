//! Notifiche in-app generate dal ciclo di vita degli inviti
//!
//! Il ledger non scrive direttamente le notifiche: le accoda su un canale e un task in
//! background le inserisce. Un invio fallito viene solo loggato, la transizione
//! dell'invito che l'ha generato resta valida.

use crate::dtos::CreateNotificationDTO;
use crate::repositories::{Create, NotificationRepository};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: UnboundedSender<CreateNotificationDTO>,
}

impl NotificationDispatcher {
    /// Crea il dispatcher e il lato ricevente del canale
    pub fn channel() -> (Self, UnboundedReceiver<CreateNotificationDTO>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Crea il dispatcher e avvia il worker che salva le notifiche su `repository`.
    /// Va chiamato dentro un runtime tokio.
    pub fn spawn(repository: NotificationRepository) -> (Self, JoinHandle<()>) {
        let (dispatcher, rx) = Self::channel();
        let handle = tokio::spawn(run_notification_worker(rx, repository));
        (dispatcher, handle)
    }

    /// Fire-and-forget: non blocca e non fallisce mai
    #[instrument(skip(self, message))]
    pub fn emit(&self, user_id: i32, message: impl Into<String>) {
        let notification = CreateNotificationDTO {
            user_id,
            message: message.into(),
        };
        if let Err(e) = self.tx.send(notification) {
            warn!("Notification for user {} dropped: {}", user_id, e);
        } else {
            debug!("Notification queued for user {}", user_id);
        }
    }
}

/// Consuma il canale finché tutti i dispatcher non vengono droppati
pub async fn run_notification_worker(
    mut rx: UnboundedReceiver<CreateNotificationDTO>,
    repository: NotificationRepository,
) {
    info!("Notification worker started");
    while let Some(notification) = rx.recv().await {
        match repository.create(&notification).await {
            Ok(saved) => debug!(
                "Notification {} stored for user {}",
                saved.notification_id, saved.user_id
            ),
            Err(e) => warn!(
                "Failed to store notification for user {}: {}",
                notification.user_id, e
            ),
        }
    }
    info!("Notification worker stopped");
}
