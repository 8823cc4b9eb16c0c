//! Sweeper delle scadenze - task periodico che fa scadere gli inviti di eventi conclusi
//!
//! Il task non conserva stato tra un giro e l'altro: ad ogni tick chiama
//! `InvitationLedger::expire_all(now)`. Se il giro fallisce si logga e si aspetta il
//! tick successivo, che recupera tutto perché `expire_all` è idempotente.

use crate::core::Config;
use crate::ledger::InvitationLedger;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// Configurazione per lo sweeper delle scadenze
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Periodo tra due giri; i tick sono allineati ai multipli del periodo
    /// (3600s -> allo scoccare di ogni ora)
    pub interval: Duration,
    /// Esegue un giro subito all'avvio, senza aspettare il primo tick
    pub run_on_startup: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600), // ogni ora
            run_on_startup: false,
        }
    }
}

impl From<&Config> for SweeperConfig {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.sweep_interval(),
            run_on_startup: config.sweep_on_startup,
        }
    }
}

/// Primo istante strettamente successivo a `now` multiplo di `interval` dall'epoch Unix
pub fn next_tick_after(now: DateTime<Utc>, interval: Duration) -> DateTime<Utc> {
    let period = i64::try_from(interval.as_secs()).unwrap_or(i64::MAX).max(1);
    now.timestamp()
        .div_euclid(period)
        .checked_add(1)
        .and_then(|n| n.checked_mul(period))
        .and_then(|next| DateTime::from_timestamp(next, 0))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Un singolo giro di sweep. Restituisce il numero di inviti scaduti, `None` se il giro
/// è fallito (già loggato).
#[instrument(skip(ledger))]
pub async fn run_once(ledger: &InvitationLedger, now: DateTime<Utc>) -> Option<u64> {
    match ledger.expire_all(now).await {
        Ok(count) => {
            info!("Expiration sweep completed: {} invitations expired", count);
            Some(count)
        }
        Err(e) => {
            error!("Expiration sweep failed, retrying on next tick: {}", e);
            None
        }
    }
}

/// Avvia lo sweeper in background. Si ferma quando `shutdown` cambia valore o quando
/// il sender viene droppato.
///
/// # Example
///
/// ```rust,no_run
/// use calendar_server::ledger::InvitationLedger;
/// use calendar_server::sweeper::{spawn_expiration_sweeper, SweeperConfig};
///
/// # async fn demo(ledger: InvitationLedger) {
/// let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
/// let handle = spawn_expiration_sweeper(ledger, SweeperConfig::default(), shutdown_rx);
/// // ...
/// let _ = shutdown_tx.send(true);
/// let _ = handle.await;
/// # }
/// ```
pub fn spawn_expiration_sweeper(
    ledger: InvitationLedger,
    config: SweeperConfig,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(sweeper_loop(ledger, config, shutdown))
}

async fn sweeper_loop(
    ledger: InvitationLedger,
    config: SweeperConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(
        "Starting expiration sweeper with interval: {} seconds",
        config.interval.as_secs()
    );

    if config.run_on_startup {
        run_once(&ledger, Utc::now()).await;
    }

    loop {
        let now = Utc::now();
        let next = next_tick_after(now, config.interval);
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        debug!("Next expiration sweep at {}", next);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                run_once(&ledger, Utc::now()).await;
            }
            _ = shutdown.changed() => {
                info!("Expiration sweeper stopped");
                break;
            }
        }
    }
}
