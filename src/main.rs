use calendar_server::core::{AppState, Config, database};
use calendar_server::notifications::NotificationDispatcher;
use calendar_server::repositories::NotificationRepository;
use calendar_server::sweeper::{SweeperConfig, spawn_expiration_sweeper};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inizializza il logging (rispetta RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,calendar_server=debug")),
        )
        .init();

    info!("Starting calendar server v{}", env!("CARGO_PKG_VERSION"));

    // Inizializza la configurazione
    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    config.print_info();

    // Database e migrazioni
    let pool = database::connect(&config.database_url, config.max_connections).await?;
    database::run_migrations(&pool).await?;

    // Worker delle notifiche e stato condiviso
    let (notifier, notification_worker) =
        NotificationDispatcher::spawn(NotificationRepository::new(pool.clone()));
    let state = Arc::new(AppState::new(pool.clone(), config.jwt_secret.clone(), notifier));

    // Sweeper delle scadenze in background
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = spawn_expiration_sweeper(
        state.ledger.clone(),
        SweeperConfig::from(&config),
        shutdown_rx,
    );

    // Crea il router
    let app = calendar_server::create_router(state.clone());

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("HTTP server failed: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    // Ferma lo sweeper, poi lascia svuotare la coda delle notifiche
    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        error!("Expiration sweeper panicked: {}", e);
    }
    drop(state);
    if tokio::time::timeout(std::time::Duration::from_secs(5), notification_worker)
        .await
        .is_err()
    {
        error!("Notification worker did not drain in time");
    }

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}
