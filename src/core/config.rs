use dotenv::dotenv;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub sweep_interval_secs: u64,
    pub sweep_on_startup: bool,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let sweep_interval_secs = parse_sweep_interval(
            &env::var("SWEEP_INTERVAL_SECS").unwrap_or_else(|_| "3600".to_string()),
        )?;

        let sweep_on_startup = env::var("SWEEP_ON_STARTUP")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|_| "Invalid SWEEP_ON_STARTUP: must be 'true' or 'false'".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            sweep_interval_secs,
            sweep_on_startup,
            app_env,
        })
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server Configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Max DB Connections: {}", self.max_connections);
        info!("   Sweep Interval: {}s", self.sweep_interval_secs);
        info!("   Sweep On Startup: {}", self.sweep_on_startup);
        info!(
            "   JWT Secret: {}",
            if self.jwt_secret == DEFAULT_JWT_SECRET {
                "USING DEFAULT (INSECURE!)"
            } else {
                "custom secret configured"
            }
        );
    }

    /// Maschera l'URL del database per il logging: un URL sqlite è solo un path,
    /// qualsiasi altra cosa non viene mostrata
    fn mask_url(url: &str) -> String {
        if url.starts_with("sqlite:") {
            url.to_string()
        } else {
            "***".to_string()
        }
    }
}

/// Secondi tra due sweep: positivi e rappresentabili come timestamp
fn parse_sweep_interval(value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0 && i64::try_from(*secs).is_ok())
        .ok_or_else(|| {
            format!(
                "Invalid SWEEP_INTERVAL_SECS: must be a number between 1 and {}",
                i64::MAX
            )
        })
}
