/// Application configuration module
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SPACEX_API_URL: &str = "https://api.spacexdata.com/v4";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_AUTH_STATE_PATH: &str = ".spacex-explorer/local-storage.json";
pub const DEFAULT_PATIENCE_SECONDS: u64 = 5;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub spacex_api_url: String,
    pub bind_addr: String,
    pub auth_state_path: PathBuf,
    pub patience: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spacex_api_url: DEFAULT_SPACEX_API_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            auth_state_path: PathBuf::from(DEFAULT_AUTH_STATE_PATH),
            patience: Duration::from_secs(DEFAULT_PATIENCE_SECONDS),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let spacex_api_url = env::var("SPACEX_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_SPACEX_API_URL.to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let auth_state_path = env::var("AUTH_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_AUTH_STATE_PATH));

        let patience = Duration::from_secs(env_u64("PATIENCE_SECONDS", DEFAULT_PATIENCE_SECONDS));

        if spacex_api_url.is_empty() {
            anyhow::bail!("SPACEX_API_URL must not be empty");
        }

        Ok(Self {
            spacex_api_url,
            bind_addr,
            auth_state_path,
            patience,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
