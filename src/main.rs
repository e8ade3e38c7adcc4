/// Application entry point
use spacex_explorer::auth::{AuthStore, FileFlagStorage};
use spacex_explorer::clients::SpaceXClient;
use spacex_explorer::config::AppConfig;
use spacex_explorer::detail::DetailComposer;
use spacex_explorer::guard::RouteGuard;
use spacex_explorer::handlers::AppState;
use spacex_explorer::listing::ListStore;
use spacex_explorer::notices::NoticeBoard;
use spacex_explorer::routes::build_router;
use spacex_explorer::services::LaunchService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Auth state, hydrated from the durable flag
    let storage = Arc::new(FileFlagStorage::new(config.auth_state_path.clone()));
    let auth = Arc::new(AuthStore::new(storage));
    info!(
        "Auth state restored from {:?} (authenticated: {})",
        config.auth_state_path,
        auth.is_authenticated()
    );

    // Initialize client and services
    let spacex_client = Arc::new(SpaceXClient::new(config.spacex_api_url.clone())?);
    info!("Using SpaceX API at {}", spacex_client.base_url());
    let launches = Arc::new(LaunchService::new(spacex_client, Arc::new(ListStore::new())));
    let composer = Arc::new(DetailComposer::new(launches.clone(), config.patience));

    // Initialize application state
    let state = AppState {
        auth,
        notices: Arc::new(NoticeBoard::new()),
        launches,
        composer,
        guard: RouteGuard::new(),
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("spacex_explorer listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
