use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sked_server::cache::{CacheConfig, EventCache};
use sked_server::config::Config;
use sked_server::parser::SkedParser;
use sked_server::sked::{SkedClient, SkedConfig};
use sked_server::timetable::TimetableService;
use sked_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    if config.sked_user.is_empty() || config.sked_password.is_empty() {
        warn!("SKED_USER / SKED_PASSWORD not set; upstream requests will fail");
    }

    let sked_config = SkedConfig::new(&config.sked_user, &config.sked_password)
        .with_base_url(&config.sked_url);
    let sked = SkedClient::new(sked_config).expect("failed to create sked client");

    let cache_config = CacheConfig {
        ttl: config.cache_ttl,
        path: config.cache_path.clone(),
        disabled: config.cache_disabled,
        ..CacheConfig::default()
    };
    let cache = EventCache::new(&cache_config);

    let service = TimetableService::new(sked, SkedParser, cache);
    let state = AppState::new(service);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("timetable server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
