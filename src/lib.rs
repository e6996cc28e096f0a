pub mod api;
pub mod config;
pub mod middleware;
pub mod server;
pub mod store;
pub mod tmdb;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::store::WatchlistRepo;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Store(#[from] store::StoreError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str) -> Result<(), ServerError> {
    let config = config::Config::from_file(config_path)?;

    info!("Using config file: {}", config_path);

    let api_key = config.tmdb_api_key().ok_or_else(|| {
        ServerError::Server(
            "No TMDB api key configured (set tmdb.api_key or the TMDB_API_KEY environment variable)"
                .to_string(),
        )
    })?;

    let tmdb = tmdb::TmdbClient::new(api_key, config.tmdb.base_url.clone())
        .map_err(|e| ServerError::Server(format!("Failed to create TMDB client: {}", e)))?;

    let watchlists: Arc<dyn WatchlistRepo> = match config.get_database_path() {
        Some(db_path) => {
            info!("Opening watchlist database at {}", db_path);
            Arc::new(store::SqliteWatchlistStore::new(&db_path).await?)
        }
        None => {
            info!("No database configured, keeping watchlists in memory");
            Arc::new(store::MemoryWatchlistStore::new())
        }
    };

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let has_tls = config.listen.tlscert.is_some() && config.listen.tlskey.is_some();

    let state = server::AppState::new(config.clone(), Arc::new(tmdb), watchlists);
    let app = server::build_router(state);

    if has_tls {
        let cert_path = config.listen.tlscert.as_ref().unwrap();
        let key_path = config.listen.tlskey.as_ref().unwrap();

        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .http1_only()
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
