//! The remote replication endpoint: a small axum service that accepts the
//! user/vital creations drained from client outboxes.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod db;
pub mod entities;
mod error;
mod system;
mod users;
mod vitals;

pub use db::ServerStore;
pub use error::ApiError;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: ServerStore,
}

pub async fn create_app_state(db_url: &str) -> anyhow::Result<Arc<AppState>> {
    let store = ServerStore::new(db_url).await?;
    Ok(Arc::new(AppState { store }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/users", post(users::create_user))
        .route("/vitals", post(vitals::create_vital));

    Router::new()
        .route("/health", get(system::health))
        .nest("/api", api_router)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

/// Run the endpoint until the process is stopped.
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let db_url = if config.database_path.is_empty() {
        format!("sqlite:{}", db::default_server_database_path().display())
    } else {
        format!("sqlite:{}", config.database_path)
    };

    let state = create_app_state(&db_url).await?;
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Replication endpoint listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
