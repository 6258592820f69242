//! REST API exposing the admission service

mod handlers;
mod responses;
mod routes;

pub use routes::*;

use crate::admission::AdmissionService;
use crate::config::ApiConfig;
use anyhow::Result;
use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Start the API server
pub async fn start_server(
    state: ApiState,
    config: &ApiConfig,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = create_app(state, config);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("API server listening on {}", config.bind_address);

    let handle = tokio::spawn(async move {
        // ConnectInfo supplies the peer address used as the rate-limit key
        // when no forwarding header is present.
        if let Err(e) = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(handle)
}

/// Create the API application
pub fn create_app(state: ApiState, config: &ApiConfig) -> Router {
    let app = Router::new()
        .merge(create_launch_routes())
        .merge(create_token_routes())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if config.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Health check handler
async fn health_handler() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "service": "launchpad-api"
    })))
}

/// Shared API state
#[derive(Clone)]
pub struct ApiState {
    pub admission: Arc<AdmissionService>,
}

impl ApiState {
    pub fn new(admission: Arc<AdmissionService>) -> Self {
        Self { admission }
    }
}
