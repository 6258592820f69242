//! API route definitions

use super::{handlers::*, ApiState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create launch submission and status routes
pub fn create_launch_routes() -> Router<ApiState> {
    Router::new().route("/api/launch", post(submit_launch).get(admission_status))
}

/// Create token listing and mint-reservation routes
pub fn create_token_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/tokens", get(list_tokens))
        .route("/api/create-token", post(create_token))
}
