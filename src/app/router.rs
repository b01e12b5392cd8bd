use crate::handler::classify::classify_handler;
use crate::handler::health::health_handler;
use crate::port::CategoryPredictor;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Build the HTTP router (health + classify).
pub fn main_router(predictor: Arc<dyn CategoryPredictor>) -> Router {
    let health_router = Router::new().route("/health", get(health_handler));

    let classify_router = Router::new()
        .route("/classify", post(classify_handler))
        .with_state(predictor);

    Router::new().merge(health_router).merge(classify_router)
}
