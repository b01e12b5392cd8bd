use log::info;

/// Handler for GET /health
pub async fn health_handler() -> &'static str {
    info!("Health check requested");
    "Healthy"
}
