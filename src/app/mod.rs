mod router;
pub mod server;
mod state;

use crate::config;
use crate::error::ServiceError;
use log::info;

/// Application entry point. Loads configuration, prepares the model, and
/// starts the HTTP server.
pub async fn run(fresh: bool, port_override: Option<u16>) -> Result<(), ServiceError> {
    let mut settings =
        config::get_configuration().map_err(|e| ServiceError::Config(e.to_string()))?;
    if let Some(port) = port_override {
        settings.http_port = port;
    }
    settings.validate()?;
    info!("Loaded settings");

    let predictor = state::init_predictor(&settings, fresh).await?;

    let app = router::main_router(predictor);
    server::serve(app, settings.http_port).await
}
