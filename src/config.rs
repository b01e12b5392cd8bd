use std::env;

use crate::error::ServiceError;

/// Default port the HTTP server listens on.
pub const DEFAULT_HTTP_PORT: u16 = 5001;

#[derive(Debug)]
pub struct Settings {
    /// Main HTTP server port (classify + health)
    pub http_port: u16,
    /// Inter-op thread count for ONNX Runtime (0 lets the runtime decide)
    pub inter_threads: usize,
    /// Intra-op thread count for ONNX Runtime (0 lets the runtime decide)
    pub intra_threads: usize,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_port(self.http_port)?;
        Ok(())
    }
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ServiceError> {
    if port == 0 {
        return Err(ServiceError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

pub fn get_configuration() -> Result<Settings, Box<dyn std::error::Error>> {
    // Server port with default
    let http_port = env::var("HTTP_PORT")
        .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string())
        .parse::<u16>()?;

    // ONNX Runtime threading overrides, 0 keeps the runtime defaults
    let inter_threads = env::var("ONNX_INTER_THREADS")
        .unwrap_or_else(|_| "0".to_string())
        .parse::<usize>()?;
    let intra_threads = env::var("ONNX_INTRA_THREADS")
        .unwrap_or_else(|_| "0".to_string())
        .parse::<usize>()?;

    let settings = Settings {
        http_port,
        inter_threads,
        intra_threads,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}
