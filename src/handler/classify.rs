use crate::category::Category;
use crate::port::CategoryPredictor;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Error message returned when the request carries no usable description.
pub const MISSING_DESCRIPTION: &str = "Missing transaction description";

/// Request body for POST /classify
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// The transaction description to categorize. An absent key and an
    /// explicit `null` are both treated as missing.
    pub description: Option<String>,
}

/// Response body for a successful classification
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub category: Category,
}

/// Response body for a rejected or failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler for POST /classify
pub async fn classify_handler(
    State(predictor): State<Arc<dyn CategoryPredictor>>,
    Json(request): Json<ClassifyRequest>,
) -> Response {
    let description = request.description.unwrap_or_default();
    if description.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: MISSING_DESCRIPTION.to_string(),
            }),
        )
            .into_response();
    }

    match predictor.predict_category(&description) {
        Ok(category) => {
            debug!("Classified transaction as {category}");
            (StatusCode::OK, Json(ClassifyResponse { category })).into_response()
        }
        Err(e) => {
            error!("Failed to classify transaction: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Classification failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}
