use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use axum_test::TestServer;
use centavo::handler::classify::classify_handler;
use centavo::handler::health::health_handler;
use centavo::{Category, CategoryPredictor, ClassifierError};
use std::sync::{Arc, Mutex};

/// Stub predictor that returns a fixed category and records what it was asked
struct StubPredictor {
    category: Category,
    seen: Arc<Mutex<Vec<String>>>,
}

impl StubPredictor {
    fn new(category: Category) -> Self {
        Self {
            category,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn seen_descriptions(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl CategoryPredictor for StubPredictor {
    fn predict_category(&self, description: &str) -> Result<Category, ClassifierError> {
        self.seen.lock().unwrap().push(description.to_string());
        Ok(self.category)
    }
}

/// Predictor that always fails, for exercising the error path
struct FailingPredictor;

impl CategoryPredictor for FailingPredictor {
    fn predict_category(&self, _description: &str) -> Result<Category, ClassifierError> {
        Err(ClassifierError::PredictionError("inference failed".into()))
    }
}

fn create_test_app(predictor: Arc<dyn CategoryPredictor>) -> Router {
    let health_router = Router::new().route("/health", get(health_handler));

    let classify_router = Router::new()
        .route("/classify", post(classify_handler))
        .with_state(predictor);

    Router::new().merge(health_router).merge(classify_router)
}

#[tokio::test]
async fn test_health_endpoint_returns_healthy() {
    let predictor: Arc<dyn CategoryPredictor> = Arc::new(StubPredictor::new(Category::Grocery));
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("Healthy");
}

#[tokio::test]
async fn test_classify_returns_predicted_category() {
    let stub = Arc::new(StubPredictor::new(Category::Grocery));
    let predictor: Arc<dyn CategoryPredictor> = stub.clone();
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/classify")
        .json(&serde_json::json!({"description": "UPI payment to grocery store"}))
        .await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({"category": "Grocery"}));

    // The predictor saw the description exactly as sent
    let seen = stub.seen_descriptions();
    assert_eq!(seen, vec!["UPI payment to grocery store".to_string()]);
}

#[tokio::test]
async fn test_classify_identical_requests_get_identical_responses() {
    let stub = Arc::new(StubPredictor::new(Category::Bills));
    let predictor: Arc<dyn CategoryPredictor> = stub.clone();
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let body = serde_json::json!({"description": "Electricity bill paid online"});
    let first = server.post("/classify").json(&body).await;
    let second = server.post("/classify").json(&body).await;

    first.assert_status_ok();
    second.assert_status_ok();
    first.assert_json(&serde_json::json!({"category": "Bills"}));
    assert_eq!(first.text(), second.text());

    // One predictor call per request, each with the same input
    assert_eq!(
        stub.seen_descriptions(),
        vec![
            "Electricity bill paid online".to_string(),
            "Electricity bill paid online".to_string()
        ]
    );
}

#[tokio::test]
async fn test_classify_serializes_emi_label_uppercase() {
    let predictor: Arc<dyn CategoryPredictor> = Arc::new(StubPredictor::new(Category::Emi));
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/classify")
        .json(&serde_json::json!({"description": "Monthly EMI payment for home loan"}))
        .await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({"category": "EMI"}));
}

#[tokio::test]
async fn test_classify_missing_description_returns_400() {
    let stub = Arc::new(StubPredictor::new(Category::Miscellaneous));
    let predictor: Arc<dyn CategoryPredictor> = stub.clone();
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server.post("/classify").json(&serde_json::json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&serde_json::json!({"error": "Missing transaction description"}));

    // The model was never invoked
    assert!(stub.seen_descriptions().is_empty());
}

#[tokio::test]
async fn test_classify_null_description_returns_400() {
    let predictor: Arc<dyn CategoryPredictor> = Arc::new(StubPredictor::new(Category::Income));
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/classify")
        .json(&serde_json::json!({"description": null}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&serde_json::json!({"error": "Missing transaction description"}));
}

#[tokio::test]
async fn test_classify_empty_description_returns_400() {
    let predictor: Arc<dyn CategoryPredictor> = Arc::new(StubPredictor::new(Category::Income));
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/classify")
        .json(&serde_json::json!({"description": ""}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&serde_json::json!({"error": "Missing transaction description"}));
}

#[tokio::test]
async fn test_classify_whitespace_description_is_classified() {
    let stub = Arc::new(StubPredictor::new(Category::Miscellaneous));
    let predictor: Arc<dyn CategoryPredictor> = stub.clone();
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/classify")
        .json(&serde_json::json!({"description": "   "}))
        .await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({"category": "Miscellaneous"}));
    assert_eq!(stub.seen_descriptions(), vec!["   ".to_string()]);
}

#[tokio::test]
async fn test_classify_model_failure_returns_500() {
    let predictor: Arc<dyn CategoryPredictor> = Arc::new(FailingPredictor);
    let app = create_test_app(predictor);
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/classify")
        .json(&serde_json::json!({"description": "Uber ride to airport"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&serde_json::json!({"error": "Classification failed"}));
}
