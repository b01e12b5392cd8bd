use crate::classifier::TransactionClassifier;
use crate::config::Settings;
use crate::error::ServiceError;
use crate::model_manager::ModelManager;
use crate::models::BuiltinModel;
use crate::port::CategoryPredictor;
use crate::runtime::RuntimeConfig;
use log::info;
use std::sync::Arc;

/// Loads the built-in model and wraps it for the HTTP layer.
///
/// Downloads the model files on first run; `fresh` discards any cached copy
/// first. The returned predictor is shared read-only across all requests.
pub async fn init_predictor(
    settings: &Settings,
    fresh: bool,
) -> Result<Arc<dyn CategoryPredictor>, ServiceError> {
    let model = BuiltinModel::TransactionDistilBert;

    let manager = ModelManager::new_default().map_err(|e| ServiceError::Model(e.to_string()))?;
    if fresh {
        info!("Discarding any cached model files");
        manager
            .remove_download(model)
            .map_err(|e| ServiceError::Model(e.to_string()))?;
    }
    manager
        .ensure_model_downloaded(model)
        .await
        .map_err(|e| ServiceError::Model(e.to_string()))?;

    let runtime_config = RuntimeConfig {
        inter_threads: settings.inter_threads,
        intra_threads: settings.intra_threads,
        ..RuntimeConfig::default()
    };

    let classifier = TransactionClassifier::builder()
        .with_runtime_config(runtime_config)
        .with_model(model)
        .map_err(|e| ServiceError::Model(e.to_string()))?
        .build()
        .map_err(|e| ServiceError::Model(e.to_string()))?;

    let model_info = classifier.info();
    info!(
        "Model ready: {} categories, max sequence length {}",
        model_info.num_classes, model_info.max_sequence_length
    );

    Ok(Arc::new(classifier))
}
