use centavo::{BuiltinModel, ModelManager};

#[test]
fn test_model_paths_follow_registry_name() {
    let manager = ModelManager::new("/tmp/centavo-test-paths/models").unwrap();
    let model = BuiltinModel::TransactionDistilBert;

    let model_path = manager.get_model_path(model);
    let tokenizer_path = manager.get_tokenizer_path(model);

    assert!(model_path.ends_with("transaction-distilbert/model.onnx"));
    assert!(tokenizer_path.ends_with("transaction-distilbert/tokenizer.json"));
}

#[test]
fn test_missing_model_is_not_downloaded() {
    let manager = ModelManager::new("/tmp/centavo-test-missing/models").unwrap();
    let model = BuiltinModel::TransactionDistilBert;

    // Clean up any existing files
    manager.remove_download(model).unwrap();

    assert!(!manager.is_model_downloaded(model));
    assert!(!manager.verify_model(model).unwrap());
}

#[test]
fn test_corrupted_files_fail_verification() {
    let manager = ModelManager::new("/tmp/centavo-test-corrupt/models").unwrap();
    let model = BuiltinModel::TransactionDistilBert;

    let model_path = manager.get_model_path(model);
    let tokenizer_path = manager.get_tokenizer_path(model);
    std::fs::create_dir_all(model_path.parent().unwrap()).unwrap();
    std::fs::write(&model_path, b"corrupted data").unwrap();
    std::fs::write(&tokenizer_path, b"also corrupted").unwrap();

    // Both files exist, so the model counts as downloaded, but the hashes
    // cannot match the registry
    assert!(manager.is_model_downloaded(model));
    assert!(!manager.verify_model(model).unwrap());

    manager.remove_download(model).unwrap();
    assert!(!manager.is_model_downloaded(model));
}

#[tokio::test]
#[ignore = "downloads model files"]
async fn test_model_download_and_verify() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ModelManager::new("/tmp/centavo-test-download/models")?;
    let model = BuiltinModel::TransactionDistilBert;

    manager.remove_download(model)?;
    assert!(!manager.is_model_downloaded(model));

    manager.download_model(model).await?;
    assert!(manager.is_model_downloaded(model));
    assert!(manager.verify_model(model)?);

    Ok(())
}
