use std::sync::Arc;
use tokenizers::Tokenizer;
use ort::session::Session;
use log::{info, error};

use super::error::ClassifierError;
use super::inference::{configure_tokenizer, SequenceClassification};
use super::model::TransactionClassifier;
use crate::category::Category;
use crate::{BuiltinModel, ModelCharacteristics, runtime::{RuntimeConfig, create_session_builder}, ModelManager};

/// A builder for constructing a TransactionClassifier with a fluent interface.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    tokenizer_path: Option<String>,
    tokenizer: Option<Tokenizer>,
    session: Option<Session>,
    model_characteristics: Option<ModelCharacteristics>,
    runtime_config: RuntimeConfig,
}

impl SequenceClassification for ClassifierBuilder {
    /// Returns a reference to the tokenizer if it exists
    fn tokenizer(&self) -> Option<&Tokenizer> {
        self.tokenizer.as_ref()
    }

    /// Returns a reference to the ONNX session if it exists
    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use centavo::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            model_path: None,
            tokenizer_path: None,
            tokenizer: None,
            session: None,
            model_characteristics: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution
    ///
    /// # Arguments
    /// * `config` - The RuntimeConfig containing settings for ONNX Runtime execution
    ///
    /// # Example
    /// ```
    /// use centavo::{ClassifierBuilder, RuntimeConfig};
    ///
    /// let config = RuntimeConfig::default();
    /// let builder = ClassifierBuilder::new()
    ///     .with_runtime_config(config);
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the model to use for classification using a built-in model type
    ///
    /// # Arguments
    /// * `model` - The BuiltinModel variant to use (e.g., TransactionDistilBert)
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The model paths are already set
    ///   - The model is not downloaded
    ///   - The model or tokenizer failed to load
    ///   - The model structure is invalid
    ///
    /// # Example
    /// ```
    /// use centavo::{ClassifierBuilder, BuiltinModel};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_model(BuiltinModel::TransactionDistilBert);
    /// ```
    pub fn with_model(mut self, model: BuiltinModel) -> Result<Self, ClassifierError> {
        if self.model_path.is_some() || self.tokenizer_path.is_some() {
            return Err(ClassifierError::BuildError("Model and tokenizer paths already set".to_string()));
        }

        // Initialize model manager with default location
        let manager = ModelManager::new_default()
            .map_err(|e| ClassifierError::BuildError(format!("Failed to create model manager: {}", e)))?;

        // Check if model is downloaded
        if !manager.is_model_downloaded(model) {
            return Err(ClassifierError::BuildError(format!(
                "Model '{:?}' is not downloaded. Please download it first using ModelManager::download_model()",
                model
            )));
        }

        // Get paths
        let model_path = manager.get_model_path(model);
        let tokenizer_path = manager.get_tokenizer_path(model);

        let characteristics = model.characteristics();

        // Load tokenizer
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| {
                error!("Failed to load tokenizer: {}", e);
                ClassifierError::BuildError(format!("Failed to load tokenizer: {}", e))
            })?;
        configure_tokenizer(&mut tokenizer, characteristics.max_sequence_length)?;

        info!("Tokenizer loaded successfully");

        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(&model_path)?;

        // Validate model structure
        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        // Store model characteristics
        self.model_characteristics = Some(characteristics);

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.tokenizer_path = Some(tokenizer_path.to_string_lossy().to_string());
        self.tokenizer = Some(tokenizer);
        self.session = Some(session);
        Ok(self)
    }

    /// Sets a custom model and tokenizer path for the classifier
    ///
    /// The model must be a sequence classification model whose output head
    /// scores exactly the categories in `Category::ALL`, in that order.
    ///
    /// # Arguments
    /// * `model_path` - Path to the ONNX model file
    /// * `tokenizer_path` - Path to the tokenizer file
    /// * `max_sequence_length` - Optional maximum sequence length for the model. If not provided,
    ///   defaults to 64 tokens. This determines the maximum length of text that can be processed
    ///   before truncation.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The model or tokenizer paths are empty
    ///   - The paths are already set
    ///   - The files don't exist
    ///   - The model or tokenizer failed to load
    ///   - The model structure is invalid
    ///   - The model's output width does not match the category set
    ///
    /// # Example
    /// ```
    /// use centavo::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_custom_model(
    ///         "path/to/model.onnx",
    ///         "path/to/tokenizer.json",
    ///         Some(128)  // Custom sequence length
    ///     );
    /// ```
    pub fn with_custom_model(
        mut self,
        model_path: &str,
        tokenizer_path: &str,
        max_sequence_length: Option<usize>,
    ) -> Result<Self, ClassifierError> {
        if model_path.is_empty() || tokenizer_path.is_empty() {
            return Err(ClassifierError::BuildError("Model and tokenizer paths cannot be empty".to_string()));
        }
        if self.model_path.is_some() || self.tokenizer_path.is_some() {
            return Err(ClassifierError::BuildError("Model and tokenizer paths already set".to_string()));
        }

        // Validate paths exist
        if !std::path::Path::new(model_path).exists() {
            return Err(ClassifierError::BuildError(format!("Model file not found: {}", model_path)));
        }
        if !std::path::Path::new(tokenizer_path).exists() {
            return Err(ClassifierError::BuildError(format!("Tokenizer file not found: {}", tokenizer_path)));
        }

        let max_sequence_length = max_sequence_length.unwrap_or(64); // Default to the built-in model's limit

        // Load tokenizer
        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| {
                error!("Failed to load tokenizer: {}", e);
                ClassifierError::BuildError(format!("Failed to load tokenizer: {}", e))
            })?;
        configure_tokenizer(&mut tokenizer, max_sequence_length)?;

        info!("Tokenizer loaded successfully");

        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(model_path)?;

        // Validate model structure
        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        self.model_characteristics = Some(ModelCharacteristics {
            num_labels: Category::COUNT,
            max_sequence_length,
            model_size_mb: 0, // Unknown for user-supplied files
        });
        self.tokenizer = Some(tokenizer);
        self.session = Some(session);

        // Verify the classification head width by running a test input
        let test_text = "Test input to verify the classification head";
        let logits = self.logits_for_text(test_text)?;
        if logits.len() != Category::COUNT {
            return Err(ClassifierError::BuildError(format!(
                "Model produces {} output logits but {} categories are expected",
                logits.len(),
                Category::COUNT
            )));
        }
        info!("Verified classification head with {} labels", logits.len());

        self.model_path = Some(model_path.to_string());
        self.tokenizer_path = Some(tokenizer_path.to_string());
        Ok(self)
    }

    /// Builds and returns the final TransactionClassifier instance
    ///
    /// # Returns
    /// * `Result<TransactionClassifier, ClassifierError>` - The constructed classifier if successful, or an error if:
    ///   - No model and tokenizer paths are set
    ///   - Model characteristics are not set
    ///   - The tokenizer or session failed to load
    ///
    /// # Example
    /// ```no_run
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use centavo::{ClassifierBuilder, BuiltinModel};
    ///
    /// let classifier = ClassifierBuilder::new()
    ///     .with_model(BuiltinModel::TransactionDistilBert)?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(mut self) -> Result<TransactionClassifier, ClassifierError> {
        if self.model_path.is_none() || self.tokenizer_path.is_none() {
            return Err(ClassifierError::BuildError("Model and tokenizer paths must be set".to_string()));
        }

        let model_characteristics = self.model_characteristics
            .take()
            .ok_or_else(|| ClassifierError::BuildError("Model characteristics not set".to_string()))?;

        let tokenizer = Arc::new(self.tokenizer.take()
            .ok_or_else(|| ClassifierError::BuildError("No tokenizer loaded".into()))?);
        let session = Arc::new(self.session.take()
            .ok_or_else(|| ClassifierError::BuildError("No ONNX model loaded".into()))?);

        let model_path = self.model_path.take()
            .ok_or_else(|| ClassifierError::BuildError("Model path not set".into()))?;
        let tokenizer_path = self.tokenizer_path.take()
            .ok_or_else(|| ClassifierError::BuildError("Tokenizer path not set".into()))?;

        Ok(TransactionClassifier {
            model_path,
            tokenizer_path,
            tokenizer,
            session,
            model_characteristics,
        })
    }

    /// Validates that the model has the expected input/output structure
    ///
    /// # Arguments
    /// * `session` - The ONNX Runtime session to validate
    ///
    /// # Returns
    /// * `Result<(), ClassifierError>` - Ok if validation passes, or an error if:
    ///   - The model doesn't have the required input tensors
    ///   - The model doesn't have any output tensors
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        // Check inputs
        let inputs = &session.inputs;
        if inputs.len() < 2 {
            return Err(ClassifierError::ModelError(
                format!("Model must have at least 2 inputs (input_ids and attention_mask), found {}", inputs.len())
            ));
        }

        // Check outputs
        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 output for class logits".to_string()
            ));
        }

        Ok(())
    }
}
