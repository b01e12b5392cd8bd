mod builder;
mod error;
mod inference;
mod model;
pub mod utils;

pub use builder::ClassifierBuilder;
pub use error::ClassifierError;
pub use model::TransactionClassifier;

/// Information about the classifier's current state
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Path to the tokenizer file
    pub tokenizer_path: String,
    /// Number of categories the model scores
    pub num_classes: usize,
    /// The category labels, in classification head order
    pub class_labels: Vec<&'static str>,
    /// Maximum sequence length before truncation
    pub max_sequence_length: usize,
}
