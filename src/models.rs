use crate::category::Category;

/// Download and verification metadata for a model hosted in the registry
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Directory name the model files are stored under
    pub name: String,
    /// URL of the ONNX model file
    pub model_url: String,
    /// URL of the tokenizer file
    pub tokenizer_url: String,
    /// SHA-256 hash of the model file
    pub model_hash: String,
    /// SHA-256 hash of the tokenizer file
    pub tokenizer_hash: String,
}

/// Built-in models available for transaction classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// DistilBERT fine-tuned on transaction descriptions:
    /// - Scores the 8 transaction categories
    /// - Maximum sequence length: 64 tokens
    /// - Model size: ~255MB
    TransactionDistilBert,
}

/// Characteristics of a classification model
#[derive(Debug, Clone)]
pub struct ModelCharacteristics {
    /// Number of labels the classification head scores
    pub num_labels: usize,
    /// Maximum number of tokens per input sequence
    pub max_sequence_length: usize,
    /// Approximate model file size in megabytes
    pub model_size_mb: usize,
}

impl BuiltinModel {
    /// Returns the model's characteristics
    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            Self::TransactionDistilBert => ModelCharacteristics {
                num_labels: Category::COUNT,
                max_sequence_length: 64,
                model_size_mb: 255,
            },
        }
    }

    /// Returns the registry metadata used to download and verify the model
    pub fn get_model_info(&self) -> ModelInfo {
        match self {
            Self::TransactionDistilBert => ModelInfo {
                name: "transaction-distilbert".to_string(),
                model_url: "https://huggingface.co/centavo-ai/transaction-distilbert/resolve/main/model.onnx".to_string(),
                tokenizer_url: "https://huggingface.co/centavo-ai/transaction-distilbert/resolve/main/tokenizer.json".to_string(),
                model_hash: "e88a2679b75a14b5295549a6268fbe84b645512168205250960645f034da5d76".to_string(),
                tokenizer_hash: "648bcf66a033d6579141d08a2895fae523801f0c1f3d8ab1cc4c73b78e1f4711".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_metadata_is_complete() {
        let info = BuiltinModel::TransactionDistilBert.get_model_info();
        assert_eq!(info.name, "transaction-distilbert");
        assert!(info.model_url.ends_with("model.onnx"));
        assert!(info.tokenizer_url.ends_with("tokenizer.json"));
        assert_eq!(info.model_hash.len(), 64);
        assert_eq!(info.tokenizer_hash.len(), 64);
    }

    #[test]
    fn test_characteristics_match_category_set() {
        let characteristics = BuiltinModel::TransactionDistilBert.characteristics();
        assert_eq!(characteristics.num_labels, Category::COUNT);
        assert_eq!(characteristics.max_sequence_length, 64);
    }
}
