use std::sync::Arc;
use ort::session::Session;
use tokenizers::Tokenizer;

use super::error::ClassifierError;
use super::inference::SequenceClassification;
use super::utils::{argmax, softmax};
use crate::category::Category;
use crate::ModelCharacteristics;

/// A thread-safe transaction classifier using an ONNX sequence classification model.
///
/// # Thread Safety
///
/// This type is automatically `Send + Sync` because all of its fields are thread-safe:
/// - `String` and `ModelCharacteristics` are `Send + Sync`
/// - `Arc<T>` provides thread-safe shared ownership
/// - `Tokenizer` and `Session` are wrapped in `Arc`
///
/// Single-thread usage:
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use centavo::{TransactionClassifier, BuiltinModel};
///
/// let classifier = TransactionClassifier::builder()
///     .with_model(BuiltinModel::TransactionDistilBert)?
///     .build()?;
///
/// let category = classifier.predict("UPI payment to grocery store")?;
/// println!("Category: {}", category);
/// # Ok(())
/// # }
/// ```
///
/// Multi-thread usage:
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use centavo::{TransactionClassifier, BuiltinModel};
/// use std::sync::Arc;
/// use std::thread;
///
/// let classifier = Arc::new(TransactionClassifier::builder()
///     .with_model(BuiltinModel::TransactionDistilBert)?
///     .build()?);
///
/// let classifier_clone = Arc::clone(&classifier);
/// thread::spawn(move || {
///     classifier_clone.predict("Monthly EMI payment").unwrap();
/// });
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TransactionClassifier {
    pub model_path: String,
    pub tokenizer_path: String,
    pub tokenizer: Arc<Tokenizer>,
    pub session: Arc<Session>,
    pub model_characteristics: ModelCharacteristics,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<TransactionClassifier>();
    }
};

impl SequenceClassification for TransactionClassifier {
    fn tokenizer(&self) -> Option<&Tokenizer> {
        Some(&self.tokenizer)
    }

    fn session(&self) -> Option<&Session> {
        Some(&self.session)
    }
}

impl TransactionClassifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            tokenizer_path: self.tokenizer_path.clone(),
            num_classes: Category::COUNT,
            class_labels: Category::ALL.iter().map(|c| c.label()).collect(),
            max_sequence_length: self.model_characteristics.max_sequence_length,
        }
    }

    /// Counts the tokens the model will see for this text, after truncation
    /// to the model's maximum sequence length.
    pub fn count_tokens(&self, text: &str) -> Result<usize, ClassifierError> {
        SequenceClassification::count_tokens(self, text)
    }

    /// Predicts the category of a transaction description.
    ///
    /// Input longer than the model's maximum sequence length is truncated,
    /// never rejected.
    ///
    /// # Arguments
    /// * `text` - The transaction description to classify
    ///
    /// # Example
    /// ```no_run
    /// # use centavo::{TransactionClassifier, BuiltinModel};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let classifier = TransactionClassifier::builder()
    /// #     .with_model(BuiltinModel::TransactionDistilBert)?
    /// #     .build()?;
    /// let category = classifier.predict("Salary credited to account")?;
    /// println!("Predicted category: {}", category);
    /// # Ok(())
    /// # }
    /// ```
    pub fn predict(&self, text: &str) -> Result<Category, ClassifierError> {
        let (category, _scores) = self.predict_with_scores(text)?;
        Ok(category)
    }

    /// Predicts the category of a transaction description and returns the
    /// probability assigned to every category.
    ///
    /// # Arguments
    /// * `text` - The transaction description to classify
    ///
    /// # Returns
    /// A tuple containing:
    /// * The predicted category (the one with the highest probability; ties
    ///   resolve to the earliest category in `Category::ALL`)
    /// * A vector of (category, probability) pairs covering all categories,
    ///   in `Category::ALL` order, summing to 1.0
    ///
    /// # Example
    /// ```no_run
    /// # use centavo::{TransactionClassifier, BuiltinModel};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let classifier = TransactionClassifier::builder()
    /// #     .with_model(BuiltinModel::TransactionDistilBert)?
    /// #     .build()?;
    /// let (category, scores) = classifier.predict_with_scores("Electricity bill paid online")?;
    /// println!("Predicted category: {}", category);
    /// for (candidate, probability) in scores {
    ///     println!("{}: {:.4}", candidate, probability);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn predict_with_scores(
        &self,
        text: &str,
    ) -> Result<(Category, Vec<(Category, f32)>), ClassifierError> {
        if text.is_empty() {
            return Err(ClassifierError::ValidationError("Input text cannot be empty".into()));
        }

        let logits = self.logits_for_text(text)?;
        if logits.len() != Category::COUNT {
            return Err(ClassifierError::PredictionError(format!(
                "Model returned {} logits for {} categories",
                logits.len(),
                Category::COUNT
            )));
        }

        let probabilities = softmax(&logits);
        let best_index = argmax(&probabilities)
            .ok_or_else(|| ClassifierError::PredictionError("Model returned no logits".into()))?;
        let category = Category::from_index(best_index).ok_or_else(|| {
            ClassifierError::PredictionError(format!(
                "Predicted class index {} is out of range",
                best_index
            ))
        })?;

        let scores = Category::ALL.iter().copied().zip(probabilities).collect();
        Ok((category, scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuiltinModel, ModelManager};

    async fn setup_test_classifier() -> Result<TransactionClassifier, Box<dyn std::error::Error>> {
        let manager = ModelManager::new_default()?;
        let model = BuiltinModel::TransactionDistilBert;

        manager.ensure_model_downloaded(model).await?;
        assert!(manager.is_model_downloaded(model));

        let classifier = TransactionClassifier::builder()
            .with_model(model)?
            .build()?;

        Ok(classifier)
    }

    #[test]
    fn test_model_characteristics() {
        let characteristics = BuiltinModel::TransactionDistilBert.characteristics();
        assert_eq!(characteristics.num_labels, Category::COUNT);
        assert_eq!(characteristics.max_sequence_length, 64);
    }

    #[tokio::test]
    #[ignore = "requires downloaded model files"]
    async fn test_classifier_info() -> Result<(), Box<dyn std::error::Error>> {
        let classifier = setup_test_classifier().await?;
        let info = classifier.info();
        assert_eq!(info.num_classes, Category::COUNT);
        assert!(info.class_labels.contains(&"Grocery"));
        assert_eq!(info.max_sequence_length, 64);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires downloaded model files"]
    async fn test_prediction_covers_all_categories() -> Result<(), Box<dyn std::error::Error>> {
        let classifier = setup_test_classifier().await?;
        let (category, scores) = classifier.predict_with_scores("UPI payment to grocery store")?;

        assert_eq!(scores.len(), Category::COUNT);
        assert!(scores.iter().any(|(c, _)| *c == category));
        let total: f32 = scores.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-4);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires downloaded model files"]
    async fn test_empty_input_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let classifier = setup_test_classifier().await?;
        let result = classifier.predict("");
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
        Ok(())
    }
}
