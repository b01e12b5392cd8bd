use crate::category::Category;
use crate::classifier::{ClassifierError, TransactionClassifier};

/// Category prediction seam between the HTTP layer and the model runtime.
///
/// Object-safe so handlers can hold the predictor behind `Arc<dyn CategoryPredictor>`.
pub trait CategoryPredictor: Send + Sync {
    fn predict_category(&self, description: &str) -> Result<Category, ClassifierError>;
}

impl CategoryPredictor for TransactionClassifier {
    fn predict_category(&self, description: &str) -> Result<Category, ClassifierError> {
        self.predict(description)
    }
}
