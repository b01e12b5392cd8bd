//! A thread-safe transaction classifier library and HTTP service built on
//! ONNX sequence classification models.
//!
//! # Basic Usage
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use centavo::{TransactionClassifier, BuiltinModel, ModelManager};
//!
//! let manager = ModelManager::new_default()?;
//! manager.ensure_model_downloaded(BuiltinModel::TransactionDistilBert).await?;
//!
//! let classifier = TransactionClassifier::builder()
//!     .with_model(BuiltinModel::TransactionDistilBert)?
//!     .build()?;
//!
//! let category = classifier.predict("Monthly EMI payment for home loan")?;
//! println!("Predicted category: {}", category);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is thread-safe and can be shared across threads using `Arc`:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use centavo::{TransactionClassifier, BuiltinModel};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let classifier = Arc::new(TransactionClassifier::builder()
//!     .with_model(BuiltinModel::TransactionDistilBert)?
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let classifier = Arc::clone(&classifier);
//!     handles.push(thread::spawn(move || {
//!         classifier.predict("UPI payment to grocery store").unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
mod category;
pub mod classifier;
pub mod config;
pub mod error;
pub mod handler;
pub mod healthcheck;
pub mod model_manager;
pub mod models;
pub mod port;
mod runtime;

pub use category::Category;
pub use classifier::{ClassifierBuilder, ClassifierError, ClassifierInfo, TransactionClassifier};
pub use error::ServiceError;
pub use healthcheck::{healthcheck, healthcheck_with_port};
pub use model_manager::{ModelManager, ModelError};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo};
pub use port::CategoryPredictor;
pub use runtime::{RuntimeConfig, create_session_builder};

pub fn init_logger() {
    env_logger::init();
}
