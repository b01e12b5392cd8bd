use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use super::error::ClassifierError;

/// Configures truncation and padding so every encoding fits within
/// `max_length` tokens. Over-long input is truncated, never rejected.
pub(crate) fn configure_tokenizer(
    tokenizer: &mut Tokenizer,
    max_length: usize,
) -> Result<(), ClassifierError> {
    tokenizer
        .with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }))
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;
    Ok(())
}

/// Extracts the single logits row from a `[batch_size, num_labels]` output
/// tensor. Any other output rank is an error, not a slice.
fn logits_row(output: ndarray::ArrayViewD<'_, f32>) -> Result<Vec<f32>, ClassifierError> {
    if output.ndim() != 2 {
        return Err(ClassifierError::ModelError(format!(
            "Expected logits of shape [batch_size, num_labels], got a rank-{} tensor",
            output.ndim()
        )));
    }
    let row = output.slice(ndarray::s![0, ..]);
    Ok(row.iter().copied().collect())
}

/// Runs sequence classification through ONNX models.
///
/// Implementors provide the tokenizer and session; the trait handles the
/// conversion of text into model inputs and the extraction of class logits:
/// 1. Encoding of input text (the tokenizer is configured to truncate to
///    the model's maximum sequence length)
/// 2. Building the input_ids and attention_mask tensors
/// 3. Running the ONNX model
/// 4. Extracting the logits row for the single input sequence
///
/// The ONNX model is expected to:
/// - Accept two inputs: input_ids and attention_mask (both shape [batch_size, sequence_length])
/// - Output logits of shape [batch_size, num_labels]
pub(crate) trait SequenceClassification {
    /// Returns the initialized tokenizer if available
    fn tokenizer(&self) -> Option<&Tokenizer>;

    /// Returns the initialized ONNX session if available
    fn session(&self) -> Option<&Session>;

    /// Counts the tokens the model will see for this text, after truncation.
    ///
    /// # Errors
    /// - `TokenizerError` if the tokenizer is not initialized
    /// - `TokenizerError` if the text cannot be encoded
    fn count_tokens(&self, text: &str) -> Result<usize, ClassifierError> {
        let tokenizer = self
            .tokenizer()
            .ok_or_else(|| ClassifierError::TokenizerError("Tokenizer not initialized".into()))?;

        tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))
            .map(|encoding| encoding.get_ids().len())
    }

    /// Converts text into token IDs suitable for model input.
    ///
    /// Truncation to the model's maximum sequence length happens inside the
    /// tokenizer, so arbitrarily long input never fails here.
    ///
    /// # Errors
    /// - `TokenizerError` if the tokenizer is not initialized
    /// - `TokenizerError` if the text cannot be encoded
    fn tokenize(&self, text: &str) -> Result<Vec<u32>, ClassifierError> {
        let tokenizer = self
            .tokenizer()
            .ok_or_else(|| ClassifierError::TokenizerError("Tokenizer not initialized".into()))?;

        let encoding = tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    /// Runs the model over the token IDs and returns the raw class logits.
    ///
    /// # Model Input Format
    /// - input_ids: Token IDs [batch_size=1, sequence_length]
    /// - attention_mask: 1 for real tokens, 0 for padding [batch_size=1, sequence_length]
    ///
    /// # Model Output Format
    /// - Shape: [batch_size=1, num_labels]
    /// - The single logits row ([0, ..]) scores every category
    ///
    /// # Errors
    /// - `ModelError` if the session is not initialized
    /// - `ModelError` if tensor creation fails
    /// - `ModelError` if model execution fails
    /// - `ModelError` if output extraction fails
    /// - `ModelError` if the output is not a `[batch_size, num_labels]` tensor
    fn class_logits(&self, tokens: &[u32]) -> Result<Vec<f32>, ClassifierError> {
        let session = self
            .session()
            .ok_or_else(|| ClassifierError::ModelError("Session not initialized".into()))?;

        let input_array = Array2::from_shape_vec((1, tokens.len()),
            tokens.iter().map(|&x| x as i64).collect())
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input array: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let input_ids = input_dyn.as_standard_layout();

        let mask_array = Array2::from_shape_vec((1, tokens.len()),
            tokens.iter().map(|&x| if x == 0 { 0i64 } else { 1i64 }).collect())
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create mask array: {}", e)))?;
        let mask_dyn = mask_array.into_dyn();
        let attention_mask = mask_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert("input_ids", Tensor::from_array(&input_ids)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input tensor: {}", e)))?);
        input_tensors.insert("attention_mask", Tensor::from_array(&attention_mask)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create mask tensor: {}", e)))?);

        let outputs = session.run(input_tensors)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::ModelError(format!("Failed to extract output tensor: {}", e)))?;

        logits_row(output_tensor)
    }

    /// Tokenizes text and returns its class logits in one step.
    ///
    /// # Errors
    /// - Forwards all errors from `tokenize()` and `class_logits()`
    fn logits_for_text(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
        let tokens = self.tokenize(text)?;
        self.class_logits(&tokens)
    }
}
