//! Transformer sentiment model run through `tract-onnx`.
//!
//! The model directory holds `model.onnx` (a sequence-classification export
//! with `input_ids` and `attention_mask` inputs and three logits in
//! negative/neutral/positive order) and the matching HuggingFace
//! `tokenizer.json`.

use crate::domain::error::DomainError;
use crate::domain::ports::sentiment_classifier::SentimentClassifier;
use crate::domain::values::sentiment::softmax;
use std::path::Path;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};
use tract_onnx::prelude::*;

pub const DEFAULT_MAX_TOKENS: usize = 512;

pub struct OnnxSentimentClassifier {
    plan: TypedRunnableModel<TypedModel>,
    tokenizer: Tokenizer,
    model_id: String,
    max_tokens: usize,
}

impl std::fmt::Debug for OnnxSentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxSentimentClassifier")
            .field("model_id", &self.model_id)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl OnnxSentimentClassifier {
    /// Load tokenizer and model from `model_dir`, specializing the graph to a
    /// fixed `[1, max_tokens]` input. Every input is padded or truncated to
    /// that length.
    pub fn load(model_dir: &Path, model_id: &str, max_tokens: usize) -> Result<Self, DomainError> {
        if max_tokens == 0 {
            return Err(DomainError::InvalidInput("max_tokens must be > 0".into()));
        }

        let tokenizer_path = model_dir.join("tokenizer.json");
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            DomainError::Model(format!(
                "tokenizer load failed ({}): {e}",
                tokenizer_path.display()
            ))
        })?;
        let pad_token = "<pad>".to_string();
        let pad_id = tokenizer.token_to_id(&pad_token).unwrap_or(1);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_tokens,
                ..Default::default()
            }))
            .map_err(|e| DomainError::Model(format!("tokenizer truncation failed: {e}")))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(max_tokens),
            pad_id,
            pad_token,
            ..Default::default()
        }));

        let model_path = model_dir.join("model.onnx");
        let shape = tvec!(1, max_tokens);
        let plan = tract_onnx::onnx()
            .model_for_path(&model_path)
            .map_err(|e| {
                DomainError::Model(format!("onnx load failed ({}): {e}", model_path.display()))
            })?
            .with_input_fact(0, InferenceFact::dt_shape(i64::datum_type(), shape.clone()))
            .map_err(|e| DomainError::Model(format!("onnx input fact failed: {e}")))?
            .with_input_fact(1, InferenceFact::dt_shape(i64::datum_type(), shape))
            .map_err(|e| DomainError::Model(format!("onnx input fact failed: {e}")))?
            .into_optimized()
            .map_err(|e| DomainError::Model(format!("onnx optimize failed: {e}")))?
            .into_runnable()
            .map_err(|e| DomainError::Model(format!("onnx runnable failed: {e}")))?;

        tracing::info!(model = model_id, dir = %model_dir.display(), "sentiment model loaded");

        Ok(Self {
            plan,
            tokenizer,
            model_id: model_id.to_string(),
            max_tokens,
        })
    }

    fn tensor(&self, values: &[u32]) -> Result<TValue, DomainError> {
        let data: Vec<i64> = values.iter().map(|v| i64::from(*v)).collect();
        let arr = tract_ndarray::ArrayD::<i64>::from_shape_vec(
            tract_ndarray::IxDyn(&[1, self.max_tokens]),
            data,
        )
        .map_err(|e| DomainError::Model(format!("onnx input reshape failed: {e}")))?;
        Ok(arr.into_tvalue())
    }
}

impl SentimentClassifier for OnnxSentimentClassifier {
    fn classify(&self, text: &str) -> Result<[f64; 3], DomainError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| DomainError::Model(format!("tokenization failed: {e}")))?;

        let ids = self.tensor(encoding.get_ids())?;
        let mask = self.tensor(encoding.get_attention_mask())?;

        let outputs = self
            .plan
            .run(tvec!(ids, mask))
            .map_err(|e| DomainError::Model(format!("onnx run failed: {e}")))?;
        let logits = outputs
            .first()
            .ok_or_else(|| DomainError::Model("onnx produced no outputs".into()))?
            .to_array_view::<f32>()
            .map_err(|e| DomainError::Model(format!("onnx output decode failed: {e}")))?
            .iter()
            .map(|v| f64::from(*v))
            .collect::<Vec<_>>();

        if logits.len() != 3 {
            return Err(DomainError::Model(format!(
                "expected 3 logits, got {}",
                logits.len()
            )));
        }
        let probs = softmax(&logits);
        Ok([probs[0], probs[1], probs[2]])
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
