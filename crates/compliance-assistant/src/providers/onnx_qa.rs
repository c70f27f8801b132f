//! ONNX-based extractive question answering
//!
//! Loads a fine-tuned QA model exported to ONNX (e.g. tinyroberta-squad2)
//! together with its HuggingFace tokenizer. The model must expose
//! `start_logits` and `end_logits` outputs.

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use tokenizers::{Tokenizer, TruncationParams, TruncationStrategy};

use crate::config::QaModelConfig;
use crate::error::{Error, Result};
use crate::providers::qa::{best_span, QaAnswer, QaPipeline};

/// ONNX Runtime QA pipeline
pub struct OnnxQaPipeline {
    /// ONNX Runtime session
    session: Mutex<Session>,
    /// HuggingFace tokenizer, truncating the context side
    tokenizer: Tokenizer,
    /// Whether the graph takes `token_type_ids` (BERT yes, RoBERTa no)
    uses_token_types: bool,
    /// Longest answer span in tokens
    max_answer_len: usize,
    /// "cuda" or "cpu"
    device: String,
}

impl OnnxQaPipeline {
    /// Load the model and tokenizer from `config.model_dir`
    pub fn load(config: &QaModelConfig) -> Result<Self> {
        let model_path = config.model_path();
        let tokenizer_path = config.tokenizer_path();

        tracing::info!("Loading QA model from {}", model_path.display());

        if !model_path.exists() {
            return Err(Error::Config(format!(
                "QA model not found at {}",
                model_path.display()
            )));
        }

        let mut builder = Session::builder()
            .map_err(|e| Error::inference(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::inference(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(4)
            .map_err(|e| Error::inference(format!("Failed to set threads: {}", e)))?;

        let device = Self::register_device(&mut builder, config.use_gpu)?;

        let session = builder
            .commit_from_file(&model_path)
            .map_err(|e| Error::inference(format!("Failed to load model: {}", e)))?;

        let uses_token_types = session
            .inputs
            .iter()
            .any(|input| input.name == "token_type_ids");

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::inference(format!("Failed to load tokenizer: {}", e)))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_length,
                strategy: TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(|e| Error::inference(format!("Failed to configure truncation: {}", e)))?;
        tokenizer.with_padding(None);

        tracing::info!("QA pipeline ready on {}", device);

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            uses_token_types,
            max_answer_len: config.max_answer_len,
            device,
        })
    }

    #[cfg(feature = "cuda")]
    fn register_device(
        builder: &mut ort::session::builder::SessionBuilder,
        use_gpu: bool,
    ) -> Result<String> {
        use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};

        if !use_gpu {
            return Ok("cpu".to_string());
        }

        let cuda = CUDAExecutionProvider::default();
        match cuda.is_available() {
            Ok(true) => {
                cuda.register(builder).map_err(|e| {
                    Error::inference(format!("Failed to register CUDA provider: {}", e))
                })?;
                Ok("cuda".to_string())
            }
            _ => {
                tracing::warn!("CUDA requested but not available, falling back to CPU");
                Ok("cpu".to_string())
            }
        }
    }

    #[cfg(not(feature = "cuda"))]
    fn register_device(
        _builder: &mut ort::session::builder::SessionBuilder,
        use_gpu: bool,
    ) -> Result<String> {
        if use_gpu {
            tracing::info!("Built without the `cuda` feature; running QA on CPU");
        }
        Ok("cpu".to_string())
    }

    /// Run the graph and return (start_logits, end_logits)
    fn run_model(
        &self,
        input_ids: Vec<i64>,
        attention_mask: Vec<i64>,
        token_type_ids: Vec<i64>,
    ) -> Result<(Vec<f32>, Vec<f32>)> {
        let seq_len = input_ids.len();

        let input_ids_tensor = Tensor::from_array((vec![1, seq_len], input_ids.into_boxed_slice()))
            .map_err(|e| Error::inference(format!("Input tensor creation failed: {}", e)))?;
        let attention_mask_tensor =
            Tensor::from_array((vec![1, seq_len], attention_mask.into_boxed_slice())).map_err(
                |e| Error::inference(format!("Attention mask tensor creation failed: {}", e)),
            )?;

        let mut inputs = vec![
            ("input_ids", input_ids_tensor.into_dyn()),
            ("attention_mask", attention_mask_tensor.into_dyn()),
        ];
        if self.uses_token_types {
            let token_type_tensor =
                Tensor::from_array((vec![1, seq_len], token_type_ids.into_boxed_slice()))
                    .map_err(|e| {
                        Error::inference(format!("Token type tensor creation failed: {}", e))
                    })?;
            inputs.push(("token_type_ids", token_type_tensor.into_dyn()));
        }

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs)
            .map_err(|e| Error::inference(format!("Inference failed: {}", e)))?;

        let output_iter: Vec<_> = outputs.iter().collect();
        let logits_for = |name: &str, position: usize| -> Result<Vec<f32>> {
            let value = output_iter
                .iter()
                .find(|(n, _)| *n == name)
                .or_else(|| output_iter.get(position))
                .map(|(_, v)| v)
                .ok_or_else(|| Error::inference(format!("Missing output tensor {}", name)))?;
            let (_, data) = value
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::inference(format!("Failed to extract {}: {}", name, e)))?;
            Ok(data.to_vec())
        };

        let start_logits = logits_for("start_logits", 0)?;
        let end_logits = logits_for("end_logits", 1)?;
        Ok((start_logits, end_logits))
    }
}

impl QaPipeline for OnnxQaPipeline {
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer> {
        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(|e| Error::inference(format!("Tokenization failed: {}", e)))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        // Sequence 1 is the context; special tokens map to None.
        let context_mask: Vec<bool> = encoding
            .get_sequence_ids()
            .iter()
            .map(|seq| *seq == Some(1))
            .collect();

        let (start_logits, end_logits) = self.run_model(input_ids, attention_mask, token_type_ids)?;

        let span = best_span(&start_logits, &end_logits, &context_mask, self.max_answer_len)
            .ok_or_else(|| Error::inference("No answer span found in context"))?;

        let offsets = encoding.get_offsets();
        let start = offsets[span.start].0;
        let end = offsets[span.end].1;
        let answer = context
            .get(start..end)
            .ok_or_else(|| Error::inference("Answer offsets fall outside the context"))?
            .to_string();

        Ok(QaAnswer {
            answer,
            score: span.score,
            start,
            end,
        })
    }

    fn device(&self) -> &str {
        &self.device
    }
}
