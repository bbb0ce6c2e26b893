use candle_core::{Device, IndexOp, Tensor};
use rust_i18n::t;
use tokenizers::Tokenizer;

use super::config::ModelConfig;
use super::sampler::LogitsSampler;
use super::transformer::Gpt2Transformer;
use crate::error::AppError;
use crate::service::generation::content_generation::GenerationParams;

/// 自回归文本生成循环
///
/// 每一步把当前序列整体喂给 transformer，对末位 logits 采样出下一个
/// token，直到序列达到 `max_length` 或产出 eos。
pub struct TextGeneration {
    transformer: Gpt2Transformer,
    tokenizer: Tokenizer,
    device: Device,
    eos_token_id: Option<u32>,
    max_position_embeddings: usize,
}

impl TextGeneration {
    pub fn new(
        transformer: Gpt2Transformer,
        tokenizer: Tokenizer,
        device: Device,
        config: &ModelConfig,
    ) -> Self {
        Self {
            transformer,
            tokenizer,
            device,
            eos_token_id: config.eos_token_id,
            max_position_embeddings: config.n_positions,
        }
    }

    /// 生成以 prompt 开头、总长不超过 `params.max_length` 个 token 的文本
    pub fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, AppError> {
        if params.max_length == 0 {
            return Err(AppError::InvalidParameter(
                t!("errors.validation.max_length_range").to_string(),
            ));
        }
        let sampler =
            LogitsSampler::new(params.temperature, params.top_p, params.repetition_penalty)?;

        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| AppError::Tokenizer(e.to_string()))?;
        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Err(AppError::InvalidParameter(
                t!("errors.validation.empty_prompt").to_string(),
            ));
        }
        if tokens.len() >= params.max_length || tokens.len() > self.max_position_embeddings {
            return Err(AppError::InvalidParameter(
                t!("errors.validation.prompt_too_long").to_string(),
            ));
        }

        let prompt_tokens = tokens.len();
        log::debug!("开始生成: prompt {} tokens, max_length {}", prompt_tokens, params.max_length);

        while tokens.len() < params.max_length {
            let input = Tensor::new(tokens.as_slice(), &self.device)?.unsqueeze(0)?;
            let logits = self.transformer.forward(&input)?;
            let last = logits.i((0, tokens.len() - 1))?;
            let mut logits_vec: Vec<f32> = last.to_vec1()?;

            sampler.penalize_repeats(&mut logits_vec, &tokens);
            let next = sampler.sample(&logits_vec)?;

            if self.eos_token_id == Some(next) {
                break;
            }
            tokens.push(next);
        }

        log::debug!("生成结束: 共 {} tokens，其中续写 {}", tokens.len(), tokens.len() - prompt_tokens);

        self.tokenizer
            .decode(&tokens, true)
            .map_err(|e| AppError::Tokenizer(e.to_string()))
    }
}
