use ai_content_service::service::generation::content_generation::GenerationParams;
use ai_content_service::service::models::distilgpt2::config::ModelConfig;
use ai_content_service::service::models::distilgpt2::infer::TextGeneration;
use ai_content_service::service::models::distilgpt2::transformer::Gpt2Transformer;
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use tokenizers::Tokenizer;

// 与 tiny_config 的 vocab_size 对应的 10 词词表
const TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": null,
  "pre_tokenizer": { "type": "Whitespace" },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": {
      "<unk>": 0,
      "hello": 1,
      "world": 2,
      "red": 3,
      "green": 4,
      "blue": 5,
      "sky": 6,
      "sun": 7,
      "moon": 8,
      "star": 9
    },
    "unk_token": "<unk>"
  }
}"#;

fn tiny_config() -> ModelConfig {
    ModelConfig {
        vocab_size: 10,
        n_positions: 12,
        n_embd: 8,
        n_layer: 1,
        n_head: 2,
        layer_norm_epsilon: 1e-5,
        eos_token_id: None,
    }
}

fn tiny_generator() -> TextGeneration {
    let device = Device::cuda_if_available(0).unwrap();
    let vb = VarBuilder::zeros(DType::F32, &device);
    let config = tiny_config();
    let transformer = Gpt2Transformer::new(&config, vb).unwrap();
    let tokenizer = Tokenizer::from_bytes(TOKENIZER_JSON.as_bytes()).unwrap();
    TextGeneration::new(transformer, tokenizer, device, &config)
}

fn params(max_length: usize) -> GenerationParams {
    GenerationParams { max_length, temperature: 0.7, top_p: 0.9, repetition_penalty: 1.2 }
}

#[test]
fn test_generated_text_starts_with_prompt_and_respects_max_length() {
    let generator = tiny_generator();

    let text = generator.generate("hello world", &params(6)).unwrap();

    assert!(text.starts_with("hello world"), "unexpected output: {}", text);
    // 词表中的词都不含空格，词数即 token 数
    assert_eq!(text.split_whitespace().count(), 6);
}

#[test]
fn test_successive_calls_share_no_state() {
    let generator = tiny_generator();

    let first = generator.generate("hello world", &params(5)).unwrap();
    let second = generator.generate("hello world", &params(5)).unwrap();

    // 两次调用互不影响：都满足同样的契约（采样本身允许不同结果）
    for text in [first, second] {
        assert!(text.starts_with("hello world"));
        assert_eq!(text.split_whitespace().count(), 5);
    }
}

#[test]
fn test_empty_prompt_is_rejected_without_panicking() {
    let generator = tiny_generator();

    assert!(generator.generate("", &params(6)).is_err());
}

#[test]
fn test_prompt_at_or_past_max_length_is_rejected() {
    let generator = tiny_generator();

    // prompt 已有 2 个 token，max_length=2 时没有续写空间
    assert!(generator.generate("hello world", &params(2)).is_err());
}

#[test]
fn test_zero_max_length_is_rejected() {
    let generator = tiny_generator();

    assert!(generator.generate("hello", &params(0)).is_err());
}

#[test]
fn test_invalid_sampling_parameters_are_rejected() {
    let generator = tiny_generator();

    let mut bad = params(6);
    bad.temperature = f32::NAN;
    assert!(generator.generate("hello", &bad).is_err());

    let mut bad = params(6);
    bad.top_p = 1.5;
    assert!(generator.generate("hello", &bad).is_err());
}
