pub mod config;
pub mod infer;
pub mod loader;
pub mod sampler;
pub mod transformer;

use crate::error::AppError;
use crate::service::generation::content_generation::GenerationParams;
use crate::utils::config::{AppConfig, HfToken};

pub use self::config::ModelConfig;
pub use self::infer::TextGeneration;
pub use self::loader::ModelLoader;

use self::transformer::Gpt2Transformer;

/// DistilGPT-2 模型句柄：权重、tokenizer 与推理循环
pub struct DistilGpt2 {
    inference: TextGeneration,
}

impl DistilGpt2 {
    /// 确保模型文件在本地缓存中（缺失则下载），然后构建前向计算图和 tokenizer
    pub async fn load(app_config: &AppConfig, token: &HfToken) -> Result<Self, AppError> {
        let loader = ModelLoader::new(super::MODEL_ID, app_config, token).await?;
        let model_config = ModelConfig::from_file(loader.model_config_path())?;
        log::info!(
            "模型配置: layers={}, heads={}, hidden={}, vocab={}",
            model_config.n_layer,
            model_config.n_head,
            model_config.n_embd,
            model_config.vocab_size
        );

        let vb = loader.var_builder()?;
        let transformer = Gpt2Transformer::new(&model_config, vb)?;
        let tokenizer = loader.tokenizer()?;

        Ok(Self {
            inference: TextGeneration::new(
                transformer,
                tokenizer,
                loader.device().clone(),
                &model_config,
            ),
        })
    }

    /// 以 prompt 为上下文续写文本，返回包含 prompt 在内的完整序列
    pub fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, AppError> {
        self.inference.generate(prompt, params)
    }
}
