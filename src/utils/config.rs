use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashMap;

/// 模型仓库访问凭证的环境变量名
pub const HF_API_KEY_VAR: &str = "HUGGINGFACE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalesConfig {
    pub path: String,
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Generation {
    pub defaults: GenerationDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationDefaults {
    pub max_length: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub hf_hub_id: String,
    pub model_files: ModelFiles,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelFiles {
    pub weights: Vec<String>,
    pub config: String,
    pub tokenizer: String,
    pub tokenizer_config: String,
    pub generation_config: String,
}

impl ModelFiles {
    /// 模型缓存目录中必须存在的全部文件
    pub fn all(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self.weights.iter().map(String::as_str).collect();
        files.push(&self.config);
        files.push(&self.tokenizer);
        files.push(&self.tokenizer_config);
        files.push(&self.generation_config);
        files
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub locales: LocalesConfig,
    pub models: HashMap<String, ModelConfig>,
    pub models_cache_dir: String,
    pub generation: Generation,
}

impl AppConfig {
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let config_file = std::fs::File::open(config_path)?;
        let config: Self = serde_yaml::from_reader(config_file)?;
        Ok(config)
    }

    pub fn get_model_config(&self, model_id: &str) -> anyhow::Result<ModelConfig> {
        self.models
            .get(model_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Model config not found for {}", model_id))
    }
}

/// HuggingFace Hub 访问令牌
///
/// 进程启动时从环境变量读取一次，之后显式传递，不再隐式读取环境。
pub struct HfToken(String);

impl HfToken {
    /// Reads the token from `HUGGINGFACE_API_KEY`.
    ///
    /// A missing or empty variable is rejected as a configuration error.
    pub fn from_env() -> crate::error::Result<Self> {
        match std::env::var(HF_API_KEY_VAR) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(value)),
            _ => Err(AppError::Config(format!(
                "{} is not set; it is required to fetch model files from the HuggingFace Hub",
                HF_API_KEY_VAR
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for HfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HfToken(***)")
    }
}
