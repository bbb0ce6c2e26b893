use crate::error::AppError;
use crate::service::models::ModelManager;

/// 单次生成调用的采样参数，默认值来自配置文件 `generation.defaults`
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// prompt 与续写合计的 token 上限
    pub max_length: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
}

pub struct ContentGenerationService;

impl Default for ContentGenerationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentGenerationService {
    pub fn new() -> Self {
        Self
    }

    pub async fn generate(
        &self,
        manager: &ModelManager,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, AppError> {
        manager.generate(prompt, params).await
    }
}
