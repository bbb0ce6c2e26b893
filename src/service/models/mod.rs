//! 模型服务实现
//!
//! 本模块提供管理文本生成模型的功能，包括：
//! - 模型下载和加载
//! - 模型状态跟踪
//! - 生成调用的分发

pub mod distilgpt2;

use crate::error::AppError;
use crate::service::generation::content_generation::GenerationParams;
use crate::utils::config::{AppConfig, HfToken};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

pub use distilgpt2::DistilGpt2;

/// 服务提供的唯一模型，对应配置文件 `models` 段中的条目
pub const MODEL_ID: &str = "distilgpt2";

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),
    #[error("Model initialization failed: {0}")]
    InitializationFailed(String),
    #[error("Model not loaded: {0}")]
    NotLoaded(String),
}

#[derive(Serialize, Deserialize, Clone, Copy)]
pub struct ModelStatus {
    /// 模型文件已全部存在于本地缓存
    pub is_cached: bool,
    /// 模型句柄已构建完成，可以接受生成请求
    pub is_loaded: bool,
}

/// 进程级模型句柄
///
/// 由 `main` 在启动时创建并完成一次性加载，随后以 `web::Data` 形式传入各
/// 处理器。加载完成后只读，生成调用之间不共享任何可变状态。
#[derive(Clone)]
pub struct ModelManager {
    model: Arc<RwLock<Option<DistilGpt2>>>,
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelManager {
    pub fn new() -> Self {
        Self { model: Arc::new(RwLock::new(None)) }
    }

    /// 下载缺失的模型文件并构建模型句柄
    ///
    /// 进程启动时调用一次；失败时进程不可用于生成，由调用方决定终止。
    pub async fn load(&self, config: &AppConfig, token: &HfToken) -> Result<(), ModelError> {
        let model = DistilGpt2::load(config, token)
            .await
            .map_err(|e| ModelError::InitializationFailed(format!("{}: {}", MODEL_ID, e)))?;
        *self.model.write().await = Some(model);
        Ok(())
    }

    pub async fn is_loaded(&self) -> bool {
        self.model.read().await.is_some()
    }

    /// 返回模型状态；缓存状态每次从磁盘重新检查
    pub async fn status(&self, config: &AppConfig) -> ModelStatus {
        let is_cached = config
            .get_model_config(MODEL_ID)
            .map(|mc| {
                let cache_dir =
                    std::path::Path::new(&config.models_cache_dir).join(&mc.hf_hub_id);
                mc.model_files.all().iter().all(|file| cache_dir.join(file).exists())
            })
            .unwrap_or(false);

        ModelStatus { is_cached, is_loaded: self.is_loaded().await }
    }

    /// 使用已加载的模型生成文本；模型未加载时返回 503 类错误
    pub async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, AppError> {
        let guard = self.model.read().await;
        let model = guard
            .as_ref()
            .ok_or_else(|| AppError::ModelNotReady(t!("errors.model.not_loaded").to_string()))?;
        model.generate(prompt, params)
    }
}
