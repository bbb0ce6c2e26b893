use crate::utils::config::HfToken;
use anyhow::Result;
use hf_hub::api::tokio::ApiBuilder;
use std::path::{Path, PathBuf};

pub struct ModelDownloader;

impl ModelDownloader {
    /// 从 HuggingFace Hub 下载指定的模型文件到本地缓存目录
    ///
    /// 下载经由凭证认证；hf-hub 自身的缓存路径与 `cache_dir` 不同时会复制一份。
    pub async fn fetch_model_files(
        token: &HfToken,
        hf_hub_id: &str,
        files: &[&str],
        cache_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let api = ApiBuilder::new().with_token(Some(token.as_str().to_string())).build()?;
        let repo = api.model(hf_hub_id.to_string());

        let mut fetched = Vec::with_capacity(files.len());
        for file in files {
            log::info!("正在下载模型文件: {}/{}", hf_hub_id, file);
            let downloaded = repo.get(file).await?;
            let target = cache_dir.join(file);
            if downloaded != target {
                std::fs::copy(&downloaded, &target)?;
            }
            fetched.push(target);
        }
        Ok(fetched)
    }
}
