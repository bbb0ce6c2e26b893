use crate::utils::config::{AppConfig, HfToken};
use crate::utils::download::ModelDownloader;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

/// 负责把模型文件落到本地缓存并从 safetensors 构建 VarBuilder
pub struct ModelLoader {
    weight_paths: Vec<PathBuf>,
    config_path: PathBuf,
    tokenizer_path: PathBuf,
    device: Device,
}

impl ModelLoader {
    pub async fn new(
        model_id: &str,
        config: &AppConfig,
        token: &HfToken,
    ) -> anyhow::Result<Self> {
        let model_config = config.get_model_config(model_id)?;

        // 如果缓存目录不存在则创建
        let cache_dir = Path::new(&config.models_cache_dir).join(&model_config.hf_hub_id);
        std::fs::create_dir_all(&cache_dir)?;

        // 仅下载缺失的文件
        let missing: Vec<&str> = model_config
            .model_files
            .all()
            .into_iter()
            .filter(|file| !cache_dir.join(file).exists())
            .collect();
        if !missing.is_empty() {
            ModelDownloader::fetch_model_files(
                token,
                &model_config.hf_hub_id,
                &missing,
                &cache_dir,
            )
            .await?;
        }

        let weight_paths = model_config
            .model_files
            .weights
            .iter()
            .map(|file| cache_dir.join(file))
            .collect();

        Ok(Self {
            weight_paths,
            config_path: cache_dir.join(&model_config.model_files.config),
            tokenizer_path: cache_dir.join(&model_config.model_files.tokenizer),
            device: Device::cuda_if_available(0)?,
        })
    }

    /// 读取全部权重分片到内存张量表
    pub fn load(&self) -> anyhow::Result<HashMap<String, Tensor>> {
        let mut model_tensors = HashMap::new();

        for weight_path in &self.weight_paths {
            let file = std::fs::File::open(weight_path)?;
            let mmap = unsafe { memmap2::MmapOptions::new().map(&file)? };
            let tensors = SafeTensors::deserialize(&mmap)?;

            for (name, _) in tensors.tensors() {
                let view = tensors.tensor(&name)?;
                let tensor = Tensor::from_raw_buffer(
                    view.data(),
                    view.dtype().try_into()?,
                    view.shape(),
                    &self.device,
                )?;
                model_tensors.insert(name.to_string(), tensor);
            }
        }

        Ok(model_tensors)
    }

    pub fn var_builder(&self) -> anyhow::Result<VarBuilder> {
        let model_tensors = self.load()?;
        Ok(VarBuilder::from_tensors(model_tensors, DType::F32, &self.device))
    }

    pub fn tokenizer(&self) -> anyhow::Result<Tokenizer> {
        Tokenizer::from_file(&self.tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))
    }

    pub fn model_config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}
