use serde::{Deserialize, Serialize};

/// 生成接口的响应体：模型输出加上原始 prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub content: String,
    pub prompt: String,
}
