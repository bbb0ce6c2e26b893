//! 生成接口冒烟测试客户端
//!
//! 向运行中的服务发送一条示例 prompt 并打印响应，成功与否都不会 panic。
//! 可用第一个命令行参数覆盖目标地址。

use serde_json::json;

const DEFAULT_URL: &str = "http://localhost:3000/api/ai-content/generate-content";

const SAMPLE_PROMPT: &str = "Describe a breathtaking AI-generated image of a sunset over a \
                             mountain range. The colors, the mood, and the atmosphere should be \
                             detailed.";

#[tokio::main]
async fn main() {
    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());
    let client = reqwest::Client::new();

    println!("Sending request to generate content...");
    let result = client.post(&url).json(&json!({ "prompt": SAMPLE_PROMPT })).send().await;

    match result {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.is_success() {
                println!("Generated Content: {}", body);
            } else {
                eprintln!("Error: server returned {}", status);
                eprintln!("Response data: {}", body);
            }
        }
        Err(error) => {
            eprintln!("Error: {}", error);
        }
    }
}
