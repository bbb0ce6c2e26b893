use crate::entities::GeneratedContent;
use crate::error::{AppError, ValidationDetails};
use crate::service::generation::content_generation::{
    ContentGenerationService, GenerationParams,
};
use crate::service::models::ModelManager;
use crate::utils::AppConfig;
use actix_web::{post, web, HttpResponse};
use chrono::Utc;
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub prompt: String,
    pub max_length: Option<usize>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub repetition_penalty: Option<f32>,
}

#[post("/generate-content")]
pub async fn generate_content(
    manager: web::Data<ModelManager>,
    config: web::Data<Arc<AppConfig>>,
    req: web::Json<GenerateContentRequest>,
) -> Result<HttpResponse, AppError> {
    let request_id = Uuid::new_v4();
    let start_time = Utc::now();

    log::info!("[{}] Received content generation request", request_id);
    log::debug!("[{}] Request details: {:?}", request_id, req);

    // 原始路由对缺失 prompt 返回 400；纯空白也按空处理
    if req.prompt.trim().is_empty() {
        log::warn!("[{}] Empty prompt field in request", request_id);
        return Err(AppError::Validation(ValidationDetails {
            field: "prompt".to_string(),
            message: t!("errors.validation.prompt_required").to_string(),
        }));
    }

    let defaults = &config.generation.defaults;
    let params = GenerationParams {
        max_length: req.max_length.unwrap_or(defaults.max_length),
        temperature: req.temperature.unwrap_or(defaults.temperature),
        top_p: req.top_p.unwrap_or(defaults.top_p),
        repetition_penalty: req.repetition_penalty.unwrap_or(defaults.repetition_penalty),
    };
    log::debug!("[{}] Using generation parameters: {:?}", request_id, params);

    let service = ContentGenerationService::new();
    let text = service.generate(manager.get_ref(), &req.prompt, &params).await?;

    let duration = Utc::now() - start_time;
    log::info!(
        "[{}] Successfully generated content in {}ms",
        request_id,
        duration.num_milliseconds()
    );

    Ok(HttpResponse::Ok().json(GeneratedContent {
        content: text.trim().to_string(),
        prompt: req.prompt.clone(),
    }))
}
