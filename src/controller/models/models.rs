use crate::service::models::{ModelManager, MODEL_ID};
use crate::utils::AppConfig;
pub use crate::Locales;
use actix_web::{get, web, HttpResponse};
use serde_json::json;
use std::sync::Arc;

#[get("/models")]
pub async fn list_models(
    manager: web::Data<ModelManager>,
    config: web::Data<Arc<AppConfig>>,
    locales: web::Data<Arc<Locales>>,
) -> HttpResponse {
    let status = manager.status(config.get_ref()).await;

    HttpResponse::Ok().json(json!({
        "models": [{
            "id": MODEL_ID,
            "name": locales.t("models.distilgpt2"),
            "description": locales.t("models.distilgpt2_description"),
            "is_cached": status.is_cached,
            "is_loaded": status.is_loaded
        }]
    }))
}
