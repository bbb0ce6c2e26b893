use crate::error::{AppError, ValidationDetails};
use actix_web::web;
use rust_i18n::t;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // JSON 反序列化失败也渲染为统一的错误响应格式
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(ValidationDetails {
            field: "request".to_string(),
            message: format!("{}: {}", t!("errors.http.bad_request"), err),
        })
        .into()
    });

    cfg.app_data(json_config).service(
        web::scope("/api/ai-content")
            .service(crate::controller::content::generate_content)
            .service(crate::controller::models::list_models),
    );
}
