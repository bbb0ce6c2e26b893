use actix_web::{test, web, App};
use ai_content_service::middleware::error_handler::error_handler;
use ai_content_service::routes;
use ai_content_service::service::models::ModelManager;
use ai_content_service::utils::AppConfig;
use std::sync::Arc;

#[actix_web::test]
async fn test_malformed_json_body_is_rendered_as_error_envelope() {
    // JsonConfig 的 error_handler 负责把反序列化错误转成统一响应格式
    let config = Arc::new(AppConfig::load("config/app.yml").expect("config should parse"));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(config))
            .app_data(web::Data::new(ModelManager::new()))
            .wrap(error_handler())
            .configure(routes::route::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/ai-content/generate-content")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not valid json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().is_some());
}

#[actix_web::test]
async fn test_handler_errors_keep_their_status_through_the_middleware() {
    let config = Arc::new(AppConfig::load("config/app.yml").expect("config should parse"));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(config))
            .app_data(web::Data::new(ModelManager::new()))
            .wrap(error_handler())
            .configure(routes::route::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/ai-content/generate-content")
        .set_json(serde_json::json!({ "prompt": "Hello" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);
}

#[actix_web::test]
async fn test_unknown_route_returns_404() {
    let app = test::init_service(App::new().wrap(error_handler()).configure(routes::route::configure)).await;

    let req = test::TestRequest::get().uri("/api/ai-content/nonexistent").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}
