use actix_web::{web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;

use ai_content_service::service::models::{ModelManager, MODEL_ID};
use ai_content_service::utils::config::HfToken;
use ai_content_service::utils::init;
use ai_content_service::Locales;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化应用配置和日志系统
    let config = init::init()
        .await
        .context("初始化应用程序失败")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // 启动时校验模型仓库访问凭证，缺失直接退出
    let token = HfToken::from_env()?;

    // 初始化本地化系统
    let mut locales = Locales::new(&config.locales.path.clone()).expect("加载本地化文件失败");
    locales.set_default(&config.locales.default.clone()).expect("设置默认语言失败");
    let locales = Arc::new(locales);

    // 进程启动时同步加载模型，加载失败视为致命错误
    let manager = ModelManager::new();
    manager.load(&config, &token).await.map_err(ai_content_service::AppError::from)?;
    info!("模型加载完成: {}", MODEL_ID);

    let server_config = config.clone();
    let host = server_config.server.host.clone();
    let port = server_config.server.port;
    let shutdown_timeout = server_config.server.shutdown_timeout;

    let locales_data = web::Data::new(locales.clone());
    let manager_data = web::Data::new(manager.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_config.clone()))
            .app_data(locales_data.clone())
            .app_data(manager_data.clone())
            .app_data(web::PayloadConfig::new(1024 * 1024)) // 1MB payload limit
            .wrap(ai_content_service::middleware::Logging)
            .wrap(ai_content_service::middleware::error_handler::error_handler())
            .configure(ai_content_service::routes::route::configure)
    })
    .client_request_timeout(std::time::Duration::from_secs(30)) // 客户端请求超时30秒
    .bind((host, port))?
    .shutdown_timeout(shutdown_timeout) // 优雅关闭等待时间
    .run()
    .await
}
