use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use rust_i18n::t;
use safetensors::SafeTensorError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Model error: {0}")]
    Model(String),
    #[error("Model not loaded: {0}")]
    ModelNotReady(String),
    #[error("Candle error: {0}")]
    Candle(#[from] candle_core::Error),
    #[error("SafeTensor error: {0}")]
    SafeTensor(#[from] SafeTensorError),
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Validation error: {0}")]
    Validation(ValidationDetails),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Not Found")]
    NotFound,
    #[error("Generic error: {0}")]
    Generic(String),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ValidationDetails {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field: {}, Message: {}", self.field, self.message)
    }
}

/// 统一的错误响应格式
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub code: u32,
    pub status: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl AppError {
    fn status(&self) -> (u32, String) {
        match self {
            AppError::InvalidParameter(_) | AppError::Validation(_) => {
                (400, t!("errors.http.bad_request").to_string())
            }
            AppError::NotFound => (404, t!("errors.http.not_found").to_string()),
            AppError::ModelNotReady(_) | AppError::Network(_) => {
                (503, t!("errors.http.service_unavailable").to_string())
            }
            _ => (500, t!("errors.http.internal_server_error").to_string()),
        }
    }
}

impl From<crate::service::models::ModelError> for AppError {
    fn from(err: crate::service::models::ModelError) -> Self {
        use crate::service::models::ModelError;
        match err {
            ModelError::NotLoaded(msg) => AppError::ModelNotReady(msg),
            other => AppError::Model(other.to_string()),
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        let (code, status) = error.status();
        let data = match error {
            AppError::Validation(details) => serde_json::to_value(details).ok(),
            _ => None,
        };
        ErrorResponse { code, status, message: error.to_string(), data }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let response = ErrorResponse::from(self);
        let status_code = StatusCode::from_u16(response.code as u16).unwrap_or_else(|_| {
            log::error!("Invalid status code in error response: {}", response.code);
            StatusCode::INTERNAL_SERVER_ERROR
        });
        HttpResponse::build(status_code).content_type(ContentType::json()).json(response)
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
