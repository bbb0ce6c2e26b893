use crate::error::{AppError, ValidationDetails};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use std::future::Future;
use std::pin::Pin;

impl From<ActixError> for AppError {
    fn from(err: ActixError) -> Self {
        let status = err.as_response_error().status_code();
        let message = err.to_string();
        log::error!("请求处理失败: status={}, error={}", status, message);

        match status {
            StatusCode::NOT_FOUND => AppError::NotFound,
            StatusCode::BAD_REQUEST => AppError::Validation(ValidationDetails {
                field: "request".to_string(),
                message,
            }),
            _ => AppError::Generic(message),
        }
    }
}

/// 将路由层逃逸出来的错误（如 JSON 反序列化失败）统一渲染为
/// `{code, status, message, data}` 响应格式
pub struct ErrorHandlerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = ActixError;
    type Transform = ErrorHandlerService<S>;
    type InitError = ();
    type Future = Pin<Box<dyn Future<Output = Result<Self::Transform, Self::InitError>>>>;

    fn new_transform(&self, service: S) -> Self::Future {
        Box::pin(async move { Ok(ErrorHandlerService { service }) })
    }
}

pub struct ErrorHandlerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let req_parts = req.request().clone();

        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(res.map_into_boxed_body()),
                Err(err) => {
                    log::error!("Request failed: {} {}", req_parts.method(), req_parts.uri());

                    // 处理器自身的 AppError 保留原始分类，其余错误按状态码归类
                    let response = if let Some(app_error) = err.as_error::<AppError>() {
                        app_error.error_response()
                    } else {
                        AppError::from(err).error_response()
                    };

                    Ok(ServiceResponse::new(req_parts, response.map_into_boxed_body()))
                }
            }
        })
    }
}

pub fn error_handler() -> ErrorHandlerMiddleware {
    ErrorHandlerMiddleware
}
