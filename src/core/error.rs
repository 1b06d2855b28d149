//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

use super::response::ErrorResponse;

/// 文档存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 启动阶段无法建立连接
    #[error("无法连接文档存储: {0}")]
    Connection(String),
    /// 启动阶段 ping 失败
    #[error("文档存储不可达: {0}")]
    Connectivity(String),
    #[error("文档存储操作超时 ({0:?})")]
    Timeout(Duration),
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
    #[error("{0}")]
    Backend(String),
}

/// 业务服务错误
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("请求体解析失败: {0}")]
    InvalidInput(String),
    #[error("无效的用户 ID `{0}`")]
    InvalidIdentifier(String),
    #[error("用户不存在")]
    NotFound,
    #[error("读取用户失败: {0}")]
    StoreRead(#[source] StoreError),
    #[error("写入用户失败: {0}")]
    StoreWrite(#[source] StoreError),
}

/// 错误类型到 (状态码, 对外错误信息) 的映射表
///
/// 内部原因不会出现在响应体里，只写日志。
pub fn status_for(err: &ServiceError) -> (StatusCode, &'static str) {
    match err {
        ServiceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid request format"),
        ServiceError::InvalidIdentifier(_) => (StatusCode::BAD_REQUEST, "invalid id format"),
        ServiceError::NotFound => (StatusCode::BAD_REQUEST, "user not found"),
        ServiceError::StoreRead(_) => (StatusCode::INTERNAL_SERVER_ERROR, "failed to retrieve users"),
        ServiceError::StoreWrite(_) => (StatusCode::INTERNAL_SERVER_ERROR, "failed to write user"),
    }
}

/// HTTP 层错误，包装 [`ServiceError`]
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = status_for(&self.0);

        if status.is_server_error() {
            error!(error = %self.0, "请求处理失败");
        } else {
            warn!(error = %self.0, "请求被拒绝");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_bad_request() {
        let cases = [
            (ServiceError::InvalidInput("EOF".into()), "invalid request format"),
            (ServiceError::InvalidIdentifier("xyz".into()), "invalid id format"),
            (ServiceError::NotFound, "user not found"),
        ];
        for (err, message) in cases {
            assert_eq!(status_for(&err), (StatusCode::BAD_REQUEST, message));
        }
    }

    #[test]
    fn store_errors_map_to_server_error_without_cause() {
        let read = ServiceError::StoreRead(StoreError::Backend("socket reset".into()));
        let write = ServiceError::StoreWrite(StoreError::Timeout(Duration::from_secs(5)));

        let (status, message) = status_for(&read);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("socket"));

        let (status, message) = status_for(&write);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "failed to write user");
    }

    #[tokio::test]
    async fn api_error_renders_error_body() {
        let response = ApiError(ServiceError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "user not found" }));
    }
}
