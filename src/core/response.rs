//! 核心响应处理模块

use serde::Serialize;

pub const USER_CREATED: &str = "user create successfully";
pub const USERS_RETRIEVED: &str = "users retrieved successfully";
pub const USER_UPDATED: &str = "user updated successfully";
pub const USER_DELETED: &str = "user deleted successfully";

/// 成功响应：`{"message": ..., "data": ...}`，`data` 可省略
#[derive(Debug, Serialize)]
pub struct MessageResponse<T = ()> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}

impl<T> MessageResponse<T> {
    pub fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

/// 错误响应：`{"error": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
