//! 用户处理器
//!
//! 每个处理器按 解析请求体 -> 解析 ID -> 调用服务 -> 映射结果 的顺序执行。
//! 请求体以原始字节接收，自行解析，保证格式错误统一返回 400。

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::info;

use super::{
    model::{User, UserPayload},
    service::UserService,
};
use crate::core::{
    error::{ApiError, ServiceError},
    response::{
        ErrorResponse, MessageResponse, USERS_RETRIEVED, USER_CREATED, USER_DELETED, USER_UPDATED,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

impl AppState {
    pub fn new(user_service: UserService) -> Self {
        Self { user_service }
    }
}

/// 请求体读取失败（如超过大小限制）按格式错误处理
fn decode_body(body: Result<Bytes, BytesRejection>) -> Result<UserPayload, ServiceError> {
    let body = body.map_err(|rejection| ServiceError::InvalidInput(rejection.body_text()))?;
    UserPayload::from_json(&body)
}

/// 路径参数无法解码（如非 UTF-8）按无效 ID 处理
fn path_id(id: Result<Path<String>, PathRejection>) -> Result<String, ServiceError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ServiceError::InvalidIdentifier(rejection.body_text()))
}

/// POST /create/user
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let payload = decode_body(body)?;
    let id = state.user_service.create_user(payload).await?;
    info!(user_id = %id, "用户已创建");
    Ok((StatusCode::CREATED, Json(MessageResponse::new(USER_CREATED))))
}

/// GET /get/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse<Vec<User>>>, ApiError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(MessageResponse::with_data(USERS_RETRIEVED, users)))
}

/// PUT /update/user/:id
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let payload = decode_body(body)?;
    let id = path_id(id)?;
    state.user_service.update_user(&id, payload).await?;
    info!(user_id = %id, "用户已更新");
    Ok(Json(MessageResponse::new(USER_UPDATED)))
}

/// DELETE /delete/user/:id
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = path_id(id)?;
    state.user_service.delete_user(&id).await?;
    info!(user_id = %id, "用户已删除");
    Ok(Json(MessageResponse::new(USER_DELETED)))
}

/// 路径存在但方法不匹配
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("method not allowed")),
    )
}

/// 未匹配任何路由
pub async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("route not found")),
    )
}
