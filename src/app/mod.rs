//! 应用层：路由与处理器

pub mod users;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::core::middleware::request_logging_middleware;
use users::{handler, AppState};

/// 构建完整的路由表
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/create/user", post(handler::create_user))
        .route("/get/users", get(handler::list_users))
        .route("/update/user/:id", put(handler::update_user))
        .route("/delete/user/:id", delete(handler::delete_user))
        .fallback(handler::route_not_found)
        .method_not_allowed_fallback(handler::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
