//! # 无服务器用户 CRUD 服务
//!
//! 以 MongoDB 为文档存储的用户增删改查接口，可运行在 AWS Lambda 上，
//! 也可以作为普通 HTTP 服务在本地运行。分层如下：
//! - `app`：路由、处理器与业务服务
//! - `core`：错误映射、响应结构、中间件
//! - `infrastructure`：数据库连接、存储实现、日志
//! - `config`：启动配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::router;
pub use app::users::{AppState, OperationTimeouts, UserService};
pub use config::AppConfig;
