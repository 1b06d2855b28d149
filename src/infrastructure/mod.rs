//! 基础设施层：数据库连接、存储实现、Lambda 适配与日志

pub mod database;
pub mod lambda;
pub mod logger;
pub mod store;
