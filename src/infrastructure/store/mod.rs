//! 用户存储抽象
//!
//! [`UserStore`] 只暴露驱动层面的原语；更新和删除返回匹配/删除的条数，
//! "用户不存在" 由服务层根据条数判断。

mod memory;
mod mongo;

pub use memory::MemoryUserStore;
pub use mongo::MongoUserStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::users::model::{User, UserPayload};
use crate::config::{redacted_uri, StoreBackend, StoreConfig};
use crate::core::error::StoreError;
use crate::infrastructure::database::StoreClient;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 插入一条记录，返回存储分配的 ID
    async fn insert(&self, user: &UserPayload) -> Result<ObjectId, StoreError>;

    /// 按存储的自然顺序返回全部记录
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// 整体覆盖 name/email，返回匹配的条数
    async fn update_by_id(&self, id: ObjectId, user: &UserPayload) -> Result<u64, StoreError>;

    /// 硬删除，返回删除的条数
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError>;
}

/// 按配置打开存储后端
///
/// MongoDB 后端会先连接再 ping，任一步失败都应终止启动。
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn UserStore>, StoreError> {
    match config.backend {
        StoreBackend::Mongo => {
            info!("🔌 正在连接 MongoDB: {}", redacted_uri(&config.uri));
            let client = StoreClient::connect(&config.uri, config.connect_timeout()).await?;
            client.ping().await?;
            info!(
                database = %config.database,
                collection = %config.collection,
                "✅ 已连接 MongoDB"
            );
            Ok(Arc::new(MongoUserStore::new(
                client.collection(&config.database, &config.collection),
            )))
        }
        StoreBackend::Memory => {
            warn!("⚠️ 使用进程内存储，数据不会持久化");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
