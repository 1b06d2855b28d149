//! 数据库基础设施
//!
//! 进程内只持有一个 MongoDB 客户端，冷启动时建立，之后所有请求共享。
//! 驱动内部维护连接池，这里不做额外加锁。

use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::core::error::StoreError;

#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    setup_timeout: Duration,
}

impl StoreClient {
    /// 解析连接串并创建客户端，整个过程受 `setup_timeout` 约束
    pub async fn connect(uri: &str, setup_timeout: Duration) -> Result<Self, StoreError> {
        let mut options = timeout(setup_timeout, ClientOptions::parse(uri))
            .await
            .map_err(|_| StoreError::Connection(format!("解析连接串超时 ({setup_timeout:?})")))?
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        options.connect_timeout = Some(setup_timeout);
        options.server_selection_timeout = Some(setup_timeout);
        if options.app_name.is_none() {
            options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        }

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            setup_timeout,
        })
    }

    /// 确认连接可用；驱动是惰性连接的，第一次 ping 才会真正建立连接
    pub async fn ping(&self) -> Result<(), StoreError> {
        let admin = self.client.database("admin");
        timeout(self.setup_timeout, admin.run_command(doc! { "ping": 1 }))
            .await
            .map_err(|_| StoreError::Connectivity(format!("ping 超时 ({:?})", self.setup_timeout)))?
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;
        debug!("MongoDB ping 成功");
        Ok(())
    }

    /// 获取集合句柄，不会建立新连接
    pub fn collection<T: Send + Sync>(&self, database: &str, collection: &str) -> Collection<T> {
        self.client.database(database).collection::<T>(collection)
    }
}
