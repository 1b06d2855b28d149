//! 用户业务服务

use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use super::model::{parse_user_id, User, UserPayload};
use crate::config::TimeoutConfig;
use crate::core::error::{ServiceError, StoreError};
use crate::infrastructure::store::UserStore;

/// 每个操作单独的超时时间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTimeouts {
    pub create: Duration,
    pub list: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        Self::from(&TimeoutConfig::default())
    }
}

impl From<&TimeoutConfig> for OperationTimeouts {
    fn from(config: &TimeoutConfig) -> Self {
        Self {
            create: Duration::from_secs(config.create_secs),
            list: Duration::from_secs(config.list_secs),
            update: Duration::from_secs(config.update_secs),
            delete: Duration::from_secs(config.delete_secs),
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    timeouts: OperationTimeouts,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, timeouts: OperationTimeouts) -> Self {
        Self { store, timeouts }
    }

    pub async fn create_user(&self, payload: UserPayload) -> Result<ObjectId, ServiceError> {
        bounded(self.timeouts.create, self.store.insert(&payload))
            .await
            .map_err(ServiceError::StoreWrite)
    }

    /// 空集合返回空列表，不视为错误
    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        bounded(self.timeouts.list, self.store.find_all())
            .await
            .map_err(ServiceError::StoreRead)
    }

    /// 整体覆盖 name/email
    ///
    /// 先写后判断：匹配条数为 0 才报告 `NotFound`，不做写前查询。
    pub async fn update_user(&self, id: &str, payload: UserPayload) -> Result<(), ServiceError> {
        let id = parse_user_id(id)?;
        let matched = bounded(self.timeouts.update, self.store.update_by_id(id, &payload))
            .await
            .map_err(ServiceError::StoreWrite)?;
        if matched == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_user_id(id)?;
        let deleted = bounded(self.timeouts.delete, self.store.delete_by_id(id))
            .await
            .map_err(ServiceError::StoreWrite)?;
        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }
}

/// 超时后丢弃进行中的存储调用
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    timeout(limit, call)
        .await
        .unwrap_or(Err(StoreError::Timeout(limit)))
}
