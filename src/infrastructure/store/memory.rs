//! 进程内用户存储，用于本地开发和测试

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, MutexGuard,
};

use super::UserStore;
use crate::app::users::model::{User, UserPayload};
use crate::core::error::StoreError;

/// 按插入顺序保存记录，并统计存储调用次数
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    calls: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累计的存储调用次数（含失败的调用）
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 当前记录数，不计入调用次数
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.guard()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.guard()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<User>>, StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::Backend("内存存储锁已中毒".to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &UserPayload) -> Result<ObjectId, StoreError> {
        let mut users = self.lock()?;
        let id = ObjectId::new();
        users.push(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
        });
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn update_by_id(&self, id: ObjectId, user: &UserPayload) -> Result<u64, StoreError> {
        let mut users = self.lock()?;
        match users.iter_mut().find(|u| u.id == id) {
            Some(existing) => {
                existing.name = user.name.clone();
                existing.email = user.email.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        let mut users = self.lock()?;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok((before - users.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let store = MemoryUserStore::new();
        let first = store.insert(&payload("a", "a@x")).await.unwrap();
        let second = store.insert(&payload("b", "b@x")).await.unwrap();

        let ids: Vec<_> = store.find_all().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn update_and_delete_report_counts() {
        let store = MemoryUserStore::new();
        let id = store.insert(&payload("a", "a@x")).await.unwrap();

        assert_eq!(store.update_by_id(id, &payload("b", "")).await.unwrap(), 1);
        assert_eq!(store.update_by_id(ObjectId::new(), &payload("c", "")).await.unwrap(), 0);

        let users = store.find_all().await.unwrap();
        assert_eq!(users[0].name, "b");
        assert_eq!(users[0].email, "");

        assert_eq!(store.delete_by_id(id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(id).await.unwrap(), 0);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = std::sync::Arc::new(MemoryUserStore::new());
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.users.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Backend(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Backend(_))));
    }
}
