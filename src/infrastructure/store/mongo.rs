//! MongoDB 用户存储

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection,
};
use serde::{Deserialize, Serialize};

use super::UserStore;
use crate::app::users::model::{User, UserPayload};
use crate::core::error::StoreError;

/// 集合中的文档形态
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        User {
            id: doc.id,
            name: doc.name,
            email: doc.email,
        }
    }
}

#[derive(Clone)]
pub struct MongoUserStore {
    users: Collection<UserDocument>,
}

impl MongoUserStore {
    pub fn new(collection: Collection<Document>) -> Self {
        Self {
            users: collection.clone_with_type(),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: &UserPayload) -> Result<ObjectId, StoreError> {
        let result = self
            .users
            .clone_with_type::<UserPayload>()
            .insert_one(user)
            .await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Backend(format!(
                "插入返回了非 ObjectId 的 _id: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let cursor = self.users.find(doc! {}).await?;
        let docs: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn update_by_id(&self, id: ObjectId, user: &UserPayload) -> Result<u64, StoreError> {
        let update = doc! {
            "$set": {
                "name": user.name.as_str(),
                "email": user.email.as_str(),
            }
        };
        let result = self.users.update_one(doc! { "_id": id }, update).await?;
        Ok(result.matched_count)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self.users.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
