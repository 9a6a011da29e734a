use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::{StoreError, UserStore};
use crate::database::{MongoDB, USERS_COLLECTION};
use crate::models::{User, UserFields};

/// `UserStore` over the MongoDB "users" collection
#[derive(Clone)]
pub struct MongoUserStore {
    db: MongoDB,
    users: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            db: db.clone(),
            users: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.health_check().await?;
        Ok(())
    }

    async fn create(&self, fields: UserFields) -> Result<User, StoreError> {
        let user = User::new(ObjectId::new(), fields);
        self.users.insert_one(&user).await?;
        log::debug!("Inserted user {}", user.id);
        Ok(user)
    }

    async fn find(&self, skip: u64, limit: Option<i64>) -> Result<Vec<User>, StoreError> {
        let mut query = self.users.find(doc! {}).skip(skip);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let cursor = query.await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "_id": *id }).await?)
    }

    async fn upsert(&self, id: &ObjectId, fields: UserFields) -> Result<User, StoreError> {
        let update = mongodb::bson::to_document(&fields)?;

        let user = self
            .users
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": update })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        // With upsert + ReturnDocument::After the driver always returns a document
        user.ok_or_else(|| StoreError::Unavailable(format!("upsert of {} returned nothing", id)))
    }

    async fn delete(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one_and_delete(doc! { "_id": *id }).await?)
    }
}
