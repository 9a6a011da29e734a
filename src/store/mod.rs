// ==================== USER PERSISTENCE ====================
// The router only talks to `UserStore`; MongoDB and an in-process store
// both implement it.

pub mod memory;
pub mod mongo;

pub use memory::MemoryUserStore;
pub use mongo::MongoUserStore;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::fmt;

use crate::models::{User, UserFields};

#[derive(Debug)]
pub enum StoreError {
    Driver(mongodb::error::Error),
    Serialization(String),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Driver(e) => write!(f, "MongoDB error: {}", e),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Driver(err)
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Document collection of users.
///
/// Records come back in the store's natural (insertion) order. `id`s are
/// assigned by the store on `create` and on an inserting `upsert`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Cheap reachability check for `/health`.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, fields: UserFields) -> Result<User, StoreError>;

    /// Skips `skip` records, then returns up to `limit` (all when `None`).
    async fn find(&self, skip: u64, limit: Option<i64>) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError>;

    /// Overwrites the record's fields, inserting it under `id` when absent.
    async fn upsert(&self, id: &ObjectId, fields: UserFields) -> Result<User, StoreError>;

    /// Returns the removed record, if there was one.
    async fn delete(&self, id: &ObjectId) -> Result<Option<User>, StoreError>;
}
