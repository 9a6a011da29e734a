use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::models::{User, UserFields};

/// In-process `UserStore`; records live in insertion order until the
/// process exits. Used with `USER_STORE=memory` and by the route tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, fields: UserFields) -> Result<User, StoreError> {
        let user = User::new(ObjectId::new(), fields);
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find(&self, skip: u64, limit: Option<i64>) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = match limit {
            // Same as the MongoDB driver: a negative limit is its absolute value
            Some(limit) if limit != 0 => {
                usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX)
            }
            _ => usize::MAX,
        };

        Ok(users.iter().skip(skip).take(take).cloned().collect())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn upsert(&self, id: &ObjectId, fields: UserFields) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let updated = User::new(*id, fields);

        match users.iter_mut().find(|u| &u.id == id) {
            Some(existing) => *existing = updated.clone(),
            None => users.push(updated.clone()),
        }

        Ok(updated)
    }

    async fn delete(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let removed = users
            .iter()
            .position(|u| &u.id == id)
            .map(|index| users.remove(index));
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(n: usize) -> UserFields {
        UserFields {
            first_name: format!("First{}", n),
            last_name: format!("Last{}", n),
            email: format!("user{}@example.com", n),
            phone: format!("555-{:04}", n),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = MemoryUserStore::new();
        let a = store.create(fields(1)).await.unwrap();
        let b = store.create(fields(2)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.email, "user1@example.com");
    }

    #[tokio::test]
    async fn test_find_skips_and_limits_in_insertion_order() {
        let store = MemoryUserStore::new();
        for n in 1..=25 {
            store.create(fields(n)).await.unwrap();
        }

        let all = store.find(0, None).await.unwrap();
        assert_eq!(all.len(), 25);

        let page = store.find(20, Some(10)).await.unwrap();
        let names: Vec<_> = page.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, vec!["First21", "First22", "First23", "First24", "First25"]);

        assert!(store.find(30, Some(10)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place_or_inserts() {
        let store = MemoryUserStore::new();
        let first = store.create(fields(1)).await.unwrap();
        store.create(fields(2)).await.unwrap();

        let replaced = store.upsert(&first.id, fields(9)).await.unwrap();
        assert_eq!(replaced.id, first.id);
        let all = store.find(0, None).await.unwrap();
        assert_eq!(all[0].first_name, "First9");
        assert_eq!(all.len(), 2);

        let fresh_id = ObjectId::new();
        let inserted = store.upsert(&fresh_id, fields(3)).await.unwrap();
        assert_eq!(inserted.id, fresh_id);
        assert_eq!(store.find(0, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let store = MemoryUserStore::new();
        let user = store.create(fields(1)).await.unwrap();

        assert_eq!(store.delete(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.delete(&user.id).await.unwrap(), None);
        assert!(store.find_by_id(&user.id).await.unwrap().is_none());
    }
}
