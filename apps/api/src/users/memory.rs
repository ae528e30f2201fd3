use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::user::{NewUser, User};
use crate::users::store::UserStore;

#[derive(Default)]
struct Rows {
    last_id: i32,
    by_id: BTreeMap<i32, User>,
}

/// In-memory `UserStore` mirroring the SERIAL id semantics of the real table.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Rows>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let user = User {
            id: rows.last_id,
            name: new_user.name.clone(),
            birthdate: new_user.birthdate,
            address: new_user.address.clone(),
            phone: new_user.phone.clone(),
            active: new_user.active,
            bolsa_familia: new_user.bolsa_familia,
            attends_church: new_user.attends_church,
            church_name: new_user.church_name().map(str::to_string),
        };
        rows.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.rows.write().await.by_id.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            address: "Rua das Flores, 12".to_string(),
            phone: "11988887777".to_string(),
            active: true,
            bolsa_familia: false,
            attends_church: false,
            church_name: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_never_reused_after_delete() {
        let store = MemoryUserStore::default();
        let first = store.create(&new_user("Ana")).await.unwrap();
        assert!(store.delete(first.id).await.unwrap());
        let second = store.create(&new_user("Bia")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_duplicate_names_are_permitted() {
        let store = MemoryUserStore::default();
        store.create(&new_user("Ana")).await.unwrap();
        store.create(&new_user("Ana")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = MemoryUserStore::default();
        assert!(!store.delete(42).await.unwrap());
    }
}
