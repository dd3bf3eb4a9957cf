use std::collections::HashMap;

use async_trait::async_trait;
use models::{Booking, Class, ListRequest, Record, User};
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::storage::Store;

/// Insertion-ordered rows with an identifier index and a content-key index.
struct Collection<T: Record> {
    rows: Vec<T>,
    by_id: HashMap<String, usize>,
    by_key: HashMap<T::Key, usize>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), by_id: HashMap::new(), by_key: HashMap::new() }
    }
}

impl<T: Record> Collection<T> {
    fn insert(&mut self, row: &T) -> Result<(), ServiceError> {
        let key = row.key();
        // a reused identifier would make the id index ambiguous
        if self.by_key.contains_key(&key) || self.by_id.contains_key(row.id()) {
            return Err(ServiceError::already_exists(T::KIND));
        }
        let idx = self.rows.len();
        self.by_id.insert(row.id().to_string(), idx);
        self.by_key.insert(key, idx);
        self.rows.push(row.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<T, ServiceError> {
        self.by_id
            .get(id)
            .map(|&idx| self.rows[idx].clone())
            .ok_or_else(|| ServiceError::not_found(T::KIND))
    }

    fn key_match(&self, candidate: &T) -> Result<String, ServiceError> {
        self.by_key
            .get(&candidate.key())
            .map(|&idx| self.rows[idx].id().to_string())
            .ok_or_else(|| ServiceError::not_found(T::KIND))
    }

    fn page(&self, page: ListRequest) -> Vec<T> {
        self.rows[Pagination::from(page).window(self.rows.len())].to_vec()
    }
}

/// Process-lifetime store. Each collection sits behind its own lock; `save`
/// holds the write lock across the duplicate check and the insert.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Collection<User>>,
    classes: RwLock<Collection<Class>>,
    bookings: RwLock<Collection<Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save_user(&self, user: &User) -> Result<(), ServiceError> {
        self.users.write().await.insert(user)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<User, ServiceError> {
        self.users.read().await.get(id)
    }

    async fn get_user_id(&self, user: &User) -> Result<String, ServiceError> {
        self.users.read().await.key_match(user)
    }

    async fn list_users(&self, page: ListRequest) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.read().await.page(page))
    }

    async fn save_class(&self, class: &Class) -> Result<(), ServiceError> {
        self.classes.write().await.insert(class)
    }

    async fn get_class_by_id(&self, id: &str) -> Result<Class, ServiceError> {
        self.classes.read().await.get(id)
    }

    async fn get_class_id(&self, class: &Class) -> Result<String, ServiceError> {
        self.classes.read().await.key_match(class)
    }

    async fn list_classes(&self, page: ListRequest) -> Result<Vec<Class>, ServiceError> {
        Ok(self.classes.read().await.page(page))
    }

    async fn save_booking(&self, booking: &Booking) -> Result<(), ServiceError> {
        self.bookings.write().await.insert(booking)
    }

    async fn get_booking_by_id(&self, id: &str) -> Result<Booking, ServiceError> {
        self.bookings.read().await.get(id)
    }

    async fn get_booking_id(&self, booking: &Booking) -> Result<String, ServiceError> {
        self.bookings.read().await.key_match(booking)
    }

    async fn list_bookings(&self, page: ListRequest) -> Result<Vec<Booking>, ServiceError> {
        Ok(self.bookings.read().await.page(page))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;

    fn user(id: &str, name: &str, surname: &str) -> User {
        User {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            email: format!("{}.{}@example.com", name.to_lowercase(), surname.to_lowercase()),
            phone: "+341234567890".into(),
        }
    }

    fn class(id: &str, studio: &str) -> Class {
        let now = Utc::now();
        Class {
            id: id.into(),
            studio: studio.into(),
            name: "Yoga Class".into(),
            start_date: now - Duration::days(20),
            end_date: now - Duration::days(10),
            daily_capacity: 20,
        }
    }

    #[tokio::test]
    async fn save_user_rejects_duplicate_key() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let first = user("1", "Elon", "Musk");
        store.save_user(&first).await?;

        let mut dup = first.clone();
        dup.id = "2".into();
        let err = store.save_user(&dup).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { entity: "user", .. }));

        let all = store.list_users(ListRequest::all()).await?;
        assert_eq!(all, vec![first]);
        Ok(())
    }

    #[tokio::test]
    async fn get_user_by_id_round_trips() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let u = user("1", "Elon", "Musk");
        store.save_user(&u).await?;

        assert_eq!(store.get_user_by_id("1").await?, u);
        assert_eq!(store.get_user_by_id("2").await, Err(ServiceError::not_found("user")));
        Ok(())
    }

    #[tokio::test]
    async fn get_user_id_matches_on_content() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let u = user("1", "Elon", "Musk");
        store.save_user(&u).await?;

        let candidate = User { id: "unsaved".into(), ..u.clone() };
        assert_eq!(store.get_user_id(&candidate).await?, "1");

        let other = user("", "Leah", "Mars");
        assert!(matches!(store.get_user_id(&other).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_users_keeps_insertion_order() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let a = user("1", "Elon", "Musk");
        let b = user("2", "Leah", "Mars");
        store.save_user(&a).await?;
        store.save_user(&b).await?;

        assert_eq!(store.list_users(ListRequest::new(0, 0)).await?, vec![a.clone(), b.clone()]);
        assert_eq!(store.list_users(ListRequest::new(1, 10)).await?, vec![b]);
        assert_eq!(store.list_users(ListRequest::new(0, 1)).await?, vec![a]);
        assert!(store.list_users(ListRequest::new(5, 1)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn reused_identifier_is_rejected() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.save_user(&user("1", "Elon", "Musk")).await?;
        assert!(store.save_user(&user("1", "Leah", "Mars")).await.is_err());
        assert_eq!(store.list_users(ListRequest::all()).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn save_class_rejects_same_studio_name_and_start_second() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let c = class("1", "Yoga Studio");
        store.save_class(&c).await?;

        let mut same = c.clone();
        same.id = "2".into();
        same.daily_capacity = 5;
        same.end_date = c.end_date + Duration::days(3);
        assert!(matches!(store.save_class(&same).await, Err(ServiceError::AlreadyExists { .. })));
        assert_eq!(store.get_class_id(&same).await?, "1");

        let elsewhere = class("3", "Other Studio");
        store.save_class(&elsewhere).await?;
        assert_eq!(store.list_classes(ListRequest::all()).await?.len(), 2);
        assert_eq!(store.get_class_by_id("3").await?, elsewhere);
        Ok(())
    }

    #[tokio::test]
    async fn bookings_are_unique_per_user_class_and_date() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let date = Utc::now();
        let b = Booking { id: "1".into(), class_id: "c".into(), user_id: "u".into(), date };
        store.save_booking(&b).await?;

        let dup = Booking { id: "2".into(), ..b.clone() };
        assert!(store.save_booking(&dup).await.is_err());
        assert_eq!(store.get_booking_id(&dup).await?, "1");

        let next_day = Booking { id: "3".into(), date: date + Duration::days(1), ..b.clone() };
        store.save_booking(&next_day).await?;
        assert_eq!(store.list_bookings(ListRequest::all()).await?, vec![b, next_day]);
        assert!(store.get_booking_by_id("2").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn booking_may_reference_missing_class_and_user() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let b = Booking { id: "1".into(), class_id: "nope".into(), user_id: "nobody".into(), date: Utc::now() };
        store.save_booking(&b).await?;
        assert!(store.get_class_by_id("nope").await.is_err());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_saves_admit_one() -> anyhow::Result<()> {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.save_user(&user(&i.to_string(), "Elon", "Musk")).await
            }));
        }
        let mut ok = 0;
        for h in handles {
            if h.await?.is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.list_users(ListRequest::all()).await?.len(), 1);
        Ok(())
    }
}
