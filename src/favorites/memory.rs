use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{Favorite, FavoritesStore};
use crate::Result;
use crate::error::TourismError;

/// Process-local favorites, for tests and runs without a backend.
/// Adding an existing pair is a no-op.
#[derive(Debug, Default)]
pub struct InMemoryFavoritesStore {
    rows: Mutex<Vec<Favorite>>,
}

impl InMemoryFavoritesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, f: impl FnOnce(&mut Vec<Favorite>) -> T) -> Result<T> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| TourismError::favorites("favorites lock poisoned"))?;
        Ok(f(&mut rows))
    }
}

#[async_trait]
impl FavoritesStore for InMemoryFavoritesStore {
    async fn add(&self, user_id: &str, destination_id: &str) -> Result<()> {
        self.with_rows(|rows| {
            let exists = rows
                .iter()
                .any(|f| f.user_id == user_id && f.destination_id == destination_id);
            if !exists {
                rows.push(Favorite {
                    user_id: user_id.to_owned(),
                    destination_id: destination_id.to_owned(),
                    created_at: Some(Utc::now()),
                });
            }
        })
    }

    async fn remove(&self, user_id: &str, destination_id: &str) -> Result<()> {
        self.with_rows(|rows| {
            rows.retain(|f| !(f.user_id == user_id && f.destination_id == destination_id));
        })
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>> {
        self.with_rows(|rows| {
            rows.iter()
                .filter(|f| f.user_id == user_id)
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_list_remove() {
        let store = InMemoryFavoritesStore::new();
        store.add("alice", "taj-mahal").await.unwrap();
        store.add("alice", "baga-beach").await.unwrap();
        store.add("alice", "taj-mahal").await.unwrap();
        store.add("bob", "taj-mahal").await.unwrap();

        let alice: Vec<String> = store
            .list("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.destination_id)
            .collect();
        assert_eq!(alice, vec!["taj-mahal", "baga-beach"]);

        store.remove("alice", "taj-mahal").await.unwrap();
        assert_eq!(store.list("alice").await.unwrap().len(), 1);
        assert_eq!(store.list("bob").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_favorites() {
        let store = InMemoryFavoritesStore::new();
        assert!(store.list("nobody").await.unwrap().is_empty());
        store.remove("nobody", "x").await.unwrap();
    }
}
