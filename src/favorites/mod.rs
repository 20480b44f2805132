//! User favorites
//!
//! Favorites live in an external backend. The rest of the crate only sees the
//! [`FavoritesStore`] trait; a concrete store is built once at startup and
//! handed to whoever needs it.

pub mod memory;
pub mod supabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::models::Destination;

pub use memory::InMemoryFavoritesStore;
pub use supabase::SupabaseFavoritesStore;

/// One row of the favorites table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: String,
    pub destination_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn add(&self, user_id: &str, destination_id: &str) -> Result<()>;
    async fn remove(&self, user_id: &str, destination_id: &str) -> Result<()>;
    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>>;
}

#[must_use]
pub fn is_favorite(destination_id: &str, favorites: &[Favorite]) -> bool {
    favorites.iter().any(|f| f.destination_id == destination_id)
}

/// Catalog entries that are favorited, in catalog order
#[must_use]
pub fn favorite_destinations(catalog: &[Destination], favorites: &[Favorite]) -> Vec<Destination> {
    catalog
        .iter()
        .filter(|d| is_favorite(&d.id, favorites))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::destination::fixtures::destination;

    fn favorite(destination_id: &str) -> Favorite {
        Favorite {
            user_id: "user-1".to_string(),
            destination_id: destination_id.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_is_favorite() {
        let favorites = vec![favorite("goa"), favorite("agra")];
        assert!(is_favorite("agra", &favorites));
        assert!(!is_favorite("ooty", &favorites));
        assert!(!is_favorite("agra", &[]));
    }

    #[test]
    fn test_favorite_destinations_keeps_catalog_order() {
        let catalog = vec![destination("agra"), destination("ooty"), destination("goa")];
        let favorites = vec![favorite("goa"), favorite("agra"), favorite("missing")];
        let ids: Vec<String> = favorite_destinations(&catalog, &favorites)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["agra", "goa"]);
    }

    #[test]
    fn test_favorite_row_deserializes() {
        let row = r#"{"id": 7, "user_id": "u", "destination_id": "goa", "created_at": "2024-01-05T10:00:00+00:00"}"#;
        let favorite: Favorite = serde_json::from_str(row).unwrap();
        assert_eq!(favorite.destination_id, "goa");
        assert!(favorite.created_at.is_some());
    }
}
