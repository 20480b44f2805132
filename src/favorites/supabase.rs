use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{Favorite, FavoritesStore};
use crate::Result;
use crate::error::TourismError;

const TABLE: &str = "favorites";

/// Favorites stored in a Supabase (PostgREST) table with columns
/// `user_id`, `destination_id` and `created_at`.
pub struct SupabaseFavoritesStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Serialize)]
struct NewFavorite<'a> {
    user_id: &'a str,
    destination_id: &'a str,
}

impl SupabaseFavoritesStore {
    pub fn new(supabase_url: &str, anon_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("smart-tourism/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TourismError::favorites(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: supabase_url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.to_owned(),
        })
    }

    fn table_url(&self, filters: &[(&str, &str)]) -> String {
        let mut url = format!("{}/rest/v1/{TABLE}", self.base_url);
        let query: Vec<String> = filters
            .iter()
            .map(|(column, value)| format!("{column}={}", urlencoding::encode(value)))
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| TourismError::favorites(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TourismError::favorites(format!(
                "Supabase returned {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl FavoritesStore for SupabaseFavoritesStore {
    #[instrument(skip(self))]
    async fn add(&self, user_id: &str, destination_id: &str) -> Result<()> {
        let rows = [NewFavorite {
            user_id,
            destination_id,
        }];
        let request = self
            .client
            .post(self.table_url(&[]))
            .header("Prefer", "return=minimal")
            .json(&rows);
        self.send(request).await?;
        debug!("Added favorite");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, user_id: &str, destination_id: &str) -> Result<()> {
        let user = format!("eq.{user_id}");
        let destination = format!("eq.{destination_id}");
        let url = self.table_url(&[("user_id", &user), ("destination_id", &destination)]);
        self.send(self.client.delete(url)).await?;
        debug!("Removed favorite");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>> {
        let user = format!("eq.{user_id}");
        let url = self.table_url(&[("select", "*"), ("user_id", &user)]);
        let response = self.send(self.client.get(url)).await?;
        response
            .json::<Vec<Favorite>>()
            .await
            .map_err(|e| TourismError::favorites(format!("Invalid favorites response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_encodes_filters() {
        let store = SupabaseFavoritesStore::new("https://project.supabase.co/", "anon").unwrap();
        assert_eq!(
            store.table_url(&[]),
            "https://project.supabase.co/rest/v1/favorites"
        );
        assert_eq!(
            store.table_url(&[("select", "*"), ("user_id", "eq.a b")]),
            "https://project.supabase.co/rest/v1/favorites?select=%2A&user_id=eq.a%20b"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_favorites_error() {
        let store = SupabaseFavoritesStore::new("http://127.0.0.1:1", "anon").unwrap();
        let err = store.list("alice").await.unwrap_err();
        assert!(matches!(err, TourismError::Favorites { .. }));
    }
}
