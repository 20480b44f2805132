//! HTTP API over the catalog, the relationship graph and favorites

mod error;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::categories::{CATEGORIES, Category, FEATURED_STATES, category};
use crate::catalog::{destination_by_id, load_catalog};
use crate::favorites::{Favorite, FavoritesStore, favorite_destinations};
use crate::filters::{DestinationFilters, apply_filters};
use crate::models::{Destination, RelationKind, RelationshipMap};
use crate::relationships::{
    activities_for, build_relationship_graph, by_activity, by_category, related_to,
};
use crate::sources::SourceFiles;

pub use error::ApiError;

/// Shared handler state. Sources are re-read on every request.
#[derive(Clone)]
pub struct AppState {
    pub sources: Arc<SourceFiles>,
    pub favorites: Arc<dyn FavoritesStore>,
}

impl AppState {
    pub fn new(sources: SourceFiles, favorites: Arc<dyn FavoritesStore>) -> Self {
        Self {
            sources: Arc::new(sources),
            favorites,
        }
    }
}

#[derive(Serialize)]
pub struct DestinationsResponse {
    pub destinations: Vec<Destination>,
}

#[derive(Debug, Deserialize)]
pub struct RdfParams {
    #[serde(rename = "destinationId")]
    pub destination_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum RdfResponse {
    #[serde(rename_all = "camelCase")]
    Related {
        destination_id: String,
        related: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Map { relationship_map: RelationshipMap },
}

#[derive(Serialize)]
pub struct CategoryResponse {
    pub category: String,
    pub destinations: Vec<String>,
}

#[derive(Serialize)]
pub struct ActivityResponse {
    pub activity: String,
    pub destinations: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesResponse {
    pub destination_id: String,
    pub activities: Vec<String>,
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
    pub destinations: Vec<Destination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavoriteRequest {
    pub destination_id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/destinations", get(get_destinations))
        .route("/destinations/{id}", get(get_destination))
        .route("/categories", get(get_categories))
        .route("/categories/{name}", get(get_category))
        .route("/states", get(get_featured_states))
        .route("/rdf", get(get_relationships))
        .route("/rdf/category/{category}", get(get_by_category))
        .route("/rdf/activity/{activity}", get(get_by_activity))
        .route("/rdf/{id}/activities", get(get_activities))
        .route(
            "/favorites/{user_id}",
            get(get_favorites).post(add_favorite),
        )
        .route(
            "/favorites/{user_id}/{destination_id}",
            delete(remove_favorite),
        )
        .with_state(state)
}

/// Run a blocking source read off the async workers
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
        .map_err(ApiError::from)
}

async fn get_destinations(
    State(state): State<AppState>,
    Query(filters): Query<DestinationFilters>,
) -> Result<Json<DestinationsResponse>, ApiError> {
    let sources = state.sources.clone();
    let catalog = blocking(move || load_catalog(&sources)).await?;
    Ok(Json(DestinationsResponse {
        destinations: apply_filters(&catalog, &filters),
    }))
}

async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Destination>, ApiError> {
    let sources = state.sources.clone();
    let lookup = id.clone();
    blocking(move || destination_by_id(&sources, &lookup))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("destination '{id}'")))
}

async fn get_categories() -> Json<&'static [Category]> {
    Json(CATEGORIES)
}

async fn get_category(Path(name): Path<String>) -> Result<Json<&'static Category>, ApiError> {
    category(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("category '{name}'")))
}

async fn get_featured_states() -> Json<&'static [&'static str]> {
    Json(FEATURED_STATES)
}

async fn get_relationships(
    State(state): State<AppState>,
    Query(params): Query<RdfParams>,
) -> Result<Json<RdfResponse>, ApiError> {
    let sources = state.sources.clone();
    match params.destination_id {
        Some(destination_id) => {
            let kind = match params.kind.as_deref() {
                Some(kind) => kind.parse::<RelationKind>()?,
                None => RelationKind::All,
            };
            let id = destination_id.clone();
            let related = blocking(move || related_to(&sources, &id, kind)).await?;
            Ok(Json(RdfResponse::Related {
                destination_id,
                related,
            }))
        }
        None => {
            let relationship_map = blocking(move || build_relationship_graph(&sources)).await?;
            Ok(Json(RdfResponse::Map { relationship_map }))
        }
    }
}

async fn get_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let sources = state.sources.clone();
    let lookup = category.clone();
    let destinations = blocking(move || by_category(&sources, &lookup)).await?;
    Ok(Json(CategoryResponse {
        category,
        destinations,
    }))
}

async fn get_by_activity(
    State(state): State<AppState>,
    Path(activity): Path<String>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let sources = state.sources.clone();
    let lookup = activity.clone();
    let destinations = blocking(move || by_activity(&sources, &lookup)).await?;
    Ok(Json(ActivityResponse {
        activity,
        destinations,
    }))
}

async fn get_activities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActivitiesResponse>, ApiError> {
    let sources = state.sources.clone();
    let lookup = id.clone();
    let activities = blocking(move || activities_for(&sources, &lookup)).await?;
    Ok(Json(ActivitiesResponse {
        destination_id: id,
        activities,
    }))
}

async fn get_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = state.favorites.list(&user_id).await?;
    let sources = state.sources.clone();
    let catalog = blocking(move || load_catalog(&sources)).await?;
    Ok(Json(FavoritesResponse {
        destinations: favorite_destinations(&catalog, &favorites),
        favorites,
    }))
}

async fn add_favorite(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<NewFavoriteRequest>,
) -> Result<StatusCode, ApiError> {
    if request.destination_id.is_empty() {
        return Err(ApiError::BadRequest("destinationId cannot be empty".to_owned()));
    }
    state
        .favorites
        .add(&user_id, &request.destination_id)
        .await?;
    Ok(StatusCode::CREATED)
}

async fn remove_favorite(
    State(state): State<AppState>,
    Path((user_id, destination_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.favorites.remove(&user_id, &destination_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
