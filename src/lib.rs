//! Smart Tourism - destination catalog and semantic relationship service
//!
//! This library loads the destination catalog, builds the relationship
//! graph from its triple source, and provides the filtering, sorting and
//! query functions the web front end is built on.

pub mod api;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod models;
pub mod relationships;
pub mod sources;
pub mod web;

// Re-export core types for public API
pub use catalog::{destination_by_id, load_catalog, load_catalog_outcome};
pub use config::AppConfig;
pub use error::{SourceErrorKind, TourismError};
pub use favorites::{FavoritesStore, InMemoryFavoritesStore, SupabaseFavoritesStore};
pub use filters::{DestinationFilters, SortOrder};
pub use models::{Destination, Location, RankedDestination, RelationKind, RelationshipMap};
pub use relationships::{build_relationship_graph, related_to};
pub use sources::{ExecutionContext, Loaded, SourceFiles, TripleFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourismError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
