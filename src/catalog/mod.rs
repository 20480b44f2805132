//! Destination catalog
//!
//! Loads the destination XML file into [`Destination`](crate::models::Destination)
//! records, fresh on every call.

pub mod loader;

pub use loader::{CatalogLoader, destination_by_id, load_catalog, load_catalog_outcome};
