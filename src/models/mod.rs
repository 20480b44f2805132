//! Data models for the smart tourism service
//!
//! - Destination: a point of interest from the catalog
//! - Relationship: per-destination aggregation of semantic triples

pub mod destination;
pub mod location;
pub mod relationship;

// Re-export all public types for convenient access
pub use destination::{Destination, RankedDestination};
pub use location::Location;
pub use relationship::{RelationKind, RelationshipMap, RelationshipRecord, Triple};
