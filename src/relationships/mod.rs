//! Semantic relationships between destinations
//!
//! This module provides:
//! - Parsing the triple source (Turtle, N-Triples, RDF/XML, N3)
//! - Building the per-destination relationship map
//! - Related/category/activity queries against that map
//! - SPARQL templates for the same questions

pub mod graph;
pub mod query;
pub mod sparql;

pub use graph::{
    Predicate, RelationshipGraphBuilder, build_relationship_graph,
    build_relationship_graph_outcome, extract_id, extract_predicate, parse_triples,
    try_build_relationship_graph,
};
pub use query::{
    activities_for, activities_in, by_activity, by_activity_in, by_category, by_category_in,
    by_city, by_city_in, by_state, by_state_in, related_in, related_to,
};
