//! Relationship queries
//!
//! The `*_in` functions answer against an already built map. The others build
//! the map fresh from the source files first, so each call sees the file as it
//! is right now. Source errors surface as empty results.

use crate::Result;
use crate::models::{RelationKind, RelationshipMap};
use crate::sources::SourceFiles;

use super::graph::build_relationship_graph;

/// Ids linked from `id`. Unknown ids give an empty list.
#[must_use]
pub fn related_in(map: &RelationshipMap, id: &str, kind: RelationKind) -> Vec<String> {
    let Some(record) = map.get(id) else {
        return Vec::new();
    };
    match kind {
        RelationKind::Nearby => record.nearby.clone(),
        RelationKind::Similar => record.similar.clone(),
        RelationKind::All => record
            .nearby
            .iter()
            .chain(&record.similar)
            .cloned()
            .collect(),
    }
}

/// Subject ids whose category is exactly `category`
#[must_use]
pub fn by_category_in(map: &RelationshipMap, category: &str) -> Vec<String> {
    map.iter()
        .filter(|(_, record)| record.category.as_deref() == Some(category))
        .map(|(id, _)| id.clone())
        .collect()
}

/// Subject ids listing `activity` among their activities
#[must_use]
pub fn by_activity_in(map: &RelationshipMap, activity: &str) -> Vec<String> {
    map.iter()
        .filter(|(_, record)| record.activities.iter().any(|a| a == activity))
        .map(|(id, _)| id.clone())
        .collect()
}

#[must_use]
pub fn by_city_in(map: &RelationshipMap, city: &str) -> Vec<String> {
    map.iter()
        .filter(|(_, record)| record.city.as_deref() == Some(city))
        .map(|(id, _)| id.clone())
        .collect()
}

#[must_use]
pub fn by_state_in(map: &RelationshipMap, state: &str) -> Vec<String> {
    map.iter()
        .filter(|(_, record)| record.state.as_deref() == Some(state))
        .map(|(id, _)| id.clone())
        .collect()
}

#[must_use]
pub fn activities_in(map: &RelationshipMap, id: &str) -> Vec<String> {
    map.get(id)
        .map(|record| record.activities.clone())
        .unwrap_or_default()
}

pub fn related_to(sources: &SourceFiles, id: &str, kind: RelationKind) -> Result<Vec<String>> {
    Ok(related_in(&build_relationship_graph(sources)?, id, kind))
}

pub fn by_category(sources: &SourceFiles, category: &str) -> Result<Vec<String>> {
    Ok(by_category_in(&build_relationship_graph(sources)?, category))
}

pub fn by_activity(sources: &SourceFiles, activity: &str) -> Result<Vec<String>> {
    Ok(by_activity_in(&build_relationship_graph(sources)?, activity))
}

pub fn by_city(sources: &SourceFiles, city: &str) -> Result<Vec<String>> {
    Ok(by_city_in(&build_relationship_graph(sources)?, city))
}

pub fn by_state(sources: &SourceFiles, state: &str) -> Result<Vec<String>> {
    Ok(by_state_in(&build_relationship_graph(sources)?, state))
}

pub fn activities_for(sources: &SourceFiles, id: &str) -> Result<Vec<String>> {
    Ok(activities_in(&build_relationship_graph(sources)?, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Triple;
    use crate::relationships::RelationshipGraphBuilder;

    fn sample_map() -> RelationshipMap {
        let dest = |id: &str| format!("http://smarttourism.org/destination/{id}");
        let pred = |name: &str| format!("http://smarttourism.org/ontology#{name}");
        let triples = vec![
            Triple::new(dest("d1"), pred("isNearby"), dest("d2")),
            Triple::new(dest("d1"), pred("similarTo"), dest("d3")),
            Triple::new(dest("d1"), pred("belongsToCategory"), "Heritage"),
            Triple::new(dest("d1"), pred("hasActivity"), "Photography"),
            Triple::new(dest("d2"), pred("belongsToCategory"), "heritage"),
            Triple::new(dest("d2"), pred("isInCity"), "Agra"),
            Triple::new(dest("d3"), pred("belongsToCategory"), "Heritage"),
            Triple::new(dest("d3"), pred("hasActivity"), "Photography"),
            Triple::new(dest("d3"), pred("isInState"), "Delhi"),
        ];
        RelationshipGraphBuilder::from_triples(&triples)
    }

    #[test]
    fn test_related_scenario() {
        let map = sample_map();
        assert_eq!(related_in(&map, "d1", RelationKind::All), vec!["d2", "d3"]);
        assert_eq!(related_in(&map, "d1", RelationKind::Nearby), vec!["d2"]);
        assert_eq!(related_in(&map, "d1", RelationKind::Similar), vec!["d3"]);
        assert!(related_in(&map, "d4", RelationKind::All).is_empty());
    }

    #[test]
    fn test_by_category_is_exact_and_case_sensitive() {
        let map = sample_map();
        assert_eq!(by_category_in(&map, "Heritage"), vec!["d1", "d3"]);
        assert_eq!(by_category_in(&map, "heritage"), vec!["d2"]);
        assert!(by_category_in(&map, "Herit").is_empty());
    }

    #[test]
    fn test_activity_queries() {
        let map = sample_map();
        assert_eq!(by_activity_in(&map, "Photography"), vec!["d1", "d3"]);
        assert_eq!(activities_in(&map, "d1"), vec!["Photography"]);
        assert!(activities_in(&map, "d2").is_empty());
        assert!(activities_in(&map, "unknown").is_empty());
    }

    #[test]
    fn test_city_and_state_queries() {
        let map = sample_map();
        assert_eq!(by_city_in(&map, "Agra"), vec!["d2"]);
        assert_eq!(by_state_in(&map, "Delhi"), vec!["d3"]);
        assert!(by_state_in(&map, "Goa").is_empty());
    }

    #[test]
    fn test_queries_do_not_mutate_map() {
        let map = sample_map();
        let before = map.clone();
        let _ = related_in(&map, "d1", RelationKind::All);
        let _ = by_category_in(&map, "Heritage");
        let _ = activities_in(&map, "d1");
        assert_eq!(map, before);
    }

    #[test]
    fn test_missing_source_gives_empty_results() {
        let sources = SourceFiles::server("unused.xml", "missing.ttl");
        assert!(related_to(&sources, "d1", RelationKind::All).unwrap().is_empty());
        assert!(by_category(&sources, "Heritage").unwrap().is_empty());
        assert!(activities_for(&sources, "d1").unwrap().is_empty());
    }

    #[test]
    fn test_client_context_propagates() {
        let sources = SourceFiles::client();
        assert!(related_to(&sources, "d1", RelationKind::All).is_err());
        assert!(by_activity(&sources, "Trekking").is_err());
    }
}
