//! SPARQL query templates for the destination ontology.
//!
//! These are strings for external tooling; nothing here evaluates them.

pub const ONTOLOGY_NS: &str = "http://smarttourism.org/ontology#";
pub const DESTINATION_NS: &str = "http://smarttourism.org/destination/";

const PREFIXES: &str = "PREFIX tour: <http://smarttourism.org/ontology#>\n\
                        PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>\n";

/// Escape a value for use inside a double-quoted SPARQL literal
fn literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

fn destination_iri(destination_id: &str) -> String {
    format!("<{DESTINATION_NS}{destination_id}>")
}

fn select(variables: &str, patterns: &[String]) -> String {
    format!(
        "{PREFIXES}\nSELECT {variables}\nWHERE {{\n  {}\n}}\n",
        patterns.join("\n  ")
    )
}

#[must_use]
pub fn find_by_category(category: &str) -> String {
    select(
        "?destination",
        &[format!("?destination tour:belongsToCategory {} .", literal(category))],
    )
}

#[must_use]
pub fn find_nearby(destination_id: &str) -> String {
    select(
        "?nearby",
        &[format!("{} tour:isNearby ?nearby .", destination_iri(destination_id))],
    )
}

#[must_use]
pub fn find_similar(destination_id: &str) -> String {
    select(
        "?similar",
        &[format!("{} tour:similarTo ?similar .", destination_iri(destination_id))],
    )
}

#[must_use]
pub fn find_by_city(city: &str) -> String {
    select(
        "?destination",
        &[format!("?destination tour:isInCity {} .", literal(city))],
    )
}

#[must_use]
pub fn find_by_activity(activity: &str) -> String {
    select(
        "?destination",
        &[format!("?destination tour:hasActivity {} .", literal(activity))],
    )
}

#[must_use]
pub fn all_relationships(destination_id: &str) -> String {
    select(
        "?predicate ?object",
        &[format!("{} ?predicate ?object .", destination_iri(destination_id))],
    )
}

#[must_use]
pub fn find_category_and_nearby(category: &str, destination_id: &str) -> String {
    select(
        "?destination",
        &[
            format!("?destination tour:belongsToCategory {} .", literal(category)),
            format!("{} tour:isNearby ?destination .", destination_iri(destination_id)),
        ],
    )
}

/// Destination id at the end of a URI, `None` for an empty string
#[must_use]
pub fn extract_destination_id(uri: &str) -> Option<&str> {
    if uri.is_empty() {
        return None;
    }
    Some(super::graph::extract_id(uri))
}
