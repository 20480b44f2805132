//! Relationship graph builder
//!
//! Flattens the triple source into one [`RelationshipRecord`] per subject id.
//! The file is re-read and re-parsed on every call; nothing is cached.

use std::fs;
use std::path::Path;

use oxrdf::Term;
use oxrdfio::RdfParser;
use tracing::{debug, error, info, instrument};

use crate::Result;
use crate::error::TourismError;
use crate::models::{RelationshipMap, RelationshipRecord, Triple};
use crate::sources::{Loaded, SourceFiles, TripleFormat};

/// Predicates the builder understands. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    IsNearby,
    SimilarTo,
    BelongsToCategory,
    IsInCity,
    IsInState,
    HasActivity,
}

impl Predicate {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "isNearby" => Some(Predicate::IsNearby),
            "similarTo" => Some(Predicate::SimilarTo),
            "belongsToCategory" => Some(Predicate::BelongsToCategory),
            "isInCity" => Some(Predicate::IsInCity),
            "isInState" => Some(Predicate::IsInState),
            "hasActivity" => Some(Predicate::HasActivity),
            _ => None,
        }
    }
}

/// Destination id from a URI: its last `/`-delimited segment.
#[must_use]
pub fn extract_id(uri: &str) -> &str {
    uri.rsplit_once('/').map_or(uri, |(_, last)| last)
}

/// Predicate name from a URI: the text after the first `#`, or else the last
/// `/`-delimited segment.
#[must_use]
pub fn extract_predicate(uri: &str) -> &str {
    match uri.split('#').nth(1) {
        Some(fragment) => fragment,
        None => extract_id(uri),
    }
}

fn term_value(term: Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_owned(),
        Term::BlankNode(node) => node.as_str().to_owned(),
        Term::Literal(literal) => literal.value().to_owned(),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

/// Parse serialized triples in document order.
pub fn parse_triples(
    content: &[u8],
    format: TripleFormat,
) -> std::result::Result<Vec<Triple>, oxrdfio::RdfParseError> {
    RdfParser::from_format(format.rdf_format())
        .for_reader(content)
        .map(|quad| {
            let quad = quad?;
            Ok(Triple {
                subject: term_value(Term::from(quad.subject)),
                predicate: quad.predicate.as_str().to_owned(),
                object: term_value(quad.object),
            })
        })
        .collect()
}

/// Read and parse the triple file, surfacing source errors
pub fn load_triples(path: &Path, format: TripleFormat) -> Result<Vec<Triple>> {
    let content = fs::read(path).map_err(|e| TourismError::source_unreadable(path, e))?;
    let triples = parse_triples(&content, format)
        .map_err(|e| TourismError::source_malformed(path, e.to_string()))?;
    debug!("Parsed {} triples from {:?}", triples.len(), path);
    Ok(triples)
}

/// Aggregates triples into relationship records
pub struct RelationshipGraphBuilder {
    map: RelationshipMap,
}

impl Default for RelationshipGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: RelationshipMap::new(),
        }
    }

    /// Fold one triple into the map. The subject gets a record even when the
    /// predicate is not recognized.
    pub fn add(&mut self, triple: &Triple) {
        let subject = extract_id(&triple.subject);
        let record = self.map.entry(subject.to_owned()).or_default();
        let object = &triple.object;

        match Predicate::from_name(extract_predicate(&triple.predicate)) {
            Some(Predicate::IsNearby) => record.nearby.push(extract_id(object).to_owned()),
            Some(Predicate::SimilarTo) => record.similar.push(extract_id(object).to_owned()),
            Some(Predicate::BelongsToCategory) => record.category = Some(object.clone()),
            Some(Predicate::IsInCity) => record.city = Some(object.clone()),
            Some(Predicate::IsInState) => record.state = Some(object.clone()),
            Some(Predicate::HasActivity) => record.activities.push(object.clone()),
            None => {}
        }
    }

    #[must_use]
    pub fn build(self) -> RelationshipMap {
        self.map
    }

    /// Build a map from triples in the order given
    pub fn from_triples<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> RelationshipMap {
        let mut builder = Self::new();
        for triple in triples {
            builder.add(triple);
        }
        builder.build()
    }
}

/// Build the relationship map, surfacing source errors
pub fn try_build_relationship_graph(sources: &SourceFiles) -> Result<RelationshipMap> {
    sources.context.require_server("buildRelationshipGraph")?;

    let triples = load_triples(&sources.relationships_path, sources.relationships_format)?;
    let map = RelationshipGraphBuilder::from_triples(&triples);
    info!(
        "Built relationship graph: {} destinations from {} triples",
        map.len(),
        triples.len()
    );
    Ok(map)
}

/// Build the relationship map, reporting whether the source could be used.
///
/// Only `ServerOnlyOperation` is returned as an error.
#[instrument(skip(sources), fields(path = %sources.relationships_path.display()))]
pub fn build_relationship_graph_outcome(sources: &SourceFiles) -> Result<Loaded<RelationshipMap>> {
    let result = try_build_relationship_graph(sources);
    if let Err(e) = &result {
        if e.kind().is_some() {
            error!("Error building relationship map: {}", e);
        }
    }
    Loaded::from_result(result)
}

/// Build the relationship map. Unreadable or malformed sources yield an empty map.
pub fn build_relationship_graph(sources: &SourceFiles) -> Result<RelationshipMap> {
    build_relationship_graph_outcome(sources).map(Loaded::into_data)
}
