//! Relationship model: triples and the per-destination records built from them

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TourismError;

/// A `(subject, predicate, object)` statement with every term reduced to its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Everything the triple source says about one destination.
///
/// List fields keep triple order and are never deduplicated. Scalar fields
/// take the value of the last triple that set them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipRecord {
    pub nearby: Vec<String>,
    pub similar: Vec<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub activities: Vec<String>,
}

/// Destination id to relationship record, in first-seen subject order.
pub type RelationshipMap = IndexMap<String, RelationshipRecord>;

/// Which links `related_to` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Nearby,
    Similar,
    /// `nearby` followed by `similar`
    #[default]
    All,
}

impl FromStr for RelationKind {
    type Err = TourismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearby" => Ok(RelationKind::Nearby),
            "similar" => Ok(RelationKind::Similar),
            "all" => Ok(RelationKind::All),
            other => Err(TourismError::validation(format!(
                "unknown relation kind '{other}', expected nearby, similar or all"
            ))),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::Nearby => "nearby",
            RelationKind::Similar => "similar",
            RelationKind::All => "all",
        };
        f.write_str(name)
    }
}
