use quick_xml::de::from_str;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::error::TourismError;
use crate::models::Destination;
use crate::sources::{Loaded, SourceFiles};

/// Destination catalog XML parser and loader
pub struct CatalogLoader;

/// Catalog XML structure for deserialization. The root element name is not checked.
#[derive(Debug, Deserialize)]
pub struct CatalogXml {
    #[serde(rename = "destination", default)]
    pub destinations: Vec<DestinationXml>,
}

#[derive(Debug, Deserialize)]
pub struct DestinationXml {
    #[serde(rename = "@id", default)]
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub rating: Option<String>,
    #[serde(rename = "bestTimeToVisit")]
    pub best_time_to_visit: Option<String>,
}

/// Numeric text to `f64`; anything unparseable becomes NaN.
/// The whole trimmed text must be a number, so `"4.5 stars"` is NaN rather than 4.5.
fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

impl DestinationXml {
    /// Convert the raw XML entry into a catalog record
    #[must_use]
    pub fn to_destination(&self) -> Destination {
        Destination {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            country: self.country.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
            latitude: parse_number(self.latitude.as_deref()),
            longitude: parse_number(self.longitude.as_deref()),
            rating: parse_number(self.rating.as_deref()),
            best_time_to_visit: self.best_time_to_visit.clone().unwrap_or_default(),
        }
    }
}

impl CatalogLoader {
    /// Read and parse the catalog file, surfacing source errors
    pub fn load_destinations<P: AsRef<Path>>(xml_path: P) -> Result<Vec<Destination>> {
        let xml_path = xml_path.as_ref();
        info!("Loading destinations from: {:?}", xml_path);

        let xml_content = fs::read_to_string(xml_path)
            .map_err(|e| TourismError::source_unreadable(xml_path, e))?;

        Self::parse_xml(&xml_content)
            .map_err(|e| TourismError::source_malformed(xml_path, e.to_string()))
    }

    /// Parse catalog XML content, preserving document order
    pub fn parse_xml(xml_content: &str) -> std::result::Result<Vec<Destination>, quick_xml::DeError> {
        let catalog: CatalogXml = from_str(xml_content)?;

        let destinations: Vec<Destination> = catalog
            .destinations
            .iter()
            .map(DestinationXml::to_destination)
            .collect();

        let missing_coordinates = destinations
            .iter()
            .filter(|d| d.latitude.is_nan() || d.longitude.is_nan())
            .count();
        if missing_coordinates > 0 {
            debug!(
                "{} destinations have no usable coordinates",
                missing_coordinates
            );
        }

        info!("Loaded {} destinations from catalog XML", destinations.len());
        Ok(destinations)
    }
}

/// Load the catalog, reporting whether the source could be used.
///
/// Only `ServerOnlyOperation` is returned as an error.
#[instrument(skip(sources), fields(path = %sources.catalog_path.display()))]
pub fn load_catalog_outcome(sources: &SourceFiles) -> Result<Loaded<Vec<Destination>>> {
    sources.context.require_server("loadCatalog")?;

    let result = CatalogLoader::load_destinations(&sources.catalog_path);
    if let Err(e) = &result {
        warn!("Error loading destination catalog: {}", e);
    }
    Loaded::from_result(result)
}

/// Load the catalog in source order. Unreadable or malformed sources yield
/// an empty list.
pub fn load_catalog(sources: &SourceFiles) -> Result<Vec<Destination>> {
    load_catalog_outcome(sources).map(Loaded::into_data)
}

/// First destination with the given id, if any
pub fn destination_by_id(sources: &SourceFiles, id: &str) -> Result<Option<Destination>> {
    Ok(load_catalog(sources)?.into_iter().find(|d| d.id == id))
}
