//! Destination model for catalog entries

use serde::Serialize;

use super::Location;

/// A single point of interest from the destination catalog.
///
/// Missing text fields are empty strings. Numeric fields that are missing or
/// do not parse are `NaN`, which serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub category: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub description: String,
    pub image: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub best_time_to_visit: String,
}

impl Destination {
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

/// A destination annotated with its distance from a reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDestination {
    #[serde(flatten)]
    pub destination: Destination,
    /// Kilometers from the reference point
    pub distance: f64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Destination;

    /// Builds a destination with the given id and everything else blank.
    pub fn destination(id: &str) -> Destination {
        Destination {
            id: id.to_string(),
            name: String::new(),
            category: String::new(),
            city: String::new(),
            state: String::new(),
            country: "India".to_string(),
            description: String::new(),
            image: String::new(),
            latitude: f64::NAN,
            longitude: f64::NAN,
            rating: f64::NAN,
            best_time_to_visit: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::destination;
    use super::*;

    #[test]
    fn test_serializes_camel_case_and_nan_as_null() {
        let mut dest = destination("taj-mahal");
        dest.best_time_to_visit = "October to March".to_string();
        dest.rating = 4.8;

        let json = serde_json::to_value(&dest).unwrap();
        assert_eq!(json["bestTimeToVisit"], "October to March");
        assert_eq!(json["rating"], 4.8);
        assert!(json["latitude"].is_null());
    }

    #[test]
    fn test_ranked_destination_flattens() {
        let ranked = RankedDestination {
            destination: destination("goa-beach"),
            distance: 12.5,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["id"], "goa-beach");
        assert_eq!(json["distance"], 12.5);
    }
}
