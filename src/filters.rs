//! Filtering, sorting and grouping of catalog destinations
//!
//! Everything here is a pure function over a destination slice. Inputs are
//! never modified; results keep the input order unless a sort says otherwise.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{Destination, Location, RankedDestination};

/// Filter value meaning "no category/state restriction"
pub const ALL: &str = "All";

/// Active filters; `None` or empty strings are pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationFilters {
    pub category: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Exact category match; `None`, empty or `"All"` keeps everything
#[must_use]
pub fn filter_by_category(destinations: &[Destination], category: Option<&str>) -> Vec<Destination> {
    match active(category) {
        Some(category) if category != ALL => destinations
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect(),
        _ => destinations.to_vec(),
    }
}

/// Exact state match; `None`, empty or `"All"` keeps everything
#[must_use]
pub fn filter_by_state(destinations: &[Destination], state: Option<&str>) -> Vec<Destination> {
    match active(state) {
        Some(state) if state != ALL => destinations
            .iter()
            .filter(|d| d.state == state)
            .cloned()
            .collect(),
        _ => destinations.to_vec(),
    }
}

/// Case-insensitive substring match on the city
#[must_use]
pub fn filter_by_city(destinations: &[Destination], city: Option<&str>) -> Vec<Destination> {
    match active(city) {
        Some(city) => {
            let needle = city.to_lowercase();
            destinations
                .iter()
                .filter(|d| contains_ignore_case(&d.city, &needle))
                .cloned()
                .collect()
        }
        None => destinations.to_vec(),
    }
}

/// Case-insensitive substring match on name, description, city or state
#[must_use]
pub fn search_text(destinations: &[Destination], query: Option<&str>) -> Vec<Destination> {
    match active(query) {
        Some(query) => {
            let needle = query.to_lowercase();
            destinations
                .iter()
                .filter(|d| {
                    [&d.name, &d.description, &d.city, &d.state]
                        .into_iter()
                        .any(|field| contains_ignore_case(field, &needle))
                })
                .cloned()
                .collect()
        }
        None => destinations.to_vec(),
    }
}

/// Category, then state, then city, then free text. Each step narrows the last.
#[must_use]
pub fn apply_filters(destinations: &[Destination], filters: &DestinationFilters) -> Vec<Destination> {
    let filtered = filter_by_category(destinations, filters.category.as_deref());
    let filtered = filter_by_state(&filtered, filters.state.as_deref());
    let filtered = filter_by_city(&filtered, filters.city.as_deref());
    search_text(&filtered, filters.search.as_deref())
}

/// NaN sorts after every number regardless of direction.
fn compare_nan_last(a: f64, b: f64, order: SortOrder) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match order {
            SortOrder::Asc => a.total_cmp(&b),
            SortOrder::Desc => b.total_cmp(&a),
        },
    }
}

/// Stable sort on rating; ties keep their input order
#[must_use]
pub fn sort_by_rating(destinations: &[Destination], order: SortOrder) -> Vec<Destination> {
    let mut sorted = destinations.to_vec();
    sorted.sort_by(|a, b| compare_nan_last(a.rating, b.rating, order));
    sorted
}

/// Attach the haversine distance from `from` and sort ascending, stable on ties.
/// Destinations without usable coordinates go last.
#[must_use]
pub fn sort_by_distance(destinations: &[Destination], from: &Location) -> Vec<RankedDestination> {
    let mut ranked: Vec<RankedDestination> = destinations
        .iter()
        .map(|destination| RankedDestination {
            distance: from.distance_km(&destination.location()),
            destination: destination.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| compare_nan_last(a.distance, b.distance, SortOrder::Asc));
    ranked
}

/// Destinations within `radius_km` of `from`, input order kept
#[must_use]
pub fn filter_by_distance(
    destinations: &[Destination],
    from: &Location,
    radius_km: f64,
) -> Vec<Destination> {
    destinations
        .iter()
        .filter(|d| from.distance_km(&d.location()) <= radius_km)
        .cloned()
        .collect()
}

fn group_by<F>(destinations: &[Destination], key: F) -> IndexMap<String, Vec<Destination>>
where
    F: Fn(&Destination) -> &str,
{
    let mut groups: IndexMap<String, Vec<Destination>> = IndexMap::new();
    for destination in destinations {
        groups
            .entry(key(destination).to_owned())
            .or_default()
            .push(destination.clone());
    }
    groups
}

#[must_use]
pub fn group_by_category(destinations: &[Destination]) -> IndexMap<String, Vec<Destination>> {
    group_by(destinations, |d| &d.category)
}

#[must_use]
pub fn group_by_state(destinations: &[Destination]) -> IndexMap<String, Vec<Destination>> {
    group_by(destinations, |d| &d.state)
}

/// Distinct categories, alphabetically
#[must_use]
pub fn unique_categories(destinations: &[Destination]) -> Vec<String> {
    let unique: BTreeSet<&str> = destinations.iter().map(|d| d.category.as_str()).collect();
    unique.into_iter().map(str::to_owned).collect()
}

/// Distinct states, alphabetically
#[must_use]
pub fn unique_states(destinations: &[Destination]) -> Vec<String> {
    let unique: BTreeSet<&str> = destinations.iter().map(|d| d.state.as_str()).collect();
    unique.into_iter().map(str::to_owned).collect()
}

#[must_use]
pub fn format_best_time(best_time: &str) -> &str {
    if best_time.is_empty() {
        "Year round"
    } else {
        best_time
    }
}

/// First `max_chars` characters followed by `...` when the text is longer
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::destination::fixtures::destination;
    use rstest::rstest;

    fn dest(id: &str, category: &str, state: &str, city: &str) -> Destination {
        let mut d = destination(id);
        d.name = id.replace('-', " ");
        d.category = category.to_string();
        d.state = state.to_string();
        d.city = city.to_string();
        d
    }

    fn catalog() -> Vec<Destination> {
        let mut taj = dest("Taj Mahal", "Heritage", "Uttar Pradesh", "Agra");
        taj.description = "Marble mausoleum".to_string();
        let mut fort = dest("Agra Fort", "Heritage", "Uttar Pradesh", "Agra");
        fort.description = "Red sandstone fort near the Taj, on the Yamuna".to_string();
        let baga = dest("Baga Beach", "Beach", "Goa", "Calangute");
        let manali = dest("Solang Valley", "Adventure", "Himachal Pradesh", "Manali");
        vec![taj, fort, baga, manali]
    }

    fn ids(destinations: &[Destination]) -> Vec<&str> {
        destinations.iter().map(|d| d.id.as_str()).collect()
    }

    fn with_ratings(ratings: &[f64]) -> Vec<Destination> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| {
                let mut d = destination(&format!("d{i}"));
                d.rating = *rating;
                d
            })
            .collect()
    }

    #[rstest]
    #[case(None, 4)]
    #[case(Some(""), 4)]
    #[case(Some("All"), 4)]
    #[case(Some("Heritage"), 2)]
    #[case(Some("heritage"), 0)]
    fn test_filter_by_category(#[case] category: Option<&str>, #[case] expected: usize) {
        assert_eq!(filter_by_category(&catalog(), category).len(), expected);
    }

    #[rstest]
    #[case(Some("Goa"), vec!["Baga Beach"])]
    #[case(Some("All"), vec!["Taj Mahal", "Agra Fort", "Baga Beach", "Solang Valley"])]
    #[case(Some("Go"), vec![])]
    fn test_filter_by_state(#[case] state: Option<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(ids(&filter_by_state(&catalog(), state)), expected);
    }

    #[test]
    fn test_filter_by_city_substring_case_insensitive() {
        assert_eq!(
            ids(&filter_by_city(&catalog(), Some("AGR"))),
            vec!["Taj Mahal", "Agra Fort"]
        );
        assert_eq!(ids(&filter_by_city(&catalog(), Some("nal"))), vec!["Solang Valley"]);
    }

    #[test]
    fn test_search_text_scenario() {
        let found = search_text(&catalog(), Some("taj"));
        assert_eq!(ids(&found), vec!["Taj Mahal", "Agra Fort"]);
    }

    #[test]
    fn test_search_matches_state() {
        assert_eq!(ids(&search_text(&catalog(), Some("himachal"))), vec!["Solang Valley"]);
    }

    #[test]
    fn test_apply_filters_composes() {
        let filters = DestinationFilters {
            category: Some("Heritage".to_string()),
            state: Some("Uttar Pradesh".to_string()),
            city: Some("agra".to_string()),
            search: Some("fort".to_string()),
        };
        assert_eq!(ids(&apply_filters(&catalog(), &filters)), vec!["Agra Fort"]);
    }

    #[test]
    fn test_apply_filters_without_filters_is_identity() {
        let list = catalog();
        let result = apply_filters(&list, &DestinationFilters::default());
        assert_eq!(result, list);

        let blank = DestinationFilters {
            category: Some(String::new()),
            state: Some("All".to_string()),
            city: Some(String::new()),
            search: Some(String::new()),
        };
        assert_eq!(apply_filters(&list, &blank), list);
    }

    #[test]
    fn test_apply_filters_is_subset() {
        let list = catalog();
        let filters = DestinationFilters {
            search: Some("a".to_string()),
            ..Default::default()
        };
        let result = apply_filters(&list, &filters);
        assert!(result.iter().all(|d| list.contains(d)));
    }

    #[test]
    fn test_sort_by_rating_desc_is_stable() {
        let list = with_ratings(&[3.5, 4.8, 4.8, 2.1]);
        let sorted = sort_by_rating(&list, SortOrder::Desc);
        let ratings: Vec<f64> = sorted.iter().map(|d| d.rating).collect();
        assert_eq!(ratings, vec![4.8, 4.8, 3.5, 2.1]);
        assert_eq!(ids(&sorted), vec!["d1", "d2", "d0", "d3"]);
    }

    #[test]
    fn test_sort_by_rating_asc_puts_nan_last() {
        let list = with_ratings(&[f64::NAN, 4.0, 1.0]);
        assert_eq!(ids(&sort_by_rating(&list, SortOrder::Asc)), vec!["d2", "d1", "d0"]);
        assert_eq!(ids(&sort_by_rating(&list, SortOrder::Desc)), vec!["d1", "d2", "d0"]);
    }

    #[test]
    fn test_sort_by_distance_along_great_circle() {
        // B lies on the meridian between A and C, closer to A
        let mut b = destination("b");
        b.latitude = 10.0;
        b.longitude = 77.0;
        let mut c = destination("c");
        c.latitude = 20.0;
        c.longitude = 77.0;
        let unknown = destination("unknown");

        let origin = Location::new(0.0, 77.0);
        let ranked = sort_by_distance(&[unknown, c, b], &origin);
        let order: Vec<&str> = ranked.iter().map(|r| r.destination.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "unknown"]);
        assert!((ranked[0].distance - 1111.95).abs() < 1.0);
        assert!(ranked[2].distance.is_nan());
    }

    #[test]
    fn test_sort_by_distance_ties_are_stable() {
        let mut first = destination("first");
        first.latitude = 1.0;
        first.longitude = 0.0;
        let mut second = destination("second");
        second.latitude = -1.0;
        second.longitude = 0.0;

        let ranked = sort_by_distance(&[first, second], &Location::new(0.0, 0.0));
        assert_eq!(ranked[0].destination.id, "first");
        assert_eq!(ranked[1].destination.id, "second");
    }

    #[test]
    fn test_filter_by_distance() {
        let mut near = destination("near");
        near.latitude = 27.18;
        near.longitude = 78.02;
        let mut far = destination("far");
        far.latitude = 15.3;
        far.longitude = 74.1;
        let agra = Location::new(27.1751, 78.0421);
        assert_eq!(ids(&filter_by_distance(&[far, near], &agra, 50.0)), vec!["near"]);
    }

    #[test]
    fn test_grouping_preserves_order() {
        let groups = group_by_category(&catalog());
        assert_eq!(
            groups.keys().collect::<Vec<_>>(),
            vec!["Heritage", "Beach", "Adventure"]
        );
        assert_eq!(ids(&groups["Heritage"]), vec!["Taj Mahal", "Agra Fort"]);

        let by_state = group_by_state(&catalog());
        assert_eq!(by_state["Uttar Pradesh"].len(), 2);
        assert_eq!(by_state["Goa"].len(), 1);
    }

    #[test]
    fn test_unique_values_sorted() {
        assert_eq!(unique_categories(&catalog()), vec!["Adventure", "Beach", "Heritage"]);
        assert_eq!(
            unique_states(&catalog()),
            vec!["Goa", "Himachal Pradesh", "Uttar Pradesh"]
        );
    }

    #[rstest]
    #[case("Hello world", 5, "Hello...")]
    #[case("Hello", 5, "Hello")]
    #[case("Ünïcödé", 3, "Ünï...")]
    fn test_truncate_text(#[case] text: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(truncate_text(text, max), expected);
    }

    #[test]
    fn test_format_best_time() {
        assert_eq!(format_best_time(""), "Year round");
        assert_eq!(format_best_time("November to February"), "November to February");
    }
}
