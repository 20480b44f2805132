//! Reference data: tourism categories and featured states

use serde::Serialize;

/// A tourism category with its one-line description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub description: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Heritage",
        description: "Historic monuments, palaces, and architectural marvels",
    },
    Category {
        name: "Beach",
        description: "Coastal destinations with beautiful beaches and water activities",
    },
    Category {
        name: "Adventure",
        description: "Thrilling activities like trekking, skiing, and paragliding",
    },
    Category {
        name: "Nature",
        description: "Natural landscapes, forests, and scenic beauty",
    },
    Category {
        name: "Spiritual",
        description: "Religious sites, temples, and meditation centers",
    },
    Category {
        name: "Wildlife",
        description: "National parks, sanctuaries, and animal reserves",
    },
    Category {
        name: "Hill Station",
        description: "Mountain retreats with cool climate and scenic views",
    },
    Category {
        name: "Cultural",
        description: "Places showcasing art, traditions, and local culture",
    },
    Category {
        name: "Historical",
        description: "Sites of historical significance and ancient civilizations",
    },
    Category {
        name: "Urban",
        description: "Modern cities with shopping, entertainment, and nightlife",
    },
];

/// States with popular tourist destinations
pub const FEATURED_STATES: &[&str] = &[
    "Uttar Pradesh",
    "Goa",
    "Himachal Pradesh",
    "Rajasthan",
    "Kerala",
    "Karnataka",
    "Maharashtra",
    "Tamil Nadu",
    "Gujarat",
    "West Bengal",
    "Uttarakhand",
    "Jammu and Kashmir",
    "Ladakh",
    "Punjab",
    "Odisha",
];

#[must_use]
pub fn category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        let hill = category("Hill Station").unwrap();
        assert!(hill.description.contains("Mountain"));
        assert!(category("hill station").is_none());
    }

    #[test]
    fn test_reference_lists() {
        assert_eq!(CATEGORIES.len(), 10);
        assert!(FEATURED_STATES.contains(&"Kerala"));
    }
}
