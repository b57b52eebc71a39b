// ABOUTME: Supported cuisine categories and how each maps onto provider queries
// ABOUTME: TheMealDB area/category filters, search terms, and Spoonacular cuisine names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// How one cuisine is queried across providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuisineMapping {
    /// Lowercase cuisine key used in routes and cache keys
    pub key: &'static str,
    /// TheMealDB area filter (`filter.php?a=`)
    pub area: Option<&'static str>,
    /// TheMealDB category filter (`filter.php?c=`)
    pub category: Option<&'static str>,
    /// TheMealDB search terms in priority order (`search.php?s=`)
    pub search_terms: &'static [&'static str],
    /// Spoonacular `cuisine` parameter
    pub spoonacular: &'static str,
}

/// Every supported cuisine, in display order
pub const SUPPORTED_CUISINES: &[CuisineMapping] = &[
    CuisineMapping {
        key: "italian",
        area: Some("Italian"),
        category: Some("Pasta"),
        search_terms: &["pasta", "pizza", "risotto", "lasagne", "carbonara", "tiramisu", "spaghetti"],
        spoonacular: "Italian",
    },
    CuisineMapping {
        key: "pakistani",
        area: None,
        category: None,
        search_terms: &[
            "biryani", "kebab", "curry", "naan", "pakora", "samosa", "halwa", "korma", "tandoori",
        ],
        spoonacular: "Indian",
    },
    CuisineMapping {
        key: "indian",
        area: Some("Indian"),
        category: None,
        search_terms: &[
            "curry", "biryani", "tikka", "masala", "dal", "samosa", "naan", "butter chicken",
        ],
        spoonacular: "Indian",
    },
    CuisineMapping {
        key: "chinese",
        area: Some("Chinese"),
        category: None,
        search_terms: &[
            "chow", "fried rice", "dumpling", "sweet and sour", "kung pao", "lo mein", "chow mein",
        ],
        spoonacular: "Chinese",
    },
    CuisineMapping {
        key: "mexican",
        area: Some("Mexican"),
        category: None,
        search_terms: &["taco", "burrito", "enchilada", "quesadilla", "guacamole", "salsa", "fajita"],
        spoonacular: "Mexican",
    },
    CuisineMapping {
        key: "thai",
        area: Some("Thai"),
        category: None,
        search_terms: &[
            "pad thai", "curry", "tom yum", "satay", "green curry", "mango sticky rice", "thai",
        ],
        spoonacular: "Thai",
    },
    CuisineMapping {
        key: "mediterranean",
        area: Some("Greek"),
        category: None,
        search_terms: &["hummus", "falafel", "shakshuka", "tzatziki", "moussaka", "baklava", "greek"],
        spoonacular: "Mediterranean",
    },
];

/// Mapping for a cuisine, matched case-insensitively
#[must_use]
pub fn lookup(cuisine: &str) -> Option<&'static CuisineMapping> {
    let key = cuisine.trim().to_lowercase();
    SUPPORTED_CUISINES.iter().find(|mapping| mapping.key == key)
}

/// Supported cuisine keys in display order
#[must_use]
pub fn keys() -> Vec<&'static str> {
    SUPPORTED_CUISINES.iter().map(|mapping| mapping.key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mapping = lookup(" Italian ").unwrap();
        assert_eq!(mapping.area, Some("Italian"));
        assert_eq!(mapping.category, Some("Pasta"));
        assert!(lookup("martian").is_none());
    }

    #[test]
    fn test_pakistani_has_no_area() {
        let mapping = lookup("pakistani").unwrap();
        assert!(mapping.area.is_none());
        assert_eq!(mapping.search_terms[0], "biryani");
    }

    #[test]
    fn test_keys_in_display_order() {
        assert_eq!(
            keys(),
            vec!["italian", "pakistani", "indian", "chinese", "mexican", "thai", "mediterranean"]
        );
    }
}
