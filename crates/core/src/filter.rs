//! Category filter and free-text search over a catalog.

use tracing::debug;

use crate::catalog::{Catalog, Category, RestaurantRecord};

/// The category selector: a specific category or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector options in display order.
    pub const OPTIONS: &[CategoryFilter] = &[
        Self::All,
        Self::Only(Category::Veg),
        Self::Only(Category::NonVeg),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Hotels",
            Self::Only(category) => category.label(),
        }
    }

    pub fn accepts(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == category,
        }
    }
}

/// A complete filter: category plus search text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query {
    pub category: CategoryFilter,
    pub search: String,
}

impl Query {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// Whether a record passes both the category and the text predicate.
    ///
    /// Text matching is a case-insensitive substring test against the title
    /// or the description; an empty search matches everything.
    pub fn matches(&self, record: &RestaurantRecord) -> bool {
        if !self.category.accepts(record.category) {
            return false;
        }
        let needle = self.search.to_lowercase();
        record.title.to_lowercase().contains(&needle)
            || record.description.to_lowercase().contains(&needle)
    }

    /// Indices of matching records, in catalog order.
    pub fn apply(&self, catalog: &Catalog) -> Vec<usize> {
        catalog
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    category: CategoryFilter,
    search: String,
    revision: u64,
}

/// Memoized filter results, keyed on (category, search, catalog revision).
#[derive(Debug, Default)]
pub struct FilterCache {
    key: Option<CacheKey>,
    indices: Vec<usize>,
    recomputations: u64,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching indices for `query` over `catalog`, recomputed only when the
    /// key changed since the last call.
    pub fn get(&mut self, catalog: &Catalog, query: &Query) -> &[usize] {
        let fresh = match &self.key {
            Some(key) => {
                key.revision == catalog.revision()
                    && key.category == query.category
                    && key.search == query.search
            }
            None => false,
        };
        if !fresh {
            self.indices = query.apply(catalog);
            self.key = Some(CacheKey {
                category: query.category,
                search: query.search.clone(),
                revision: catalog.revision(),
            });
            self.recomputations += 1;
            debug!(
                matches = self.indices.len(),
                run = self.recomputations,
                "filtered catalog"
            );
        }
        &self.indices
    }

    /// How many times the result has been computed (not served from cache).
    #[cfg(test)]
    fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn record(title: &str, description: &str, category: Category) -> RestaurantRecord {
        RestaurantRecord::new(Coordinate::new(0.0, 0.0), title, description, category, None)
    }

    #[test]
    fn empty_search_matches_everything_in_category() {
        let q = Query::new(CategoryFilter::Only(Category::Veg), "");
        assert!(q.matches(&record("A", "b", Category::Veg)));
        assert!(!q.matches(&record("A", "b", Category::NonVeg)));
    }

    #[test]
    fn search_hits_description() {
        let q = Query::new(CategoryFilter::All, "irani");
        assert!(q.matches(&record("Goodluck", "Irani cafe", Category::NonVeg)));
        assert!(!q.matches(&record("Goodluck", "Cafe", Category::NonVeg)));
    }

    #[test]
    fn search_is_case_insensitive_both_ways() {
        let rec = record("PK Biryani", "Non-vegetarian restaurant", Category::NonVeg);
        assert!(Query::new(CategoryFilter::All, "BIRYANI").matches(&rec));
        assert!(Query::new(CategoryFilter::All, "pk bir").matches(&rec));
    }

    #[test]
    fn search_is_not_trimmed() {
        // A trailing space is part of the needle.
        let rec = record("Shree Ganesh", "Vegetarian restaurant", Category::Veg);
        assert!(Query::new(CategoryFilter::All, "shree ").matches(&rec));
        assert!(!Query::new(CategoryFilter::All, "ganesh ").matches(&rec));
    }

    #[test]
    fn filter_labels() {
        let labels: Vec<_> = CategoryFilter::OPTIONS.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["All Hotels", "Vegetarian", "Non-Vegetarian"]);
    }

    #[test]
    fn cache_reuses_until_key_changes() {
        let catalog = Catalog::builtin();
        let mut cache = FilterCache::new();
        let mut query = Query::default();

        assert_eq!(cache.get(&catalog, &query).len(), 4);
        assert_eq!(cache.get(&catalog, &query).len(), 4);
        assert_eq!(cache.recomputations(), 1);

        query.search = "veg".into();
        cache.get(&catalog, &query);
        assert_eq!(cache.recomputations(), 2);

        query.category = CategoryFilter::Only(Category::NonVeg);
        cache.get(&catalog, &query);
        assert_eq!(cache.recomputations(), 3);
    }

    #[test]
    fn cache_invalidated_by_new_catalog() {
        let mut cache = FilterCache::new();
        let query = Query::default();
        cache.get(&Catalog::builtin(), &query);
        let other = Catalog::new(vec![record("Solo", "", Category::Veg)]);
        assert_eq!(cache.get(&other, &query), &[0]);
        assert_eq!(cache.recomputations(), 2);
    }
}
