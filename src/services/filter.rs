use crate::services::vocabulary::VocabularySet;

/// Selector value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Category half of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Build from a selector value, where `"all"` is the sentinel for no restriction.
    pub fn from_selector(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

/// Current search text and category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: String,
    pub category: CategoryFilter,
}

impl Filter {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.search.is_empty() && self.category == CategoryFilter::All
    }
}

/// Filtered, order-preserving view of a [`VocabularySet`].
///
/// Holds positions into the vocabulary set, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    positions: Vec<usize>,
}

impl ActiveSet {
    /// Every entry of the vocabulary set.
    pub fn full(vocabulary: &VocabularySet) -> Self {
        Self {
            positions: (0..vocabulary.len()).collect(),
        }
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.positions.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Derives the active set from a vocabulary set and a filter.
pub struct FilterEngine;

impl FilterEngine {
    /// Select the entries matching `filter`, keeping vocabulary order.
    ///
    /// An entry matches when the lowercased search text is empty or occurs in its
    /// lowercased term or any lowercased translation, and its category satisfies the
    /// category selector.
    pub fn apply(vocabulary: &VocabularySet, filter: &Filter) -> ActiveSet {
        let needle = filter.search.to_lowercase();

        let positions: Vec<usize> = vocabulary
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let matches_search = needle.is_empty()
                    || entry.term.to_lowercase().contains(&needle)
                    || entry
                        .definitions
                        .iter()
                        .any(|d| d.translation.to_lowercase().contains(&needle));
                matches_search && filter.category.matches(entry.category.as_deref())
            })
            .map(|(position, _)| position)
            .collect();

        tracing::debug!(
            "Filter search={:?} category={:?} matched {}/{} entries",
            filter.search,
            filter.category,
            positions.len(),
            vocabulary.len()
        );

        ActiveSet { positions }
    }
}
