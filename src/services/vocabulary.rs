//! Vocabulary loading and French collation.
//!
//! The [`VocabularySet`] is built once at session start and never mutated afterwards.
//! Entries are sorted by term with a case- and accent-insensitive French collation;
//! entries whose keys compare equal keep their dataset order.

use crate::models::{Definition, Entry, RawEntry};
use camino::Utf8Path;
use std::collections::BTreeSet;
use std::fs;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Errors that can occur while loading the vocabulary dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset is not a list of vocabulary records: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Dataset contains no entries")]
    Empty,

    #[error("Entry {index} has no term")]
    MissingTerm { index: usize },
}

/// Immutable, collation-sorted list of vocabulary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularySet {
    entries: Vec<Entry>,
}

impl VocabularySet {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted, de-duplicated non-empty categories for the category selector.
    pub fn categories(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|e| e.category.as_deref())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Loader for the vocabulary dataset.
pub struct VocabularyStore;

impl VocabularyStore {
    /// Validate and sort raw dataset records.
    ///
    /// Every record needs a non-empty term. Records without definitions are kept
    /// with an empty definitions list.
    pub fn load(raw_entries: Vec<RawEntry>) -> Result<VocabularySet, LoadError> {
        if raw_entries.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut entries = Vec::with_capacity(raw_entries.len());
        for (index, raw) in raw_entries.into_iter().enumerate() {
            let term = match raw.term {
                Some(term) if !term.trim().is_empty() => term,
                _ => return Err(LoadError::MissingTerm { index }),
            };

            let definitions: Vec<Definition> = raw
                .definitions
                .unwrap_or_default()
                .into_iter()
                .map(Definition::from)
                .collect();

            if definitions.is_empty() {
                tracing::warn!("Entry '{}' has no definitions", term);
            }

            entries.push(Entry {
                term,
                category: raw.category,
                definitions,
            });
        }

        // sort_by_cached_key is stable: equal keys keep dataset order
        entries.sort_by_cached_key(|e| collation_key(&e.term));

        tracing::info!("Loaded {} vocabulary entries", entries.len());
        Ok(VocabularySet { entries })
    }

    /// Parse the JSON dataset format and load it.
    pub fn load_json(text: &str) -> Result<VocabularySet, LoadError> {
        let raw_entries: Vec<RawEntry> = serde_json::from_str(text)?;
        Self::load(raw_entries)
    }

    /// Read a JSON dataset from disk and load it.
    pub fn load_file(path: &Utf8Path) -> Result<VocabularySet, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::load_json(&text)
    }
}

/// Sort key approximating French collation at base strength.
///
/// Case and accents are ignored: the term is decomposed, combining marks are dropped
/// and the remainder is lowercased. The `œ` and `æ` ligatures sort as `oe` and `ae`.
pub fn collation_key(term: &str) -> String {
    let mut key = String::with_capacity(term.len());
    for c in term.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'œ' | 'Œ' => key.push_str("oe"),
            'æ' | 'Æ' => key.push_str("ae"),
            _ => key.extend(c.to_lowercase()),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawDefinition;

    fn raw(term: &str, category: Option<&str>, translation: Option<&str>) -> RawEntry {
        RawEntry {
            term: Some(term.to_string()),
            category: category.map(str::to_string),
            definitions: translation.map(|t| {
                vec![RawDefinition {
                    translation: t.to_string(),
                    example_source: String::new(),
                    example_target: String::new(),
                }]
            }),
        }
    }

    fn terms(set: &VocabularySet) -> Vec<&str> {
        set.entries().iter().map(|e| e.term.as_str()).collect()
    }

    #[test]
    fn test_collation_key_folds_case_and_accents() {
        assert_eq!(collation_key("Été"), "ete");
        assert_eq!(collation_key("ÇA"), "ca");
        assert_eq!(collation_key("cœur"), "coeur");
        assert_eq!(collation_key("Ex æquo"), "ex aequo");
    }

    #[test]
    fn test_load_sorts_french_terms() {
        let set = VocabularyStore::load(vec![
            raw("être", None, Some("ser")),
            raw("école", None, Some("escuela")),
            raw("Zèbre", None, Some("cebra")),
            raw("abricot", None, Some("albaricoque")),
            raw("élève", None, Some("alumno")),
        ])
        .unwrap();

        assert_eq!(terms(&set), vec!["abricot", "école", "élève", "être", "Zèbre"]);
    }

    #[test]
    fn test_load_is_stable_for_equal_keys() {
        let set = VocabularyStore::load(vec![
            raw("côte", None, Some("costa")),
            raw("cote", None, Some("cota")),
            raw("Côté", None, Some("lado")),
        ])
        .unwrap();

        assert_eq!(terms(&set), vec!["côte", "cote", "Côté"]);
    }

    #[test]
    fn test_load_rejects_empty_dataset() {
        assert!(matches!(VocabularyStore::load(Vec::new()), Err(LoadError::Empty)));
    }

    #[test]
    fn test_load_rejects_missing_term() {
        let mut blank = raw("", None, Some("nada"));
        let result = VocabularyStore::load(vec![raw("chat", None, Some("gato")), blank.clone()]);
        assert!(matches!(result, Err(LoadError::MissingTerm { index: 1 })));

        blank.term = None;
        let result = VocabularyStore::load(vec![blank]);
        assert!(matches!(result, Err(LoadError::MissingTerm { index: 0 })));
    }

    #[test]
    fn test_load_accepts_entry_without_definitions() {
        let set = VocabularyStore::load(vec![raw("maison", None, None)]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.entries()[0].definitions.is_empty());
    }

    #[test]
    fn test_load_json_malformed() {
        assert!(matches!(
            VocabularyStore::load_json(r#"{"not": "a list"}"#),
            Err(LoadError::Malformed(_))
        ));
        assert!(matches!(VocabularyStore::load_json("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_categories_sorted_and_unique() {
        let set = VocabularyStore::load(vec![
            raw("table", Some("objets"), Some("mesa")),
            raw("chat", Some("animaux"), Some("gato")),
            raw("chien", Some("animaux"), Some("perro")),
            raw("bonjour", None, Some("hola")),
            raw("vite", Some(""), Some("rápido")),
        ])
        .unwrap();

        assert_eq!(set.categories(), vec!["animaux", "objets"]);
    }
}
