use serde::{Deserialize, Serialize};

/// One translation sense of a vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Spanish translation of the term
    pub translation: String,

    /// Example sentence in French
    pub example_source: String,

    /// The same example sentence in Spanish
    pub example_target: String,
}

/// One vocabulary item: a French term, its optional category and its definitions.
///
/// Definition order is display-significant. The first definition's translation is
/// the canonical answer used by quiz mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub term: String,
    pub category: Option<String>,
    pub definitions: Vec<Definition>,
}

impl Entry {
    /// Translation of the first definition, if the entry has any.
    pub fn primary_translation(&self) -> Option<&str> {
        self.definitions.first().map(|d| d.translation.as_str())
    }
}

/// Dataset record as it appears in `vocabulario.json`.
///
/// Field names follow the dataset's Spanish keys. Missing definitions are accepted
/// and produce an entry with an empty definitions section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "Término en francés", default)]
    pub term: Option<String>,

    #[serde(rename = "categoría", default)]
    pub category: Option<String>,

    #[serde(rename = "definiciones", default)]
    pub definitions: Option<Vec<RawDefinition>>,
}

/// Dataset definition record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDefinition {
    #[serde(rename = "Término en español")]
    pub translation: String,

    #[serde(rename = "Ejemplo en francés", default)]
    pub example_source: String,

    #[serde(rename = "Ejemplo en español", default)]
    pub example_target: String,
}

impl From<RawDefinition> for Definition {
    fn from(raw: RawDefinition) -> Self {
        Self {
            translation: raw.translation,
            example_source: raw.example_source,
            example_target: raw.example_target,
        }
    }
}
