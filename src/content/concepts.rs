//! Concept reference text - the source material behind each flashcard.
//!
//! The table is compiled into the binary from `data/concept_texts.toml` and
//! parsed on first use. Lookups never fail: a missing concept number falls
//! back to a fixed message.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Shown when a concept number has no reference text.
pub const FALLBACK_TEXT: &str = "Source material not found.";

const CONCEPT_TEXTS_TOML: &str = include_str!("../../data/concept_texts.toml");

/// Read-only source of reference text keyed by concept number.
pub trait ReferenceSource {
    fn lookup(&self, concept_number: u32) -> Option<&str>;

    /// Reference text, or [`FALLBACK_TEXT`] on a miss.
    fn text_or_fallback(&self, concept_number: u32) -> &str {
        match self.lookup(concept_number) {
            Some(text) => text,
            None => {
                tracing::debug!("No reference text for concept #{}", concept_number);
                FALLBACK_TEXT
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConceptFile {
    #[serde(default)]
    concept: Vec<ConceptEntry>,
}

#[derive(Debug, Deserialize)]
struct ConceptEntry {
    number: u32,
    text: String,
}

/// Concept number -> reference text.
#[derive(Debug, Clone, Default)]
pub struct ConceptTable {
    texts: HashMap<u32, String>,
}

static BUILTIN: LazyLock<ConceptTable> = LazyLock::new(|| {
    ConceptTable::from_toml(CONCEPT_TEXTS_TOML).unwrap_or_else(|e| {
        tracing::error!("Built-in concept table is invalid: {}", e);
        ConceptTable::default()
    })
});

impl ConceptTable {
    /// The table shipped with the binary.
    pub fn builtin() -> &'static ConceptTable {
        &BUILTIN
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConceptFile = toml::from_str(content)?;
        let texts = file
            .concept
            .into_iter()
            .map(|entry| (entry.number, entry.text))
            .collect();
        Ok(Self { texts })
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, String)>,
    {
        Self {
            texts: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl ReferenceSource for ConceptTable {
    fn lookup(&self, concept_number: u32) -> Option<&str> {
        self.texts.get(&concept_number).map(String::as_str)
    }
}
