//! Flashcard deck loading - reads question records from a JSON file.
//!
//! The deck is loaded once at startup and shared read-only by every quiz
//! session. A failed load is terminal: the server keeps running but only
//! renders the load error page.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlashcardRecord {
    pub question_text: String,
    /// Key into the concept reference table
    #[serde(deserialize_with = "deserialize_concept_number")]
    pub concept_number: u32,
    pub concept_name: String,
    pub correct_answer: String,
    pub wrong_answer_1: String,
    pub wrong_answer_2: String,
    pub wrong_answer_3: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Concept numbers show up both as JSON numbers and as numeric strings.
fn deserialize_concept_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid concept number: {:?}", s))),
    }
}

impl FlashcardRecord {
    /// Decoy answers in file order.
    pub fn wrong_answers(&self) -> [&str; 3] {
        [
            &self.wrong_answer_1,
            &self.wrong_answer_2,
            &self.wrong_answer_3,
        ]
    }

    /// All four choices, correct answer first (unshuffled).
    pub fn choices(&self) -> [String; 4] {
        [
            self.correct_answer.clone(),
            self.wrong_answer_1.clone(),
            self.wrong_answer_2.clone(),
            self.wrong_answer_3.clone(),
        ]
    }

    pub fn explanation_text(&self) -> &str {
        self.explanation.as_deref().unwrap_or("")
    }

    /// Display label, e.g. "Concept #1: Centerline Theory"
    pub fn concept_label(&self) -> String {
        format!("Concept #{}: {}", self.concept_number, self.concept_name)
    }

    /// True if the correct answer also appears among the decoys, which makes
    /// judging by text ambiguous.
    pub fn has_ambiguous_choices(&self) -> bool {
        self.wrong_answers().contains(&self.correct_answer.as_str())
    }
}

/// The full deck, in file order. Never empty once loaded.
#[derive(Debug, Clone)]
pub struct FlashcardStore {
    cards: Vec<FlashcardRecord>,
}

impl FlashcardStore {
    /// Load the deck from a JSON array of flashcard records.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| LoadError::IoError(path.display().to_string(), e.to_string()))?;

        let store = Self::from_json(&content).map_err(|e| match e {
            LoadError::ParseError(_, err) => LoadError::ParseError(path.display().to_string(), err),
            other => other,
        })?;

        tracing::info!("Loaded {} flashcards from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let cards: Vec<FlashcardRecord> = serde_json::from_str(content)
            .map_err(|e| LoadError::ParseError("<inline>".to_string(), e.to_string()))?;
        Self::from_records(cards)
    }

    pub fn from_records(cards: Vec<FlashcardRecord>) -> Result<Self, LoadError> {
        if cards.is_empty() {
            return Err(LoadError::Empty);
        }

        for card in cards.iter().filter(|c| c.has_ambiguous_choices()) {
            tracing::warn!(
                "Flashcard {:?} lists its correct answer among the wrong answers",
                card.question_text
            );
        }

        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[FlashcardRecord] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&FlashcardRecord> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Deck loading errors.
#[derive(Debug)]
pub enum LoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    Empty,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "Flashcard file not found: {}", path),
            LoadError::IoError(path, err) => write!(f, "IO error reading {}: {}", path, err),
            LoadError::ParseError(path, err) => write!(f, "Parse error in {}: {}", path, err),
            LoadError::Empty => write!(f, "No flashcards found in deck"),
        }
    }
}

impl LoadError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Empty => "No flashcards found. Please refresh the page.",
            _ => "Error loading flashcards. Please refresh the page.",
        }
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DECK_JSON: &str = r#"[
        {
            "question_text": "Where is all offense directed?",
            "concept_number": 1,
            "concept_name": "Centerline Theory",
            "correct_answer": "The centerline",
            "wrong_answer_1": "The outside line",
            "wrong_answer_2": "The high line",
            "wrong_answer_3": "The low line",
            "explanation": "All offense is directed to the centerline."
        },
        {
            "question_text": "What is the shortest distance between two points?",
            "concept_number": "2",
            "concept_name": "Economy of Motion Theory",
            "correct_answer": "A straight line",
            "wrong_answer_1": "A circle",
            "wrong_answer_2": "An arc",
            "wrong_answer_3": "A zigzag",
            "explanation": null
        }
    ]"#;

    #[test]
    fn test_from_json_parses_records_in_order() {
        let store = FlashcardStore::from_json(DECK_JSON).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.cards()[0].concept_number, 1);
        assert_eq!(store.cards()[1].concept_name, "Economy of Motion Theory");
    }

    #[test]
    fn test_concept_number_accepts_numeric_string() {
        let store = FlashcardStore::from_json(DECK_JSON).unwrap();
        assert_eq!(store.cards()[1].concept_number, 2);
    }

    #[test]
    fn test_non_numeric_concept_number_is_parse_error() {
        let json = DECK_JSON.replace(r#""concept_number": "2""#, r#""concept_number": "two""#);
        let err = FlashcardStore::from_json(&json).unwrap_err();
        assert!(matches!(err, LoadError::ParseError(_, _)));
    }

    #[test]
    fn test_missing_explanation_is_empty_text() {
        let store = FlashcardStore::from_json(DECK_JSON).unwrap();
        assert_eq!(store.cards()[1].explanation, None);
        assert_eq!(store.cards()[1].explanation_text(), "");
        assert_eq!(
            store.cards()[0].explanation_text(),
            "All offense is directed to the centerline."
        );
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let json = r#"[{"question_text": "Q", "concept_number": 1}]"#;
        let err = FlashcardStore::from_json(json).unwrap_err();
        assert!(matches!(err, LoadError::ParseError(_, _)));
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let err = FlashcardStore::from_json("[]").unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_choices_put_correct_answer_first() {
        let store = FlashcardStore::from_json(DECK_JSON).unwrap();
        let card = &store.cards()[0];
        assert_eq!(
            card.choices(),
            [
                "The centerline".to_string(),
                "The outside line".to_string(),
                "The high line".to_string(),
                "The low line".to_string(),
            ]
        );
        assert_eq!(card.concept_label(), "Concept #1: Centerline Theory");
        assert!(!card.has_ambiguous_choices());
    }

    #[test]
    fn test_ambiguous_choices_detected() {
        let json = DECK_JSON.replace("The high line", "The centerline");
        let store = FlashcardStore::from_json(&json).unwrap();
        assert!(store.cards()[0].has_ambiguous_choices());
    }

    #[test]
    fn test_shipped_deck_parses() {
        let store = FlashcardStore::from_json(include_str!("../../data/flashcards.json")).unwrap();
        assert!(!store.is_empty());
        assert!(store.cards().iter().all(|c| !c.has_ambiguous_choices()));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("flashcards.json");
        fs::write(&path, DECK_JSON).unwrap();

        let store = FlashcardStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = FlashcardStore::load(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
        assert_eq!(
            err.user_message(),
            "Error loading flashcards. Please refresh the page."
        );
    }

    #[test]
    fn test_load_malformed_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FlashcardStore::load(&path).unwrap_err();
        match err {
            LoadError::ParseError(p, _) => assert!(p.ends_with("broken.json")),
            other => panic!("unexpected error: {}", other),
        }
    }
}
