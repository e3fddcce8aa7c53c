//! Static quiz content: the flashcard deck and the concept reference table.

pub mod cards;
pub mod concepts;

pub use cards::{FlashcardRecord, FlashcardStore, LoadError};
pub use concepts::{ConceptTable, FALLBACK_TEXT, ReferenceSource};
