//! Application state shared by all handlers.

use std::sync::Arc;

use crate::content::{FlashcardStore, LoadError, ReferenceSource};
use crate::session::SessionStore;

/// Outcome of the one-time deck load
#[derive(Clone)]
pub enum DeckStatus {
  Ready(Arc<FlashcardStore>),
  /// Load failed; nothing but the error page is reachable
  Failed(Arc<LoadError>),
}

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  pub deck: DeckStatus,
  /// Concept reference table
  pub reference: Arc<dyn ReferenceSource + Send + Sync>,
  pub sessions: SessionStore,
}

impl AppState {
  pub fn new(
    deck: Result<FlashcardStore, LoadError>,
    reference: Arc<dyn ReferenceSource + Send + Sync>,
  ) -> Self {
    let deck = match deck {
      Ok(store) => DeckStatus::Ready(Arc::new(store)),
      Err(e) => {
        tracing::error!("Error loading flashcards: {}", e);
        DeckStatus::Failed(Arc::new(e))
      }
    };
    Self {
      deck,
      reference,
      sessions: SessionStore::new(),
    }
  }
}
