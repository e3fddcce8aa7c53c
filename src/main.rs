use std::sync::Arc;

use jkd_quiz::content::{ConceptTable, FlashcardStore};
use jkd_quiz::state::AppState;
use jkd_quiz::{config, handlers, logging};

#[tokio::main]
async fn main() {
  logging::init();

  // One attempt; a failure is served as the error page until restart
  let deck_path = config::load_flashcards_path();
  let deck = FlashcardStore::load(&deck_path);

  let reference = Arc::new(ConceptTable::builtin().clone());
  tracing::debug!("Concept reference table has {} entries", reference.len());

  let app = handlers::router(AppState::new(deck, reference));

  let bind_addr = config::server_bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
