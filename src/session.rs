//! In-memory quiz session storage.
//!
//! Each browser gets its own `QuizSession`, keyed by the session cookie.
//! Sessions auto-expire after a configurable duration of inactivity.
//! Requests for the same store are serialized by one mutex, so every quiz
//! operation runs to completion before the next one starts.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config;
use crate::content::FlashcardStore;
use crate::quiz::QuizSession;

/// Per-browser quiz state
#[derive(Debug, Clone)]
pub struct QuizEntry {
  pub quiz: QuizSession,
  /// Whether the reference overlay is showing
  pub reference_open: bool,
}

/// Session entry with last access time for expiration
struct SessionEntry {
  entry: QuizEntry,
  last_access: DateTime<Utc>,
}

/// Error returned when the session store lock is poisoned
#[derive(Debug)]
pub struct SessionLockError;

impl std::fmt::Display for SessionLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Session store unavailable")
  }
}

impl std::error::Error for SessionLockError {}

#[derive(Clone, Default)]
pub struct SessionStore {
  sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run `f` against the session for `session_id`, creating it (with a first
  /// question drawn) if it does not exist yet.
  pub fn with_session<T>(
    &self,
    session_id: &str,
    deck: &Arc<FlashcardStore>,
    f: impl FnOnce(&mut QuizEntry) -> T,
  ) -> Result<T, SessionLockError> {
    let mut sessions = self.sessions.lock().map_err(|_| {
      tracing::error!("Session store mutex poisoned");
      SessionLockError
    })?;

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions);
    }

    let slot = sessions.entry(session_id.to_string()).or_insert_with(|| {
      let mut quiz = QuizSession::new(Arc::clone(deck));
      quiz.draw_next_question(&mut rand::rng());
      tracing::debug!("Started quiz session {}", session_id);
      SessionEntry {
        entry: QuizEntry {
          quiz,
          reference_open: false,
        },
        last_access: Utc::now(),
      }
    });
    slot.last_access = Utc::now();

    Ok(f(&mut slot.entry))
  }

  pub fn len(&self) -> usize {
    self.sessions.lock().map(|s| s.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>) {
  let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
  let before = sessions.len();
  sessions.retain(|_, entry| entry.last_access > expiry);
  let removed = before - sessions.len();
  if removed > 0 {
    tracing::debug!("Expired {} quiz sessions", removed);
  }
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::FlashcardRecord;
  use crate::quiz::Phase;

  fn deck() -> Arc<FlashcardStore> {
    Arc::new(
      FlashcardStore::from_records(vec![FlashcardRecord {
        question_text: "Q".to_string(),
        concept_number: 1,
        concept_name: "Centerline Theory".to_string(),
        correct_answer: "A".to_string(),
        wrong_answer_1: "B".to_string(),
        wrong_answer_2: "C".to_string(),
        wrong_answer_3: "D".to_string(),
        explanation: None,
      }])
      .unwrap(),
    )
  }

  #[test]
  fn test_new_session_has_first_question() {
    let store = SessionStore::new();
    let phase = store
      .with_session("abc", &deck(), |entry| entry.quiz.phase())
      .unwrap();
    assert_eq!(phase, Phase::Unanswered);
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn test_sessions_are_independent() {
    let store = SessionStore::new();
    let deck = deck();

    store
      .with_session("one", &deck, |entry| entry.quiz.submit_answer("A").unwrap())
      .unwrap();
    let one = store
      .with_session("one", &deck, |entry| entry.quiz.score_summary())
      .unwrap();
    let two = store
      .with_session("two", &deck, |entry| entry.quiz.score_summary())
      .unwrap();

    assert_eq!(one.score, 1);
    assert_eq!(two.total_answered, 0);
    assert_eq!(store.len(), 2);
  }

  #[test]
  fn test_cleanup_removes_stale_sessions() {
    let deck = deck();
    let mut sessions = HashMap::new();
    for (id, age_hours) in [("fresh", 0), ("stale", config::SESSION_EXPIRY_HOURS + 1)] {
      sessions.insert(
        id.to_string(),
        SessionEntry {
          entry: QuizEntry {
            quiz: QuizSession::new(Arc::clone(&deck)),
            reference_open: false,
          },
          last_access: Utc::now() - Duration::hours(age_hours),
        },
      );
    }

    cleanup_expired(&mut sessions);
    assert!(sessions.contains_key("fresh"));
    assert!(!sessions.contains_key("stale"));
  }

  #[test]
  fn test_generate_session_id_format() {
    let id = generate_session_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_ne!(id, generate_session_id());
  }
}
