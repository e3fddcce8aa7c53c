//! Quiz session state machine.
//!
//! One session per learner. It draws a random card from the shared deck,
//! shuffles its four answers, judges a single selection per question and
//! keeps the running score.
//!
//! ```text
//! AwaitingLoad --draw--> Unanswered --submit--> Answered --advance--> Unanswered
//!                            ^                                             |
//!                            +------------------ reset --------------------+
//! ```

use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;

use crate::content::{FlashcardRecord, FlashcardStore, ReferenceSource};

/// Where the session stands with respect to the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// No card drawn yet
  AwaitingLoad,
  Unanswered,
  Answered,
}

impl Phase {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::AwaitingLoad => "awaiting_load",
      Self::Unanswered => "unanswered",
      Self::Answered => "answered",
    }
  }
}

/// Result of judging an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
  pub is_correct: bool,
  pub correct_answer: String,
  /// Empty when the card has no explanation
  pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
  pub score: u32,
  pub total_answered: u32,
  pub percentage: u32,
}

impl ScoreSummary {
  fn new(score: u32, total_answered: u32) -> Self {
    let percentage = if total_answered > 0 {
      // round(100 * score / total), half-up, in integers
      let (s, t) = (u64::from(score), u64::from(total_answered));
      ((200 * s + t) / (2 * t)) as u32
    } else {
      0
    };
    Self {
      score,
      total_answered,
      percentage,
    }
  }
}

/// How a presented answer is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
  /// Still selectable
  Open,
  Correct,
  /// The learner's pick, and it was wrong
  WrongPick,
  Other,
}

impl ChoiceMark {
  /// CSS modifier class
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Open => "",
      Self::Correct => "correct",
      Self::WrongPick => "wrong",
      Self::Other => "other",
    }
  }
}

/// Reference material for the current card's concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceView {
  pub title: String,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
  /// Operation not allowed in the current phase
  WrongPhase { expected: Phase, actual: Phase },
  /// Answer slot outside the presented choices
  NoSuchChoice(usize),
}

impl std::fmt::Display for QuizError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      QuizError::WrongPhase { expected, actual } => write!(
        f,
        "expected phase {} but session is {}",
        expected.as_str(),
        actual.as_str()
      ),
      QuizError::NoSuchChoice(slot) => write!(f, "no answer in slot {}", slot),
    }
  }
}

impl std::error::Error for QuizError {}

#[derive(Debug, Clone)]
pub struct QuizSession {
  deck: Arc<FlashcardStore>,
  /// Index into the deck
  current_card: Option<usize>,
  presented_answers: Vec<String>,
  correct_answer: String,
  last_selection: Option<String>,
  score: u32,
  total_answered: u32,
  phase: Phase,
}

impl QuizSession {
  pub fn new(deck: Arc<FlashcardStore>) -> Self {
    Self {
      deck,
      current_card: None,
      presented_answers: Vec::new(),
      correct_answer: String::new(),
      last_selection: None,
      score: 0,
      total_answered: 0,
      phase: Phase::AwaitingLoad,
    }
  }

  /// Draw a random card (repeats allowed) and shuffle its answers.
  pub fn draw_next_question<R: Rng>(&mut self, rng: &mut R) {
    assert!(!self.deck.is_empty(), "cannot draw from an empty deck");

    let index = rng.random_range(0..self.deck.len());
    let card = &self.deck.cards()[index];

    let mut answers = card.choices().to_vec();
    answers.shuffle(rng);

    self.correct_answer = card.correct_answer.clone();
    self.presented_answers = answers;
    self.current_card = Some(index);
    self.last_selection = None;
    self.phase = Phase::Unanswered;

    tracing::debug!(
      "Drew card {} (concept #{})",
      index,
      card.concept_number
    );
  }

  /// Move on to the next question after the current one was judged.
  pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Result<(), QuizError> {
    self.expect_phase(Phase::Answered)?;
    self.draw_next_question(rng);
    Ok(())
  }

  /// Judge `selected` against the current card. Only one answer per question
  /// counts; later calls fail without touching the score.
  pub fn submit_answer(&mut self, selected: &str) -> Result<Verdict, QuizError> {
    self.expect_phase(Phase::Unanswered)?;

    let is_correct = selected == self.correct_answer;
    self.total_answered += 1;
    if is_correct {
      self.score += 1;
    }
    self.last_selection = Some(selected.to_string());
    self.phase = Phase::Answered;

    Ok(Verdict {
      is_correct,
      correct_answer: self.correct_answer.clone(),
      explanation: self
        .current_card()
        .map(|c| c.explanation_text().to_string())
        .unwrap_or_default(),
    })
  }

  /// Submit the answer shown in `slot` (0-based).
  pub fn submit_slot(&mut self, slot: usize) -> Result<Verdict, QuizError> {
    self.expect_phase(Phase::Unanswered)?;
    let selected = self
      .presented_answers
      .get(slot)
      .cloned()
      .ok_or(QuizError::NoSuchChoice(slot))?;
    self.submit_answer(&selected)
  }

  pub fn score_summary(&self) -> ScoreSummary {
    ScoreSummary::new(self.score, self.total_answered)
  }

  /// Zero the score and start over with a fresh card. Callers confirm first.
  pub fn reset_score<R: Rng>(&mut self, rng: &mut R) {
    self.score = 0;
    self.total_answered = 0;
    self.draw_next_question(rng);
  }

  /// The last verdict, rebuilt from state, while the question is answered.
  pub fn verdict(&self) -> Option<Verdict> {
    if self.phase != Phase::Answered {
      return None;
    }
    let selected = self.last_selection.as_deref()?;
    Some(Verdict {
      is_correct: selected == self.correct_answer,
      correct_answer: self.correct_answer.clone(),
      explanation: self
        .current_card()
        .map(|c| c.explanation_text().to_string())
        .unwrap_or_default(),
    })
  }

  /// Presented answers paired with how each should be shown.
  pub fn choice_marks(&self) -> Vec<(String, ChoiceMark)> {
    self
      .presented_answers
      .iter()
      .map(|answer| {
        let mark = if self.phase != Phase::Answered {
          ChoiceMark::Open
        } else if *answer == self.correct_answer {
          ChoiceMark::Correct
        } else if self.last_selection.as_deref() == Some(answer.as_str()) {
          ChoiceMark::WrongPick
        } else {
          ChoiceMark::Other
        };
        (answer.clone(), mark)
      })
      .collect()
  }

  /// Reference text for the current concept, once a card is loaded.
  pub fn reference<S: ReferenceSource + ?Sized>(&self, source: &S) -> Option<ReferenceView> {
    let card = self.current_card()?;
    Some(ReferenceView {
      title: card.concept_label(),
      text: source.text_or_fallback(card.concept_number).to_string(),
    })
  }

  pub fn current_card(&self) -> Option<&FlashcardRecord> {
    self.current_card.and_then(|i| self.deck.get(i))
  }

  pub fn presented_answers(&self) -> &[String] {
    &self.presented_answers
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn has_card(&self) -> bool {
    self.current_card.is_some()
  }

  fn expect_phase(&self, expected: Phase) -> Result<(), QuizError> {
    if self.phase == expected {
      Ok(())
    } else {
      Err(QuizError::WrongPhase {
        expected,
        actual: self.phase,
      })
    }
  }
}
