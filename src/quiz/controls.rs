//! User-facing quiz controls and their keyboard shortcuts.

use super::session::{Phase, QuizSession};

/// Number of answer slots on screen
pub const ANSWER_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
  /// Pick the answer in the given 0-based slot
  Answer(usize),
  Advance,
  ShowReference,
  DismissReference,
  /// Only reachable after the user confirms
  ResetScore,
}

impl Control {
  /// Map a `KeyboardEvent.key` value to a control.
  ///
  /// `1`-`4` pick an answer, `Enter` advances, `Escape` closes the reference
  /// view and `s` opens it. Reset has no shortcut.
  pub fn from_key(key: &str) -> Option<Self> {
    match key {
      "1" | "2" | "3" | "4" => key.parse::<usize>().ok().map(|n| Self::Answer(n - 1)),
      "Enter" => Some(Self::Advance),
      "Escape" => Some(Self::DismissReference),
      k if k.eq_ignore_ascii_case("s") => Some(Self::ShowReference),
      _ => None,
    }
  }

  /// Whether the control can be used right now.
  pub fn is_enabled(&self, session: &QuizSession, reference_open: bool) -> bool {
    match self {
      Self::Answer(slot) => {
        session.phase() == Phase::Unanswered && *slot < session.presented_answers().len()
      }
      Self::Advance => session.phase() == Phase::Answered,
      Self::ShowReference | Self::ResetScore => session.has_card(),
      Self::DismissReference => reference_open,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Answer(_) => "answer",
      Self::Advance => "advance",
      Self::ShowReference => "show_reference",
      Self::DismissReference => "dismiss_reference",
      Self::ResetScore => "reset_score",
    }
  }
}

/// Letter label for an answer slot: 0 -> 'A'.
pub fn slot_label(slot: usize) -> char {
  (b'A' + (slot % 26) as u8) as char
}
