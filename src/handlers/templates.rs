//! Template and form structs for quiz handlers.

use askama::Template;
use serde::Deserialize;

use crate::filters;
use crate::quiz::{ChoiceMark, ReferenceView, ScoreSummary, Verdict};

/// One answer button as rendered.
pub struct ChoiceView {
  /// "A".."D"
  pub label: char,
  /// 1-based keyboard shortcut
  pub key: usize,
  pub text: String,
  pub mark: ChoiceMark,
  pub disabled: bool,
}

/// Feedback line under the answers once a question is judged.
pub struct FeedbackView {
  pub is_correct: bool,
  pub text: String,
}

impl FeedbackView {
  pub fn from_verdict(verdict: &Verdict) -> Self {
    let text = if verdict.is_correct {
      format!("✓ Correct! {}", verdict.explanation)
    } else {
      format!(
        "✗ Wrong. Correct answer: {}. {}",
        verdict.correct_answer, verdict.explanation
      )
    };
    Self {
      is_correct: verdict.is_correct,
      text: text.trim_end().to_string(),
    }
  }
}

#[derive(Template)]
#[template(path = "quiz.html")]
pub struct QuizTemplate {
  pub score: ScoreSummary,
  pub concept_label: String,
  pub question_text: String,
  pub choices: Vec<ChoiceView>,
  pub feedback: Option<FeedbackView>,
  pub can_advance: bool,
  pub can_show_reference: bool,
  pub can_reset: bool,
  pub reference: Option<ReferenceView>,
}

#[derive(Template)]
#[template(path = "reset_confirm.html")]
pub struct ResetConfirmTemplate {
  pub score: ScoreSummary,
}

#[derive(Template)]
#[template(path = "load_error.html")]
pub struct LoadErrorTemplate {
  pub message: String,
}

#[derive(Deserialize)]
pub struct AnswerForm {
  pub answer: String,
}

#[derive(Deserialize)]
pub struct KeyForm {
  pub key: String,
}
