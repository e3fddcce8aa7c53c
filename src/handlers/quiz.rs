//! Quiz page and the controls that drive it.
//!
//! Every mutating route runs one quiz operation under the session lock and
//! redirects back to `/`, which renders the current state.

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::content::FlashcardStore;
use crate::logging::LogOnError;
use crate::quiz::{Control, Phase, slot_label};
use crate::session::QuizEntry;
use crate::state::{AppState, DeckStatus};

use super::session_cookie;
use super::templates::{
  AnswerForm, ChoiceView, FeedbackView, KeyForm, LoadErrorTemplate, QuizTemplate,
  ResetConfirmTemplate,
};

fn session_error() -> Response {
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Html("<h1>Session Error</h1><p>Please refresh the page.</p>".to_string()),
  )
    .into_response()
}

/// Rendered instead of the quiz when the deck failed to load.
fn load_error_page(message: &str) -> Response {
  let template = LoadErrorTemplate {
    message: message.to_string(),
  };
  (
    StatusCode::SERVICE_UNAVAILABLE,
    Html(template.render().unwrap_or_default()),
  )
    .into_response()
}

/// Resolve the deck or bail out with the load error page.
fn ready_deck(state: &AppState) -> Result<&Arc<FlashcardStore>, Response> {
  match &state.deck {
    DeckStatus::Ready(deck) => Ok(deck),
    DeckStatus::Failed(err) => Err(load_error_page(err.user_message())),
  }
}

/// Run `f` against this browser's quiz session, then redirect to the quiz.
fn mutate_and_redirect(
  state: &AppState,
  jar: CookieJar,
  f: impl FnOnce(&mut QuizEntry),
) -> Response {
  let deck = match ready_deck(state) {
    Ok(deck) => deck,
    Err(page) => return page,
  };
  let (jar, session_id) = session_cookie(jar);

  match state.sessions.with_session(&session_id, deck, f) {
    Ok(()) => (jar, Redirect::to("/")).into_response(),
    Err(_) => session_error(),
  }
}

/// Apply one control and redirect back to the quiz.
pub(crate) fn control_route(state: &AppState, jar: CookieJar, control: Control) -> Response {
  mutate_and_redirect(state, jar, |entry| apply_control(entry, control))
}

/// Apply a control if it is currently enabled; disabled controls are no-ops.
fn apply_control(entry: &mut QuizEntry, control: Control) {
  if !control.is_enabled(&entry.quiz, entry.reference_open) {
    tracing::debug!(
      "Ignoring disabled control {} in phase {}",
      control.as_str(),
      entry.quiz.phase().as_str()
    );
    return;
  }

  match control {
    Control::Answer(slot) => {
      if let Some(verdict) = entry.quiz.submit_slot(slot).log_warn("Answer rejected") {
        tracing::debug!("Slot {} judged, correct = {}", slot, verdict.is_correct);
      }
    }
    Control::Advance => {
      entry.quiz.advance(&mut rand::rng()).log_warn("Advance rejected");
    }
    Control::ShowReference => entry.reference_open = true,
    Control::DismissReference => entry.reference_open = false,
    Control::ResetScore => {
      entry.quiz.reset_score(&mut rand::rng());
      tracing::info!("Score reset");
    }
  }
}

fn build_quiz_template(entry: &QuizEntry, state: &AppState) -> QuizTemplate {
  let quiz = &entry.quiz;
  let card = quiz.current_card();

  let choices = quiz
    .choice_marks()
    .into_iter()
    .enumerate()
    .map(|(slot, (text, mark))| ChoiceView {
      label: slot_label(slot),
      key: slot + 1,
      text,
      mark,
      disabled: !Control::Answer(slot).is_enabled(quiz, entry.reference_open),
    })
    .collect();

  let reference = if entry.reference_open {
    quiz.reference(&*state.reference)
  } else {
    None
  };

  QuizTemplate {
    score: quiz.score_summary(),
    concept_label: card.map(|c| c.concept_label()).unwrap_or_default(),
    question_text: card.map(|c| c.question_text.clone()).unwrap_or_default(),
    choices,
    feedback: quiz.verdict().as_ref().map(FeedbackView::from_verdict),
    can_advance: Control::Advance.is_enabled(quiz, entry.reference_open),
    can_show_reference: Control::ShowReference.is_enabled(quiz, entry.reference_open),
    can_reset: Control::ResetScore.is_enabled(quiz, entry.reference_open),
    reference,
  }
}

/// GET / - the quiz page
pub async fn quiz_page(State(state): State<AppState>, jar: CookieJar) -> Response {
  let deck = match ready_deck(&state) {
    Ok(deck) => deck,
    Err(page) => return page,
  };
  let (jar, session_id) = session_cookie(jar);

  let template = match state
    .sessions
    .with_session(&session_id, deck, |entry| build_quiz_template(entry, &state))
  {
    Ok(template) => template,
    Err(_) => return session_error(),
  };

  (
    jar,
    [(header::CACHE_CONTROL, "no-store")],
    Html(template.render().unwrap_or_default()),
  )
    .into_response()
}

/// POST /answer - judge the answer text the user clicked
pub async fn submit_answer(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<AnswerForm>,
) -> Response {
  mutate_and_redirect(&state, jar, |entry| {
    if entry.quiz.phase() != Phase::Unanswered {
      tracing::debug!("Ignoring answer in phase {}", entry.quiz.phase().as_str());
      return;
    }
    // Stale pages can post text from an earlier question
    if !entry.quiz.presented_answers().contains(&form.answer) {
      tracing::debug!("Ignoring answer that is not on screen: {:?}", form.answer);
      return;
    }
    if let Some(verdict) = entry.quiz.submit_answer(&form.answer).log_warn("Answer rejected") {
      let summary = entry.quiz.score_summary();
      tracing::debug!(
        "Answer judged, correct = {}, score {}/{}",
        verdict.is_correct,
        summary.score,
        summary.total_answered
      );
    }
  })
}

/// POST /next - advance to the next question
pub async fn next_question(State(state): State<AppState>, jar: CookieJar) -> Response {
  control_route(&state, jar, Control::Advance)
}

/// POST /key - keyboard shortcut
pub async fn key_press(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<KeyForm>,
) -> Response {
  let Some(control) = Control::from_key(&form.key) else {
    tracing::debug!("Unbound key {:?}", form.key);
    return Redirect::to("/").into_response();
  };
  control_route(&state, jar, control)
}

/// GET /reset - ask before throwing the score away
pub async fn reset_confirm(State(state): State<AppState>, jar: CookieJar) -> Response {
  let deck = match ready_deck(&state) {
    Ok(deck) => deck,
    Err(page) => return page,
  };
  let (jar, session_id) = session_cookie(jar);

  let score = match state.sessions.with_session(&session_id, deck, |entry| {
    Control::ResetScore
      .is_enabled(&entry.quiz, entry.reference_open)
      .then(|| entry.quiz.score_summary())
  }) {
    Ok(Some(score)) => score,
    Ok(None) => return (jar, Redirect::to("/")).into_response(),
    Err(_) => return session_error(),
  };

  let template = ResetConfirmTemplate { score };
  (jar, Html(template.render().unwrap_or_default())).into_response()
}

/// POST /reset - confirmed reset
pub async fn reset_score(State(state): State<AppState>, jar: CookieJar) -> Response {
  control_route(&state, jar, Control::ResetScore)
}
