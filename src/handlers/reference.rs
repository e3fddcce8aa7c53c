//! Concept reference overlay.

use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use super::quiz::control_route;
use crate::quiz::Control;
use crate::state::AppState;

/// POST /reference - open the reference text for the current concept
pub async fn show_reference(State(state): State<AppState>, jar: CookieJar) -> Response {
  control_route(&state, jar, Control::ShowReference)
}

/// POST /reference/dismiss - close the overlay
pub async fn dismiss_reference(State(state): State<AppState>, jar: CookieJar) -> Response {
  control_route(&state, jar, Control::DismissReference)
}
