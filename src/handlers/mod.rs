pub mod quiz;
pub mod reference;
pub mod templates;

use axum::{Router, routing::get, routing::post};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SESSION_COOKIE_NAME;
use crate::paths;
use crate::session::generate_session_id;
use crate::state::AppState;

pub use quiz::{key_press, next_question, quiz_page, reset_confirm, reset_score, submit_answer};
pub use reference::{dismiss_reference, show_reference};

/// Read the quiz session ID from the cookie jar, issuing a new one if absent.
pub(crate) fn session_cookie(jar: CookieJar) -> (CookieJar, String) {
  if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
    let id = cookie.value().to_string();
    return (jar, id);
  }

  let id = generate_session_id();
  let cookie = Cookie::build((SESSION_COOKIE_NAME, id.clone()))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax);
  (jar.add(cookie), id)
}

/// All quiz routes plus static assets.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(quiz_page))
    .route("/answer", post(submit_answer))
    .route("/next", post(next_question))
    .route("/key", post(key_press))
    .route("/reference", post(show_reference))
    .route("/reference/dismiss", post(dismiss_reference))
    .route("/reset", get(reset_confirm).post(reset_score))
    .nest_service("/static", ServeDir::new(paths::STATIC_DIR))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
