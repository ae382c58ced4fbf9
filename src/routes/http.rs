//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; quiz errors map to a JSON body plus status code.

use std::sync::Arc;
use axum::{
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::QuizError;
use crate::logic::*;
use crate::protocol::*;
use crate::session::SessionStatus;
use crate::state::AppState;

/// Error on its way out as an HTTP response.
#[derive(Debug)]
pub enum ApiError {
  Quiz(QuizError),
  /// Request body that is not JSON (400) or not a valid request (422).
  Body { status: StatusCode, message: String },
}

impl From<QuizError> for ApiError {
  fn from(e: QuizError) -> Self { ApiError::Quiz(e) }
}

impl From<serde_json::Error> for ApiError {
  fn from(e: serde_json::Error) -> Self {
    let status = match e.classify() {
      serde_json::error::Category::Data => StatusCode::UNPROCESSABLE_ENTITY,
      _ => StatusCode::BAD_REQUEST,
    };
    ApiError::Body { status, message: e.to_string() }
  }
}

pub fn status_for(e: &QuizError) -> StatusCode {
  match e {
    QuizError::UnknownSession(_) => StatusCode::NOT_FOUND,
    QuizError::NotAnswerable => StatusCode::CONFLICT,
    QuizError::OptionOutOfRange { .. } => StatusCode::BAD_REQUEST,
    QuizError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    QuizError::MissingAnswer { .. } | QuizError::OptionCountTooSmall | QuizError::Dataset(_) => {
      StatusCode::INTERNAL_SERVER_ERROR
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error) = match self {
      ApiError::Quiz(e) => (status_for(&e), e.to_string()),
      ApiError::Body { status, message } => (status, message),
    };
    (status, Json(ErrorOut { error })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_locales(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(list_locales(&state))
}

/// Body is optional; an empty POST starts a default city quiz. A body that is
/// present must parse.
#[instrument(level = "info", skip(state, body), fields(len = body.len()))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<(StatusCode, Json<QuizOut>), ApiError> {
  let req = parse_start(&body).map_err(|e| {
    warn!(target: "geoquiz", error = %e, "HTTP quiz request rejected");
    ApiError::from(e)
  })?;
  let quiz = start_quiz(&state, req).await;
  info!(target: "geoquiz", id = %quiz.quiz_id, state = ?quiz.status.state, "HTTP quiz started");
  Ok((StatusCode::CREATED, Json(quiz)))
}

fn parse_start(body: &[u8]) -> Result<StartQuizIn, serde_json::Error> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(StartQuizIn::default());
  }
  serde_json::from_slice(body)
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionStatus>, ApiError> {
  Ok(Json(quiz_status(&state, id).await?))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_post_next(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<NextOut>, ApiError> {
  let next = next_question(&state, id).await?;
  info!(target: "geoquiz", %id, done = next.question.is_none(), remaining = next.status.remaining, "HTTP next question served");
  Ok(Json(next))
}

#[instrument(level = "info", skip(state, body), fields(%id, index = body.index))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, ApiError> {
  let out = submit_answer(&state, id, body.index).await?;
  info!(target: "geoquiz", %id, correct = out.correct, score = out.status.score, "HTTP answer evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_post_restart(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<QuizOut>, ApiError> {
  Ok(Json(restart_quiz(&state, id).await?))
}
