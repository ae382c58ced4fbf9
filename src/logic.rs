//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Starting and restarting quizzes (locale resolution, session RNG from config)
//!   - Serving the next question and recording answers
//!   - Localized feedback and end-of-quiz summary text
//!   - Listing the display locales

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::QuizError;
use crate::locale::{display_name, resolve_locale, SUPPORTED_LOCALES};
use crate::protocol::{answer_out, question_out, AnswerOut, LocaleOut, LocalesOut, NextOut, QuizOut, StartQuizIn};
use crate::session::{rng_from_config, Session, SessionStatus};
use crate::state::AppState;
use crate::util::fill_template;

fn quiz_out(state: &AppState, s: &Session) -> QuizOut {
  let status = s.status();
  let message = s.error().map(|_| state.config.prompts_for(s.locale()).not_enough_countries);
  QuizOut { quiz_id: s.id(), kind: s.kind(), locale: s.locale().to_string(), status, message }
}

fn summary(state: &AppState, locale: &str, status: &SessionStatus) -> String {
  let prompts = state.config.prompts_for(locale);
  fill_template(
    &prompts.quiz_complete,
    &[("score", &status.score.to_string()), ("total", &status.total.to_string())],
  )
}

#[instrument(level = "info", skip(state), fields(kind = ?req.kind, scope = ?req.scope))]
pub async fn start_quiz(state: &AppState, req: StartQuizIn) -> QuizOut {
  let locale = resolve_locale(req.locale.as_deref(), &state.config.default_locale);
  let session = Session::start(
    state.store.as_ref(),
    req.kind,
    req.scope,
    &locale,
    &state.config,
    rng_from_config(&state.config),
  );
  let out = quiz_out(state, &session);
  info!(target: "quiz", id = %out.quiz_id, %locale, state = ?out.status.state, total = out.status.total, "Quiz created");
  state.insert_session(session).await;
  out
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn next_question(state: &AppState, id: Uuid) -> Result<NextOut, QuizError> {
  let (next, status, locale) = state
    .with_session(id, |s| (s.next_question(), s.status(), s.locale().to_string()))
    .await?;
  match next? {
    Some(q) => Ok(NextOut { question: Some(question_out(&q)), status, summary: None }),
    None => {
      let summary = summary(state, &locale, &status);
      Ok(NextOut { question: None, status, summary: Some(summary) })
    }
  }
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn submit_answer(state: &AppState, id: Uuid, index: usize) -> Result<AnswerOut, QuizError> {
  let (outcome, locale) = state
    .with_session(id, |s| (s.answer(index), s.locale().to_string()))
    .await?;
  let outcome = outcome.map_err(|e| {
    warn!(target: "quiz", %id, index, error = %e, "Answer rejected");
    e
  })?;
  let prompts = state.config.prompts_for(&locale);
  let feedback = if outcome.correct { prompts.correct } else { prompts.wrong };
  Ok(answer_out(outcome, feedback))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn restart_quiz(state: &AppState, id: Uuid) -> Result<QuizOut, QuizError> {
  let store = state.store.clone();
  state
    .with_session(id, |s| {
      s.restart(store.as_ref()).map_err(|e| {
        warn!(target: "quiz", %id, error = %e, "Restart refused");
        e
      })?;
      Ok::<_, QuizError>(quiz_out(state, s))
    })
    .await?
}

#[instrument(level = "debug", skip(state), fields(%id))]
pub async fn quiz_status(state: &AppState, id: Uuid) -> Result<SessionStatus, QuizError> {
  state.with_session(id, |s| s.status()).await
}

/// Locales the store has data for and the app has prompt text for.
#[instrument(level = "debug", skip(state))]
pub fn list_locales(state: &AppState) -> LocalesOut {
  let available = state.store.available_locales();
  let locales = available
    .iter()
    .filter(|code| SUPPORTED_LOCALES.iter().any(|(c, _)| c == code))
    .map(|code| LocaleOut { code: code.clone(), name: display_name(code).to_string() })
    .collect();
  LocalesOut { default_locale: resolve_locale(None, &state.config.default_locale), locales }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;
  use crate::domain::{QuizKind, Scope};
  use crate::session::SessionState;

  fn state() -> AppState {
    AppState::with_config(QuizConfig { rng_seed: Some(21), ..QuizConfig::default() })
  }

  #[tokio::test]
  async fn full_quiz_round_trip() {
    let st = state();
    let quiz = start_quiz(&st, StartQuizIn { kind: QuizKind::Language, scope: Scope::All, locale: Some("fr-FR".into()) }).await;
    assert_eq!(quiz.locale, "fr");
    assert_eq!(quiz.status.total, 20);

    let mut answered = 0;
    let mut score = 0;
    loop {
      let next = next_question(&st, quiz.quiz_id).await.unwrap();
      let Some(q) = next.question else {
        let expected = format!("Quiz terminé ! Score : {score} sur 20.");
        assert_eq!(next.summary.as_deref(), Some(expected.as_str()));
        break;
      };
      assert!(q.options.len() >= 2);
      let err = submit_answer(&st, quiz.quiz_id, 99).await.unwrap_err();
      assert!(matches!(err, QuizError::OptionOutOfRange { .. }));
      let out = submit_answer(&st, quiz.quiz_id, 0).await.unwrap();
      if out.correct {
        score += 1;
        assert_eq!(out.feedback, "Correct !");
      } else {
        assert_eq!(out.feedback, "Faux !");
      }
      assert_eq!(out.status.score, score);
      answered += 1;
    }
    assert_eq!(answered, 20);
    let status = quiz_status(&st, quiz.quiz_id).await.unwrap();
    assert_eq!(status.state, SessionState::Completed);
  }

  #[tokio::test]
  async fn unknown_quiz_and_error_message() {
    let st = state();
    let id = Uuid::new_v4();
    assert_eq!(quiz_status(&st, id).await, Err(QuizError::UnknownSession(id)));

    let quiz = start_quiz(&st, StartQuizIn { kind: QuizKind::City, scope: Scope::Difficulty(9), locale: None }).await;
    assert_eq!(quiz.status.state, SessionState::Error);
    assert!(quiz.message.is_some());
    assert!(next_question(&st, quiz.quiz_id).await.is_err());

    let refused = restart_quiz(&st, quiz.quiz_id).await.unwrap_err();
    assert!(matches!(refused, QuizError::InsufficientData { .. }));
    let status = quiz_status(&st, quiz.quiz_id).await.unwrap();
    assert_eq!(status.state, SessionState::Error);
  }

  #[test]
  fn locales_follow_store() {
    let st = state();
    let out = list_locales(&st);
    let codes: Vec<&str> = out.locales.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["en", "de", "es", "fr", "ja"]);
    assert_eq!(out.default_locale, "en");
  }
}
