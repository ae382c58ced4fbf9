//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage, StartQuizIn};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "geoquiz", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "geoquiz", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply = reply_to_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(reply)).await {
          error!(target: "geoquiz", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "geoquiz", "WebSocket disconnected");
}

/// Parse, dispatch, serialize.
async fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "geoquiz", ?incoming, "WS received");
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };
  serde_json::to_string(&reply).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let as_error = |e: crate::error::QuizError| ServerWsMessage::Error { message: e.to_string() };
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Locales => ServerWsMessage::Locales { locales: list_locales(state) },

    ClientWsMessage::StartQuiz { kind, scope, locale } => {
      let quiz = start_quiz(state, StartQuizIn { kind, scope, locale }).await;
      info!(target: "geoquiz", id = %quiz.quiz_id, state = ?quiz.status.state, "WS quiz started");
      ServerWsMessage::Quiz { quiz }
    }

    ClientWsMessage::NextQuestion { quiz_id } => match next_question(state, quiz_id).await {
      Ok(next) => ServerWsMessage::Question { quiz_id, next },
      Err(e) => as_error(e),
    },

    ClientWsMessage::SubmitAnswer { quiz_id, index } => match submit_answer(state, quiz_id, index).await {
      Ok(result) => {
        info!(target: "geoquiz", id = %quiz_id, correct = result.correct, "WS answer evaluated");
        ServerWsMessage::AnswerResult { quiz_id, result }
      }
      Err(e) => as_error(e),
    },

    ClientWsMessage::Restart { quiz_id } => match restart_quiz(state, quiz_id).await {
      Ok(quiz) => ServerWsMessage::Quiz { quiz },
      Err(e) => as_error(e),
    },

    ClientWsMessage::Status { quiz_id } => match quiz_status(state, quiz_id).await {
      Ok(status) => ServerWsMessage::Status { quiz_id, status },
      Err(e) => as_error(e),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;
  use serde_json::Value;

  #[tokio::test]
  async fn ws_messages_drive_a_quiz() {
    let state = AppState::with_config(QuizConfig { rng_seed: Some(4), ..QuizConfig::default() });

    let pong: Value = serde_json::from_str(&reply_to_text(r#"{"type":"ping"}"#, &state).await).unwrap();
    assert_eq!(pong["type"], "pong");

    let quiz: Value = serde_json::from_str(&reply_to_text(r#"{"type":"start_quiz","kind":"flag"}"#, &state).await).unwrap();
    assert_eq!(quiz["type"], "quiz");
    let id = quiz["quiz"]["quizId"].as_str().unwrap().to_string();

    let next = reply_to_text(&format!(r#"{{"type":"next_question","quizId":"{id}"}}"#), &state).await;
    let next: Value = serde_json::from_str(&next).unwrap();
    assert_eq!(next["type"], "question");
    assert_eq!(next["next"]["question"]["category"], "flag");
    assert!(next["next"]["question"].get("correct_index").is_none());

    let ans = reply_to_text(&format!(r#"{{"type":"submit_answer","quizId":"{id}","index":1}}"#), &state).await;
    let ans: Value = serde_json::from_str(&ans).unwrap();
    assert_eq!(ans["type"], "answer_result");
    assert!(ans["result"]["correctIndex"].is_u64());

    let again = reply_to_text(&format!(r#"{{"type":"submit_answer","quizId":"{id}","index":1}}"#), &state).await;
    let again: Value = serde_json::from_str(&again).unwrap();
    assert_eq!(again["type"], "error");

    let bad: Value = serde_json::from_str(&reply_to_text("not json", &state).await).unwrap();
    assert_eq!(bad["type"], "error");
  }
}
