//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Questions go out without their correct index; only the answer result reveals it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Media, Question, QuestionCategory, QuizKind, Scope};
use crate::session::{AnswerOutcome, SessionStatus};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Locales,
    StartQuiz {
        #[serde(default)]
        kind: QuizKind,
        #[serde(default)]
        scope: Scope,
        #[serde(default)]
        locale: Option<String>,
    },
    NextQuestion {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
    },
    SubmitAnswer {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
        index: usize,
    },
    Restart {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
    },
    Status {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Locales {
        locales: LocalesOut,
    },
    Quiz {
        quiz: QuizOut,
    },
    Question {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
        next: NextOut,
    },
    AnswerResult {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
        result: AnswerOut,
    },
    Status {
        #[serde(rename = "quizId")]
        quiz_id: Uuid,
        status: SessionStatus,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct LocaleOut {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalesOut {
    pub default_locale: String,
    pub locales: Vec<LocaleOut>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StartQuizIn {
    #[serde(default)]
    pub kind: QuizKind,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub index: usize,
}

/// A started (or restarted) quiz. `message` explains an `error` state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOut {
    pub quiz_id: Uuid,
    pub kind: QuizKind,
    pub locale: String,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionOut {
    pub text: String,
    pub hidden: bool,
}

#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub category: QuestionCategory,
    pub prompt: String,
    pub options: Vec<OptionOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

/// `question` is `None` once the quiz is over; `summary` is set then.
#[derive(Debug, Serialize)]
pub struct NextOut {
    pub question: Option<QuestionOut>,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub correct: bool,
    pub selected_index: usize,
    pub correct_index: usize,
    pub correct_answer: String,
    /// Localized "Correct!" / "Wrong" line.
    pub feedback: String,
    pub status: SessionStatus,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

pub fn question_out(q: &Question) -> QuestionOut {
    QuestionOut {
        category: q.category,
        prompt: q.prompt.clone(),
        options: q
            .options
            .iter()
            .zip(&q.hidden)
            .map(|(text, hidden)| OptionOut { text: text.clone(), hidden: *hidden })
            .collect(),
        media: q.media.clone(),
    }
}

pub fn answer_out(o: AnswerOutcome, feedback: String) -> AnswerOut {
    AnswerOut {
        correct: o.correct,
        selected_index: o.selected_index,
        correct_index: o.correct_index,
        correct_answer: o.correct_answer,
        feedback,
        status: o.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse() {
        let msg: ClientWsMessage = serde_json::from_str(
            r#"{"type":"start_quiz","kind":"flag","scope":{"by":"difficulty","value":2},"locale":"fr"}"#,
        )
        .unwrap();
        match msg {
            ClientWsMessage::StartQuiz { kind, scope, locale } => {
                assert_eq!(kind, QuizKind::Flag);
                assert_eq!(scope, Scope::Difficulty(2));
                assert_eq!(locale.as_deref(), Some("fr"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let msg: ClientWsMessage = serde_json::from_str(r#"{"type":"start_quiz"}"#).unwrap();
        assert!(matches!(msg, ClientWsMessage::StartQuiz { kind: QuizKind::City, scope: Scope::All, locale: None }));

        let id = Uuid::new_v4();
        let raw = format!(r#"{{"type":"submit_answer","quizId":"{id}","index":3}}"#);
        let msg: ClientWsMessage = serde_json::from_str(&raw).unwrap();
        assert!(matches!(msg, ClientWsMessage::SubmitAnswer { quiz_id, index: 3 } if quiz_id == id));
    }

    #[test]
    fn question_out_hides_the_answer() {
        let q = Question {
            category: QuestionCategory::Capital,
            prompt: "What is the capital of Peru?".into(),
            options: vec!["Lima".into(), "Quito".into(), "Unknown".into()],
            hidden: vec![false, false, true],
            correct_index: 0,
            correct_answer: "Lima".into(),
            media: None,
        };
        let v = serde_json::to_value(question_out(&q)).unwrap();
        assert_eq!(v["category"], "capital");
        assert_eq!(v["options"][2]["hidden"], true);
        assert!(v.get("correct_index").is_none());
        assert!(v.get("correctIndex").is_none());
        assert!(v.get("media").is_none());
    }
}
