//! Error taxonomy for the quiz core and the dataset loader.
//!
//! Only `InsufficientData` ever reaches the player as a blocking screen state.
//! Everything else is either recovered inside the generator (missing answers are
//! skipped, short option sets are padded) or reported back to the API client.

use uuid::Uuid;

use crate::domain::QuestionCategory;

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
  #[error("requires at least {required} countries but only {available} available")]
  InsufficientData { required: usize, available: usize },
  #[error("no correct answer for {category:?} on country '{country}'")]
  MissingAnswer { country: String, category: QuestionCategory },
  #[error("option count must be at least 2")]
  OptionCountTooSmall,
  #[error("no open question to answer")]
  NotAnswerable,
  #[error("option {index} is out of range (question has {len} options)")]
  OptionOutOfRange { index: usize, len: usize },
  #[error("unknown session: {0}")]
  UnknownSession(Uuid),
  #[error("dataset error: {0}")]
  Dataset(String),
}
