//! Quiz session: the state machine that walks (country, category) slots without
//! repetition and keeps score.
//!
//! `Idle -> InProgress -> Completed -> (restart) -> InProgress`, with `Error` as the
//! terminal state for a quiz that could not be started (restart is refused there).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assembler::AlternateOdds;
use crate::config::QuizConfig;
use crate::domain::{Country, Question, QuestionCategory, QuizKind, Scope};
use crate::error::QuizError;
use crate::generator::Generator;
use crate::locale::Prompts;
use crate::store::ReferenceStore;

/// Fewest distinct countries a quiz can run on (one per option).
pub const MIN_ENTITIES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
  Idle,
  InProgress,
  Completed,
  Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
  pub score: usize,
  pub total: usize,
  pub remaining: usize,
  pub state: SessionState,
}

/// Result of answering the current question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
  pub correct: bool,
  pub selected_index: usize,
  pub correct_index: usize,
  pub correct_answer: String,
  pub status: SessionStatus,
}

/// One question to ask: which sampled country, which category, and for landmark
/// quizzes which landmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
  entity: usize,
  category: QuestionCategory,
  landmark: Option<usize>,
}

/// Per-session copy of the knobs taken from `QuizConfig` at start.
struct Settings {
  prompts: Prompts,
  option_count: usize,
  odds: AlternateOdds,
  sample_size: Option<usize>,
  landmark_cap: usize,
}

impl Settings {
  fn from_config(cfg: &QuizConfig, kind: QuizKind, locale: &str) -> Self {
    Self {
      prompts: cfg.prompts_for(locale),
      option_count: cfg.option_count,
      odds: cfg.alternate_odds,
      sample_size: cfg.sample_size(kind),
      landmark_cap: cfg.landmark_cap,
    }
  }
}

/// Session RNG: fixed seed from config when present, entropy otherwise.
pub fn rng_from_config(cfg: &QuizConfig) -> StdRng {
  match cfg.rng_seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  }
}

pub struct Session {
  id: Uuid,
  kind: QuizKind,
  scope: Scope,
  locale: String,
  settings: Settings,
  rng: StdRng,

  state: SessionState,
  score: usize,
  total: usize,
  remaining: usize,
  /// Distractor pool: every country in scope.
  pool: Vec<Country>,
  /// Every country in the store, for values the scoped pool cannot supply.
  world: Vec<Country>,
  /// Countries questions are asked about.
  sample: Vec<Country>,
  /// Slots not asked yet; a drawn slot is removed, so none repeats.
  open: Vec<Slot>,
  current: Option<Question>,
  answered: bool,
  error: Option<QuizError>,
}

/// Every country the scope allows for this kind of quiz.
fn candidates(store: &dyn ReferenceStore, rng: &mut StdRng, kind: QuizKind, scope: &Scope, locale: &str) -> Vec<Country> {
  if kind == QuizKind::Landmark {
    let mut all = store.all_with_landmarks(locale);
    all.retain(|c| match scope {
      Scope::All => true,
      Scope::Category(cat) => &c.category == cat,
      Scope::Difficulty(tier) => c.difficulty == *tier,
    });
    return all;
  }
  match scope {
    Scope::All => store.sample_random(rng, usize::MAX, locale),
    Scope::Category(cat) => store.by_category(cat, locale),
    Scope::Difficulty(tier) => store.by_difficulty(*tier, locale),
  }
}

impl Session {
  /// Sample countries and lay out the question slots. A sample smaller than
  /// `MIN_ENTITIES` leaves the session in `Error` with zero questions.
  pub fn start(
    store: &dyn ReferenceStore,
    kind: QuizKind,
    scope: Scope,
    locale: &str,
    cfg: &QuizConfig,
    rng: StdRng,
  ) -> Self {
    let mut session = Session {
      id: Uuid::new_v4(),
      kind,
      scope,
      locale: locale.to_string(),
      settings: Settings::from_config(cfg, kind, locale),
      rng,
      state: SessionState::Idle,
      score: 0,
      total: 0,
      remaining: 0,
      pool: Vec::new(),
      world: Vec::new(),
      sample: Vec::new(),
      open: Vec::new(),
      current: None,
      answered: false,
      error: None,
    };
    session.begin(store);
    session
  }

  /// Idle -> InProgress (or Error).
  fn begin(&mut self, store: &dyn ReferenceStore) {
    self.score = 0;
    self.current = None;
    self.answered = false;
    self.error = None;

    self.pool = candidates(store, &mut self.rng, self.kind, &self.scope, &self.locale);
    self.world = if self.scope == Scope::All && self.kind != QuizKind::Landmark {
      self.pool.clone()
    } else {
      store.sample_random(&mut self.rng, usize::MAX, &self.locale)
    };
    let mut sample = self.pool.clone();
    sample.shuffle(&mut self.rng);
    if let Some(n) = self.settings.sample_size {
      sample.truncate(n);
    }

    if sample.len() < MIN_ENTITIES {
      let err = QuizError::InsufficientData { required: MIN_ENTITIES, available: sample.len() };
      warn!(target: "quiz", session = %self.id, kind = ?self.kind, scope = ?self.scope, error = %err, "Quiz cannot start");
      self.sample.clear();
      self.open.clear();
      self.total = 0;
      self.remaining = 0;
      self.state = SessionState::Error;
      self.error = Some(err);
      return;
    }

    let mut open = Vec::new();
    for (entity, country) in sample.iter().enumerate() {
      if self.kind == QuizKind::Landmark {
        for landmark in 0..store.landmarks_for(country.id).len() {
          open.push(Slot { entity, category: QuestionCategory::Landmark, landmark: Some(landmark) });
        }
      } else {
        for &category in self.kind.categories() {
          open.push(Slot { entity, category, landmark: None });
        }
      }
    }
    if self.kind == QuizKind::Landmark && open.len() > self.settings.landmark_cap {
      open.shuffle(&mut self.rng);
      open.truncate(self.settings.landmark_cap);
    }

    self.sample = sample;
    self.total = open.len();
    self.remaining = open.len();
    self.open = open;
    self.state = SessionState::InProgress;
    info!(
      target: "quiz",
      session = %self.id,
      kind = ?self.kind,
      locale = %self.locale,
      countries = self.sample.len(),
      total = self.total,
      "Quiz started"
    );
  }

  fn complete(&mut self) {
    if self.state != SessionState::Completed {
      self.state = SessionState::Completed;
      info!(target: "quiz", session = %self.id, score = self.score, total = self.total, "Quiz completed");
    }
  }

  /// Draw a random unused slot and generate its question. `Ok(None)` once the quiz is
  /// over. Slots whose answer cannot be produced are dropped from the total.
  pub fn next_question(&mut self) -> Result<Option<Question>, QuizError> {
    match self.state {
      SessionState::Error => {
        return Err(self.error.clone().unwrap_or(QuizError::InsufficientData { required: MIN_ENTITIES, available: 0 }))
      }
      SessionState::InProgress => {}
      SessionState::Idle | SessionState::Completed => return Ok(None),
    }

    loop {
      if self.open.is_empty() || self.remaining == 0 {
        self.current = None;
        self.complete();
        return Ok(None);
      }
      let slot = self.open.swap_remove(self.rng.gen_range(0..self.open.len()));
      self.remaining -= 1;

      let generator = Generator::new(&self.settings.prompts, self.settings.option_count, self.settings.odds)
        .with_wider_pool(&self.world);
      let target = &self.sample[slot.entity];
      let result = match slot.landmark {
        Some(idx) => generator.generate_landmark(&mut self.rng, target, idx, &self.pool, &self.locale),
        None => generator.generate(&mut self.rng, slot.category, target, &self.pool, &self.locale),
      };
      match result {
        Ok(q) => {
          self.current = Some(q.clone());
          self.answered = false;
          return Ok(Some(q));
        }
        Err(e @ QuizError::MissingAnswer { .. }) => {
          warn!(target: "quiz", session = %self.id, error = %e, "Skipping question");
          self.total -= 1;
        }
        Err(e) => return Err(e),
      }
    }
  }

  /// Answer the current question. Each question takes exactly one answer.
  pub fn answer(&mut self, index: usize) -> Result<AnswerOutcome, QuizError> {
    if self.state != SessionState::InProgress || self.answered {
      return Err(QuizError::NotAnswerable);
    }
    let q = self.current.as_ref().ok_or(QuizError::NotAnswerable)?;
    if index >= q.options.len() {
      return Err(QuizError::OptionOutOfRange { index, len: q.options.len() });
    }

    let correct = index == q.correct_index;
    let correct_index = q.correct_index;
    let correct_answer = q.correct_answer.clone();
    if correct {
      self.score += 1;
    }
    self.answered = true;
    debug!(target: "quiz", session = %self.id, index, correct, score = self.score, "Answer recorded");
    if self.remaining == 0 {
      self.complete();
    }
    Ok(AnswerOutcome { correct, selected_index: index, correct_index, correct_answer, status: self.status() })
  }

  /// Back through Idle with a fresh sample. A session that failed to start stays
  /// failed and reports its original error.
  pub fn restart(&mut self, store: &dyn ReferenceStore) -> Result<(), QuizError> {
    if self.state == SessionState::Error {
      return Err(self.error.clone().unwrap_or(QuizError::InsufficientData { required: MIN_ENTITIES, available: 0 }));
    }
    self.state = SessionState::Idle;
    info!(target: "quiz", session = %self.id, "Quiz restarted");
    self.begin(store);
    Ok(())
  }

  pub fn status(&self) -> SessionStatus {
    SessionStatus { score: self.score, total: self.total, remaining: self.remaining, state: self.state }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn kind(&self) -> QuizKind {
    self.kind
  }

  pub fn locale(&self) -> &str {
    &self.locale
  }

  pub fn error(&self) -> Option<&QuizError> {
    self.error.as_ref()
  }
}
