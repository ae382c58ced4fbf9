//! Loading quiz configuration (sizes, odds, locale, prompt overrides) from TOML.
//!
//! Example:
//! ```toml
//! default_locale = "fr"
//! option_count = 4
//! rng_seed = 7
//! dataset_path = "data/countries.json"
//! landmark_cap = 20
//! session_idle_secs = 1800
//! max_sessions = 10000
//!
//! [alternate_odds]
//! first = 0.9
//! second = 0.5
//! third = 0.2
//!
//! [quizzes]
//! city = 10
//! flag = 20
//!
//! [prompts.fr]
//! yes = "Oui !"
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info};

use crate::assembler::AlternateOdds;
use crate::domain::{QuizKind, CANONICAL_LOCALE};
use crate::locale::{PromptOverrides, Prompts};

/// Entities drawn per quiz kind. Landmark quizzes use every country with landmarks.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizSizes {
  pub city: usize,
  pub language: usize,
  pub flag: usize,
  pub general: usize,
  pub mixed: usize,
}

impl Default for QuizSizes {
  fn default() -> Self {
    Self { city: 10, language: 10, flag: 20, general: 10, mixed: 10 }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
  pub default_locale: String,
  pub option_count: usize,
  /// Fixed seed for every session RNG; entropy when absent.
  pub rng_seed: Option<u64>,
  /// JSON dataset replacing the bundled one.
  pub dataset_path: Option<String>,
  pub alternate_odds: AlternateOdds,
  pub quizzes: QuizSizes,
  /// Upper bound on landmark questions per quiz.
  pub landmark_cap: usize,
  pub prompts: HashMap<String, PromptOverrides>,
  /// Sessions untouched for longer than this are evicted.
  pub session_idle_secs: u64,
  /// Live session cap; the least recently touched go first.
  pub max_sessions: usize,
}

impl Default for QuizConfig {
  fn default() -> Self {
    Self {
      default_locale: CANONICAL_LOCALE.into(),
      option_count: 4,
      rng_seed: None,
      dataset_path: None,
      alternate_odds: AlternateOdds::default(),
      quizzes: QuizSizes::default(),
      landmark_cap: 20,
      prompts: HashMap::new(),
      session_idle_secs: 1800,
      max_sessions: 10_000,
    }
  }
}

impl QuizConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str::<QuizConfig>(s)
  }

  /// Replace values no quiz can run with.
  pub fn sanitize(&mut self) {
    if self.option_count < 2 {
      error!(target: "geoquiz", option_count = self.option_count, "option_count below 2; using 4");
      self.option_count = 4;
    }
    if self.max_sessions == 0 {
      error!(target: "geoquiz", "max_sessions is 0; using 1");
      self.max_sessions = 1;
    }
  }

  /// `None` means "every country that has landmarks".
  pub fn sample_size(&self, kind: QuizKind) -> Option<usize> {
    match kind {
      QuizKind::City => Some(self.quizzes.city),
      QuizKind::Language => Some(self.quizzes.language),
      QuizKind::Flag => Some(self.quizzes.flag),
      QuizKind::General => Some(self.quizzes.general),
      QuizKind::Mixed => Some(self.quizzes.mixed),
      QuizKind::Landmark => None,
    }
  }

  /// Built-in templates for `locale` with any TOML overrides applied.
  pub fn prompts_for(&self, locale: &str) -> Prompts {
    let mut p = Prompts::builtin(locale);
    if let Some(over) = self.prompts.get(locale) {
      over.apply(&mut p);
    }
    p
  }
}

/// Load `QuizConfig` from GEOQUIZ_CONFIG_PATH. On any parsing/IO error, returns defaults.
/// DATASET_PATH, when set, wins over `dataset_path` from the file.
pub fn load_quiz_config_from_env() -> QuizConfig {
  let mut cfg = match std::env::var("GEOQUIZ_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match QuizConfig::from_toml_str(&s) {
        Ok(cfg) => {
          info!(target: "geoquiz", %path, "Loaded quiz config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "geoquiz", %path, error = %e, "Failed to parse TOML config; using defaults");
          QuizConfig::default()
        }
      },
      Err(e) => {
        error!(target: "geoquiz", %path, error = %e, "Failed to read TOML config file; using defaults");
        QuizConfig::default()
      }
    },
    Err(_) => QuizConfig::default(),
  };

  if let Ok(path) = std::env::var("DATASET_PATH") {
    cfg.dataset_path = Some(path);
  }
  cfg.sanitize();
  cfg
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_defaults() {
    let cfg = QuizConfig::from_toml_str(
      r#"
        default_locale = "de"
        rng_seed = 7

        [quizzes]
        flag = 12

        [prompts.de]
        yes = "Jawohl"
      "#,
    )
    .expect("config");
    assert_eq!(cfg.default_locale, "de");
    assert_eq!(cfg.option_count, 4);
    assert_eq!(cfg.rng_seed, Some(7));
    assert_eq!(cfg.sample_size(QuizKind::Flag), Some(12));
    assert_eq!(cfg.sample_size(QuizKind::City), Some(10));
    assert_eq!(cfg.sample_size(QuizKind::Landmark), None);
    assert_eq!(cfg.alternate_odds, AlternateOdds::default());
    assert_eq!(cfg.prompts_for("de").yes, "Jawohl");
    assert_eq!(cfg.prompts_for("de").no, "Nein");
    assert_eq!(cfg.prompts_for("fr").yes, "Oui");
    assert_eq!(cfg.session_idle_secs, 1800);
    assert_eq!(cfg.max_sessions, 10_000);
  }

  #[test]
  fn sanitize_fixes_unusable_counts() {
    let mut cfg = QuizConfig::from_toml_str("option_count = 0\nmax_sessions = 0\nsession_idle_secs = 60").expect("config");
    assert_eq!(cfg.option_count, 0);
    cfg.sanitize();
    assert_eq!(cfg.option_count, 4);
    assert_eq!(cfg.max_sessions, 1);
    assert_eq!(cfg.session_idle_secs, 60);
  }
}
