//! Answer option assembly: correct answer + same-country confusers + similar/fallback
//! distractors, deduplicated, padded, truncated and shuffled.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::QuizError;
use crate::util::option_key;

/// Chance that each extra slot is filled with a same-country alternate.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlternateOdds {
  pub first: f64,
  pub second: f64,
  pub third: f64,
}

impl Default for AlternateOdds {
  fn default() -> Self {
    Self { first: 0.9, second: 0.5, third: 0.2 }
  }
}

impl AlternateOdds {
  fn slots(&self) -> [f64; 3] {
    [self.first, self.second, self.third].map(|p| if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 })
  }
}

/// Final option list. `options[correct_index]` is always the correct answer.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledOptions {
  pub options: Vec<String>,
  pub hidden: Vec<bool>,
  pub correct_index: usize,
}

struct Picked {
  text: String,
  hidden: bool,
  correct: bool,
}

fn is_taken(picked: &[Picked], value: &str) -> bool {
  let key = option_key(value);
  picked.iter().any(|p| option_key(&p.text) == key)
}

/// Take up to `needed` unseen values from `pool` in random order.
fn fill_from<R: Rng + ?Sized>(rng: &mut R, picked: &mut Vec<Picked>, pool: &[&str], needed: usize) {
  if needed == 0 {
    return;
  }
  let mut candidates: Vec<&str> = Vec::with_capacity(pool.len());
  for v in pool.iter().map(|v| v.trim()) {
    if v.is_empty() || is_taken(picked, v) || candidates.iter().any(|c| option_key(c) == option_key(v)) {
      continue;
    }
    candidates.push(v);
  }
  candidates.shuffle(rng);
  for v in candidates.into_iter().take(needed) {
    picked.push(Picked { text: v.to_string(), hidden: false, correct: false });
  }
}

/// Assemble exactly `option_count` options around `correct`.
///
/// `correct` must be non-blank; the generator checks this before calling.
/// Matching is done on trimmed, case-folded text, so no two visible options are
/// textually identical.
pub fn build_options<R: Rng + ?Sized>(
  rng: &mut R,
  correct: &str,
  alternates: &[&str],
  similar: &[&str],
  fallback: &[&str],
  option_count: usize,
  odds: &AlternateOdds,
  placeholder: &str,
) -> Result<AssembledOptions, QuizError> {
  if option_count < 2 {
    return Err(QuizError::OptionCountTooSmall);
  }

  let mut picked = vec![Picked { text: correct.trim().to_string(), hidden: false, correct: true }];

  // Same-country confusers, one independent draw per slot with shrinking odds.
  let mut alt_pool: Vec<&str> = Vec::new();
  for a in alternates.iter().map(|a| a.trim()) {
    if !a.is_empty() && !is_taken(&picked, a) && !alt_pool.iter().any(|x| option_key(x) == option_key(a)) {
      alt_pool.push(a);
    }
  }
  for p in odds.slots() {
    if picked.len() >= option_count || alt_pool.is_empty() {
      break;
    }
    if rng.gen_bool(p) {
      let i = rng.gen_range(0..alt_pool.len());
      let v = alt_pool.swap_remove(i);
      picked.push(Picked { text: v.to_string(), hidden: false, correct: false });
    }
  }

  let needed = option_count.saturating_sub(picked.len());
  fill_from(rng, &mut picked, similar, needed);
  let needed = option_count.saturating_sub(picked.len());
  fill_from(rng, &mut picked, fallback, needed);

  while picked.len() < option_count {
    picked.push(Picked { text: placeholder.to_string(), hidden: true, correct: false });
  }
  // Correct answer sits at index 0 before shuffling, so truncation never drops it.
  picked.truncate(option_count);
  picked.shuffle(rng);

  let correct_index = picked.iter().position(|p| p.correct).unwrap_or(0);
  let hidden = picked.iter().map(|p| p.hidden).collect();
  let options = picked.into_iter().map(|p| p.text).collect();
  Ok(AssembledOptions { options, hidden, correct_index })
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const ALWAYS: AlternateOdds = AlternateOdds { first: 1.0, second: 1.0, third: 1.0 };
  const NEVER: AlternateOdds = AlternateOdds { first: 0.0, second: 0.0, third: 0.0 };

  #[test]
  fn correct_answer_is_at_correct_index() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
      let out = build_options(
        &mut rng,
        "Paris",
        &["Marseille", "Lyon"],
        &["Berlin", "Madrid", "Rome"],
        &["Tokyo"],
        4,
        &AlternateOdds::default(),
        "Unknown",
      )
      .expect("options");
      assert_eq!(out.options.len(), 4);
      assert_eq!(out.options[out.correct_index], "Paris");
      assert!(out.hidden.iter().all(|h| !h));
    }
  }

  #[test]
  fn alternates_fill_first_when_odds_are_certain() {
    let mut rng = StdRng::seed_from_u64(1);
    let out = build_options(&mut rng, "Ottawa", &["Toronto", "Montreal", "Vancouver"], &["Washington D.C."], &[], 4, &ALWAYS, "?")
      .unwrap();
    let mut sorted = out.options.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["Montreal", "Ottawa", "Toronto", "Vancouver"]);
  }

  #[test]
  fn alternates_skipped_when_odds_are_zero() {
    let mut rng = StdRng::seed_from_u64(1);
    let out = build_options(&mut rng, "Ottawa", &["Toronto"], &["Washington D.C.", "Mexico City", "Havana"], &[], 4, &NEVER, "?")
      .unwrap();
    assert!(!out.options.contains(&"Toronto".to_string()));
  }

  #[test]
  fn duplicates_are_removed_and_padding_is_hidden() {
    let mut rng = StdRng::seed_from_u64(9);
    let out = build_options(&mut rng, "Paris", &["paris ", "Lyon"], &["Lyon", "Paris"], &["LYON"], 4, &ALWAYS, "Unknown").unwrap();
    assert_eq!(out.options.len(), 4);
    assert_eq!(out.options[out.correct_index], "Paris");
    let visible: Vec<&String> = out.options.iter().zip(&out.hidden).filter(|(_, h)| !**h).map(|(o, _)| o).collect();
    assert_eq!(visible.len(), 2);
    assert_eq!(out.hidden.iter().filter(|h| **h).count(), 2);
    assert!(!out.hidden[out.correct_index]);
  }

  #[test]
  fn fallback_widens_when_similar_is_short() {
    let mut rng = StdRng::seed_from_u64(4);
    let out = build_options(&mut rng, "Lima", &[], &["Quito"], &["Oslo", "Cairo", "Lima"], 4, &NEVER, "?").unwrap();
    let mut sorted = out.options.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["Cairo", "Lima", "Oslo", "Quito"]);
  }

  #[test]
  fn truncates_to_option_count() {
    let mut rng = StdRng::seed_from_u64(4);
    let out = build_options(&mut rng, "Yes", &[], &["No", "Maybe"], &[], 2, &NEVER, "?").unwrap();
    assert_eq!(out.options.len(), 2);
    assert_eq!(out.options[out.correct_index], "Yes");
  }

  #[test]
  fn rejects_tiny_option_count() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = build_options(&mut rng, "A", &[], &[], &[], 1, &NEVER, "?").unwrap_err();
    assert_eq!(err, QuizError::OptionCountTooSmall);
  }
}
