//! Reference data store: the read-only country table plus per-locale translations.
//!
//! Records are loaded once at startup (bundled seeds or a JSON dataset file) and never
//! mutated afterwards. Every query returns owned `Country` values with the translation
//! for the requested locale attached, so callers only ever deal with one locale.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::domain::{Country, Landmark, Translation, CANONICAL_LOCALE};
use crate::error::QuizError;

/// On-disk dataset shape (JSON).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Dataset {
  pub countries: Vec<Country>,
  #[serde(default)]
  pub translations: Vec<TranslationRecord>,
}

/// Translation of one country into one locale, keyed by the canonical country name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranslationRecord {
  pub country: String,
  #[serde(flatten)]
  pub translation: Translation,
  /// Canonical landmark name -> translated name.
  #[serde(default)]
  pub landmarks: HashMap<String, String>,
}

/// Queries the quiz needs from the reference data.
pub trait ReferenceStore: Send + Sync {
  /// Up to `n` distinct countries in random order.
  fn sample_random(&self, rng: &mut dyn RngCore, n: usize, locale: &str) -> Vec<Country>;
  fn by_category(&self, category: &str, locale: &str) -> Vec<Country>;
  fn by_difficulty(&self, tier: u8, locale: &str) -> Vec<Country>;
  fn landmarks_for(&self, country_id: u32) -> Vec<Landmark>;
  fn all_with_landmarks(&self, locale: &str) -> Vec<Country>;
  fn available_locales(&self) -> Vec<String>;
}

struct LocalizedText {
  translation: Translation,
  landmarks: HashMap<String, String>,
}

pub struct MemoryStore {
  countries: Vec<Country>,
  translations: HashMap<(u32, String), LocalizedText>,
}

impl MemoryStore {
  /// Validate and index a dataset. Duplicate ids or names are fatal; translations for
  /// unknown countries and countries without languages are skipped with a warning.
  pub fn from_dataset(ds: Dataset) -> Result<Self, QuizError> {
    let mut ids = HashSet::new();
    let mut by_name = HashMap::new();
    let mut countries = Vec::with_capacity(ds.countries.len());

    for mut c in ds.countries {
      if c.name.trim().is_empty() {
        return Err(QuizError::Dataset(format!("country {} has an empty name", c.id)));
      }
      if !ids.insert(c.id) {
        return Err(QuizError::Dataset(format!("duplicate country id {}", c.id)));
      }
      if by_name.insert(c.name.clone(), c.id).is_some() {
        return Err(QuizError::Dataset(format!("duplicate country name '{}'", c.name)));
      }
      if c.languages.iter().all(|l| l.trim().is_empty()) {
        warn!(target: "geoquiz", country = %c.name, "Skipping country without languages");
        continue;
      }
      // Stored records carry canonical text only.
      c.translation = None;
      countries.push(c);
    }

    let mut translations = HashMap::new();
    for rec in ds.translations {
      let Some(&id) = by_name.get(&rec.country) else {
        warn!(target: "geoquiz", country = %rec.country, locale = %rec.translation.locale, "Translation for unknown country ignored");
        continue;
      };
      let locale = rec.translation.locale.trim().to_lowercase();
      if locale.is_empty() || locale == CANONICAL_LOCALE {
        continue;
      }
      translations.insert((id, locale), LocalizedText { translation: rec.translation, landmarks: rec.landmarks });
    }

    info!(target: "geoquiz", countries = countries.len(), translations = translations.len(), "Reference data loaded");
    Ok(Self { countries, translations })
  }

  pub fn from_json_str(s: &str) -> Result<Self, QuizError> {
    let ds: Dataset = serde_json::from_str(s).map_err(|e| QuizError::Dataset(e.to_string()))?;
    Self::from_dataset(ds)
  }

  #[instrument(level = "info")]
  pub fn load_json_file(path: &str) -> Result<Self, QuizError> {
    let s = std::fs::read_to_string(path).map_err(|e| QuizError::Dataset(format!("{path}: {e}")))?;
    Self::from_json_str(&s)
  }

  pub fn empty() -> Self {
    Self { countries: Vec::new(), translations: HashMap::new() }
  }

  pub fn len(&self) -> usize {
    self.countries.len()
  }

  fn localize(&self, c: &Country, locale: &str) -> Country {
    let mut out = c.clone();
    if let Some(text) = self.translations.get(&(c.id, locale.to_string())) {
      out.translation = Some(Translation { locale: locale.to_string(), ..text.translation.clone() });
      for lm in out.landmarks.iter_mut() {
        lm.translated_name = text.landmarks.get(&lm.name).cloned();
      }
    }
    out
  }

  fn localize_where(&self, locale: &str, keep: impl Fn(&Country) -> bool) -> Vec<Country> {
    self.countries.iter().filter(|c| keep(c)).map(|c| self.localize(c, locale)).collect()
  }
}

impl ReferenceStore for MemoryStore {
  fn sample_random(&self, rng: &mut dyn RngCore, n: usize, locale: &str) -> Vec<Country> {
    self
      .countries
      .choose_multiple(rng, n)
      .map(|c| self.localize(c, locale))
      .collect()
  }

  fn by_category(&self, category: &str, locale: &str) -> Vec<Country> {
    self.localize_where(locale, |c| c.category == category)
  }

  fn by_difficulty(&self, tier: u8, locale: &str) -> Vec<Country> {
    self.localize_where(locale, |c| c.difficulty == tier)
  }

  fn landmarks_for(&self, country_id: u32) -> Vec<Landmark> {
    self
      .countries
      .iter()
      .find(|c| c.id == country_id)
      .map(|c| c.landmarks.clone())
      .unwrap_or_default()
  }

  fn all_with_landmarks(&self, locale: &str) -> Vec<Country> {
    self.localize_where(locale, |c| !c.landmarks.is_empty())
  }

  fn available_locales(&self) -> Vec<String> {
    let mut extra: Vec<String> = self.translations.keys().map(|(_, l)| l.clone()).collect();
    extra.sort();
    extra.dedup();
    let mut out = vec![CANONICAL_LOCALE.to_string()];
    out.extend(extra);
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Field;
  use crate::seeds::seed_dataset;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn store() -> MemoryStore {
    MemoryStore::from_dataset(seed_dataset()).expect("seed dataset is valid")
  }

  #[test]
  fn sample_is_distinct_and_bounded() {
    let s = store();
    let mut rng = StdRng::seed_from_u64(1);
    let sample = s.sample_random(&mut rng, 10, "en");
    assert_eq!(sample.len(), 10);
    let ids: HashSet<u32> = sample.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 10);
    assert_eq!(s.sample_random(&mut rng, 500, "en").len(), s.len());
  }

  #[test]
  fn queries_attach_requested_translation() {
    let s = store();
    let europe = s.by_category("europe_major", "fr");
    let germany = europe.iter().find(|c| c.name == "Germany").expect("germany");
    assert_eq!(germany.display(Field::Name, "fr"), Some("Allemagne"));
    assert_eq!(germany.display(Field::Name, "en"), Some("Germany"));

    let landmarks = s.all_with_landmarks("fr");
    let italy = landmarks.iter().find(|c| c.name == "Italy").expect("italy");
    assert_eq!(italy.landmarks[0].display_name(), "Colisée");
    assert!(landmarks.iter().all(|c| !c.landmarks.is_empty()));

    let english = s.all_with_landmarks("en");
    let italy = english.iter().find(|c| c.name == "Italy").expect("italy");
    assert_eq!(italy.landmarks[0].display_name(), "Colosseum");
    assert_eq!(s.landmarks_for(italy.id).len(), 2);
    assert!(s.landmarks_for(9999).is_empty());
  }

  #[test]
  fn difficulty_filter_and_locales() {
    let s = store();
    assert!(s.by_difficulty(2, "en").iter().all(|c| c.difficulty == 2));
    assert_eq!(s.available_locales(), vec!["en", "de", "es", "fr", "ja"]);
  }

  #[test]
  fn rejects_duplicate_ids_and_loads_json() {
    let mut ds = seed_dataset();
    let mut dup = ds.countries[0].clone();
    dup.name = "Elsewhere".into();
    ds.countries.push(dup);
    assert!(matches!(MemoryStore::from_dataset(ds), Err(QuizError::Dataset(_))));

    let json = r#"{
      "countries": [{
        "id": 1, "name": "Peru", "code": "PE", "capital": "Lima", "big_city": "Lima",
        "continent": "Americas", "region": "South America", "category": "americas_south",
        "languages": ["Spanish", "Quechua"], "currency": "Sol", "population": 32971854,
        "area": 1285216, "difficulty": 2
      }],
      "translations": [
        { "country": "Peru", "locale": "fr", "name": "Pérou" },
        { "country": "Atlantis", "locale": "fr", "name": "Atlantide" }
      ]
    }"#;
    let s = MemoryStore::from_json_str(json).expect("json dataset");
    assert_eq!(s.len(), 1);
    let peru = &s.by_difficulty(2, "fr")[0];
    assert_eq!(peru.display_name("fr"), "Pérou");
    assert_eq!(peru.display(Field::Capital, "fr"), Some("Lima"));

    assert!(matches!(MemoryStore::from_json_str("{"), Err(QuizError::Dataset(_))));
  }
}
