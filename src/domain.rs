//! Domain models: countries (with optional translation), landmarks, question categories,
//! quiz kinds and the generated question itself.

use serde::{Deserialize, Serialize};

/// Locale whose text is stored canonically on every record.
pub const CANONICAL_LOCALE: &str = "en";

/// Translatable single-valued fields of a country.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
  Name,
  Capital,
  BigCity,
  SecondCity,
  ThirdCity,
  Continent,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Landmark {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub translated_name: Option<String>,
  /// Asset path of the picture, e.g. "landmark/france/eiffel_tower.jpg".
  pub image: String,
}

impl Landmark {
  pub fn display_name(&self) -> &str {
    match self.translated_name.as_deref() {
      Some(t) if !t.trim().is_empty() => t,
      _ => &self.name,
    }
  }
}

/// Translated text for one locale. Every field is optional; blanks count as missing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Translation {
  pub locale: String,
  #[serde(default)] pub name: Option<String>,
  #[serde(default)] pub capital: Option<String>,
  #[serde(default)] pub big_city: Option<String>,
  #[serde(default)] pub second_city: Option<String>,
  #[serde(default)] pub third_city: Option<String>,
  #[serde(default)] pub continent: Option<String>,
  #[serde(default)] pub region: Option<String>,
  #[serde(default)] pub currency: Option<String>,
  #[serde(default)] pub languages: Vec<String>,
}

/// A country record as served by the reference store.
///
/// `translation` is populated by the store for the locale that was asked for; the
/// record itself never changes after loading.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Country {
  pub id: u32,
  pub name: String,
  /// Two-letter code, used as the flag asset key.
  pub code: String,
  pub capital: String,
  pub big_city: String,
  #[serde(default)] pub second_city: Option<String>,
  #[serde(default)] pub third_city: Option<String>,
  pub continent: String,
  pub region: String,
  pub category: String,
  pub languages: Vec<String>,
  pub currency: String,
  pub population: u64,
  pub area: u64,
  pub difficulty: u8,
  #[serde(default)] pub flag_colors: Vec<String>,
  #[serde(default)] pub flag_emblems: Vec<String>,
  #[serde(default)] pub landmarks: Vec<Landmark>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub translation: Option<Translation>,
}

fn non_blank(s: Option<&str>) -> Option<&str> {
  s.filter(|v| !v.trim().is_empty())
}

impl Country {
  fn canonical(&self, field: Field) -> Option<&str> {
    match field {
      Field::Name => Some(&self.name),
      Field::Capital => Some(&self.capital),
      Field::BigCity => Some(&self.big_city),
      Field::SecondCity => self.second_city.as_deref(),
      Field::ThirdCity => self.third_city.as_deref(),
      Field::Continent => Some(&self.continent),
    }
  }

  fn translation_for(&self, locale: &str) -> Option<&Translation> {
    if locale == CANONICAL_LOCALE {
      return None;
    }
    self.translation.as_ref().filter(|t| t.locale == locale)
  }

  /// Text to show for `field` in `locale`: the translation when present and not blank,
  /// otherwise the canonical value. `None` only when both are missing or blank.
  pub fn display(&self, field: Field, locale: &str) -> Option<&str> {
    let translated = self.translation_for(locale).and_then(|t| {
      let v = match field {
        Field::Name => &t.name,
        Field::Capital => &t.capital,
        Field::BigCity => &t.big_city,
        Field::SecondCity => &t.second_city,
        Field::ThirdCity => &t.third_city,
        Field::Continent => &t.continent,
      };
      non_blank(v.as_deref())
    });
    translated.or_else(|| non_blank(self.canonical(field)))
  }

  /// Display name, falling back to the raw canonical name even if blank.
  pub fn display_name(&self, locale: &str) -> &str {
    self.display(Field::Name, locale).unwrap_or(&self.name)
  }

  /// (canonical, displayed) language pairs.
  ///
  /// A translated list is only used when it lines up one-to-one with the canonical
  /// list, so every displayed language can be traced back to its canonical name.
  pub fn language_pairs(&self, locale: &str) -> Vec<(&str, &str)> {
    let canonical: Vec<&str> = self
      .languages
      .iter()
      .map(|l| l.trim())
      .filter(|l| !l.is_empty())
      .collect();
    let translated: Vec<&str> = self
      .translation_for(locale)
      .map(|t| t.languages.iter().map(|l| l.trim()).collect())
      .unwrap_or_default();

    if translated.len() == canonical.len() {
      canonical
        .into_iter()
        .zip(translated)
        .map(|(c, t)| if t.is_empty() { (c, c) } else { (c, t) })
        .collect()
    } else {
      canonical.into_iter().map(|c| (c, c)).collect()
    }
  }

  pub fn display_languages(&self, locale: &str) -> Vec<&str> {
    self.language_pairs(locale).into_iter().map(|(_, d)| d).collect()
  }

  /// Capital, biggest, second and third city as displayed, blanks dropped, deduplicated.
  pub fn display_cities(&self, locale: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(4);
    for field in [Field::Capital, Field::BigCity, Field::SecondCity, Field::ThirdCity] {
      if let Some(city) = self.display(field, locale) {
        if !out.contains(&city) {
          out.push(city);
        }
      }
    }
    out
  }

  pub fn flag_asset(&self) -> String {
    format!("flag/{}.svg", self.code.to_lowercase())
  }
}

/// One question type. Each variant has exactly one generator function.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
  Capital,
  BiggestCity,
  CityInCountry,
  Language,
  LanguageCount,
  Continent,
  Area,
  Population,
  Flag,
  Landmark,
}

impl QuestionCategory {
  /// Yes/no questions carry two options instead of the configured count.
  pub fn is_yes_no(self) -> bool {
    matches!(self, QuestionCategory::Population)
  }
}

/// Quiz screens offered to the player; each one asks a fixed set of categories.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuizKind {
  City,
  Language,
  Flag,
  Landmark,
  General,
  Mixed,
}

impl Default for QuizKind {
  fn default() -> Self { QuizKind::City }
}

impl QuizKind {
  pub fn categories(self) -> &'static [QuestionCategory] {
    use QuestionCategory::*;
    match self {
      QuizKind::City => &[Capital, BiggestCity, CityInCountry],
      QuizKind::Language => &[Language, LanguageCount],
      QuizKind::Flag => &[Flag],
      QuizKind::Landmark => &[Landmark],
      QuizKind::General => &[Capital, Continent, Population, Area],
      QuizKind::Mixed => &[
        Capital,
        BiggestCity,
        CityInCountry,
        Language,
        LanguageCount,
        Continent,
        Area,
        Population,
        Flag,
      ],
    }
  }
}

/// Narrows the sample a quiz is drawn from.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Scope {
  #[default]
  All,
  Category(String),
  Difficulty(u8),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
  Flag,
  Landmark,
}

/// Picture shown alongside the prompt. Loading it (and falling back to a
/// placeholder image) is the frontend's job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Media {
  pub kind: MediaKind,
  pub path: String,
}

/// A generated multiple-choice question.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Question {
  pub category: QuestionCategory,
  pub prompt: String,
  pub options: Vec<String>,
  /// Placeholder padding; the frontend hides these slots instead of showing them.
  pub hidden: Vec<bool>,
  pub correct_index: usize,
  pub correct_answer: String,
  #[serde(default)] pub media: Option<Media>,
}
