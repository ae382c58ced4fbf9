//! Display languages and the localized text templates used for prompts and feedback.
//!
//! Country text (names, cities, languages) is localized by the reference store; this
//! module only covers the fixed strings around it.

use serde::{Deserialize, Serialize};

use crate::domain::CANONICAL_LOCALE;

/// Locales the app ships prompt text for, with their self-names.
pub const SUPPORTED_LOCALES: &[(&str, &str)] = &[
  ("en", "English"),
  ("fr", "Français"),
  ("es", "Español"),
  ("de", "Deutsch"),
  ("ja", "日本語"),
];

/// Lowercased primary subtag ("fr-CA" -> "fr"); unsupported or empty input maps to
/// `default`.
pub fn resolve_locale(requested: Option<&str>, default: &str) -> String {
  let primary = requested
    .map(|r| r.trim().split(['-', '_']).next().unwrap_or("").to_lowercase())
    .unwrap_or_default();
  if SUPPORTED_LOCALES.iter().any(|(code, _)| *code == primary) {
    primary
  } else if SUPPORTED_LOCALES.iter().any(|(code, _)| *code == default) {
    default.to_string()
  } else {
    CANONICAL_LOCALE.to_string()
  }
}

pub fn display_name(locale: &str) -> &'static str {
  SUPPORTED_LOCALES
    .iter()
    .find(|(code, _)| *code == locale)
    .map(|(_, name)| *name)
    .unwrap_or("English")
}

/// Templates for one locale. `{country}`, `{other}`, `{landmark}`, `{score}` and
/// `{total}` are substituted with `util::fill_template`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Prompts {
  pub capital: String,
  pub biggest_city: String,
  pub city_in_country: String,
  pub language: String,
  pub language_count: String,
  pub continent: String,
  pub area: String,
  pub population: String,
  pub flag: String,
  pub landmark: String,
  pub yes: String,
  pub no: String,
  /// Text of padded options that the frontend keeps hidden.
  pub unknown: String,
  pub correct: String,
  pub wrong: String,
  pub quiz_complete: String,
  pub not_enough_countries: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      capital: "What is the capital of {country}?".into(),
      biggest_city: "What is the biggest city in {country}?".into(),
      city_in_country: "Which of these cities is in {country}?".into(),
      language: "Which language is spoken in {country}?".into(),
      language_count: "How many languages are spoken in {country}?".into(),
      continent: "Which continent is {country} in?".into(),
      area: "Which of these countries has the largest area?".into(),
      population: "Does {country} have a larger population than {other}?".into(),
      flag: "Which country does this flag belong to?".into(),
      landmark: "In which country is {landmark}?".into(),
      yes: "Yes".into(),
      no: "No".into(),
      unknown: "Unknown".into(),
      correct: "Correct!".into(),
      wrong: "Wrong!".into(),
      quiz_complete: "Quiz complete! You scored {score} out of {total}.".into(),
      not_enough_countries: "Not enough countries available for this quiz.".into(),
    }
  }
}

impl Prompts {
  /// Built-in templates for `locale`, English when the locale has none.
  pub fn builtin(locale: &str) -> Self {
    match locale {
      "fr" => Self {
        capital: "Quelle est la capitale de {country} ?".into(),
        biggest_city: "Quelle est la plus grande ville de {country} ?".into(),
        city_in_country: "Laquelle de ces villes se trouve en {country} ?".into(),
        language: "Quelle langue parle-t-on en {country} ?".into(),
        language_count: "Combien de langues parle-t-on en {country} ?".into(),
        continent: "Sur quel continent se trouve {country} ?".into(),
        area: "Lequel de ces pays a la plus grande superficie ?".into(),
        population: "{country} a-t-il une population plus grande que {other} ?".into(),
        flag: "À quel pays appartient ce drapeau ?".into(),
        landmark: "Dans quel pays se trouve {landmark} ?".into(),
        yes: "Oui".into(),
        no: "Non".into(),
        unknown: "Inconnu".into(),
        correct: "Correct !".into(),
        wrong: "Faux !".into(),
        quiz_complete: "Quiz terminé ! Score : {score} sur {total}.".into(),
        not_enough_countries: "Pas assez de pays disponibles pour ce quiz.".into(),
      },
      "es" => Self {
        capital: "¿Cuál es la capital de {country}?".into(),
        biggest_city: "¿Cuál es la ciudad más grande de {country}?".into(),
        city_in_country: "¿Cuál de estas ciudades está en {country}?".into(),
        language: "¿Qué idioma se habla en {country}?".into(),
        language_count: "¿Cuántos idiomas se hablan en {country}?".into(),
        continent: "¿En qué continente está {country}?".into(),
        area: "¿Cuál de estos países tiene la mayor superficie?".into(),
        population: "¿Tiene {country} más población que {other}?".into(),
        flag: "¿A qué país pertenece esta bandera?".into(),
        landmark: "¿En qué país está {landmark}?".into(),
        yes: "Sí".into(),
        no: "No".into(),
        unknown: "Desconocido".into(),
        correct: "¡Correcto!".into(),
        wrong: "¡Incorrecto!".into(),
        quiz_complete: "¡Quiz terminado! Puntuación: {score} de {total}.".into(),
        not_enough_countries: "No hay suficientes países para este quiz.".into(),
      },
      "de" => Self {
        capital: "Was ist die Hauptstadt von {country}?".into(),
        biggest_city: "Was ist die größte Stadt in {country}?".into(),
        city_in_country: "Welche dieser Städte liegt in {country}?".into(),
        language: "Welche Sprache wird in {country} gesprochen?".into(),
        language_count: "Wie viele Sprachen werden in {country} gesprochen?".into(),
        continent: "Auf welchem Kontinent liegt {country}?".into(),
        area: "Welches dieser Länder hat die größte Fläche?".into(),
        population: "Hat {country} mehr Einwohner als {other}?".into(),
        flag: "Zu welchem Land gehört diese Flagge?".into(),
        landmark: "In welchem Land befindet sich {landmark}?".into(),
        yes: "Ja".into(),
        no: "Nein".into(),
        unknown: "Unbekannt".into(),
        correct: "Richtig!".into(),
        wrong: "Falsch!".into(),
        quiz_complete: "Quiz beendet! Punkte: {score} von {total}.".into(),
        not_enough_countries: "Nicht genügend Länder für dieses Quiz vorhanden.".into(),
      },
      "ja" => Self {
        capital: "{country}の首都はどこですか？".into(),
        biggest_city: "{country}で最も大きな都市はどこですか？".into(),
        city_in_country: "{country}にある都市はどれですか？".into(),
        language: "{country}で話されている言語はどれですか？".into(),
        language_count: "{country}ではいくつの言語が話されていますか？".into(),
        continent: "{country}はどの大陸にありますか？".into(),
        area: "面積が最も大きい国はどれですか？".into(),
        population: "{country}の人口は{other}より多いですか？".into(),
        flag: "この国旗はどの国のものですか？".into(),
        landmark: "{landmark}はどの国にありますか？".into(),
        yes: "はい".into(),
        no: "いいえ".into(),
        unknown: "不明".into(),
        correct: "正解！".into(),
        wrong: "不正解！".into(),
        quiz_complete: "クイズ終了！スコア：{total}問中{score}問正解。".into(),
        not_enough_countries: "このクイズに必要な国のデータが足りません。".into(),
      },
      _ => Self::default(),
    }
  }
}

/// Partial template set accepted from TOML; set fields replace the built-in ones.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PromptOverrides {
  #[serde(default)] pub capital: Option<String>,
  #[serde(default)] pub biggest_city: Option<String>,
  #[serde(default)] pub city_in_country: Option<String>,
  #[serde(default)] pub language: Option<String>,
  #[serde(default)] pub language_count: Option<String>,
  #[serde(default)] pub continent: Option<String>,
  #[serde(default)] pub area: Option<String>,
  #[serde(default)] pub population: Option<String>,
  #[serde(default)] pub flag: Option<String>,
  #[serde(default)] pub landmark: Option<String>,
  #[serde(default)] pub yes: Option<String>,
  #[serde(default)] pub no: Option<String>,
  #[serde(default)] pub unknown: Option<String>,
  #[serde(default)] pub correct: Option<String>,
  #[serde(default)] pub wrong: Option<String>,
  #[serde(default)] pub quiz_complete: Option<String>,
  #[serde(default)] pub not_enough_countries: Option<String>,
}

impl PromptOverrides {
  pub fn apply(&self, base: &mut Prompts) {
    let pairs: [(&Option<String>, &mut String); 17] = [
      (&self.capital, &mut base.capital),
      (&self.biggest_city, &mut base.biggest_city),
      (&self.city_in_country, &mut base.city_in_country),
      (&self.language, &mut base.language),
      (&self.language_count, &mut base.language_count),
      (&self.continent, &mut base.continent),
      (&self.area, &mut base.area),
      (&self.population, &mut base.population),
      (&self.flag, &mut base.flag),
      (&self.landmark, &mut base.landmark),
      (&self.yes, &mut base.yes),
      (&self.no, &mut base.no),
      (&self.unknown, &mut base.unknown),
      (&self.correct, &mut base.correct),
      (&self.wrong, &mut base.wrong),
      (&self.quiz_complete, &mut base.quiz_complete),
      (&self.not_enough_countries, &mut base.not_enough_countries),
    ];
    for (over, slot) in pairs {
      if let Some(v) = over.as_deref().filter(|v| !v.trim().is_empty()) {
        *slot = v.to_string();
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_region_tags_and_unknown_locales() {
    assert_eq!(resolve_locale(Some("fr-CA"), "en"), "fr");
    assert_eq!(resolve_locale(Some("DE"), "en"), "de");
    assert_eq!(resolve_locale(Some("pt"), "es"), "es");
    assert_eq!(resolve_locale(None, "xx"), "en");
  }

  #[test]
  fn overrides_replace_only_set_fields() {
    let mut p = Prompts::builtin("fr");
    let over = PromptOverrides { yes: Some("Ouais".into()), no: Some("  ".into()), ..Default::default() };
    over.apply(&mut p);
    assert_eq!(p.yes, "Ouais");
    assert_eq!(p.no, "Non");
    assert_eq!(display_name("ja"), "日本語");
  }
}
