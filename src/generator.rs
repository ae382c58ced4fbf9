//! Question generation: one function per `QuestionCategory`, selected by a single
//! dispatch in `Generator::generate`.
//!
//! Every generator follows the same shape: pick the correct value for the target,
//! collect same-country alternates (if the category has any), rank the rest of the pool
//! by similarity, and hand everything to the assembler. All text goes through the
//! per-field display accessors, so a missing translation silently shows the canonical
//! value.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::assembler::{build_options, AlternateOdds, AssembledOptions};
use crate::domain::{Country, Field, Media, MediaKind, Question, QuestionCategory};
use crate::error::QuizError;
use crate::locale::Prompts;
use crate::similarity::{flag_similarity, rank_similar, weighted_by_flag, SimilarityLevel};
use crate::util::{fill_template, option_key};

const NO_ALTERNATES: AlternateOdds = AlternateOdds { first: 0.0, second: 0.0, third: 0.0 };

/// Stateless question factory for one locale's templates.
pub struct Generator<'a> {
  pub prompts: &'a Prompts,
  pub option_count: usize,
  pub odds: AlternateOdds,
  /// Countries outside the quiz scope, consulted when the scoped pool cannot supply
  /// enough distinct values.
  pub wider: &'a [Country],
}

fn missing(target: &Country, category: QuestionCategory) -> QuizError {
  QuizError::MissingAnswer { country: target.name.clone(), category }
}

/// Pool members other than the target, split into (similar, everything else).
fn split_pool<'p, R: Rng + ?Sized>(rng: &mut R, target: &Country, pool: &'p [Country]) -> (Vec<&'p Country>, Vec<&'p Country>) {
  let similar = rank_similar(rng, target, pool);
  let mut rest: Vec<&'p Country> = pool
    .iter()
    .filter(|c| c.id != target.id && !similar.iter().any(|s| s.id == c.id))
    .collect();
  rest.shuffle(rng);
  (similar, rest)
}

fn field_values<'c>(countries: &[&'c Country], field: Field, locale: &str) -> Vec<&'c str> {
  countries.iter().filter_map(|c| c.display(field, locale)).collect()
}

fn other_continents<'p>(target: &Country, countries: &'p [Country]) -> Vec<&'p Country> {
  countries
    .iter()
    .filter(|c| c.id != target.id && c.continent != target.continent)
    .collect()
}

fn names<'c>(countries: &[&'c Country], locale: &str) -> Vec<&'c str> {
  countries.iter().map(|c| c.display_name(locale)).collect()
}

impl<'a> Generator<'a> {
  pub fn new(prompts: &'a Prompts, option_count: usize, odds: AlternateOdds) -> Self {
    Self { prompts, option_count, odds, wider: &[] }
  }

  pub fn with_wider_pool(self, wider: &'a [Country]) -> Self {
    Self { wider, ..self }
  }

  /// Build one question about `target`, drawing distractors from `pool`.
  /// `pool` may contain the target; it is always excluded from the distractors.
  pub fn generate<R: Rng + ?Sized>(
    &self,
    rng: &mut R,
    category: QuestionCategory,
    target: &Country,
    pool: &[Country],
    locale: &str,
  ) -> Result<Question, QuizError> {
    use QuestionCategory::*;
    let q = match category {
      Capital => self.city_role(rng, category, target, pool, locale, Field::Capital),
      BiggestCity => self.city_role(rng, category, target, pool, locale, Field::BigCity),
      CityInCountry => self.city_in_country(rng, target, pool, locale),
      Language => self.language(rng, target, pool, locale),
      LanguageCount => self.language_count(rng, target, locale),
      Continent => self.continent(rng, target, pool, locale),
      Area => self.area(rng, target, pool, locale),
      Population => self.population(rng, target, pool, locale),
      Flag => self.flag(rng, target, pool, locale),
      Landmark => {
        if target.landmarks.is_empty() {
          return Err(missing(target, category));
        }
        let idx = rng.gen_range(0..target.landmarks.len());
        self.generate_landmark(rng, target, idx, pool, locale)
      }
    }?;
    debug!(target: "quiz", ?category, country = %target.name, options = q.options.len(), "Question generated");
    Ok(q)
  }

  fn option_count_for(&self, category: QuestionCategory) -> usize {
    if category.is_yes_no() { 2 } else { self.option_count }
  }

  fn finish(
    &self,
    category: QuestionCategory,
    prompt: String,
    assembled: AssembledOptions,
    media: Option<Media>,
  ) -> Question {
    let correct_answer = assembled.options[assembled.correct_index].clone();
    Question {
      category,
      prompt,
      options: assembled.options,
      hidden: assembled.hidden,
      correct_index: assembled.correct_index,
      correct_answer,
      media,
    }
  }

  fn country_prompt(&self, tpl: &str, target: &Country, locale: &str) -> String {
    fill_template(tpl, &[("country", target.display_name(locale))])
  }

  /// Capital / biggest city: the other cities of the same country are the preferred
  /// confusers, then the same role in similar countries.
  fn city_role<R: Rng + ?Sized>(
    &self,
    rng: &mut R,
    category: QuestionCategory,
    target: &Country,
    pool: &[Country],
    locale: &str,
    role: Field,
  ) -> Result<Question, QuizError> {
    let correct = target.display(role, locale).ok_or_else(|| missing(target, category))?;
    let alternates: Vec<&str> = [Field::Capital, Field::BigCity, Field::SecondCity, Field::ThirdCity]
      .into_iter()
      .filter(|f| *f != role)
      .filter_map(|f| target.display(f, locale))
      .collect();
    let (similar, rest) = split_pool(rng, target, pool);
    let assembled = build_options(
      rng,
      correct,
      &alternates,
      &field_values(&similar, role, locale),
      &field_values(&rest, role, locale),
      self.option_count_for(category),
      &self.odds,
      &self.prompts.unknown,
    )?;
    let tpl = if role == Field::Capital { &self.prompts.capital } else { &self.prompts.biggest_city };
    Ok(self.finish(category, self.country_prompt(tpl, target, locale), assembled, None))
  }

  /// Any one of the target's cities is correct, so none of them may appear as a
  /// distractor.
  fn city_in_country<R: Rng + ?Sized>(&self, rng: &mut R, target: &Country, pool: &[Country], locale: &str) -> Result<Question, QuizError> {
    let category = QuestionCategory::CityInCountry;
    let own = target.display_cities(locale);
    let correct = *own.choose(rng).ok_or_else(|| missing(target, category))?;
    let own_keys: Vec<String> = own.iter().map(|c| option_key(c)).collect();
    let cities_of = |countries: &[&'_ Country]| -> Vec<String> {
      countries
        .iter()
        .flat_map(|c| c.display_cities(locale))
        .filter(|c| !own_keys.contains(&option_key(c)))
        .map(str::to_string)
        .collect()
    };

    let (similar, rest) = split_pool(rng, target, pool);
    let similar_cities = cities_of(&similar);
    let rest_cities = cities_of(&rest);
    let assembled = build_options(
      rng,
      correct,
      &[],
      &similar_cities.iter().map(String::as_str).collect::<Vec<_>>(),
      &rest_cities.iter().map(String::as_str).collect::<Vec<_>>(),
      self.option_count_for(category),
      &NO_ALTERNATES,
      &self.prompts.unknown,
    )?;
    Ok(self.finish(category, self.country_prompt(&self.prompts.city_in_country, target, locale), assembled, None))
  }

  /// A language spoken in another country is only a valid distractor if the target
  /// does not speak it too, compared on both canonical and displayed names.
  fn language<R: Rng + ?Sized>(&self, rng: &mut R, target: &Country, pool: &[Country], locale: &str) -> Result<Question, QuizError> {
    let category = QuestionCategory::Language;
    let own = target.language_pairs(locale);
    let (_, correct) = *own.choose(rng).ok_or_else(|| missing(target, category))?;
    let mut spoken: Vec<String> = Vec::with_capacity(own.len() * 2);
    for (canonical, shown) in &own {
      spoken.push(option_key(canonical));
      spoken.push(option_key(shown));
    }
    let foreign = |countries: &[&'_ Country]| -> Vec<String> {
      countries
        .iter()
        .flat_map(|c| c.language_pairs(locale))
        .filter(|(canonical, shown)| !spoken.contains(&option_key(canonical)) && !spoken.contains(&option_key(shown)))
        .map(|(_, shown)| shown.to_string())
        .collect()
    };

    let (similar, rest) = split_pool(rng, target, pool);
    let similar_langs = foreign(&similar);
    let rest_langs = foreign(&rest);
    let assembled = build_options(
      rng,
      correct,
      &[],
      &similar_langs.iter().map(String::as_str).collect::<Vec<_>>(),
      &rest_langs.iter().map(String::as_str).collect::<Vec<_>>(),
      self.option_count_for(category),
      &NO_ALTERNATES,
      &self.prompts.unknown,
    )?;
    Ok(self.finish(category, self.country_prompt(&self.prompts.language, target, locale), assembled, None))
  }

  /// Distractors are neighbouring counts (n-1, n+1, n+2, n-2), positive only; further
  /// counts above n are synthesized until there are enough.
  fn language_count<R: Rng + ?Sized>(&self, rng: &mut R, target: &Country, locale: &str) -> Result<Question, QuizError> {
    let category = QuestionCategory::LanguageCount;
    let n = target.display_languages(locale).len();
    if n == 0 {
      return Err(missing(target, category));
    }
    let needed = self.option_count_for(category).saturating_sub(1);
    let mut counts: Vec<usize> = Vec::with_capacity(needed + 2);
    let near = [n.checked_sub(1), Some(n + 1), Some(n + 2), n.checked_sub(2)];
    for c in near.into_iter().flatten().filter(|c| *c >= 1) {
      if !counts.contains(&c) {
        counts.push(c);
      }
    }
    let mut next = n + 3;
    while counts.len() < needed {
      counts.push(next);
      next += 1;
    }
    let counts: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
    let assembled = build_options(
      rng,
      &n.to_string(),
      &[],
      &counts.iter().map(String::as_str).collect::<Vec<_>>(),
      &[],
      self.option_count_for(category),
      &NO_ALTERNATES,
      &self.prompts.unknown,
    )?;
    Ok(self.finish(category, self.country_prompt(&self.prompts.language_count, target, locale), assembled, None))
  }

  fn continent<R: Rng + ?Sized>(&self, rng: &mut R, target: &Country, pool: &[Country], locale: &str) -> Result<Question, QuizError> {
    let category = QuestionCategory::Continent;
    let correct = target.display(Field::Continent, locale).ok_or_else(|| missing(target, category))?;
    // Similar countries mostly share the continent, so draw from everyone. A scoped
    // pool often spans a single continent; the wider pool fills the gap.
    let in_scope = other_continents(target, pool);
    let beyond = other_continents(target, self.wider);
    let assembled = build_options(
      rng,
      correct,
      &[],
      &field_values(&in_scope, Field::Continent, locale),
      &field_values(&beyond, Field::Continent, locale),
      self.option_count_for(category),
      &NO_ALTERNATES,
      &self.prompts.unknown,
    )?;
    Ok(self.finish(category, self.country_prompt(&self.prompts.continent, target, locale), assembled, None))
  }

  /// The target plus similar countries are shown; the correct answer is whichever of
  /// the shown countries is largest.
  fn area<R: Rng + ?Sized>(&self, rng: &mut R, target: &Country, pool: &[Country], locale: &str) -> Result<Question, QuizError> {
    let category = QuestionCategory::Area;
    let (similar, rest) = split_pool(rng, target, pool);
    let mut shown: Vec<&Country> = vec![target];
    for c in similar.into_iter().chain(rest) {
      if shown.len() >= self.option_count_for(category) {
        break;
      }
      let key = option_key(c.display_name(locale));
      if !shown.iter().any(|s| option_key(s.display_name(locale)) == key) {
        shown.push(c);
      }
    }
    let largest = shown.iter().copied().max_by_key(|c| c.area).ok_or_else(|| missing(target, category))?;
    let others: Vec<&Country> = shown.iter().copied().filter(|c| c.id != largest.id).collect();
    let assembled = build_options(
      rng,
      largest.display_name(locale),
      &[],
      &names(&others, locale),
      &[],
      self.option_count_for(category),
      &NO_ALTERNATES,
      &self.prompts.unknown,
    )?;
    Ok(self.finish(category, self.prompts.area.clone(), assembled, None))
  }

  /// Yes/no: does the target have more inhabitants than one other pool country?
  fn population<R: Rng + ?Sized>(&self, rng: &mut R, target: &Country, pool: &[Country], locale: &str) -> Result<Question, QuizError> {
    let category = QuestionCategory::Population;
    let (similar, rest) = split_pool(rng, target, pool);
    let other = match similar.first() {
      Some(c) => *c,
      None => *rest.choose(rng).ok_or_else(|| missing(target, category))?,
    };
    let (correct, wrong) = if target.population > other.population {
      (&self.prompts.yes, &self.prompts.no)
    } else {
      (&self.prompts.no, &self.prompts.yes)
    };
    let assembled = build_options(rng, correct, &[], &[wrong.as_str()], &[], 2, &NO_ALTERNATES, &self.prompts.unknown)?;
    let prompt = fill_template(
      &self.prompts.population,
      &[("country", target.display_name(locale)), ("other", other.display_name(locale))],
    );
    Ok(self.finish(category, prompt, assembled, None))
  }

  /// Country names; look-alike flags are more likely to be drawn as distractors.
  fn flag<R: Rng + ?Sized>(&self, rng: &mut R, target: &Country, pool: &[Country], locale: &str) -> Result<Question, QuizError> {
    let category = QuestionCategory::Flag;
    let needed = self.option_count_for(category).saturating_sub(1);
    let look_alikes = weighted_by_flag(rng, target, pool, needed);
    if let Some(best) = look_alikes.iter().map(|c| flag_similarity(target, c)).max() {
      debug!(target: "quiz", country = %target.name, best, level = ?SimilarityLevel::from_score(best), "Flag look-alikes drawn");
    }
    let everyone: Vec<&Country> = pool.iter().filter(|c| c.id != target.id).collect();
    let assembled = build_options(
      rng,
      target.display_name(locale),
      &[],
      &names(&look_alikes, locale),
      &names(&everyone, locale),
      self.option_count_for(category),
      &NO_ALTERNATES,
      &self.prompts.unknown,
    )?;
    let media = Media { kind: MediaKind::Flag, path: target.flag_asset() };
    Ok(self.finish(category, self.prompts.flag.clone(), assembled, Some(media)))
  }

  /// Question about one specific landmark of `target`.
  pub fn generate_landmark<R: Rng + ?Sized>(
    &self,
    rng: &mut R,
    target: &Country,
    landmark_index: usize,
    pool: &[Country],
    locale: &str,
  ) -> Result<Question, QuizError> {
    let category = QuestionCategory::Landmark;
    let landmark = target.landmarks.get(landmark_index).ok_or_else(|| missing(target, category))?;
    let (similar, rest) = split_pool(rng, target, pool);
    let assembled = build_options(
      rng,
      target.display_name(locale),
      &[],
      &names(&similar, locale),
      &names(&rest, locale),
      self.option_count_for(category),
      &NO_ALTERNATES,
      &self.prompts.unknown,
    )?;
    let prompt = fill_template(&self.prompts.landmark, &[("landmark", landmark.display_name())]);
    let media = Media { kind: MediaKind::Landmark, path: landmark.image.clone() };
    Ok(self.finish(category, prompt, assembled, Some(media)))
  }
}
