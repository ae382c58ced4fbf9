//! Similarity heuristics used to pick "hard" wrong answers.
//!
//! Two flavours:
//! - tiered ranking (category > region > continent; no match means not similar at all)
//! - a numeric flag score (color/emblem overlap plus geography) used as a sampling weight

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Country;

const COLOR_POINTS: u32 = 20;
const EMBLEM_POINTS: u32 = 30;
const CONTINENT_POINTS: u32 = 15;
const REGION_POINTS: u32 = 20;
const CATEGORY_POINTS: u32 = 25;

pub const HIGH_THRESHOLD: u32 = 70;
pub const MEDIUM_THRESHOLD: u32 = 40;

/// Why a candidate counts as similar. Ordered from strongest to weakest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimilarityTier {
  Category = 0,
  Region = 1,
  Continent = 2,
}

pub fn similarity_tier(target: &Country, candidate: &Country) -> Option<SimilarityTier> {
  if candidate.id == target.id {
    None
  } else if candidate.category == target.category {
    Some(SimilarityTier::Category)
  } else if candidate.region == target.region {
    Some(SimilarityTier::Region)
  } else if candidate.continent == target.continent {
    Some(SimilarityTier::Continent)
  } else {
    None
  }
}

/// Similar candidates, strongest tier first. Order inside a tier comes from `rng`,
/// so a fixed seed gives a fixed ranking.
pub fn rank_similar<'a, R: Rng + ?Sized>(
  rng: &mut R,
  target: &Country,
  candidates: &'a [Country],
) -> Vec<&'a Country> {
  let mut tiers: [Vec<&'a Country>; 3] = Default::default();
  for c in candidates {
    if let Some(tier) = similarity_tier(target, c) {
      tiers[tier as usize].push(c);
    }
  }
  for tier in tiers.iter_mut() {
    tier.shuffle(rng);
  }
  tiers.into_iter().flatten().collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimilarityLevel {
  High,
  Medium,
  Low,
}

impl SimilarityLevel {
  pub fn from_score(score: u32) -> Self {
    if score >= HIGH_THRESHOLD {
      SimilarityLevel::High
    } else if score >= MEDIUM_THRESHOLD {
      SimilarityLevel::Medium
    } else {
      SimilarityLevel::Low
    }
  }
}

fn overlap(a: &[String], b: &[String]) -> u32 {
  let mut seen: Vec<String> = Vec::new();
  for tag in a {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() || seen.contains(&tag) {
      continue;
    }
    if b.iter().any(|o| o.trim().to_lowercase() == tag) {
      seen.push(tag);
    }
  }
  seen.len() as u32
}

/// Flag look-alike score between two countries.
pub fn flag_similarity(target: &Country, candidate: &Country) -> u32 {
  let mut score = overlap(&target.flag_colors, &candidate.flag_colors) * COLOR_POINTS
    + overlap(&target.flag_emblems, &candidate.flag_emblems) * EMBLEM_POINTS;
  if candidate.continent == target.continent { score += CONTINENT_POINTS; }
  if candidate.region == target.region { score += REGION_POINTS; }
  if candidate.category == target.category { score += CATEGORY_POINTS; }
  score
}

/// Draw up to `amount` distinct candidates (never the target), weighted by flag score.
/// Every candidate keeps a non-zero chance.
pub fn weighted_by_flag<'a, R: Rng + ?Sized>(
  rng: &mut R,
  target: &Country,
  candidates: &'a [Country],
  amount: usize,
) -> Vec<&'a Country> {
  let pool: Vec<&'a Country> = candidates.iter().filter(|c| c.id != target.id).collect();
  let amount = amount.min(pool.len());
  match pool.choose_multiple_weighted(rng, amount, |c| f64::from(flag_similarity(target, c) + 1)) {
    Ok(picked) => picked.copied().collect(),
    Err(_) => {
      let mut fallback = pool;
      fallback.shuffle(rng);
      fallback.truncate(amount);
      fallback
    }
  }
}
