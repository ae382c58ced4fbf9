//! Bundled reference dataset: a small set of countries plus translations, so the
//! quiz is playable without an external dataset file.

use std::collections::HashMap;

use crate::domain::{Country, Landmark, Translation};
use crate::store::{Dataset, TranslationRecord};

#[allow(clippy::too_many_arguments)]
fn country(
  id: u32,
  name: &str,
  code: &str,
  cities: [&str; 4],
  continent: &str,
  region: &str,
  category: &str,
  languages: &[&str],
  currency: &str,
  population: u64,
  area: u64,
  difficulty: u8,
  flag_colors: &[&str],
  flag_emblems: &[&str],
  landmarks: &[(&str, &str)],
) -> Country {
  let opt = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
  Country {
    id,
    name: name.into(),
    code: code.into(),
    capital: cities[0].into(),
    big_city: cities[1].into(),
    second_city: opt(cities[2]),
    third_city: opt(cities[3]),
    continent: continent.into(),
    region: region.into(),
    category: category.into(),
    languages: languages.iter().map(|s| s.to_string()).collect(),
    currency: currency.into(),
    population,
    area,
    difficulty,
    flag_colors: flag_colors.iter().map(|s| s.to_string()).collect(),
    flag_emblems: flag_emblems.iter().map(|s| s.to_string()).collect(),
    landmarks: landmarks
      .iter()
      .map(|(name, image)| Landmark { name: name.to_string(), translated_name: None, image: image.to_string() })
      .collect(),
    translation: None,
  }
}

/// The built-in country table.
pub fn seed_countries() -> Vec<Country> {
  vec![
    country(1, "France", "FR", ["Paris", "Paris", "Marseille", "Lyon"], "Europe", "Western Europe", "europe_major",
      &["French"], "Euro", 65_273_511, 551_695, 1, &["blue", "white", "red"], &[],
      &[("Eiffel Tower", "landmark/france/eiffel_tower.jpg"), ("Mont Saint-Michel", "landmark/france/mont_saint_michel.jpg")]),
    country(2, "Germany", "DE", ["Berlin", "Berlin", "Hamburg", "Munich"], "Europe", "Western Europe", "europe_major",
      &["German"], "Euro", 83_783_942, 357_022, 1, &["black", "red", "yellow"], &[], &[]),
    country(3, "Italy", "IT", ["Rome", "Rome", "Milan", "Naples"], "Europe", "Southern Europe", "europe_major",
      &["Italian"], "Euro", 60_461_826, 301_340, 1, &["green", "white", "red"], &[],
      &[("Colosseum", "landmark/italy/colosseum.jpg"), ("Leaning Tower of Pisa", "landmark/italy/pisa.jpg")]),
    country(4, "Spain", "ES", ["Madrid", "Madrid", "Barcelona", "Valencia"], "Europe", "Southern Europe", "europe_major",
      &["Spanish"], "Euro", 46_754_778, 505_990, 1, &["red", "yellow"], &["coat_of_arms"],
      &[("Sagrada Família", "landmark/spain/sagrada_familia.jpg")]),
    country(5, "United Kingdom", "GB", ["London", "London", "Birmingham", "Manchester"], "Europe", "Northern Europe", "europe_major",
      &["English"], "Pound Sterling", 67_886_011, 242_495, 1, &["red", "white", "blue"], &["cross"],
      &[("Big Ben", "landmark/united_kingdom/big_ben.jpg")]),
    country(6, "Switzerland", "CH", ["Bern", "Zurich", "Geneva", "Basel"], "Europe", "Western Europe", "europe_small",
      &["German", "French", "Italian", "Romansh"], "Swiss Franc", 8_654_622, 41_285, 2, &["red", "white"], &["cross"],
      &[("Matterhorn", "landmark/switzerland/matterhorn.jpg")]),
    country(7, "Belgium", "BE", ["Brussels", "Antwerp", "Ghent", "Charleroi"], "Europe", "Western Europe", "europe_small",
      &["Dutch", "French", "German"], "Euro", 11_589_623, 30_528, 2, &["black", "yellow", "red"], &[], &[]),
    country(8, "Canada", "CA", ["Ottawa", "Toronto", "Montreal", "Vancouver"], "Americas", "Northern America", "americas_north",
      &["English", "French"], "Canadian Dollar", 37_742_154, 9_984_670, 1, &["red", "white"], &["maple_leaf"],
      &[("CN Tower", "landmark/canada/cn_tower.jpg")]),
    country(9, "United States", "US", ["Washington D.C.", "New York", "Los Angeles", "Chicago"], "Americas", "Northern America", "americas_north",
      &["English"], "US Dollar", 331_002_651, 9_833_517, 1, &["red", "white", "blue"], &["stars", "stripes"],
      &[("Statue of Liberty", "landmark/united_states/statue_of_liberty.jpg"), ("Golden Gate Bridge", "landmark/united_states/golden_gate.jpg")]),
    country(10, "Mexico", "MX", ["Mexico City", "Mexico City", "Guadalajara", "Monterrey"], "Americas", "Central America", "americas_north",
      &["Spanish"], "Mexican Peso", 128_932_753, 1_964_375, 1, &["green", "white", "red"], &["eagle", "coat_of_arms"],
      &[("Chichen Itza", "landmark/mexico/chichen_itza.jpg")]),
    country(11, "Brazil", "BR", ["Brasília", "São Paulo", "Rio de Janeiro", "Salvador"], "Americas", "South America", "americas_south",
      &["Portuguese"], "Brazilian Real", 212_559_417, 8_515_767, 1, &["green", "yellow", "blue", "white"], &["stars", "globe"],
      &[("Christ the Redeemer", "landmark/brazil/christ_the_redeemer.jpg")]),
    country(12, "Argentina", "AR", ["Buenos Aires", "Buenos Aires", "Córdoba", "Rosario"], "Americas", "South America", "americas_south",
      &["Spanish"], "Argentine Peso", 45_195_774, 2_780_400, 2, &["blue", "white", "yellow"], &["sun"], &[]),
    country(13, "China", "CN", ["Beijing", "Shanghai", "Beijing", "Guangzhou"], "Asia", "Eastern Asia", "asia_major",
      &["Chinese"], "Yuan", 1_439_323_776, 9_596_961, 1, &["red", "yellow"], &["stars"],
      &[("Great Wall of China", "landmark/china/great_wall.jpg")]),
    country(14, "Japan", "JP", ["Tokyo", "Tokyo", "Yokohama", "Osaka"], "Asia", "Eastern Asia", "asia_major",
      &["Japanese"], "Yen", 126_476_461, 377_975, 1, &["white", "red"], &["circle"],
      &[("Mount Fuji", "landmark/japan/mount_fuji.jpg")]),
    country(15, "India", "IN", ["New Delhi", "Mumbai", "Delhi", "Bangalore"], "Asia", "Southern Asia", "asia_major",
      &["Hindi", "English"], "Indian Rupee", 1_380_004_385, 3_287_263, 1, &["orange", "white", "green", "blue"], &["wheel"],
      &[("Taj Mahal", "landmark/india/taj_mahal.jpg")]),
    country(16, "Egypt", "EG", ["Cairo", "Cairo", "Alexandria", "Giza"], "Africa", "Northern Africa", "africa",
      &["Arabic"], "Egyptian Pound", 102_334_404, 1_002_450, 1, &["red", "white", "black"], &["eagle"],
      &[("Pyramids of Giza", "landmark/egypt/pyramids.jpg")]),
    country(17, "Nigeria", "NG", ["Abuja", "Lagos", "Kano", "Ibadan"], "Africa", "Western Africa", "africa",
      &["English"], "Naira", 206_139_589, 923_768, 2, &["green", "white"], &[], &[]),
    country(18, "South Africa", "ZA", ["Pretoria", "Johannesburg", "Cape Town", "Durban"], "Africa", "Southern Africa", "africa",
      &["Zulu", "Xhosa", "Afrikaans", "English"], "Rand", 59_308_690, 1_221_037, 2,
      &["red", "blue", "green", "black", "yellow", "white"], &[],
      &[("Table Mountain", "landmark/south_africa/table_mountain.jpg")]),
    country(19, "Australia", "AU", ["Canberra", "Sydney", "Melbourne", "Brisbane"], "Oceania", "Australia and New Zealand", "oceania",
      &["English"], "Australian Dollar", 25_499_884, 7_692_024, 1, &["blue", "white", "red"], &["stars", "cross"],
      &[("Sydney Opera House", "landmark/australia/opera_house.jpg")]),
  ]
}

fn tr(
  country: &str,
  locale: &str,
  name: &str,
  capital: &str,
  continent: &str,
  languages: &[&str],
  landmarks: &[(&str, &str)],
) -> TranslationRecord {
  let opt = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
  TranslationRecord {
    country: country.into(),
    translation: Translation {
      locale: locale.into(),
      name: opt(name),
      capital: opt(capital),
      continent: opt(continent),
      languages: languages.iter().map(|s| s.to_string()).collect(),
      ..Default::default()
    },
    landmarks: landmarks.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect::<HashMap<_, _>>(),
  }
}

/// Built-in translations. Coverage is deliberately uneven; missing fields fall
/// back to the canonical text.
pub fn seed_translations() -> Vec<TranslationRecord> {
  vec![
    tr("France", "fr", "France", "Paris", "Europe", &["français"], &[("Eiffel Tower", "Tour Eiffel")]),
    tr("Germany", "fr", "Allemagne", "Berlin", "Europe", &["allemand"], &[]),
    tr("Italy", "fr", "Italie", "Rome", "Europe", &["italien"], &[("Colosseum", "Colisée"), ("Leaning Tower of Pisa", "Tour de Pise")]),
    tr("Spain", "fr", "Espagne", "Madrid", "Europe", &["espagnol"], &[]),
    tr("United Kingdom", "fr", "Royaume-Uni", "Londres", "Europe", &["anglais"], &[]),
    tr("Switzerland", "fr", "Suisse", "Berne", "Europe", &["allemand", "français", "italien", "romanche"], &[("Matterhorn", "Cervin")]),
    tr("Belgium", "fr", "Belgique", "Bruxelles", "Europe", &["néerlandais", "français", "allemand"], &[]),
    tr("Canada", "fr", "Canada", "Ottawa", "Amériques", &["anglais", "français"], &[]),
    tr("United States", "fr", "États-Unis", "Washington", "Amériques", &["anglais"], &[("Statue of Liberty", "Statue de la Liberté")]),
    tr("Mexico", "fr", "Mexique", "Mexico", "Amériques", &["espagnol"], &[]),
    tr("Brazil", "fr", "Brésil", "Brasília", "Amériques", &["portugais"], &[("Christ the Redeemer", "Christ Rédempteur")]),
    tr("Argentina", "fr", "Argentine", "Buenos Aires", "Amériques", &["espagnol"], &[]),
    tr("China", "fr", "Chine", "Pékin", "Asie", &["chinois"], &[("Great Wall of China", "Grande Muraille de Chine")]),
    tr("Japan", "fr", "Japon", "Tokyo", "Asie", &["japonais"], &[]),
    tr("India", "fr", "Inde", "New Delhi", "Asie", &["hindi", "anglais"], &[]),
    tr("Egypt", "fr", "Égypte", "Le Caire", "Afrique", &["arabe"], &[("Pyramids of Giza", "Pyramides de Gizeh")]),
    tr("Nigeria", "fr", "Nigeria", "Abuja", "Afrique", &["anglais"], &[]),
    tr("South Africa", "fr", "Afrique du Sud", "Pretoria", "Afrique", &[], &[]),
    tr("Australia", "fr", "Australie", "Canberra", "Océanie", &["anglais"], &[]),
    tr("France", "es", "Francia", "París", "Europa", &["francés"], &[("Eiffel Tower", "Torre Eiffel")]),
    tr("Germany", "es", "Alemania", "Berlín", "Europa", &["alemán"], &[]),
    tr("Spain", "es", "España", "Madrid", "Europa", &["español"], &[]),
    tr("Mexico", "es", "México", "Ciudad de México", "América", &["español"], &[]),
    tr("Argentina", "es", "Argentina", "Buenos Aires", "América", &["español"], &[]),
    tr("Brazil", "es", "Brasil", "Brasilia", "América", &["portugués"], &[]),
    tr("Japan", "es", "Japón", "Tokio", "Asia", &[], &[]),
    tr("France", "de", "Frankreich", "Paris", "Europa", &["Französisch"], &[]),
    tr("Germany", "de", "Deutschland", "Berlin", "Europa", &["Deutsch"], &[]),
    tr("Switzerland", "de", "Schweiz", "Bern", "Europa", &["Deutsch", "Französisch", "Italienisch", "Rätoromanisch"], &[]),
    tr("Italy", "de", "Italien", "Rom", "Europa", &["Italienisch"], &[("Colosseum", "Kolosseum")]),
    tr("United States", "de", "Vereinigte Staaten", "", "Amerika", &[], &[]),
    tr("Japan", "ja", "日本", "東京", "アジア", &["日本語"], &[("Mount Fuji", "富士山")]),
    tr("China", "ja", "中国", "北京", "アジア", &["中国語"], &[("Great Wall of China", "万里の長城")]),
    tr("France", "ja", "フランス", "パリ", "ヨーロッパ", &["フランス語"], &[("Eiffel Tower", "エッフェル塔")]),
    tr("United States", "ja", "アメリカ合衆国", "ワシントンD.C.", "", &[], &[]),
  ]
}

pub fn seed_dataset() -> Dataset {
  Dataset { countries: seed_countries(), translations: seed_translations() }
}
