//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Comparison key for answer options: trimmed, inner whitespace collapsed, lowercased.
/// Two options with the same key are considered the same answer.
pub fn option_key(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_replaces_every_key() {
    let out = fill_template("Does {country} outnumber {other}? {country}!", &[("country", "Chile"), ("other", "Peru")]);
    assert_eq!(out, "Does Chile outnumber Peru? Chile!");
  }

  #[test]
  fn option_key_folds_case_and_spacing() {
    assert_eq!(option_key("  New   York "), "new york");
    assert_eq!(option_key("Washington D.C."), option_key("washington d.c."));
  }
}
