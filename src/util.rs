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

/// Strip markdown code-fence markers around a model response.
/// Handles an optional language tag after the opening fence (```json, ```JSON, ...).
/// Returns the inner text trimmed; input without fences passes through unchanged.
pub fn strip_code_fences(raw: &str) -> &str {
  let mut s = raw.trim();
  if let Some(rest) = s.strip_prefix("```") {
    s = rest
      .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
      .trim_start();
  }
  if let Some(rest) = s.strip_suffix("```") {
    s = rest.trim_end();
  }
  s.trim()
}

/// True if the string is empty after trimming whitespace.
pub fn is_blank(s: &str) -> bool {
  s.trim().is_empty()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  // Back the cut up to a char boundary; payloads carry diacritics.
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_every_occurrence() {
    let out = fill_template("{a} and {a} but not {b}", &[("a", "x")]);
    assert_eq!(out, "x and x but not {b}");
  }

  #[test]
  fn fenced_json_with_language_tag_strips_to_bare_payload() {
    let bare = r#"{"title": "Speța"}"#;
    let fenced = format!("```json\n{}\n```", bare);
    assert_eq!(strip_code_fences(&fenced), bare);
  }

  #[test]
  fn fenced_json_without_tag_strips_to_bare_payload() {
    let bare = r#"{"ok": true}"#;
    let fenced = format!("```\n{}\n```", bare);
    assert_eq!(strip_code_fences(&fenced), bare);
  }

  #[test]
  fn unfenced_text_passes_through() {
    assert_eq!(strip_code_fences("  {\"x\": 1}  "), "{\"x\": 1}");
  }

  #[test]
  fn blank_detection_ignores_whitespace() {
    assert!(is_blank("   \n\t "));
    assert!(!is_blank(" x "));
  }

  #[test]
  fn truncation_never_splits_a_multibyte_char() {
    let s = "șțăîâ".repeat(40);
    let out = trunc_for_log(&s, 7);
    assert!(out.starts_with("șță"));
    assert!(out.contains("bytes total"));
    assert_eq!(trunc_for_log("scurt", 300), "scurt");
  }
}
