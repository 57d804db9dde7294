//! Minimal chat-completions client for case generation.
//!
//! We only call chat.completions and always request a strict JSON object.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short to avoid PII leaks.
//! NOTE: No request timeout is set: a full case draft can legitimately take
//! over a minute on slower models, and the author explicitly waits for it.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::catalog::{self, CategoryDef};
use crate::config::Prompts;
use crate::domain::GeneratedCase;
use crate::util::{fill_template, strip_code_fences, trunc_for_log};
use crate::wizard::DraftConfiguration;

/// Failures of the generation call, surfaced to the author as retryable
/// errors. A retry is always a fresh, caller-driven invocation; nothing
/// here retries internally.
#[derive(Error, Debug)]
pub enum GenerationError {
  /// Network/HTTP failure, including non-2xx answers from the endpoint.
  #[error("Apelul către modelul generativ a eșuat: {0}")]
  Transport(String),
  /// The model answered, but the payload is not parseable JSON.
  #[error("Răspunsul modelului nu este JSON valid: {0}")]
  MalformedJson(String),
  /// Parseable JSON that does not carry a complete case.
  #[error("Răspunsul modelului este incomplet: {0}")]
  MissingFields(String),
}

#[derive(Clone)]
pub struct GenerationClient {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub fast_model: String,
  pub strong_model: String,
}

impl GenerationClient {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let fast_model =
      std::env::var("OPENAI_FAST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let strong_model =
      std::env::var("OPENAI_STRONG_MODEL").unwrap_or_else(|_| "gpt-4o".into());

    let client = reqwest::Client::new();

    Some(Self { client, api_key, base_url, fast_model, strong_model })
  }

  /// JSON-object chat completion, returning the raw assistant message.
  /// Parsing stays in the free functions below so it can be tested offline.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_json_raw(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
    max_tokens: u32,
  ) -> Result<String, GenerationError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
      max_tokens: Some(max_tokens),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "speta-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await
      .map_err(|e| GenerationError::Transport(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
      return Err(GenerationError::Transport(format!("HTTP {}: {}", status, msg)));
    }

    let body: ChatCompletionResponse = res.json().await
      .map_err(|e| GenerationError::Transport(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "model usage");
    }
    let text = body.choices.get(0)
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default();

    Ok(text)
  }

  /// Generate a complete case draft on the strong model. Exactly one
  /// external call per invocation; no caching, no deduplication.
  #[instrument(
    level = "info",
    skip(self, prompts, config),
    fields(model = %self.strong_model, domain = ?config.domain, week = config.week)
  )]
  pub async fn generate_case(
    &self,
    prompts: &Prompts,
    config: &DraftConfiguration,
  ) -> Result<GeneratedCase, GenerationError> {
    let user = render_generation_prompt(&prompts.generation_user_template, config);
    let start = std::time::Instant::now();
    let result = self
      .chat_json_raw(&self.strong_model, &prompts.generation_system, &user, 0.7, 4096)
      .await;
    let elapsed = start.elapsed();

    let raw = match result {
      Ok(raw) => {
        info!(?elapsed, raw_len = raw.len(), "Model response received successfully");
        raw
      }
      Err(e) => {
        error!(?elapsed, error = %e, "Model call failed during case generation");
        return Err(e);
      }
    };

    let case = parse_generated_case(&raw)?;
    info!(
      title_preview = %case.title.chars().take(40).collect::<String>(),
      steps = case.analysis_steps.len(),
      hints = case.hints.len(),
      "Case draft successfully generated"
    );
    Ok(case)
  }

  /// Suggest a `{category, subcategory}` pair for a freshly generated case
  /// on the fast model. Advisory only: any transport or parse problem
  /// degrades to `(None, None)` and never fails the calling flow.
  #[instrument(
    level = "info",
    skip(self, prompts, case, categories, subcategories),
    fields(model = %self.fast_model, n_categories = categories.len(), n_subcategories = subcategories.len())
  )]
  pub async fn classify(
    &self,
    prompts: &Prompts,
    case: &GeneratedCase,
    categories: &[&'static CategoryDef],
    subcategories: &[String],
  ) -> (Option<String>, Option<String>) {
    let category_lines = categories
      .iter()
      .map(|c| format!("- {}: {}", c.id, c.name))
      .collect::<Vec<_>>()
      .join("\n");
    let subcategory_lines = subcategories
      .iter()
      .map(|s| format!("- {s}"))
      .collect::<Vec<_>>()
      .join("\n");

    let user = fill_template(
      &prompts.classification_user_template,
      &[
        ("categories", &category_lines),
        ("subcategories", &subcategory_lines),
        ("title", &case.title),
        ("legal_problem", &case.legal_problem),
        ("case_description", &case.case_description),
      ],
    );

    let raw = match self
      .chat_json_raw(&self.fast_model, &prompts.classification_system, &user, 0.3, 512)
      .await
    {
      Ok(raw) => raw,
      Err(e) => {
        info!(error = %e, "Classification call failed; continuing without a suggestion");
        return (None, None);
      }
    };
    parse_classification(&raw)
  }
}

/// Render the generation user prompt from the wizard configuration.
/// Categories appear as display names, articles as formatted references;
/// an empty focus falls back to an explicit "none mentioned" line.
fn render_generation_prompt(template: &str, config: &DraftConfiguration) -> String {
  let domain_name = config.domain.map(|d| d.display_name()).unwrap_or_default();
  let categories = config
    .categories
    .iter()
    .filter_map(|id| catalog::category_name(id))
    .collect::<Vec<_>>()
    .join(", ");
  let articles = config
    .articles
    .iter()
    .map(|a| a.reference.as_str())
    .collect::<Vec<_>>()
    .join(", ");
  let week = config.week.to_string();
  let focus = if config.focus.trim().is_empty() {
    "Niciun focus specific menționat"
  } else {
    config.focus.as_str()
  };

  fill_template(
    template,
    &[
      ("domain", domain_name),
      ("categories", &categories),
      ("articles", &articles),
      ("difficulty", config.difficulty.label()),
      ("week", &week),
      ("context", &config.topic),
      ("focus", focus),
    ],
  )
}

/// Parse a model response into a `GeneratedCase`.
///
/// The payload may arrive wrapped in fenced-code-block markers (optional
/// language tag); fences are stripped first. Parsing is two-stage so the
/// failure modes stay distinguishable: not JSON at all versus JSON that
/// does not carry a complete case. A structurally complete answer with a
/// blank title, description, or question also counts as incomplete.
pub fn parse_generated_case(raw: &str) -> Result<GeneratedCase, GenerationError> {
  let cleaned = strip_code_fences(raw);
  let value: serde_json::Value = serde_json::from_str(cleaned)
    .map_err(|e| GenerationError::MalformedJson(e.to_string()))?;
  let case: GeneratedCase = serde_json::from_value(value)
    .map_err(|e| GenerationError::MissingFields(e.to_string()))?;

  for (field, text) in [
    ("title", &case.title),
    ("case_description", &case.case_description),
    ("question", &case.question),
  ] {
    if text.trim().is_empty() {
      return Err(GenerationError::MissingFields(format!("câmpul `{field}` este gol")));
    }
  }
  Ok(case)
}

/// Parse the advisory classification response. Anything unusable maps to
/// `None`; blank strings are treated as no suggestion.
pub fn parse_classification(raw: &str) -> (Option<String>, Option<String>) {
  #[derive(Deserialize)]
  struct Classification {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    subcategory: Option<String>,
  }

  let parsed = match serde_json::from_str::<Classification>(strip_code_fences(raw)) {
    Ok(c) => c,
    Err(_) => return (None, None),
  };
  let norm = |v: Option<String>| {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
  };
  (norm(parsed.category), norm(parsed.subcategory))
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from the endpoint's error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Difficulty, LegalDomain};

  const COMPLETE: &str = r#"{
    "title": "Accesiunea imobiliară artificială asupra terenului vecin",
    "legal_problem": "Cine dobândește proprietatea construcției ridicate parțial pe terenul altuia.",
    "case_description": "Ion Popescu a ridicat în 2023 un garaj care depășește cu 40 cm limita fondului său.",
    "question": "Poate Maria Ionescu cere demolarea construcției?",
    "analysis_steps": [
      {"step_number": 1, "description": "Calificarea juridică a faptelor."},
      {"step_number": 2, "description": "Analiza accesiunii imobiliare artificiale."}
    ],
    "hints": [
      {"hint_number": 1, "text": "Pornește de la regimul juridic al accesiunii."}
    ]
  }"#;

  #[test]
  fn complete_response_parses_into_a_case() {
    let case = parse_generated_case(COMPLETE).unwrap();
    assert!(case.title.starts_with("Accesiunea"));
    assert_eq!(case.analysis_steps.len(), 2);
    assert_eq!(case.analysis_steps[1].step_number, 2);
    assert_eq!(case.hints.len(), 1);
  }

  #[test]
  fn fenced_response_parses_to_the_same_case_as_bare() {
    let fenced = format!("```json\n{}\n```", COMPLETE);
    assert_eq!(
      parse_generated_case(&fenced).unwrap(),
      parse_generated_case(COMPLETE).unwrap()
    );
  }

  #[test]
  fn non_json_response_is_malformed() {
    let err = parse_generated_case("Îmi pare rău, nu pot genera acest caz.").unwrap_err();
    assert!(matches!(err, GenerationError::MalformedJson(_)));
  }

  #[test]
  fn json_without_required_keys_reports_missing_fields() {
    let err = parse_generated_case(r#"{"title": "Doar titlu"}"#).unwrap_err();
    assert!(matches!(err, GenerationError::MissingFields(_)));
  }

  #[test]
  fn blank_title_counts_as_missing_fields() {
    let raw = COMPLETE.replacen("Accesiunea imobiliară artificială asupra terenului vecin", "  ", 1);
    let err = parse_generated_case(&raw).unwrap_err();
    assert!(matches!(err, GenerationError::MissingFields(_)));
  }

  #[test]
  fn classification_parses_both_suggestions() {
    let (cat, sub) = parse_classification(
      r#"{"category": "civil_property", "subcategory": "Posesia (Acțiuni posesorii)"}"#,
    );
    assert_eq!(cat.as_deref(), Some("civil_property"));
    assert_eq!(sub.as_deref(), Some("Posesia (Acțiuni posesorii)"));
  }

  #[test]
  fn classification_degrades_on_garbage_null_and_blank() {
    assert_eq!(parse_classification("nu este json"), (None, None));
    let (cat, sub) = parse_classification(r#"{"category": "civil_property", "subcategory": null}"#);
    assert_eq!(cat.as_deref(), Some("civil_property"));
    assert_eq!(sub, None);
    let (cat, sub) = parse_classification(r#"{"category": "  ", "subcategory": ""}"#);
    assert_eq!(cat, None);
    assert_eq!(sub, None);
  }

  #[test]
  fn prompt_uses_display_names_references_and_focus_fallback() {
    let mut config = DraftConfiguration::default();
    config.select_domain(LegalDomain::Civil);
    config.set_categories(vec!["civil_property".into()]);
    config.set_articles(vec!["555".into(), "916".into()]);
    config.set_context("Un litigiu între vecini privind o construcție.".into(), String::new());
    config.set_settings(Difficulty::Mediu, 3, String::new());

    let out = render_generation_prompt(&Prompts::default().generation_user_template, &config);
    assert!(out.contains("DOMENIU: Drept Civil"));
    assert!(out.contains("Bunuri și proprietate"));
    assert!(!out.contains("civil_property"), "prompt must carry names, not ids");
    assert!(out.contains("Art. 555 C.civ., Art. 916 C.civ."));
    assert!(out.contains("NIVEL DIFICULTATE: Mediu"));
    assert!(out.contains("SĂPTĂMÂNĂ: 3"));
    assert!(out.contains("Un litigiu între vecini"));
    assert!(out.contains("Niciun focus specific menționat"));
  }

  #[test]
  fn prompt_with_empty_selections_renders_empty_lists() {
    let mut config = DraftConfiguration::default();
    config.select_domain(LegalDomain::Penal);
    let out = render_generation_prompt(&Prompts::default().generation_user_template, &config);
    assert!(out.contains("DOMENIU: Drept Penal"));
    assert!(out.contains("CATEGORII: \n"));
    assert!(out.contains("ARTICOLE: \n"));
  }
}
