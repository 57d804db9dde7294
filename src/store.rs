//! Write access to the backing relational store over its REST interface
//! (PostgREST dialect: one resource per table, `Prefer` headers, `?col=eq.`
//! filters). The saga talks to the `CaseStore` trait, never to the wire.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::util::trunc_for_log;

const CASES_TABLE: &str = "cases";
const ARTICLES_TABLE: &str = "case_articles";
const STEPS_TABLE: &str = "case_analysis_steps";
const HINTS_TABLE: &str = "case_hints";

/// Low-level store failures. The saga wraps these into step-specific
/// errors; only `is_unique_violation` is inspected directly.
#[derive(Error, Debug)]
pub enum StoreError {
  #[error("request failed: {0}")]
  Transport(String),
  #[error("store rejected the request (HTTP {status}): {message}")]
  Rejected { status: u16, code: Option<String>, message: String },
  #[error("could not decode store response: {0}")]
  Decode(String),
}

impl StoreError {
  /// True for a Postgres unique violation (SQLSTATE 23505) on the named
  /// constraint.
  pub fn is_unique_violation(&self, constraint: &str) -> bool {
    match self {
      StoreError::Rejected { code: Some(code), message, .. } => {
        code == "23505" && message.contains(constraint)
      }
      _ => false,
    }
  }
}

// --- Row DTOs (serialized field names match store columns) ---

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewCaseRow {
  pub case_code: String,
  pub title: String,
  pub level: String,
  pub week_number: u32,
  pub legal_problem: String,
  pub case_description: String,
  pub question: String,
  pub category: Option<String>,
  pub subcategory: Option<String>,
  pub verified: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewArticleRow {
  pub case_id: Uuid,
  pub article_number: String,
  pub article_reference: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewStepRow {
  pub case_id: Uuid,
  pub step_number: u32,
  pub step_description: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewHintRow {
  pub case_id: Uuid,
  pub hint_number: u32,
  pub hint_text: String,
}

/// Write-side operations the persistence saga needs. One implementation
/// speaks the REST dialect below; tests substitute their own.
#[async_trait]
pub trait CaseStore: Send + Sync {
  /// Insert the parent row and return its generated identifier.
  async fn insert_case(&self, row: &NewCaseRow) -> Result<Uuid, StoreError>;
  async fn insert_articles(&self, rows: &[NewArticleRow]) -> Result<(), StoreError>;
  async fn insert_steps(&self, rows: &[NewStepRow]) -> Result<(), StoreError>;
  async fn insert_hints(&self, rows: &[NewHintRow]) -> Result<(), StoreError>;
  async fn delete_articles(&self, case_id: Uuid) -> Result<(), StoreError>;
  async fn delete_steps(&self, case_id: Uuid) -> Result<(), StoreError>;
  async fn delete_case(&self, case_id: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct RestStore {
  client: reqwest::Client,
  base_url: String,
  service_key: String,
}

impl RestStore {
  /// Construct the store if STORE_URL and STORE_SERVICE_KEY are both set;
  /// otherwise return None and saving stays disabled.
  pub fn from_env() -> Option<Self> {
    let base_url = std::env::var("STORE_URL").ok()?;
    let service_key = std::env::var("STORE_SERVICE_KEY").ok()?;
    let base_url = base_url.trim_end_matches('/').to_string();

    let client = reqwest::Client::new();

    Some(Self { client, base_url, service_key })
  }

  fn endpoint(&self, table: &str) -> String {
    format!("{}/rest/v1/{}", self.base_url, table)
  }

  fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    req
      .header(USER_AGENT, "speta-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("apikey", &self.service_key)
      .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
  }

  /// Bulk-insert rows without asking for the representation back.
  async fn insert_rows<T: Serialize + Sync>(
    &self,
    table: &str,
    rows: &[T],
  ) -> Result<(), StoreError> {
    let res = self
      .authed(self.client.post(self.endpoint(table)))
      .header("Prefer", "return=minimal")
      .json(rows)
      .send()
      .await
      .map_err(|e| StoreError::Transport(e.to_string()))?;

    let status = res.status();
    if status.is_success() {
      return Ok(());
    }
    let body = res.text().await.unwrap_or_default();
    Err(parse_error_body(status.as_u16(), &body))
  }

  async fn delete_where(&self, table: &str, filter: &str) -> Result<(), StoreError> {
    let url = format!("{}?{}", self.endpoint(table), filter);
    let res = self
      .authed(self.client.delete(&url))
      .header("Prefer", "return=minimal")
      .send()
      .await
      .map_err(|e| StoreError::Transport(e.to_string()))?;

    let status = res.status();
    if status.is_success() {
      return Ok(());
    }
    let body = res.text().await.unwrap_or_default();
    Err(parse_error_body(status.as_u16(), &body))
  }
}

#[async_trait]
impl CaseStore for RestStore {
  #[instrument(level = "info", skip(self, row), fields(table = CASES_TABLE, case_code = %row.case_code))]
  async fn insert_case(&self, row: &NewCaseRow) -> Result<Uuid, StoreError> {
    let res = self
      .authed(self.client.post(self.endpoint(CASES_TABLE)))
      .query(&[("select", "id")])
      .header("Prefer", "return=representation")
      .json(row)
      .send()
      .await
      .map_err(|e| StoreError::Transport(e.to_string()))?;

    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    if !status.is_success() {
      return Err(parse_error_body(status.as_u16(), &body));
    }
    decode_inserted_id(&body)
  }

  #[instrument(level = "info", skip(self, rows), fields(table = ARTICLES_TABLE, rows = rows.len()))]
  async fn insert_articles(&self, rows: &[NewArticleRow]) -> Result<(), StoreError> {
    self.insert_rows(ARTICLES_TABLE, rows).await
  }

  #[instrument(level = "info", skip(self, rows), fields(table = STEPS_TABLE, rows = rows.len()))]
  async fn insert_steps(&self, rows: &[NewStepRow]) -> Result<(), StoreError> {
    self.insert_rows(STEPS_TABLE, rows).await
  }

  #[instrument(level = "info", skip(self, rows), fields(table = HINTS_TABLE, rows = rows.len()))]
  async fn insert_hints(&self, rows: &[NewHintRow]) -> Result<(), StoreError> {
    self.insert_rows(HINTS_TABLE, rows).await
  }

  #[instrument(level = "info", skip(self), fields(table = ARTICLES_TABLE, case_id = %case_id))]
  async fn delete_articles(&self, case_id: Uuid) -> Result<(), StoreError> {
    self.delete_where(ARTICLES_TABLE, &format!("case_id=eq.{case_id}")).await
  }

  #[instrument(level = "info", skip(self), fields(table = STEPS_TABLE, case_id = %case_id))]
  async fn delete_steps(&self, case_id: Uuid) -> Result<(), StoreError> {
    self.delete_where(STEPS_TABLE, &format!("case_id=eq.{case_id}")).await
  }

  #[instrument(level = "info", skip(self), fields(table = CASES_TABLE, case_id = %case_id))]
  async fn delete_case(&self, case_id: Uuid) -> Result<(), StoreError> {
    self.delete_where(CASES_TABLE, &format!("id=eq.{case_id}")).await
  }
}

/// Map a non-2xx response body to a `Rejected` error, picking out the
/// Postgres error code and message when the body is the usual JSON shape.
fn parse_error_body(status: u16, body: &str) -> StoreError {
  #[derive(Deserialize)]
  struct PgRestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
  }

  let (code, message) = match serde_json::from_str::<PgRestError>(body) {
    Ok(e) => {
      let message = e.message.unwrap_or_else(|| trunc_for_log(body, 300));
      (e.code, message)
    }
    Err(_) => (None, trunc_for_log(body, 300)),
  };
  StoreError::Rejected { status, code, message }
}

/// Pull the generated id out of a `return=representation` insert response
/// (an array with exactly one row).
fn decode_inserted_id(body: &str) -> Result<Uuid, StoreError> {
  #[derive(Deserialize)]
  struct InsertedRow {
    id: Uuid,
  }

  let rows: Vec<InsertedRow> =
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))?;
  rows
    .into_iter()
    .next()
    .map(|r| r.id)
    .ok_or_else(|| StoreError::Decode("empty representation from insert".into()))
}
