//! Persistence of a finished draft across the four case tables.
//!
//! The store's REST interface has no multi-statement transaction, so the
//! commit runs as a saga: parent row first, then articles, analysis steps
//! and hints, each insert gated on the previous one. When a child insert
//! fails, every already-committed write is deleted again in reverse order,
//! best-effort. A compensation failure is logged and never masks the error
//! that triggered it.

use thiserror::Error;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::CaseToSave;
use crate::store::{CaseStore, NewArticleRow, NewCaseRow, NewHintRow, NewStepRow, StoreError};
use crate::util::is_blank;

const CASE_CODE_CONSTRAINT: &str = "cases_case_code_key";

/// Commit failures, one variant per saga step. `Display` carries the
/// user-facing Romanian message.
#[derive(Error, Debug)]
pub enum PersistenceError {
  #[error("Codul cazului \"{code}\" există deja în baza de date. Te rog alege un alt cod.")]
  DuplicateCaseCode { code: String },
  #[error("Eroare la salvarea cazului: {0}")]
  Parent(#[source] StoreError),
  #[error("Eroare la salvarea articolelor: {0}")]
  Articles(#[source] StoreError),
  #[error("Eroare la salvarea pașilor de analiză: {0}")]
  Steps(#[source] StoreError),
  #[error("Eroare la salvarea indiciilor: {0}")]
  Hints(#[source] StoreError),
}

pub struct PersistenceSaga<'a> {
  store: &'a dyn CaseStore,
}

impl<'a> PersistenceSaga<'a> {
  pub fn new(store: &'a dyn CaseStore) -> Self {
    Self { store }
  }

  /// Run the saga to completion. All-or-nothing from the caller's view:
  /// either the persisted case code comes back or a typed error after
  /// best-effort compensation.
  #[instrument(level = "info", skip(self, case), fields(case_code = %case.case_code, week = case.week_number))]
  pub async fn commit(&self, case: &CaseToSave) -> Result<String, PersistenceError> {
    let parent = build_case_row(case);
    let case_code = parent.case_code.clone();

    let case_id = match self.store.insert_case(&parent).await {
      Ok(id) => id,
      Err(e) if e.is_unique_violation(CASE_CODE_CONSTRAINT) => {
        warn!(%case_code, "Case code already taken");
        return Err(PersistenceError::DuplicateCaseCode { code: case_code });
      }
      Err(e) => return Err(PersistenceError::Parent(e)),
    };
    info!(%case_id, "Parent case row inserted");

    let articles = build_article_rows(case, case_id);
    let mut articles_written = false;
    if !articles.is_empty() {
      if let Err(e) = self.store.insert_articles(&articles).await {
        self.compensate(case_id, false, false).await;
        return Err(PersistenceError::Articles(e));
      }
      articles_written = true;
    }

    let steps = build_step_rows(case, case_id);
    let mut steps_written = false;
    if !steps.is_empty() {
      if let Err(e) = self.store.insert_steps(&steps).await {
        self.compensate(case_id, articles_written, false).await;
        return Err(PersistenceError::Steps(e));
      }
      steps_written = true;
    }

    let hints = build_hint_rows(case, case_id);
    if !hints.is_empty() {
      if let Err(e) = self.store.insert_hints(&hints).await {
        self.compensate(case_id, articles_written, steps_written).await;
        return Err(PersistenceError::Hints(e));
      }
    }

    info!(
      %case_id,
      articles = articles.len(),
      steps = steps.len(),
      hints = hints.len(),
      "Case committed"
    );
    Ok(case_code)
  }

  /// Undo already-committed writes in reverse order: steps, then articles,
  /// then the parent row. Every delete is attempted regardless of the
  /// previous one's outcome.
  async fn compensate(&self, case_id: Uuid, articles_written: bool, steps_written: bool) {
    warn!(%case_id, articles_written, steps_written, "Compensating failed save");
    if steps_written {
      if let Err(e) = self.store.delete_steps(case_id).await {
        error!(%case_id, error = %e, "Compensation failed: analysis steps left behind");
      }
    }
    if articles_written {
      if let Err(e) = self.store.delete_articles(case_id).await {
        error!(%case_id, error = %e, "Compensation failed: articles left behind");
      }
    }
    if let Err(e) = self.store.delete_case(case_id).await {
      error!(%case_id, error = %e, "Compensation failed: parent case row left behind");
    }
  }
}

/// Normalized parent row: code uppercased and trimmed, difficulty label as
/// the stored level, blank category/subcategory as NULL, never verified.
fn build_case_row(case: &CaseToSave) -> NewCaseRow {
  NewCaseRow {
    case_code: case.case_code.trim().to_uppercase(),
    title: case.title.clone(),
    level: case.level.label().to_string(),
    week_number: case.week_number,
    legal_problem: case.legal_problem.clone(),
    case_description: case.case_description.clone(),
    question: case.question.clone(),
    category: normalize_opt(&case.category),
    subcategory: normalize_opt(&case.subcategory),
    verified: false,
  }
}

fn normalize_opt(v: &Option<String>) -> Option<String> {
  v.as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
}

fn build_article_rows(case: &CaseToSave, case_id: Uuid) -> Vec<NewArticleRow> {
  case
    .articles
    .iter()
    .map(|a| NewArticleRow {
      case_id,
      article_number: a.number.clone(),
      article_reference: a.reference.clone(),
    })
    .collect()
}

/// Steps with blank text are dropped; survivors keep their on-screen
/// numbers, so persisted numbering may have gaps.
fn build_step_rows(case: &CaseToSave, case_id: Uuid) -> Vec<NewStepRow> {
  case
    .analysis_steps
    .iter()
    .filter(|s| !is_blank(&s.description))
    .map(|s| NewStepRow {
      case_id,
      step_number: s.step_number,
      step_description: s.description.trim().to_string(),
    })
    .collect()
}

fn build_hint_rows(case: &CaseToSave, case_id: Uuid) -> Vec<NewHintRow> {
  case
    .hints
    .iter()
    .filter(|h| !is_blank(&h.text))
    .map(|h| NewHintRow {
      case_id,
      hint_number: h.hint_number,
      hint_text: h.text.trim().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) mod testing {
  use std::sync::Mutex;

  use async_trait::async_trait;
  use uuid::Uuid;

  use crate::store::{CaseStore, NewArticleRow, NewCaseRow, NewHintRow, NewStepRow, StoreError};

  /// Store calls that can be told to fail.
  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  pub enum FailOn {
    Case,
    Articles,
    Steps,
    Hints,
    DeleteArticles,
    DeleteSteps,
    DeleteCase,
  }

  /// In-memory `CaseStore` that records the exact call sequence and can
  /// fail on command.
  pub struct RecordingStore {
    pub case_id: Uuid,
    pub fail_on: Vec<FailOn>,
    pub fail_duplicate: bool,
    ops: Mutex<Vec<String>>,
    parent: Mutex<Option<NewCaseRow>>,
    steps: Mutex<Vec<NewStepRow>>,
    hints: Mutex<Vec<NewHintRow>>,
  }

  impl RecordingStore {
    pub fn new() -> Self {
      Self {
        case_id: Uuid::new_v4(),
        fail_on: Vec::new(),
        fail_duplicate: false,
        ops: Mutex::new(Vec::new()),
        parent: Mutex::new(None),
        steps: Mutex::new(Vec::new()),
        hints: Mutex::new(Vec::new()),
      }
    }

    pub fn failing(fail_on: &[FailOn]) -> Self {
      Self { fail_on: fail_on.to_vec(), ..Self::new() }
    }

    pub fn ops(&self) -> Vec<String> {
      self.ops.lock().unwrap().clone()
    }

    pub fn parent_row(&self) -> Option<NewCaseRow> {
      self.parent.lock().unwrap().clone()
    }

    pub fn step_rows(&self) -> Vec<NewStepRow> {
      self.steps.lock().unwrap().clone()
    }

    pub fn hint_rows(&self) -> Vec<NewHintRow> {
      self.hints.lock().unwrap().clone()
    }

    fn record(&self, op: &str) {
      self.ops.lock().unwrap().push(op.to_string());
    }

    fn check(&self, op: FailOn) -> Result<(), StoreError> {
      if self.fail_on.contains(&op) {
        return Err(StoreError::Rejected {
          status: 500,
          code: None,
          message: "induced failure".into(),
        });
      }
      Ok(())
    }
  }

  #[async_trait]
  impl CaseStore for RecordingStore {
    async fn insert_case(&self, row: &NewCaseRow) -> Result<Uuid, StoreError> {
      self.record("insert_case");
      if self.fail_duplicate {
        return Err(StoreError::Rejected {
          status: 409,
          code: Some("23505".into()),
          message: "duplicate key value violates unique constraint \"cases_case_code_key\"".into(),
        });
      }
      self.check(FailOn::Case)?;
      *self.parent.lock().unwrap() = Some(row.clone());
      Ok(self.case_id)
    }

    async fn insert_articles(&self, _rows: &[NewArticleRow]) -> Result<(), StoreError> {
      self.record("insert_articles");
      self.check(FailOn::Articles)
    }

    async fn insert_steps(&self, rows: &[NewStepRow]) -> Result<(), StoreError> {
      self.record("insert_steps");
      self.check(FailOn::Steps)?;
      *self.steps.lock().unwrap() = rows.to_vec();
      Ok(())
    }

    async fn insert_hints(&self, rows: &[NewHintRow]) -> Result<(), StoreError> {
      self.record("insert_hints");
      self.check(FailOn::Hints)?;
      *self.hints.lock().unwrap() = rows.to_vec();
      Ok(())
    }

    async fn delete_articles(&self, _case_id: Uuid) -> Result<(), StoreError> {
      self.record("delete_articles");
      self.check(FailOn::DeleteArticles)
    }

    async fn delete_steps(&self, _case_id: Uuid) -> Result<(), StoreError> {
      self.record("delete_steps");
      self.check(FailOn::DeleteSteps)
    }

    async fn delete_case(&self, _case_id: Uuid) -> Result<(), StoreError> {
      self.record("delete_case");
      self.check(FailOn::DeleteCase)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::testing::{FailOn, RecordingStore};
  use super::*;
  use crate::domain::{AnalysisStep, ArticleReference, Difficulty, Hint, LegalDomain};

  fn draft() -> CaseToSave {
    CaseToSave {
      case_code: " civ1abc ".into(),
      title: "Accesiunea imobiliară".into(),
      level: Difficulty::Mediu,
      week_number: 3,
      legal_problem: "Problema.".into(),
      case_description: "Descriere.".into(),
      question: "Întrebare?".into(),
      category: Some("civil_property".into()),
      subcategory: Some("Posesia (Acțiuni posesorii)".into()),
      articles: vec![ArticleReference {
        number: "555".into(),
        reference: "Art. 555 C.civ.".into(),
        domain: LegalDomain::Civil,
      }],
      analysis_steps: vec![
        AnalysisStep { step_number: 1, description: "Primul pas.".into() },
        AnalysisStep { step_number: 2, description: "   ".into() },
        AnalysisStep { step_number: 3, description: "  Al treilea pas. ".into() },
      ],
      hints: vec![
        Hint { hint_number: 1, text: "Un indiciu.".into() },
        Hint { hint_number: 2, text: "".into() },
      ],
    }
  }

  #[tokio::test]
  async fn successful_commit_writes_all_four_tables_in_order() {
    let store = RecordingStore::new();
    let code = PersistenceSaga::new(&store).commit(&draft()).await.unwrap();
    assert_eq!(code, "CIV1ABC");
    assert_eq!(
      store.ops(),
      vec!["insert_case", "insert_articles", "insert_steps", "insert_hints"]
    );
  }

  #[tokio::test]
  async fn parent_row_is_normalized() {
    let store = RecordingStore::new();
    let mut case = draft();
    case.subcategory = Some("   ".into());
    PersistenceSaga::new(&store).commit(&case).await.unwrap();

    let row = store.parent_row().unwrap();
    assert_eq!(row.case_code, "CIV1ABC");
    assert_eq!(row.level, "Mediu");
    assert_eq!(row.category.as_deref(), Some("civil_property"));
    assert_eq!(row.subcategory, None, "blank subcategory is stored as NULL");
    assert!(!row.verified);
  }

  #[tokio::test]
  async fn blank_children_are_dropped_and_survivors_keep_their_numbers() {
    let store = RecordingStore::new();
    PersistenceSaga::new(&store).commit(&draft()).await.unwrap();

    let steps = store.step_rows();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].step_number, 1);
    assert_eq!(steps[1].step_number, 3);
    assert_eq!(steps[1].step_description, "Al treilea pas.");

    let hints = store.hint_rows();
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].hint_number, 1);
  }

  #[tokio::test]
  async fn empty_child_lists_skip_their_inserts() {
    let store = RecordingStore::new();
    let mut case = draft();
    case.articles.clear();
    case.hints = vec![Hint { hint_number: 1, text: "  ".into() }];
    PersistenceSaga::new(&store).commit(&case).await.unwrap();
    assert_eq!(store.ops(), vec!["insert_case", "insert_steps"]);
  }

  #[tokio::test]
  async fn parent_failure_performs_no_further_writes() {
    let store = RecordingStore::failing(&[FailOn::Case]);
    let err = PersistenceSaga::new(&store).commit(&draft()).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Parent(_)));
    assert_eq!(store.ops(), vec!["insert_case"]);
  }

  #[tokio::test]
  async fn duplicate_case_code_is_reported_as_such() {
    let mut store = RecordingStore::new();
    store.fail_duplicate = true;
    let err = PersistenceSaga::new(&store).commit(&draft()).await.unwrap_err();
    match err {
      PersistenceError::DuplicateCaseCode { code } => assert_eq!(code, "CIV1ABC"),
      other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.ops(), vec!["insert_case"], "nothing to compensate");
  }

  #[test]
  fn duplicate_message_asks_for_another_code() {
    let err = PersistenceError::DuplicateCaseCode { code: "CIV1ABC".into() };
    let msg = err.to_string();
    assert!(msg.contains("CIV1ABC"));
    assert!(msg.contains("există deja"));
    assert!(msg.contains("alege un alt cod"));
  }

  #[tokio::test]
  async fn articles_failure_compensates_the_parent_and_stops() {
    let store = RecordingStore::failing(&[FailOn::Articles]);
    let err = PersistenceSaga::new(&store).commit(&draft()).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Articles(_)));
    assert_eq!(store.ops(), vec!["insert_case", "insert_articles", "delete_case"]);
  }

  #[tokio::test]
  async fn steps_failure_compensates_articles_then_parent() {
    let store = RecordingStore::failing(&[FailOn::Steps]);
    let err = PersistenceSaga::new(&store).commit(&draft()).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Steps(_)));
    assert_eq!(
      store.ops(),
      vec!["insert_case", "insert_articles", "insert_steps", "delete_articles", "delete_case"]
    );
  }

  #[tokio::test]
  async fn hints_failure_compensates_everything_in_reverse_order() {
    let store = RecordingStore::failing(&[FailOn::Hints]);
    let err = PersistenceSaga::new(&store).commit(&draft()).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Hints(_)));
    assert_eq!(
      store.ops(),
      vec![
        "insert_case",
        "insert_articles",
        "insert_steps",
        "insert_hints",
        "delete_steps",
        "delete_articles",
        "delete_case"
      ]
    );
  }

  #[tokio::test]
  async fn failed_compensation_never_masks_the_primary_error() {
    let store = RecordingStore::failing(&[FailOn::Hints, FailOn::DeleteSteps]);
    let err = PersistenceSaga::new(&store).commit(&draft()).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Hints(_)));
    // delete_steps failed, but the remaining deletes were still attempted.
    assert_eq!(
      store.ops()[4..],
      ["delete_steps", "delete_articles", "delete_case"]
    );
  }
}
