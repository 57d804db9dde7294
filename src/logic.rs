//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Running one generation cycle (gate, model call, draft install)
//!   - The advisory classification call
//!   - Dispatching draft edits to the editor
//!   - The validated save: validation gate, then the persistence saga

use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::catalog;
use crate::domain::CaseToSave;
use crate::editor::CaseDraftEditor;
use crate::generator::GenerationError;
use crate::protocol::EditOp;
use crate::saga::{PersistenceError, PersistenceSaga};
use crate::state::AppState;
use crate::validate::{self, Violation};
use crate::wizard::{WizardError, WizardSession};

/// Failures of the generate operation.
#[derive(Error, Debug)]
pub enum GenerateError {
  #[error(transparent)]
  Wizard(#[from] WizardError),
  #[error(transparent)]
  Generation(#[from] GenerationError),
}

/// Failures of the save operation.
#[derive(Error, Debug)]
pub enum SaveError {
  #[error(transparent)]
  Wizard(#[from] WizardError),
  #[error("Cazul nu este încă valid pentru salvare.")]
  Invalid(Vec<Violation>),
  #[error(transparent)]
  Persistence(#[from] PersistenceError),
}

/// Run one generation cycle for a session: gate the attempt, call the
/// model, install the draft. The busy flag stays set for the duration of
/// the external call and a failure clears it so the author can retry.
#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn generate_for_session(
  state: &AppState,
  id: Uuid,
) -> Result<WizardSession, GenerateError> {
  // An unknown session outranks a missing generator.
  state.get_session(id).await?;
  let generator = match &state.generator {
    Some(g) => g.clone(),
    None => return Err(GenerateError::Wizard(WizardError::GeneratorUnavailable)),
  };

  let (gate, _) = state.update_session(id, |s| s.begin_generation()).await?;
  let config = gate?;

  // The model call runs outside the session lock.
  match generator.generate_case(&state.prompts, &config).await {
    Ok(case) => {
      let (_, session) = state.update_session(id, |s| s.complete_generation(case)).await?;
      info!(target: "case", session_id = %id, "Draft installed");
      Ok(session)
    }
    Err(e) => {
      error!(target: "case", session_id = %id, error = %e, "Generation failed");
      let _ = state.update_session(id, |s| s.fail_generation()).await;
      Err(GenerateError::Generation(e))
    }
  }
}

/// Ask for a category/subcategory suggestion for the session's draft.
/// Advisory: with no generator configured (or no domain on record) this
/// returns `(None, None)` instead of failing. The suggestion is only
/// returned, never applied; applying it is the author's edit.
#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn classify_for_session(
  state: &AppState,
  id: Uuid,
) -> Result<(Option<String>, Option<String>), WizardError> {
  let session = state.get_session(id).await?;
  let editor = session.editor.as_ref().ok_or(WizardError::NoDraft)?;

  let (generator, domain) = match (&state.generator, session.config.domain) {
    (Some(g), Some(d)) => (g, d),
    _ => return Ok((None, None)),
  };

  let categories = catalog::categories_for(domain);
  let subcategories = catalog::subcategory_options(domain);
  let suggestion = generator
    .classify(&state.prompts, editor.case(), &categories, &subcategories)
    .await;
  info!(target: "case", session_id = %id, category = ?suggestion.0, subcategory = ?suggestion.1, "Classification suggestion");
  Ok(suggestion)
}

/// Apply one edit to the session's draft and return the updated session.
/// Boundary moves and out-of-range indexes are no-ops by editor contract.
#[instrument(level = "info", skip(state, op), fields(session_id = %id))]
pub async fn apply_edit(
  state: &AppState,
  id: Uuid,
  op: EditOp,
) -> Result<WizardSession, WizardError> {
  let (applied, session) = state
    .update_session(id, |s| match s.editor.as_mut() {
      Some(editor) => {
        dispatch_edit(editor, op);
        Ok(())
      }
      None => Err(WizardError::NoDraft),
    })
    .await?;
  applied?;
  Ok(session)
}

fn dispatch_edit(editor: &mut CaseDraftEditor, op: EditOp) {
  match op {
    EditOp::UpdateField { field, value } => editor.update_field(field, &value),
    EditOp::UpdateStep { index, text } => editor.update_step(index, &text),
    EditOp::UpdateHint { index, text } => editor.update_hint(index, &text),
    EditOp::MoveStep { index, dir } => editor.move_step(index, dir),
    EditOp::MoveHint { index, dir } => editor.move_hint(index, dir),
    EditOp::AddStep => editor.add_step(),
    EditOp::AddHint => editor.add_hint(),
    EditOp::RemoveStep { index } => editor.remove_step(index),
    EditOp::RemoveHint { index } => editor.remove_hint(index),
  }
}

/// Validate and persist the session's draft. All violations are collected
/// before anything is written; on success the session resets for the next
/// authoring cycle and the stored case code comes back.
#[instrument(level = "info", skip(state, override_code), fields(session_id = %id))]
pub async fn save_for_session(
  state: &AppState,
  id: Uuid,
  override_code: Option<String>,
) -> Result<String, SaveError> {
  let session = state.get_session(id).await.map_err(SaveError::Wizard)?;
  if session.busy {
    return Err(SaveError::Wizard(WizardError::Busy));
  }
  let mut editor = match session.editor {
    Some(ed) => ed,
    None => return Err(SaveError::Wizard(WizardError::NoDraft)),
  };
  if let Some(code) = override_code {
    editor.case_code = code;
  }

  let violations = validate::validate(
    &editor.case_code,
    &editor.subcategory,
    editor.case(),
    session.config.domain,
  );
  if !violations.is_empty() {
    info!(target: "case", session_id = %id, count = violations.len(), "Draft rejected by validation");
    return Err(SaveError::Invalid(violations));
  }

  let store = match &state.store {
    Some(s) => s.clone(),
    None => return Err(SaveError::Wizard(WizardError::StoreUnavailable)),
  };

  let case = CaseToSave {
    case_code: editor.case_code.clone(),
    title: editor.case().title.clone(),
    level: session.config.difficulty,
    week_number: session.config.week,
    legal_problem: editor.case().legal_problem.clone(),
    case_description: editor.case().case_description.clone(),
    question: editor.case().question.clone(),
    category: editor.category.clone(),
    subcategory: Some(editor.subcategory.clone()),
    articles: session.config.articles.clone(),
    analysis_steps: editor.case().analysis_steps.clone(),
    hints: editor.case().hints.clone(),
  };

  let code = PersistenceSaga::new(store.as_ref())
    .commit(&case)
    .await
    .map_err(SaveError::Persistence)?;

  // A successful save ends the cycle; the wizard starts over.
  let _ = state.update_session(id, |s| s.reset()).await;
  info!(target: "case", session_id = %id, case_code = %code, "Case saved; session reset");
  Ok(code)
}
