//! HTTP endpoint handlers. These are thin wrappers that forward to core logic
//! and map typed errors onto statuses; the error body shape is shared.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::logic::{self, GenerateError, SaveError};
use crate::protocol::*;
use crate::saga::PersistenceError;
use crate::catalog;
use crate::state::AppState;
use crate::wizard::{WizardError, WizardSession};

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn wizard_error_response(e: WizardError) -> ErrorResponse {
  let status = match e {
    WizardError::UnknownSession => StatusCode::NOT_FOUND,
    WizardError::Busy => StatusCode::CONFLICT,
    WizardError::GeneratorUnavailable | WizardError::StoreUnavailable => {
      StatusCode::SERVICE_UNAVAILABLE
    }
    WizardError::DomainNotSelected
    | WizardError::NotOnFinalStep { .. }
    | WizardError::NoDraft => StatusCode::BAD_REQUEST,
  };
  (status, Json(ErrorBody { error: e.to_string(), violations: None }))
}

fn generate_error_response(e: GenerateError) -> ErrorResponse {
  match e {
    GenerateError::Wizard(w) => wizard_error_response(w),
    GenerateError::Generation(g) => (
      StatusCode::BAD_GATEWAY,
      Json(ErrorBody { error: g.to_string(), violations: None }),
    ),
  }
}

fn save_error_response(e: SaveError) -> ErrorResponse {
  match e {
    SaveError::Wizard(w) => wizard_error_response(w),
    SaveError::Invalid(violations) => (
      StatusCode::UNPROCESSABLE_ENTITY,
      Json(ErrorBody {
        error: "Cazul nu este încă valid pentru salvare.".into(),
        violations: Some(violations.iter().map(|v| v.to_string()).collect()),
      }),
    ),
    SaveError::Persistence(p) => {
      let status = match p {
        PersistenceError::DuplicateCaseCode { .. } => StatusCode::CONFLICT,
        _ => StatusCode::BAD_GATEWAY,
      };
      (status, Json(ErrorBody { error: p.to_string(), violations: None }))
    }
  }
}

/// Mutate a session and answer with the updated snapshot.
async fn mutate_session<F>(
  state: &AppState,
  id: Uuid,
  f: F,
) -> Result<Json<SessionSnapshot>, ErrorResponse>
where
  F: FnOnce(&mut WizardSession),
{
  let (_, session) = state.update_session(id, f).await.map_err(wizard_error_response)?;
  Ok(Json(session_to_out(id, &session)))
}

#[instrument(level = "info")]
pub async fn http_health() -> Json<HealthOut> {
  Json(HealthOut { ok: true })
}

// --- Catalog ---

#[instrument(level = "info")]
pub async fn http_catalog_domains() -> Json<Vec<DomainOut>> {
  let out = catalog::DOMAINS
    .iter()
    .map(|d| DomainOut {
      id: d.id,
      name: d.name,
      icon: d.icon,
      requires_subcategory: d.id.requires_subcategory(),
    })
    .collect();
  Json(out)
}

#[instrument(level = "info", fields(domain = ?q.domain))]
pub async fn http_catalog_categories(Query(q): Query<CatalogQuery>) -> Json<Vec<CategoryOut>> {
  let out = catalog::categories_for(q.domain)
    .into_iter()
    .map(|c| CategoryOut { id: c.id, name: c.name })
    .collect();
  Json(out)
}

#[instrument(level = "info", fields(domain = ?q.domain))]
pub async fn http_catalog_subcategories(Query(q): Query<CatalogQuery>) -> Json<SubcategoriesOut> {
  Json(SubcategoriesOut {
    domain: q.domain,
    subcategories: catalog::subcategory_options(q.domain),
  })
}

// --- Wizard lifecycle ---

#[instrument(level = "info", skip(state))]
pub async fn http_create_wizard(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
  let (id, session) = state.create_session().await;
  Json(session_to_out(id, &session))
}

#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn http_get_wizard(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  let session = state.get_session(id).await.map_err(wizard_error_response)?;
  Ok(Json(session_to_out(id, &session)))
}

#[instrument(level = "info", skip(state, body), fields(session_id = %id, domain = ?body.domain))]
pub async fn http_set_domain(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<DomainIn>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| s.config.select_domain(body.domain)).await
}

#[instrument(level = "info", skip(state, body), fields(session_id = %id, n = body.categories.len()))]
pub async fn http_set_categories(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CategoriesIn>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| s.config.set_categories(body.categories)).await
}

#[instrument(level = "info", skip(state, body), fields(session_id = %id, n = body.articles.len()))]
pub async fn http_set_articles(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ArticlesIn>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| s.config.set_articles(body.articles)).await
}

#[instrument(level = "info", skip(state, body), fields(session_id = %id, topic_len = body.topic.len()))]
pub async fn http_set_context(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ContextIn>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| s.config.set_context(body.topic, body.focus)).await
}

#[instrument(level = "info", skip(state, body), fields(session_id = %id, difficulty = ?body.difficulty, week = body.week))]
pub async fn http_set_settings(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SettingsIn>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| {
    s.config.set_settings(body.difficulty, body.week, body.subcategory)
  })
  .await
}

#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn http_advance(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| s.advance()).await
}

#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn http_retreat(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| s.retreat()).await
}

#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn http_reset(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  mutate_session(&state, id, |s| s.reset()).await
}

// --- Generation, classification, editing, saving ---

#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn http_generate(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  let session = logic::generate_for_session(&state, id)
    .await
    .map_err(generate_error_response)?;
  info!(target: "case", session_id = %id, "HTTP draft generated");
  Ok(Json(session_to_out(id, &session)))
}

#[instrument(level = "info", skip(state), fields(session_id = %id))]
pub async fn http_classify(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ClassifyOut>, ErrorResponse> {
  let (category, subcategory) = logic::classify_for_session(&state, id)
    .await
    .map_err(wizard_error_response)?;
  Ok(Json(ClassifyOut { category, subcategory }))
}

#[instrument(level = "info", skip(state, body), fields(session_id = %id))]
pub async fn http_edit_draft(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<EditOp>,
) -> Result<Json<SessionSnapshot>, ErrorResponse> {
  let session = logic::apply_edit(&state, id, body)
    .await
    .map_err(wizard_error_response)?;
  Ok(Json(session_to_out(id, &session)))
}

#[instrument(level = "info", skip(state, body), fields(session_id = %id, has_override = body.case_code.is_some()))]
pub async fn http_save(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SaveIn>,
) -> Result<Json<SaveOut>, ErrorResponse> {
  let case_code = logic::save_for_session(&state, id, body.case_code)
    .await
    .map_err(save_error_response)?;
  info!(target: "case", session_id = %id, %case_code, "HTTP case saved");
  Ok(Json(SaveOut { case_code }))
}
