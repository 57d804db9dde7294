//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AnalysisStep, ArticleReference, Difficulty, Hint, LegalDomain};
use crate::editor::{CaseDraftEditor, MoveDir, ScalarField};
use crate::wizard::{DraftConfiguration, WizardSession};

//
// Catalog DTOs
//

#[derive(Debug, Serialize)]
pub struct DomainOut {
    pub id: LegalDomain,
    pub name: &'static str,
    pub icon: &'static str,
    #[serde(rename = "requiresSubcategory")]
    pub requires_subcategory: bool,
}

#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SubcategoriesOut {
    pub domain: LegalDomain,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub domain: LegalDomain,
}

//
// Wizard session DTOs
//

/// Full session view returned by every wizard endpoint that mutates state.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    pub step: u8,
    pub busy: bool,
    pub config: ConfigOut,
    pub draft: Option<DraftOut>,
}

#[derive(Debug, Serialize)]
pub struct ConfigOut {
    pub domain: Option<LegalDomain>,
    pub categories: Vec<String>,
    pub articles: Vec<ArticleReference>,
    pub topic: String,
    pub focus: String,
    pub difficulty: Difficulty,
    pub week: u32,
    pub subcategory: String,
}

/// The editable draft: the generated case plus the author-owned fields.
/// Case payload keys stay aligned with the generation JSON contract.
#[derive(Debug, Serialize)]
pub struct DraftOut {
    #[serde(rename = "caseCode")]
    pub case_code: String,
    pub category: Option<String>,
    pub subcategory: String,
    pub title: String,
    pub legal_problem: String,
    pub case_description: String,
    pub question: String,
    pub analysis_steps: Vec<AnalysisStep>,
    pub hints: Vec<Hint>,
}

/// Convert internal session state to the public DTO.
pub fn session_to_out(session_id: Uuid, s: &WizardSession) -> SessionSnapshot {
    SessionSnapshot {
        session_id,
        step: s.step,
        busy: s.busy,
        config: config_to_out(&s.config),
        draft: s.editor.as_ref().map(draft_to_out),
    }
}

fn config_to_out(c: &DraftConfiguration) -> ConfigOut {
    ConfigOut {
        domain: c.domain,
        categories: c.categories.clone(),
        articles: c.articles.clone(),
        topic: c.topic.clone(),
        focus: c.focus.clone(),
        difficulty: c.difficulty,
        week: c.week,
        subcategory: c.subcategory.clone(),
    }
}

fn draft_to_out(ed: &CaseDraftEditor) -> DraftOut {
    let case = ed.case();
    DraftOut {
        case_code: ed.case_code.clone(),
        category: ed.category.clone(),
        subcategory: ed.subcategory.clone(),
        title: case.title.clone(),
        legal_problem: case.legal_problem.clone(),
        case_description: case.case_description.clone(),
        question: case.question.clone(),
        analysis_steps: case.analysis_steps.clone(),
        hints: case.hints.clone(),
    }
}

//
// Wizard setter inputs
//

#[derive(Debug, Deserialize)]
pub struct DomainIn {
    pub domain: LegalDomain,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesIn {
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticlesIn {
    pub articles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContextIn {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub focus: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsIn {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_week")]
    pub week: u32,
    #[serde(default)]
    pub subcategory: String,
}

fn default_week() -> u32 {
    1
}

//
// Draft editing
//

/// One edit against the draft, dispatched to the editor by tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    UpdateField { field: ScalarField, value: String },
    UpdateStep { index: usize, text: String },
    UpdateHint { index: usize, text: String },
    MoveStep { index: usize, dir: MoveDir },
    MoveHint { index: usize, dir: MoveDir },
    AddStep,
    AddHint,
    RemoveStep { index: usize },
    RemoveHint { index: usize },
}

//
// Generation / classification / save
//

#[derive(Debug, Serialize)]
pub struct ClassifyOut {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SaveIn {
    #[serde(rename = "caseCode", default)]
    pub case_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveOut {
    #[serde(rename = "caseCode")]
    pub case_code: String,
}

/// Error envelope for every non-2xx answer. `violations` appears only on
/// validation failures and carries all of them at once.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_ops_deserialize_by_tag() {
        let op: EditOp =
            serde_json::from_str(r#"{"op": "update_field", "field": "title", "value": "Nou"}"#)
                .unwrap();
        assert!(matches!(
            op,
            EditOp::UpdateField { field: ScalarField::Title, .. }
        ));

        let op: EditOp =
            serde_json::from_str(r#"{"op": "move_step", "index": 2, "dir": "up"}"#).unwrap();
        assert!(matches!(op, EditOp::MoveStep { index: 2, dir: MoveDir::Up }));

        let op: EditOp = serde_json::from_str(r#"{"op": "add_hint"}"#).unwrap();
        assert!(matches!(op, EditOp::AddHint));
    }

    #[test]
    fn save_input_tolerates_an_empty_body() {
        let s: SaveIn = serde_json::from_str("{}").unwrap();
        assert_eq!(s.case_code, None);
        let s: SaveIn = serde_json::from_str(r#"{"caseCode": "CIV1ABC"}"#).unwrap();
        assert_eq!(s.case_code.as_deref(), Some("CIV1ABC"));
    }

    #[test]
    fn settings_input_defaults_week_and_difficulty() {
        let s: SettingsIn = serde_json::from_str("{}").unwrap();
        assert_eq!(s.week, 1);
        assert_eq!(s.difficulty, Difficulty::Mediu);
        assert!(s.subcategory.is_empty());
    }

    #[test]
    fn error_body_omits_absent_violations() {
        let plain = serde_json::to_string(&ErrorBody { error: "e".into(), violations: None }).unwrap();
        assert!(!plain.contains("violations"));
        let with = serde_json::to_string(&ErrorBody {
            error: "e".into(),
            violations: Some(vec!["v1".into()]),
        })
        .unwrap();
        assert!(with.contains("violations"));
    }
}
