//! Draft editing: scalar field updates, per-element text edits, neighbour
//! swaps, insertion and removal over the step/hint lists.
//!
//! The one rule this module exists to defend: step and hint numbers are
//! always exactly 1..=len in current list order. Every structural mutation
//! renumbers; boundary moves and out-of-range indexes are quiet no-ops.

use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisStep, GeneratedCase, Hint};

/// Scalar draft fields replaceable through `update_field`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
  CaseCode,
  Title,
  LegalProblem,
  CaseDescription,
  Question,
  Category,
  Subcategory,
}

/// Direction of a neighbour swap in an ordered list.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveDir {
  Up,
  Down,
}

/// Wraps the mutable generated case plus the editable persistence
/// selections (case code, category, subcategory). The case itself is
/// private so numbering can only change through renumbering methods.
#[derive(Clone, Debug)]
pub struct CaseDraftEditor {
  case: GeneratedCase,
  pub case_code: String,
  pub category: Option<String>,
  pub subcategory: String,
}

impl CaseDraftEditor {
  /// Install a freshly generated case. Numbering is normalized on entry:
  /// model output is not trusted to be dense.
  pub fn new(mut case: GeneratedCase, case_code: String, subcategory: String) -> Self {
    renumber_steps(&mut case.analysis_steps);
    renumber_hints(&mut case.hints);
    Self { case, case_code, category: None, subcategory }
  }

  pub fn case(&self) -> &GeneratedCase {
    &self.case
  }

  pub fn update_field(&mut self, field: ScalarField, value: &str) {
    match field {
      ScalarField::CaseCode => self.case_code = value.to_string(),
      ScalarField::Title => self.case.title = value.to_string(),
      ScalarField::LegalProblem => self.case.legal_problem = value.to_string(),
      ScalarField::CaseDescription => self.case.case_description = value.to_string(),
      ScalarField::Question => self.case.question = value.to_string(),
      ScalarField::Category => {
        self.category = if value.trim().is_empty() { None } else { Some(value.to_string()) };
      }
      ScalarField::Subcategory => self.subcategory = value.to_string(),
    }
  }

  /// Replace one step's text in place. Numbering and position untouched.
  pub fn update_step(&mut self, index: usize, text: &str) {
    if let Some(step) = self.case.analysis_steps.get_mut(index) {
      step.description = text.to_string();
    }
  }

  /// Replace one hint's text in place. Numbering and position untouched.
  pub fn update_hint(&mut self, index: usize, text: &str) {
    if let Some(hint) = self.case.hints.get_mut(index) {
      hint.text = text.to_string();
    }
  }

  pub fn move_step(&mut self, index: usize, dir: MoveDir) {
    if let Some(target) = swap_target(index, dir, self.case.analysis_steps.len()) {
      self.case.analysis_steps.swap(index, target);
      renumber_steps(&mut self.case.analysis_steps);
    }
  }

  pub fn move_hint(&mut self, index: usize, dir: MoveDir) {
    if let Some(target) = swap_target(index, dir, self.case.hints.len()) {
      self.case.hints.swap(index, target);
      renumber_hints(&mut self.case.hints);
    }
  }

  pub fn add_step(&mut self) {
    self.case.analysis_steps.push(AnalysisStep {
      step_number: self.case.analysis_steps.len() as u32 + 1,
      description: String::new(),
    });
    renumber_steps(&mut self.case.analysis_steps);
  }

  pub fn add_hint(&mut self) {
    self.case.hints.push(Hint {
      hint_number: self.case.hints.len() as u32 + 1,
      text: String::new(),
    });
    renumber_hints(&mut self.case.hints);
  }

  pub fn remove_step(&mut self, index: usize) {
    if index < self.case.analysis_steps.len() {
      self.case.analysis_steps.remove(index);
      renumber_steps(&mut self.case.analysis_steps);
    }
  }

  pub fn remove_hint(&mut self, index: usize) {
    if index < self.case.hints.len() {
      self.case.hints.remove(index);
      renumber_hints(&mut self.case.hints);
    }
  }
}

/// Index of the neighbour to swap with, or None when the move is a no-op
/// (boundary move or out-of-range index).
fn swap_target(index: usize, dir: MoveDir, len: usize) -> Option<usize> {
  if index >= len {
    return None;
  }
  match dir {
    MoveDir::Up if index > 0 => Some(index - 1),
    MoveDir::Down if index + 1 < len => Some(index + 1),
    _ => None,
  }
}

fn renumber_steps(steps: &mut [AnalysisStep]) {
  for (i, step) in steps.iter_mut().enumerate() {
    step.step_number = i as u32 + 1;
  }
}

fn renumber_hints(hints: &mut [Hint]) {
  for (i, hint) in hints.iter_mut().enumerate() {
    hint.hint_number = i as u32 + 1;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> GeneratedCase {
    GeneratedCase {
      title: "Posesia și acțiunea posesorie".into(),
      legal_problem: "Cine poate exercita acțiunea posesorie.".into(),
      case_description: "Ion ocupă un teren de zece ani.".into(),
      question: "Poate Ion invoca protecția posesiei?".into(),
      analysis_steps: vec![
        AnalysisStep { step_number: 1, description: "Identifică posesia.".into() },
        AnalysisStep { step_number: 2, description: "Verifică viciile.".into() },
        AnalysisStep { step_number: 3, description: "Aplică Art. 949 C.civ.".into() },
      ],
      hints: vec![
        Hint { hint_number: 1, text: "Pornește de la definiția posesiei.".into() },
        Hint { hint_number: 2, text: "Distinge posesia de detenție.".into() },
      ],
    }
  }

  fn editor() -> CaseDraftEditor {
    CaseDraftEditor::new(draft(), "CIV1ABC".into(), String::new())
  }

  fn assert_dense(ed: &CaseDraftEditor) {
    for (i, s) in ed.case().analysis_steps.iter().enumerate() {
      assert_eq!(s.step_number, i as u32 + 1, "step numbering broken at {i}");
    }
    for (i, h) in ed.case().hints.iter().enumerate() {
      assert_eq!(h.hint_number, i as u32 + 1, "hint numbering broken at {i}");
    }
  }

  #[test]
  fn numbering_stays_dense_through_mixed_operations() {
    let mut ed = editor();
    ed.move_step(2, MoveDir::Up);
    assert_dense(&ed);
    ed.add_step();
    assert_dense(&ed);
    ed.remove_step(0);
    assert_dense(&ed);
    ed.move_step(0, MoveDir::Down);
    assert_dense(&ed);
    ed.add_hint();
    assert_dense(&ed);
    ed.move_hint(2, MoveDir::Up);
    assert_dense(&ed);
    ed.remove_hint(1);
    assert_dense(&ed);
    assert_eq!(ed.case().analysis_steps.len(), 3);
    assert_eq!(ed.case().hints.len(), 2);
  }

  #[test]
  fn move_reorders_content_and_renumbers() {
    let mut ed = editor();
    ed.move_step(2, MoveDir::Up);
    let steps = &ed.case().analysis_steps;
    assert_eq!(steps[1].description, "Aplică Art. 949 C.civ.");
    assert_eq!(steps[2].description, "Verifică viciile.");
    assert_eq!(steps[1].step_number, 2);
    assert_eq!(steps[2].step_number, 3);
  }

  #[test]
  fn boundary_moves_leave_lists_unchanged() {
    let mut ed = editor();
    let before = ed.case().clone();
    ed.move_step(0, MoveDir::Up);
    ed.move_step(2, MoveDir::Down);
    ed.move_hint(0, MoveDir::Up);
    ed.move_hint(1, MoveDir::Down);
    assert_eq!(ed.case(), &before);
  }

  #[test]
  fn out_of_range_indexes_are_ignored() {
    let mut ed = editor();
    let before = ed.case().clone();
    ed.update_step(99, "x");
    ed.update_hint(99, "x");
    ed.move_step(99, MoveDir::Up);
    ed.move_hint(99, MoveDir::Down);
    ed.remove_step(99);
    ed.remove_hint(99);
    assert_eq!(ed.case(), &before);
  }

  #[test]
  fn update_step_replaces_text_without_touching_order() {
    let mut ed = editor();
    ed.update_step(1, "Text nou.");
    let steps = &ed.case().analysis_steps;
    assert_eq!(steps[1].description, "Text nou.");
    assert_eq!(steps[1].step_number, 2);
    assert_eq!(steps[0].description, "Identifică posesia.");
  }

  #[test]
  fn add_appends_empty_element_with_next_number() {
    let mut ed = editor();
    ed.add_step();
    let steps = &ed.case().analysis_steps;
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[3].step_number, 4);
    assert!(steps[3].description.is_empty());
    ed.add_hint();
    assert_eq!(ed.case().hints[2].hint_number, 3);
  }

  #[test]
  fn remove_closes_numbering_gaps() {
    let mut ed = editor();
    ed.remove_step(1);
    let steps = &ed.case().analysis_steps;
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].description, "Identifică posesia.");
    assert_eq!(steps[1].description, "Aplică Art. 949 C.civ.");
    assert_eq!(steps[1].step_number, 2);
  }

  #[test]
  fn installing_a_draft_normalizes_sloppy_model_numbering() {
    let mut case = draft();
    case.analysis_steps[0].step_number = 4;
    case.analysis_steps[1].step_number = 4;
    case.hints[1].hint_number = 9;
    let ed = CaseDraftEditor::new(case, "CIV1ABC".into(), String::new());
    assert_dense(&ed);
  }

  #[test]
  fn scalar_updates_replace_fields_and_blank_category_clears() {
    let mut ed = editor();
    ed.update_field(ScalarField::Title, "Titlu editat");
    ed.update_field(ScalarField::CaseCode, "CIV2XYZ");
    ed.update_field(ScalarField::Category, "civil_property");
    assert_eq!(ed.case().title, "Titlu editat");
    assert_eq!(ed.case_code, "CIV2XYZ");
    assert_eq!(ed.category.as_deref(), Some("civil_property"));
    ed.update_field(ScalarField::Category, "   ");
    assert!(ed.category.is_none());
    ed.update_field(ScalarField::Subcategory, "Posesia (Acțiuni posesorii)");
    assert_eq!(ed.subcategory, "Posesia (Acțiuni posesorii)");
  }
}
