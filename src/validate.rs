//! Pre-commit validation gate. Pure and accumulating: one call reports
//! every violation present, and an empty list is the sole proceed signal.

use thiserror::Error;

use crate::domain::{GeneratedCase, LegalDomain};
use crate::util::is_blank;

/// One reason a draft cannot be persisted yet. `Display` carries the
/// user-facing Romanian message.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Violation {
  #[error("Codul cazului nu poate fi gol.")]
  CaseCodeMissing,
  #[error("Titlul nu poate fi gol.")]
  TitleMissing,
  #[error("Problema juridică nu poate fi goală.")]
  LegalProblemMissing,
  #[error("Descrierea cazului nu poate fi goală.")]
  CaseDescriptionMissing,
  #[error("Întrebarea nu poate fi goală.")]
  QuestionMissing,
  #[error("Subcategoria este obligatorie pentru {}.", domain.display_name())]
  SubcategoryRequired { domain: LegalDomain },
  #[error("Cazul trebuie să aibă cel puțin un pas de analiză completat.")]
  NoAnalysisSteps,
  #[error("Cazul trebuie să aibă cel puțin un indiciu completat.")]
  NoHints,
}

/// Check a draft against every gate. Never short-circuits; callers show
/// all violations together.
pub fn validate(
  case_code: &str,
  subcategory: &str,
  draft: &GeneratedCase,
  domain: Option<LegalDomain>,
) -> Vec<Violation> {
  let mut violations = Vec::new();

  if is_blank(case_code) {
    violations.push(Violation::CaseCodeMissing);
  }
  if is_blank(&draft.title) {
    violations.push(Violation::TitleMissing);
  }
  if is_blank(&draft.legal_problem) {
    violations.push(Violation::LegalProblemMissing);
  }
  if is_blank(&draft.case_description) {
    violations.push(Violation::CaseDescriptionMissing);
  }
  if is_blank(&draft.question) {
    violations.push(Violation::QuestionMissing);
  }
  if let Some(domain) = domain {
    if domain.requires_subcategory() && is_blank(subcategory) {
      violations.push(Violation::SubcategoryRequired { domain });
    }
  }
  if !draft.analysis_steps.iter().any(|s| !is_blank(&s.description)) {
    violations.push(Violation::NoAnalysisSteps);
  }
  if !draft.hints.iter().any(|h| !is_blank(&h.text)) {
    violations.push(Violation::NoHints);
  }

  violations
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{AnalysisStep, Hint};

  fn complete_draft() -> GeneratedCase {
    GeneratedCase {
      title: "Furtul dintr-o locuință".into(),
      legal_problem: "Încadrarea juridică a sustragerii.".into(),
      case_description: "Marin sustrage un bun dintr-o locuință.".into(),
      question: "Ce infracțiune a săvârșit Marin?".into(),
      analysis_steps: vec![AnalysisStep { step_number: 1, description: "Analizează latura obiectivă.".into() }],
      hints: vec![Hint { hint_number: 1, text: "Pornește de la Art. 228 C.pen.".into() }],
    }
  }

  #[test]
  fn complete_draft_passes_with_no_violations() {
    let v = validate("PEN3QRT", "", &complete_draft(), Some(LegalDomain::Penal));
    assert!(v.is_empty(), "unexpected violations: {v:?}");
  }

  #[test]
  fn every_violation_is_reported_in_one_call() {
    let empty = GeneratedCase {
      title: String::new(),
      legal_problem: "  ".into(),
      case_description: String::new(),
      question: "\t".into(),
      analysis_steps: vec![],
      hints: vec![],
    };
    let v = validate("  ", "", &empty, Some(LegalDomain::Civil));
    assert_eq!(v.len(), 8);
    assert!(v.contains(&Violation::CaseCodeMissing));
    assert!(v.contains(&Violation::TitleMissing));
    assert!(v.contains(&Violation::LegalProblemMissing));
    assert!(v.contains(&Violation::CaseDescriptionMissing));
    assert!(v.contains(&Violation::QuestionMissing));
    assert!(v.contains(&Violation::SubcategoryRequired { domain: LegalDomain::Civil }));
    assert!(v.contains(&Violation::NoAnalysisSteps));
    assert!(v.contains(&Violation::NoHints));
  }

  #[test]
  fn subcategory_is_mandatory_only_where_the_domain_says_so() {
    let draft = complete_draft();
    let civil = validate("CIV1ABC", "  ", &draft, Some(LegalDomain::Civil));
    assert_eq!(civil, vec![Violation::SubcategoryRequired { domain: LegalDomain::Civil }]);

    let penal = validate("PEN1ABC", "", &draft, Some(LegalDomain::Penal));
    assert!(penal.is_empty());

    let unknown = validate("CIV1ABC", "", &draft, None);
    assert!(unknown.is_empty());

    let filled = validate("CIV1ABC", "Posesia (Efectele posesiei)", &draft, Some(LegalDomain::Civil));
    assert!(filled.is_empty());
  }

  #[test]
  fn whitespace_only_children_do_not_satisfy_the_minimums() {
    let mut draft = complete_draft();
    draft.analysis_steps = vec![
      AnalysisStep { step_number: 1, description: "   ".into() },
      AnalysisStep { step_number: 2, description: "\n".into() },
    ];
    draft.hints = vec![Hint { hint_number: 1, text: " ".into() }];
    let v = validate("PEN1ABC", "", &draft, Some(LegalDomain::Penal));
    assert_eq!(v, vec![Violation::NoAnalysisSteps, Violation::NoHints]);
  }

  #[test]
  fn violation_messages_are_romanian_user_facing_text() {
    assert_eq!(Violation::TitleMissing.to_string(), "Titlul nu poate fi gol.");
    assert_eq!(
      Violation::SubcategoryRequired { domain: LegalDomain::Civil }.to_string(),
      "Subcategoria este obligatorie pentru Drept Civil."
    );
  }
}
