//! Wizard session state: step pointer over the fixed five-step sequence
//! (domain → categories → articles → context → configuration), the typed
//! draft configuration, and the generate/busy lifecycle.
//!
//! Deliberately permissive: no step validates completeness. Every field is
//! optional until the validation gate runs at save time. The one exception
//! is `begin_generation`, which refuses to spend an external call without
//! a selected domain.

use std::collections::HashSet;

use thiserror::Error;

use crate::catalog;
use crate::domain::{generate_case_code, ArticleReference, Difficulty, GeneratedCase, LegalDomain};
use crate::editor::CaseDraftEditor;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 5;

/// Typed wizard/session failures, mapped to HTTP statuses at the routes
/// layer. `Display` carries the user-facing Romanian message.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum WizardError {
  #[error("Sesiunea de wizard nu există.")]
  UnknownSession,
  #[error("Domeniul nu este selectat")]
  DomainNotSelected,
  #[error("Generarea este disponibilă doar la ultimul pas (pasul curent: {step}).")]
  NotOnFinalStep { step: u8 },
  #[error("O generare este deja în curs pentru această sesiune.")]
  Busy,
  #[error("Nu există un caz generat pentru această sesiune.")]
  NoDraft,
  #[error("Serviciul de generare nu este configurat.")]
  GeneratorUnavailable,
  #[error("Stocarea cazurilor nu este configurată.")]
  StoreUnavailable,
}

/// Everything the author has picked across the wizard steps. Mutated only
/// through the typed setters below; consumed by the generation call.
#[derive(Clone, Debug)]
pub struct DraftConfiguration {
  pub domain: Option<LegalDomain>,
  pub categories: Vec<String>,
  pub articles: Vec<ArticleReference>,
  pub topic: String,
  pub focus: String,
  pub difficulty: Difficulty,
  pub week: u32,
  pub subcategory: String,
}

impl Default for DraftConfiguration {
  fn default() -> Self {
    Self {
      domain: None,
      categories: Vec::new(),
      articles: Vec::new(),
      topic: String::new(),
      focus: String::new(),
      difficulty: Difficulty::default(),
      week: 1,
      subcategory: String::new(),
    }
  }
}

impl DraftConfiguration {
  /// Selecting a domain clears categories and articles: cross-domain
  /// selections are invalid by construction.
  pub fn select_domain(&mut self, domain: LegalDomain) {
    self.domain = Some(domain);
    self.categories.clear();
    self.articles.clear();
  }

  /// Keep only catalog category ids belonging to the current domain,
  /// deduplicated, in input order. With no domain selected stores empty.
  pub fn set_categories(&mut self, ids: Vec<String>) {
    let domain = match self.domain {
      Some(d) => d,
      None => {
        self.categories = Vec::new();
        return;
      }
    };
    let mut seen = HashSet::new();
    self.categories = ids
      .into_iter()
      .filter(|id| catalog::is_known_category(id, domain))
      .filter(|id| seen.insert(id.clone()))
      .collect();
  }

  /// Build article references for the current domain from raw article
  /// numbers: trimmed, blanks dropped, duplicates dropped (first wins).
  pub fn set_articles(&mut self, numbers: Vec<String>) {
    let domain = match self.domain {
      Some(d) => d,
      None => {
        self.articles = Vec::new();
        return;
      }
    };
    let mut seen = HashSet::new();
    self.articles = numbers
      .into_iter()
      .map(|n| n.trim().to_string())
      .filter(|n| !n.is_empty())
      .filter(|n| seen.insert(n.clone()))
      .map(|number| ArticleReference {
        reference: domain.article_reference(&number),
        number,
        domain,
      })
      .collect();
  }

  pub fn set_context(&mut self, topic: String, focus: String) {
    self.topic = topic;
    self.focus = focus;
  }

  pub fn set_settings(&mut self, difficulty: Difficulty, week: u32, subcategory: String) {
    self.difficulty = difficulty;
    self.week = week;
    self.subcategory = subcategory;
  }
}

/// One author's in-flight authoring cycle.
#[derive(Clone, Debug)]
pub struct WizardSession {
  pub config: DraftConfiguration,
  pub step: u8,
  pub busy: bool,
  pub editor: Option<CaseDraftEditor>,
}

impl WizardSession {
  pub fn new() -> Self {
    Self {
      config: DraftConfiguration::default(),
      step: FIRST_STEP,
      busy: false,
      editor: None,
    }
  }

  /// Move forward one step, clamped at the last step.
  pub fn advance(&mut self) {
    self.step = (self.step + 1).min(LAST_STEP);
  }

  /// Move back one step, clamped at the first step.
  pub fn retreat(&mut self) {
    self.step = self.step.saturating_sub(1).max(FIRST_STEP);
  }

  /// Restore the initial empty configuration, step 1, and drop any draft.
  pub fn reset(&mut self) {
    self.config = DraftConfiguration::default();
    self.step = FIRST_STEP;
    self.busy = false;
    self.editor = None;
  }

  /// Gate a generation attempt: not already running, on the final step,
  /// domain selected. On success the session is marked busy and the
  /// configuration snapshot for the model call is returned.
  pub fn begin_generation(&mut self) -> Result<DraftConfiguration, WizardError> {
    if self.busy {
      return Err(WizardError::Busy);
    }
    if self.step != LAST_STEP {
      return Err(WizardError::NotOnFinalStep { step: self.step });
    }
    if self.config.domain.is_none() {
      return Err(WizardError::DomainNotSelected);
    }
    self.busy = true;
    Ok(self.config.clone())
  }

  /// Install the generated case behind a draft editor, mint the case
  /// code, and clear the busy flag. Replaces any previous draft.
  pub fn complete_generation(&mut self, case: GeneratedCase) {
    self.busy = false;
    let domain = match self.config.domain {
      Some(d) => d,
      // begin_generation refuses to start without a domain.
      None => return,
    };
    let code = generate_case_code(domain, self.config.week);
    self.editor = Some(CaseDraftEditor::new(case, code, self.config.subcategory.clone()));
  }

  /// Clear the busy flag after a failed model call. The session keeps its
  /// configuration so the author can retry.
  pub fn fail_generation(&mut self) {
    self.busy = false;
  }
}
