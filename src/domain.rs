//! Domain models used by the backend: legal domains, difficulty levels,
//! article references, and the generated-case draft structures.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Legal domain a case belongs to. Closed set; everything downstream
/// (categories, article formatting, case codes) is keyed on it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LegalDomain {
  Civil,
  Penal,
  Constitutional,
}

impl LegalDomain {
  pub const ALL: [LegalDomain; 3] = [
    LegalDomain::Civil,
    LegalDomain::Penal,
    LegalDomain::Constitutional,
  ];

  /// Human-readable Romanian name, used in prompts and catalog listings.
  pub fn display_name(&self) -> &'static str {
    match self {
      LegalDomain::Civil => "Drept Civil",
      LegalDomain::Penal => "Drept Penal",
      LegalDomain::Constitutional => "Drept Constituțional",
    }
  }

  /// Three-letter prefix used when minting case codes.
  pub fn code_prefix(&self) -> &'static str {
    match self {
      LegalDomain::Civil => "CIV",
      LegalDomain::Penal => "PEN",
      LegalDomain::Constitutional => "CON",
    }
  }

  /// Citation form for an article number in this domain.
  pub fn article_reference(&self, number: &str) -> String {
    match self {
      LegalDomain::Civil => format!("Art. {} C.civ.", number),
      LegalDomain::Penal => format!("Art. {} C.pen.", number),
      LegalDomain::Constitutional => format!("Art. {} Const.", number),
    }
  }

  /// Domains where a saved case must carry a non-blank subcategory.
  pub fn requires_subcategory(&self) -> bool {
    matches!(self, LegalDomain::Civil)
  }
}

/// Difficulty level of a case. Stored lowercase on the wire, labelled
/// in Romanian when persisted or rendered into prompts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Usor,
  Mediu,
  Dificil,
}

impl Default for Difficulty {
  fn default() -> Self { Difficulty::Mediu }
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Usor, Difficulty::Mediu, Difficulty::Dificil];

  /// Display label, also the normalized `level` value written to the store.
  pub fn label(&self) -> &'static str {
    match self {
      Difficulty::Usor => "Ușor",
      Difficulty::Mediu => "Mediu",
      Difficulty::Dificil => "Dificil",
    }
  }
}

/// One statutory article picked during the wizard, kept with its
/// pre-formatted citation so prompts and persisted rows agree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArticleReference {
  pub number: String,
  pub reference: String,
  pub domain: LegalDomain,
}

/// One numbered analysis step of a draft.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisStep {
  pub step_number: u32,
  pub description: String,
}

/// One numbered hint of a draft.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hint {
  pub hint_number: u32,
  pub text: String,
}

/// The model-generated case as parsed from the completion response.
/// The step/hint numbering invariant (dense 1..len, matching list order)
/// is maintained by the draft editor after every structural mutation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratedCase {
  pub title: String,
  pub legal_problem: String,
  pub case_description: String,
  pub question: String,
  pub analysis_steps: Vec<AnalysisStep>,
  pub hints: Vec<Hint>,
}

/// Everything the persistence saga needs to write one case with its
/// article/step/hint children.
#[derive(Clone, Debug)]
pub struct CaseToSave {
  pub case_code: String,
  pub title: String,
  pub level: Difficulty,
  pub week_number: u32,
  pub legal_problem: String,
  pub case_description: String,
  pub question: String,
  pub category: Option<String>,
  pub subcategory: Option<String>,
  pub articles: Vec<ArticleReference>,
  pub analysis_steps: Vec<AnalysisStep>,
  pub hints: Vec<Hint>,
}

/// Mint a human-readable case code: domain prefix + week number + three
/// random uppercase letters, e.g. "CIV1QRT". Uniqueness is not checked
/// here; the store's unique constraint on case_code is the arbiter.
pub fn generate_case_code(domain: LegalDomain, week: u32) -> String {
  let mut rng = rand::thread_rng();
  let suffix: String = (0..3)
    .map(|_| (b'A' + rng.gen_range(0..26u8)) as char)
    .collect();
  format!("{}{}{}", domain.code_prefix(), week, suffix)
}
