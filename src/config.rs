//! Loading case-generator configuration (prompt templates) from TOML.
//!
//! See `CasegenConfig` and `Prompts` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CasegenConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts used by the generation client. Defaults carry the canonical
/// Romanian templates; override in TOML to tune tone/structure.
///
/// Placeholders filled by `util::fill_template`:
/// - generation: {domain} {categories} {articles} {difficulty} {week}
///   {context} {focus}
/// - classification: {categories} {subcategories} {title} {legal_problem}
///   {case_description}
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub generation_system: String,
  pub generation_user_template: String,
  pub classification_system: String,
  pub classification_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      generation_system: "Ești un expert juridic român specializat în generarea de cazuri practice pentru studenții la drept.".into(),
      generation_user_template: r#"DOMENIU: {domain}
CATEGORII: {categories}
ARTICOLE: {articles}
NIVEL DIFICULTATE: {difficulty}
SĂPTĂMÂNĂ: {week}

CONTEXT:
{context}

FOCUS SPECIFIC:
{focus}

Generează un caz juridic complet în limba română cu următoarele secțiuni:

1. TITLU (10-15 cuvinte, descriptiv și captivant)

2. PROBLEMA JURIDICĂ (2-3 propoziții care rezumă esența problemei juridice)

3. DESCRIEREA CAZULUI (Speta completă):
   - 250-400 de cuvinte
   - Nume românești realiste, locații, date
   - Fapte clare care angajează articolele specificate
   - Include detalii relevante pentru nivelul de dificultate {difficulty}
   - Scris în limbaj juridic formal românesc
   - Folosește contextul specific: {context}

4. ÎNTREBARE (Întrebare juridică specifică care necesită analiza articolelor)

5. PAȘI DE ANALIZĂ (3-6 pași numerotați):
   - Progresie logică pentru rezolvarea cazului
   - Referințe la articole specifice
   - Complexitate potrivită pentru nivelul {difficulty}

6. INDICII (2-4 indicii progresive):
   - Începe general, devino mai specific
   - Ghidează fără a da răspunsul complet
   - Referințe la principii juridice relevante

IMPORTANT:
- Folosește doar articolele menționate: {articles}
- Respectă nivelul de dificultate: {difficulty}
- Fie coerent cu categoriile: {categories}
- Fie creativ dar realist
- Folosește limbaj juridic corect

Răspunde DOAR cu un obiect JSON valid în acest format exact:
{
  "title": "...",
  "legal_problem": "...",
  "case_description": "...",
  "question": "...",
  "analysis_steps": [
    {"step_number": 1, "description": "..."},
    {"step_number": 2, "description": "..."}
  ],
  "hints": [
    {"hint_number": 1, "text": "..."},
    {"hint_number": 2, "text": "..."}
  ]
}"#.into(),
      classification_system: "Ești un expert juridic român. Analizează următorul caz juridic și clasifică-l în categoriile și subcategoriile potrivite.".into(),
      classification_user_template: r#"CATEGORII DISPONIBILE (civil):
{categories}

SUBCATEGORII DISPONIBILE (civil):
{subcategories}

CAZUL DE ANALIZAT:
Titlu: {title}
Problema juridică: {legal_problem}
Descriere: {case_description}

Analizează cazul și răspunde DOAR cu un obiect JSON în acest format exact:
{
  "category": "ID-ul categoriei potrivite (ex: civil_persons)",
  "subcategory": "Subcategoria potrivită din listă sau null"
}"#.into(),
    }
  }
}

/// Attempt to load `CasegenConfig` from CASEGEN_CONFIG_PATH. On any
/// parsing/IO error, returns None and the caller falls back to defaults.
pub fn load_casegen_config_from_env() -> Option<CasegenConfig> {
  let path = std::env::var("CASEGEN_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<CasegenConfig>(&s) {
      Ok(cfg) => {
        info!(target: "speta_backend", %path, "Loaded casegen config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "speta_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "speta_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
