//! Application state: wizard sessions, prompts, and the optional external
//! clients (generation endpoint, case store).
//!
//! Sessions live in one in-memory map behind an async RwLock. Each session
//! runs a single-flight authoring cycle, so lock contention is negligible;
//! the map exists to let several authors work independently.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_casegen_config_from_env, Prompts};
use crate::generator::GenerationClient;
use crate::store::{CaseStore, RestStore};
use crate::wizard::{WizardError, WizardSession};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, WizardSession>>>,
    pub generator: Option<GenerationClient>,
    pub store: Option<Arc<dyn CaseStore>>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load prompt config, init the optional clients.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        // Load TOML config if provided (prompt overrides).
        let cfg_opt = load_casegen_config_from_env();
        let prompts = cfg_opt.map(|c| c.prompts).unwrap_or_default();

        let generator = GenerationClient::from_env();
        if let Some(g) = &generator {
            info!(target: "speta_backend", base_url = %g.base_url, fast_model = %g.fast_model, strong_model = %g.strong_model, "Generation endpoint enabled.");
        } else {
            info!(target: "speta_backend", "Generation disabled (no OPENAI_API_KEY). Generate/classify will answer 503.");
        }

        let store: Option<Arc<dyn CaseStore>> = match RestStore::from_env() {
            Some(s) => {
                info!(target: "speta_backend", "Case store enabled.");
                Some(Arc::new(s))
            }
            None => {
                info!(target: "speta_backend", "Case store disabled (no STORE_URL/STORE_SERVICE_KEY). Saving will answer 503.");
                None
            }
        };

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            generator,
            store,
            prompts,
        }
    }

    /// State with no external clients and default prompts (tests).
    #[cfg(test)]
    pub fn detached() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            generator: None,
            store: None,
            prompts: Prompts::default(),
        }
    }

    /// Create a fresh wizard session and return its id plus a snapshot.
    #[instrument(level = "info", skip(self))]
    pub async fn create_session(&self) -> (Uuid, WizardSession) {
        let id = Uuid::new_v4();
        let session = WizardSession::new();
        self.sessions.write().await.insert(id, session.clone());
        info!(target: "case", session_id = %id, "Wizard session created");
        (id, session)
    }

    /// Read-only snapshot of a session.
    #[instrument(level = "debug", skip(self), fields(session_id = %id))]
    pub async fn get_session(&self, id: Uuid) -> Result<WizardSession, WizardError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(WizardError::UnknownSession)
    }

    /// Apply a mutation to a session under the write lock; returns the
    /// closure's output plus the updated snapshot.
    #[instrument(level = "debug", skip(self, f), fields(session_id = %id))]
    pub async fn update_session<F, T>(
        &self,
        id: Uuid,
        f: F,
    ) -> Result<(T, WizardSession), WizardError>
    where
        F: FnOnce(&mut WizardSession) -> T,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(WizardError::UnknownSession)?;
        let out = f(session);
        Ok((out, session.clone()))
    }
}
