//! Shared state for the web layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::backend::BackendClient;
use crate::config::PortalConfig;
use crate::models::ClinicSummary;
use crate::session::Session;
use crate::shell::SessionState;

// ═══════════════════════════════════════════════════════════
// Portal context: shared state for router and middleware
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes and middleware: configuration, the
/// backend client, and the in-process clinic-selection store.
#[derive(Clone)]
pub struct PortalContext {
    pub config: Arc<PortalConfig>,
    pub backend: Arc<BackendClient>,
    pub clinics: Arc<Mutex<ClinicSelections>>,
}

impl PortalContext {
    pub fn new(config: PortalConfig) -> Self {
        let backend = BackendClient::from_config(&config);
        Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
            clinics: Arc::new(Mutex::new(ClinicSelections::new())),
        }
    }

    /// Resolve the session user and their active clinic. A failed
    /// profile fetch degrades the request instead of failing it; the
    /// caller decides how to render that.
    pub async fn resolve_session(&self, session: &Session) -> SessionState {
        match self
            .backend
            .fetch_user(session.user_id(), &session.token)
            .await
        {
            Ok(profile) => {
                let clinic = self
                    .clinics
                    .lock()
                    .ok()
                    .and_then(|mut store| store.resolve(session.user_id(), &profile.clinics));
                SessionState::Authenticated { profile, clinic }
            }
            Err(error) => SessionState::Degraded { error },
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Clinic selections: per-user active clinic
// ═══════════════════════════════════════════════════════════

/// Per-user clinic selection, user id → clinic. Selections live for the
/// server's lifetime; nothing is persisted across restarts.
pub struct ClinicSelections {
    selections: HashMap<i64, ClinicSummary>,
}

impl ClinicSelections {
    pub fn new() -> Self {
        Self {
            selections: HashMap::new(),
        }
    }

    /// Overwrite the stored selection for a user.
    pub fn select(&mut self, user_id: i64, clinic: ClinicSummary) {
        self.selections.insert(user_id, clinic);
    }

    pub fn selected(&self, user_id: i64) -> Option<ClinicSummary> {
        self.selections.get(&user_id).cloned()
    }

    /// Stored selection, or default to the profile's first clinic and
    /// store that. `None` for a profile that lists no clinics.
    pub fn resolve(
        &mut self,
        user_id: i64,
        available: &[ClinicSummary],
    ) -> Option<ClinicSummary> {
        if let Some(clinic) = self.selections.get(&user_id) {
            return Some(clinic.clone());
        }
        let first = available.first()?.clone();
        self.selections.insert(user_id, first.clone());
        Some(first)
    }
}

impl Default for ClinicSelections {
    fn default() -> Self {
        Self::new()
    }
}
