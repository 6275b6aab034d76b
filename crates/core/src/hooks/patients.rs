use crate::hooks::{Hook, QueryState};
use crate::services::{PatientDto, PatientService};
use std::sync::Arc;

/// Patient list with free-text search.
pub struct PatientsHook {
    service: Arc<PatientService>,
    hook: Hook<Vec<PatientDto>>,
}

impl PatientsHook {
    pub fn new(service: Arc<PatientService>) -> Self {
        Self {
            service,
            hook: Hook::new(),
        }
    }

    pub fn state(&self) -> QueryState<Vec<PatientDto>> {
        self.hook.state()
    }

    pub async fn refresh(&self) -> bool {
        self.hook.run(self.service.list()).await
    }

    /// Every keystroke may issue a search; only the latest one lands.
    pub async fn search(&self, query: &str) -> bool {
        self.hook.run(self.service.search(query)).await
    }
}
