use crate::hooks::{Hook, QueryState};
use crate::services::{TreatmentListDto, TreatmentService};
use std::sync::Arc;

/// Treatments of one admission.
pub struct TreatmentsHook {
    service: Arc<TreatmentService>,
    patient_id: u64,
    admission_id: u64,
    hook: Hook<Vec<TreatmentListDto>>,
}

impl TreatmentsHook {
    pub fn new(service: Arc<TreatmentService>, patient_id: u64, admission_id: u64) -> Self {
        Self {
            service,
            patient_id,
            admission_id,
            hook: Hook::new(),
        }
    }

    pub fn state(&self) -> QueryState<Vec<TreatmentListDto>> {
        self.hook.state()
    }

    pub async fn refresh(&self) -> bool {
        self.hook
            .run(self.service.list(self.patient_id, self.admission_id))
            .await
    }
}
