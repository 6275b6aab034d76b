use crate::hooks::{Hook, QueryState};
use crate::services::{AdmissionDto, AdmissionService};
use hms_types::Paginated;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// One page of admissions at a time.
pub struct AdmissionsHook {
    service: Arc<AdmissionService>,
    hook: Hook<Paginated<AdmissionDto>>,
    page: AtomicU32,
}

impl AdmissionsHook {
    pub fn new(service: Arc<AdmissionService>) -> Self {
        Self {
            service,
            hook: Hook::new(),
            page: AtomicU32::new(1),
        }
    }

    pub fn state(&self) -> QueryState<Paginated<AdmissionDto>> {
        self.hook.state()
    }

    pub fn page(&self) -> u32 {
        self.page.load(Ordering::SeqCst)
    }

    pub async fn load_page(&self, page: u32) -> bool {
        let page = page.max(1);
        self.page.store(page, Ordering::SeqCst);
        self.hook.run(self.service.list(page)).await
    }

    pub async fn refresh(&self) -> bool {
        self.load_page(self.page()).await
    }

    /// Advances when the last loaded page says there is another one.
    pub async fn next_page(&self) -> bool {
        let has_next = self
            .state()
            .data
            .is_some_and(|page| page.has_next_page());
        if !has_next {
            return false;
        }
        self.load_page(self.page() + 1).await
    }
}
