use crate::hooks::{Hook, QueryState};
use crate::services::{StaffDirectory, StaffService};
use std::sync::Arc;

pub struct StaffHook {
    service: Arc<StaffService>,
    hook: Hook<StaffDirectory>,
}

impl StaffHook {
    pub fn new(service: Arc<StaffService>) -> Self {
        Self {
            service,
            hook: Hook::new(),
        }
    }

    pub fn state(&self) -> QueryState<StaffDirectory> {
        self.hook.state()
    }

    pub async fn refresh(&self) -> bool {
        self.hook.run(self.service.list_doctors_and_nurses()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StaffRole;
    use crate::services::fakes::{staff, FakeStaff};

    #[tokio::test]
    async fn refresh_fills_directory() {
        let hook = StaffHook::new(Arc::new(StaffService::new(Arc::new(FakeStaff {
            staff: vec![staff(1, StaffRole::Doctor), staff(2, StaffRole::Nurse)],
        }))));
        assert!(hook.refresh().await);
        let directory = hook.state().data.expect("directory");
        assert_eq!((directory.doctors.len(), directory.nurses.len()), (1, 1));
    }
}
