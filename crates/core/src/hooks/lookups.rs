use crate::domain::WardCatalog;
use crate::hooks::{Hook, QueryState};
use crate::services::department::department_options;
use crate::services::ward::{room_options, ward_options};
use crate::services::{DepartmentDto, DepartmentService, SelectOption, WardService};
use std::sync::Arc;

pub struct WardsHook {
    service: Arc<WardService>,
    hook: Hook<WardCatalog>,
}

impl WardsHook {
    pub fn new(service: Arc<WardService>) -> Self {
        Self {
            service,
            hook: Hook::new(),
        }
    }

    pub fn state(&self) -> QueryState<WardCatalog> {
        self.hook.state()
    }

    pub async fn refresh(&self) -> bool {
        self.hook.run(self.service.catalog()).await
    }

    /// Empty until the catalog has loaded.
    pub fn ward_options(&self) -> Vec<SelectOption> {
        self.state()
            .data
            .map(|catalog| ward_options(&catalog))
            .unwrap_or_default()
    }

    pub fn room_options(&self, ward: &str) -> Vec<SelectOption> {
        self.state()
            .data
            .map(|catalog| room_options(&catalog, ward))
            .unwrap_or_default()
    }
}

pub struct DepartmentsHook {
    service: Arc<DepartmentService>,
    hook: Hook<Vec<DepartmentDto>>,
}

impl DepartmentsHook {
    pub fn new(service: Arc<DepartmentService>) -> Self {
        Self {
            service,
            hook: Hook::new(),
        }
    }

    pub fn state(&self) -> QueryState<Vec<DepartmentDto>> {
        self.hook.state()
    }

    pub async fn refresh(&self) -> bool {
        self.hook.run(self.service.list()).await
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.state()
            .data
            .map(|departments| department_options(&departments))
            .unwrap_or_default()
    }
}
