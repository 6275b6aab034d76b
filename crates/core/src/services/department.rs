use crate::domain::Department;
use crate::error::ApiResult;
use crate::repositories::DepartmentRepository;
use crate::services::SelectOption;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepartmentDto {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Department> for DepartmentDto {
    fn from(d: Department) -> Self {
        DepartmentDto {
            id: d.id,
            name: d.name,
            description: d.description,
        }
    }
}

/// Departments are selected by name, which is what patient records store.
pub fn department_options(departments: &[DepartmentDto]) -> Vec<SelectOption> {
    departments
        .iter()
        .map(|d| SelectOption::new(d.name.clone(), d.name.clone()))
        .collect()
}

pub struct DepartmentService {
    repo: Arc<dyn DepartmentRepository>,
}

impl DepartmentService {
    pub fn new(repo: Arc<dyn DepartmentRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> ApiResult<Vec<DepartmentDto>> {
        let departments = self.repo.fetch_all().await?;
        Ok(departments.into_iter().map(DepartmentDto::from).collect())
    }

    pub async fn options(&self) -> ApiResult<Vec<SelectOption>> {
        Ok(department_options(&self.list().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeDepartments;

    #[tokio::test]
    async fn options_use_department_names() {
        let svc = DepartmentService::new(Arc::new(FakeDepartments {
            departments: vec![Department {
                id: 3,
                name: "Cardiology".into(),
                description: None,
            }],
        }));
        assert_eq!(
            svc.options().await.expect("options"),
            vec![SelectOption::new("Cardiology", "Cardiology")]
        );
    }
}
