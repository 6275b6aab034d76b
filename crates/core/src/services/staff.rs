use crate::domain::{Staff, StaffRole};
use crate::error::ApiResult;
use crate::repositories::StaffRepository;
use crate::services::SelectOption;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaffDto {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
}

impl From<Staff> for StaffDto {
    fn from(staff: Staff) -> Self {
        StaffDto {
            id: staff.id,
            name: staff.name,
            email: staff.email,
            role: staff.role,
        }
    }
}

/// Doctors and nurses fetched together for assignment pickers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StaffDirectory {
    pub doctors: Vec<StaffDto>,
    pub nurses: Vec<StaffDto>,
}

impl StaffDirectory {
    pub fn doctor_options(&self) -> Vec<SelectOption> {
        staff_options(&self.doctors)
    }

    pub fn nurse_options(&self) -> Vec<SelectOption> {
        staff_options(&self.nurses)
    }
}

pub fn staff_options(staff: &[StaffDto]) -> Vec<SelectOption> {
    staff
        .iter()
        .map(|s| SelectOption::new(s.id.to_string(), s.name.clone()))
        .collect()
}

fn project(staff: Vec<Staff>) -> Vec<StaffDto> {
    staff.into_iter().map(StaffDto::from).collect()
}

pub struct StaffService {
    repo: Arc<dyn StaffRepository>,
}

impl StaffService {
    pub fn new(repo: Arc<dyn StaffRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> ApiResult<Vec<StaffDto>> {
        Ok(project(self.repo.fetch_all().await?))
    }

    pub async fn list_by_role(&self, role: StaffRole) -> ApiResult<Vec<StaffDto>> {
        Ok(project(self.repo.fetch_by_role(role).await?))
    }

    pub async fn get(&self, id: u64) -> ApiResult<StaffDto> {
        Ok(self.repo.get_by_id(id).await?.into())
    }

    /// Issues both role queries at once; either failure fails the whole call.
    pub async fn list_doctors_and_nurses(&self) -> ApiResult<StaffDirectory> {
        let (doctors, nurses) = tokio::join!(
            self.repo.fetch_by_role(StaffRole::Doctor),
            self.repo.fetch_by_role(StaffRole::Nurse),
        );
        Ok(StaffDirectory {
            doctors: project(doctors?),
            nurses: project(nurses?),
        })
    }
}
