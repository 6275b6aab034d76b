use crate::domain::Doctor;
use crate::error::ApiResult;
use crate::repositories::DoctorRepository;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoctorDto {
    pub id: u64,
    pub name: String,
    pub specialization: String,
    pub available: bool,
}

impl From<Doctor> for DoctorDto {
    fn from(d: Doctor) -> Self {
        DoctorDto {
            id: d.id,
            name: d.name,
            specialization: d.specialization,
            available: d.available,
        }
    }
}

pub struct DoctorService {
    repo: Arc<dyn DoctorRepository>,
}

impl DoctorService {
    pub fn new(repo: Arc<dyn DoctorRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> ApiResult<Vec<DoctorDto>> {
        let doctors = self.repo.fetch_all().await?;
        Ok(doctors.into_iter().map(DoctorDto::from).collect())
    }

    /// Doctors currently taking patients.
    pub async fn list_available(&self) -> ApiResult<Vec<DoctorDto>> {
        let mut doctors = self.list().await?;
        doctors.retain(|d| d.available);
        Ok(doctors)
    }
}
