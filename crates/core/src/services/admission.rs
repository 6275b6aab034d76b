use crate::domain::{
    Admission, AdmissionStatus, AdmissionType, AdmissionUpdate, DeathConfirmation,
    DischargeRequest, NewAdmission,
};
use crate::error::ApiResult;
use crate::repositories::AdmissionRepository;
use crate::services::{reference, required};
use chrono::NaiveDate;
use hms_types::Paginated;
use serde::Serialize;
use std::sync::Arc;

/// Visual classification of a status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl From<AdmissionStatus> for BadgeVariant {
    fn from(status: AdmissionStatus) -> Self {
        match status {
            AdmissionStatus::Admitted => BadgeVariant::Default,
            AdmissionStatus::Discharged => BadgeVariant::Secondary,
            AdmissionStatus::Deceased => BadgeVariant::Destructive,
            AdmissionStatus::Transferred => BadgeVariant::Outline,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdmissionDto {
    pub id: u64,
    pub admission_number: String,
    pub admission_type: AdmissionType,
    pub status: AdmissionStatus,
    pub status_label: &'static str,
    pub status_variant: BadgeVariant,
    pub ward: Option<String>,
    pub bed_number: Option<String>,
    pub patient_id: u64,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub admitted_at: Option<NaiveDate>,
    pub discharged_at: Option<NaiveDate>,
}

/// List row plus the clinical free text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdmissionDetailDto {
    #[serde(flatten)]
    pub summary: AdmissionDto,
    pub diagnosis: Option<String>,
    pub discharge_summary: Option<String>,
    pub death_cause: Option<String>,
}

pub fn to_admission_dto(admission: Admission) -> AdmissionDto {
    to_admission_detail_dto(admission).summary
}

pub fn to_admission_detail_dto(admission: Admission) -> AdmissionDetailDto {
    AdmissionDetailDto {
        summary: AdmissionDto {
            id: admission.id,
            admission_number: admission.admission_number,
            admission_type: admission.admission_type,
            status: admission.status,
            status_label: admission.status.label(),
            status_variant: admission.status.into(),
            ward: admission.ward,
            bed_number: admission.bed_number,
            patient_id: admission.patient_id,
            patient_name: admission.patient_name,
            doctor_name: admission.doctor.map(|d| d.name),
            admitted_at: admission.admitted_at,
            discharged_at: admission.discharged_at,
        },
        diagnosis: admission.diagnosis,
        discharge_summary: admission.discharge_summary,
        death_cause: admission.death_cause,
    }
}

pub struct AdmissionService {
    repo: Arc<dyn AdmissionRepository>,
}

impl AdmissionService {
    pub fn new(repo: Arc<dyn AdmissionRepository>) -> Self {
        Self { repo }
    }

    /// One backend page, metadata untouched.
    pub async fn list(&self, page: u32) -> ApiResult<Paginated<AdmissionDto>> {
        Ok(self.repo.fetch_page(page).await?.map(to_admission_dto))
    }

    pub async fn list_for_patient(&self, patient_id: u64) -> ApiResult<Vec<AdmissionDto>> {
        let admissions = self.repo.fetch_for_patient(patient_id).await?;
        Ok(admissions.into_iter().map(to_admission_dto).collect())
    }

    pub async fn get(&self, id: u64) -> ApiResult<AdmissionDetailDto> {
        Ok(to_admission_detail_dto(self.repo.get_by_id(id).await?))
    }

    pub async fn create(&self, input: &NewAdmission) -> ApiResult<AdmissionDetailDto> {
        reference("patient_id", input.patient_id)?;
        Ok(to_admission_detail_dto(self.repo.create(input).await?))
    }

    pub async fn update(&self, id: u64, input: &AdmissionUpdate) -> ApiResult<AdmissionDetailDto> {
        Ok(to_admission_detail_dto(self.repo.update(id, input).await?))
    }

    pub async fn discharge(
        &self,
        id: u64,
        input: &DischargeRequest,
    ) -> ApiResult<AdmissionDetailDto> {
        Ok(to_admission_detail_dto(self.repo.discharge(id, input).await?))
    }

    pub async fn confirm_death(
        &self,
        id: u64,
        input: &DeathConfirmation,
    ) -> ApiResult<AdmissionDetailDto> {
        required("death_cause", &input.death_cause)?;
        Ok(to_admission_detail_dto(self.repo.confirm_death(id, input).await?))
    }

    /// Only outpatient admissions can be converted; the backend rejects the rest with a 422.
    pub async fn convert_to_inpatient(&self, id: u64) -> ApiResult<AdmissionDetailDto> {
        Ok(to_admission_detail_dto(self.repo.convert_to_inpatient(id).await?))
    }
}
