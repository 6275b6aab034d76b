use crate::domain::{
    NewTreatment, Treatment, TreatmentOutcome, TreatmentType, TreatmentUpdate,
};
use crate::error::ApiResult;
use crate::repositories::TreatmentRepository;
use crate::services::{reference, required};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Treatment row for lists. Clinical text stays out of lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreatmentListDto {
    pub id: u64,
    pub patient_id: u64,
    pub admission_id: u64,
    pub treatment_type: TreatmentType,
    pub type_label: &'static str,
    pub name: String,
    pub outcome: TreatmentOutcome,
    pub doctor_name: Option<String>,
    pub nurse_name: Option<String>,
    pub treatment_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreatmentDetailDto {
    #[serde(flatten)]
    pub summary: TreatmentListDto,
    pub notes: Option<String>,
    pub medications: Option<String>,
    pub dosage: Option<String>,
    pub findings: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn to_treatment_detail_dto(treatment: Treatment) -> TreatmentDetailDto {
    TreatmentDetailDto {
        summary: TreatmentListDto {
            id: treatment.id,
            patient_id: treatment.patient_id,
            admission_id: treatment.admission_id,
            treatment_type: treatment.treatment_type,
            type_label: treatment.treatment_type.label(),
            name: treatment.name,
            outcome: treatment.outcome,
            doctor_name: treatment.doctor.map(|d| d.name),
            nurse_name: treatment.nurse.map(|n| n.name),
            treatment_date: treatment.treatment_date,
        },
        notes: treatment.notes,
        medications: treatment.medications,
        dosage: treatment.dosage,
        findings: treatment.findings,
        created_at: treatment.created_at,
        updated_at: treatment.updated_at,
    }
}

pub fn to_treatment_list_dto(treatment: Treatment) -> TreatmentListDto {
    to_treatment_detail_dto(treatment).summary
}

pub struct TreatmentService {
    repo: Arc<dyn TreatmentRepository>,
}

impl TreatmentService {
    pub fn new(repo: Arc<dyn TreatmentRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, patient_id: u64, admission_id: u64) -> ApiResult<Vec<TreatmentListDto>> {
        let treatments = self.repo.fetch_for_admission(patient_id, admission_id).await?;
        Ok(treatments.into_iter().map(to_treatment_list_dto).collect())
    }

    pub async fn get(
        &self,
        patient_id: u64,
        admission_id: u64,
        id: u64,
    ) -> ApiResult<TreatmentDetailDto> {
        let treatment = self.repo.get_by_id(patient_id, admission_id, id).await?;
        Ok(to_treatment_detail_dto(treatment))
    }

    pub async fn create(
        &self,
        patient_id: u64,
        admission_id: u64,
        input: &NewTreatment,
    ) -> ApiResult<TreatmentDetailDto> {
        reference("patient_id", patient_id)?;
        reference("admission_id", admission_id)?;
        required("name", &input.name)?;
        let treatment = self.repo.create(patient_id, admission_id, input).await?;
        Ok(to_treatment_detail_dto(treatment))
    }

    pub async fn update(
        &self,
        patient_id: u64,
        admission_id: u64,
        id: u64,
        input: &TreatmentUpdate,
    ) -> ApiResult<TreatmentDetailDto> {
        if let Some(name) = &input.name {
            required("name", name)?;
        }
        let treatment = self.repo.update(patient_id, admission_id, id, input).await?;
        Ok(to_treatment_detail_dto(treatment))
    }
}
