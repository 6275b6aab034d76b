//! Admission repository.
//!
//! Admissions are listed globally with pagination (`/admissions?page=N`) or per patient
//! (`/patients/{id}/admissions`). Lifecycle transitions are action endpoints that return the
//! updated admission.

use crate::domain::{
    Admission, AdmissionStatus, AdmissionType, AdmissionUpdate, DeathConfirmation,
    DischargeRequest, NewAdmission, StaffRef,
};
use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::repositories::helpers::{lenient_date, malformed, Envelope};
use crate::repositories::AdmissionRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use hms_types::Paginated;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct PatientSummaryWire {
    id: u64,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdmissionWire {
    id: u64,
    admission_number: String,
    admission_type: AdmissionType,
    status: AdmissionStatus,
    #[serde(default)]
    ward: Option<String>,
    #[serde(default, alias = "bed")]
    bed_number: Option<String>,
    #[serde(default)]
    patient_id: Option<u64>,
    #[serde(default)]
    patient: Option<PatientSummaryWire>,
    #[serde(default)]
    doctor: Option<StaffRef>,
    #[serde(default, alias = "admission_date", deserialize_with = "lenient_date")]
    admitted_at: Option<NaiveDate>,
    #[serde(default, alias = "discharge_date", deserialize_with = "lenient_date")]
    discharged_at: Option<NaiveDate>,
    #[serde(default)]
    diagnosis: Option<String>,
    #[serde(default)]
    discharge_summary: Option<String>,
    #[serde(default, alias = "cause_of_death")]
    death_cause: Option<String>,
}

impl AdmissionWire {
    /// Every admission must reference a patient, either flat or nested.
    fn into_domain(self) -> ApiResult<Admission> {
        let nested_id = self.patient.as_ref().map(|p| p.id);
        let patient_id = self
            .patient_id
            .or(nested_id)
            .filter(|id| *id != 0)
            .ok_or_else(|| malformed(format!("admission {} has no patient", self.id)))?;

        Ok(Admission {
            id: self.id,
            admission_number: self.admission_number,
            admission_type: self.admission_type,
            status: self.status,
            ward: self.ward,
            bed_number: self.bed_number,
            patient_id,
            patient_name: self.patient.and_then(|p| p.name),
            doctor: self.doctor,
            admitted_at: self.admitted_at,
            discharged_at: self.discharged_at,
            diagnosis: self.diagnosis,
            discharge_summary: self.discharge_summary,
            death_cause: self.death_cause,
        })
    }
}

fn collect(wires: Vec<AdmissionWire>) -> ApiResult<Vec<Admission>> {
    wires.into_iter().map(AdmissionWire::into_domain).collect()
}

pub struct HttpAdmissionRepository {
    client: Arc<ApiClient>,
}

impl HttpAdmissionRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn action<B>(&self, id: u64, action: &str, body: Option<&B>) -> ApiResult<Admission>
    where
        B: serde::Serialize + Sync,
    {
        let path = format!("admissions/{id}/{action}");
        let wire: Envelope<AdmissionWire> = match body {
            Some(body) => self.client.post(&path, body).await?,
            None => self.client.post_empty(&path).await?,
        };
        wire.into_inner().into_domain()
    }
}

#[async_trait]
impl AdmissionRepository for HttpAdmissionRepository {
    async fn fetch_page(&self, page: u32) -> ApiResult<Paginated<Admission>> {
        let wire: Paginated<AdmissionWire> = self
            .client
            .get_with_query("admissions", &[("page", page.max(1).to_string())])
            .await?;
        let Paginated {
            data,
            current_page,
            last_page,
            per_page,
            total,
        } = wire;
        Ok(Paginated {
            data: collect(data)?,
            current_page,
            last_page,
            per_page,
            total,
        })
    }

    async fn fetch_for_patient(&self, patient_id: u64) -> ApiResult<Vec<Admission>> {
        let wires: Envelope<Vec<AdmissionWire>> = self
            .client
            .get(&format!("patients/{patient_id}/admissions"))
            .await?;
        collect(wires.into_inner())
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<Admission> {
        let wire: Envelope<AdmissionWire> = self.client.get(&format!("admissions/{id}")).await?;
        wire.into_inner().into_domain()
    }

    async fn create(&self, input: &NewAdmission) -> ApiResult<Admission> {
        if input.patient_id == 0 {
            return Err(ApiError::invalid_input(
                "patient_id",
                "An admission must reference a patient.",
            ));
        }
        let wire: Envelope<AdmissionWire> = self
            .client
            .post(&format!("patients/{}/admissions", input.patient_id), input)
            .await?;
        wire.into_inner().into_domain()
    }

    async fn update(&self, id: u64, input: &AdmissionUpdate) -> ApiResult<Admission> {
        let wire: Envelope<AdmissionWire> = self
            .client
            .patch(&format!("admissions/{id}"), input)
            .await?;
        wire.into_inner().into_domain()
    }

    async fn discharge(&self, id: u64, input: &DischargeRequest) -> ApiResult<Admission> {
        self.action(id, "discharge", Some(input)).await
    }

    async fn confirm_death(&self, id: u64, input: &DeathConfirmation) -> ApiResult<Admission> {
        self.action(id, "confirm-death", Some(input)).await
    }

    async fn convert_to_inpatient(&self, id: u64) -> ApiResult<Admission> {
        self.action::<()>(id, "convert-to-inpatient", None).await
    }
}
