//! Treatment repository, scoped under `/patients/{patient}/admissions/{admission}/treatments`.

use crate::domain::{
    NewTreatment, StaffRef, Treatment, TreatmentOutcome, TreatmentType, TreatmentUpdate,
};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{lenient_date, ErrorMessages, Envelope};
use crate::repositories::TreatmentRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

const READ_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("You do not have permission to view treatments for this admission.")
    .not_found("Treatment not found.");

const WRITE_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("Only doctors and nurses can record treatments.")
    .not_found("The admission for this treatment no longer exists.")
    .validation("Please check the treatment details and try again.");

#[derive(Debug, Deserialize)]
struct TreatmentWire {
    id: u64,
    #[serde(default)]
    admission_id: Option<u64>,
    #[serde(default)]
    patient_id: Option<u64>,
    treatment_type: TreatmentType,
    #[serde(alias = "treatment_name")]
    name: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    medications: Option<String>,
    #[serde(default)]
    dosage: Option<String>,
    #[serde(default, alias = "results")]
    findings: Option<String>,
    #[serde(default)]
    outcome: Option<TreatmentOutcome>,
    #[serde(default)]
    doctor: Option<StaffRef>,
    #[serde(default)]
    nurse: Option<StaffRef>,
    #[serde(default, deserialize_with = "lenient_date")]
    treatment_date: Option<NaiveDate>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl TreatmentWire {
    /// The route identifies patient and admission, so absent wire ids are filled from it.
    fn into_domain(self, patient_id: u64, admission_id: u64) -> Treatment {
        Treatment {
            id: self.id,
            admission_id: self.admission_id.filter(|id| *id != 0).unwrap_or(admission_id),
            patient_id: self.patient_id.filter(|id| *id != 0).unwrap_or(patient_id),
            treatment_type: self.treatment_type,
            name: self.name,
            notes: self.notes,
            medications: self.medications,
            dosage: self.dosage,
            findings: self.findings,
            outcome: self.outcome.unwrap_or(TreatmentOutcome::Pending),
            doctor: self.doctor,
            nurse: self.nurse,
            treatment_date: self.treatment_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub struct HttpTreatmentRepository {
    client: Arc<ApiClient>,
}

impl HttpTreatmentRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn collection_path(patient_id: u64, admission_id: u64) -> String {
    format!("patients/{patient_id}/admissions/{admission_id}/treatments")
}

#[async_trait]
impl TreatmentRepository for HttpTreatmentRepository {
    async fn fetch_for_admission(
        &self,
        patient_id: u64,
        admission_id: u64,
    ) -> ApiResult<Vec<Treatment>> {
        let wires: Envelope<Vec<TreatmentWire>> = self
            .client
            .get(&collection_path(patient_id, admission_id))
            .await
            .map_err(|e| READ_ERRORS.apply(e))?;
        Ok(wires
            .into_inner()
            .into_iter()
            .map(|w| w.into_domain(patient_id, admission_id))
            .collect())
    }

    async fn get_by_id(
        &self,
        patient_id: u64,
        admission_id: u64,
        id: u64,
    ) -> ApiResult<Treatment> {
        let path = format!("{}/{id}", collection_path(patient_id, admission_id));
        let wire: Envelope<TreatmentWire> =
            self.client.get(&path).await.map_err(|e| READ_ERRORS.apply(e))?;
        Ok(wire.into_inner().into_domain(patient_id, admission_id))
    }

    async fn create(
        &self,
        patient_id: u64,
        admission_id: u64,
        input: &NewTreatment,
    ) -> ApiResult<Treatment> {
        let wire: Envelope<TreatmentWire> = self
            .client
            .post(&collection_path(patient_id, admission_id), input)
            .await
            .map_err(|e| WRITE_ERRORS.apply(e))?;
        Ok(wire.into_inner().into_domain(patient_id, admission_id))
    }

    async fn update(
        &self,
        patient_id: u64,
        admission_id: u64,
        id: u64,
        input: &TreatmentUpdate,
    ) -> ApiResult<Treatment> {
        let path = format!("{}/{id}", collection_path(patient_id, admission_id));
        let wire: Envelope<TreatmentWire> = self
            .client
            .patch(&path, input)
            .await
            .map_err(|e| WRITE_ERRORS.apply(e))?;
        Ok(wire.into_inner().into_domain(patient_id, admission_id))
    }
}
