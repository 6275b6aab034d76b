//! Patient repository over `/patients`.

use crate::config::FallbackPolicy;
use crate::domain::{Gender, NewPatient, Patient, PatientStatus, PatientUpdate, StaffRef};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{lenient_date, or_sample_data, Envelope};
use crate::repositories::PatientRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// Wire representation of a patient.
#[derive(Debug, Deserialize)]
struct PatientWire {
    id: u64,
    #[serde(alias = "full_name")]
    name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    gender: Option<Gender>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    status: Option<PatientStatus>,
    #[serde(default, alias = "attending_doctor")]
    doctor: Option<StaffRef>,
    #[serde(default)]
    last_visit: Option<DateTime<Utc>>,
    #[serde(default)]
    nrc_number: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    blood_type: Option<String>,
}

impl From<PatientWire> for Patient {
    fn from(wire: PatientWire) -> Self {
        Patient {
            id: wire.id,
            name: wire.name,
            date_of_birth: wire.date_of_birth,
            gender: wire.gender,
            department: wire.department,
            // Records created before statuses existed are outpatients.
            status: wire.status.unwrap_or(PatientStatus::Outpatient),
            doctor: wire.doctor,
            last_visit: wire.last_visit,
            nrc_number: wire.nrc_number.filter(|s| !s.is_empty()),
            address: wire.address.filter(|s| !s.is_empty()),
            phone: wire.phone,
            blood_type: wire.blood_type,
        }
    }
}

pub struct HttpPatientRepository {
    client: Arc<ApiClient>,
    fallback: FallbackPolicy,
}

impl HttpPatientRepository {
    pub fn new(client: Arc<ApiClient>, fallback: FallbackPolicy) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl PatientRepository for HttpPatientRepository {
    async fn fetch_all(&self) -> ApiResult<Vec<Patient>> {
        let result = self
            .client
            .get::<Envelope<Vec<PatientWire>>>("patients")
            .await
            .map(|env| env.into_inner().into_iter().map(Patient::from).collect());
        or_sample_data(result, self.fallback, "patients", sample_patients)
    }

    async fn search(&self, query: &str) -> ApiResult<Vec<Patient>> {
        let wires: Envelope<Vec<PatientWire>> = self
            .client
            .get_with_query("patients", &[("search", query.to_string())])
            .await?;
        Ok(wires.into_inner().into_iter().map(Patient::from).collect())
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<Patient> {
        let wire: Envelope<PatientWire> = self.client.get(&format!("patients/{id}")).await?;
        Ok(wire.into_inner().into())
    }

    async fn create(&self, input: &NewPatient) -> ApiResult<Patient> {
        let wire: Envelope<PatientWire> = self.client.post("patients", input).await?;
        Ok(wire.into_inner().into())
    }

    async fn update(&self, id: u64, input: &PatientUpdate) -> ApiResult<Patient> {
        let wire: Envelope<PatientWire> =
            self.client.patch(&format!("patients/{id}"), input).await?;
        Ok(wire.into_inner().into())
    }
}

/// Fixed demo dataset served when the backend is unreachable and sample data is enabled.
pub fn sample_patients() -> Vec<Patient> {
    let visit = |d: u32| Utc.with_ymd_and_hms(2026, 1, d, 9, 30, 0).single();
    let dob = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d);
    let doctor = |id: u64, name: &str| {
        Some(StaffRef {
            id,
            name: name.to_string(),
            email: None,
        })
    };

    vec![
        Patient {
            id: 1,
            name: "Aung Kyaw".to_string(),
            date_of_birth: dob(1985, 4, 12),
            gender: Some(Gender::Male),
            department: Some("Cardiology".to_string()),
            status: PatientStatus::Admitted,
            doctor: doctor(1, "Dr. Thida Win"),
            last_visit: visit(10),
            nrc_number: Some("12/LaMaNa(N)123456".to_string()),
            address: None,
            phone: None,
            blood_type: Some("O+".to_string()),
        },
        Patient {
            id: 2,
            name: "Su Su Hlaing".to_string(),
            date_of_birth: dob(1992, 11, 3),
            gender: Some(Gender::Female),
            department: Some("Neurology".to_string()),
            status: PatientStatus::Outpatient,
            doctor: doctor(2, "Dr. Min Htet"),
            last_visit: visit(12),
            nrc_number: None,
            address: None,
            phone: None,
            blood_type: Some("A+".to_string()),
        },
        Patient {
            id: 3,
            name: "Kyaw Zin".to_string(),
            date_of_birth: dob(1978, 7, 21),
            gender: Some(Gender::Male),
            department: Some("Orthopedics".to_string()),
            status: PatientStatus::Discharged,
            doctor: doctor(3, "Dr. Hnin Wai"),
            last_visit: visit(8),
            nrc_number: None,
            address: None,
            phone: None,
            blood_type: None,
        },
    ]
}
