use crate::domain::staff::StaffRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionType {
    Inpatient,
    Outpatient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    Admitted,
    Discharged,
    Deceased,
    Transferred,
}

impl AdmissionStatus {
    pub fn label(self) -> &'static str {
        match self {
            AdmissionStatus::Admitted => "Admitted",
            AdmissionStatus::Discharged => "Discharged",
            AdmissionStatus::Deceased => "Deceased",
            AdmissionStatus::Transferred => "Transferred",
        }
    }

    /// Discharge, death confirmation and conversion only apply to open admissions.
    pub fn is_open(self) -> bool {
        self == AdmissionStatus::Admitted
    }
}

/// A single hospital stay or outpatient visit of one patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admission {
    pub id: u64,
    pub admission_number: String,
    pub admission_type: AdmissionType,
    pub status: AdmissionStatus,
    pub ward: Option<String>,
    pub bed_number: Option<String>,
    pub patient_id: u64,
    pub patient_name: Option<String>,
    pub doctor: Option<StaffRef>,
    pub admitted_at: Option<NaiveDate>,
    pub discharged_at: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub discharge_summary: Option<String>,
    pub death_cause: Option<String>,
}

/// Body for `POST /patients/{patient_id}/admissions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewAdmission {
    pub patient_id: u64,
    pub admission_type: AdmissionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admitted_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AdmissionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AdmissionStatus>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DischargeRequest {
    pub discharged_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_summary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeathConfirmation {
    pub died_at: NaiveDate,
    pub death_cause: String,
}
