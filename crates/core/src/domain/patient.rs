use crate::domain::staff::StaffRef;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Admitted,
    Discharged,
    Outpatient,
}

impl PatientStatus {
    pub fn label(self) -> &'static str {
        match self {
            PatientStatus::Admitted => "Admitted",
            PatientStatus::Discharged => "Discharged",
            PatientStatus::Outpatient => "Outpatient",
        }
    }
}

/// A registered patient.
///
/// `address` holds either the JSON-encoded region/district/township triple or a legacy
/// free-text address; see [`crate::services::address`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub id: u64,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub department: Option<String>,
    pub status: PatientStatus,
    pub doctor: Option<StaffRef>,
    pub last_visit: Option<DateTime<Utc>>,
    pub nrc_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub blood_type: Option<String>,
}

impl Patient {
    /// Age in completed years on `today`, if the birth date is known and not in the future.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

/// Body for `POST /patients`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPatient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nrc_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<u64>,
}

/// Body for `PATCH /patients/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nrc_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<u64>,
}
