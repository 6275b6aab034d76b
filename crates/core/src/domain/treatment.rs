use crate::domain::staff::StaffRef;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Clinical category of a treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentType {
    Medication,
    Surgery,
    Procedure,
    Therapy,
    DiagnosticTest,
    LabTest,
    Imaging,
    Vaccination,
    Physiotherapy,
    Counseling,
    Dialysis,
    Chemotherapy,
    Radiation,
    Other,
}

impl TreatmentType {
    pub const ALL: [TreatmentType; 14] = [
        TreatmentType::Medication,
        TreatmentType::Surgery,
        TreatmentType::Procedure,
        TreatmentType::Therapy,
        TreatmentType::DiagnosticTest,
        TreatmentType::LabTest,
        TreatmentType::Imaging,
        TreatmentType::Vaccination,
        TreatmentType::Physiotherapy,
        TreatmentType::Counseling,
        TreatmentType::Dialysis,
        TreatmentType::Chemotherapy,
        TreatmentType::Radiation,
        TreatmentType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TreatmentType::Medication => "Medication",
            TreatmentType::Surgery => "Surgery",
            TreatmentType::Procedure => "Procedure",
            TreatmentType::Therapy => "Therapy",
            TreatmentType::DiagnosticTest => "Diagnostic Test",
            TreatmentType::LabTest => "Lab Test",
            TreatmentType::Imaging => "Imaging",
            TreatmentType::Vaccination => "Vaccination",
            TreatmentType::Physiotherapy => "Physiotherapy",
            TreatmentType::Counseling => "Counseling",
            TreatmentType::Dialysis => "Dialysis",
            TreatmentType::Chemotherapy => "Chemotherapy",
            TreatmentType::Radiation => "Radiation",
            TreatmentType::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentOutcome {
    Pending,
    Successful,
    Partial,
    Unsuccessful,
    Ongoing,
}

/// A treatment given during an admission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Treatment {
    pub id: u64,
    pub admission_id: u64,
    pub patient_id: u64,
    pub treatment_type: TreatmentType,
    pub name: String,
    pub notes: Option<String>,
    pub medications: Option<String>,
    pub dosage: Option<String>,
    pub findings: Option<String>,
    pub outcome: TreatmentOutcome,
    pub doctor: Option<StaffRef>,
    pub nurse: Option<StaffRef>,
    pub treatment_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTreatment {
    pub treatment_type: TreatmentType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
    pub outcome: TreatmentOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nurse_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TreatmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_type: Option<TreatmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TreatmentOutcome>,
}
