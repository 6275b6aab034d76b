use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// Upcoming or past appointment on the dashboard schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appointment {
    pub id: u64,
    pub patient_name: String,
    pub doctor_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
}
