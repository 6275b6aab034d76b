use crate::domain::{Appointment, AppointmentStatus};
use crate::error::ApiResult;
use crate::repositories::AppointmentRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppointmentDto {
    pub id: u64,
    pub patient_name: String,
    pub doctor_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
}

impl From<Appointment> for AppointmentDto {
    fn from(a: Appointment) -> Self {
        AppointmentDto {
            id: a.id,
            patient_name: a.patient_name,
            doctor_name: a.doctor_name,
            scheduled_at: a.scheduled_at,
            status: a.status,
        }
    }
}

pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
}

impl AppointmentService {
    pub fn new(repo: Arc<dyn AppointmentRepository>) -> Self {
        Self { repo }
    }

    /// Ordered by scheduled time, earliest first.
    pub async fn list(&self) -> ApiResult<Vec<AppointmentDto>> {
        let mut appointments: Vec<AppointmentDto> = self
            .repo
            .fetch_all()
            .await?
            .into_iter()
            .map(AppointmentDto::from)
            .collect();
        appointments.sort_by_key(|a| a.scheduled_at);
        Ok(appointments)
    }

    pub async fn upcoming(&self, now: DateTime<Utc>) -> ApiResult<Vec<AppointmentDto>> {
        let mut appointments = self.list().await?;
        appointments.retain(|a| a.status == AppointmentStatus::Scheduled && a.scheduled_at >= now);
        Ok(appointments)
    }
}
