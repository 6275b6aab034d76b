//! Appointment schedule over `/appointments`.

use crate::config::FallbackPolicy;
use crate::domain::{Appointment, AppointmentStatus};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{or_sample_data, Envelope};
use crate::repositories::AppointmentRepository;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct NamedWire {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AppointmentWire {
    id: u64,
    #[serde(default)]
    patient_name: Option<String>,
    #[serde(default)]
    patient: Option<NamedWire>,
    #[serde(default)]
    doctor_name: Option<String>,
    #[serde(default)]
    doctor: Option<NamedWire>,
    #[serde(alias = "appointment_date")]
    scheduled_at: DateTime<Utc>,
    #[serde(default)]
    status: Option<AppointmentStatus>,
}

impl From<AppointmentWire> for Appointment {
    fn from(wire: AppointmentWire) -> Self {
        Appointment {
            id: wire.id,
            patient_name: wire
                .patient_name
                .or(wire.patient.map(|p| p.name))
                .unwrap_or_default(),
            doctor_name: wire
                .doctor_name
                .or(wire.doctor.map(|d| d.name))
                .unwrap_or_default(),
            scheduled_at: wire.scheduled_at,
            status: wire.status.unwrap_or(AppointmentStatus::Scheduled),
        }
    }
}

pub struct HttpAppointmentRepository {
    client: Arc<ApiClient>,
    fallback: FallbackPolicy,
}

impl HttpAppointmentRepository {
    pub fn new(client: Arc<ApiClient>, fallback: FallbackPolicy) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl AppointmentRepository for HttpAppointmentRepository {
    async fn fetch_all(&self) -> ApiResult<Vec<Appointment>> {
        let result = self
            .client
            .get::<Envelope<Vec<AppointmentWire>>>("appointments")
            .await
            .map(|env| env.into_inner().into_iter().map(Appointment::from).collect());
        or_sample_data(result, self.fallback, "appointments", sample_appointments)
    }
}

/// Fixed demo schedule served when the backend is unreachable and sample data is enabled.
pub fn sample_appointments() -> Vec<Appointment> {
    let at = |d: u32, h: u32| {
        Utc.with_ymd_and_hms(2026, 2, d, h, 0, 0)
            .single()
            .unwrap_or_default()
    };

    vec![
        Appointment {
            id: 1,
            patient_name: "Aung Kyaw".to_string(),
            doctor_name: "Dr. Thida Win".to_string(),
            scheduled_at: at(2, 9),
            status: AppointmentStatus::Scheduled,
        },
        Appointment {
            id: 2,
            patient_name: "Su Su Hlaing".to_string(),
            doctor_name: "Dr. Min Htet".to_string(),
            scheduled_at: at(2, 11),
            status: AppointmentStatus::Scheduled,
        },
        Appointment {
            id: 3,
            patient_name: "Kyaw Zin".to_string(),
            doctor_name: "Dr. Hnin Wai".to_string(),
            scheduled_at: at(1, 14),
            status: AppointmentStatus::Completed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config_for, spawn_backend, unreachable_base};
    use crate::token::MemoryTokenStore;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    fn repository(base: &str, fallback: FallbackPolicy) -> HttpAppointmentRepository {
        let client = ApiClient::new(&config_for(base, fallback), Arc::new(MemoryTokenStore::new()))
            .expect("client");
        HttpAppointmentRepository::new(Arc::new(client), fallback)
    }

    #[tokio::test]
    async fn names_come_from_nested_objects_when_flat_fields_absent() {
        let router = Router::new().route(
            "/appointments",
            get(|| async {
                Json(json!({ "data": [{
                    "id": 1,
                    "patient": { "name": "Nilar" },
                    "doctor": { "name": "Dr. Soe" },
                    "appointment_date": "2026-03-01T10:00:00Z",
                    "status": "cancelled"
                }]}))
            }),
        );
        let base = spawn_backend(router).await;
        let appointments = repository(&base, FallbackPolicy::Disabled)
            .fetch_all()
            .await
            .expect("appointments");
        assert_eq!(appointments[0].patient_name, "Nilar");
        assert_eq!(appointments[0].doctor_name, "Dr. Soe");
        assert_eq!(appointments[0].status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn transport_failure_serves_sample_schedule() {
        let appointments = repository(&unreachable_base(), FallbackPolicy::SampleData)
            .fetch_all()
            .await
            .expect("sample schedule");
        assert_eq!(appointments.len(), 3);
    }
}
