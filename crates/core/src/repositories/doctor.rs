//! Doctor roster over `/doctors`.

use crate::config::FallbackPolicy;
use crate::domain::Doctor;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{or_sample_data, Envelope};
use crate::repositories::DoctorRepository;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DoctorWire {
    id: u64,
    name: String,
    #[serde(default, alias = "specialty")]
    specialization: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default, alias = "is_available")]
    available: Option<bool>,
}

impl From<DoctorWire> for Doctor {
    fn from(wire: DoctorWire) -> Self {
        Doctor {
            id: wire.id,
            name: wire.name,
            specialization: wire
                .specialization
                .unwrap_or_else(|| "General Medicine".to_string()),
            department: wire.department,
            available: wire.available.unwrap_or(true),
        }
    }
}

pub struct HttpDoctorRepository {
    client: Arc<ApiClient>,
    fallback: FallbackPolicy,
}

impl HttpDoctorRepository {
    pub fn new(client: Arc<ApiClient>, fallback: FallbackPolicy) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl DoctorRepository for HttpDoctorRepository {
    async fn fetch_all(&self) -> ApiResult<Vec<Doctor>> {
        let result = self
            .client
            .get::<Envelope<Vec<DoctorWire>>>("doctors")
            .await
            .map(|env| env.into_inner().into_iter().map(Doctor::from).collect());
        or_sample_data(result, self.fallback, "doctors", sample_doctors)
    }
}

/// Fixed demo roster served when the backend is unreachable and sample data is enabled.
pub fn sample_doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: 1,
            name: "Dr. Thida Win".to_string(),
            specialization: "Cardiology".to_string(),
            department: Some("Cardiology".to_string()),
            available: true,
        },
        Doctor {
            id: 2,
            name: "Dr. Min Htet".to_string(),
            specialization: "Neurology".to_string(),
            department: Some("Neurology".to_string()),
            available: false,
        },
        Doctor {
            id: 3,
            name: "Dr. Hnin Wai".to_string(),
            specialization: "Orthopedic Surgery".to_string(),
            department: Some("Orthopedics".to_string()),
            available: true,
        },
    ]
}
