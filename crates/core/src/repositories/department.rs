//! Department lookup over `/departments`.

use crate::domain::Department;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::Envelope;
use crate::repositories::DepartmentRepository;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DepartmentWire {
    id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

pub struct HttpDepartmentRepository {
    client: Arc<ApiClient>,
}

impl HttpDepartmentRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DepartmentRepository for HttpDepartmentRepository {
    async fn fetch_all(&self) -> ApiResult<Vec<Department>> {
        let wires: Envelope<Vec<DepartmentWire>> = self.client.get("departments").await?;
        Ok(wires
            .into_inner()
            .into_iter()
            .map(|w| Department {
                id: w.id,
                name: w.name,
                description: w.description.filter(|d| !d.trim().is_empty()),
            })
            .collect())
    }
}
