//! Staff directory over `/staff`.

use crate::domain::{Staff, StaffRole};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{ErrorMessages, Envelope};
use crate::repositories::StaffRepository;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

const STAFF_ERRORS: ErrorMessages = ErrorMessages::new()
    .forbidden("You do not have permission to view staff.")
    .not_found("Staff member not found.");

#[derive(Debug, Deserialize)]
struct StaffWire {
    id: u64,
    name: String,
    email: String,
    role: StaffRole,
}

impl From<StaffWire> for Staff {
    fn from(wire: StaffWire) -> Self {
        Staff {
            id: wire.id,
            name: wire.name,
            email: wire.email,
            role: wire.role,
        }
    }
}

pub struct HttpStaffRepository {
    client: Arc<ApiClient>,
}

impl HttpStaffRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn list(&self, query: &[(&str, String)]) -> ApiResult<Vec<Staff>> {
        let wires: Envelope<Vec<StaffWire>> = self
            .client
            .get_with_query("staff", query)
            .await
            .map_err(|e| STAFF_ERRORS.apply(e))?;
        Ok(wires.into_inner().into_iter().map(Staff::from).collect())
    }
}

#[async_trait]
impl StaffRepository for HttpStaffRepository {
    async fn fetch_all(&self) -> ApiResult<Vec<Staff>> {
        self.list(&[]).await
    }

    async fn fetch_by_role(&self, role: StaffRole) -> ApiResult<Vec<Staff>> {
        self.list(&[("role", role.as_str().to_string())]).await
    }

    async fn get_by_id(&self, id: u64) -> ApiResult<Staff> {
        let wire: Envelope<StaffWire> = self
            .client
            .get(&format!("staff/{id}"))
            .await
            .map_err(|e| STAFF_ERRORS.apply(e))?;
        Ok(wire.into_inner().into())
    }
}
