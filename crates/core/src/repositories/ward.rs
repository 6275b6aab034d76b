//! Ward catalog over `/wards`.

use crate::domain::WardCatalog;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::Envelope;
use crate::repositories::WardRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct HttpWardRepository {
    client: Arc<ApiClient>,
}

impl HttpWardRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WardRepository for HttpWardRepository {
    async fn fetch_catalog(&self) -> ApiResult<WardCatalog> {
        let catalog: Envelope<WardCatalog> = self.client.get("wards").await?;
        Ok(catalog.into_inner())
    }
}
