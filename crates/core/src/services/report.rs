use crate::constants::DEFAULT_REPORT_DAYS;
use crate::domain::DashboardReport;
use crate::error::ApiResult;
use crate::repositories::ReportRepository;
use chrono::{NaiveDate, Utc};
use hms_types::DateRange;
use std::sync::Arc;

/// The window used when the caller gives none.
pub fn default_range(today: NaiveDate) -> DateRange {
    DateRange::last_days(today, DEFAULT_REPORT_DAYS)
}

pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>) -> Self {
        Self { repo }
    }

    pub async fn dashboard(&self, range: Option<DateRange>) -> ApiResult<DashboardReport> {
        self.dashboard_on(range, Utc::now().date_naive()).await
    }

    pub async fn dashboard_on(
        &self,
        range: Option<DateRange>,
        today: NaiveDate,
    ) -> ApiResult<DashboardReport> {
        let range = range.unwrap_or_else(|| default_range(today));
        self.repo.fetch_dashboard(range).await
    }
}
