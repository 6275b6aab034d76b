//! Dashboard statistics over `/reports/dashboard`.

use crate::domain::{CategoryCount, DashboardReport, ReportTotals, TimePoint};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::repositories::helpers::{humanise, ErrorMessages, Envelope};
use crate::repositories::ReportRepository;
use async_trait::async_trait;
use hms_types::DateRange;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

const REPORT_ERRORS: ErrorMessages =
    ErrorMessages::new().forbidden("You do not have permission to view reports.");

#[derive(Debug, Deserialize)]
struct DashboardWire {
    #[serde(default)]
    totals: ReportTotals,
    #[serde(default)]
    patients_by_status: BTreeMap<String, u64>,
    #[serde(default)]
    admissions_by_type: BTreeMap<String, u64>,
    #[serde(default)]
    treatments_by_outcome: BTreeMap<String, u64>,
    #[serde(default)]
    admissions_over_time: Vec<TimePoint>,
}

/// Category keys arrive as snake_case wire values; labels are for display.
fn categories(counts: BTreeMap<String, u64>) -> Vec<CategoryCount> {
    counts
        .into_iter()
        .map(|(key, count)| CategoryCount {
            label: humanise(&key),
            count,
        })
        .collect()
}

impl DashboardWire {
    fn into_domain(self, range: DateRange) -> DashboardReport {
        let mut admissions_over_time = self.admissions_over_time;
        admissions_over_time.sort_by_key(|p| p.date);
        DashboardReport {
            range,
            totals: self.totals,
            patients_by_status: categories(self.patients_by_status),
            admissions_by_type: categories(self.admissions_by_type),
            treatments_by_outcome: categories(self.treatments_by_outcome),
            admissions_over_time,
        }
    }
}

pub struct HttpReportRepository {
    client: Arc<ApiClient>,
}

impl HttpReportRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportRepository for HttpReportRepository {
    async fn fetch_dashboard(&self, range: DateRange) -> ApiResult<DashboardReport> {
        let wire: Envelope<DashboardWire> = self
            .client
            .get_with_query("reports/dashboard", &range.query_pairs())
            .await
            .map_err(|e| REPORT_ERRORS.apply(e))?;
        Ok(wire.into_inner().into_domain(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client_for, spawn_backend};
    use crate::token::MemoryTokenStore;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn sends_date_range_and_labels_categories() {
        let router = Router::new().route(
            "/reports/dashboard",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({ "data": {
                    "totals": { "patients": 12, "admissions": 5, "treatments": 9, "active_admissions": 2 },
                    "patients_by_status": { "admitted": 2, "outpatient": 10 },
                    "treatments_by_outcome": { "pending": 4 },
                    "admissions_over_time": [
                        { "date": q["end_date"], "count": 1 },
                        { "date": q["start_date"], "count": 4 }
                    ]
                }}))
            }),
        );
        let base = spawn_backend(router).await;
        let repo = HttpReportRepository::new(Arc::new(client_for(
            &base,
            Arc::new(MemoryTokenStore::new()),
        )));
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).expect("date"),
            NaiveDate::from_ymd_opt(2026, 1, 31).expect("date"),
        )
        .expect("range");

        let report = repo.fetch_dashboard(range).await.expect("report");
        assert_eq!(report.range, range);
        assert_eq!(report.totals.patients, 12);
        assert_eq!(
            report.patients_by_status,
            vec![
                CategoryCount { label: "Admitted".into(), count: 2 },
                CategoryCount { label: "Outpatient".into(), count: 10 },
            ]
        );
        assert!(report.admissions_by_type.is_empty());
        assert_eq!(report.admissions_over_time[0].date, range.from);
        assert_eq!(report.admissions_over_time[1].date, range.to);
    }
}
